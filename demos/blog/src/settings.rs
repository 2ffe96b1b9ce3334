//! Settings of the blog demo.
//!
//! Loaded from an optional TOML file, then overridden by
//! `DJANGO_INLINE_ACTIONS_*` environment variables.

use std::path::Path;

use anyhow::Context as _;
use django_rs_inline_actions::InlineActionsSettings;

/// Loads the settings.
///
/// # Errors
///
/// Fails when the given file cannot be read or parsed.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<InlineActionsSettings> {
    let settings = match path {
        Some(path) => InlineActionsSettings::from_toml_file_with_env(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => InlineActionsSettings::from_env(),
    };
    Ok(settings)
}
