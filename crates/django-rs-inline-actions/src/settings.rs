//! Settings for the inline actions plugin.
//!
//! [`InlineActionsSettings`] controls presentation (column label, container
//! class, stylesheet) and where redirects point (site name and URL prefix).
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! | Env Var | Setting |
//! |---|---|
//! | `DJANGO_INLINE_ACTIONS_COLUMN_LABEL` | `column_label` |
//! | `DJANGO_INLINE_ACTIONS_CONTAINER_CLASS` | `container_class` |
//! | `DJANGO_INLINE_ACTIONS_STYLESHEET` | `stylesheet` |
//! | `DJANGO_INLINE_ACTIONS_SITE_NAME` | `site_name` |
//! | `DJANGO_INLINE_ACTIONS_URL_PREFIX` | `url_prefix` |
//! | `DJANGO_DEBUG` | `debug` |
//! | `DJANGO_LOG_LEVEL` | `log_level` |

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{InlineActionError, InlineResult};

/// Plugin settings.
///
/// # Examples
///
/// ```
/// use django_rs_inline_actions::settings::InlineActionsSettings;
///
/// let settings = InlineActionsSettings::from_toml_str(r#"
///     column_label = "Row actions"
///     url_prefix = "/custom_admin"
/// "#).unwrap();
/// assert_eq!(settings.column_label, "Row actions");
/// assert_eq!(settings.site_name, "admin");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InlineActionsSettings {
    /// Header of the actions column in tabular inlines and change lists.
    pub column_label: String,
    /// CSS classes of the element wrapping the buttons of one row.
    pub container_class: String,
    /// Stylesheet added to the admin media.
    pub stylesheet: String,
    /// Name of the admin site, used in URL names.
    pub site_name: String,
    /// Path prefix of the admin site.
    pub url_prefix: String,
    /// Debug mode switches logging to a human-readable format.
    pub debug: bool,
    /// Log filter directive.
    pub log_level: String,
}

impl Default for InlineActionsSettings {
    fn default() -> Self {
        Self {
            column_label: "Actions".to_string(),
            container_class: "submit_row inline_actions".to_string(),
            stylesheet: "inline_actions/css/inline_actions.css".to_string(),
            site_name: "admin".to_string(),
            url_prefix: "/admin".to_string(),
            debug: false,
            log_level: "info".to_string(),
        }
    }
}

impl InlineActionsSettings {
    /// Loads settings from a TOML string; missing keys keep their defaults.
    pub fn from_toml_str(toml_str: &str) -> InlineResult<Self> {
        toml::from_str(toml_str).map_err(|e| {
            InlineActionError::Configuration(format!("Failed to parse TOML: {e}"))
        })
    }

    /// Loads settings from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> InlineResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            InlineActionError::Configuration(format!(
                "Failed to read TOML file '{}': {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Loads settings from a TOML file, then applies environment overrides.
    pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> InlineResult<Self> {
        let mut settings = Self::from_toml_file(path)?;
        settings.apply_env_overrides();
        Ok(settings)
    }

    /// Loads settings from environment variables only, starting from defaults.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        settings.apply_env_overrides();
        settings
    }

    /// Applies `DJANGO_INLINE_ACTIONS_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from an arbitrary variable source.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("DJANGO_INLINE_ACTIONS_COLUMN_LABEL") {
            self.column_label = val;
        }
        if let Some(val) = lookup("DJANGO_INLINE_ACTIONS_CONTAINER_CLASS") {
            self.container_class = val;
        }
        if let Some(val) = lookup("DJANGO_INLINE_ACTIONS_STYLESHEET") {
            self.stylesheet = val;
        }
        if let Some(val) = lookup("DJANGO_INLINE_ACTIONS_SITE_NAME") {
            self.site_name = val;
        }
        if let Some(val) = lookup("DJANGO_INLINE_ACTIONS_URL_PREFIX") {
            self.url_prefix = val;
        }
        if let Some(val) = lookup("DJANGO_DEBUG") {
            self.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
        }
        if let Some(val) = lookup("DJANGO_LOG_LEVEL") {
            self.log_level = val;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = InlineActionsSettings::default();
        assert_eq!(settings.column_label, "Actions");
        assert_eq!(settings.container_class, "submit_row inline_actions");
        assert_eq!(settings.stylesheet, "inline_actions/css/inline_actions.css");
        assert_eq!(settings.site_name, "admin");
        assert_eq!(settings.url_prefix, "/admin");
        assert!(!settings.debug);
    }

    #[test]
    fn test_from_toml_partial() {
        let settings = InlineActionsSettings::from_toml_str(
            r#"
            site_name = "custom_admin"
            url_prefix = "/custom_admin"
            debug = true
            "#,
        )
        .unwrap();
        assert_eq!(settings.site_name, "custom_admin");
        assert_eq!(settings.url_prefix, "/custom_admin");
        assert!(settings.debug);
        assert_eq!(settings.column_label, "Actions");
    }

    #[test]
    fn test_from_toml_invalid() {
        let err = InlineActionsSettings::from_toml_str("debug = [").unwrap_err();
        assert!(matches!(err, InlineActionError::Configuration(_)));
    }

    #[test]
    fn test_from_missing_file() {
        let err = InlineActionsSettings::from_toml_file("/nonexistent/inline.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/inline.toml"));
    }

    #[test]
    fn test_overrides() {
        let mut settings = InlineActionsSettings::default();
        settings.apply_overrides(|key| match key {
            "DJANGO_INLINE_ACTIONS_COLUMN_LABEL" => Some("Do".to_string()),
            "DJANGO_DEBUG" => Some("YES".to_string()),
            "DJANGO_LOG_LEVEL" => Some("debug".to_string()),
            _ => None,
        });
        assert_eq!(settings.column_label, "Do");
        assert!(settings.debug);
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.site_name, "admin");
    }
}
