//! Logging integration.
//!
//! Provides [`setup_logging`] for binaries embedding the plugin and
//! [`dispatch_span`] for correlating the log lines of one action dispatch.

use crate::settings::InlineActionsSettings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// In debug mode a pretty, human-readable format is used; otherwise a
/// structured JSON format. An already installed subscriber is left in place.
pub fn setup_logging(settings: &InlineActionsSettings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span covering one dispatch on the given admin.
///
/// # Examples
///
/// ```
/// use django_rs_inline_actions::logging::dispatch_span;
///
/// let span = dispatch_span("blog.author", Some("1"));
/// let _guard = span.enter();
/// tracing::debug!("resolving inline action");
/// ```
pub fn dispatch_span(model_key: &str, object_id: Option<&str>) -> tracing::Span {
    tracing::debug_span!(
        "inline_action",
        admin = model_key,
        object_id = object_id.unwrap_or("-")
    )
}
