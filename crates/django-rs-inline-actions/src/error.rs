//! Error types for inline action rendering and dispatch.
//!
//! [`InlineActionError`] separates the failure classes callers need to tell
//! apart: misconfiguration (an action name with no definition), protocol
//! violations (several tokens in one submission), caller-contract violations
//! ([`InlineActionError::ActionNotCallable`]), lookup failures, and errors
//! raised by the handlers themselves.

use django_rs_inline_actions_http::HttpResponse;
use http::StatusCode;
use thiserror::Error;

/// The error type for the inline actions plugin.
#[derive(Error, Debug)]
pub enum InlineActionError {
    // ── Configuration ────────────────────────────────────────────────

    /// An action name was resolved for a row but nothing is registered under it.
    #[error("Could not find action `{0}`")]
    ActionNotFound(String),

    /// Settings could not be loaded.
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ── Protocol ─────────────────────────────────────────────────────

    /// More than one action token was submitted at once.
    #[error("Multiple inline actions have been triggered simultaneously.")]
    MultipleActions,

    /// No action token was submitted where one was required.
    #[error("No inline action has been triggered.")]
    NoActionTriggered,

    /// A posted field carried the action prefix but could not be decoded.
    #[error("Malformed action token: {0}")]
    MalformedToken(String),

    // ── Caller contract ──────────────────────────────────────────────

    /// The name resolved to something that cannot be invoked as a handler.
    #[error("Action `{action}` of `{admin}` is not callable")]
    ActionNotCallable {
        /// Declaring name of the admin or inline.
        admin: String,
        /// The action name.
        action: String,
    },

    // ── Lookups ──────────────────────────────────────────────────────

    /// The token named a model that is not registered.
    #[error("Model `{app_label}.{model}` is not registered")]
    ModelNotFound {
        /// The application label.
        app_label: String,
        /// The model name.
        model: String,
    },

    /// No row with the given primary key is visible to the admin.
    #[error("{model} matching query does not exist (pk={pk})")]
    ObjectNotFound {
        /// The model key, `"app_label.model"`.
        model: String,
        /// The requested primary key.
        pk: String,
    },

    // ── Runtime ──────────────────────────────────────────────────────

    /// The user may not perform the requested operation.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// A handler failed with a business-level error.
    #[error("Action failed: {0}")]
    Handler(String),

    /// The object store failed.
    #[error("Store error: {0}")]
    Store(String),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl InlineActionError {
    /// Returns the HTTP status code associated with this error.
    ///
    /// - `MultipleActions`, `NoActionTriggered`, `MalformedToken` -> 400
    /// - `PermissionDenied` -> 403
    /// - `ModelNotFound`, `ObjectNotFound` -> 404
    /// - Everything else -> 500
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::MultipleActions | Self::NoActionTriggered | Self::MalformedToken(_) => 400,
            Self::PermissionDenied(_) => 403,
            Self::ModelNotFound { .. } | Self::ObjectNotFound { .. } => 404,
            Self::ActionNotFound(_)
            | Self::Configuration(_)
            | Self::ActionNotCallable { .. }
            | Self::Handler(_)
            | Self::Store(_)
            | Self::Io(_) => 500,
        }
    }

    /// Converts the error into a plain-text response with the mapped status.
    pub fn to_response(&self) -> HttpResponse {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = HttpResponse::new(status, self.to_string());
        response.set_content_type("text/plain");
        response
    }
}

/// A convenience type alias for `Result<T, InlineActionError>`.
pub type InlineResult<T> = Result<T, InlineActionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(InlineActionError::MultipleActions.status_code(), 400);
        assert_eq!(InlineActionError::MalformedToken("x".into()).status_code(), 400);
        assert_eq!(InlineActionError::PermissionDenied("x".into()).status_code(), 403);
        assert_eq!(
            InlineActionError::ModelNotFound {
                app_label: "blog".into(),
                model: "tag".into(),
            }
            .status_code(),
            404
        );
        assert_eq!(
            InlineActionError::ObjectNotFound {
                model: "blog.article".into(),
                pk: "7".into(),
            }
            .status_code(),
            404
        );
        assert_eq!(InlineActionError::ActionNotFound("x".into()).status_code(), 500);
        assert_eq!(
            InlineActionError::ActionNotCallable {
                admin: "articleadmin".into(),
                action: "property_action".into(),
            }
            .status_code(),
            500
        );
    }

    #[test]
    fn test_protocol_messages() {
        assert_eq!(
            InlineActionError::MultipleActions.to_string(),
            "Multiple inline actions have been triggered simultaneously."
        );
        assert_eq!(
            InlineActionError::NoActionTriggered.to_string(),
            "No inline action has been triggered."
        );
    }

    #[test]
    fn test_not_callable_display() {
        let err = InlineActionError::ActionNotCallable {
            admin: "ArticleAdmin".into(),
            action: "property_action".into(),
        };
        assert_eq!(
            err.to_string(),
            "Action `property_action` of `ArticleAdmin` is not callable"
        );
    }

    #[test]
    fn test_to_response() {
        let response = InlineActionError::ObjectNotFound {
            model: "blog.article".into(),
            pk: "9".into(),
        }
        .to_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.content_type(), "text/plain");
        assert!(response.content().contains("pk=9"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "settings.toml");
        let err: InlineActionError = io_err.into();
        assert_eq!(err.status_code(), 500);
        assert!(err.to_string().contains("settings.toml"));
    }
}
