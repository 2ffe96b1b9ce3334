//! The action token carried in a submit button's `name`.
//!
//! A browser submits only the name and value of the button that was pressed,
//! so everything the dispatcher needs to route the action back is encoded in
//! the field name:
//!
//! ```text
//! _action__<declaring name>__<admin|inline>__<action>__<app_label>__<model>__<pk>
//! ```
//!
//! The token is decoded into an [`ActionToken`] as soon as it is read from the
//! POST data; nothing downstream works on substrings.

use std::fmt;
use std::str::FromStr;

use django_rs_inline_actions_http::QueryDict;

use crate::error::{InlineActionError, InlineResult};

/// Prefix marking a POST field as an action token.
pub const ACTION_PREFIX: &str = "_action";

/// Separator between token components.
pub const SEPARATOR: &str = "__";

const COMPONENTS: usize = 6;

/// Whether an action was issued by a top-level admin or by a nested inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminKind {
    /// A top-level model admin (change list rows).
    Admin,
    /// An inline nested in a parent's change form.
    Inline,
}

impl AdminKind {
    /// Returns the wire representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Inline => "inline",
        }
    }
}

impl fmt::Display for AdminKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminKind {
    type Err = InlineActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "inline" => Ok(Self::Inline),
            other => Err(InlineActionError::MalformedToken(format!(
                "unknown admin kind `{other}`"
            ))),
        }
    }
}

/// A decoded action token.
///
/// # Examples
///
/// ```
/// use django_rs_inline_actions::token::{ActionToken, AdminKind};
///
/// let token: ActionToken = "_action__articleinline__inline__delete_action__blog__article__7"
///     .parse()
///     .unwrap();
/// assert_eq!(token.admin_name, "articleinline");
/// assert_eq!(token.kind, AdminKind::Inline);
/// assert_eq!(token.action, "delete_action");
/// assert_eq!(token.pk, "7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionToken {
    /// Lower-cased declaring name of the issuing admin or inline.
    pub admin_name: String,
    /// Kind of the issuing admin.
    pub kind: AdminKind,
    /// Name of the requested action.
    pub action: String,
    /// App label of the target row's model.
    pub app_label: String,
    /// Model name of the target row.
    pub model_name: String,
    /// Primary key of the target row.
    pub pk: String,
}

impl ActionToken {
    /// Creates a token. The admin name is lower-cased.
    pub fn new(
        admin_name: &str,
        kind: AdminKind,
        action: impl Into<String>,
        app_label: impl Into<String>,
        model_name: impl Into<String>,
        pk: impl Into<String>,
    ) -> Self {
        Self {
            admin_name: admin_name.to_lowercase(),
            kind,
            action: action.into(),
            app_label: app_label.into(),
            model_name: model_name.into(),
            pk: pk.into(),
        }
    }

    /// Encodes the token into a form field name.
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Decodes a form field name.
    ///
    /// # Errors
    ///
    /// Returns [`InlineActionError::MalformedToken`] if the prefix is missing,
    /// the component count is not exactly six, a component is empty, or the
    /// admin kind is unknown.
    pub fn parse(field_name: &str) -> InlineResult<Self> {
        let body = field_name
            .strip_prefix(ACTION_PREFIX)
            .and_then(|rest| rest.strip_prefix(SEPARATOR))
            .ok_or_else(|| InlineActionError::MalformedToken(field_name.to_string()))?;

        let parts: Vec<&str> = body.split(SEPARATOR).collect();
        if parts.len() != COMPONENTS || parts.iter().any(|p| p.is_empty()) {
            return Err(InlineActionError::MalformedToken(field_name.to_string()));
        }

        Ok(Self {
            admin_name: parts[0].to_string(),
            kind: parts[1].parse()?,
            action: parts[2].to_string(),
            app_label: parts[3].to_string(),
            model_name: parts[4].to_string(),
            pk: parts[5].to_string(),
        })
    }

    /// Returns `true` if a POST key looks like an action token.
    pub fn is_token(key: &str) -> bool {
        key.strip_prefix(ACTION_PREFIX)
            .is_some_and(|rest| rest.starts_with(SEPARATOR))
    }

    /// Returns the raw keys of all action tokens in the POST data.
    pub fn raw_keys(post: &QueryDict) -> Vec<&str> {
        post.keys().filter(|key| Self::is_token(key)).collect()
    }

    /// Finds and decodes the single action token in the POST data.
    ///
    /// Returns `Ok(None)` when no token was submitted.
    ///
    /// # Errors
    ///
    /// Returns [`InlineActionError::MultipleActions`] when more than one token
    /// is present, or [`InlineActionError::MalformedToken`] when the token
    /// cannot be decoded.
    pub fn find(post: &QueryDict) -> InlineResult<Option<Self>> {
        match Self::raw_keys(post).as_slice() {
            [] => Ok(None),
            [key] => Self::parse(key).map(Some),
            _ => Err(InlineActionError::MultipleActions),
        }
    }
}

impl fmt::Display for ActionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{ACTION_PREFIX}{SEPARATOR}{}{SEPARATOR}{}{SEPARATOR}{}{SEPARATOR}{}{SEPARATOR}{}{SEPARATOR}{}",
            self.admin_name, self.kind, self.action, self.app_label, self.model_name, self.pk
        )
    }
}

impl FromStr for ActionToken {
    type Err = InlineActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
