//! Action definitions and handlers.
//!
//! An [`InlineAction`] binds a name to an [`ActionHandler`] together with its
//! presentation: an optional static label and CSS classes, and optional hooks
//! computing either per row. Hooks are registered next to the handler rather
//! than looked up by name.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use django_rs_inline_actions_http::{HttpRequest, HttpResponse};

use crate::admin::InlineActionsAdmin;
use crate::error::InlineResult;
use crate::models::Row;
use crate::render::humanize_action;
use crate::site::AdminSite;

/// What a handler produced.
#[derive(Debug)]
pub enum ActionOutcome {
    /// A response returned to the client as-is, e.g. an intermediate form.
    Response(HttpResponse),
    /// The action completed; the dispatcher redirects back.
    Done,
}

impl From<HttpResponse> for ActionOutcome {
    fn from(response: HttpResponse) -> Self {
        Self::Response(response)
    }
}

/// Everything a handler may need besides the rows it acts on.
#[derive(Clone, Copy)]
pub struct ActionContext<'a> {
    /// The current request.
    pub request: &'a HttpRequest,
    /// The admin or inline the action was issued by.
    pub admin: &'a InlineActionsAdmin,
    /// The site the admin is registered with (store, URLs, settings).
    pub site: &'a AdminSite,
}

impl fmt::Debug for ActionContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionContext")
            .field("path", &self.request.path())
            .field("admin", &self.admin.name())
            .field("site", &self.site.name())
            .finish()
    }
}

/// A server-side action handler.
///
/// `row` is the object the button was rendered for; `parent` is the object
/// whose change form hosts the inline, or `None` for top-level actions.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use django_rs_inline_actions::action::{ActionContext, ActionHandler, ActionOutcome};
/// use django_rs_inline_actions::error::InlineResult;
/// use django_rs_inline_actions::models::Row;
///
/// struct Archive;
///
/// #[async_trait]
/// impl ActionHandler for Archive {
///     async fn call(
///         &self,
///         ctx: &ActionContext<'_>,
///         row: &Row,
///         _parent: Option<&Row>,
///     ) -> InlineResult<ActionOutcome> {
///         let mut row = row.clone();
///         row.set("archived", true);
///         ctx.site.store().save(row).await?;
///         Ok(ActionOutcome::Done)
///     }
/// }
/// ```
#[async_trait]
pub trait ActionHandler: Send + Sync {
    /// Runs the action.
    ///
    /// # Errors
    ///
    /// Errors are propagated to the caller unchanged.
    async fn call(
        &self,
        ctx: &ActionContext<'_>,
        row: &Row,
        parent: Option<&Row>,
    ) -> InlineResult<ActionOutcome>;
}

/// A per-row presentation hook.
pub type HookFn = Arc<dyn Fn(&HttpRequest, &Row) -> String + Send + Sync>;

/// Optional per-row overrides of an action's label and CSS classes.
#[derive(Clone, Default)]
pub struct ActionHooks {
    /// Computes the button label.
    pub label: Option<HookFn>,
    /// Computes the button CSS classes.
    pub css: Option<HookFn>,
}

impl fmt::Debug for ActionHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionHooks")
            .field("label", &self.label.is_some())
            .field("css", &self.css.is_some())
            .finish()
    }
}

/// What an action name is bound to.
#[derive(Clone)]
pub enum ActionBinding {
    /// A callable handler.
    Handler(Arc<dyn ActionHandler>),
    /// A plain value that happens to share the action's name. Dispatching it
    /// is a caller-contract violation.
    Attribute(serde_json::Value),
}

impl fmt::Debug for ActionBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handler(_) => f.write_str("Handler(..)"),
            Self::Attribute(value) => f.debug_tuple("Attribute").field(value).finish(),
        }
    }
}

/// A named action with its presentation.
///
/// # Examples
///
/// ```
/// use django_rs_inline_actions::action::InlineAction;
/// use django_rs_inline_actions::models::{ContentType, Row};
/// use django_rs_inline_actions_http::HttpRequest;
///
/// let action = InlineAction::attribute("toggle_publish", serde_json::Value::Null)
///     .label_fn(|_request, row| {
///         if row.get_str("status") == Some("draft") { "Publish".into() } else { "Unpublish".into() }
///     });
///
/// let request = HttpRequest::builder().build();
/// let row = Row::new(ContentType::new("blog", "article"), serde_json::json!({"status": "draft"}));
/// assert_eq!(action.label_for(&request, &row), "Publish");
/// assert_eq!(action.css_for(&request, &row), "");
/// ```
#[derive(Debug, Clone)]
pub struct InlineAction {
    name: String,
    binding: ActionBinding,
    label: Option<String>,
    css_classes: Option<String>,
    hooks: ActionHooks,
}

impl InlineAction {
    /// Creates an action bound to a handler.
    pub fn new(name: impl Into<String>, handler: impl ActionHandler + 'static) -> Self {
        Self::with_binding(name, ActionBinding::Handler(Arc::new(handler)))
    }

    /// Creates an action bound to a plain value instead of a handler.
    pub fn attribute(name: impl Into<String>, value: serde_json::Value) -> Self {
        Self::with_binding(name, ActionBinding::Attribute(value))
    }

    /// Creates an action with an explicit binding.
    pub fn with_binding(name: impl Into<String>, binding: ActionBinding) -> Self {
        Self {
            name: name.into(),
            binding,
            label: None,
            css_classes: None,
            hooks: ActionHooks::default(),
        }
    }

    /// Sets the static label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the static CSS classes.
    #[must_use]
    pub fn css_classes(mut self, css_classes: impl Into<String>) -> Self {
        self.css_classes = Some(css_classes.into());
        self
    }

    /// Sets a hook computing the label per row.
    #[must_use]
    pub fn label_fn(
        mut self,
        f: impl Fn(&HttpRequest, &Row) -> String + Send + Sync + 'static,
    ) -> Self {
        self.hooks.label = Some(Arc::new(f));
        self
    }

    /// Sets a hook computing the CSS classes per row.
    #[must_use]
    pub fn css_fn(mut self, f: impl Fn(&HttpRequest, &Row) -> String + Send + Sync + 'static) -> Self {
        self.hooks.css = Some(Arc::new(f));
        self
    }

    /// Returns the action name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the binding.
    pub const fn binding(&self) -> &ActionBinding {
        &self.binding
    }

    /// Returns the handler, or `None` for attribute bindings.
    pub fn handler(&self) -> Option<&Arc<dyn ActionHandler>> {
        match &self.binding {
            ActionBinding::Handler(handler) => Some(handler),
            ActionBinding::Attribute(_) => None,
        }
    }

    /// Returns the hooks.
    pub const fn hooks(&self) -> &ActionHooks {
        &self.hooks
    }

    /// Resolves the label: hook, static label, humanized name.
    pub fn label_for(&self, request: &HttpRequest, row: &Row) -> String {
        if let Some(hook) = &self.hooks.label {
            return hook(request, row);
        }
        self.label
            .clone()
            .unwrap_or_else(|| humanize_action(&self.name))
    }

    /// Resolves the CSS classes: hook, static classes, empty.
    pub fn css_for(&self, request: &HttpRequest, row: &Row) -> String {
        if let Some(hook) = &self.hooks.css {
            return hook(request, row);
        }
        self.css_classes.clone().unwrap_or_default()
    }
}
