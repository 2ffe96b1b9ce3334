//! Admin and inline configuration with inline actions.
//!
//! [`InlineActionsAdmin`] describes either a top-level model admin or an
//! inline nested in one. Besides its action registry it carries the pieces of
//! the host's admin configuration the plugin touches: the field lists the
//! `render_inline_actions` pseudo-field is injected into, the queryset scope
//! used to look rows up, and (for model admins) the configured inlines.

use std::fmt;
use std::sync::Arc;

use django_rs_inline_actions_http::HttpRequest;

use crate::action::{ActionContext, ActionOutcome, InlineAction};
use crate::error::{InlineActionError, InlineResult};
use crate::fields::{inject_render_field, Media};
use crate::models::{ContentType, Row};
use crate::registry::{ActionProvider, ActionRegistry, AllowAll, PermissionPolicy, ResolveContext};
use crate::render::{render_button, wrap_buttons};
use crate::settings::InlineActionsSettings;
use crate::site::AdminSite;
use crate::store::{row_matches, FieldFilter, ObjectStore};
use crate::token::{ActionToken, AdminKind};

/// An admin or inline with inline actions.
///
/// # Examples
///
/// ```
/// use django_rs_inline_actions::actions::DefaultActions;
/// use django_rs_inline_actions::admin::InlineActionsAdmin;
/// use django_rs_inline_actions::models::ContentType;
///
/// let inline = InlineActionsAdmin::inline("ArticleInline", ContentType::new("blog", "article"))
///     .fk_name("author")
///     .fields(vec!["title", "status"])
///     .with_actions(DefaultActions);
///
/// let admin = InlineActionsAdmin::model_admin("AuthorAdmin", ContentType::new("blog", "author"))
///     .inlines(vec![inline]);
/// assert_eq!(admin.get_inlines().len(), 1);
/// ```
#[derive(Clone)]
pub struct InlineActionsAdmin {
    name: String,
    kind: AdminKind,
    content_type: ContentType,
    registry: ActionRegistry,
    permissions: Arc<dyn PermissionPolicy>,
    queryset_filters: Vec<FieldFilter>,
    fk_name: Option<String>,
    fields: Vec<String>,
    readonly_fields: Vec<String>,
    list_display: Vec<String>,
    inlines: Vec<InlineActionsAdmin>,
    settings: InlineActionsSettings,
}

impl fmt::Debug for InlineActionsAdmin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InlineActionsAdmin")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("content_type", &self.content_type)
            .field("registry", &self.registry)
            .field("queryset_filters", &self.queryset_filters)
            .field("fk_name", &self.fk_name)
            .field("inlines", &self.inlines)
            .finish_non_exhaustive()
    }
}

impl InlineActionsAdmin {
    fn new(name: impl Into<String>, kind: AdminKind, content_type: ContentType) -> Self {
        Self {
            name: name.into(),
            kind,
            content_type,
            registry: ActionRegistry::new(),
            permissions: Arc::new(AllowAll),
            queryset_filters: Vec::new(),
            fk_name: None,
            fields: Vec::new(),
            readonly_fields: Vec::new(),
            list_display: Vec::new(),
            inlines: Vec::new(),
            settings: InlineActionsSettings::default(),
        }
    }

    /// Creates a top-level model admin.
    ///
    /// `name` is the declaring name (e.g. `"AuthorAdmin"`), encoded lower-cased
    /// in action tokens.
    pub fn model_admin(name: impl Into<String>, content_type: ContentType) -> Self {
        Self::new(name, AdminKind::Admin, content_type)
    }

    /// Creates an inline.
    ///
    /// `name` (e.g. `"ArticleInline"`) tells several inlines over the same
    /// model apart.
    pub fn inline(name: impl Into<String>, content_type: ContentType) -> Self {
        Self::new(name, AdminKind::Inline, content_type)
    }

    // ── Builder ──────────────────────────────────────────────────────

    /// Replaces the action registry.
    #[must_use]
    pub fn actions(mut self, registry: ActionRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Registers an action provider.
    #[must_use]
    pub fn with_actions(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.registry.register(provider);
        self
    }

    /// Declares an action offered for every row.
    #[must_use]
    pub fn declare_action(mut self, name: impl Into<String>) -> Self {
        self.registry = self.registry.declare(name);
        self
    }

    /// Defines an action.
    #[must_use]
    pub fn define_action(mut self, action: InlineAction) -> Self {
        self.registry = self.registry.define(action);
        self
    }

    /// Disables inline actions entirely.
    #[must_use]
    pub fn disable_actions(mut self) -> Self {
        self.registry = self.registry.disable();
        self
    }

    /// Sets the permission policy.
    #[must_use]
    pub fn permissions(mut self, policy: impl PermissionPolicy + 'static) -> Self {
        self.permissions = Arc::new(policy);
        self
    }

    /// Restricts the rows this admin exposes to those with `field == value`.
    #[must_use]
    pub fn queryset_filter(mut self, field: &str, value: &str) -> Self {
        self.queryset_filters
            .push((field.to_string(), value.to_string()));
        self
    }

    /// Sets the field linking an inline's rows to the parent.
    #[must_use]
    pub fn fk_name(mut self, field: &str) -> Self {
        self.fk_name = Some(field.to_string());
        self
    }

    /// Sets the form fields.
    #[must_use]
    pub fn fields(mut self, fields: Vec<&str>) -> Self {
        self.fields = fields.into_iter().map(String::from).collect();
        self
    }

    /// Sets the read-only fields.
    #[must_use]
    pub fn readonly_fields(mut self, fields: Vec<&str>) -> Self {
        self.readonly_fields = fields.into_iter().map(String::from).collect();
        self
    }

    /// Sets the change list columns.
    #[must_use]
    pub fn list_display(mut self, fields: Vec<&str>) -> Self {
        self.list_display = fields.into_iter().map(String::from).collect();
        self
    }

    /// Adds inlines, after any already configured.
    #[must_use]
    pub fn inlines(mut self, inlines: Vec<Self>) -> Self {
        self.inlines.extend(inlines);
        self
    }

    /// Sets the presentation settings, for this admin and its inlines.
    #[must_use]
    pub fn settings(mut self, settings: &InlineActionsSettings) -> Self {
        self.apply_settings(settings);
        self
    }

    pub(crate) fn apply_settings(&mut self, settings: &InlineActionsSettings) {
        self.settings = settings.clone();
        for inline in &mut self.inlines {
            inline.apply_settings(settings);
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// Returns the declaring name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether this is a model admin or an inline.
    pub const fn kind(&self) -> AdminKind {
        self.kind
    }

    /// Returns the managed model.
    pub const fn content_type(&self) -> &ContentType {
        &self.content_type
    }

    /// Returns the action registry.
    pub const fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Returns the permission policy.
    pub fn permission_policy(&self) -> &dyn PermissionPolicy {
        self.permissions.as_ref()
    }

    /// Returns the configured inlines.
    pub fn get_inlines(&self) -> &[Self] {
        &self.inlines
    }

    /// Returns the field linking an inline's rows to the parent.
    pub fn fk(&self) -> Option<&str> {
        self.fk_name.as_deref()
    }

    /// Returns the presentation settings.
    pub const fn presentation(&self) -> &InlineActionsSettings {
        &self.settings
    }

    /// Finds the first inline with the given lower-cased declaring name that
    /// manages the given model.
    pub fn find_inline(&self, admin_name: &str, content_type: &ContentType) -> Option<&Self> {
        self.inlines.iter().find(|inline| {
            inline.name.to_lowercase() == admin_name
                && inline.content_type.same_model(content_type)
        })
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Resolves the action names offered for a row.
    pub fn get_inline_actions(&self, request: &HttpRequest, row: Option<&Row>) -> Vec<String> {
        let cx = ResolveContext::new(request, self.permissions.as_ref());
        self.registry.resolve_actions(&cx, row)
    }

    /// Renders the action buttons of a row.
    ///
    /// Unsaved rows and disabled registries render nothing.
    ///
    /// # Errors
    ///
    /// Returns [`InlineActionError::ActionNotFound`] if a resolved name has no
    /// definition.
    pub fn render_inline_actions(
        &self,
        request: &HttpRequest,
        row: Option<&Row>,
    ) -> InlineResult<String> {
        let Some(row) = row else {
            return Ok(String::new());
        };
        let Some(pk) = row.pk() else {
            return Ok(String::new());
        };
        if self.registry.is_disabled() {
            return Ok(String::new());
        }

        let mut buttons = Vec::new();
        for name in self.get_inline_actions(request, Some(row)) {
            let action = self
                .registry
                .get(&name)
                .ok_or_else(|| InlineActionError::ActionNotFound(name.clone()))?;
            let token = ActionToken::new(
                &self.name,
                self.kind,
                name.as_str(),
                row.content_type.app_label.as_str(),
                row.content_type.model.as_str(),
                pk.as_str(),
            );
            buttons.push(render_button(
                &token.encode(),
                &action.label_for(request, row),
                &action.css_for(request, row),
            ));
        }
        Ok(wrap_buttons(
            &buttons,
            &self.settings.container_class,
            self.kind,
        ))
    }

    /// Returns the form fields, with the pseudo-field appended.
    pub fn get_fields(&self, _request: &HttpRequest, _row: Option<&Row>) -> Vec<String> {
        self.with_render_field(&self.fields)
    }

    /// Returns the read-only fields, with the pseudo-field appended.
    pub fn get_readonly_fields(&self, _request: &HttpRequest, _row: Option<&Row>) -> Vec<String> {
        self.with_render_field(&self.readonly_fields)
    }

    /// Returns the change list columns, with the pseudo-field appended.
    pub fn get_list_display(&self, _request: &HttpRequest) -> Vec<String> {
        self.with_render_field(&self.list_display)
    }

    fn with_render_field(&self, fields: &[String]) -> Vec<String> {
        if self.registry.is_disabled() {
            fields.to_vec()
        } else {
            inject_render_field(fields.to_vec())
        }
    }

    /// Returns the header of the actions column, or `None` when disabled.
    pub fn column_label(&self) -> Option<&str> {
        (!self.registry.is_disabled()).then_some(self.settings.column_label.as_str())
    }

    /// Returns the media this admin adds to its pages.
    pub fn media(&self) -> Media {
        let mut media = Media::new();
        media.add_css(self.settings.stylesheet.as_str());
        for inline in &self.inlines {
            media.merge(inline.media());
        }
        media
    }

    // ── Rows ─────────────────────────────────────────────────────────

    /// Returns all rows within this admin's scope.
    ///
    /// # Errors
    ///
    /// Propagates store errors.
    pub async fn get_queryset(&self, store: &dyn ObjectStore) -> InlineResult<Vec<Row>> {
        store.filter(&self.content_type, &self.queryset_filters).await
    }

    /// Fetches a row by primary key within this admin's scope.
    ///
    /// # Errors
    ///
    /// Propagates store errors.
    pub async fn get_object(&self, store: &dyn ObjectStore, pk: &str) -> InlineResult<Option<Row>> {
        let row = store.get(&self.content_type, pk).await?;
        Ok(row.filter(|row| row_matches(row, &self.queryset_filters)))
    }

    /// Returns the rows an inline shows on the parent's change form.
    ///
    /// # Errors
    ///
    /// Returns [`InlineActionError::Configuration`] when no foreign key field
    /// is set, and propagates store errors.
    pub async fn rows_for(&self, store: &dyn ObjectStore, parent: &Row) -> InlineResult<Vec<Row>> {
        let fk = self.fk_name.as_deref().ok_or_else(|| {
            InlineActionError::Configuration(format!("`{}` has no fk_name", self.name))
        })?;
        let mut filters = self.queryset_filters.clone();
        filters.push((fk.to_string(), parent.pk().unwrap_or_default()));
        store.filter(&self.content_type, &filters).await
    }

    /// Invokes an action's handler.
    ///
    /// # Errors
    ///
    /// Returns [`InlineActionError::ActionNotCallable`] when the name is not
    /// bound to a handler. Handler errors propagate unchanged.
    pub async fn execute_action(
        &self,
        site: &AdminSite,
        request: &HttpRequest,
        action: &str,
        row: &Row,
        parent: Option<&Row>,
    ) -> InlineResult<ActionOutcome> {
        let handler = self
            .registry
            .get(action)
            .and_then(InlineAction::handler)
            .ok_or_else(|| InlineActionError::ActionNotCallable {
                admin: self.name.clone(),
                action: action.to_string(),
            })?;
        let ctx = ActionContext {
            request,
            admin: self,
            site,
        };
        handler.call(&ctx, row, parent).await
    }
}
