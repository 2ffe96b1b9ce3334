//! Admin site registry.
//!
//! The [`AdminSite`] holds the admins registered on one named site together
//! with what dispatching needs from the host: the model registry that action
//! tokens are resolved against, the object store and URL reversal.

use std::fmt;
use std::sync::Arc;

use django_rs_inline_actions_http::{HttpRequest, HttpResponse};
use indexmap::IndexMap;

use crate::admin::InlineActionsAdmin;
use crate::dispatch::dispatch;
use crate::error::{InlineActionError, InlineResult};
use crate::models::{ContentType, ContentTypeRegistry};
use crate::settings::InlineActionsSettings;
use crate::store::ObjectStore;
use crate::urls::AdminUrls;

/// A named admin site.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use django_rs_inline_actions::admin::InlineActionsAdmin;
/// use django_rs_inline_actions::models::ContentType;
/// use django_rs_inline_actions::site::AdminSite;
/// use django_rs_inline_actions::store::InMemoryStore;
///
/// let mut site = AdminSite::new("custom_admin", Arc::new(InMemoryStore::new()));
/// site.register(InlineActionsAdmin::model_admin("AuthorAdmin", ContentType::new("blog", "author")));
/// assert!(site.is_registered("blog.author"));
/// assert_eq!(site.urls().prefix(), "/custom_admin");
/// ```
pub struct AdminSite {
    name: String,
    urls: AdminUrls,
    models: ContentTypeRegistry,
    admins: IndexMap<String, InlineActionsAdmin>,
    store: Arc<dyn ObjectStore>,
    settings: InlineActionsSettings,
}

impl fmt::Debug for AdminSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSite")
            .field("name", &self.name)
            .field("urls", &self.urls)
            .field("admins", &self.admins.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl AdminSite {
    /// Creates a site mounted at `/<name>`.
    pub fn new(name: &str, store: Arc<dyn ObjectStore>) -> Self {
        let settings = InlineActionsSettings {
            site_name: name.to_string(),
            url_prefix: format!("/{name}"),
            ..InlineActionsSettings::default()
        };
        Self::from_settings(settings, store)
    }

    /// Creates a site from settings (site name, URL prefix, presentation).
    pub fn from_settings(settings: InlineActionsSettings, store: Arc<dyn ObjectStore>) -> Self {
        Self {
            name: settings.site_name.clone(),
            urls: AdminUrls::new(settings.site_name.as_str(), &settings.url_prefix),
            models: ContentTypeRegistry::new(),
            admins: IndexMap::new(),
            store,
            settings,
        }
    }

    /// Mounts the site under another prefix.
    #[must_use]
    pub fn url_prefix(mut self, prefix: &str) -> Self {
        self.settings.url_prefix = prefix.to_string();
        self.urls = AdminUrls::new(self.name.as_str(), prefix);
        self
    }

    /// Registers an admin, along with the models of its inlines.
    ///
    /// A second admin for the same model replaces the first.
    pub fn register(&mut self, mut admin: InlineActionsAdmin) {
        admin.apply_settings(&self.settings);
        self.models.register(admin.content_type().clone());
        for inline in admin.get_inlines() {
            self.models.register(inline.content_type().clone());
        }
        self.admins.insert(admin.content_type().model_key(), admin);
    }

    /// Makes a model resolvable from action tokens without registering an
    /// admin for it.
    pub fn register_model(&mut self, content_type: ContentType) {
        self.models.register(content_type);
    }

    /// Unregisters the admin of a model.
    pub fn unregister(&mut self, model_key: &str) {
        self.admins.shift_remove(model_key);
    }

    /// Returns the admin registered for a model key (`"app.model"`).
    pub fn get_admin(&self, model_key: &str) -> Option<&InlineActionsAdmin> {
        self.admins.get(model_key)
    }

    /// Returns the admin registered for a model key, failing if none is.
    ///
    /// # Errors
    ///
    /// Returns [`InlineActionError::ModelNotFound`].
    pub fn admin_for(&self, model_key: &str) -> InlineResult<&InlineActionsAdmin> {
        self.get_admin(model_key).ok_or_else(|| {
            let (app_label, model) = model_key.split_once('.').unwrap_or(("", model_key));
            InlineActionError::ModelNotFound {
                app_label: app_label.to_string(),
                model: model.to_string(),
            }
        })
    }

    /// Returns the registered model keys, in registration order.
    pub fn registered_models(&self) -> Vec<&str> {
        self.admins.keys().map(String::as_str).collect()
    }

    /// Returns whether an admin is registered for a model.
    pub fn is_registered(&self, model_key: &str) -> bool {
        self.admins.contains_key(model_key)
    }

    /// Returns the site name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the URL builder.
    pub const fn urls(&self) -> &AdminUrls {
        &self.urls
    }

    /// Returns the model registry.
    pub const fn models(&self) -> &ContentTypeRegistry {
        &self.models
    }

    /// Returns the object store.
    pub fn store(&self) -> &dyn ObjectStore {
        self.store.as_ref()
    }

    /// Returns the settings.
    pub const fn settings(&self) -> &InlineActionsSettings {
        &self.settings
    }

    /// Runs an inline action submitted from a change form.
    ///
    /// Returns `Ok(None)` when the request carries no action and the normal
    /// change view should proceed.
    ///
    /// # Errors
    ///
    /// See [`dispatch`].
    pub async fn changeform_action(
        &self,
        request: &HttpRequest,
        model_key: &str,
        object_id: &str,
    ) -> InlineResult<Option<HttpResponse>> {
        let admin = self.admin_for(model_key)?;
        dispatch(self, admin, request, Some(object_id)).await
    }

    /// Runs an action submitted from a change list row.
    ///
    /// # Errors
    ///
    /// See [`dispatch`].
    pub async fn changelist_action(
        &self,
        request: &HttpRequest,
        model_key: &str,
    ) -> InlineResult<Option<HttpResponse>> {
        let admin = self.admin_for(model_key)?;
        dispatch(self, admin, request, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    fn site() -> AdminSite {
        AdminSite::new("admin", Arc::new(InMemoryStore::new()))
    }

    #[test]
    fn test_register_records_inline_models() {
        let mut site = site();
        site.register(
            InlineActionsAdmin::model_admin("AuthorAdmin", ContentType::new("blog", "author"))
                .inlines(vec![InlineActionsAdmin::inline(
                    "ArticleInline",
                    ContentType::new("blog", "article"),
                )]),
        );
        assert_eq!(site.registered_models(), vec!["blog.author"]);
        assert!(site.models().get("blog", "article").is_some());
        assert!(!site.is_registered("blog.article"));
    }

    #[test]
    fn test_register_applies_site_settings() {
        let mut settings = InlineActionsSettings::default();
        settings.site_name = "custom_admin".to_string();
        settings.url_prefix = "/custom_admin/".to_string();
        settings.column_label = "Do".to_string();
        let mut site = AdminSite::from_settings(settings, Arc::new(InMemoryStore::new()));
        site.register(InlineActionsAdmin::model_admin("AuthorAdmin", ContentType::new("blog", "author")));

        let admin = site.get_admin("blog.author").unwrap();
        assert_eq!(admin.column_label(), Some("Do"));
        assert_eq!(site.urls().prefix(), "/custom_admin");
        assert_eq!(site.name(), "custom_admin");
    }

    #[test]
    fn test_unknown_admin() {
        let site = site();
        let err = site.admin_for("blog.tag").unwrap_err();
        assert!(matches!(
            err,
            InlineActionError::ModelNotFound { ref app_label, ref model } if app_label == "blog" && model == "tag"
        ));
    }

    #[test]
    fn test_url_prefix_and_unregister() {
        let mut site = site().url_prefix("/backoffice");
        assert_eq!(site.urls().prefix(), "/backoffice");
        site.register(InlineActionsAdmin::model_admin("TagAdmin", ContentType::new("blog", "tag")));
        site.unregister("blog.tag");
        assert!(!site.is_registered("blog.tag"));
        assert!(site.models().get("blog", "tag").is_some());
    }
}
