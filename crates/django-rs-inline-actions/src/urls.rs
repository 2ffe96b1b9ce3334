//! Admin URL reversal.
//!
//! After an action ran, the dispatcher redirects either to the parent's change
//! page or to the model's change list. [`AdminUrls`] builds those paths for a
//! named admin site mounted under a prefix, following Django's admin URL
//! layout (`<prefix>/<app>/<model>/` and `<prefix>/<app>/<model>/<pk>/change/`).

use crate::models::ContentType;

/// The admin views a URL can be reversed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminView {
    /// The change list of a model.
    Changelist,
    /// The add form of a model.
    Add,
    /// The change form of one row.
    Change,
}

impl AdminView {
    /// Returns the suffix used in URL names (`changelist`, `add`, `change`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Changelist => "changelist",
            Self::Add => "add",
            Self::Change => "change",
        }
    }
}

/// URL builder for one admin site.
///
/// # Examples
///
/// ```
/// use django_rs_inline_actions::models::ContentType;
/// use django_rs_inline_actions::urls::{AdminUrls, AdminView};
///
/// let urls = AdminUrls::new("admin", "/admin");
/// let article = ContentType::new("blog", "article");
/// assert_eq!(urls.changelist_url(&article), "/admin/blog/article/");
/// assert_eq!(urls.change_url(&article, "7"), "/admin/blog/article/7/change/");
/// assert_eq!(urls.url_name(&article, AdminView::Change), "admin:blog_article_change");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUrls {
    site_name: String,
    prefix: String,
}

impl Default for AdminUrls {
    fn default() -> Self {
        Self::new("admin", "/admin")
    }
}

impl AdminUrls {
    /// Creates a URL builder for the named site mounted at `prefix`.
    pub fn new(site_name: impl Into<String>, prefix: &str) -> Self {
        let trimmed = prefix.trim_end_matches('/');
        let prefix = if trimmed.starts_with('/') || trimmed.is_empty() {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };
        Self {
            site_name: site_name.into(),
            prefix,
        }
    }

    /// Returns the site name (the URL namespace).
    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    /// Returns the normalized prefix, without trailing slash.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the URL name of a view, e.g. `admin:blog_article_change`.
    pub fn url_name(&self, ct: &ContentType, view: AdminView) -> String {
        format!(
            "{}:{}_{}_{}",
            self.site_name,
            ct.app_label,
            ct.model,
            view.as_str()
        )
    }

    /// Returns the change list path of a model.
    pub fn changelist_url(&self, ct: &ContentType) -> String {
        format!("{}/{}/{}/", self.prefix, ct.app_label, ct.model)
    }

    /// Returns the add form path of a model.
    pub fn add_url(&self, ct: &ContentType) -> String {
        format!("{}/{}/{}/add/", self.prefix, ct.app_label, ct.model)
    }

    /// Returns the change form path of one row.
    pub fn change_url(&self, ct: &ContentType, pk: &str) -> String {
        format!("{}/{}/{}/{pk}/change/", self.prefix, ct.app_label, ct.model)
    }
}
