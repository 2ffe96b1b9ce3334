//! Admin configuration of the blog.
//!
//! The default site registers `AuthorAdmin` (one inline), the
//! `AuthorMultipleInlinesAdmin` on the author proxy (two inlines over
//! articles) and `ArticleAdmin` with change list actions. The `custom_admin`
//! site registers the last two again under its own prefix.

use std::sync::Arc;

use async_trait::async_trait;
use django_rs_inline_actions::{
    render_inline_action_fields, ActionContext, ActionHandler, ActionNames, ActionOutcome,
    ActionProvider, AdminSite, DefaultActions, InlineAction, InlineActionsAdmin,
    InlineActionsSettings, InlineResult, ObjectStore, ResolveContext, Row, ViewAction,
};
use django_rs_inline_actions::render::escape_html;
use django_rs_inline_actions_http::{HttpResponse, MessageLevel};

use crate::models::{self, is_draft, DRAFT, PUBLISHED};

async fn save_status(ctx: &ActionContext<'_>, row: &Row, status: &str) -> InlineResult<ActionOutcome> {
    let mut row = row.clone();
    row.set("status", status);
    ctx.site.store().save(row).await?;
    let verb = if status == DRAFT { "unpublished" } else { "published" };
    ctx.request
        .add_message(MessageLevel::Info, format!("Article {verb}."));
    Ok(ActionOutcome::Done)
}

// ── Publishing ──────────────────────────────────────────────────────

struct Publish;

#[async_trait]
impl ActionHandler for Publish {
    async fn call(&self, ctx: &ActionContext<'_>, row: &Row, _parent: Option<&Row>) -> InlineResult<ActionOutcome> {
        save_status(ctx, row, PUBLISHED).await
    }
}

struct Unpublish;

#[async_trait]
impl ActionHandler for Unpublish {
    async fn call(&self, ctx: &ActionContext<'_>, row: &Row, _parent: Option<&Row>) -> InlineResult<ActionOutcome> {
        save_status(ctx, row, DRAFT).await
    }
}

/// Offers `publish` for drafts and `unpublish` for published articles.
pub struct PublishActions;

impl ActionProvider for PublishActions {
    fn actions(&self) -> Vec<InlineAction> {
        vec![
            InlineAction::new("publish", Publish).label("Publish"),
            InlineAction::new("unpublish", Unpublish).label("Unpublish"),
        ]
    }

    fn contribute(&self, _cx: &ResolveContext<'_>, row: Option<&Row>, names: &mut ActionNames) {
        match row.and_then(|r| r.get_str("status")) {
            Some(DRAFT) => {
                names.push("publish");
            }
            Some(PUBLISHED) => {
                names.push("unpublish");
            }
            _ => {}
        }
    }
}

struct TogglePublish;

#[async_trait]
impl ActionHandler for TogglePublish {
    async fn call(&self, ctx: &ActionContext<'_>, row: &Row, _parent: Option<&Row>) -> InlineResult<ActionOutcome> {
        let status = if is_draft(row) { PUBLISHED } else { DRAFT };
        save_status(ctx, row, status).await
    }
}

/// A single button flipping the status, labelled after what it will do.
pub struct TogglePublishActions;

impl ActionProvider for TogglePublishActions {
    fn actions(&self) -> Vec<InlineAction> {
        vec![InlineAction::new("toggle_publish", TogglePublish)
            .label_fn(|_, row| {
                let label = if is_draft(row) { "publish" } else { "unpublish" };
                format!("Toggle {label}")
            })
            .css_fn(|_, row| {
                if is_draft(row) {
                    "button object-tools".to_string()
                } else {
                    "default".to_string()
                }
            })]
    }

    fn contribute(&self, _cx: &ResolveContext<'_>, row: Option<&Row>, names: &mut ActionNames) {
        if row.is_some() {
            names.push("toggle_publish");
        }
    }
}

// ── Change title ────────────────────────────────────────────────────

struct ChangeTitle;

#[async_trait]
impl ActionHandler for ChangeTitle {
    async fn call(&self, ctx: &ActionContext<'_>, row: &Row, _parent: Option<&Row>) -> InlineResult<ActionOutcome> {
        let post = ctx.request.post();
        if post.contains_key("_save") {
            let mut row = row.clone();
            row.set("title", post.get("title").unwrap_or_default());
            ctx.site.store().save(row).await?;
            return Ok(ActionOutcome::Done);
        }
        if post.contains_key("_back") {
            return Ok(ActionOutcome::Done);
        }

        let hidden = render_inline_action_fields(ctx.request)?;
        let title = escape_html(row.get_str("title").unwrap_or_default());
        Ok(HttpResponse::ok(format!(
            "<!DOCTYPE html>\n<html><body><h1>Change title</h1>\
             <form method=\"post\">{hidden}\
             <input type=\"text\" name=\"title\" value=\"{title}\">\
             <input type=\"submit\" name=\"_save\" value=\"Save\">\
             <input type=\"submit\" name=\"_back\" value=\"Back\">\
             </form></body></html>"
        ))
        .into())
    }
}

/// Offers an intermediate form changing the article's title.
pub struct ChangeTitleActions;

impl ActionProvider for ChangeTitleActions {
    fn actions(&self) -> Vec<InlineAction> {
        vec![InlineAction::new("change_title", ChangeTitle)]
    }

    fn declared(&self) -> Vec<String> {
        vec!["change_title".to_string()]
    }
}

// ── No-op ───────────────────────────────────────────────────────────

struct Noop;

#[async_trait]
impl ActionHandler for Noop {
    async fn call(&self, ctx: &ActionContext<'_>, row: &Row, _parent: Option<&Row>) -> InlineResult<ActionOutcome> {
        tracing::debug!(admin = ctx.admin.name(), row = %row, "noop action");
        Ok(ActionOutcome::Done)
    }
}

// ── Admins ──────────────────────────────────────────────────────────

/// Articles of an author, with the default actions and publishing.
pub fn article_inline() -> InlineActionsAdmin {
    InlineActionsAdmin::inline("ArticleInline", models::article())
        .fk_name("author")
        .fields(vec!["title", "status"])
        .readonly_fields(vec!["title", "status"])
        .with_actions(DefaultActions)
        .with_actions(PublishActions)
        .with_actions(TogglePublishActions)
}

/// Articles of an author again, with a single action doing nothing.
pub fn article_noop_inline() -> InlineActionsAdmin {
    InlineActionsAdmin::inline("ArticleNoopInline", models::article())
        .fk_name("author")
        .fields(vec!["title", "status"])
        .readonly_fields(vec!["title", "status"])
        .define_action(InlineAction::new("noop_action", Noop))
        .declare_action("noop_action")
}

/// Authors, with their articles inline. No actions on the authors themselves.
pub fn author_admin() -> InlineActionsAdmin {
    InlineActionsAdmin::model_admin("AuthorAdmin", models::author())
        .fields(vec!["name"])
        .list_display(vec!["name"])
        .disable_actions()
        .inlines(vec![article_inline()])
}

/// Author proxy with two inlines over the same article model.
pub fn author_multiple_inlines_admin() -> InlineActionsAdmin {
    InlineActionsAdmin::model_admin("AuthorMultipleInlinesAdmin", models::author_proxy())
        .fields(vec!["name"])
        .list_display(vec!["name"])
        .disable_actions()
        .inlines(vec![article_inline(), article_noop_inline()])
}

/// Articles, with actions in the change list.
pub fn article_admin() -> InlineActionsAdmin {
    InlineActionsAdmin::model_admin("ArticleAdmin", models::article())
        .fields(vec!["title", "body", "status", "author"])
        .list_display(vec!["title", "status", "author"])
        .with_actions(PublishActions)
        .with_actions(TogglePublishActions)
        .with_actions(ChangeTitleActions)
        .with_actions(ViewAction)
}

/// Builds the default admin site.
pub fn admin_site(settings: InlineActionsSettings, store: Arc<dyn ObjectStore>) -> AdminSite {
    let mut site = AdminSite::from_settings(settings, store);
    site.register(author_admin());
    site.register(author_multiple_inlines_admin());
    site.register(article_admin());
    site
}

/// Builds the `custom_admin` site.
pub fn custom_admin_site(settings: &InlineActionsSettings, store: Arc<dyn ObjectStore>) -> AdminSite {
    let settings = InlineActionsSettings {
        site_name: "custom_admin".to_string(),
        url_prefix: "/custom_admin".to_string(),
        ..settings.clone()
    };
    let mut site = AdminSite::from_settings(settings, store);
    site.register(author_multiple_inlines_admin());
    site.register(article_admin());
    site
}

#[cfg(test)]
mod tests {
    use django_rs_inline_actions::InMemoryStore;
    use django_rs_inline_actions_http::HttpRequest;

    use super::*;

    fn article_row(status: &str) -> Row {
        Row::new(
            models::article(),
            serde_json::json!({"id": 1, "title": "Lorem", "status": status, "author": 1}),
        )
    }

    #[test]
    fn test_article_admin_action_order() {
        let request = HttpRequest::builder().build();
        let names = article_admin().get_inline_actions(&request, Some(&article_row(DRAFT)));
        assert_eq!(
            names,
            vec!["change_title", "view_action", "publish", "toggle_publish"]
        );
    }

    #[test]
    fn test_toggle_label_and_css() {
        let request = HttpRequest::builder().build();
        let html = article_admin()
            .render_inline_actions(&request, Some(&article_row(PUBLISHED)))
            .unwrap();
        assert!(html.contains(
            r#"name="_action__articleadmin__admin__toggle_publish__blog__article__1" value="Toggle unpublish" class="default""#
        ));
        assert!(html.contains(r#"value="Unpublish""#));
    }

    #[test]
    fn test_authors_have_no_actions_column() {
        let request = HttpRequest::builder().build();
        let admin = author_admin();
        assert_eq!(admin.get_list_display(&request), vec!["name"]);
        assert_eq!(admin.column_label(), None);
        assert_eq!(admin.get_inlines()[0].column_label(), Some("Actions"));
    }

    #[test]
    fn test_sites() {
        let store: Arc<dyn ObjectStore> = Arc::new(InMemoryStore::new());
        let site = admin_site(InlineActionsSettings::default(), store.clone());
        assert_eq!(
            site.registered_models(),
            vec!["blog.author", "blog.authorproxy", "blog.article"]
        );
        let custom = custom_admin_site(site.settings(), store);
        assert_eq!(custom.urls().prefix(), "/custom_admin");
        assert!(!custom.is_registered("blog.author"));
    }
}
