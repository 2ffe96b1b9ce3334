//! Dispatching a submitted inline action.
//!
//! [`dispatch`] runs before the host's change view on every request. It
//! either answers the request itself (the handler's response, or a redirect
//! back) or returns `None` so the host renders its normal view.

use django_rs_inline_actions_http::{HttpRequest, HttpResponse, HttpResponseRedirect};
use tracing::Instrument;

use crate::action::ActionOutcome;
use crate::admin::InlineActionsAdmin;
use crate::error::{InlineActionError, InlineResult};
use crate::logging::dispatch_span;
use crate::models::{ContentType, Row};
use crate::site::AdminSite;
use crate::token::{ActionToken, AdminKind};

/// POST field carrying the change list filters of the page the user came from.
pub const CHANGELIST_FILTERS: &str = "_changelist_filters";

/// Runs the action submitted with `request`, if any.
///
/// `admin` is the admin whose view received the request; `object_id` is the
/// primary key of the row its change form shows, or `None` on the change
/// list.
///
/// Returns `Ok(None)` when the request is not a POST, carries no action token,
/// carries a top-level token issued by another admin or model, or names an
/// inline that is not configured on `admin`.
///
/// # Errors
///
/// - [`InlineActionError::MultipleActions`] / [`InlineActionError::MalformedToken`]
///   for an invalid submission.
/// - [`InlineActionError::ModelNotFound`] for an unregistered model.
/// - [`InlineActionError::ObjectNotFound`] when the parent or target row is
///   missing or out of scope.
/// - [`InlineActionError::ActionNotCallable`] when the action has no handler.
/// - Any error returned by the handler.
pub async fn dispatch(
    site: &AdminSite,
    admin: &InlineActionsAdmin,
    request: &HttpRequest,
    object_id: Option<&str>,
) -> InlineResult<Option<HttpResponse>> {
    if !request.is_post() {
        return Ok(None);
    }
    let token = match ActionToken::find(request.post()) {
        Ok(Some(token)) => token,
        Ok(None) => return Ok(None),
        Err(err) => {
            tracing::warn!(path = request.path(), error = %err, "rejected inline action submission");
            return Err(err);
        }
    };

    let span = dispatch_span(&admin.content_type().model_key(), object_id);
    run(site, admin, request, object_id, token)
        .instrument(span)
        .await
}

async fn run(
    site: &AdminSite,
    admin: &InlineActionsAdmin,
    request: &HttpRequest,
    object_id: Option<&str>,
    token: ActionToken,
) -> InlineResult<Option<HttpResponse>> {
    let content_type = site
        .models()
        .get_model(&token.app_label, &token.model_name)?
        .clone();

    let (target, parent) = match token.kind {
        AdminKind::Admin => {
            if token.admin_name != admin.name().to_lowercase()
                || !admin.content_type().same_model(&content_type)
            {
                tracing::debug!(
                    issued_by = %token.admin_name,
                    model = %content_type.model_key(),
                    admin = admin.name(),
                    "token issued by another admin, deferring to the view"
                );
                return Ok(None);
            }
            (admin, None)
        }
        AdminKind::Inline => {
            let parent = match object_id {
                Some(id) => Some(fetch(admin, site, id).await?),
                None => None,
            };
            let Some(inline) = admin.find_inline(&token.admin_name, &content_type) else {
                tracing::debug!(
                    inline = %token.admin_name,
                    model = %content_type.model_key(),
                    "no matching inline, deferring to the change view"
                );
                return Ok(None);
            };
            (inline, parent)
        }
    };

    let row = fetch(target, site, &token.pk).await?;
    let outcome = target
        .execute_action(site, request, &token.action, &row, parent.as_ref())
        .await?;
    tracing::info!(
        action = %token.action,
        issued_by = target.name(),
        pk = %token.pk,
        "inline action executed"
    );

    match outcome {
        ActionOutcome::Response(response) => Ok(Some(response)),
        ActionOutcome::Done => {
            let url = redirect_url(site, request, parent.as_ref(), &content_type);
            Ok(Some(HttpResponseRedirect::new(&url)))
        }
    }
}

async fn fetch(admin: &InlineActionsAdmin, site: &AdminSite, pk: &str) -> InlineResult<Row> {
    admin
        .get_object(site.store(), pk)
        .await?
        .ok_or_else(|| InlineActionError::ObjectNotFound {
            model: admin.content_type().model_key(),
            pk: pk.to_string(),
        })
}

/// Builds the redirect target after an action completed.
///
/// The parent's change page when there is a parent, the model's change list
/// otherwise. Posted change list filters take precedence over the request's
/// own query string.
pub fn redirect_url(
    site: &AdminSite,
    request: &HttpRequest,
    parent: Option<&Row>,
    content_type: &ContentType,
) -> String {
    let base = match parent {
        Some(parent) => site
            .urls()
            .change_url(&parent.content_type, &parent.pk().unwrap_or_default()),
        None => site.urls().changelist_url(content_type),
    };

    let query = request
        .post()
        .get(CHANGELIST_FILTERS)
        .filter(|filters| !filters.is_empty())
        .unwrap_or_else(|| request.query_string());
    if query.is_empty() {
        base
    } else {
        format!("{base}?{query}")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use http::Method;
    use serde_json::json;

    use super::*;
    use crate::store::InMemoryStore;

    fn site() -> AdminSite {
        let mut site = AdminSite::new("admin", Arc::new(InMemoryStore::new()));
        site.register_model(ContentType::new("blog", "article"));
        site
    }

    fn author() -> Row {
        Row::new(ContentType::new("blog", "author"), json!({"id": 3}))
    }

    #[test]
    fn test_redirect_to_parent_keeps_query_string() {
        let request = HttpRequest::builder()
            .method(Method::POST)
            .query_string("q=lorem")
            .build();
        let url = redirect_url(&site(), &request, Some(&author()), &ContentType::new("blog", "article"));
        assert_eq!(url, "/admin/blog/author/3/change/?q=lorem");
    }

    #[test]
    fn test_redirect_to_changelist_prefers_posted_filters() {
        let request = HttpRequest::builder()
            .method(Method::POST)
            .query_string("q=lorem")
            .form(CHANGELIST_FILTERS, "status__exact=draft")
            .build();
        let url = redirect_url(&site(), &request, None, &ContentType::new("blog", "article"));
        assert_eq!(url, "/admin/blog/article/?status__exact=draft");
    }

    #[test]
    fn test_redirect_without_query() {
        let request = HttpRequest::builder().method(Method::POST).build();
        let url = redirect_url(&site(), &request, None, &ContentType::new("blog", "article"));
        assert_eq!(url, "/admin/blog/article/");
    }

    #[tokio::test]
    async fn test_get_requests_are_ignored() {
        let site = site();
        let admin = InlineActionsAdmin::model_admin("ArticleAdmin", ContentType::new("blog", "article"));
        let request = HttpRequest::builder()
            .query_string("_action__articleadmin__admin__view_action__blog__article__1=View")
            .build();
        assert!(dispatch(&site, &admin, &request, None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_model() {
        let site = site();
        let admin = InlineActionsAdmin::model_admin("ArticleAdmin", ContentType::new("blog", "article"));
        let request = HttpRequest::builder()
            .method(Method::POST)
            .form("_action__articleadmin__admin__view_action__shop__item__1", "View")
            .build();
        let err = dispatch(&site, &admin, &request, None).await.unwrap_err();
        assert!(matches!(err, InlineActionError::ModelNotFound { .. }));
        assert_eq!(err.status_code(), 404);
    }
}
