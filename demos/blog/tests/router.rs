//! End-to-end tests of the blog admin router, driven through `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::Router;
use django_rs_inline_actions::InlineActionsSettings;
use http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use inline_actions_blog::{build_router, build_state};
use tower::ServiceExt;

// ── Helpers ─────────────────────────────────────────────────────────

async fn app() -> Router {
    let state = build_state(&InlineActionsSettings::default()).await.unwrap();
    build_router(state)
}

struct Reply {
    status: StatusCode,
    location: Option<String>,
    body: String,
}

async fn send(app: &Router, request: Request<Body>) -> Reply {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    Reply {
        status,
        location,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

async fn get(app: &Router, uri: &str) -> Reply {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post(app: &Router, uri: &str, form: &str) -> Reply {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    send(app, request).await
}

// ═════════════════════════════════════════════════════════════════════
// Change list
// ═════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_changelist_renders_actions_column() {
    let app = app().await;
    let reply = get(&app, "/admin/blog/article/").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("<th>Actions</th>"));
    assert!(reply.body.contains(r#"name="_action__articleadmin__admin__publish__blog__article__1""#));
    assert!(reply.body.contains(r#"name="_action__articleadmin__admin__view_action__blog__article__1""#));
    assert!(reply.body.contains("inline_actions/css/inline_actions.css"));
}

#[tokio::test]
async fn test_author_changelist_has_no_actions() {
    let app = app().await;
    let reply = get(&app, "/admin/blog/author/").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(!reply.body.contains("Actions"));
    assert!(!reply.body.contains("_action__"));
}

#[tokio::test]
async fn test_publish_from_changelist() {
    let app = app().await;
    let reply = post(
        &app,
        "/admin/blog/article/?status=draft",
        "_action__articleadmin__admin__publish__blog__article__1=Publish",
    )
    .await;
    assert_eq!(reply.status, StatusCode::FOUND);
    assert_eq!(reply.location.as_deref(), Some("/admin/blog/article/?status=draft"));

    let page = get(&app, "/admin/blog/article/").await;
    assert!(page.body.contains("Article published."));
    assert!(!page.body.contains("_action__articleadmin__admin__publish__blog__article__1\""));
    assert!(page.body.contains("_action__articleadmin__admin__unpublish__blog__article__1\""));
}

#[tokio::test]
async fn test_change_title_intermediate_page() {
    let app = app().await;
    let token = "_action__articleadmin__admin__change_title__blog__article__1";

    let form = post(&app, "/admin/blog/article/", &format!("{token}=Change+title")).await;
    assert_eq!(form.status, StatusCode::OK);
    assert!(form.body.contains(&format!(r#"<input type="hidden" name="{token}" value="">"#)));

    let saved = post(
        &app,
        "/admin/blog/article/",
        &format!("{token}=&title=New+title&_save=Save"),
    )
    .await;
    assert_eq!(saved.location.as_deref(), Some("/admin/blog/article/"));
    assert!(get(&app, "/admin/blog/article/").await.body.contains("New title"));
}

// ═════════════════════════════════════════════════════════════════════
// Change form with inlines
// ═════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_change_form_renders_inline_buttons() {
    let app = app().await;
    let reply = get(&app, "/admin/blog/author/1/change/").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains(r#"id="articleinline""#));
    assert!(reply.body.contains(
        r#"</p><div class="submit_row inline_actions"><input type="submit" name="_action__articleinline__inline__view_action__blog__article__1" value="View" class="">"#
    ));
    assert!(reply.body.contains(r#"value="Toggle publish" class="button object-tools""#));
}

#[tokio::test]
async fn test_delete_from_inline() {
    let app = app().await;
    let reply = post(
        &app,
        "/admin/blog/author/1/change/",
        "name=Ada&_action__articleinline__inline__delete_action__blog__article__2=Delete",
    )
    .await;
    assert_eq!(reply.status, StatusCode::FOUND);
    assert_eq!(reply.location.as_deref(), Some("/admin/blog/author/1/change/"));

    let page = get(&app, "/admin/blog/author/1/change/").await;
    assert!(page.body.contains("`Dolor sit amet` deleted."));
    assert!(!page.body.contains("__blog__article__2\""));
}

#[tokio::test]
async fn test_multiple_inlines_on_custom_site() {
    let app = app().await;
    let page = get(&app, "/custom_admin/blog/authorproxy/1/change/").await;
    assert!(page.body.contains("_action__articlenoopinline__inline__noop_action__blog__article__1"));
    assert!(page.body.contains("_action__articleinline__inline__publish__blog__article__1"));

    let reply = post(
        &app,
        "/custom_admin/blog/authorproxy/1/change/",
        "_action__articlenoopinline__inline__noop_action__blog__article__1=Noop+action",
    )
    .await;
    assert_eq!(
        reply.location.as_deref(),
        Some("/custom_admin/blog/authorproxy/1/change/")
    );

    let reply = post(
        &app,
        "/custom_admin/blog/authorproxy/1/change/",
        "_action__articleinline__inline__view_action__blog__article__1=View",
    )
    .await;
    assert_eq!(reply.location.as_deref(), Some("/custom_admin/blog/article/1/change/"));
}

#[tokio::test]
async fn test_plain_save_updates_parent() {
    let app = app().await;
    let reply = post(&app, "/admin/blog/author/2/change/", "name=Grace+Hopper&_save=Save").await;
    assert_eq!(reply.location.as_deref(), Some("/admin/blog/author/"));
    assert!(get(&app, "/admin/blog/author/").await.body.contains("Grace Hopper"));
}

// ═════════════════════════════════════════════════════════════════════
// Errors
// ═════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_protocol_and_lookup_errors() {
    let app = app().await;

    let reply = post(
        &app,
        "/admin/blog/author/1/change/",
        "_action__articleinline__inline__publish__blog__article__1=&_action__articleinline__inline__view_action__blog__article__1=",
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);

    let reply = post(
        &app,
        "/admin/blog/author/1/change/",
        "_action__articleinline__inline__publish__blog__article__99=",
    )
    .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    let reply = get(&app, "/admin/blog/tag/").await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}
