//! # inline-actions-blog
//!
//! A small blog admin built on `django-rs-inline-actions`:
//!
//! - **Models**: `Author`, its proxy `AuthorProxy`, and `Article`
//! - **Admin**: articles inline on the author change form with view, delete,
//!   publish and toggle actions; change list actions on articles, including
//!   an intermediate "change title" form
//! - **Sites**: the default `admin` site and a `custom_admin` site
//!
//! [`build_router`] assembles the Axum application; `main.rs` serves it.

pub mod admin;
pub mod models;
pub mod settings;
pub mod views;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use django_rs_inline_actions::{InlineActionsSettings, InlineResult, InMemoryStore, ObjectStore};
use tower_http::trace::TraceLayer;

pub use views::AppState;

/// Builds the application state: both admin sites over one seeded store.
///
/// # Errors
///
/// Propagates store errors while seeding.
pub async fn build_state(settings: &InlineActionsSettings) -> InlineResult<AppState> {
    let store: Arc<dyn ObjectStore> = Arc::new(InMemoryStore::new());
    models::seed(store.as_ref()).await?;
    Ok(AppState::new(vec![
        admin::admin_site(settings.clone(), store.clone()),
        admin::custom_admin_site(settings, store),
    ]))
}

/// Builds the router serving every admin site.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/{site}/{app}/{model}/",
            get(views::changelist_view).post(views::changelist_view),
        )
        .route(
            "/{site}/{app}/{model}/{pk}/change/",
            get(views::changeform_view).post(views::changeform_view),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
