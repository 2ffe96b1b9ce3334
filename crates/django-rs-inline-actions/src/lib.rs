//! # django-rs-inline-actions
//!
//! Per-row action buttons for django-rs admin pages. Each related row shown by
//! an inline (and each row of a change list) gets submit buttons such as
//! "View", "Delete" or "Publish" that run a server-side handler without
//! leaving the page.
//!
//! The button's field name carries everything needed to route the action
//! back: which admin issued it, the action, the model and the primary key.
//! On submission [`dispatch()`] decodes that token, finds the inline and row,
//! runs the handler and answers with the handler's response or a redirect.
//!
//! ## Modules
//!
//! - [`token`] - Encoding and decoding of action tokens
//! - [`action`] - Action definitions, handlers and label / CSS hooks
//! - [`registry`] - Per-admin action registry and providers
//! - [`admin`] - Admin and inline configuration, rendering, field injection
//! - [`site`] - Admin site registry
//! - [`dispatch`](mod@dispatch) - Dispatching a submitted action
//! - [`actions`] - Built-in view and delete actions
//! - [`templatetags`] - Hidden token field for intermediate pages
//! - [`render`] - HTML fragments
//! - [`fields`] - The pseudo-field name and admin media
//! - [`models`] - Content types and rows
//! - [`store`] - Object storage used by the dispatcher
//! - [`urls`] - Admin URL reversal
//! - [`settings`] - Settings loaded from TOML and environment
//! - [`logging`] - Tracing setup
//! - [`error`] - Error types

pub mod action;
pub mod actions;
pub mod admin;
pub mod dispatch;
pub mod error;
pub mod fields;
pub mod logging;
pub mod models;
pub mod registry;
pub mod render;
pub mod settings;
pub mod site;
pub mod store;
pub mod templatetags;
pub mod token;
pub mod urls;

pub use action::{ActionContext, ActionHandler, ActionOutcome, InlineAction};
pub use actions::{DefaultActions, DeleteAction, ViewAction};
pub use admin::InlineActionsAdmin;
pub use dispatch::dispatch;
pub use error::{InlineActionError, InlineResult};
pub use fields::{Media, RENDER_FIELD};
pub use models::{ContentType, Row};
pub use registry::{ActionNames, ActionProvider, ActionRegistry, AllowAll, PermissionPolicy, ResolveContext};
pub use settings::InlineActionsSettings;
pub use site::AdminSite;
pub use store::{InMemoryStore, ObjectStore};
pub use templatetags::render_inline_action_fields;
pub use token::{ActionToken, AdminKind};
