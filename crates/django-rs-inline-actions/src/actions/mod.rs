//! Built-in actions.
//!
//! - [`ViewAction`]: a "View" button linking to the row's own change page.
//! - [`DeleteAction`]: a "Delete" button, offered only when the permission
//!   policy allows deleting the row.
//! - [`DefaultActions`]: both, view first.
//!
//! Each is an [`ActionProvider`](crate::registry::ActionProvider):
//!
//! ```
//! use django_rs_inline_actions::actions::DefaultActions;
//! use django_rs_inline_actions::registry::{ActionRegistry, AllowAll, ResolveContext};
//! use django_rs_inline_actions_http::HttpRequest;
//!
//! let registry = ActionRegistry::new().with(DefaultActions);
//! let request = HttpRequest::builder().build();
//! let names = registry.resolve_actions(&ResolveContext::new(&request, &AllowAll), None);
//! assert_eq!(names, vec!["view_action", "delete_action"]);
//! ```

mod delete;
mod view;

pub use delete::{DeleteAction, DELETE_ACTION};
pub use view::{ViewAction, VIEW_ACTION};

use crate::action::InlineAction;
use crate::models::Row;
use crate::registry::{ActionNames, ActionProvider, ResolveContext};

/// [`ViewAction`] followed by [`DeleteAction`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultActions;

impl ActionProvider for DefaultActions {
    fn actions(&self) -> Vec<InlineAction> {
        let mut actions = ViewAction.actions();
        actions.extend(DeleteAction.actions());
        actions
    }

    fn declared(&self) -> Vec<String> {
        let mut names = ViewAction.declared();
        names.extend(DeleteAction.declared());
        names
    }

    fn contribute(&self, cx: &ResolveContext<'_>, row: Option<&Row>, names: &mut ActionNames) {
        ViewAction.contribute(cx, row, names);
        DeleteAction.contribute(cx, row, names);
    }
}
