use async_trait::async_trait;
use django_rs_inline_actions_http::HttpResponseRedirect;

use crate::action::{ActionContext, ActionHandler, ActionOutcome, InlineAction};
use crate::error::InlineResult;
use crate::models::Row;
use crate::registry::ActionProvider;

/// Name of the view action.
pub const VIEW_ACTION: &str = "view_action";

/// Redirects to the change page of the row.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewAction;

impl ActionProvider for ViewAction {
    fn actions(&self) -> Vec<InlineAction> {
        vec![InlineAction::new(VIEW_ACTION, Self).label("View")]
    }

    fn declared(&self) -> Vec<String> {
        vec![VIEW_ACTION.to_string()]
    }
}

#[async_trait]
impl ActionHandler for ViewAction {
    async fn call(
        &self,
        ctx: &ActionContext<'_>,
        row: &Row,
        _parent: Option<&Row>,
    ) -> InlineResult<ActionOutcome> {
        let url = ctx
            .site
            .urls()
            .change_url(&row.content_type, &row.pk().unwrap_or_default());
        Ok(HttpResponseRedirect::new(&url).into())
    }
}
