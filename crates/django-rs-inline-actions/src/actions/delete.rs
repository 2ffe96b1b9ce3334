use async_trait::async_trait;
use django_rs_inline_actions_http::MessageLevel;

use crate::action::{ActionContext, ActionHandler, ActionOutcome, InlineAction};
use crate::error::InlineResult;
use crate::models::Row;
use crate::registry::{ActionNames, ActionProvider, ResolveContext};

/// Name of the delete action.
pub const DELETE_ACTION: &str = "delete_action";

/// Deletes the row, if the permission policy allows it.
///
/// The button is only offered when `has_delete_permission` holds for the row;
/// the permission is checked again when the action runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteAction;

impl ActionProvider for DeleteAction {
    fn actions(&self) -> Vec<InlineAction> {
        vec![InlineAction::new(DELETE_ACTION, Self).label("Delete")]
    }

    fn contribute(&self, cx: &ResolveContext<'_>, row: Option<&Row>, names: &mut ActionNames) {
        if cx.permissions.has_delete_permission(cx.request, row) {
            names.push(DELETE_ACTION);
        }
    }
}

#[async_trait]
impl ActionHandler for DeleteAction {
    async fn call(
        &self,
        ctx: &ActionContext<'_>,
        row: &Row,
        _parent: Option<&Row>,
    ) -> InlineResult<ActionOutcome> {
        if !ctx
            .admin
            .permission_policy()
            .has_delete_permission(ctx.request, Some(row))
        {
            tracing::warn!(row = %row, admin = ctx.admin.name(), "delete refused, no permission");
            return Ok(ActionOutcome::Done);
        }

        let pk = row.pk().unwrap_or_default();
        ctx.site.store().delete(&row.content_type, &pk).await?;
        ctx.request
            .add_message(MessageLevel::Info, format!("`{row}` deleted."));
        Ok(ActionOutcome::Done)
    }
}
