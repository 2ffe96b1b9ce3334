//! Template helpers for intermediate pages.
//!
//! An action that answers with its own form (a confirmation, an edit page)
//! needs the token to come back on the second submission. Including the
//! output of [`render_inline_action_fields`] in that form does this.

use django_rs_inline_actions_http::HttpRequest;

use crate::error::{InlineActionError, InlineResult};
use crate::render::render_hidden_token;
use crate::token::ActionToken;

/// Renders a hidden input echoing the submitted action token.
///
/// # Errors
///
/// Returns [`InlineActionError::NoActionTriggered`] when the request carries
/// no token and [`InlineActionError::MultipleActions`] when it carries more
/// than one.
///
/// # Examples
///
/// ```
/// use django_rs_inline_actions::templatetags::render_inline_action_fields;
/// use django_rs_inline_actions_http::HttpRequest;
///
/// let request = HttpRequest::builder()
///     .form("_action__articleadmin__admin__change_title__blog__article__1", "Change title")
///     .build();
/// assert_eq!(
///     render_inline_action_fields(&request).unwrap(),
///     r#"<input type="hidden" name="_action__articleadmin__admin__change_title__blog__article__1" value="">"#
/// );
/// ```
pub fn render_inline_action_fields(request: &HttpRequest) -> InlineResult<String> {
    match ActionToken::raw_keys(request.post()).as_slice() {
        [] => Err(InlineActionError::NoActionTriggered),
        [key] => Ok(render_hidden_token(key)),
        _ => Err(InlineActionError::MultipleActions),
    }
}
