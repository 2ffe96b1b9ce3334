//! HTML fragments for the actions cell.
//!
//! Only literal fragments are produced here; the host's template layer embeds
//! them like any other read-only field value.

use crate::token::AdminKind;

/// Escapes HTML special characters for use in text and attribute values.
///
/// # Examples
///
/// ```
/// use django_rs_inline_actions::render::escape_html;
///
/// assert_eq!(escape_html(r#"<a href="x">"#), "&lt;a href=&quot;x&quot;&gt;");
/// ```
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Capitalizes the first character of a string.
pub fn capfirst(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |c| {
        let mut result = c.to_uppercase().to_string();
        result.extend(chars);
        result
    })
}

/// Derives a button label from an action name: `toggle_publish` becomes
/// `Toggle publish`.
pub fn humanize_action(name: &str) -> String {
    capfirst(&name.replace('_', " "))
}

/// Renders one submit button.
pub fn render_button(name: &str, label: &str, css_classes: &str) -> String {
    format!(
        r#"<input type="submit" name="{}" value="{}" class="{}">"#,
        escape_html(name),
        escape_html(label),
        escape_html(css_classes)
    )
}

/// Wraps rendered buttons in the actions container.
///
/// Inline rows are rendered inside the host's read-only paragraph, so the
/// container closes it before and reopens it after.
pub fn wrap_buttons(buttons: &[String], container_class: &str, kind: AdminKind) -> String {
    let container = format!(
        r#"<div class="{}">{}</div>"#,
        escape_html(container_class),
        buttons.concat()
    );
    match kind {
        AdminKind::Inline => format!("</p>{container}<p>"),
        AdminKind::Admin => container,
    }
}

/// Renders the hidden input that carries a token through an intermediate page.
pub fn render_hidden_token(name: &str) -> String {
    format!(r#"<input type="hidden" name="{}" value="">"#, escape_html(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("it's"), "it&#x27;s");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_humanize_action() {
        assert_eq!(humanize_action("toggle_publish"), "Toggle publish");
        assert_eq!(humanize_action("view_action"), "View action");
        assert_eq!(humanize_action(""), "");
    }

    #[test]
    fn test_render_button() {
        assert_eq!(
            render_button("_action__x", "Un<publish>", "btn danger"),
            r#"<input type="submit" name="_action__x" value="Un&lt;publish&gt;" class="btn danger">"#
        );
    }

    #[test]
    fn test_wrap_inline() {
        let html = wrap_buttons(&["<b>".into(), "<i>".into()], "submit_row inline_actions", AdminKind::Inline);
        assert_eq!(
            html,
            r#"</p><div class="submit_row inline_actions"><b><i></div><p>"#
        );
    }

    #[test]
    fn test_wrap_admin_and_empty() {
        let html = wrap_buttons(&[], "submit_row inline_actions", AdminKind::Admin);
        assert_eq!(html, r#"<div class="submit_row inline_actions"></div>"#);
    }

    #[test]
    fn test_hidden_token() {
        assert_eq!(
            render_hidden_token("_action__a__admin__b__c__d__1"),
            r#"<input type="hidden" name="_action__a__admin__b__c__d__1" value="">"#
        );
    }
}
