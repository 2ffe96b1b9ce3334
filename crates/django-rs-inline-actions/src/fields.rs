//! The `render_inline_actions` pseudo-field and admin media.

use serde::{Deserialize, Serialize};

/// Name of the read-only pseudo-field holding the rendered buttons.
pub const RENDER_FIELD: &str = "render_inline_actions";

/// Appends the pseudo-field to a field list unless already present.
///
/// # Examples
///
/// ```
/// use django_rs_inline_actions::fields::{inject_render_field, RENDER_FIELD};
///
/// let fields = inject_render_field(vec!["title".to_string()]);
/// assert_eq!(fields, vec!["title", RENDER_FIELD]);
/// assert_eq!(inject_render_field(fields.clone()), fields);
/// ```
pub fn inject_render_field(mut fields: Vec<String>) -> Vec<String> {
    if !fields.iter().any(|f| f == RENDER_FIELD) {
        fields.push(RENDER_FIELD.to_string());
    }
    fields
}

/// Stylesheets and scripts an admin page must include.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    /// Stylesheet paths, in inclusion order.
    pub css: Vec<String>,
    /// Script paths, in inclusion order.
    pub js: Vec<String>,
}

impl Media {
    /// Creates empty media.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a stylesheet unless already present.
    pub fn add_css(&mut self, path: impl Into<String>) {
        let path = path.into();
        if !self.css.contains(&path) {
            self.css.push(path);
        }
    }

    /// Adds a script unless already present.
    pub fn add_js(&mut self, path: impl Into<String>) {
        let path = path.into();
        if !self.js.contains(&path) {
            self.js.push(path);
        }
    }

    /// Merges another media definition into this one.
    pub fn merge(&mut self, other: Self) {
        for css in other.css {
            self.add_css(css);
        }
        for js in other.js {
            self.add_js(js);
        }
    }

    /// Renders `<link>` and `<script>` tags for a static URL prefix.
    pub fn render(&self, static_url: &str) -> String {
        let base = static_url.trim_end_matches('/');
        let links = self.css.iter().map(|path| {
            format!(r#"<link href="{base}/{path}" media="all" rel="stylesheet">"#)
        });
        let scripts = self
            .js
            .iter()
            .map(|path| format!(r#"<script src="{base}/{path}"></script>"#));
        links.chain(scripts).collect::<Vec<_>>().join("\n")
    }
}
