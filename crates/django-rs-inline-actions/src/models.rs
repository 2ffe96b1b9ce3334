//! Content types and rows.
//!
//! Inline actions work on generic rows: a [`ContentType`] naming the model
//! plus a JSON document holding the field values, the same representation the
//! django-rs admin uses for objects of arbitrary registered models. The
//! [`ContentTypeRegistry`] resolves the `app_label` / `model` pair carried by
//! an action token back to a registered model.

use serde::{Deserialize, Serialize};

use crate::error::{InlineActionError, InlineResult};

/// A model's identity, given by its app label and lower-case model name.
///
/// A proxy model has its own identity (and therefore its own admin URLs) but
/// stores its rows in the table of its concrete model.
///
/// # Examples
///
/// ```
/// use django_rs_inline_actions::models::ContentType;
///
/// let author = ContentType::new("blog", "author");
/// let proxy = ContentType::new("blog", "authorproxy").proxy_for("author");
/// assert_eq!(proxy.model_key(), "blog.authorproxy");
/// assert_eq!(proxy.storage_key(), author.storage_key());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentType {
    /// The application label (e.g., "blog").
    pub app_label: String,
    /// The model name in lowercase (e.g., "article").
    pub model: String,
    /// Concrete model name, for proxy models.
    pub concrete_model: Option<String>,
}

impl ContentType {
    /// Creates a new content type.
    pub fn new(app_label: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            app_label: app_label.into(),
            model: model.into(),
            concrete_model: None,
        }
    }

    /// Marks this content type as a proxy for a concrete model of the same app.
    #[must_use]
    pub fn proxy_for(mut self, concrete_model: impl Into<String>) -> Self {
        self.concrete_model = Some(concrete_model.into());
        self
    }

    /// Returns the model key in `"app_label.model"` format.
    pub fn model_key(&self) -> String {
        format!("{}.{}", self.app_label, self.model)
    }

    /// Returns the key of the table holding this model's rows.
    pub fn storage_key(&self) -> String {
        let model = self.concrete_model.as_deref().unwrap_or(&self.model);
        format!("{}.{model}", self.app_label)
    }

    /// Returns `true` if both content types name the same model.
    pub fn same_model(&self, other: &Self) -> bool {
        self.app_label == other.app_label && self.model == other.model
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} | {}", self.app_label, self.model)
    }
}

/// A model instance: its content type plus its field values.
///
/// The primary key lives in the `id` field. A row without an `id` (or with a
/// `null` one) has not been saved yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// The model this row belongs to.
    pub content_type: ContentType,
    /// Field values as a JSON object.
    pub data: serde_json::Value,
}

impl Row {
    /// Creates a row from a content type and a JSON object.
    pub const fn new(content_type: ContentType, data: serde_json::Value) -> Self {
        Self { content_type, data }
    }

    /// Returns the primary key as a string, or `None` for unsaved rows.
    pub fn pk(&self) -> Option<String> {
        pk_of(&self.data)
    }

    /// Returns `true` if the row has a primary key.
    pub fn is_saved(&self) -> bool {
        self.pk().is_some()
    }

    /// Returns a field value.
    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.data.get(field)
    }

    /// Returns a string field value.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.data.get(field).and_then(serde_json::Value::as_str)
    }

    /// Sets a field value. Non-object documents are replaced by an object.
    pub fn set(&mut self, field: &str, value: impl Into<serde_json::Value>) {
        if !self.data.is_object() {
            self.data = serde_json::Value::Object(serde_json::Map::new());
        }
        if let Some(map) = self.data.as_object_mut() {
            map.insert(field.to_string(), value.into());
        }
    }

    /// Returns a copy of this row viewed through another content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }
}

/// Extracts the primary key of a stored document.
///
/// Numbers and non-empty strings are keys; anything else means unsaved.
pub fn pk_of(data: &serde_json::Value) -> Option<String> {
    match data.get("id")? {
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = self
            .get_str("title")
            .or_else(|| self.get_str("name"))
            .map(String::from);
        match (label, self.pk()) {
            (Some(label), _) => write!(f, "{label}"),
            (None, Some(pk)) => write!(f, "{} object ({pk})", self.content_type.model),
            (None, None) => write!(f, "{} object (None)", self.content_type.model),
        }
    }
}

/// A registry of known content types.
///
/// Lookup by `app_label` and model name is how an action token is turned
/// back into a model.
#[derive(Debug, Clone, Default)]
pub struct ContentTypeRegistry {
    types: Vec<ContentType>,
}

impl ContentTypeRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a content type. Registering the same model twice is a no-op.
    pub fn register(&mut self, ct: ContentType) {
        if !self.types.iter().any(|known| known.same_model(&ct)) {
            self.types.push(ct);
        }
    }

    /// Looks up a content type by app label and model name.
    pub fn get(&self, app_label: &str, model: &str) -> Option<&ContentType> {
        self.types
            .iter()
            .find(|ct| ct.app_label == app_label && ct.model == model)
    }

    /// Looks up a content type, failing if it is not registered.
    pub fn get_model(&self, app_label: &str, model: &str) -> InlineResult<&ContentType> {
        self.get(app_label, model)
            .ok_or_else(|| InlineActionError::ModelNotFound {
                app_label: app_label.to_string(),
                model: model.to_string(),
            })
    }

    /// Returns all registered content types.
    pub fn all(&self) -> &[ContentType] {
        &self.types
    }

    /// Returns the number of registered content types.
    pub fn count(&self) -> usize {
        self.types.len()
    }
}
