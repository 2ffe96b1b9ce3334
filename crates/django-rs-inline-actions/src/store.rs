//! Object storage consumed by the dispatcher and the built-in actions.
//!
//! The plugin never talks to a database directly. It looks rows up, saves and
//! deletes them through the [`ObjectStore`] trait, which the host implements
//! on top of its ORM. [`InMemoryStore`] is a thread-safe implementation for
//! tests and demos.
//!
//! # Example
//!
//! ```
//! use django_rs_inline_actions::models::{ContentType, Row};
//! use django_rs_inline_actions::store::{InMemoryStore, ObjectStore};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = InMemoryStore::new();
//! let article = ContentType::new("blog", "article");
//! let saved = store
//!     .save(Row::new(article.clone(), serde_json::json!({"title": "Lorem"})))
//!     .await
//!     .unwrap();
//! assert_eq!(saved.pk().as_deref(), Some("1"));
//! assert!(store.get(&article, "1").await.unwrap().is_some());
//! # }
//! ```

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;

use crate::error::InlineResult;
use crate::models::{pk_of, ContentType, Row};

/// An equality filter on one field, compared in string form.
pub type FieldFilter = (String, String);

/// Storage operations the plugin needs from the host.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetches a row by primary key, or `None` if it does not exist.
    async fn get(&self, ct: &ContentType, pk: &str) -> InlineResult<Option<Row>>;

    /// Returns all rows of a model matching every filter, in primary key order.
    async fn filter(&self, ct: &ContentType, filters: &[FieldFilter]) -> InlineResult<Vec<Row>>;

    /// Inserts a row without primary key, or replaces the stored row with the
    /// same primary key. Returns the stored row.
    async fn save(&self, row: Row) -> InlineResult<Row>;

    /// Deletes a row. Returns `true` if it existed.
    async fn delete(&self, ct: &ContentType, pk: &str) -> InlineResult<bool>;
}

/// Returns `true` if the field value matches the filter value in string form.
pub fn value_matches(value: Option<&serde_json::Value>, expected: &str) -> bool {
    value.is_some_and(|v| match v {
        serde_json::Value::String(s) => s == expected,
        serde_json::Value::Number(n) => n.to_string() == expected,
        serde_json::Value::Bool(b) => b.to_string() == expected,
        serde_json::Value::Null => expected.is_empty() || expected == "null",
        _ => false,
    })
}

/// Returns `true` if the row satisfies every filter.
pub fn row_matches(row: &Row, filters: &[FieldFilter]) -> bool {
    filters
        .iter()
        .all(|(field, expected)| value_matches(row.get(field), expected))
}

#[derive(Debug, Clone)]
struct Table {
    objects: Vec<serde_json::Value>,
    next_id: u64,
}

impl Table {
    const fn new() -> Self {
        Self {
            objects: Vec::new(),
            next_id: 1,
        }
    }
}

/// In-memory implementation of [`ObjectStore`].
///
/// Rows are kept per storage key, so a proxy model and its concrete model
/// share one table. Thread-safe via `Arc<RwLock<...>>`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<HashMap<String, Table>>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of rows stored for a model.
    pub fn count(&self, ct: &ContentType) -> usize {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        tables.get(&ct.storage_key()).map_or(0, |t| t.objects.len())
    }
}

#[async_trait]
impl ObjectStore for InMemoryStore {
    async fn get(&self, ct: &ContentType, pk: &str) -> InlineResult<Option<Row>> {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        Ok(tables.get(&ct.storage_key()).and_then(|table| {
            table
                .objects
                .iter()
                .find(|obj| pk_of(obj).as_deref() == Some(pk))
                .map(|obj| Row::new(ct.clone(), obj.clone()))
        }))
    }

    async fn filter(&self, ct: &ContentType, filters: &[FieldFilter]) -> InlineResult<Vec<Row>> {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        Ok(tables
            .get(&ct.storage_key())
            .map(|table| {
                table
                    .objects
                    .iter()
                    .map(|obj| Row::new(ct.clone(), obj.clone()))
                    .filter(|row| row_matches(row, filters))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn save(&self, mut row: Row) -> InlineResult<Row> {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        let table = tables
            .entry(row.content_type.storage_key())
            .or_insert_with(Table::new);

        if let Some(pk) = row.pk() {
            if let Some(slot) = table
                .objects
                .iter_mut()
                .find(|obj| pk_of(obj).as_deref() == Some(pk.as_str()))
            {
                slot.clone_from(&row.data);
                return Ok(row);
            }
            if let Ok(id) = pk.parse::<u64>() {
                table.next_id = table.next_id.max(id.saturating_add(1));
            }
        } else {
            row.set("id", table.next_id);
            table.next_id = table.next_id.saturating_add(1);
        }

        table.objects.push(row.data.clone());
        Ok(row)
    }

    async fn delete(&self, ct: &ContentType, pk: &str) -> InlineResult<bool> {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        let Some(table) = tables.get_mut(&ct.storage_key()) else {
            return Ok(false);
        };
        let before = table.objects.len();
        table.objects.retain(|obj| pk_of(obj).as_deref() != Some(pk));
        Ok(table.objects.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn article() -> ContentType {
        ContentType::new("blog", "article")
    }

    #[tokio::test]
    async fn test_save_assigns_ids() {
        let store = InMemoryStore::new();
        let first = store
            .save(Row::new(article(), json!({"title": "A"})))
            .await
            .unwrap();
        let second = store
            .save(Row::new(article(), json!({"title": "B"})))
            .await
            .unwrap();
        assert_eq!(first.pk().as_deref(), Some("1"));
        assert_eq!(second.pk().as_deref(), Some("2"));
        assert_eq!(store.count(&article()), 2);
    }

    #[tokio::test]
    async fn test_save_updates_existing() {
        let store = InMemoryStore::new();
        let mut row = store
            .save(Row::new(article(), json!({"title": "A", "status": "draft"})))
            .await
            .unwrap();
        row.set("status", "published");
        store.save(row).await.unwrap();

        let fetched = store.get(&article(), "1").await.unwrap().unwrap();
        assert_eq!(fetched.get_str("status"), Some("published"));
        assert_eq!(store.count(&article()), 1);
    }

    #[tokio::test]
    async fn test_explicit_id_advances_counter() {
        let store = InMemoryStore::new();
        store
            .save(Row::new(article(), json!({"id": 7, "title": "A"})))
            .await
            .unwrap();
        let next = store
            .save(Row::new(article(), json!({"title": "B"})))
            .await
            .unwrap();
        assert_eq!(next.pk().as_deref(), Some("8"));
    }

    #[tokio::test]
    async fn test_largest_explicit_id() {
        let store = InMemoryStore::new();
        let row = store
            .save(Row::new(article(), json!({"id": u64::MAX, "title": "A"})))
            .await
            .unwrap();
        assert_eq!(row.pk(), Some(u64::MAX.to_string()));
        assert!(store.get(&article(), &u64::MAX.to_string()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_empty_string_id_is_unsaved() {
        let store = InMemoryStore::new();
        let row = store
            .save(Row::new(article(), json!({"id": "", "title": "A"})))
            .await
            .unwrap();
        assert_eq!(row.pk().as_deref(), Some("1"));
        assert!(store.get(&article(), "").await.unwrap().is_none());
        assert!(!store.delete(&article(), "").await.unwrap());
        assert_eq!(store.count(&article()), 1);
    }

    #[tokio::test]
    async fn test_filter_and_delete() {
        let store = InMemoryStore::new();
        for (author, status) in [(1, "draft"), (1, "published"), (2, "draft")] {
            store
                .save(Row::new(article(), json!({"author": author, "status": status})))
                .await
                .unwrap();
        }
        let by_author = store
            .filter(&article(), &[("author".into(), "1".into())])
            .await
            .unwrap();
        assert_eq!(by_author.len(), 2);

        assert!(store.delete(&article(), "1").await.unwrap());
        assert!(!store.delete(&article(), "1").await.unwrap());
        assert!(store.get(&article(), "1").await.unwrap().is_none());
        assert!(!store
            .delete(&ContentType::new("blog", "tag"), "1")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_proxy_shares_table() {
        let store = InMemoryStore::new();
        let author = ContentType::new("blog", "author");
        let proxy = ContentType::new("blog", "authorproxy").proxy_for("author");
        store
            .save(Row::new(author, json!({"name": "Author"})))
            .await
            .unwrap();

        let via_proxy = store.get(&proxy, "1").await.unwrap().unwrap();
        assert_eq!(via_proxy.content_type, proxy);
        assert_eq!(via_proxy.get_str("name"), Some("Author"));
    }

    #[test]
    fn test_value_matches() {
        assert!(value_matches(Some(&json!("draft")), "draft"));
        assert!(value_matches(Some(&json!(3)), "3"));
        assert!(value_matches(Some(&json!(true)), "true"));
        assert!(value_matches(Some(&serde_json::Value::Null), ""));
        assert!(!value_matches(None, "x"));
        assert!(!value_matches(Some(&json!([1])), "1"));
    }
}
