//! Blog models and sample data.
//!
//! `Author` has many `Article`s through the article's `author` field.
//! `AuthorProxy` is a proxy of `Author` with its own admin.

use django_rs_inline_actions::{ContentType, InlineResult, ObjectStore, Row};
use serde_json::json;

/// Article status values.
pub const DRAFT: &str = "draft";
/// Article status values.
pub const PUBLISHED: &str = "published";

/// The `blog.author` model.
pub fn author() -> ContentType {
    ContentType::new("blog", "author")
}

/// The `blog.authorproxy` proxy model.
pub fn author_proxy() -> ContentType {
    ContentType::new("blog", "authorproxy").proxy_for("author")
}

/// The `blog.article` model.
pub fn article() -> ContentType {
    ContentType::new("blog", "article")
}

/// Returns `true` if the article is a draft.
pub fn is_draft(row: &Row) -> bool {
    row.get_str("status") == Some(DRAFT)
}

/// Fills the store with two authors and their articles.
///
/// # Errors
///
/// Propagates store errors.
pub async fn seed(store: &dyn ObjectStore) -> InlineResult<()> {
    for name in ["Ada", "Grace"] {
        store
            .save(Row::new(author(), json!({"name": name})))
            .await?;
    }
    let articles = [
        ("Lorem ipsum", DRAFT, 1),
        ("Dolor sit amet", PUBLISHED, 1),
        ("Consectetur", DRAFT, 2),
    ];
    for (title, status, author_id) in articles {
        store
            .save(Row::new(
                article(),
                json!({"title": title, "body": "", "status": status, "author": author_id}),
            ))
            .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use django_rs_inline_actions::InMemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_seed() {
        let store = InMemoryStore::new();
        seed(&store).await.unwrap();
        assert_eq!(store.count(&author()), 2);
        assert_eq!(store.count(&article()), 3);
        let first = store.get(&article(), "1").await.unwrap().unwrap();
        assert!(is_draft(&first));
        assert_eq!(store.count(&author_proxy()), 2);
    }
}
