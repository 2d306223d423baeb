//! PostStore — post metadata persistence backed by SQLite.
//!
//! Holds the shared connection pool and owns every query against the
//! `posts` table. Image payloads are not handled here; they live in the
//! object store under `Post::image_name`.

use crate::models::post::Post;
use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PostStoreError {
    #[error("post {0} not found")]
    PostNotFound(i64),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type PostStoreResult<T> = Result<T, PostStoreError>;

/// PostStore provides the metadata half of the service:
/// - Insert a row once the object write has succeeded
/// - List rows newest-first for the feed
/// - Fetch and delete by id
#[derive(Clone)]
pub struct PostStore {
    /// Shared SQLite connection pool used for metadata operations.
    pub db: Arc<SqlitePool>,
}

impl PostStore {
    /// Create a new PostStore backed by the provided SQLite pool.
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    /// Insert a new post row and return it as stored.
    pub async fn insert(
        &self,
        caption: Option<String>,
        image_name: &str,
    ) -> PostStoreResult<Post> {
        let post = sqlx::query_as::<_, Post>(
            "INSERT INTO posts (caption, image_name, created_at)
             VALUES (?, ?, ?)
             RETURNING id, caption, image_name, created_at",
        )
        .bind(caption)
        .bind(image_name)
        .bind(Utc::now())
        .fetch_one(&*self.db)
        .await?;

        Ok(post)
    }

    /// List all posts, most recent first.
    ///
    /// Ties on `created_at` fall back to the higher id so the ordering
    /// stays strict under same-instant inserts.
    pub async fn list_recent(&self) -> PostStoreResult<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            "SELECT id, caption, image_name, created_at
             FROM posts
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&*self.db)
        .await?;

        Ok(posts)
    }

    /// Fetch a single post by id.
    ///
    /// Returns PostNotFound if no such row exists.
    pub async fn fetch(&self, id: i64) -> PostStoreResult<Post> {
        sqlx::query_as::<_, Post>(
            "SELECT id, caption, image_name, created_at FROM posts WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&*self.db)
        .await
        .map_err(|err| match err {
            sqlx::Error::RowNotFound => PostStoreError::PostNotFound(id),
            other => PostStoreError::Sqlx(other),
        })
    }

    /// Delete a post by id and return its last known data.
    ///
    /// `DELETE .. RETURNING` claims the row atomically: of two concurrent
    /// deletes for the same id, exactly one gets the row back and the other
    /// observes PostNotFound.
    pub async fn delete(&self, id: i64) -> PostStoreResult<Post> {
        sqlx::query_as::<_, Post>(
            "DELETE FROM posts WHERE id = ?
             RETURNING id, caption, image_name, created_at",
        )
        .bind(id)
        .fetch_optional(&*self.db)
        .await?
        .ok_or(PostStoreError::PostNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> PostStore {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        let schema = include_str!("../../migrations/0001_init.sql");
        for stmt in schema.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            sqlx::query(stmt).execute(&pool).await.unwrap();
        }
        PostStore::new(Arc::new(pool))
    }

    #[tokio::test]
    async fn insert_returns_the_stored_row() {
        let store = test_store().await;

        let post = store.insert(Some("test".into()), "aabbcc").await.unwrap();

        assert!(post.id > 0);
        assert_eq!(post.caption.as_deref(), Some("test"));
        assert_eq!(post.image_name, "aabbcc");

        let fetched = store.fetch(post.id).await.unwrap();
        assert_eq!(fetched.image_name, "aabbcc");
    }

    #[tokio::test]
    async fn listing_is_newest_first() {
        let store = test_store().await;

        let first = store.insert(Some("one".into()), "key-1").await.unwrap();
        let second = store.insert(Some("two".into()), "key-2").await.unwrap();
        let third = store.insert(Some("three".into()), "key-3").await.unwrap();

        let posts = store.list_recent().await.unwrap();
        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0].id, third.id);
        assert_eq!(posts[1].id, second.id);
        assert_eq!(posts[2].id, first.id);

        for pair in posts.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[tokio::test]
    async fn fetch_of_missing_id_is_not_found() {
        let store = test_store().await;

        let err = store.fetch(9_999_999).await.unwrap_err();
        assert!(matches!(err, PostStoreError::PostNotFound(9_999_999)));
    }

    #[tokio::test]
    async fn delete_returns_the_row_exactly_once() {
        let store = test_store().await;

        let post = store.insert(None, "key-del").await.unwrap();

        let deleted = store.delete(post.id).await.unwrap();
        assert_eq!(deleted.image_name, "key-del");

        let err = store.delete(post.id).await.unwrap_err();
        assert!(matches!(err, PostStoreError::PostNotFound(_)));

        assert!(store.list_recent().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn image_names_are_unique() {
        let store = test_store().await;

        store.insert(None, "same-key").await.unwrap();
        let err = store.insert(None, "same-key").await.unwrap_err();
        assert!(matches!(err, PostStoreError::Sqlx(_)));
    }
}
