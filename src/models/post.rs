//! Represents a post — one uploaded image together with its caption.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single post as persisted in the `posts` table.
///
/// The image bytes themselves live in the object store under `image_name`;
/// the row only carries metadata.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Auto-assigned row id.
    pub id: i64,

    /// User-supplied caption, optional.
    pub caption: Option<String>,

    /// Server-generated object key (32 random bytes, hex-encoded).
    pub image_name: String,

    /// When the post was created.
    pub created_at: DateTime<Utc>,
}

/// A post as returned by the listing endpoint: the stored row plus a
/// time-limited signed URL for its image.
///
/// The URL is computed per request and never persisted.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PostWithUrl {
    #[serde(flatten)]
    pub post: Post,

    /// Presigned read URL, valid for the configured TTL.
    pub image_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_serializes_as_camel_case() {
        let post = Post {
            id: 7,
            caption: Some("test".into()),
            image_name: "ab12".into(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["caption"], "test");
        assert_eq!(json["imageName"], "ab12");
        assert!(json["createdAt"].is_string());
    }

    #[test]
    fn post_with_url_flattens_the_row() {
        let post = Post {
            id: 1,
            caption: None,
            image_name: "cd34".into(),
            created_at: Utc::now(),
        };
        let with_url = PostWithUrl {
            post,
            image_url: "https://example.com/cd34".into(),
        };

        let json = serde_json::to_value(&with_url).unwrap();
        assert_eq!(json["imageName"], "cd34");
        assert_eq!(json["imageUrl"], "https://example.com/cd34");
        assert!(json["caption"].is_null());
    }
}
