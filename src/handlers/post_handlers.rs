//! HTTP handlers for the post lifecycle: upload page, upload, feed listing
//! and deletion. Handlers stay thin and delegate to the store services.

use crate::{
    errors::AppError,
    models::post::{Post, PostWithUrl},
    services::{image_transform, object_store},
    state::AppState,
};
use axum::{
    Json,
    extract::{Multipart, Path, State},
    response::Html,
};
use bytes::Bytes;
use tracing::warn;

/// `GET /` and `GET /upload` — the static upload page.
pub async fn upload_page() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

/// `POST /upload` — multipart form with an `image` file and an optional
/// `caption` text field.
///
/// The image is contain-fitted to the service bounding box, written to the
/// object store under a fresh random key, then recorded as a post row. If
/// the row insert fails, the just-written object is deleted again so the
/// two collaborators stay consistent.
pub async fn upload_post(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Post>, AppError> {
    let mut caption: Option<String> = None;
    let mut image: Option<(Bytes, Option<String>)> = None;

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("caption") => caption = Some(field.text().await?),
            Some("image") => {
                let content_type = field.content_type().map(str::to_string);
                image = Some((field.bytes().await?, content_type));
            }
            _ => {}
        }
    }

    let (data, content_type) =
        image.ok_or_else(|| AppError::bad_request("missing `image` file field"))?;

    // Decode + resize are CPU-bound; keep them off the I/O runtime.
    let declared_mime = content_type.clone();
    let resized = tokio::task::spawn_blocking(move || {
        image_transform::fit_to_bounds(&data, declared_mime.as_deref())
    })
    .await
    .map_err(|err| AppError::internal(err.to_string()))??;

    let key = object_store::generate_image_key();
    state
        .objects
        .put(&key, resized, content_type.as_deref())
        .await?;

    match state.posts.insert(caption, &key).await {
        Ok(post) => Ok(Json(post)),
        Err(err) => {
            // the object must not outlive its failed insert
            if let Err(del_err) = state.objects.delete(&key).await {
                warn!(key = %key, error = %del_err, "failed to remove object after insert error");
            }
            Err(err.into())
        }
    }
}

/// `GET /posts` — all posts newest-first, each with a signed read URL.
pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostWithUrl>>, AppError> {
    let posts = state.posts.list_recent().await?;
    let urls = state
        .objects
        .read_urls(posts.iter().map(|post| post.image_name.as_str()))
        .await?;

    let feed = posts
        .into_iter()
        .zip(urls)
        .map(|(post, image_url)| PostWithUrl { post, image_url })
        .collect();

    Ok(Json(feed))
}

/// `DELETE /delete/{id}` — remove a post and its stored image.
///
/// The row goes first: the table is the source of truth, so a post can
/// never reference a missing object. A failed object delete leaves an
/// orphaned blob that is logged and otherwise invisible to the API.
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Post>, AppError> {
    state.posts.fetch(id).await?;
    let post = state.posts.delete(id).await?;

    if let Err(err) = state.objects.delete(&post.image_name).await {
        warn!(key = %post.image_name, error = %err, "object left behind after row delete");
    }

    Ok(Json(post))
}
