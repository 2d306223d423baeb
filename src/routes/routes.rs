//! Defines routes for the image-board HTTP surface.
//!
//! ## Structure
//! - **Page endpoints**
//!   - `GET    /` — static upload page
//!   - `GET    /upload` — same page (historic path)
//!
//! - **Post endpoints**
//!   - `POST   /upload` — multipart upload (`image` file + `caption` text)
//!   - `GET    /posts` — feed, newest first, with signed image URLs
//!   - `DELETE /delete/{id}` — remove a post and its stored image

use crate::{
    handlers::{
        health_handlers::{healthz, readyz},
        post_handlers::{delete_post, list_posts, upload_page, upload_post},
    },
    state::AppState,
};
use axum::{
    Router,
    routing::{delete, get},
};

/// Build and return the router for the whole HTTP surface.
///
/// The router carries shared state (`AppState`) to all handlers.
pub fn routes() -> Router<AppState> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // page + post endpoints
        .route("/", get(upload_page))
        .route("/upload", get(upload_page).post(upload_post))
        .route("/posts", get(list_posts))
        .route("/delete/{id}", delete(delete_post))
}
