//! picstash — a minimal image-hosting service.
//!
//! Clients upload an image with a caption; the server contain-fits it to a
//! fixed bounding box, stores the payload in S3-compatible object storage,
//! persists a metadata row in SQLite, and serves the feed with time-limited
//! presigned read URLs.
//!
//! ## Architecture
//!
//! ```text
//! POST /upload ──▶ image_transform ──▶ ObjectStore (S3) ──▶ PostStore (SQLite)
//! GET  /posts  ──▶ PostStore ──▶ ObjectStore::read_urls (presigned, shared expiry)
//! DELETE /delete/{id} ──▶ PostStore (row first) ──▶ ObjectStore (best effort)
//! ```

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use config::AppConfig;
pub use models::post::{Post, PostWithUrl};
pub use state::AppState;
