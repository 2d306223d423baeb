//! Core data models for the image-board service.
//!
//! `Post` maps to the SQLite `posts` table via `sqlx::FromRow` and
//! serializes as camelCase JSON via `serde`, matching the HTTP API surface.

pub mod post;
