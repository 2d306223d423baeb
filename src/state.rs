//! Shared application state handed to every handler.

use crate::services::{object_store::ObjectStore, post_store::PostStore};

/// Long-lived collaborator handles, constructed once at startup and cloned
/// cheaply into each request.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostStore,
    pub objects: ObjectStore,
}
