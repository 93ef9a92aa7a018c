use std::sync::Arc;

use sqlx::PgPool;

use crate::blobstore::FileStore;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Pluggable resume file store. Default: S3FileStore against MinIO/S3.
    pub files: Arc<dyn FileStore>,
    pub config: Config,
}
