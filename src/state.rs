use sqlx::sqlite::SqlitePool;

use crate::utils::UploadDir;

/// Shared by every handler for the lifetime of the server.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub uploads: UploadDir,
}

impl AppState {
    pub fn new(pool: SqlitePool, uploads: UploadDir) -> Self {
        Self { pool, uploads }
    }
}
