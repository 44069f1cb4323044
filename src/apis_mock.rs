use std::str::FromStr;

use actix_web::web;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tempfile::TempDir;

use crate::db::initialize_db;
use crate::state::AppState;
use crate::utils::UploadDir;

pub const BOUNDARY: &str = "----tunefulTestBoundary";

/// Fresh in-memory database and upload dir. Keep the `TempDir` alive for
/// the whole test or the directory disappears underneath the app.
pub async fn setup_test_state() -> (web::Data<AppState>, TempDir) {
    // one connection, otherwise every connection sees its own empty database
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();
    initialize_db(&pool).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let uploads = UploadDir::create(dir.path().join("uploads")).unwrap();

    (web::Data::new(AppState::new(pool, uploads)), dir)
}

/// Content-Type value matching the bodies built by `multipart_body`.
pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}

/// Single-part form body. `filename` of `None` makes it a plain form field.
pub fn multipart_body(field: &str, filename: Option<&str>, content: &[u8]) -> Vec<u8> {
    let disposition = match filename {
        Some(filename) => format!("form-data; name=\"{}\"; filename=\"{}\"", field, filename),
        None => format!("form-data; name=\"{}\"", field),
    };

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(format!("Content-Disposition: {}\r\n", disposition).as_bytes());
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}
