use std::fs;
use std::io::{ErrorKind, Write};

use actix_files::NamedFile;
use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse};
use futures_util::TryStreamExt as _;
use tempfile::NamedTempFile;

use crate::constants::{FILE_FIELD, MESSAGE_INVALID_FILE_NAME};
use crate::error::ApiError;
use crate::model::UploadedFile;
use crate::repo::FileRepo;
use crate::state::AppState;
use crate::utils::secure_filename;

pub struct FileHandler;

impl FileHandler {
    pub async fn upload_file(
        state: web::Data<AppState>,
        mut payload: Multipart,
    ) -> Result<HttpResponse, ApiError> {
        let mut upload: Option<(String, NamedTempFile, u64)> = None;

        // every field has to be drained before the next one is yielded
        while let Some(mut field) = payload.try_next().await.map_err(|e| {
            log::warn!("## Malformed multipart body: {}", e);
            ApiError::MissingFilePart
        })? {
            let wanted = upload.is_none() && field.name() == Some(FILE_FIELD);
            let filename = field
                .content_disposition()
                .and_then(|cd| cd.get_filename())
                .map(str::to_owned);

            let mut tmp = match (wanted, &filename) {
                (true, Some(_)) => {
                    let uploads = state.uploads.clone();
                    Some(web::block(move || uploads.temp_file()).await??)
                }
                _ => None,
            };
            let mut size: u64 = 0;

            while let Some(chunk) = field.try_next().await.map_err(|e| {
                log::warn!("## Could not read multipart field: {}", e);
                ApiError::MissingFilePart
            })? {
                if let Some(mut f) = tmp.take() {
                    size += chunk.len() as u64;
                    tmp = Some(web::block(move || f.write_all(&chunk).map(|_| f)).await??);
                }
            }

            if let (Some(tmp), Some(filename)) = (tmp, filename) {
                upload = Some((filename, tmp, size));
            }
        }

        let Some((original, tmp, size)) = upload else {
            log::warn!("## Upload without a '{}' field", FILE_FIELD);
            return Err(ApiError::MissingFilePart);
        };

        // an unpersisted temp file is removed when dropped
        let filename = secure_filename(&original)
            .ok_or_else(|| ApiError::validation(MESSAGE_INVALID_FILE_NAME))?;
        let filepath = state.uploads.resolve(&filename);
        log::info!("## GOT a file: {} -> {} ({} bytes)", original, filepath.display(), size);

        // bytes land on disk before the row exists
        let fp = filepath.clone();
        web::block(move || tmp.persist(&fp).map_err(|e| e.error)).await??;

        let file = match FileRepo::new(&state.pool).create_file(&filename).await {
            Ok(file) => file,
            Err(e) => {
                if let Err(rm) = fs::remove_file(&filepath) {
                    log::error!("## Could not remove orphaned upload {}: {}", filepath.display(), rm);
                }
                return Err(e.into());
            }
        };

        Ok(HttpResponse::Created().json(UploadedFile::from(file)))
    }

    pub async fn download_file(
        state: web::Data<AppState>,
        filename: web::Path<String>,
        req: HttpRequest,
    ) -> Result<HttpResponse, ApiError> {
        let filename = filename.into_inner();
        if secure_filename(&filename).as_deref() != Some(filename.as_str()) {
            return Err(ApiError::not_found(format!("File {} not found", filename)));
        }

        let filepath = state.uploads.resolve(&filename);
        let named_file = NamedFile::open_async(&filepath).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => ApiError::not_found(format!("File {} not found", filename)),
            _ => ApiError::from(e),
        })?;

        Ok(named_file
            .set_content_type(mime_guess::from_path(&filepath).first_or_octet_stream())
            .use_last_modified(true)
            .into_response(&req))
    }
}
