use actix_web::{http::header, web, HttpResponse};
use validator::Validate;

use crate::constants::SONGS_ROUTE;
use crate::error::ApiError;
use crate::model::SongReq;
use crate::repo::SongRepo;
use crate::state::AppState;

pub struct SongHandler;

impl SongHandler {
    pub async fn get_songs(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
        let songs = SongRepo::new(&state.pool).get_songs().await?;
        Ok(HttpResponse::Ok().json(songs))
    }

    pub async fn get_song(
        state: web::Data<AppState>,
        song_id: web::Path<i64>,
    ) -> Result<HttpResponse, ApiError> {
        let song_id = song_id.into_inner();
        match SongRepo::new(&state.pool).get_song_by_id(song_id).await? {
            Some(song) => Ok(HttpResponse::Ok().json(song)),
            None => Err(ApiError::song_not_found(song_id)),
        }
    }

    pub async fn create_song(
        state: web::Data<AppState>,
        body: web::Json<SongReq>,
    ) -> Result<HttpResponse, ApiError> {
        let body = body.into_inner();
        body.validate().map_err(|e| ApiError::validation(e.to_string()))?;

        let song = SongRepo::new(&state.pool).create_song(&body.file.name).await?;
        log::info!("## Created song {} (file {} '{}')", song.id, song.file.id, song.file.name);

        // Location names the collection, not the new song
        Ok(HttpResponse::Created()
            .insert_header((header::LOCATION, SONGS_ROUTE))
            .json(song))
    }

    pub async fn update_song(
        state: web::Data<AppState>,
        song_id: web::Path<i64>,
        body: web::Json<SongReq>,
    ) -> Result<HttpResponse, ApiError> {
        let song_id = song_id.into_inner();
        let body = body.into_inner();
        body.validate().map_err(|e| ApiError::validation(e.to_string()))?;

        match SongRepo::new(&state.pool).update_file_name(song_id, &body.file.name).await? {
            Some(song) => {
                log::info!("## Renamed file of song {} to '{}'", song.id, song.file.name);
                Ok(HttpResponse::Ok().json(song))
            }
            None => Err(ApiError::song_not_found(song_id)),
        }
    }

    pub async fn delete_song(
        state: web::Data<AppState>,
        song_id: web::Path<i64>,
    ) -> Result<HttpResponse, ApiError> {
        let song_id = song_id.into_inner();
        if !SongRepo::new(&state.pool).delete_song(song_id).await? {
            return Err(ApiError::song_not_found(song_id));
        }

        log::info!("## Deleted song {}", song_id);
        Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": format!("File id {} has been deleted.", song_id)
        })))
    }
}
