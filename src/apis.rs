use actix_web::{guard, middleware::from_fn, web, HttpResponse};

use crate::constants::{
    FILES_ROUTE, MIME_JSON, MIME_MULTIPART, SONGS_ROUTE, SONG_ROUTE, UPLOAD_ROUTE,
};
use crate::error::ApiError;
use crate::handler::{FileHandler, SongHandler};
use crate::negotiation::{accept, require};

/// Registers every route plus the JSON extractor config they rely on.
///
/// One resource per method so each gets its own guard stack; the last
/// `wrap` runs first, so Accept is checked before Content-Type.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(
            web::resource(SONGS_ROUTE)
                .guard(guard::Get())
                .wrap(from_fn(accept(MIME_JSON)))
                .route(web::get().to(SongHandler::get_songs)),
        )
        .service(
            web::resource(SONGS_ROUTE)
                .guard(guard::Post())
                .wrap(from_fn(require(MIME_JSON)))
                .wrap(from_fn(accept(MIME_JSON)))
                .route(web::post().to(SongHandler::create_song)),
        )
        .service(
            web::resource(SONG_ROUTE)
                .guard(guard::Get())
                .wrap(from_fn(accept(MIME_JSON)))
                .route(web::get().to(SongHandler::get_song)),
        )
        .service(
            web::resource(SONG_ROUTE)
                .guard(guard::Put())
                .wrap(from_fn(require(MIME_JSON)))
                .wrap(from_fn(accept(MIME_JSON)))
                .route(web::put().to(SongHandler::update_song)),
        )
        .service(
            web::resource(SONG_ROUTE)
                .guard(guard::Delete())
                .wrap(from_fn(accept(MIME_JSON)))
                .route(web::delete().to(SongHandler::delete_song)),
        )
        .service(
            web::resource(FILES_ROUTE)
                .guard(guard::Post())
                .wrap(from_fn(require(MIME_MULTIPART)))
                .wrap(from_fn(accept(MIME_JSON)))
                .route(web::post().to(FileHandler::upload_file)),
        )
        .service(web::resource(UPLOAD_ROUTE).route(web::get().to(FileHandler::download_file)))
        // whatever the guarded resources above did not take
        .service(web::resource(SONGS_ROUTE).to(method_not_allowed))
        .service(web::resource(SONG_ROUTE).to(method_not_allowed))
        .service(web::resource(FILES_ROUTE).to(method_not_allowed));
}

async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().finish()
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        log::warn!("## Rejected body for {} {}: {}", req.method(), req.path(), err);
        ApiError::validation(err.to_string()).into()
    })
}
