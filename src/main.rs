mod apis;
mod config;
mod constants;
mod db;
mod error;
mod handler;
mod model;
mod negotiation;
mod repo;
mod state;
mod utils;

#[cfg(test)]
mod apis_mock;
#[cfg(test)]
mod tests;

use std::io;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;

use config::Config;
use state::AppState;
use utils::UploadDir;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| io::Error::other(format!("{:#}", e)))?;

    let pool = db::connect(&config)
        .await
        .map_err(|e| io::Error::other(format!("Unable to open {}: {}", config.database_url, e)))?;
    db::initialize_db(&pool)
        .await
        .map_err(|e| io::Error::other(format!("Unable to initialize the db: {}", e)))?;

    let uploads = UploadDir::create(&config.upload_dir)?;
    log::info!("Serving uploads from {}", uploads.root().display());
    let state = web::Data::new(AppState::new(pool, uploads));

    log::info!("Listening on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(apis::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
