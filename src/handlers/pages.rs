use actix_files::{Files, NamedFile};
use actix_web::web;
use log::error;
use crate::errors::AppError;
use crate::utils::config::Config;

// GET /
pub async fn index(config: web::Data<Config>) -> Result<NamedFile, AppError> {
    NamedFile::open_async(&config.index_file).await.map_err(|err| {
        error!("Failed to open landing page {}: {}", config.index_file, err);
        AppError::InternalServerError("Landing page unavailable".to_string())
    })
}

/// Landing page plus static assets. Register after the API so the catch-all
/// file service never shadows it.
pub fn configure(config: &Config) -> impl FnOnce(&mut web::ServiceConfig) {
    let public_dir = config.public_dir.clone();
    move |cfg: &mut web::ServiceConfig| {
        cfg.route("/", web::get().to(index))
            .service(Files::new("/", public_dir));
    }
}
