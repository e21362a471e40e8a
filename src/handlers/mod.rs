pub mod exercise;
pub mod pages;
pub mod user;

use actix_cors::Cors;
use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{self, FutureExt, LocalBoxFuture};
use serde::de::DeserializeOwned;
use crate::errors::AppError;

/// Registers the API routes together with extractor configs that render
/// malformed bodies and queries as `{ "error": ... }`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::FormConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::resource("/api/users")
            .route(web::post().to(user::create_user))
            .route(web::get().to(user::list_users)),
    )
    .service(
        web::resource("/api/users/{_id}/exercises")
            .route(web::post().to(exercise::add_exercise)),
    )
    .service(
        web::resource("/api/users/{_id}/logs")
            .route(web::get().to(exercise::get_log)),
    );
}

/// Open CORS: any origin may call the API, preflights included.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allow_any_method()
        .allow_any_header()
        .max_age(86_400)
}

/// Request body read as JSON or as an url-encoded form, depending on the
/// content type. Any other body, or none at all, reads as an empty request.
pub struct Body<T>(pub T);

impl<T> Body<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

enum BodyKind {
    Json,
    Form,
    Empty,
}

fn body_kind(req: &HttpRequest) -> BodyKind {
    let content_type = req.content_type().to_ascii_lowercase();
    if content_type == "application/json" || content_type.ends_with("+json") {
        BodyKind::Json
    } else if content_type == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else {
        BodyKind::Empty
    }
}

impl<T: DeserializeOwned + Default + 'static> FromRequest for Body<T> {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        match body_kind(req) {
            BodyKind::Json => web::Json::<T>::from_request(req, payload)
                .map(|res| res.map(|json| Body(json.into_inner())))
                .boxed_local(),
            BodyKind::Form => web::Form::<T>::from_request(req, payload)
                .map(|res| res.map(|form| Body(form.into_inner())))
                .boxed_local(),
            BodyKind::Empty => future::ready(Ok(Body(T::default()))).boxed_local(),
        }
    }
}
