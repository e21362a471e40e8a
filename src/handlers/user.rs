use actix_web::{web, HttpResponse};
use serde::Deserialize;
use validator::Validate;
use log::info;
use crate::errors::AppError;
use crate::handlers::Body;
use crate::store::AppState;
use crate::utils::validation::{present, validate_payload, FieldValue};

const USERNAME_REQUIRED: &str = "Username is required";

#[derive(Deserialize, Validate, Default)]
pub struct CreateUserRequest {
    #[validate(required(message = "Username is required"))]
    username: Option<FieldValue>,
}

// POST /api/users
pub async fn create_user(
    state: web::Data<AppState>,
    payload: Body<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let payload = payload.into_inner();

    // Validate request
    validate_payload(&payload)?;
    let username = present(payload.username.as_ref())
        .map(FieldValue::to_text)
        .ok_or_else(|| AppError::BadRequest(USERNAME_REQUIRED.to_string()))?;

    let user = state.store.write().await.create_user(username);
    info!("Registered user {}", user.user_id);

    Ok(HttpResponse::Ok().json(user))
}

// GET /api/users
pub async fn list_users(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let store = state.store.read().await;
    Ok(HttpResponse::Ok().json(store.list_users()))
}
