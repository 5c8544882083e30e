//! Author records.
//!
//! Accounts belong to the identity subsystem; this endpoint only records the
//! author rows posts point at.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use blog_core::domain::User;
use blog_core::ports::{BaseRepository, UserRepository};
use blog_shared::ApiResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// POST /api/users
pub async fn create_user(
    state: web::Data<AppState>,
    body: web::Json<CreateUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let user = User::new(req.username, req.email);
    user.validate()?;

    if state.users.find_by_username(&user.username).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "username '{}' already exists",
            user.username
        )));
    }

    let saved = state.users.save(user).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(saved)))
}
