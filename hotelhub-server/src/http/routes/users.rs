//! Signup and login endpoints

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::repos::users::{UserRepo, EMAIL_TAKEN};
use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::http::server::AppState;
use crate::models::{Credentials, NewUser};
use crate::password::{hash_password_blocking, verify_password_blocking};

#[derive(Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct SignupResponse {
    pub message: &'static str,
    pub user_id: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public profile; the stored hash never leaves the server
#[derive(Serialize)]
pub struct UserProfile {
    pub user_id: String,
    pub email: String,
    pub username: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub user: UserProfile,
}

/// POST /users/signup/
async fn signup(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<SignupRequest>,
) -> Result<Json<SignupResponse>, ApiError> {
    let user = NewUser::new(&req.email, &req.username, &req.password)?;
    let repo = UserRepo::new(&state.pool);

    if repo.find_by_email(&user.email).await?.is_some() {
        return Err(ApiError::Conflict {
            message: EMAIL_TAKEN.to_owned(),
        });
    }

    let user_id = Uuid::new_v4().to_string();
    let hash = hash_password_blocking(user.password.clone()).await?;
    repo.create(&user_id, &user, &hash).await?;

    tracing::info!(user_id = %user_id, "user registered");
    Ok(Json(SignupResponse {
        message: "User registered successfully.",
        user_id,
    }))
}

/// POST /users/login/
async fn login(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let credentials = Credentials::new(&req.email, &req.password)?;

    let user = UserRepo::new(&state.pool)
        .find_by_email(&credentials.email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !verify_password_blocking(credentials.password, user.password).await? {
        tracing::debug!(user_id = %user.user_id, "password mismatch");
        return Err(ApiError::InvalidCredentials);
    }

    Ok(Json(LoginResponse {
        message: "Login successful.",
        user: UserProfile {
            user_id: user.user_id,
            email: user.email,
            username: user.username,
        },
    }))
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/signup/", post(signup))
        .route("/users/login/", post(login))
}
