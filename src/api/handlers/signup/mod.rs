//! Enrollment verification and signup pipeline.
//!
//! Two endpoints drive the flow:
//!
//! - `POST /functions/initiate-signup` resolves the enrollment number to its
//!   directory email, stores a fresh 6-digit code (replacing any outstanding
//!   one), and emails it.
//! - `POST /functions/complete-signup` redeems the code within its 10-minute
//!   window, hashes the password, creates the account, and deletes the spent
//!   code.
//!
//! Handlers validate input with the shared validators first, then run the
//! pipeline against collaborator handles (directory, verification store,
//! account store, email sender) and shape failures through the single
//! [`SignupError`] response mapping.

pub(crate) mod code;
mod completer;
mod config;
mod error;
mod issuer;
mod password;
pub(crate) mod store;
mod types;
pub mod validate;

pub use config::SignupConfig;
pub use error::{Field, SignupError};
pub use types::{CompleteSignupRequest, ErrorResponse, InitiateSignupRequest, MessageResponse};

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sqlx::PgPool;
use std::sync::Arc;

use crate::api::email::EmailSender;
use store::{PgAccounts, PgDirectory, PgVerificationStore};
use validate::{valid_enrollment, valid_password};

#[utoipa::path(
    post,
    path = "/functions/initiate-signup",
    request_body = InitiateSignupRequest,
    responses(
        (status = 200, description = "Verification code sent", body = MessageResponse),
        (status = 400, description = "Unknown or malformed enrollment number", body = ErrorResponse),
        (status = 500, description = "Storage or delivery failure", body = ErrorResponse),
    ),
    tag = "signup"
)]
pub async fn initiate_signup(
    pool: Extension<PgPool>,
    mailer: Extension<Arc<dyn EmailSender>>,
    config: Extension<SignupConfig>,
    payload: Option<Json<InitiateSignupRequest>>,
) -> Response {
    let request: InitiateSignupRequest = match payload {
        Some(Json(payload)) => payload,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Missing enrollment number".to_string(),
                }),
            )
                .into_response()
        }
    };

    let enrollment = request.enrollment_number.trim().to_string();
    if !valid_enrollment(&enrollment) {
        return SignupError::Validation(Field::Enrollment).into_response();
    }

    let directory = PgDirectory::new(pool.0.clone());
    let store = PgVerificationStore::new(pool.0.clone());

    match issuer::issue_code(&directory, &store, mailer.0.as_ref(), &config.0, &enrollment).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Verification code sent".to_string(),
            }),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/functions/complete-signup",
    request_body = CompleteSignupRequest,
    responses(
        (status = 200, description = "Registration successful", body = MessageResponse),
        (status = 400, description = "Invalid or expired code, or registration failed", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    ),
    tag = "signup"
)]
pub async fn complete_signup(
    pool: Extension<PgPool>,
    config: Extension<SignupConfig>,
    payload: Option<Json<CompleteSignupRequest>>,
) -> Response {
    let request: CompleteSignupRequest = match payload {
        Some(Json(payload)) => payload,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Missing payload".to_string(),
                }),
            )
                .into_response()
        }
    };

    let enrollment = request.enrollment_number.trim();
    let code = request.code.trim();
    let first_name = request.first_name.trim();
    let last_name = request.last_name.trim();
    let password = request.password.trim();

    if !valid_enrollment(enrollment) {
        return SignupError::Validation(Field::Enrollment).into_response();
    }
    if code.is_empty() {
        return SignupError::Validation(Field::Code).into_response();
    }
    if first_name.is_empty() {
        return SignupError::Validation(Field::FirstName).into_response();
    }
    if last_name.is_empty() {
        return SignupError::Validation(Field::LastName).into_response();
    }
    if !valid_password(password) {
        return SignupError::Validation(Field::Password).into_response();
    }

    let store = PgVerificationStore::new(pool.0.clone());
    let accounts = PgAccounts::new(pool.0.clone());

    let profile = completer::SignupProfile {
        enrollment,
        code,
        first_name,
        last_name,
        password,
    };

    match completer::complete_signup(&store, &accounts, &config.0, &profile).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Registration successful".to_string(),
            }),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}
