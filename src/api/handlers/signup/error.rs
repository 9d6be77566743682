//! Signup error taxonomy and the shared typed-result to HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::fmt;

use super::types::ErrorResponse;

/// Input field that failed the shared validators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Email,
    Enrollment,
    Code,
    FirstName,
    LastName,
    Password,
}

impl Field {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Email => "Invalid email format",
            Self::Enrollment => "Invalid enrollment number format",
            Self::Code => "Missing verification code",
            Self::FirstName => "Missing first name",
            Self::LastName => "Missing last name",
            Self::Password => "Password must be 8+ chars with uppercase and number",
        }
    }
}

/// Everything the signup pipeline can fail with.
///
/// Absent, mismatched, and expired codes all surface as
/// [`SignupError::InvalidOrExpiredCode`], and an unknown enrollment number
/// reads the same as a rejected one, so neither half of a guess leaks.
/// Logs keep the distinction; responses do not.
#[derive(Debug, PartialEq, Eq)]
pub enum SignupError {
    /// A field failed validation; reported before any network or storage call.
    Validation(Field),
    UnknownEnrollment,
    DeliveryFailed,
    InvalidOrExpiredCode,
    RegistrationFailed,
    /// Network or parse failure talking to the endpoints (client side).
    Transport(String),
    /// Storage or hashing failure; details stay in the server logs.
    Internal,
}

impl SignupError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::UnknownEnrollment
            | Self::InvalidOrExpiredCode
            | Self::RegistrationFailed => StatusCode::BAD_REQUEST,
            Self::DeliveryFailed | Self::Transport(_) | Self::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message surfaced to callers; never internal error text.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Validation(field) => field.message().to_string(),
            Self::UnknownEnrollment => "Invalid enrollment number".to_string(),
            Self::DeliveryFailed => "Failed to send verification email".to_string(),
            Self::InvalidOrExpiredCode => "Invalid or expired code".to_string(),
            Self::RegistrationFailed => "Registration failed".to_string(),
            Self::Transport(detail) => detail.clone(),
            Self::Internal => "Internal server error".to_string(),
        }
    }
}

impl fmt::Display for SignupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SignupError {}

// Both endpoints shape their failures through this single mapping.
impl IntoResponse for SignupError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(ErrorResponse {
                error: self.message(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_errors() {
        for error in [
            SignupError::Validation(Field::Enrollment),
            SignupError::UnknownEnrollment,
            SignupError::InvalidOrExpiredCode,
            SignupError::RegistrationFailed,
        ] {
            assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn server_errors() {
        assert_eq!(
            SignupError::DeliveryFailed.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            SignupError::Internal.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn messages_are_generic() {
        assert_eq!(
            SignupError::UnknownEnrollment.message(),
            "Invalid enrollment number"
        );
        assert_eq!(
            SignupError::InvalidOrExpiredCode.message(),
            "Invalid or expired code"
        );
        assert_eq!(SignupError::RegistrationFailed.message(), "Registration failed");
        assert_eq!(SignupError::Internal.message(), "Internal server error");
    }

    #[test]
    fn field_messages() {
        assert_eq!(
            Field::Password.message(),
            "Password must be 8+ chars with uppercase and number"
        );
        assert_eq!(Field::Enrollment.message(), "Invalid enrollment number format");
    }
}
