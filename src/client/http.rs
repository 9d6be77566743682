//! reqwest transport for the signup endpoints.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use url::Url;

use super::SignupApi;
use crate::api::handlers::signup::{
    CompleteSignupRequest, ErrorResponse, InitiateSignupRequest, SignupError,
};

/// HTTP client for the signup endpoints.
///
/// `base_url` should end with a slash when the service is mounted below the
/// host root, since endpoint paths are joined onto it.
pub struct HttpSignupApi {
    client: Client,
    base_url: Url,
}

impl HttpSignupApi {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: Url) -> Result<Self> {
        let client = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .build()
            .context("Error creating signup API client")?;

        Ok(Self { client, base_url })
    }

    async fn post_json<T: Serialize + Sync>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<(), SignupError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|err| SignupError::Transport(err.to_string()))?;

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| SignupError::Transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let error = response
            .json::<ErrorResponse>()
            .await
            .map(|body| body.error)
            .map_err(|err| SignupError::Transport(err.to_string()))?;

        Err(classify(status, &error))
    }
}

/// Map an endpoint error body back onto the shared taxonomy.
fn classify(status: StatusCode, error: &str) -> SignupError {
    match error {
        "Invalid enrollment number" => SignupError::UnknownEnrollment,
        "Invalid or expired code" => SignupError::InvalidOrExpiredCode,
        "Registration failed" => SignupError::RegistrationFailed,
        "Failed to send verification email" => SignupError::DeliveryFailed,
        _ if status.is_server_error() => SignupError::Internal,
        other => SignupError::Transport(other.to_string()),
    }
}

#[async_trait]
impl SignupApi for HttpSignupApi {
    async fn initiate(&self, enrollment: &str) -> Result<(), SignupError> {
        let request = InitiateSignupRequest {
            enrollment_number: enrollment.to_string(),
        };
        self.post_json("functions/initiate-signup", &request).await
    }

    async fn complete(&self, request: &CompleteSignupRequest) -> Result<(), SignupError> {
        self.post_json("functions/complete-signup", request).await
    }
}
