//! Outbound email delivery abstractions.
//!
//! The verification issuer hands a rendered message to an [`EmailSender`] and
//! treats any error as a delivery failure. The default sender for local dev
//! is [`LogEmailSender`], which logs and returns `Ok(())`; production wires
//! [`HttpEmailSender`] against a Resend-style JSON API.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::info;
use url::Url;

#[derive(Clone, Debug)]
pub struct EmailMessage {
    pub to_email: String,
    pub subject: String,
    pub html_body: String,
}

/// Email delivery abstraction used by the verification issuer.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Deliver a message or return an error to surface a delivery failure.
    async fn send(&self, from: &str, message: &EmailMessage) -> Result<()>;
}

/// Local dev sender that logs the payload instead of sending real email.
#[derive(Clone, Debug)]
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, from: &str, message: &EmailMessage) -> Result<()> {
        info!(
            from = %from,
            to_email = %message.to_email,
            subject = %message.subject,
            body = %message.html_body,
            "email send stub"
        );
        Ok(())
    }
}

/// Sender backed by a Resend-style HTTP JSON API (`POST {base}/emails`).
#[derive(Debug)]
pub struct HttpEmailSender {
    client: Client,
    endpoint: Url,
    api_key: SecretString,
}

impl HttpEmailSender {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built or the API URL is
    /// not a valid base.
    pub fn new(api_url: Url, api_key: SecretString) -> Result<Self> {
        let client = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .build()
            .context("Error creating email API client")?;

        let endpoint = api_url
            .join("emails")
            .context("Invalid email API base URL")?;

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl EmailSender for HttpEmailSender {
    async fn send(&self, from: &str, message: &EmailMessage) -> Result<()> {
        let body = json!({
            "from": from,
            "to": message.to_email,
            "subject": message.subject,
            "html": message.html_body,
        });

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .context("failed to reach email API")?;

        if !response.status().is_success() {
            return Err(anyhow!("email API returned {}", response.status()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn log_sender_always_succeeds() -> Result<()> {
        let message = EmailMessage {
            to_email: "student@example.edu".to_string(),
            subject: "Your Verification Code".to_string(),
            html_body: "<strong>Verification Code:</strong> 123456".to_string(),
        };
        LogEmailSender.send("noreply@matricola.dev", &message).await
    }

    #[test]
    fn http_sender_joins_emails_endpoint() -> Result<()> {
        let sender = HttpEmailSender::new(
            Url::parse("https://api.resend.com")?,
            SecretString::from("re_123".to_string()),
        )?;
        assert_eq!(sender.endpoint.as_str(), "https://api.resend.com/emails");
        Ok(())
    }
}
