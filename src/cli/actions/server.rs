use crate::api::{
    self,
    email::{EmailSender, HttpEmailSender, LogEmailSender},
    handlers::signup::SignupConfig,
};
use crate::cli::actions::Action;
use anyhow::Result;
use std::sync::Arc;
use url::Url;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            dsn,
            code_ttl,
            email_from,
            email_api_url,
            email_api_key,
        } => {
            let config = SignupConfig::new(email_from).with_code_ttl_seconds(code_ttl);

            // Without an email API the service logs outbound mail instead of
            // sending it, which is enough for local development.
            let mailer: Arc<dyn EmailSender> = match (email_api_url, email_api_key) {
                (Some(api_url), Some(api_key)) => {
                    let api_url = Url::parse(&api_url)?;
                    Arc::new(HttpEmailSender::new(api_url, api_key)?)
                }
                _ => Arc::new(LogEmailSender),
            };

            api::new(port, dsn, config, mailer).await?;
        }
    }

    Ok(())
}
