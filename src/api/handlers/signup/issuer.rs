//! Verification code issuance (signup step 1).

use tracing::{debug, error, info};

use super::{
    code,
    config::SignupConfig,
    error::SignupError,
    store::{Directory, VerificationStore},
};
use crate::api::email::{EmailMessage, EmailSender};

/// Resolve the enrollment number, store a fresh code, and email it.
///
/// Storing and sending are best-effort sequential, not transactional: a
/// stored-but-undelivered code stays in place and is simply replaced by the
/// next issuance attempt.
pub(crate) async fn issue_code(
    directory: &dyn Directory,
    store: &dyn VerificationStore,
    mailer: &dyn EmailSender,
    config: &SignupConfig,
    enrollment: &str,
) -> Result<(), SignupError> {
    let email = match directory.lookup_email(enrollment).await {
        Ok(Some(email)) => email,
        Ok(None) => {
            // The response does not say whether the number was well-formed
            // but unknown; the log does.
            info!(%enrollment, "enrollment number not found in directory");
            return Err(SignupError::UnknownEnrollment);
        }
        Err(err) => {
            error!("directory lookup failed: {err:?}");
            return Err(SignupError::Internal);
        }
    };

    let code = code::generate_code();

    // Replaces any outstanding code; only the newest one is ever valid.
    if let Err(err) = store.upsert(enrollment, &code).await {
        error!("failed to store verification code: {err:?}");
        return Err(SignupError::Internal);
    }

    let message = EmailMessage {
        to_email: email,
        subject: "Your Verification Code".to_string(),
        html_body: format!("<strong>Verification Code:</strong> {code}"),
    };

    // No rollback on delivery failure: retrying the request overwrites the
    // stored code with a fresh one.
    if let Err(err) = mailer.send(config.email_from(), &message).await {
        error!(%enrollment, "failed to send verification email: {err:?}");
        return Err(SignupError::DeliveryFailed);
    }

    debug!(%enrollment, "verification code issued");

    Ok(())
}
