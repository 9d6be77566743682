//! Code redemption and account creation (signup step 2).

use tracing::{debug, error, warn};

use super::{
    config::SignupConfig,
    error::SignupError,
    password,
    store::{AccountInsert, AccountStore, NewAccount, VerificationStore},
};

/// Trimmed input for the completion step.
pub(crate) struct SignupProfile<'a> {
    pub enrollment: &'a str,
    pub code: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub password: &'a str,
}

/// Validate the submitted code and create the account.
///
/// The pending row is deleted only after a successful insert, so a transient
/// insertion failure does not force the user to request a fresh code. Once
/// deleted, redeeming the same code again fails because the row is gone.
pub(crate) async fn complete_signup(
    store: &dyn VerificationStore,
    accounts: &dyn AccountStore,
    config: &SignupConfig,
    profile: &SignupProfile<'_>,
) -> Result<(), SignupError> {
    let pending = match store
        .fetch(profile.enrollment, config.code_ttl_seconds())
        .await
    {
        Ok(pending) => pending,
        Err(err) => {
            error!("failed to fetch pending verification: {err:?}");
            return Err(SignupError::Internal);
        }
    };

    // Absent, expired, and mismatched are one error for the caller; the log
    // keeps them apart.
    let pending = match pending {
        Some(pending) => pending,
        None => {
            debug!(enrollment = %profile.enrollment, "no pending verification");
            return Err(SignupError::InvalidOrExpiredCode);
        }
    };
    if pending.expired {
        debug!(enrollment = %profile.enrollment, "verification code expired");
        return Err(SignupError::InvalidOrExpiredCode);
    }
    if pending.code != profile.code {
        debug!(enrollment = %profile.enrollment, "verification code mismatch");
        return Err(SignupError::InvalidOrExpiredCode);
    }

    let password_hash = match password::hash_password(profile.password) {
        Ok(hash) => hash,
        Err(err) => {
            error!("failed to hash password: {err:?}");
            return Err(SignupError::Internal);
        }
    };

    let account = NewAccount {
        enrollment: profile.enrollment,
        first_name: profile.first_name,
        last_name: profile.last_name,
        password_hash: &password_hash,
    };

    match accounts.insert(&account).await {
        Ok(AccountInsert::Created) => {}
        Ok(AccountInsert::Conflict) => {
            warn!(enrollment = %profile.enrollment, "account already exists");
            return Err(SignupError::RegistrationFailed);
        }
        Err(err) => {
            error!("failed to insert account: {err:?}");
            return Err(SignupError::RegistrationFailed);
        }
    }

    // The code is single-use; with the account created, the row is spent.
    // A failed delete is logged but not surfaced: redeeming the leftover
    // code fails on the account uniqueness constraint anyway.
    if let Err(err) = store.delete(profile.enrollment).await {
        error!(enrollment = %profile.enrollment, "failed to delete consumed verification: {err:?}");
    }

    debug!(enrollment = %profile.enrollment, "account created");

    Ok(())
}
