//! Two-step signup state machine.

use tracing::debug;

use super::SignupApi;
use crate::api::handlers::signup::{
    validate::{valid_enrollment, valid_password},
    CompleteSignupRequest, Field, SignupError,
};

/// Where the signup flow currently is.
///
/// The enrollment number captured at step 1 lives inside the state rather
/// than in a shared variable, so no unrelated event can leave a stale value
/// behind, and later edits to the input field cannot change what step 2
/// submits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowState {
    /// Step 1: collecting the enrollment number.
    CollectIdentifier,
    /// Step 2: collecting profile fields and the emailed code. Holds the
    /// enrollment number exactly as submitted in step 1.
    CollectProfileAndCode { enrollment: String },
    /// Signup finished; the UI navigates away.
    Completed,
}

/// Raw form input as read from the UI.
#[derive(Clone, Debug, Default)]
pub struct SignupForm {
    pub enrollment_number: String,
    pub code: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// What a successful submission did.
#[derive(Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Step 1 succeeded; the code is on its way.
    CodeSent,
    /// Step 2 succeeded; the account exists.
    Registered,
}

/// Two-step signup controller.
///
/// `submit` takes `&mut self`, so only one request is ever in flight per
/// flow instance, and the state advances only on a server-confirmed
/// success. Every failure leaves the state where it was.
pub struct SignupFlow<A> {
    api: A,
    state: FlowState,
}

impl<A: SignupApi> SignupFlow<A> {
    #[must_use]
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: FlowState::CollectIdentifier,
        }
    }

    #[must_use]
    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// Submit the form for the current step.
    ///
    /// Validation failures short-circuit before any request and name the
    /// offending field.
    pub async fn submit(&mut self, form: &SignupForm) -> Result<StepOutcome, SignupError> {
        match self.state.clone() {
            FlowState::CollectIdentifier => {
                let enrollment = form.enrollment_number.trim().to_string();
                if !valid_enrollment(&enrollment) {
                    return Err(SignupError::Validation(Field::Enrollment));
                }

                self.api.initiate(&enrollment).await?;

                debug!(%enrollment, "verification code requested");
                self.state = FlowState::CollectProfileAndCode { enrollment };
                Ok(StepOutcome::CodeSent)
            }
            FlowState::CollectProfileAndCode { enrollment } => {
                let code = form.code.trim();
                let first_name = form.first_name.trim();
                let last_name = form.last_name.trim();
                let password = form.password.trim();

                if code.is_empty() {
                    return Err(SignupError::Validation(Field::Code));
                }
                if first_name.is_empty() {
                    return Err(SignupError::Validation(Field::FirstName));
                }
                if last_name.is_empty() {
                    return Err(SignupError::Validation(Field::LastName));
                }
                if !valid_password(password) {
                    return Err(SignupError::Validation(Field::Password));
                }

                // The identifier captured at step 1 is resent verbatim; the
                // (possibly edited) input field is not consulted.
                let request = CompleteSignupRequest {
                    enrollment_number: enrollment,
                    code: code.to_string(),
                    first_name: first_name.to_string(),
                    last_name: last_name.to_string(),
                    password: password.to_string(),
                };

                self.api.complete(&request).await?;

                self.state = FlowState::Completed;
                Ok(StepOutcome::Registered)
            }
            // Already done; nothing left to submit.
            FlowState::Completed => Ok(StepOutcome::Registered),
        }
    }

    /// Return to step 1, dropping the captured enrollment number.
    ///
    /// Called on explicit cancel, on switching to login mode, and on
    /// sign-out, so a stale identifier is never submitted against a newer
    /// code.
    pub fn reset(&mut self) {
        self.state = FlowState::CollectIdentifier;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Scripted API double that records every request it receives.
    #[derive(Default)]
    struct FakeApi {
        fail_initiate: bool,
        fail_complete: bool,
        initiated: Mutex<Vec<String>>,
        completed: Mutex<Vec<CompleteSignupRequest>>,
    }

    #[async_trait]
    impl SignupApi for FakeApi {
        async fn initiate(&self, enrollment: &str) -> Result<(), SignupError> {
            if self.fail_initiate {
                return Err(SignupError::UnknownEnrollment);
            }
            self.initiated.lock().unwrap().push(enrollment.to_string());
            Ok(())
        }

        async fn complete(&self, request: &CompleteSignupRequest) -> Result<(), SignupError> {
            if self.fail_complete {
                return Err(SignupError::InvalidOrExpiredCode);
            }
            self.completed.lock().unwrap().push(request.clone());
            Ok(())
        }
    }

    fn step_two_form() -> SignupForm {
        SignupForm {
            enrollment_number: "CS2024001A".to_string(),
            code: "123456".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            password: "Secret123".to_string(),
        }
    }

    #[tokio::test]
    async fn failed_step_one_stays_on_step_one() {
        let mut flow = SignupFlow::new(FakeApi {
            fail_initiate: true,
            ..FakeApi::default()
        });

        let result = flow.submit(&step_two_form()).await;

        assert_eq!(result, Err(SignupError::UnknownEnrollment));
        assert_eq!(flow.state(), &FlowState::CollectIdentifier);
    }

    #[tokio::test]
    async fn invalid_enrollment_never_reaches_the_api() {
        let mut flow = SignupFlow::new(FakeApi::default());

        let form = SignupForm {
            enrollment_number: "cs2024".to_string(),
            ..SignupForm::default()
        };
        let result = flow.submit(&form).await;

        assert_eq!(result, Err(SignupError::Validation(Field::Enrollment)));
        assert_eq!(flow.state(), &FlowState::CollectIdentifier);
        assert!(flow.api.initiated.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn successful_step_one_advances_and_captures_identifier() {
        let mut flow = SignupFlow::new(FakeApi::default());

        let result = flow.submit(&step_two_form()).await;

        assert_eq!(result, Ok(StepOutcome::CodeSent));
        assert_eq!(
            flow.state(),
            &FlowState::CollectProfileAndCode {
                enrollment: "CS2024001A".to_string()
            }
        );
    }

    #[tokio::test]
    async fn step_two_resends_captured_identifier_verbatim() {
        let mut flow = SignupFlow::new(FakeApi::default());
        flow.submit(&step_two_form()).await.unwrap();

        // Edit the (hidden) identifier field after step 1; the captured
        // value must still be what gets submitted.
        let mut form = step_two_form();
        form.enrollment_number = "ZZ9999999Z".to_string();

        let result = flow.submit(&form).await;

        assert_eq!(result, Ok(StepOutcome::Registered));
        assert_eq!(flow.state(), &FlowState::Completed);

        let completed = flow.api.completed.lock().unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].enrollment_number, "CS2024001A");
        assert_eq!(completed[0].first_name, "Ada");
    }

    #[tokio::test]
    async fn failed_step_two_stays_on_step_two() {
        let mut flow = SignupFlow::new(FakeApi {
            fail_complete: true,
            ..FakeApi::default()
        });
        flow.submit(&step_two_form()).await.unwrap();

        let result = flow.submit(&step_two_form()).await;

        assert_eq!(result, Err(SignupError::InvalidOrExpiredCode));
        assert_eq!(
            flow.state(),
            &FlowState::CollectProfileAndCode {
                enrollment: "CS2024001A".to_string()
            }
        );
    }

    #[tokio::test]
    async fn step_two_validates_before_calling_the_api() {
        let mut flow = SignupFlow::new(FakeApi::default());
        flow.submit(&step_two_form()).await.unwrap();

        let mut form = step_two_form();
        form.password = "abc12345".to_string(); // no uppercase
        let result = flow.submit(&form).await;

        assert_eq!(result, Err(SignupError::Validation(Field::Password)));
        assert!(flow.api.completed.lock().unwrap().is_empty());

        let mut form = step_two_form();
        form.code = "  ".to_string();
        let result = flow.submit(&form).await;

        assert_eq!(result, Err(SignupError::Validation(Field::Code)));
    }

    #[tokio::test]
    async fn reset_drops_captured_identifier() {
        let mut flow = SignupFlow::new(FakeApi::default());
        flow.submit(&step_two_form()).await.unwrap();
        assert_ne!(flow.state(), &FlowState::CollectIdentifier);

        // Same path for cancel, login-mode toggle, and sign-out.
        flow.reset();
        assert_eq!(flow.state(), &FlowState::CollectIdentifier);
    }

    #[tokio::test]
    async fn enrollment_is_trimmed_before_validation() {
        let mut flow = SignupFlow::new(FakeApi::default());

        let mut form = step_two_form();
        form.enrollment_number = "  CS2024001A  ".to_string();
        let result = flow.submit(&form).await;

        assert_eq!(result, Ok(StepOutcome::CodeSent));
        assert_eq!(flow.api.initiated.lock().unwrap()[0], "CS2024001A");
    }
}
