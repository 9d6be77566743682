//! Client-side signup flow.
//!
//! Frontends drive signup through [`SignupFlow`], a two-step controller that
//! keeps the displayed step in lockstep with server-confirmed progress: the
//! flow only advances when the corresponding endpoint reports success, and a
//! reset (cancel, switching to login, sign-out) always drops the captured
//! enrollment number.
//!
//! Transport lives behind the [`SignupApi`] trait so tests run against a
//! fake; [`HttpSignupApi`] is the reqwest implementation.

mod flow;
mod http;

pub use flow::{FlowState, SignupFlow, SignupForm, StepOutcome};
pub use http::HttpSignupApi;

use crate::api::handlers::signup::{CompleteSignupRequest, SignupError};
use async_trait::async_trait;

/// Transport used by the flow controller to reach the signup endpoints.
#[async_trait]
pub trait SignupApi: Send + Sync {
    async fn initiate(&self, enrollment: &str) -> Result<(), SignupError>;
    async fn complete(&self, request: &CompleteSignupRequest) -> Result<(), SignupError>;
}
