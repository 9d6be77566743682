//! API handlers for matricola.
//!
//! `signup` carries the enrollment-verification pipeline; `health` is the
//! service liveness endpoint.

pub mod health;
pub mod signup;
