//! # Matricola (enrollment-based signup service)
//!
//! `matricola` lets a person holding an institutional enrollment number claim
//! an account by proving control of the email address on file for that
//! number, then setting a password.
//!
//! ## Signup pipeline
//!
//! Signup is a two-phase flow:
//!
//! 1. **Initiate** — the enrollment number is resolved to its directory
//!    email, a 6-digit one-time code is generated and stored, and the code is
//!    emailed out-of-band. Requesting a new code replaces any outstanding one;
//!    only the most recently issued code is ever valid.
//! 2. **Complete** — the submitted code is checked against the stored one
//!    (10-minute expiry, enforced at read time), the password is Argon2id
//!    hashed, the account row is inserted, and the spent code is deleted.
//!    A code backs at most one successful account creation.
//!
//! Lookup misses, code mismatches, and expiry are collapsed into single
//! client-visible errors (`Invalid enrollment number`, `Invalid or expired
//! code`) so valid enrollment numbers and half-correct guesses cannot be
//! enumerated; logs keep the distinction.
//!
//! The [`client`] module carries the matching two-step flow controller used
//! by frontends, which only advances on a server-confirmed response.

pub mod api;
pub mod cli;
pub mod client;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
