//! Shared field validators.
//!
//! Used by the endpoints and by the client-side flow, so both sides reject
//! bad input before any network or storage call.

use regex::Regex;

/// Minimal `local@domain` shape with a dot in the domain part.
#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

/// Enrollment numbers are 8-20 uppercase letters and digits.
#[must_use]
pub fn valid_enrollment(enrollment: &str) -> bool {
    Regex::new(r"^[A-Z0-9]{8,20}$").is_ok_and(|re| re.is_match(enrollment))
}

/// At least 8 characters with an uppercase letter and a digit.
#[must_use]
pub fn valid_password(password: &str) -> bool {
    password.len() >= 8
        && password.chars().any(char::is_uppercase)
        && password.chars().any(|c| c.is_ascii_digit())
}
