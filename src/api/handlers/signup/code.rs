//! One-time verification code generation.

use rand::Rng;

/// Generate a 6-digit code, uniform over `[100000, 999999]`.
///
/// Stateless and infallible; successive codes are unrelated.
#[must_use]
pub(crate) fn generate_code() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_six_digits() {
        for _ in 0..1000 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));

            let value: u32 = code.parse().unwrap();
            assert!((100_000..=999_999).contains(&value));
        }
    }

    #[test]
    fn codes_vary() {
        let first = generate_code();
        // 1 in 900k odds per draw; 20 identical draws means a broken generator.
        assert!((0..20).any(|_| generate_code() != first));
    }
}
