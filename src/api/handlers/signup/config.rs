//! Signup pipeline configuration.

const DEFAULT_CODE_TTL_SECONDS: i64 = 10 * 60;

#[derive(Clone, Debug)]
pub struct SignupConfig {
    email_from: String,
    code_ttl_seconds: i64,
}

impl SignupConfig {
    #[must_use]
    pub fn new(email_from: String) -> Self {
        Self {
            email_from,
            code_ttl_seconds: DEFAULT_CODE_TTL_SECONDS,
        }
    }

    #[must_use]
    pub fn with_code_ttl_seconds(mut self, seconds: i64) -> Self {
        self.code_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn email_from(&self) -> &str {
        &self.email_from
    }

    #[must_use]
    pub fn code_ttl_seconds(&self) -> i64 {
        self.code_ttl_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ttl_is_ten_minutes() {
        let config = SignupConfig::new("noreply@matricola.dev".to_string());
        assert_eq!(config.code_ttl_seconds(), 600);
        assert_eq!(config.email_from(), "noreply@matricola.dev");
    }

    #[test]
    fn ttl_override() {
        let config = SignupConfig::new("noreply@matricola.dev".to_string())
            .with_code_ttl_seconds(60);
        assert_eq!(config.code_ttl_seconds(), 60);
    }
}
