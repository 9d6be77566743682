pub mod server;

use secrecy::SecretString;

/// Action to take after parsing the command line
#[derive(Debug)]
pub enum Action {
    Server {
        port: u16,
        dsn: String,
        code_ttl: i64,
        email_from: String,
        email_api_url: Option<String>,
        email_api_key: Option<SecretString>,
    },
}
