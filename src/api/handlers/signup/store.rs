//! Collaborator handles for the signup pipeline and their Postgres backends.
//!
//! The issuer and completer only see the traits, so tests substitute
//! in-memory fakes without a database or network.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::Instrument;

/// A verification code as read back from storage.
///
/// Expiry is evaluated at read time, so a stale row that has not been
/// cleaned up yet can never validate.
#[derive(Clone, Debug)]
pub struct PendingCode {
    pub code: String,
    pub expired: bool,
}

/// Read-only directory mapping enrollment numbers to the email on file.
#[async_trait]
pub trait Directory: Send + Sync {
    async fn lookup_email(&self, enrollment: &str) -> Result<Option<String>>;
}

/// Durable store for pending verification codes, keyed by enrollment number.
///
/// At most one live code per enrollment number: `upsert` replaces any
/// unconsumed code and resets its issuance time.
#[async_trait]
pub trait VerificationStore: Send + Sync {
    async fn upsert(&self, enrollment: &str, code: &str) -> Result<()>;
    /// Fetch the stored code, flagged expired when older than `ttl_seconds`.
    async fn fetch(&self, enrollment: &str, ttl_seconds: i64) -> Result<Option<PendingCode>>;
    async fn delete(&self, enrollment: &str) -> Result<()>;
}

/// Outcome when inserting the account row.
#[derive(Debug)]
pub enum AccountInsert {
    Created,
    /// An account already exists for the enrollment number.
    Conflict,
}

pub struct NewAccount<'a> {
    pub enrollment: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub password_hash: &'a str,
}

/// Durable store for account records.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn insert(&self, account: &NewAccount<'_>) -> Result<AccountInsert>;
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

/// Directory backed by the read-only `students` table.
#[derive(Clone)]
pub struct PgDirectory {
    pool: PgPool,
}

impl PgDirectory {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Directory for PgDirectory {
    async fn lookup_email(&self, enrollment: &str) -> Result<Option<String>> {
        let query = "SELECT email FROM students WHERE enrollment_number = $1";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(enrollment)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to lookup enrollment email")?;

        Ok(row.map(|row| row.get("email")))
    }
}

/// Pending verification codes in the `pending_verifications` table.
#[derive(Clone)]
pub struct PgVerificationStore {
    pool: PgPool,
}

impl PgVerificationStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VerificationStore for PgVerificationStore {
    async fn upsert(&self, enrollment: &str, code: &str) -> Result<()> {
        // Last write wins: a concurrent issuance for the same number leaves
        // only the newest code valid.
        let query = r"
            INSERT INTO pending_verifications (enrollment_number, verification_code, created_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (enrollment_number)
            DO UPDATE SET verification_code = EXCLUDED.verification_code, created_at = NOW()
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        sqlx::query(query)
            .bind(enrollment)
            .bind(code)
            .execute(&self.pool)
            .instrument(span)
            .await
            .context("failed to upsert pending verification")?;

        Ok(())
    }

    async fn fetch(&self, enrollment: &str, ttl_seconds: i64) -> Result<Option<PendingCode>> {
        // Age is computed against NOW() in the same statement, so the expiry
        // decision does not depend on cleanup having run.
        let query = r"
            SELECT verification_code,
                   created_at < NOW() - ($2 * INTERVAL '1 second') AS expired
            FROM pending_verifications
            WHERE enrollment_number = $1
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(enrollment)
            .bind(ttl_seconds)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to fetch pending verification")?;

        Ok(row.map(|row| PendingCode {
            code: row.get("verification_code"),
            expired: row.get("expired"),
        }))
    }

    async fn delete(&self, enrollment: &str) -> Result<()> {
        let query = "DELETE FROM pending_verifications WHERE enrollment_number = $1";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "DELETE",
            db.statement = query
        );
        sqlx::query(query)
            .bind(enrollment)
            .execute(&self.pool)
            .instrument(span)
            .await
            .context("failed to delete pending verification")?;

        Ok(())
    }
}

/// Account records in the `users` table.
#[derive(Clone)]
pub struct PgAccounts {
    pool: PgPool,
}

impl PgAccounts {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccounts {
    async fn insert(&self, account: &NewAccount<'_>) -> Result<AccountInsert> {
        let query = r"
            INSERT INTO users (enrollment_number, first_name, last_name, password_hash)
            VALUES ($1, $2, $3, $4)
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        let result = sqlx::query(query)
            .bind(account.enrollment)
            .bind(account.first_name)
            .bind(account.last_name)
            .bind(account.password_hash)
            .execute(&self.pool)
            .instrument(span)
            .await;

        match result {
            Ok(_) => Ok(AccountInsert::Created),
            Err(err) if is_unique_violation(&err) => Ok(AccountInsert::Conflict),
            Err(err) => Err(err).context("failed to insert account"),
        }
    }
}
