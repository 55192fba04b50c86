//! PostgreSQL helper store
//!
//! Conditional updates use `WHERE version = $n`, so a concurrent writer turns into
//! a `ConcurrencyConflict` instead of a lost update.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::aggregate::{HelperValidation, ReviewStatus};

use super::{HelperStore, StoreError};

type HelperRow = (
    String,
    String,
    String,
    bool,
    bool,
    bool,
    String,
    Option<String>,
    i64,
);

const SELECT_COLUMNS: &str = r#"
    SELECT email, firstname, lastname, email_confirmed, credentials_submitted,
           background_check_submitted, review_status, rejection_reason, version
    FROM helper_validations
"#;

/// Helper store backed by the `helper_validations` table
#[derive(Debug, Clone)]
pub struct PgHelperStore {
    pool: PgPool,
}

impl PgHelperStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn from_row(row: HelperRow) -> Result<HelperValidation, StoreError> {
        let (
            email,
            firstname,
            lastname,
            email_confirmed,
            credentials_submitted,
            background_check_submitted,
            review_status,
            rejection_reason,
            version,
        ) = row;

        let status = match review_status.as_str() {
            "pending_review" => ReviewStatus::PendingReview,
            "under_review" => ReviewStatus::UnderReview,
            "validated" => ReviewStatus::Validated,
            "rejected" => ReviewStatus::Rejected {
                reason: rejection_reason,
            },
            other => {
                return Err(StoreError::InvalidRecord(format!(
                    "unknown review status '{}' for {}",
                    other, email
                )))
            }
        };

        Ok(HelperValidation::new(email, firstname, lastname)
            .with_email_confirmed(email_confirmed)
            .with_submissions(credentials_submitted, background_check_submitted)
            .with_status(status)
            .with_version(version))
    }

    async fn current_version(&self, email: &str) -> Result<Option<i64>, StoreError> {
        let version: Option<i64> =
            sqlx::query_scalar("SELECT version FROM helper_validations WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;

        Ok(version)
    }
}

#[async_trait]
impl HelperStore for PgHelperStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<HelperValidation>, StoreError> {
        let row: Option<HelperRow> = sqlx::query_as(&format!("{} WHERE email = $1", SELECT_COLUMNS))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::from_row).transpose()
    }

    async fn find_all(&self) -> Result<Vec<HelperValidation>, StoreError> {
        let rows: Vec<HelperRow> = sqlx::query_as(SELECT_COLUMNS)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Self::from_row).collect()
    }

    async fn find_pending_review(&self) -> Result<Vec<HelperValidation>, StoreError> {
        let rows: Vec<HelperRow> = sqlx::query_as(&format!(
            r#"{}
            WHERE email_confirmed
              AND credentials_submitted
              AND background_check_submitted
              AND review_status = 'pending_review'
            "#,
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::from_row).collect()
    }

    async fn insert(&self, record: HelperValidation) -> Result<HelperValidation, StoreError> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO helper_validations (
                email, firstname, lastname, email_confirmed, credentials_submitted,
                background_check_submitted, review_status, rejection_reason, version
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 1)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(record.email())
        .bind(record.firstname())
        .bind(record.lastname())
        .bind(record.email_confirmed())
        .bind(record.credentials_submitted())
        .bind(record.background_check_submitted())
        .bind(record.status().label())
        .bind(record.rejection_reason())
        .execute(&self.pool)
        .await?;

        if inserted.rows_affected() == 0 {
            return Err(StoreError::AlreadyExists(record.email().to_string()));
        }

        Ok(record.with_version(1))
    }

    async fn update(
        &self,
        record: HelperValidation,
        expected_version: i64,
    ) -> Result<HelperValidation, StoreError> {
        let updated = sqlx::query(
            r#"
            UPDATE helper_validations
            SET credentials_submitted = $3,
                background_check_submitted = $4,
                review_status = $5,
                rejection_reason = $6,
                version = version + 1,
                updated_at = NOW()
            WHERE email = $1 AND version = $2
            "#,
        )
        .bind(record.email())
        .bind(expected_version)
        .bind(record.credentials_submitted())
        .bind(record.background_check_submitted())
        .bind(record.status().label())
        .bind(record.rejection_reason())
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return match self.current_version(record.email()).await? {
                Some(actual) => Err(StoreError::ConcurrencyConflict {
                    email: record.email().to_string(),
                    expected: expected_version,
                    actual,
                }),
                None => Err(StoreError::NotFound(record.email().to_string())),
            };
        }

        Ok(record.with_version(expected_version + 1))
    }
}
