//! PostgreSQL implementation of AccountRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::account::{Account, SubscriptionStatus};
use crate::domain::foundation::{AccountId, DomainError, ErrorCode, Timestamp};
use crate::ports::AccountRepository;

/// PostgreSQL implementation of the AccountRepository port.
///
/// Uses sqlx for type-safe database operations with connection pooling.
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    /// Creates a new PostgresAccountRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an account.
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    username: String,
    password_hash: String,
    stripe_customer_id: Option<String>,
    stripe_subscription_id: Option<String>,
    subscription_status: Option<String>,
    trial_ends_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account {
            id: AccountId::from_uuid(row.id),
            email: row.email,
            username: row.username,
            password_hash: row.password_hash,
            stripe_customer_id: row.stripe_customer_id,
            stripe_subscription_id: row.stripe_subscription_id,
            // Unknown statuses are preserved verbatim, never rejected.
            subscription_status: row
                .subscription_status
                .map(|s| SubscriptionStatus::parse(&s)),
            trial_ends_at: row.trial_ends_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, email, username, password_hash, stripe_customer_id,
           stripe_subscription_id, subscription_status, trial_ends_at,
           created_at, updated_at
    FROM accounts
"#;

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn save(&self, account: &Account) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (
                id, email, username, password_hash, stripe_customer_id,
                stripe_subscription_id, subscription_status, trial_ends_at,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(account.id.as_uuid())
        .bind(&account.email)
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(&account.stripe_customer_id)
        .bind(&account.stripe_subscription_id)
        .bind(account.subscription_status.as_ref().map(|s| s.as_str().to_string()))
        .bind(account.trial_ends_at.map(|t| *t.as_datetime()))
        .bind(account.created_at.as_datetime())
        .bind(account.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("accounts_email_key") {
                    return DomainError::new(
                        ErrorCode::ValidationFailed,
                        "Email already registered",
                    );
                }
            }
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to save account: {}", e))
        })?;

        Ok(())
    }

    async fn update(&self, account: &Account) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts SET
                email = $2,
                username = $3,
                password_hash = $4,
                stripe_customer_id = $5,
                stripe_subscription_id = $6,
                subscription_status = $7,
                trial_ends_at = $8,
                updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(account.id.as_uuid())
        .bind(&account.email)
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(&account.stripe_customer_id)
        .bind(&account.stripe_subscription_id)
        .bind(account.subscription_status.as_ref().map(|s| s.as_str().to_string()))
        .bind(account.trial_ends_at.map(|t| *t.as_datetime()))
        .bind(account.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to update account: {}", e))
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::AccountNotFound,
                "Account not found",
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, DomainError> {
        let row: Option<AccountRow> =
            sqlx::query_as(&format!("{} WHERE id = $1", SELECT_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to find account: {}", e),
                    )
                })?;

        Ok(row.map(Account::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let row: Option<AccountRow> =
            sqlx::query_as(&format!("{} WHERE email = $1", SELECT_COLUMNS))
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to find account: {}", e),
                    )
                })?;

        Ok(row.map(Account::from))
    }
}
