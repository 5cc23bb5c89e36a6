//! Persistence gateway fronting the relational store.
//!
//! Reads and writes never propagate store errors to workflows. Failures are
//! logged here and surfaced as an absent record, a `None` listing or `false`,
//! so a workflow sees a store error exactly like an ordinary negative result.

mod memory;
mod sql;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::models::{Account, NewAccount, NewPhoneNumber, PhoneNumber};

pub use memory::InMemoryGateway;
pub use sql::SqlGateway;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{table} row {id} is missing")]
    MissingRow { table: &'static str, id: i64 },
    #[error("{table} identity {id} is out of range")]
    IdentityOverflow { table: &'static str, id: i64 },
}

#[async_trait]
pub trait ManagementGateway: Send + Sync {
    /// Prepares storage (tables, counters). Called once at startup.
    async fn init(&self) -> Result<(), GatewayError>;

    async fn find_account(&self, id: Option<i32>) -> Option<Account>;

    /// All accounts in insertion order; `None` when the store could not list them.
    async fn list_accounts(&self) -> Option<Vec<Account>>;

    /// Persists a new account and returns the stored record.
    async fn insert_account(&self, account: NewAccount) -> Option<Account>;

    /// Full-record update keyed by `account.id`.
    async fn update_account(&self, account: Account) -> Option<Account>;

    async fn find_phone_number(&self, id: Option<i32>) -> Option<PhoneNumber>;

    async fn list_phone_numbers_by_account(&self, account_id: i32) -> Vec<PhoneNumber>;

    async fn insert_phone_number(&self, phone_number: NewPhoneNumber) -> Option<PhoneNumber>;

    async fn delete_phone_number(&self, phone_number: &PhoneNumber) -> bool;

    /// Writes `phone_number` with its account set to `account_id`.
    async fn update_phone_number(
        &self,
        phone_number: PhoneNumber,
        account_id: i32,
    ) -> Option<PhoneNumber>;
}

/// Logs a store error and collapses it into a negative signal.
pub(crate) fn swallow<T>(operation: &'static str, result: Result<T, GatewayError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(operation, error = %err, "persistence operation failed");
            None
        }
    }
}
