use std::{str::FromStr, time::Duration};

use async_trait::async_trait;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tracing::debug;

use super::{GatewayError, ManagementGateway, swallow};
use crate::models::{Account, NewAccount, NewPhoneNumber, PhoneNumber};

const CREATE_ACCOUNTS_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS accounts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    holder_name TEXT,
    is_active BOOLEAN NOT NULL DEFAULT 0
)
"#;

const CREATE_PHONE_NUMBERS_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS phone_numbers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    number TEXT,
    account_id INTEGER
)
"#;

/// Gateway backed by a SQLite database through `sqlx`.
#[derive(Clone)]
pub struct SqlGateway {
    pool: SqlitePool,
}

impl SqlGateway {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool for `url`, creating the database file when missing.
    ///
    /// In-memory databases live and die with a single connection, so their pool
    /// is pinned to one connection that is never recycled.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, GatewayError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let mut pool_options = SqlitePoolOptions::new().max_connections(max_connections.max(1));
        if is_in_memory(url) {
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>);
        }

        let pool = pool_options.connect_with(options).await?;
        Ok(Self::new(pool))
    }

    async fn fetch_account(&self, id: i64) -> Result<Option<Account>, GatewayError> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, holder_name, is_active FROM accounts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    async fn fetch_phone_number(&self, id: i64) -> Result<Option<PhoneNumber>, GatewayError> {
        let phone_number = sqlx::query_as::<_, PhoneNumber>(
            "SELECT id, number, account_id FROM phone_numbers WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(phone_number)
    }

    async fn insert_account_row(&self, account: NewAccount) -> Result<Account, GatewayError> {
        let result = sqlx::query("INSERT INTO accounts (holder_name, is_active) VALUES (?, ?)")
            .bind(account.holder_name)
            .bind(account.is_active)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        self.fetch_account(id)
            .await?
            .ok_or(GatewayError::MissingRow {
                table: "accounts",
                id,
            })
    }

    async fn update_account_row(&self, account: Account) -> Result<Account, GatewayError> {
        let result = sqlx::query("UPDATE accounts SET holder_name = ?, is_active = ? WHERE id = ?")
            .bind(&account.holder_name)
            .bind(account.is_active)
            .bind(account.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(GatewayError::MissingRow {
                table: "accounts",
                id: i64::from(account.id),
            });
        }
        Ok(account)
    }

    async fn insert_phone_number_row(
        &self,
        phone_number: NewPhoneNumber,
    ) -> Result<PhoneNumber, GatewayError> {
        let result = sqlx::query("INSERT INTO phone_numbers (number, account_id) VALUES (?, ?)")
            .bind(phone_number.number)
            .bind(phone_number.account_id)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        self.fetch_phone_number(id)
            .await?
            .ok_or(GatewayError::MissingRow {
                table: "phone_numbers",
                id,
            })
    }

    async fn delete_phone_number_row(&self, id: i32) -> Result<(), GatewayError> {
        let result = sqlx::query("DELETE FROM phone_numbers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(GatewayError::MissingRow {
                table: "phone_numbers",
                id: i64::from(id),
            });
        }
        Ok(())
    }

    async fn update_phone_number_row(
        &self,
        phone_number: PhoneNumber,
    ) -> Result<PhoneNumber, GatewayError> {
        let result = sqlx::query("UPDATE phone_numbers SET number = ?, account_id = ? WHERE id = ?")
            .bind(&phone_number.number)
            .bind(phone_number.account_id)
            .bind(phone_number.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(GatewayError::MissingRow {
                table: "phone_numbers",
                id: i64::from(phone_number.id),
            });
        }
        Ok(phone_number)
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[async_trait]
impl ManagementGateway for SqlGateway {
    async fn init(&self) -> Result<(), GatewayError> {
        sqlx::query(CREATE_ACCOUNTS_SQL).execute(&self.pool).await?;
        sqlx::query(CREATE_PHONE_NUMBERS_SQL)
            .execute(&self.pool)
            .await?;
        debug!("sqlite schema ready");
        Ok(())
    }

    async fn find_account(&self, id: Option<i32>) -> Option<Account> {
        let id = id?;
        swallow("find_account", self.fetch_account(i64::from(id)).await).flatten()
    }

    async fn list_accounts(&self) -> Option<Vec<Account>> {
        let accounts = sqlx::query_as::<_, Account>(
            "SELECT id, holder_name, is_active FROM accounts ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(GatewayError::from);

        swallow("list_accounts", accounts)
    }

    async fn insert_account(&self, account: NewAccount) -> Option<Account> {
        swallow("insert_account", self.insert_account_row(account).await)
    }

    async fn update_account(&self, account: Account) -> Option<Account> {
        swallow("update_account", self.update_account_row(account).await)
    }

    async fn find_phone_number(&self, id: Option<i32>) -> Option<PhoneNumber> {
        let id = id?;
        swallow(
            "find_phone_number",
            self.fetch_phone_number(i64::from(id)).await,
        )
        .flatten()
    }

    async fn list_phone_numbers_by_account(&self, account_id: i32) -> Vec<PhoneNumber> {
        let phone_numbers = sqlx::query_as::<_, PhoneNumber>(
            "SELECT id, number, account_id FROM phone_numbers WHERE account_id = ? ORDER BY id",
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await
        .map_err(GatewayError::from);

        swallow("list_phone_numbers_by_account", phone_numbers).unwrap_or_default()
    }

    async fn insert_phone_number(&self, phone_number: NewPhoneNumber) -> Option<PhoneNumber> {
        swallow(
            "insert_phone_number",
            self.insert_phone_number_row(phone_number).await,
        )
    }

    async fn delete_phone_number(&self, phone_number: &PhoneNumber) -> bool {
        swallow(
            "delete_phone_number",
            self.delete_phone_number_row(phone_number.id).await,
        )
        .is_some()
    }

    async fn update_phone_number(
        &self,
        mut phone_number: PhoneNumber,
        account_id: i32,
    ) -> Option<PhoneNumber> {
        phone_number.account_id = Some(account_id);
        swallow(
            "update_phone_number",
            self.update_phone_number_row(phone_number).await,
        )
    }
}
