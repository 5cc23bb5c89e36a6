use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{GatewayError, ManagementGateway, swallow};
use crate::models::{Account, NewAccount, NewPhoneNumber, PhoneNumber};

/// Process-local tables with auto-increment identities.
#[derive(Default)]
pub struct InMemoryGateway {
    tables: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    accounts: BTreeMap<i32, Account>,
    phone_numbers: BTreeMap<i32, PhoneNumber>,
    last_account_id: i32,
    last_phone_number_id: i32,
}

fn next_identity(last: &mut i32, table: &'static str) -> Result<i32, GatewayError> {
    let next = last.checked_add(1).ok_or(GatewayError::IdentityOverflow {
        table,
        id: i64::from(*last),
    })?;
    *last = next;
    Ok(next)
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ManagementGateway for InMemoryGateway {
    async fn init(&self) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn find_account(&self, id: Option<i32>) -> Option<Account> {
        let id = id?;
        self.tables.read().await.accounts.get(&id).cloned()
    }

    async fn list_accounts(&self) -> Option<Vec<Account>> {
        Some(self.tables.read().await.accounts.values().cloned().collect())
    }

    async fn insert_account(&self, account: NewAccount) -> Option<Account> {
        let mut tables = self.tables.write().await;
        let id = swallow(
            "insert_account",
            next_identity(&mut tables.last_account_id, "accounts"),
        )?;

        let stored = account.into_account(id);
        tables.accounts.insert(id, stored.clone());
        Some(stored)
    }

    async fn update_account(&self, account: Account) -> Option<Account> {
        let mut tables = self.tables.write().await;
        let Some(existing) = tables.accounts.get_mut(&account.id) else {
            return swallow(
                "update_account",
                Err(GatewayError::MissingRow {
                    table: "accounts",
                    id: i64::from(account.id),
                }),
            );
        };

        *existing = account.clone();
        Some(account)
    }

    async fn find_phone_number(&self, id: Option<i32>) -> Option<PhoneNumber> {
        let id = id?;
        self.tables.read().await.phone_numbers.get(&id).cloned()
    }

    async fn list_phone_numbers_by_account(&self, account_id: i32) -> Vec<PhoneNumber> {
        self.tables
            .read()
            .await
            .phone_numbers
            .values()
            .filter(|phone| phone.account_id == Some(account_id))
            .cloned()
            .collect()
    }

    async fn insert_phone_number(&self, phone_number: NewPhoneNumber) -> Option<PhoneNumber> {
        let mut tables = self.tables.write().await;
        let id = swallow(
            "insert_phone_number",
            next_identity(&mut tables.last_phone_number_id, "phone_numbers"),
        )?;

        let stored = phone_number.into_phone_number(id);
        tables.phone_numbers.insert(id, stored.clone());
        Some(stored)
    }

    async fn delete_phone_number(&self, phone_number: &PhoneNumber) -> bool {
        let removed = self
            .tables
            .write()
            .await
            .phone_numbers
            .remove(&phone_number.id)
            .ok_or(GatewayError::MissingRow {
                table: "phone_numbers",
                id: i64::from(phone_number.id),
            })
            .map(|_| ());

        swallow("delete_phone_number", removed).is_some()
    }

    async fn update_phone_number(
        &self,
        mut phone_number: PhoneNumber,
        account_id: i32,
    ) -> Option<PhoneNumber> {
        let mut tables = self.tables.write().await;
        let Some(existing) = tables.phone_numbers.get_mut(&phone_number.id) else {
            return swallow(
                "update_phone_number",
                Err(GatewayError::MissingRow {
                    table: "phone_numbers",
                    id: i64::from(phone_number.id),
                }),
            );
        };

        phone_number.account_id = Some(account_id);
        *existing = phone_number.clone();
        Some(phone_number)
    }
}
