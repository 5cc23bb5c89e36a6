use tracing::info;

use crate::{
    error::{ApiResult, Failure},
    gateway::ManagementGateway,
    models::{Account, NewAccount},
};

/// Lists every account.
///
/// Only a missing listing is a failure; an empty one is a valid answer.
pub async fn list_accounts(gateway: &dyn ManagementGateway) -> ApiResult<Vec<Account>> {
    gateway
        .list_accounts()
        .await
        .ok_or_else(|| Failure::not_found("No accounts were found"))
}

pub async fn create_account(
    gateway: &dyn ManagementGateway,
    account: NewAccount,
) -> ApiResult<Account> {
    let created = gateway
        .insert_account(account)
        .await
        .ok_or_else(|| Failure::service("An error occured while trying to add an account"))?;

    info!(account_id = created.id, "account created");
    Ok(created)
}

/// Fetches one account. A missing account is reported as a generic service failure.
pub async fn get_account(gateway: &dyn ManagementGateway, id: i32) -> ApiResult<Account> {
    gateway.find_account(Some(id)).await.ok_or_else(|| {
        Failure::service(format!(
            "An error occured while trying to get an account by id : {id}"
        ))
    })
}

pub async fn toggle_account_status(gateway: &dyn ManagementGateway, id: i32) -> ApiResult<()> {
    let mut account = gateway
        .find_account(Some(id))
        .await
        .ok_or_else(|| Failure::not_found(format!("Account wasn't found with id : {id}")))?;

    account.is_active = !account.is_active;
    let updated = gateway
        .update_account(account)
        .await
        .ok_or_else(|| Failure::service("An error occured while toggling the account status"))?;

    info!(
        account_id = updated.id,
        is_active = updated.is_active,
        "account status toggled"
    );
    Ok(())
}
