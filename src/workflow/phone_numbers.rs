use tracing::info;

use crate::{
    error::{ApiResult, Failure},
    gateway::ManagementGateway,
    models::{PhoneNumber, display_id},
};

pub async fn list_phone_numbers_by_account(
    gateway: &dyn ManagementGateway,
    account_id: i32,
) -> ApiResult<Vec<PhoneNumber>> {
    let phone_numbers = gateway.list_phone_numbers_by_account(account_id).await;
    if phone_numbers.is_empty() {
        return Err(Failure::not_found(format!(
            "No phone numbers were found by account id : {account_id}"
        )));
    }

    Ok(phone_numbers)
}

pub async fn delete_phone_number(gateway: &dyn ManagementGateway, id: i32) -> ApiResult<()> {
    // Message says "account id" but carries the phone number id.
    let phone_number = gateway.find_phone_number(Some(id)).await.ok_or_else(|| {
        Failure::not_found(format!("Phone number wasn't found for account id : {id}"))
    })?;

    if !gateway.delete_phone_number(&phone_number).await {
        return Err(Failure::service(format!(
            "An error occured while trying to delete phone number with id : {}",
            phone_number.id
        )));
    }

    info!(phone_number_id = phone_number.id, "phone number deleted");
    Ok(())
}

/// Moves `phone_number` to the account named in its `account_id`.
///
/// The phone number itself is not looked up first: a missing row surfaces as a
/// failed write.
pub async fn assign_account(
    gateway: &dyn ManagementGateway,
    id: i32,
    phone_number: PhoneNumber,
) -> ApiResult<()> {
    if id != phone_number.id {
        return Err(Failure::bad_request(format!(
            "Id given in parameter : {id} must match id given in body: {}",
            phone_number.id
        )));
    }

    let requested = display_id(phone_number.account_id);
    let account = gateway
        .find_account(phone_number.account_id)
        .await
        .ok_or_else(|| Failure::not_found(format!("Account with id : {requested} wasn't found")))?;

    if !account.is_active {
        return Err(Failure::service(format!(
            "Account with id : {requested} is inactive"
        )));
    }

    let phone_number_id = phone_number.id;
    let updated = gateway
        .update_phone_number(phone_number, account.id)
        .await
        .ok_or_else(|| {
            Failure::service(format!(
                "An error occured while trying to assign account id : {} to phone number with id : {phone_number_id}",
                account.id
            ))
        })?;

    info!(
        phone_number_id = updated.id,
        account_id = account.id,
        "phone number assigned"
    );
    Ok(())
}
