use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde_json::{Value, json};

use crate::{
    error::ApiResult,
    models::{Account, NewAccount, PhoneNumber},
    state::AppState,
    workflow::{accounts, phone_numbers},
};

pub async fn healthcheck() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn list_accounts(State(state): State<AppState>) -> ApiResult<Json<Vec<Account>>> {
    let accounts = accounts::list_accounts(state.gateway.as_ref()).await?;
    Ok(Json(accounts))
}

pub async fn create_account(
    State(state): State<AppState>,
    payload: Result<Json<NewAccount>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload?;
    let account = accounts::create_account(state.gateway.as_ref(), payload).await?;
    let location = format!("/api/accounts/{}", account.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(account),
    ))
}

pub async fn get_account(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<Account>> {
    let Path(id) = id?;
    let account = accounts::get_account(state.gateway.as_ref(), id).await?;
    Ok(Json(account))
}

pub async fn toggle_account_status(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    accounts::toggle_account_status(state.gateway.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_phone_numbers_by_account(
    State(state): State<AppState>,
    account_id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<Vec<PhoneNumber>>> {
    let Path(account_id) = account_id?;
    let phone_numbers =
        phone_numbers::list_phone_numbers_by_account(state.gateway.as_ref(), account_id).await?;
    Ok(Json(phone_numbers))
}

pub async fn delete_phone_number(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    phone_numbers::delete_phone_number(state.gateway.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn assign_phone_number_to_account(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<PhoneNumber>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    let Json(phone_number) = payload?;
    phone_numbers::assign_account(state.gateway.as_ref(), id, phone_number).await?;
    Ok(StatusCode::NO_CONTENT)
}
