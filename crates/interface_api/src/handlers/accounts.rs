//! Account handlers
//!
//! Thin wrappers that parse the request, call the `Ledger`, and convert the
//! resulting snapshot or error.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use core_kernel::AccountId;

use crate::dto::account::{AccountResponse, AmountRequest, FullNameRequest};
use crate::{error::ApiError, AppState};

fn parse_id(raw: &str) -> Result<AccountId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid account id: {raw:?}")))
}

/// Opens a new account
pub async fn open_account(
    State(state): State<AppState>,
    Json(request): Json<FullNameRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    let account = state.ledger.open_account(&request.full_name).await?;
    Ok((StatusCode::CREATED, Json(account.try_into()?)))
}

/// Gets an account by ID
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AccountResponse>, ApiError> {
    let account = state.ledger.load(parse_id(&id)?).await?;
    Ok(Json(account.try_into()?))
}

/// Renames an open account
pub async fn rename_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<FullNameRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    let account = state
        .ledger
        .rename(parse_id(&id)?, &request.full_name)
        .await?;
    Ok(Json(account.try_into()?))
}

/// Closes an account with a zero balance
pub async fn close_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AccountResponse>, ApiError> {
    let account = state.ledger.close(parse_id(&id)?).await?;
    Ok(Json(account.try_into()?))
}

/// Deposits a positive amount
pub async fn deposit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<AmountRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    let id = parse_id(&id)?;
    let amount = request.positive_amount()?;
    let account = state.ledger.deposit(id, amount).await?;
    Ok(Json(account.try_into()?))
}

/// Withdraws a positive amount
pub async fn withdraw(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<AmountRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    let id = parse_id(&id)?;
    let amount = request.positive_amount()?;
    let account = state.ledger.withdraw(id, amount).await?;
    Ok(Json(account.try_into()?))
}
