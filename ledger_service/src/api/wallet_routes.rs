use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::api::error::ApiError;
use crate::api::routes::AppState;
use crate::domain::entities::{Wallet, WalletStatus, WalletWithBalances};
use crate::domain::pagination::{Page, PaginationRequest};
use crate::domain::repository::WalletUpdate;
use crate::domain::types::WalletId;

// DTO de entrada para crear una billetera
#[derive(Deserialize, ToSchema)]
pub struct CreateWalletRequest {
    pub name: String,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub context: Option<serde_json::Value>,
}

// DTO de entrada para actualizar una billetera (parcial)
#[derive(Deserialize, ToSchema)]
pub struct UpdateWalletRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub context: Option<serde_json::Value>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub status: Option<WalletStatus>,
}

#[derive(Deserialize)]
pub struct ListWalletsQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub name: Option<String>,
}

// Handler: Crear una billetera
// POST /wallets
#[utoipa::path(
    post,
    path = "/wallets",
    request_body = CreateWalletRequest,
    responses(
        (status = 201, description = "Wallet created"),
        (status = 422, description = "Invalid input")
    )
)]
pub async fn create_wallet(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateWalletRequest>,
) -> Result<(StatusCode, Json<WalletWithBalances>), ApiError> {
    let context = body.context.unwrap_or_else(empty_context);
    let wallet = state
        .create_wallet_use_case
        .execute(body.name, context)
        .await?;

    // Una billetera recién creada todavía no tiene filas de balance.
    Ok((
        StatusCode::CREATED,
        Json(WalletWithBalances {
            wallet,
            balances: vec![],
        }),
    ))
}

// Handler: Detalle de una billetera con sus balances
// GET /wallets/{wallet_id}
#[utoipa::path(
    get,
    path = "/wallets/{wallet_id}",
    params(("wallet_id" = String, Path, description = "Wallet ID")),
    responses(
        (status = 200, description = "Wallet with its balances"),
        (status = 404, description = "Wallet not found")
    )
)]
pub async fn get_wallet(
    State(state): State<Arc<AppState>>,
    Path(wallet_id): Path<String>,
) -> Result<Json<WalletWithBalances>, ApiError> {
    let wallet = state
        .get_wallet_use_case
        .execute(&WalletId(wallet_id))
        .await?;
    Ok(Json(wallet))
}

// Handler: Listado paginado de billeteras
// GET /wallets
#[utoipa::path(
    get,
    path = "/wallets",
    responses((status = 200, description = "Paginated wallet list"))
)]
pub async fn list_wallets(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListWalletsQuery>,
) -> Result<Json<Page<Wallet>>, ApiError> {
    let pagination = PaginationRequest::new(query.page, query.page_size);
    let page = state
        .list_wallets_use_case
        .execute(query.name, pagination)
        .await?;
    Ok(Json(page))
}

// Handler: Actualización parcial de una billetera
// PUT /wallets/{wallet_id}
#[utoipa::path(
    put,
    path = "/wallets/{wallet_id}",
    params(("wallet_id" = String, Path, description = "Wallet ID")),
    request_body = UpdateWalletRequest,
    responses(
        (status = 200, description = "Updated wallet"),
        (status = 404, description = "Wallet not found")
    )
)]
pub async fn update_wallet(
    State(state): State<Arc<AppState>>,
    Path(wallet_id): Path<String>,
    Json(body): Json<UpdateWalletRequest>,
) -> Result<Json<Wallet>, ApiError> {
    let wallet = state
        .update_wallet_use_case
        .execute(
            &WalletId(wallet_id),
            WalletUpdate {
                name: body.name,
                context: body.context,
                status: body.status,
            },
        )
        .await?;
    Ok(Json(wallet))
}

// Handler: Eliminar una billetera (rechazado mientras tenga balances)
// DELETE /wallets/{wallet_id}
#[utoipa::path(
    delete,
    path = "/wallets/{wallet_id}",
    params(("wallet_id" = String, Path, description = "Wallet ID")),
    responses(
        (status = 204, description = "Wallet deleted"),
        (status = 400, description = "Wallet still has balances"),
        (status = 404, description = "Wallet not found")
    )
)]
pub async fn delete_wallet(
    State(state): State<Arc<AppState>>,
    Path(wallet_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .delete_wallet_use_case
        .execute(&WalletId(wallet_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

fn empty_context() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}
