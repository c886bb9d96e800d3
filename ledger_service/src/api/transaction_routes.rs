use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::api::error::ApiError;
use crate::api::routes::AppState;
use crate::domain::error::LedgerError;
use crate::domain::pagination::{Page, PaginationRequest};
use crate::domain::repository::TransactionFilter;
use crate::domain::transactions::{
    Transaction, TransactionPayload, TransactionRequest, TransactionStatus, TransactionType,
};
use crate::domain::types::{CreditTypeId, TransactionId, WalletId};

// DTO de entrada compartido por los cinco endpoints transaccionales.
// El payload viene discriminado por "type"; cada endpoint valida que la
// variante corresponda a su operación.
#[derive(Deserialize, ToSchema)]
pub struct TransactionRequestDto {
    pub credit_type_id: String,
    pub description: String,
    pub issuer: String,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub context: Option<serde_json::Value>,
    #[serde(default)]
    pub subscription_id: Option<String>,
    #[schema(value_type = Object)]
    pub payload: TransactionPayload,
}

impl TransactionRequestDto {
    fn into_domain(self) -> TransactionRequest {
        TransactionRequest {
            credit_type_id: CreditTypeId(self.credit_type_id),
            description: self.description,
            issuer: self.issuer,
            external_id: self.external_id,
            context: self
                .context
                .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new())),
            subscription_id: self.subscription_id,
            payload: self.payload,
        }
    }
}

// Filtros del listado del log
#[derive(Deserialize)]
pub struct ListTransactionsQuery {
    pub wallet_id: Option<String>,
    pub credit_type_id: Option<String>,
    pub external_id: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub status: Option<TransactionStatus>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Un payload de la clase equivocada en un endpoint es error de entrada, no
/// de negocio: se rechaza con 422 antes de llegar al orquestador.
fn ensure_payload_kind(
    payload: &TransactionPayload,
    expected: TransactionType,
) -> Result<(), LedgerError> {
    if payload.transaction_type() != expected {
        return Err(LedgerError::InvalidInput(format!(
            "payload type does not match the {:?} operation",
            expected
        )));
    }
    Ok(())
}

async fn run_transaction(
    state: &AppState,
    wallet_id: String,
    body: TransactionRequestDto,
    expected: TransactionType,
) -> Result<Json<Transaction>, ApiError> {
    let request = body.into_domain();
    ensure_payload_kind(&request.payload, expected)?;
    let transaction = state
        .process_transaction_use_case
        .execute(&WalletId(wallet_id), request)
        .await?;
    Ok(Json(transaction))
}

// Handler: Depositar créditos en una billetera
// POST /wallets/{wallet_id}/deposit
#[utoipa::path(
    post,
    path = "/wallets/{wallet_id}/deposit",
    params(("wallet_id" = String, Path, description = "Wallet ID")),
    request_body = TransactionRequestDto,
    responses(
        (status = 200, description = "Completed deposit transaction"),
        (status = 404, description = "Wallet not found"),
        (status = 409, description = "Duplicate external ID or busy balance"),
        (status = 422, description = "Invalid input")
    )
)]
pub async fn create_deposit_transaction(
    State(state): State<Arc<AppState>>,
    Path(wallet_id): Path<String>,
    Json(body): Json<TransactionRequestDto>,
) -> Result<Json<Transaction>, ApiError> {
    run_transaction(&state, wallet_id, body, TransactionType::Deposit).await
}

// Handler: Debitar créditos (directo o contra un hold)
// POST /wallets/{wallet_id}/debit
#[utoipa::path(
    post,
    path = "/wallets/{wallet_id}/debit",
    params(("wallet_id" = String, Path, description = "Wallet ID")),
    request_body = TransactionRequestDto,
    responses(
        (status = 200, description = "Completed debit transaction"),
        (status = 402, description = "Insufficient balance or debit exceeds hold"),
        (status = 404, description = "Wallet, balance or hold not found")
    )
)]
pub async fn create_debit_transaction(
    State(state): State<Arc<AppState>>,
    Path(wallet_id): Path<String>,
    Json(body): Json<TransactionRequestDto>,
) -> Result<Json<Transaction>, ApiError> {
    run_transaction(&state, wallet_id, body, TransactionType::Debit).await
}

// Handler: Reservar créditos
// POST /wallets/{wallet_id}/hold
#[utoipa::path(
    post,
    path = "/wallets/{wallet_id}/hold",
    params(("wallet_id" = String, Path, description = "Wallet ID")),
    request_body = TransactionRequestDto,
    responses(
        (status = 200, description = "Completed hold transaction"),
        (status = 402, description = "Insufficient balance"),
        (status = 404, description = "Wallet or balance not found")
    )
)]
pub async fn create_hold_transaction(
    State(state): State<Arc<AppState>>,
    Path(wallet_id): Path<String>,
    Json(body): Json<TransactionRequestDto>,
) -> Result<Json<Transaction>, ApiError> {
    run_transaction(&state, wallet_id, body, TransactionType::Hold).await
}

// Handler: Liberar un hold sin consumirlo
// POST /wallets/{wallet_id}/release
#[utoipa::path(
    post,
    path = "/wallets/{wallet_id}/release",
    params(("wallet_id" = String, Path, description = "Wallet ID")),
    request_body = TransactionRequestDto,
    responses(
        (status = 200, description = "Completed release transaction"),
        (status = 400, description = "Hold is not in held state"),
        (status = 404, description = "Wallet or hold not found")
    )
)]
pub async fn create_release_transaction(
    State(state): State<Arc<AppState>>,
    Path(wallet_id): Path<String>,
    Json(body): Json<TransactionRequestDto>,
) -> Result<Json<Transaction>, ApiError> {
    run_transaction(&state, wallet_id, body, TransactionType::Release).await
}

// Handler: Ajuste administrativo del balance
// POST /wallets/{wallet_id}/adjust
#[utoipa::path(
    post,
    path = "/wallets/{wallet_id}/adjust",
    params(("wallet_id" = String, Path, description = "Wallet ID")),
    request_body = TransactionRequestDto,
    responses(
        (status = 200, description = "Completed adjust transaction"),
        (status = 402, description = "Adjust targeted a negative balance"),
        (status = 404, description = "Wallet or balance not found")
    )
)]
pub async fn create_adjust_transaction(
    State(state): State<Arc<AppState>>,
    Path(wallet_id): Path<String>,
    Json(body): Json<TransactionRequestDto>,
) -> Result<Json<Transaction>, ApiError> {
    run_transaction(&state, wallet_id, body, TransactionType::Adjust).await
}

// Handler: Detalle de una transacción del log
// GET /transactions/{transaction_id}
#[utoipa::path(
    get,
    path = "/transactions/{transaction_id}",
    params(("transaction_id" = String, Path, description = "Transaction ID")),
    responses(
        (status = 200, description = "Transaction detail"),
        (status = 404, description = "Transaction not found")
    )
)]
pub async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Path(transaction_id): Path<String>,
) -> Result<Json<Transaction>, ApiError> {
    let transaction = state
        .get_transaction_use_case
        .execute(&TransactionId(transaction_id))
        .await?;
    Ok(Json(transaction))
}

// Handler: Listado filtrado del log de transacciones
// GET /transactions
#[utoipa::path(
    get,
    path = "/transactions",
    responses((status = 200, description = "Paginated transaction list"))
)]
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListTransactionsQuery>,
) -> Result<Json<Page<Transaction>>, ApiError> {
    let pagination = PaginationRequest::new(query.page, query.page_size);
    let filter = TransactionFilter {
        wallet_id: query.wallet_id.map(WalletId),
        credit_type_id: query.credit_type_id.map(CreditTypeId),
        external_id: query.external_id,
        transaction_type: query.transaction_type,
        status: query.status,
        start_date: query.start_date,
        end_date: query.end_date,
    };
    let page = state
        .list_transactions_use_case
        .execute(filter, pagination)
        .await?;
    Ok(Json(page))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_payload_kind_mismatch_is_invalid_input() {
        let payload = TransactionPayload::Debit {
            amount: Decimal::from(10),
            hold_transaction_id: None,
        };
        let result = ensure_payload_kind(&payload, TransactionType::Deposit);
        assert!(matches!(result, Err(LedgerError::InvalidInput(_))));
    }

    #[test]
    fn test_payload_kind_match_passes() {
        let payload = TransactionPayload::Hold {
            amount: Decimal::from(30),
        };
        assert!(ensure_payload_kind(&payload, TransactionType::Hold).is_ok());
    }

    #[test]
    fn test_dto_defaults_context_to_empty_object() {
        let dto: TransactionRequestDto = serde_json::from_value(serde_json::json!({
            "credit_type_id": "ct",
            "description": "d",
            "issuer": "tests",
            "payload": {"type": "deposit", "amount": "100"}
        }))
        .unwrap();

        let request = dto.into_domain();
        assert_eq!(request.context, serde_json::json!({}));
        assert_eq!(
            request.payload,
            TransactionPayload::Deposit {
                amount: Decimal::from(100)
            }
        );
    }
}
