use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::error::LedgerError;

// Definimos un error unificado para la API del ledger
pub struct ApiError(pub LedgerError);

// Permitimos convertir errores de dominio al ApiError implícitamente
impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self.0 {
            LedgerError::WalletNotFound(_)
            | LedgerError::CreditTypeNotFound(_)
            | LedgerError::TransactionNotFound(_)
            | LedgerError::BalanceNotFound { .. }
            | LedgerError::HoldNotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),

            LedgerError::HoldNotHeld(_) | LedgerError::WalletHasBalances(_) => {
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }

            LedgerError::HoldAmountExceeds | LedgerError::InsufficientBalance => {
                (StatusCode::PAYMENT_REQUIRED, self.0.to_string())
            }

            LedgerError::DuplicateTransaction(_)
            | LedgerError::CreditTypeNameTaken(_)
            | LedgerError::Busy => (StatusCode::CONFLICT, self.0.to_string()),

            LedgerError::InvalidInput(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.0.to_string())
            }

            LedgerError::RepositoryError(detail) | LedgerError::Internal(detail) => {
                tracing::error!("Internal ledger error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "status": "error",
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{CreditTypeId, TransactionId, WalletId};
    use rstest::rstest;

    #[rstest]
    #[case(LedgerError::WalletNotFound(WalletId("w".to_string())), StatusCode::NOT_FOUND)]
    #[case(
        LedgerError::BalanceNotFound {
            wallet_id: WalletId("w".to_string()),
            credit_type_id: CreditTypeId("ct".to_string()),
        },
        StatusCode::NOT_FOUND
    )]
    #[case(LedgerError::HoldNotFound(TransactionId("h".to_string())), StatusCode::NOT_FOUND)]
    #[case(LedgerError::HoldNotHeld(TransactionId("h".to_string())), StatusCode::BAD_REQUEST)]
    #[case(LedgerError::HoldAmountExceeds, StatusCode::PAYMENT_REQUIRED)]
    #[case(LedgerError::InsufficientBalance, StatusCode::PAYMENT_REQUIRED)]
    #[case(LedgerError::DuplicateTransaction("X".to_string()), StatusCode::CONFLICT)]
    #[case(LedgerError::Busy, StatusCode::CONFLICT)]
    #[case(LedgerError::InvalidInput("bad".to_string()), StatusCode::UNPROCESSABLE_ENTITY)]
    #[case(LedgerError::RepositoryError("db".to_string()), StatusCode::INTERNAL_SERVER_ERROR)]
    fn test_error_taxonomy_maps_to_http_status(
        #[case] error: LedgerError,
        #[case] expected: StatusCode,
    ) {
        let response = ApiError(error).into_response();
        assert_eq!(response.status(), expected);
    }

    #[test]
    fn test_internal_detail_is_not_echoed() {
        let response =
            ApiError(LedgerError::RepositoryError("password=hunter2".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
