use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::{credit_type_routes, transaction_routes, wallet_routes};
use crate::use_cases::{
    create_credit_type::CreateCreditTypeUseCase, create_wallet::CreateWalletUseCase,
    delete_credit_type::DeleteCreditTypeUseCase, delete_wallet::DeleteWalletUseCase,
    get_credit_type::GetCreditTypeUseCase, get_transaction::GetTransactionUseCase,
    get_wallet::GetWalletUseCase, list_credit_types::ListCreditTypesUseCase,
    list_transactions::ListTransactionsUseCase, list_wallets::ListWalletsUseCase,
    process_transaction::ProcessTransactionUseCase, update_credit_type::UpdateCreditTypeUseCase,
    update_wallet::UpdateWalletUseCase,
};

// Estado compartido de la aplicación: un caso de uso por operación expuesta.
pub struct AppState {
    pub create_wallet_use_case: CreateWalletUseCase,
    pub get_wallet_use_case: GetWalletUseCase,
    pub list_wallets_use_case: ListWalletsUseCase,
    pub update_wallet_use_case: UpdateWalletUseCase,
    pub delete_wallet_use_case: DeleteWalletUseCase,
    pub create_credit_type_use_case: CreateCreditTypeUseCase,
    pub get_credit_type_use_case: GetCreditTypeUseCase,
    pub list_credit_types_use_case: ListCreditTypesUseCase,
    pub update_credit_type_use_case: UpdateCreditTypeUseCase,
    pub delete_credit_type_use_case: DeleteCreditTypeUseCase,
    pub process_transaction_use_case: ProcessTransactionUseCase,
    pub get_transaction_use_case: GetTransactionUseCase,
    pub list_transactions_use_case: ListTransactionsUseCase,
}

// Definición de rutas para la API HTTP
pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/wallets",
            post(wallet_routes::create_wallet).get(wallet_routes::list_wallets),
        )
        .route(
            "/wallets/{wallet_id}",
            get(wallet_routes::get_wallet)
                .put(wallet_routes::update_wallet)
                .delete(wallet_routes::delete_wallet),
        )
        .route(
            "/wallets/{wallet_id}/deposit",
            post(transaction_routes::create_deposit_transaction),
        )
        .route(
            "/wallets/{wallet_id}/debit",
            post(transaction_routes::create_debit_transaction),
        )
        .route(
            "/wallets/{wallet_id}/hold",
            post(transaction_routes::create_hold_transaction),
        )
        .route(
            "/wallets/{wallet_id}/release",
            post(transaction_routes::create_release_transaction),
        )
        .route(
            "/wallets/{wallet_id}/adjust",
            post(transaction_routes::create_adjust_transaction),
        )
        .route(
            "/credit-types",
            post(credit_type_routes::create_credit_type)
                .get(credit_type_routes::list_credit_types),
        )
        .route(
            "/credit-types/{credit_type_id}",
            get(credit_type_routes::get_credit_type)
                .put(credit_type_routes::update_credit_type)
                .delete(credit_type_routes::delete_credit_type),
        )
        .route(
            "/transactions",
            get(transaction_routes::list_transactions),
        )
        .route(
            "/transactions/{transaction_id}",
            get(transaction_routes::get_transaction),
        )
        .with_state(state) // Inyectamos el estado (Casos de Uso)
}
