use crate::domain::types::{CreditTypeId, TransactionId, WalletId};
use thiserror::Error;

/// Taxonomía de errores del ledger.
///
/// Cada variante corresponde a una condición de negocio concreta; la capa API
/// es la única que las traduce a códigos HTTP.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Wallet not found with ID: {0}")]
    WalletNotFound(WalletId),

    #[error("Credit type not found with ID: {0}")]
    CreditTypeNotFound(CreditTypeId),

    #[error("Credit type already exists with name: {0}")]
    CreditTypeNameTaken(String),

    #[error("Transaction not found with ID: {0}")]
    TransactionNotFound(TransactionId),

    #[error("Balance not found for wallet {wallet_id} and credit type {credit_type_id}")]
    BalanceNotFound {
        wallet_id: WalletId,
        credit_type_id: CreditTypeId,
    },

    #[error("Hold transaction not found with ID: {0}")]
    HoldNotFound(TransactionId),

    #[error("Hold transaction {0} is not in held state")]
    HoldNotHeld(TransactionId),

    #[error("Requested debit amount exceeds the held amount")]
    HoldAmountExceeds,

    #[error("Insufficient balance")]
    InsufficientBalance,

    #[error("Transaction with external ID '{0}' already exists for this wallet")]
    DuplicateTransaction(String),

    #[error("Wallet {0} still has balances")]
    WalletHasBalances(WalletId),

    #[error("Balance write lock acquisition timed out")]
    Busy,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
