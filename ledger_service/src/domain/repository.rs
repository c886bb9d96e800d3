use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{CreditType, Wallet, WalletStatus, WalletWithBalances};
use crate::domain::error::LedgerError;
use crate::domain::pagination::{Page, PaginationRequest};
use crate::domain::transactions::{
    Transaction, TransactionRequest, TransactionStatus, TransactionType,
};
use crate::domain::types::{CreditTypeId, TransactionId, WalletId};

/// Campos mutables de una billetera; `None` significa "sin cambio".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalletUpdate {
    pub name: Option<String>,
    pub context: Option<serde_json::Value>,
    pub status: Option<WalletStatus>,
}

/// Campos mutables de un tipo de crédito.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreditTypeUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Filtros del listado de transacciones (superficie de lectura).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub wallet_id: Option<WalletId>,
    pub credit_type_id: Option<CreditTypeId>,
    pub external_id: Option<String>,
    pub transaction_type: Option<TransactionType>,
    pub status: Option<TransactionStatus>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

// Port for Wallet persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletRepository: Send + Sync {
    async fn create(&self, wallet: Wallet) -> Result<Wallet, LedgerError>;
    async fn find_by_id(&self, id: &WalletId) -> Result<Option<Wallet>, LedgerError>;
    async fn find_with_balances(
        &self,
        id: &WalletId,
    ) -> Result<Option<WalletWithBalances>, LedgerError>;
    async fn list(
        &self,
        name: Option<String>,
        pagination: PaginationRequest,
    ) -> Result<(Vec<Wallet>, i64), LedgerError>;
    async fn update(
        &self,
        id: &WalletId,
        update: WalletUpdate,
    ) -> Result<Option<Wallet>, LedgerError>;
    async fn delete(&self, id: &WalletId) -> Result<bool, LedgerError>;
    /// Indica si la billetera todavía tiene filas de balance asociadas.
    async fn has_balances(&self, id: &WalletId) -> Result<bool, LedgerError>;
}

// Port for CreditType persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CreditTypeRepository: Send + Sync {
    async fn create(&self, credit_type: CreditType) -> Result<CreditType, LedgerError>;
    async fn find_by_id(&self, id: &CreditTypeId) -> Result<Option<CreditType>, LedgerError>;
    async fn list(
        &self,
        pagination: PaginationRequest,
    ) -> Result<(Vec<CreditType>, i64), LedgerError>;
    async fn update(
        &self,
        id: &CreditTypeId,
        update: CreditTypeUpdate,
    ) -> Result<Option<CreditType>, LedgerError>;
    async fn delete(&self, id: &CreditTypeId) -> Result<bool, LedgerError>;
}

// Port for the transaction log (operaciones a nivel de pool; las mutaciones
// que deben commitear junto al balance viven en la capa de persistencia y
// reciben la transacción de BD abierta).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Inserta la fila PENDING. Un `external_id` repetido para la misma
    /// billetera debe fallar con `DuplicateTransaction`.
    async fn create_pending(
        &self,
        wallet_id: &WalletId,
        request: &TransactionRequest,
    ) -> Result<Transaction, LedgerError>;
    async fn find_by_id(&self, id: &TransactionId) -> Result<Option<Transaction>, LedgerError>;
    /// Marca la fila como FAILED (best-effort desde el orquestador).
    async fn mark_failed(&self, id: &TransactionId) -> Result<(), LedgerError>;
    async fn list(
        &self,
        filter: TransactionFilter,
        pagination: PaginationRequest,
    ) -> Result<Page<Transaction>, LedgerError>;
}
