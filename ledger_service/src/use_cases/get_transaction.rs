use crate::domain::{
    error::LedgerError, repository::TransactionRepository, transactions::Transaction,
    types::TransactionId,
};
use std::sync::Arc;

/// Caso de uso para consultar una transacción del log por ID.
#[derive(Clone)]
pub struct GetTransactionUseCase {
    transaction_repo: Arc<dyn TransactionRepository>,
}

impl GetTransactionUseCase {
    pub fn new(transaction_repo: Arc<dyn TransactionRepository>) -> Self {
        Self { transaction_repo }
    }

    #[tracing::instrument(name = "GetTransactionUseCase::execute", skip(self))]
    pub async fn execute(&self, id: &TransactionId) -> Result<Transaction, LedgerError> {
        self.transaction_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| LedgerError::TransactionNotFound(id.clone()))
    }
}
