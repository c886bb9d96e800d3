use crate::domain::{
    error::LedgerError,
    pagination::{Page, PaginationRequest},
    repository::{TransactionFilter, TransactionRepository},
    transactions::Transaction,
};
use std::sync::Arc;

/// Caso de uso para el listado filtrado del log de transacciones.
///
/// Devuelve también filas PENDING y FAILED: el log es la fuente de verdad
/// completa y quien quiera solo efectos aplicados filtra por
/// status=completed.
#[derive(Clone)]
pub struct ListTransactionsUseCase {
    transaction_repo: Arc<dyn TransactionRepository>,
}

impl ListTransactionsUseCase {
    pub fn new(transaction_repo: Arc<dyn TransactionRepository>) -> Self {
        Self { transaction_repo }
    }

    #[tracing::instrument(name = "ListTransactionsUseCase::execute", skip(self, filter))]
    pub async fn execute(
        &self,
        filter: TransactionFilter,
        pagination: PaginationRequest,
    ) -> Result<Page<Transaction>, LedgerError> {
        self.transaction_repo.list(filter, pagination).await
    }
}
