use crate::domain::{
    error::LedgerError, repository::CreditTypeRepository, types::CreditTypeId,
};
use std::sync::Arc;

/// Caso de uso para eliminar un tipo de crédito.
#[derive(Clone)]
pub struct DeleteCreditTypeUseCase {
    credit_type_repo: Arc<dyn CreditTypeRepository>,
}

impl DeleteCreditTypeUseCase {
    pub fn new(credit_type_repo: Arc<dyn CreditTypeRepository>) -> Self {
        Self { credit_type_repo }
    }

    #[tracing::instrument(name = "DeleteCreditTypeUseCase::execute", skip(self))]
    pub async fn execute(&self, id: &CreditTypeId) -> Result<(), LedgerError> {
        if !self.credit_type_repo.delete(id).await? {
            return Err(LedgerError::CreditTypeNotFound(id.clone()));
        }
        Ok(())
    }
}
