use crate::domain::{
    entities::CreditType, error::LedgerError, repository::CreditTypeRepository,
    types::CreditTypeId,
};
use std::sync::Arc;

/// Caso de uso para consultar un tipo de crédito por ID.
#[derive(Clone)]
pub struct GetCreditTypeUseCase {
    credit_type_repo: Arc<dyn CreditTypeRepository>,
}

impl GetCreditTypeUseCase {
    pub fn new(credit_type_repo: Arc<dyn CreditTypeRepository>) -> Self {
        Self { credit_type_repo }
    }

    #[tracing::instrument(name = "GetCreditTypeUseCase::execute", skip(self))]
    pub async fn execute(&self, id: &CreditTypeId) -> Result<CreditType, LedgerError> {
        self.credit_type_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| LedgerError::CreditTypeNotFound(id.clone()))
    }
}
