use crate::domain::{
    entities::CreditType,
    error::LedgerError,
    pagination::{Page, PaginationRequest},
    repository::CreditTypeRepository,
};
use std::sync::Arc;

/// Caso de uso para listar los tipos de crédito registrados.
#[derive(Clone)]
pub struct ListCreditTypesUseCase {
    credit_type_repo: Arc<dyn CreditTypeRepository>,
}

impl ListCreditTypesUseCase {
    pub fn new(credit_type_repo: Arc<dyn CreditTypeRepository>) -> Self {
        Self { credit_type_repo }
    }

    #[tracing::instrument(name = "ListCreditTypesUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        pagination: PaginationRequest,
    ) -> Result<Page<CreditType>, LedgerError> {
        let (credit_types, total_count) = self.credit_type_repo.list(pagination).await?;
        Ok(Page::new(&pagination, total_count, credit_types))
    }
}
