use crate::domain::{
    entities::CreditType,
    error::LedgerError,
    repository::{CreditTypeRepository, CreditTypeUpdate},
    types::CreditTypeId,
};
use std::sync::Arc;

/// Caso de uso para la actualización parcial de un tipo de crédito.
#[derive(Clone)]
pub struct UpdateCreditTypeUseCase {
    credit_type_repo: Arc<dyn CreditTypeRepository>,
}

impl UpdateCreditTypeUseCase {
    pub fn new(credit_type_repo: Arc<dyn CreditTypeRepository>) -> Self {
        Self { credit_type_repo }
    }

    #[tracing::instrument(name = "UpdateCreditTypeUseCase::execute", skip(self, update))]
    pub async fn execute(
        &self,
        id: &CreditTypeId,
        update: CreditTypeUpdate,
    ) -> Result<CreditType, LedgerError> {
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(LedgerError::InvalidInput(
                    "Credit type name cannot be empty".to_string(),
                ));
            }
        }

        self.credit_type_repo
            .update(id, update)
            .await?
            .ok_or_else(|| LedgerError::CreditTypeNotFound(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::MockCreditTypeRepository;

    #[tokio::test]
    async fn test_update_credit_type_not_found() {
        let mut mock_repo = MockCreditTypeRepository::new();
        mock_repo.expect_update().returning(|_, _| Ok(None));

        let use_case = UpdateCreditTypeUseCase::new(Arc::new(mock_repo));
        let result = use_case
            .execute(
                &CreditTypeId("missing".to_string()),
                CreditTypeUpdate::default(),
            )
            .await;

        assert!(matches!(result, Err(LedgerError::CreditTypeNotFound(_))));
    }
}
