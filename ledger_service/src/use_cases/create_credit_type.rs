use crate::domain::{
    entities::CreditType, error::LedgerError, repository::CreditTypeRepository,
};
use std::sync::Arc;

/// Caso de uso para registrar un tipo de crédito nuevo (nombre único).
pub struct CreateCreditTypeUseCase {
    credit_type_repo: Arc<dyn CreditTypeRepository>,
}

impl CreateCreditTypeUseCase {
    pub fn new(credit_type_repo: Arc<dyn CreditTypeRepository>) -> Self {
        Self { credit_type_repo }
    }

    #[tracing::instrument(name = "CreateCreditTypeUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        name: String,
        description: String,
    ) -> Result<CreditType, LedgerError> {
        let credit_type = CreditType::new(name, description)?;
        self.credit_type_repo.create(credit_type).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::MockCreditTypeRepository;

    #[tokio::test]
    async fn test_create_credit_type_success() {
        let mut mock_repo = MockCreditTypeRepository::new();
        mock_repo.expect_create().times(1).returning(Ok);

        let use_case = CreateCreditTypeUseCase::new(Arc::new(mock_repo));
        let result = use_case
            .execute("POINTS".to_string(), "reward points".to_string())
            .await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().name, "POINTS");
    }

    #[tokio::test]
    async fn test_create_credit_type_duplicate_name() {
        let mut mock_repo = MockCreditTypeRepository::new();
        mock_repo
            .expect_create()
            .returning(|ct| Err(LedgerError::CreditTypeNameTaken(ct.name)));

        let use_case = CreateCreditTypeUseCase::new(Arc::new(mock_repo));
        let result = use_case
            .execute("POINTS".to_string(), String::new())
            .await;

        assert!(matches!(
            result,
            Err(LedgerError::CreditTypeNameTaken(name)) if name == "POINTS"
        ));
    }
}
