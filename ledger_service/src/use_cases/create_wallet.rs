use crate::domain::{entities::Wallet, error::LedgerError, repository::WalletRepository};
use std::sync::Arc;

/// Caso de uso que gestiona la creación de una billetera.
pub struct CreateWalletUseCase {
    wallet_repo: Arc<dyn WalletRepository>,
}

impl CreateWalletUseCase {
    pub fn new(wallet_repo: Arc<dyn WalletRepository>) -> Self {
        Self { wallet_repo }
    }

    /// Valida los datos básicos y persiste la billetera nueva (nace activa y
    /// sin balances: el primer depósito crea la fila de balance).
    #[tracing::instrument(name = "CreateWalletUseCase::execute", skip(self, context))]
    pub async fn execute(
        &self,
        name: String,
        context: serde_json::Value,
    ) -> Result<Wallet, LedgerError> {
        let wallet = Wallet::new(name, context)?;
        self.wallet_repo.create(wallet).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::MockWalletRepository;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_wallet_success() {
        let mut mock_repo = MockWalletRepository::new();
        mock_repo.expect_create().times(1).returning(Ok);

        let use_case = CreateWalletUseCase::new(Arc::new(mock_repo));
        let result = use_case
            .execute("agents".to_string(), json!({"team": "ml"}))
            .await;

        assert!(result.is_ok());
        let wallet = result.unwrap();
        assert_eq!(wallet.name, "agents");
        assert_eq!(wallet.context["team"], "ml");
    }

    #[tokio::test]
    async fn test_create_wallet_rejects_blank_name() {
        // El repositorio no debe ser tocado si la validación falla.
        let mock_repo = MockWalletRepository::new();

        let use_case = CreateWalletUseCase::new(Arc::new(mock_repo));
        let result = use_case.execute("  ".to_string(), json!({})).await;

        assert!(matches!(result, Err(LedgerError::InvalidInput(_))));
    }
}
