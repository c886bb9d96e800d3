use crate::domain::{error::LedgerError, repository::WalletRepository, types::WalletId};
use std::sync::Arc;

/// Caso de uso para eliminar una billetera.
///
/// Política: una billetera con filas de balance no se elimina; primero hay
/// que drenar/ajustar los créditos. El log de transacciones no se toca nunca.
#[derive(Clone)]
pub struct DeleteWalletUseCase {
    wallet_repo: Arc<dyn WalletRepository>,
}

impl DeleteWalletUseCase {
    pub fn new(wallet_repo: Arc<dyn WalletRepository>) -> Self {
        Self { wallet_repo }
    }

    #[tracing::instrument(name = "DeleteWalletUseCase::execute", skip(self))]
    pub async fn execute(&self, wallet_id: &WalletId) -> Result<(), LedgerError> {
        if self.wallet_repo.has_balances(wallet_id).await? {
            return Err(LedgerError::WalletHasBalances(wallet_id.clone()));
        }

        if !self.wallet_repo.delete(wallet_id).await? {
            return Err(LedgerError::WalletNotFound(wallet_id.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::MockWalletRepository;

    #[tokio::test]
    async fn test_delete_wallet_success() {
        let mut mock_repo = MockWalletRepository::new();
        mock_repo.expect_has_balances().returning(|_| Ok(false));
        mock_repo.expect_delete().times(1).returning(|_| Ok(true));

        let use_case = DeleteWalletUseCase::new(Arc::new(mock_repo));
        assert!(use_case.execute(&WalletId("w".to_string())).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_wallet_with_balances_is_refused() {
        let mut mock_repo = MockWalletRepository::new();
        mock_repo.expect_has_balances().returning(|_| Ok(true));
        // expect_delete sin configurar: si se llamara, el mock entra en pánico.

        let use_case = DeleteWalletUseCase::new(Arc::new(mock_repo));
        let result = use_case.execute(&WalletId("w".to_string())).await;

        assert!(matches!(result, Err(LedgerError::WalletHasBalances(_))));
    }

    #[tokio::test]
    async fn test_delete_wallet_not_found() {
        let mut mock_repo = MockWalletRepository::new();
        mock_repo.expect_has_balances().returning(|_| Ok(false));
        mock_repo.expect_delete().returning(|_| Ok(false));

        let use_case = DeleteWalletUseCase::new(Arc::new(mock_repo));
        let result = use_case.execute(&WalletId("missing".to_string())).await;

        assert!(matches!(result, Err(LedgerError::WalletNotFound(_))));
    }
}
