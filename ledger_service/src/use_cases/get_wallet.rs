use crate::domain::{
    entities::WalletWithBalances, error::LedgerError, repository::WalletRepository,
    types::WalletId,
};
use std::sync::Arc;

/// Caso de uso para obtener una billetera con sus balances.
///
/// Es una lectura pura: no toma el mutex de escritura, así que puede observar
/// holds a mitad de vida y filas PENDING en el log. Eso es aceptable por
/// contrato.
#[derive(Clone)]
pub struct GetWalletUseCase {
    wallet_repo: Arc<dyn WalletRepository>,
}

impl GetWalletUseCase {
    pub fn new(wallet_repo: Arc<dyn WalletRepository>) -> Self {
        Self { wallet_repo }
    }

    #[tracing::instrument(name = "GetWalletUseCase::execute", skip(self))]
    pub async fn execute(&self, wallet_id: &WalletId) -> Result<WalletWithBalances, LedgerError> {
        self.wallet_repo
            .find_with_balances(wallet_id)
            .await?
            .ok_or_else(|| LedgerError::WalletNotFound(wallet_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Wallet;
    use crate::domain::repository::MockWalletRepository;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_wallet_returns_balances() {
        let mut mock_repo = MockWalletRepository::new();
        mock_repo.expect_find_with_balances().returning(|id| {
            let mut wallet = Wallet::new("agents".to_string(), json!({})).unwrap();
            wallet.id = id.clone();
            Ok(Some(WalletWithBalances {
                wallet,
                balances: vec![],
            }))
        });

        let use_case = GetWalletUseCase::new(Arc::new(mock_repo));
        let result = use_case.execute(&WalletId("w".to_string())).await;

        assert!(result.is_ok());
        let wallet = result.unwrap();
        assert_eq!(wallet.wallet.id, WalletId("w".to_string()));
        assert!(wallet.balances.is_empty());
    }

    #[tokio::test]
    async fn test_get_wallet_not_found() {
        let mut mock_repo = MockWalletRepository::new();
        mock_repo.expect_find_with_balances().returning(|_| Ok(None));

        let use_case = GetWalletUseCase::new(Arc::new(mock_repo));
        let result = use_case.execute(&WalletId("missing".to_string())).await;

        assert!(matches!(result, Err(LedgerError::WalletNotFound(_))));
    }
}
