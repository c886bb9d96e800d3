use crate::domain::{
    entities::Wallet,
    error::LedgerError,
    repository::{WalletRepository, WalletUpdate},
    types::WalletId,
};
use std::sync::Arc;

/// Caso de uso para la actualización parcial de una billetera.
#[derive(Clone)]
pub struct UpdateWalletUseCase {
    wallet_repo: Arc<dyn WalletRepository>,
}

impl UpdateWalletUseCase {
    pub fn new(wallet_repo: Arc<dyn WalletRepository>) -> Self {
        Self { wallet_repo }
    }

    #[tracing::instrument(name = "UpdateWalletUseCase::execute", skip(self, update))]
    pub async fn execute(
        &self,
        wallet_id: &WalletId,
        update: WalletUpdate,
    ) -> Result<Wallet, LedgerError> {
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(LedgerError::InvalidInput(
                    "Wallet name cannot be empty".to_string(),
                ));
            }
        }

        self.wallet_repo
            .update(wallet_id, update)
            .await?
            .ok_or_else(|| LedgerError::WalletNotFound(wallet_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::WalletStatus;
    use crate::domain::repository::MockWalletRepository;
    use serde_json::json;

    #[tokio::test]
    async fn test_update_wallet_applies_changes() {
        let mut mock_repo = MockWalletRepository::new();
        mock_repo.expect_update().returning(|id, update| {
            let mut wallet = Wallet::new("before".to_string(), json!({})).unwrap();
            wallet.id = id.clone();
            if let Some(name) = update.name {
                wallet.name = name;
            }
            if let Some(status) = update.status {
                wallet.status = status;
            }
            Ok(Some(wallet))
        });

        let use_case = UpdateWalletUseCase::new(Arc::new(mock_repo));
        let result = use_case
            .execute(
                &WalletId("w".to_string()),
                WalletUpdate {
                    name: Some("after".to_string()),
                    context: None,
                    status: Some(WalletStatus::Inactive),
                },
            )
            .await
            .unwrap();

        assert_eq!(result.name, "after");
        assert_eq!(result.status, WalletStatus::Inactive);
    }

    #[tokio::test]
    async fn test_update_wallet_not_found() {
        let mut mock_repo = MockWalletRepository::new();
        mock_repo.expect_update().returning(|_, _| Ok(None));

        let use_case = UpdateWalletUseCase::new(Arc::new(mock_repo));
        let result = use_case
            .execute(&WalletId("missing".to_string()), WalletUpdate::default())
            .await;

        assert!(matches!(result, Err(LedgerError::WalletNotFound(_))));
    }

    #[tokio::test]
    async fn test_update_wallet_rejects_blank_name() {
        let use_case = UpdateWalletUseCase::new(Arc::new(MockWalletRepository::new()));
        let result = use_case
            .execute(
                &WalletId("w".to_string()),
                WalletUpdate {
                    name: Some(String::new()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(LedgerError::InvalidInput(_))));
    }
}
