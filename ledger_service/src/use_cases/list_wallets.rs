use crate::domain::{
    entities::Wallet,
    error::LedgerError,
    pagination::{Page, PaginationRequest},
    repository::WalletRepository,
};
use std::sync::Arc;

/// Caso de uso para listar billeteras con paginación y filtro por nombre.
///
/// El listado no junta balances (eso es costo por fila); la vista detallada
/// de `GetWalletUseCase` sí lo hace.
#[derive(Clone)]
pub struct ListWalletsUseCase {
    wallet_repo: Arc<dyn WalletRepository>,
}

impl ListWalletsUseCase {
    pub fn new(wallet_repo: Arc<dyn WalletRepository>) -> Self {
        Self { wallet_repo }
    }

    #[tracing::instrument(name = "ListWalletsUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        name: Option<String>,
        pagination: PaginationRequest,
    ) -> Result<Page<Wallet>, LedgerError> {
        let (wallets, total_count) = self.wallet_repo.list(name, pagination).await?;
        Ok(Page::new(&pagination, total_count, wallets))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::MockWalletRepository;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_wallets_wraps_page_metadata() {
        let mut mock_repo = MockWalletRepository::new();
        mock_repo.expect_list().returning(|_, _| {
            let wallet = Wallet::new("agents".to_string(), json!({})).unwrap();
            Ok((vec![wallet], 12))
        });

        let use_case = ListWalletsUseCase::new(Arc::new(mock_repo));
        let page = use_case
            .execute(None, PaginationRequest::new(Some(2), Some(1)))
            .await
            .unwrap();

        assert_eq!(page.page, 2);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.total_count, 12);
        assert_eq!(page.data.len(), 1);
    }
}
