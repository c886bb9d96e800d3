use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::entities::{Wallet, WalletWithBalances};
use crate::domain::error::LedgerError;
use crate::domain::pagination::PaginationRequest;
use crate::domain::repository::{WalletRepository, WalletUpdate};
use crate::domain::types::WalletId;
use crate::infrastructure::persistence::models::{BalanceModel, WalletModel};

/// Repositorio de Billeteras basado en PostgreSQL.
pub struct PostgresWalletRepository {
    pool: PgPool,
}

impl PostgresWalletRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WalletRepository for PostgresWalletRepository {
    /// Crea una nueva billetera.
    async fn create(&self, wallet: Wallet) -> Result<Wallet, LedgerError> {
        let model = sqlx::query_as::<_, WalletModel>(
            r#"
            INSERT INTO wallets (id, name, context, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&wallet.id)
        .bind(&wallet.name)
        .bind(wallet.context.clone())
        .bind(wallet.status)
        .bind(wallet.created_at)
        .bind(wallet.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| LedgerError::RepositoryError(e.to_string()))?;

        Ok(model.into())
    }

    /// Busca una billetera por su ID.
    async fn find_by_id(&self, id: &WalletId) -> Result<Option<Wallet>, LedgerError> {
        let model = sqlx::query_as::<_, WalletModel>(r#"SELECT * FROM wallets WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| LedgerError::RepositoryError(e.to_string()))?;

        Ok(model.map(Into::into))
    }

    /// Busca una billetera y junta sus balances (vista de la API).
    async fn find_with_balances(
        &self,
        id: &WalletId,
    ) -> Result<Option<WalletWithBalances>, LedgerError> {
        let wallet = match self.find_by_id(id).await? {
            Some(wallet) => wallet,
            None => return Ok(None),
        };

        let balances = sqlx::query_as::<_, BalanceModel>(
            r#"SELECT * FROM balances WHERE wallet_id = $1 ORDER BY created_at ASC"#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| LedgerError::RepositoryError(e.to_string()))?;

        Ok(Some(WalletWithBalances {
            wallet,
            balances: balances.into_iter().map(Into::into).collect(),
        }))
    }

    /// Listado paginado, filtrable por substring del nombre.
    async fn list(
        &self,
        name: Option<String>,
        pagination: PaginationRequest,
    ) -> Result<(Vec<Wallet>, i64), LedgerError> {
        let total_count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM wallets
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
            "#,
        )
        .bind(&name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| LedgerError::RepositoryError(e.to_string()))?;

        let models = sqlx::query_as::<_, WalletModel>(
            r#"
            SELECT * FROM wallets
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&name)
        .bind(pagination.page_size)
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| LedgerError::RepositoryError(e.to_string()))?;

        Ok((models.into_iter().map(Into::into).collect(), total_count))
    }

    /// Actualización parcial: cada campo en None conserva su valor.
    async fn update(
        &self,
        id: &WalletId,
        update: WalletUpdate,
    ) -> Result<Option<Wallet>, LedgerError> {
        let model = sqlx::query_as::<_, WalletModel>(
            r#"
            UPDATE wallets
            SET name = COALESCE($2, name),
                context = COALESCE($3::jsonb, context),
                status = COALESCE($4::wallet_status, status),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&update.name)
        .bind(update.context.clone())
        .bind(update.status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| LedgerError::RepositoryError(e.to_string()))?;

        Ok(model.map(Into::into))
    }

    /// Elimina la billetera; `false` si no existía.
    async fn delete(&self, id: &WalletId) -> Result<bool, LedgerError> {
        let result = sqlx::query(r#"DELETE FROM wallets WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| LedgerError::RepositoryError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn has_balances(&self, id: &WalletId) -> Result<bool, LedgerError> {
        let exists: bool = sqlx::query_scalar(
            r#"SELECT EXISTS (SELECT 1 FROM balances WHERE wallet_id = $1)"#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| LedgerError::RepositoryError(e.to_string()))?;

        Ok(exists)
    }
}
