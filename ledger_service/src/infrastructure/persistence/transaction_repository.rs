use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::domain::entities::BalanceSnapshot;
use crate::domain::error::LedgerError;
use crate::domain::pagination::{Page, PaginationRequest};
use crate::domain::repository::{TransactionFilter, TransactionRepository};
use crate::domain::transactions::{
    HoldStatus, Transaction, TransactionRequest, TransactionStatus, TransactionType,
};
use crate::domain::types::{CreditTypeId, TransactionId, WalletId};
use crate::infrastructure::persistence::models::TransactionModel;

/// Nombre del índice único parcial que implementa la idempotencia por
/// (wallet_id, external_id). Debe coincidir con la migración.
const EXTERNAL_ID_UNIQUE_INDEX: &str = "ux_transactions_wallet_external_id";

/// Repositorio del log de transacciones implementado para PostgreSQL.
///
/// Utiliza consultas SQL parametrizadas directas con `sqlx` (Runtime-checked).
/// Las operaciones de este struct trabajan contra el pool; las mutaciones que
/// deben commitear junto a un balance están abajo como funciones libres que
/// reciben la conexión de la transacción abierta.
pub struct PostgresTransactionRepository {
    pool: PgPool,
}

impl PostgresTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionRepository for PostgresTransactionRepository {
    /// Inserta la fila PENDING del flujo (INSERT).
    ///
    /// El índice único parcial sobre (wallet_id, external_id) es quien decide
    /// la idempotencia: un duplicado se traduce a `DuplicateTransaction` sin
    /// tocar nada más.
    async fn create_pending(
        &self,
        wallet_id: &WalletId,
        request: &TransactionRequest,
    ) -> Result<Transaction, LedgerError> {
        let transaction_type = request.transaction_type();
        let hold_status = match transaction_type {
            TransactionType::Hold => Some(HoldStatus::Held),
            _ => None,
        };
        let now = Utc::now();

        let model = sqlx::query_as::<_, TransactionModel>(
            r#"
            INSERT INTO transactions (
                id, type, external_id, wallet_id, credit_type_id, issuer,
                description, context, payload, hold_status, status,
                subscription_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(transaction_type)
        .bind(&request.external_id)
        .bind(wallet_id)
        .bind(&request.credit_type_id)
        .bind(&request.issuer)
        .bind(&request.description)
        .bind(request.context.clone())
        .bind(Json(&request.payload))
        .bind(hold_status)
        .bind(TransactionStatus::Pending)
        .bind(&request.subscription_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err)
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(EXTERNAL_ID_UNIQUE_INDEX) =>
            {
                LedgerError::DuplicateTransaction(
                    request.external_id.clone().unwrap_or_default(),
                )
            }
            _ => LedgerError::RepositoryError(e.to_string()),
        })?;

        Ok(model.into())
    }

    /// Busca una transacción por su ID único.
    async fn find_by_id(&self, id: &TransactionId) -> Result<Option<Transaction>, LedgerError> {
        let model = sqlx::query_as::<_, TransactionModel>(
            r#"SELECT * FROM transactions WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| LedgerError::RepositoryError(e.to_string()))?;

        Ok(model.map(Into::into))
    }

    /// Cierra el ciclo de vida marcando la fila como FAILED.
    async fn mark_failed(&self, id: &TransactionId) -> Result<(), LedgerError> {
        sqlx::query(
            r#"UPDATE transactions SET status = $2, updated_at = now() WHERE id = $1"#,
        )
        .bind(id)
        .bind(TransactionStatus::Failed)
        .execute(&self.pool)
        .await
        .map_err(|e| LedgerError::RepositoryError(e.to_string()))?;

        Ok(())
    }

    /// Listado paginado para la superficie de lectura (no está en el hot path).
    ///
    /// Las filas PENDING son visibles a propósito: quien quiera solo efectos
    /// aplicados filtra por status=completed.
    async fn list(
        &self,
        filter: TransactionFilter,
        pagination: PaginationRequest,
    ) -> Result<Page<Transaction>, LedgerError> {
        let total_count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM transactions
            WHERE ($1::text IS NULL OR wallet_id = $1)
              AND ($2::text IS NULL OR credit_type_id = $2)
              AND ($3::text IS NULL OR external_id = $3)
              AND ($4::transaction_type IS NULL OR type = $4)
              AND ($5::transaction_status IS NULL OR status = $5)
              AND ($6::timestamptz IS NULL OR created_at >= $6)
              AND ($7::timestamptz IS NULL OR created_at <= $7)
            "#,
        )
        .bind(&filter.wallet_id)
        .bind(&filter.credit_type_id)
        .bind(&filter.external_id)
        .bind(filter.transaction_type)
        .bind(filter.status)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| LedgerError::RepositoryError(e.to_string()))?;

        let models = sqlx::query_as::<_, TransactionModel>(
            r#"
            SELECT * FROM transactions
            WHERE ($1::text IS NULL OR wallet_id = $1)
              AND ($2::text IS NULL OR credit_type_id = $2)
              AND ($3::text IS NULL OR external_id = $3)
              AND ($4::transaction_type IS NULL OR type = $4)
              AND ($5::transaction_status IS NULL OR status = $5)
              AND ($6::timestamptz IS NULL OR created_at >= $6)
              AND ($7::timestamptz IS NULL OR created_at <= $7)
            ORDER BY created_at DESC
            LIMIT $8 OFFSET $9
            "#,
        )
        .bind(&filter.wallet_id)
        .bind(&filter.credit_type_id)
        .bind(&filter.external_id)
        .bind(filter.transaction_type)
        .bind(filter.status)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .bind(pagination.page_size)
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| LedgerError::RepositoryError(e.to_string()))?;

        Ok(Page::new(
            &pagination,
            total_count,
            models.into_iter().map(Into::into).collect(),
        ))
    }
}

/// Busca el hold referenciado por un debit/release, dentro de la transacción
/// de BD abierta. El filtro por tipo y credit_type hace que un ID de otra
/// clase (u otro tipo de crédito) se vea como inexistente.
pub async fn find_hold(
    conn: &mut PgConnection,
    hold_id: &TransactionId,
    credit_type_id: &CreditTypeId,
) -> Result<Option<Transaction>, LedgerError> {
    let model = sqlx::query_as::<_, TransactionModel>(
        r#"
        SELECT * FROM transactions
        WHERE id = $1 AND type = $2 AND credit_type_id = $3
        "#,
    )
    .bind(hold_id)
    .bind(TransactionType::Hold)
    .bind(credit_type_id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| LedgerError::RepositoryError(e.to_string()))?;

    Ok(model.map(Into::into))
}

/// Marca la fila PENDING como COMPLETED y estampa el snapshot del balance.
pub async fn complete(
    conn: &mut PgConnection,
    id: &TransactionId,
    snapshot: &BalanceSnapshot,
) -> Result<Transaction, LedgerError> {
    let model = sqlx::query_as::<_, TransactionModel>(
        r#"
        UPDATE transactions
        SET status = $2, balance_snapshot = $3, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(TransactionStatus::Completed)
    .bind(Json(snapshot))
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| LedgerError::RepositoryError(e.to_string()))?
    .ok_or_else(|| {
        LedgerError::Internal(format!("pending transaction {} vanished before completion", id))
    })?;

    Ok(model.into())
}

/// Transiciona el hold_status de un hold (held -> used / released).
pub async fn set_hold_status(
    conn: &mut PgConnection,
    id: &TransactionId,
    hold_status: HoldStatus,
) -> Result<(), LedgerError> {
    sqlx::query(
        r#"UPDATE transactions SET hold_status = $2, updated_at = now() WHERE id = $1"#,
    )
    .bind(id)
    .bind(hold_status)
    .execute(&mut *conn)
    .await
    .map_err(|e| LedgerError::RepositoryError(e.to_string()))?;

    Ok(())
}
