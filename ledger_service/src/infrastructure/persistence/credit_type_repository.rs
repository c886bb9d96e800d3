use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::entities::CreditType;
use crate::domain::error::LedgerError;
use crate::domain::pagination::PaginationRequest;
use crate::domain::repository::{CreditTypeRepository, CreditTypeUpdate};
use crate::domain::types::CreditTypeId;
use crate::infrastructure::persistence::models::CreditTypeModel;

/// Repositorio de Tipos de Crédito basado en PostgreSQL.
pub struct PostgresCreditTypeRepository {
    pool: PgPool,
}

impl PostgresCreditTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_unique_name(e: sqlx::Error, name: &str) -> LedgerError {
        match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                LedgerError::CreditTypeNameTaken(name.to_string())
            }
            _ => LedgerError::RepositoryError(e.to_string()),
        }
    }
}

#[async_trait]
impl CreditTypeRepository for PostgresCreditTypeRepository {
    /// Crea un nuevo tipo de crédito; el nombre es único.
    async fn create(&self, credit_type: CreditType) -> Result<CreditType, LedgerError> {
        let model = sqlx::query_as::<_, CreditTypeModel>(
            r#"
            INSERT INTO credit_types (id, name, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&credit_type.id)
        .bind(&credit_type.name)
        .bind(&credit_type.description)
        .bind(credit_type.created_at)
        .bind(credit_type.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_unique_name(e, &credit_type.name))?;

        Ok(model.into())
    }

    async fn find_by_id(&self, id: &CreditTypeId) -> Result<Option<CreditType>, LedgerError> {
        let model =
            sqlx::query_as::<_, CreditTypeModel>(r#"SELECT * FROM credit_types WHERE id = $1"#)
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| LedgerError::RepositoryError(e.to_string()))?;

        Ok(model.map(Into::into))
    }

    async fn list(
        &self,
        pagination: PaginationRequest,
    ) -> Result<(Vec<CreditType>, i64), LedgerError> {
        let total_count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM credit_types"#)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| LedgerError::RepositoryError(e.to_string()))?;

        let models = sqlx::query_as::<_, CreditTypeModel>(
            r#"
            SELECT * FROM credit_types
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(pagination.page_size)
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| LedgerError::RepositoryError(e.to_string()))?;

        Ok((models.into_iter().map(Into::into).collect(), total_count))
    }

    async fn update(
        &self,
        id: &CreditTypeId,
        update: CreditTypeUpdate,
    ) -> Result<Option<CreditType>, LedgerError> {
        let fallback_name = update.name.clone().unwrap_or_default();
        let model = sqlx::query_as::<_, CreditTypeModel>(
            r#"
            UPDATE credit_types
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&update.name)
        .bind(&update.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::map_unique_name(e, &fallback_name))?;

        Ok(model.map(Into::into))
    }

    async fn delete(&self, id: &CreditTypeId) -> Result<bool, LedgerError> {
        let result = sqlx::query(r#"DELETE FROM credit_types WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| LedgerError::RepositoryError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
