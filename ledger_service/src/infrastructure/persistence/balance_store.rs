//! Primitivas atómicas sobre la fila de balance de un (wallet, credit_type).
//!
//! Cada función recibe la conexión de la transacción de BD abierta por el
//! orquestador, de modo que la mutación del balance commitea junto con la
//! actualización de la fila de transacción. La serialización entre escritores
//! la aporta el mutex por clave, no esta capa: aquí solo se garantiza que la
//! aritmética ocurre en un único statement.

use rust_decimal::Decimal;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::domain::entities::Balance;
use crate::domain::error::LedgerError;
use crate::domain::types::{CreditTypeId, WalletId};
use crate::infrastructure::persistence::models::BalanceModel;

/// `available += amount`, creando la fila si no existe (upsert).
pub async fn deposit(
    conn: &mut PgConnection,
    wallet_id: &WalletId,
    credit_type_id: &CreditTypeId,
    amount: Decimal,
) -> Result<Balance, LedgerError> {
    let model = sqlx::query_as::<_, BalanceModel>(
        r#"
        INSERT INTO balances (id, wallet_id, credit_type_id, available)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (wallet_id, credit_type_id)
        DO UPDATE SET available = balances.available + EXCLUDED.available,
                      updated_at = now()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(wallet_id)
    .bind(credit_type_id)
    .bind(amount)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| LedgerError::RepositoryError(e.to_string()))?;

    Ok(model.into())
}

/// `available -= amount; held += amount` sobre una fila existente.
///
/// Devuelve `None` si la fila no existe: un hold nunca crea balances.
pub async fn hold(
    conn: &mut PgConnection,
    wallet_id: &WalletId,
    credit_type_id: &CreditTypeId,
    amount: Decimal,
) -> Result<Option<Balance>, LedgerError> {
    let model = sqlx::query_as::<_, BalanceModel>(
        r#"
        UPDATE balances
        SET available = available - $3,
            held = held + $3,
            updated_at = now()
        WHERE wallet_id = $1 AND credit_type_id = $2
        RETURNING *
        "#,
    )
    .bind(wallet_id)
    .bind(credit_type_id)
    .bind(amount)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| LedgerError::RepositoryError(e.to_string()))?;

    Ok(model.map(Into::into))
}

/// `held -= amount; available += amount`.
///
/// Si la fila no existe se inserta primero en cero y luego se ajusta; en ese
/// caso `held` termina negativo y el post-chequeo del handler revierte todo.
pub async fn release(
    conn: &mut PgConnection,
    wallet_id: &WalletId,
    credit_type_id: &CreditTypeId,
    amount: Decimal,
) -> Result<Balance, LedgerError> {
    sqlx::query(
        r#"
        INSERT INTO balances (id, wallet_id, credit_type_id)
        VALUES ($1, $2, $3)
        ON CONFLICT (wallet_id, credit_type_id) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(wallet_id)
    .bind(credit_type_id)
    .execute(&mut *conn)
    .await
    .map_err(|e| LedgerError::RepositoryError(e.to_string()))?;

    let model = sqlx::query_as::<_, BalanceModel>(
        r#"
        UPDATE balances
        SET held = held - $3,
            available = available + $3,
            updated_at = now()
        WHERE wallet_id = $1 AND credit_type_id = $2
        RETURNING *
        "#,
    )
    .bind(wallet_id)
    .bind(credit_type_id)
    .bind(amount)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| LedgerError::RepositoryError(e.to_string()))?;

    Ok(model.into())
}

/// Aplica los tres deltas de un débito en un único statement.
///
/// `available -= available_delta; held -= held_delta;
/// spent += spent_delta; overall_spent += spent_delta`.
/// Devuelve `None` si la fila no existe: un débito nunca crea balances.
pub async fn debit(
    conn: &mut PgConnection,
    wallet_id: &WalletId,
    credit_type_id: &CreditTypeId,
    available_delta: Decimal,
    held_delta: Decimal,
    spent_delta: Decimal,
) -> Result<Option<Balance>, LedgerError> {
    let model = sqlx::query_as::<_, BalanceModel>(
        r#"
        UPDATE balances
        SET available = available - $3,
            held = held - $4,
            spent = spent + $5,
            overall_spent = overall_spent + $5,
            updated_at = now()
        WHERE wallet_id = $1 AND credit_type_id = $2
        RETURNING *
        "#,
    )
    .bind(wallet_id)
    .bind(credit_type_id)
    .bind(available_delta)
    .bind(held_delta)
    .bind(spent_delta)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| LedgerError::RepositoryError(e.to_string()))?;

    Ok(model.map(Into::into))
}

/// Override administrativo: `available := target; held := 0` y, si se pide,
/// `spent := 0`. `overall_spent` nunca se toca.
pub async fn adjust(
    conn: &mut PgConnection,
    wallet_id: &WalletId,
    credit_type_id: &CreditTypeId,
    target: Decimal,
    reset_spent: bool,
) -> Result<Option<Balance>, LedgerError> {
    let model = sqlx::query_as::<_, BalanceModel>(
        r#"
        UPDATE balances
        SET available = $3,
            held = 0,
            spent = CASE WHEN $4 THEN 0 ELSE spent END,
            updated_at = now()
        WHERE wallet_id = $1 AND credit_type_id = $2
        RETURNING *
        "#,
    )
    .bind(wallet_id)
    .bind(credit_type_id)
    .bind(target)
    .bind(reset_spent)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| LedgerError::RepositoryError(e.to_string()))?;

    Ok(model.map(Into::into))
}
