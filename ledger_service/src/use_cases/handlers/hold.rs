use rust_decimal::Decimal;
use sqlx::PgConnection;

use crate::domain::entities::BalanceSnapshot;
use crate::domain::error::LedgerError;
use crate::domain::transactions::Transaction;
use crate::infrastructure::persistence::{balance_store, transaction_repository};
use crate::use_cases::handlers::ensure_non_negative;

/// Hold: reserva créditos moviéndolos de `available` a `held`.
///
/// La fila PENDING ya nació con hold_status=held en la fase de creación; aquí
/// solo se mueve el balance y se estampa el snapshot.
pub(crate) async fn apply(
    conn: &mut PgConnection,
    pending: &Transaction,
    amount: Decimal,
) -> Result<Transaction, LedgerError> {
    let balance = balance_store::hold(
        conn,
        &pending.wallet_id,
        &pending.credit_type_id,
        amount,
    )
    .await?
    .ok_or_else(|| LedgerError::BalanceNotFound {
        wallet_id: pending.wallet_id.clone(),
        credit_type_id: pending.credit_type_id.clone(),
    })?;
    ensure_non_negative(&balance)?;

    let snapshot = BalanceSnapshot::from(&balance);
    transaction_repository::complete(conn, &pending.id, &snapshot).await
}
