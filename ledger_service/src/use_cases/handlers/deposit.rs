use rust_decimal::Decimal;
use sqlx::PgConnection;

use crate::domain::entities::BalanceSnapshot;
use crate::domain::error::LedgerError;
use crate::domain::transactions::Transaction;
use crate::infrastructure::persistence::{balance_store, transaction_repository};

/// Depósito: sin pre-chequeos. El upsert crea la fila de balance si es el
/// primer crédito de ese tipo para la billetera.
pub(crate) async fn apply(
    conn: &mut PgConnection,
    pending: &Transaction,
    amount: Decimal,
) -> Result<Transaction, LedgerError> {
    let balance = balance_store::deposit(
        conn,
        &pending.wallet_id,
        &pending.credit_type_id,
        amount,
    )
    .await?;

    let snapshot = BalanceSnapshot::from(&balance);
    transaction_repository::complete(conn, &pending.id, &snapshot).await
}
