use sqlx::PgConnection;

use crate::domain::entities::BalanceSnapshot;
use crate::domain::error::LedgerError;
use crate::domain::transactions::{HoldStatus, Transaction};
use crate::domain::types::TransactionId;
use crate::infrastructure::persistence::{balance_store, transaction_repository};
use crate::use_cases::handlers::{ensure_non_negative, require_open_hold};

/// Release: cancela un hold abierto devolviendo su monto a `available`.
///
/// El monto no viaja en el request: se deriva del payload del hold
/// referenciado. El snapshot queda estampado en la transacción de release y
/// el hold pasa a `released`.
pub(crate) async fn apply(
    conn: &mut PgConnection,
    pending: &Transaction,
    hold_transaction_id: &TransactionId,
) -> Result<Transaction, LedgerError> {
    let hold =
        transaction_repository::find_hold(conn, hold_transaction_id, &pending.credit_type_id)
            .await?
            .ok_or_else(|| LedgerError::HoldNotFound(hold_transaction_id.clone()))?;
    let hold_amount = require_open_hold(&hold)?;

    let balance = balance_store::release(
        conn,
        &pending.wallet_id,
        &pending.credit_type_id,
        hold_amount,
    )
    .await?;
    ensure_non_negative(&balance)?;

    transaction_repository::set_hold_status(conn, &hold.id, HoldStatus::Released).await?;

    let snapshot = BalanceSnapshot::from(&balance);
    transaction_repository::complete(conn, &pending.id, &snapshot).await
}
