use rust_decimal::Decimal;
use sqlx::PgConnection;

use crate::domain::entities::BalanceSnapshot;
use crate::domain::error::LedgerError;
use crate::domain::transactions::Transaction;
use crate::infrastructure::persistence::{balance_store, transaction_repository};
use crate::use_cases::handlers::ensure_non_negative;

/// Adjust: override administrativo. `amount` es un objetivo ABSOLUTO para
/// `available`, no un delta; `held` se fuerza a 0 y `spent` solo se reinicia
/// si `reset_spent` lo pide. `overall_spent` jamás retrocede.
///
/// Un objetivo negativo cae en el post-chequeo como InsufficientBalance.
pub(crate) async fn apply(
    conn: &mut PgConnection,
    pending: &Transaction,
    target: Decimal,
    reset_spent: bool,
) -> Result<Transaction, LedgerError> {
    let balance = balance_store::adjust(
        conn,
        &pending.wallet_id,
        &pending.credit_type_id,
        target,
        reset_spent,
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
