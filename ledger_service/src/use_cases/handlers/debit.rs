use rust_decimal::Decimal;
use sqlx::PgConnection;

use crate::domain::entities::BalanceSnapshot;
use crate::domain::error::LedgerError;
use crate::domain::transactions::{HoldStatus, Transaction};
use crate::domain::types::TransactionId;
use crate::infrastructure::persistence::{balance_store, transaction_repository};
use crate::use_cases::handlers::{ensure_non_negative, require_open_hold};

/// Deltas que un débito aplica sobre la fila de balance.
///
/// Convención de signos: `available` y `held` se RESTAN del balance, `spent`
/// se SUMA a `spent` y `overall_spent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DebitDeltas {
    pub available: Decimal,
    pub held: Decimal,
    pub spent: Decimal,
}

/// Aritmética del débito.
///
/// Con hold, el hold se consume completo: `held` baja en `hold.amount` y la
/// diferencia `hold.amount - amount` regresa a `available` (por eso el delta
/// de available queda negativo o cero). Sin hold, todo sale de `available`.
pub(crate) fn deltas_for(amount: Decimal, hold_amount: Option<Decimal>) -> DebitDeltas {
    match hold_amount {
        Some(hold_amount) => DebitDeltas {
            available: amount - hold_amount,
            held: hold_amount,
            spent: amount,
        },
        None => DebitDeltas {
            available: amount,
            held: Decimal::ZERO,
            spent: amount,
        },
    }
}

/// Débito: consume créditos, opcionalmente contra un hold abierto.
pub(crate) async fn apply(
    conn: &mut PgConnection,
    pending: &Transaction,
    amount: Decimal,
    hold_transaction_id: Option<&TransactionId>,
) -> Result<Transaction, LedgerError> {
    let consumed_hold = match hold_transaction_id {
        Some(hold_id) => {
            let hold =
                transaction_repository::find_hold(conn, hold_id, &pending.credit_type_id)
                    .await?
                    .ok_or_else(|| LedgerError::HoldNotFound(hold_id.clone()))?;
            let hold_amount = require_open_hold(&hold)?;
            if hold_amount < amount {
                return Err(LedgerError::HoldAmountExceeds);
            }
            Some((hold.id, hold_amount))
        }
        None => None,
    };

    let deltas = deltas_for(amount, consumed_hold.as_ref().map(|(_, amount)| *amount));
    let balance = balance_store::debit(
        conn,
        &pending.wallet_id,
        &pending.credit_type_id,
        deltas.available,
        deltas.held,
        deltas.spent,
    )
    .await?
    .ok_or_else(|| LedgerError::BalanceNotFound {
        wallet_id: pending.wallet_id.clone(),
        credit_type_id: pending.credit_type_id.clone(),
    })?;
    ensure_non_negative(&balance)?;

    if let Some((hold_id, _)) = &consumed_hold {
        transaction_repository::set_hold_status(conn, hold_id, HoldStatus::Used).await?;
    }

    let snapshot = BalanceSnapshot::from(&balance);
    transaction_repository::complete(conn, &pending.id, &snapshot).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deltas_without_hold_come_from_available() {
        let deltas = deltas_for(Decimal::from(50), None);
        assert_eq!(
            deltas,
            DebitDeltas {
                available: Decimal::from(50),
                held: Decimal::ZERO,
                spent: Decimal::from(50),
            }
        );
    }

    #[test]
    fn test_deltas_with_hold_consume_it_whole() {
        // Hold de 30, débito de 20: los 10 restantes vuelven a available
        // (delta negativo), el held baja 30 y spent sube 20.
        let deltas = deltas_for(Decimal::from(20), Some(Decimal::from(30)));
        assert_eq!(
            deltas,
            DebitDeltas {
                available: Decimal::from(-10),
                held: Decimal::from(30),
                spent: Decimal::from(20),
            }
        );
    }

    #[test]
    fn test_deltas_with_exact_hold_leave_available_untouched() {
        let deltas = deltas_for(Decimal::from(30), Some(Decimal::from(30)));
        assert_eq!(deltas.available, Decimal::ZERO);
        assert_eq!(deltas.held, Decimal::from(30));
        assert_eq!(deltas.spent, Decimal::from(30));
    }
}
