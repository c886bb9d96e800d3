//! Handlers de operación del ledger.
//!
//! Cada submódulo implementa la lógica de un tipo de transacción (deposit,
//! debit, hold, release, adjust) sobre la transacción de BD que el
//! orquestador mantiene abierta: pre-chequeos, una primitiva del balance
//! store, el post-chequeo de no-negatividad y el cierre de la fila PENDING
//! con su `balance_snapshot`. Si algo falla aquí, el orquestador revierte la
//! transacción de BD completa y marca la fila como FAILED.

pub mod adjust;
pub mod debit;
pub mod deposit;
pub mod hold;
pub mod release;

use rust_decimal::Decimal;

use crate::domain::entities::Balance;
use crate::domain::error::LedgerError;
use crate::domain::transactions::{HoldStatus, Transaction};

/// Post-chequeo de invariantes sobre la fila recién mutada.
///
/// Un valor negativo significa que la operación pidió más de lo disponible:
/// se reporta `InsufficientBalance` y la transacción de BD se revierte.
pub(crate) fn ensure_non_negative(balance: &Balance) -> Result<(), LedgerError> {
    if balance.available < Decimal::ZERO || balance.held < Decimal::ZERO {
        return Err(LedgerError::InsufficientBalance);
    }
    Ok(())
}

/// Valida que el hold referenciado siga abierto y devuelve su monto.
///
/// Cualquier estado terminal (used, released, expired) se rechaza con
/// `HoldNotHeld`.
pub(crate) fn require_open_hold(hold: &Transaction) -> Result<Decimal, LedgerError> {
    if hold.hold_status != Some(HoldStatus::Held) {
        return Err(LedgerError::HoldNotHeld(hold.id.clone()));
    }
    hold.hold_amount()
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use crate::domain::transactions::{
        HoldStatus, Transaction, TransactionPayload, TransactionStatus, TransactionType,
    };
    use crate::domain::types::{CreditTypeId, TransactionId, WalletId};

    /// Construye una transacción de hold completada, en el estado dado.
    pub fn hold_transaction(amount: Decimal, hold_status: HoldStatus) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            transaction_type: TransactionType::Hold,
            wallet_id: WalletId("w".to_string()),
            credit_type_id: CreditTypeId("ct".to_string()),
            issuer: "tests".to_string(),
            description: "hold".to_string(),
            context: serde_json::json!({}),
            payload: TransactionPayload::Hold { amount },
            external_id: None,
            status: TransactionStatus::Completed,
            hold_status: Some(hold_status),
            balance_snapshot: None,
            subscription_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::hold_transaction;
    use super::*;
    use crate::domain::types::{CreditTypeId, WalletId};
    use chrono::Utc;
    use rstest::rstest;

    fn balance(available: i64, held: i64) -> Balance {
        Balance {
            id: "b".to_string(),
            wallet_id: WalletId("w".to_string()),
            credit_type_id: CreditTypeId("ct".to_string()),
            available: Decimal::from(available),
            held: Decimal::from(held),
            spent: Decimal::ZERO,
            overall_spent: Decimal::ZERO,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_non_negative_accepts_zeroes() {
        assert!(ensure_non_negative(&balance(0, 0)).is_ok());
    }

    #[rstest]
    #[case(-1, 0)]
    #[case(0, -1)]
    #[case(-30, -30)]
    fn test_non_negative_rejects_negative_counters(#[case] available: i64, #[case] held: i64) {
        let result = ensure_non_negative(&balance(available, held));
        assert!(matches!(result, Err(LedgerError::InsufficientBalance)));
    }

    #[test]
    fn test_open_hold_returns_its_amount() {
        let hold = hold_transaction(Decimal::from(30), HoldStatus::Held);
        assert_eq!(require_open_hold(&hold).unwrap(), Decimal::from(30));
    }

    #[rstest]
    #[case(HoldStatus::Used)]
    #[case(HoldStatus::Released)]
    #[case(HoldStatus::Expired)]
    fn test_terminal_holds_are_rejected(#[case] status: HoldStatus) {
        let hold = hold_transaction(Decimal::from(30), status);
        let result = require_open_hold(&hold);
        assert!(matches!(result, Err(LedgerError::HoldNotHeld(id)) if id == hold.id));
    }
}
