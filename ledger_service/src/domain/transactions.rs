use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::entities::BalanceSnapshot;
use crate::domain::error::LedgerError;
use crate::domain::types::{CreditTypeId, TransactionId, WalletId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "transaction_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Deposit,
    Debit,
    Hold,
    Release,
    Adjust,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "transaction_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

/// Ciclo de vida de un hold: `Held` es el único estado abierto.
///
/// `Expired` está reservado para un barrido por TTL futuro; el core nunca lo
/// asigna, pero cualquier operación contra un hold que no esté en `Held`
/// (incluido `Expired`) se rechaza con `HoldNotHeld`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "hold_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum HoldStatus {
    Held,
    Used,
    Released,
    Expired,
}

/// Payload tipado de una transacción, discriminado por `type`.
///
/// Se persiste como JSONB y viaja igual por el wire, así que la forma JSON
/// (tag en minúsculas, montos como decimales) es parte del contrato.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransactionPayload {
    Deposit {
        amount: Decimal,
    },
    Debit {
        amount: Decimal,
        #[serde(default)]
        hold_transaction_id: Option<TransactionId>,
    },
    Hold {
        amount: Decimal,
    },
    Release {
        hold_transaction_id: TransactionId,
    },
    Adjust {
        amount: Decimal,
        #[serde(default)]
        reset_spent: bool,
    },
}

impl TransactionPayload {
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            TransactionPayload::Deposit { .. } => TransactionType::Deposit,
            TransactionPayload::Debit { .. } => TransactionType::Debit,
            TransactionPayload::Hold { .. } => TransactionType::Hold,
            TransactionPayload::Release { .. } => TransactionType::Release,
            TransactionPayload::Adjust { .. } => TransactionType::Adjust,
        }
    }
}

/// Modelo de Entidad: Transaction.
///
/// Registro inmutable del log salvo por los campos de estado (`status`,
/// `hold_status`, `balance_snapshot`), que son los únicos que mutan durante
/// el ciclo pending -> completed/failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub wallet_id: WalletId,
    pub credit_type_id: CreditTypeId,
    pub issuer: String,
    pub description: String,
    pub context: serde_json::Value,
    pub payload: TransactionPayload,
    pub external_id: Option<String>,
    pub status: TransactionStatus,
    pub hold_status: Option<HoldStatus>,
    pub balance_snapshot: Option<BalanceSnapshot>,
    pub subscription_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Monto declarado en el payload de un hold.
    ///
    /// Solo es válido sobre transacciones de tipo hold; cualquier otra forma
    /// indica un registro corrupto.
    pub fn hold_amount(&self) -> Result<Decimal, LedgerError> {
        match &self.payload {
            TransactionPayload::Hold { amount } => Ok(*amount),
            _ => Err(LedgerError::Internal(format!(
                "transaction {} does not carry a hold payload",
                self.id
            ))),
        }
    }
}

/// Solicitud tipada que comparten los cinco endpoints transaccionales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub credit_type_id: CreditTypeId,
    pub description: String,
    pub issuer: String,
    pub external_id: Option<String>,
    #[serde(default = "default_context")]
    pub context: serde_json::Value,
    pub subscription_id: Option<String>,
    pub payload: TransactionPayload,
}

fn default_context() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl TransactionRequest {
    pub fn transaction_type(&self) -> TransactionType {
        self.payload.transaction_type()
    }

    /// Validación mecánica de entrada (422 si falla).
    ///
    /// Los montos deben ser estrictamente positivos donde la operación suma o
    /// resta una magnitud; `adjust` es un objetivo absoluto y se valida por el
    /// post-chequeo de no-negatividad, no aquí.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.credit_type_id.0.trim().is_empty() {
            return Err(LedgerError::InvalidInput(
                "credit_type_id cannot be empty".to_string(),
            ));
        }
        if self.issuer.trim().is_empty() {
            return Err(LedgerError::InvalidInput(
                "issuer cannot be empty".to_string(),
            ));
        }
        if let Some(external_id) = &self.external_id {
            if external_id.trim().is_empty() {
                return Err(LedgerError::InvalidInput(
                    "external_id cannot be blank when present".to_string(),
                ));
            }
        }

        match &self.payload {
            TransactionPayload::Deposit { amount } => require_positive(*amount, "deposit"),
            TransactionPayload::Hold { amount } => require_positive(*amount, "hold"),
            TransactionPayload::Debit {
                amount,
                hold_transaction_id,
            } => {
                require_positive(*amount, "debit")?;
                if let Some(hold_id) = hold_transaction_id {
                    if hold_id.0.trim().is_empty() {
                        return Err(LedgerError::InvalidInput(
                            "hold_transaction_id cannot be blank when present".to_string(),
                        ));
                    }
                }
                Ok(())
            }
            TransactionPayload::Release {
                hold_transaction_id,
            } => {
                if hold_transaction_id.0.trim().is_empty() {
                    return Err(LedgerError::InvalidInput(
                        "hold_transaction_id cannot be empty".to_string(),
                    ));
                }
                Ok(())
            }
            TransactionPayload::Adjust { .. } => Ok(()),
        }
    }
}

fn require_positive(amount: Decimal, operation: &str) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidInput(format!(
            "{} amount must be strictly positive",
            operation
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn request_with(payload: TransactionPayload) -> TransactionRequest {
        TransactionRequest {
            credit_type_id: CreditTypeId("ct".to_string()),
            description: "unit test".to_string(),
            issuer: "tests".to_string(),
            external_id: None,
            context: serde_json::json!({}),
            subscription_id: None,
            payload,
        }
    }

    #[test]
    fn test_payload_round_trip_preserves_decimal_precision() {
        let payload = TransactionPayload::Deposit {
            amount: Decimal::from_str("100.25").unwrap(),
        };

        let encoded = serde_json::to_string(&payload).unwrap();
        let decoded: TransactionPayload = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_payload_json_is_discriminated_by_type() {
        let payload = TransactionPayload::Release {
            hold_transaction_id: TransactionId("hold-1".to_string()),
        };

        let encoded = serde_json::to_value(&payload).unwrap();
        assert_eq!(encoded["type"], "release");
        assert_eq!(encoded["hold_transaction_id"], "hold-1");
    }

    #[test]
    fn test_debit_payload_parses_without_hold_id() {
        let decoded: TransactionPayload =
            serde_json::from_str(r#"{"type": "debit", "amount": "20"}"#).unwrap();

        match decoded {
            TransactionPayload::Debit {
                amount,
                hold_transaction_id,
            } => {
                assert_eq!(amount, Decimal::from(20));
                assert!(hold_transaction_id.is_none());
            }
            other => panic!("Expected debit payload, got {:?}", other),
        }
    }

    #[test]
    fn test_adjust_payload_defaults_reset_spent_to_false() {
        let decoded: TransactionPayload =
            serde_json::from_str(r#"{"type": "adjust", "amount": "20"}"#).unwrap();

        assert_eq!(
            decoded,
            TransactionPayload::Adjust {
                amount: Decimal::from(20),
                reset_spent: false,
            }
        );
    }

    #[test]
    fn test_validate_rejects_non_positive_amounts() {
        for payload in [
            TransactionPayload::Deposit {
                amount: Decimal::ZERO,
            },
            TransactionPayload::Hold {
                amount: Decimal::from(-5),
            },
            TransactionPayload::Debit {
                amount: Decimal::ZERO,
                hold_transaction_id: None,
            },
        ] {
            let result = request_with(payload).validate();
            assert!(matches!(result, Err(LedgerError::InvalidInput(_))));
        }
    }

    #[test]
    fn test_validate_allows_negative_adjust_target() {
        // Un target negativo no es error de entrada: lo atrapa el post-chequeo
        // de no-negatividad como InsufficientBalance.
        let request = request_with(TransactionPayload::Adjust {
            amount: Decimal::from(-10),
            reset_spent: false,
        });
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_identifiers() {
        let mut request = request_with(TransactionPayload::Deposit {
            amount: Decimal::from(100),
        });
        request.credit_type_id = CreditTypeId("  ".to_string());
        assert!(matches!(
            request.validate(),
            Err(LedgerError::InvalidInput(_))
        ));

        let mut request = request_with(TransactionPayload::Deposit {
            amount: Decimal::from(100),
        });
        request.external_id = Some(String::new());
        assert!(matches!(
            request.validate(),
            Err(LedgerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_transaction_serializes_type_field() {
        let transaction = Transaction {
            id: TransactionId("tx-1".to_string()),
            transaction_type: TransactionType::Deposit,
            wallet_id: WalletId("w".to_string()),
            credit_type_id: CreditTypeId("ct".to_string()),
            issuer: "api".to_string(),
            description: "first deposit".to_string(),
            context: serde_json::json!({}),
            payload: TransactionPayload::Deposit {
                amount: Decimal::from(100),
            },
            external_id: Some("X".to_string()),
            status: TransactionStatus::Completed,
            hold_status: None,
            balance_snapshot: Some(BalanceSnapshot {
                available: Decimal::from(100),
                held: Decimal::ZERO,
                spent: Decimal::ZERO,
                overall_spent: Decimal::ZERO,
            }),
            subscription_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let encoded = serde_json::to_value(&transaction).unwrap();
        assert_eq!(encoded["type"], "deposit");
        assert_eq!(encoded["status"], "completed");
        assert_eq!(encoded["balance_snapshot"]["available"], "100");

        // Round-trip completo: todos los campos sobreviven la serialización.
        let decoded: Transaction = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded.id, transaction.id);
        assert_eq!(decoded.payload, transaction.payload);
        assert_eq!(decoded.balance_snapshot, transaction.balance_snapshot);
        assert_eq!(decoded.external_id, transaction.external_id);
    }

    #[test]
    fn test_hold_amount_rejects_non_hold_payloads() {
        let transaction = Transaction {
            id: TransactionId("tx-2".to_string()),
            transaction_type: TransactionType::Deposit,
            wallet_id: WalletId("w".to_string()),
            credit_type_id: CreditTypeId("ct".to_string()),
            issuer: "api".to_string(),
            description: String::new(),
            context: serde_json::json!({}),
            payload: TransactionPayload::Deposit {
                amount: Decimal::from(1),
            },
            external_id: None,
            status: TransactionStatus::Pending,
            hold_status: None,
            balance_snapshot: None,
            subscription_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(matches!(
            transaction.hold_amount(),
            Err(LedgerError::Internal(_))
        ));
    }
}
