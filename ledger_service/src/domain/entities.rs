use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::error::LedgerError;
use crate::domain::types::{CreditTypeId, WalletId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "wallet_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum WalletStatus {
    Active,
    Inactive,
}

/// Modelo de Entidad: Wallet.
///
/// Una billetera es el contenedor de balances de un dueño: mantiene un balance
/// por cada tipo de crédito que haya recibido. El campo `context` es un mapa
/// opaco que el llamador usa para correlacionar con sus propios sistemas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    pub id: WalletId,
    pub name: String,
    pub context: serde_json::Value,
    pub status: WalletStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Wallet {
    /// Inicializa una nueva billetera activa, validando los datos básicos.
    pub fn new(name: String, context: serde_json::Value) -> Result<Self, LedgerError> {
        if name.trim().is_empty() {
            return Err(LedgerError::InvalidInput(
                "Wallet name cannot be empty".to_string(),
            ));
        }
        let now = Utc::now();
        Ok(Self {
            id: WalletId::new(),
            name,
            context,
            status: WalletStatus::Active,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Modelo de Entidad: CreditType.
///
/// Un tipo de crédito nombrado (ej. "POINTS"). El nombre es único; el tipo es
/// inmutable una vez referenciado por transacciones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditType {
    pub id: CreditTypeId,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CreditType {
    pub fn new(name: String, description: String) -> Result<Self, LedgerError> {
        if name.trim().is_empty() {
            return Err(LedgerError::InvalidInput(
                "Credit type name cannot be empty".to_string(),
            ));
        }
        let now = Utc::now();
        Ok(Self {
            id: CreditTypeId::new(),
            name,
            description,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Modelo de Entidad: Balance.
///
/// El contador vivo por (wallet, credit_type). Los cuatro campos usan
/// `Decimal` con precisión fija; después de cada transacción COMPLETED deben
/// cumplir `available >= 0`, `held >= 0` y `spent <= overall_spent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balance {
    pub id: String,
    pub wallet_id: WalletId,
    pub credit_type_id: CreditTypeId,
    pub available: Decimal,
    pub held: Decimal,
    pub spent: Decimal,
    pub overall_spent: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Foto del balance después de aplicar una mutación.
///
/// Se estampa en cada transacción COMPLETED, de modo que el log es
/// auto-auditable sin necesidad de re-derivar los contadores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub available: Decimal,
    pub held: Decimal,
    pub spent: Decimal,
    pub overall_spent: Decimal,
}

impl From<&Balance> for BalanceSnapshot {
    fn from(balance: &Balance) -> Self {
        Self {
            available: balance.available,
            held: balance.held,
            spent: balance.spent,
            overall_spent: balance.overall_spent,
        }
    }
}

/// Vista de una billetera con sus balances incluidos (respuesta de la API).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletWithBalances {
    #[serde(flatten)]
    pub wallet: Wallet,
    pub balances: Vec<Balance>,
}
