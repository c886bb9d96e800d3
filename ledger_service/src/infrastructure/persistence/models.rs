use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::FromRow;

use crate::domain::entities::{
    Balance, BalanceSnapshot, CreditType, Wallet, WalletStatus,
};
use crate::domain::transactions::{
    HoldStatus, Transaction, TransactionPayload, TransactionStatus, TransactionType,
};
use crate::domain::types::{CreditTypeId, TransactionId, WalletId};

// Modelo de Base de Datos para Wallet (especifico de SQLx)
// Representa la tabla 'wallets' en PostgreSQL.
#[derive(Debug, FromRow)]
pub struct WalletModel {
    pub id: WalletId,
    pub name: String,
    pub context: serde_json::Value,
    pub status: WalletStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WalletModel> for Wallet {
    fn from(m: WalletModel) -> Self {
        Self {
            id: m.id,
            name: m.name,
            context: m.context,
            status: m.status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

// Modelo de Base de Datos para CreditType.
#[derive(Debug, FromRow)]
pub struct CreditTypeModel {
    pub id: CreditTypeId,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CreditTypeModel> for CreditType {
    fn from(m: CreditTypeModel) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

// Modelo de Base de Datos para Balance.
// Los contadores llegan como NUMERIC y se mapean a Decimal sin pasar por
// flotantes binarios.
#[derive(Debug, FromRow)]
pub struct BalanceModel {
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

impl From<BalanceModel> for Balance {
    fn from(m: BalanceModel) -> Self {
        Self {
            id: m.id,
            wallet_id: m.wallet_id,
            credit_type_id: m.credit_type_id,
            available: m.available,
            held: m.held,
            spent: m.spent,
            overall_spent: m.overall_spent,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

// Modelo de Base de Datos para Transaction.
// El payload y el snapshot viajan como JSONB tipado via `sqlx::types::Json`.
#[derive(Debug, FromRow)]
pub struct TransactionModel {
    pub id: TransactionId,
    #[sqlx(rename = "type")]
    pub transaction_type: TransactionType,
    pub external_id: Option<String>,
    pub wallet_id: WalletId,
    pub credit_type_id: CreditTypeId,
    pub issuer: String,
    pub description: String,
    pub context: serde_json::Value,
    pub payload: Json<TransactionPayload>,
    pub hold_status: Option<HoldStatus>,
    pub status: TransactionStatus,
    pub balance_snapshot: Option<Json<BalanceSnapshot>>,
    pub subscription_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TransactionModel> for Transaction {
    fn from(m: TransactionModel) -> Self {
        Self {
            id: m.id,
            transaction_type: m.transaction_type,
            wallet_id: m.wallet_id,
            credit_type_id: m.credit_type_id,
            issuer: m.issuer,
            description: m.description,
            context: m.context,
            payload: m.payload.0,
            external_id: m.external_id,
            status: m.status,
            hold_status: m.hold_status,
            balance_snapshot: m.balance_snapshot.map(|s| s.0),
            subscription_id: m.subscription_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
