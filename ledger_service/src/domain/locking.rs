use async_trait::async_trait;
use std::time::Duration;
use uuid::Uuid;

use crate::domain::error::LedgerError;
use crate::domain::types::{CreditTypeId, WalletId};

/// Lease por defecto de un lock de escritura de balance.
///
/// Un handler que exceda el lease pierde la exclusividad: el lock no debe
/// usarse como primitiva de durabilidad (eso lo da la transacción de BD).
pub const DEFAULT_LOCK_LEASE: Duration = Duration::from_secs(20);

/// Espera máxima para adquirir el lock antes de responder Busy.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

const BALANCE_WRITE_LOCK_NAMESPACE: &str = "balance_write_lock";

/// Clave estable del mutex por (wallet, credit_type).
pub fn balance_write_lock_key(wallet_id: &WalletId, credit_type_id: &CreditTypeId) -> String {
    format!(
        "{}:{}:{}",
        BALANCE_WRITE_LOCK_NAMESPACE, wallet_id, credit_type_id
    )
}

/// Token de propiedad devuelto por `acquire`.
///
/// `release` solo libera si el dueño coincide (compare-and-delete), de modo
/// que un holder cuyo lease expiró no pueda soltar el lock de un tercero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockToken {
    pub key: String,
    pub owner: Uuid,
}

/// Port: mutex por clave con lease acotado.
///
/// Dentro del despliegue debe existir a lo sumo un holder por clave; dos
/// claves distintas nunca se bloquean entre sí.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LockManager: Send + Sync {
    /// Bloquea hasta adquirir la clave o agotar `wait_timeout` (-> `Busy`).
    async fn acquire(
        &self,
        key: String,
        lease: Duration,
        wait_timeout: Duration,
    ) -> Result<LockToken, LedgerError>;

    /// Libera el lock si el token todavía es el dueño; si no, es un no-op.
    async fn release(&self, token: LockToken);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_key_includes_both_identifiers() {
        let key = balance_write_lock_key(
            &WalletId("w".to_string()),
            &CreditTypeId("ct".to_string()),
        );
        assert_eq!(key, "balance_write_lock:w:ct");
    }

    #[test]
    fn test_lock_keys_differ_per_pair() {
        let wallet = WalletId("w".to_string());
        let points = balance_write_lock_key(&wallet, &CreditTypeId("points".to_string()));
        let tokens = balance_write_lock_key(&wallet, &CreditTypeId("tokens".to_string()));
        assert_ne!(points, tokens);
    }
}
