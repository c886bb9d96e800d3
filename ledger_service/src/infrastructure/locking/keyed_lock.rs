use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Notify};
use tokio::time::Instant;
use uuid::Uuid;

use crate::domain::error::LedgerError;
use crate::domain::locking::{LockManager, LockToken};

struct LockEntry {
    owner: Uuid,
    expires_at: Instant,
}

/// Mutex por clave en memoria, con lease acotado.
///
/// Sirve como primitiva de coordinación para un despliegue de un solo
/// proceso: todos los escritores de un (wallet, credit_type) pasan por aquí.
/// El lease limita el daño de un holder colgado: vencido el plazo, la clave
/// vuelve a estar disponible y `release` con el token viejo se vuelve no-op
/// (compare-and-delete). No es una primitiva de durabilidad.
pub struct KeyedLockManager {
    entries: Mutex<HashMap<String, LockEntry>>,
    released: Notify,
}

/// Intervalo de re-chequeo cuando nadie notifica (cubre la expiración de un
/// lease sin release explícito).
const RETRY_INTERVAL: Duration = Duration::from_millis(25);

impl KeyedLockManager {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            entries: Mutex::new(HashMap::new()),
            released: Notify::new(),
        })
    }

    async fn try_acquire(&self, key: &str, lease: Duration) -> Option<LockToken> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        match entries.get(key) {
            Some(entry) if entry.expires_at > now => None,
            _ => {
                // La clave está libre o su lease venció: la tomamos.
                let owner = Uuid::new_v4();
                entries.insert(
                    key.to_string(),
                    LockEntry {
                        owner,
                        expires_at: now + lease,
                    },
                );
                Some(LockToken {
                    key: key.to_string(),
                    owner,
                })
            }
        }
    }
}

#[async_trait]
impl LockManager for KeyedLockManager {
    async fn acquire(
        &self,
        key: String,
        lease: Duration,
        wait_timeout: Duration,
    ) -> Result<LockToken, LedgerError> {
        let deadline = Instant::now() + wait_timeout;

        loop {
            if let Some(token) = self.try_acquire(&key, lease).await {
                return Ok(token);
            }
            if Instant::now() >= deadline {
                tracing::warn!(key = %key, "balance write lock acquisition timed out");
                return Err(LedgerError::Busy);
            }

            // Esperamos un release o, en su defecto, re-chequeamos pronto por
            // si algún lease venció sin notificación.
            let notified = self.released.notified();
            tokio::select! {
                _ = notified => {}
                _ = tokio::time::sleep(RETRY_INTERVAL) => {}
            }
        }
    }

    async fn release(&self, token: LockToken) {
        let mut entries = self.entries.lock().await;
        if let Some(entry) = entries.get(&token.key) {
            if entry.owner == token.owner {
                entries.remove(&token.key);
                drop(entries);
                self.released.notify_waiters();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEASE: Duration = Duration::from_secs(5);
    const WAIT: Duration = Duration::from_millis(500);

    #[tokio::test]
    async fn test_acquire_and_release_round_trip() {
        let manager = KeyedLockManager::new();

        let token = manager
            .acquire("k".to_string(), LEASE, WAIT)
            .await
            .unwrap();
        manager.release(token).await;

        // Tras el release la clave vuelve a estar disponible de inmediato.
        let token = manager
            .acquire("k".to_string(), LEASE, WAIT)
            .await
            .unwrap();
        manager.release(token).await;
    }

    #[tokio::test]
    async fn test_same_key_times_out_while_held() {
        let manager = KeyedLockManager::new();

        let _held = manager
            .acquire("k".to_string(), LEASE, WAIT)
            .await
            .unwrap();

        let result = manager
            .acquire("k".to_string(), LEASE, Duration::from_millis(100))
            .await;
        assert!(matches!(result, Err(LedgerError::Busy)));
    }

    #[tokio::test]
    async fn test_disjoint_keys_do_not_block_each_other() {
        let manager = KeyedLockManager::new();

        let first = manager
            .acquire("balance_write_lock:w:points".to_string(), LEASE, WAIT)
            .await
            .unwrap();
        let second = manager
            .acquire("balance_write_lock:w:tokens".to_string(), LEASE, WAIT)
            .await
            .unwrap();

        manager.release(first).await;
        manager.release(second).await;
    }

    #[tokio::test]
    async fn test_waiter_acquires_after_release() {
        let manager = KeyedLockManager::new();

        let held = manager
            .acquire("k".to_string(), LEASE, WAIT)
            .await
            .unwrap();

        let waiter = {
            let manager = manager.clone();
            tokio::spawn(async move {
                manager
                    .acquire("k".to_string(), LEASE, Duration::from_secs(2))
                    .await
            })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        manager.release(held).await;

        let result = waiter.await.unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_expired_lease_is_claimable() {
        let manager = KeyedLockManager::new();

        let stale = manager
            .acquire("k".to_string(), Duration::from_millis(50), WAIT)
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(80)).await;

        // El lease venció: otro llamador puede tomar la clave.
        let fresh = manager
            .acquire("k".to_string(), LEASE, WAIT)
            .await
            .unwrap();

        // El release del token viejo es un no-op y no suelta al nuevo dueño.
        manager.release(stale).await;
        let still_held = manager
            .acquire("k".to_string(), LEASE, Duration::from_millis(100))
            .await;
        assert!(matches!(still_held, Err(LedgerError::Busy)));

        manager.release(fresh).await;
    }

    #[tokio::test]
    async fn test_concurrent_writers_serialize_per_key() {
        let manager = KeyedLockManager::new();
        let in_section = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let mut tasks = Vec::new();

        for _ in 0..8 {
            let manager = manager.clone();
            let in_section = in_section.clone();
            tasks.push(tokio::spawn(async move {
                let token = manager
                    .acquire("k".to_string(), LEASE, Duration::from_secs(5))
                    .await
                    .unwrap();

                // Nunca debe haber dos tareas dentro de la sección crítica.
                let concurrent = in_section.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                assert_eq!(concurrent, 0);
                tokio::time::sleep(Duration::from_millis(10)).await;
                in_section.fetch_sub(1, std::sync::atomic::Ordering::SeqCst);

                manager.release(token).await;
            }));
        }

        for task in tasks {
            task.await.unwrap();
        }
    }
}
