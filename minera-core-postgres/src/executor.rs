use std::sync::Arc;

use sqlx::{PgPool, Postgres, Transaction};
use tokio::sync::Mutex;

/// Session-scoped transaction handle shared by every repository created for
/// one request.
///
/// The slot is `None` only transiently, while a commit or rollback swaps
/// transactions; repositories treat that state as a consumed transaction.
/// `rollback` always leaves a fresh transaction behind, so a failed audit
/// write never poisons the operations that follow on the same session.
#[derive(Clone)]
pub struct Executor {
    pool: Arc<PgPool>,
    pub tx: Arc<Mutex<Option<Transaction<'static, Postgres>>>>,
}

impl Executor {
    /// Begin a transaction on `pool` and wrap it.
    pub async fn begin(pool: Arc<PgPool>) -> Result<Self, sqlx::Error> {
        let tx = pool.begin().await?;
        Ok(Self {
            pool,
            tx: Arc::new(Mutex::new(Some(tx))),
        })
    }

    /// Commit the current transaction and begin a fresh one.
    pub async fn commit(&self) -> Result<(), sqlx::Error> {
        let mut guard = self.tx.lock().await;
        if let Some(tx) = guard.take() {
            tx.commit().await?;
        }
        *guard = Some(self.pool.begin().await?);
        Ok(())
    }

    /// Roll back the current transaction and begin a fresh one.
    pub async fn rollback(&self) -> Result<(), sqlx::Error> {
        let mut guard = self.tx.lock().await;
        if let Some(tx) = guard.take() {
            tx.rollback().await?;
        }
        *guard = Some(self.pool.begin().await?);
        tracing::debug!("Transacción revertida, sesión restablecida");
        Ok(())
    }
}
