use async_trait::async_trait;
use minera_core_db::repository::delete::Delete;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::AuditoriaRepositoryImpl;

impl AuditoriaRepositoryImpl {
    pub(super) async fn delete_impl(
        repo: &AuditoriaRepositoryImpl,
        id: i32,
    ) -> Result<bool, Box<dyn Error + Send + Sync>> {
        let query = sqlx::query("DELETE FROM auditoria WHERE id_auditoria = $1").bind(id);

        let result = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            query.execute(&mut **transaction).await?
        };

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl Delete<Postgres> for AuditoriaRepositoryImpl {
    async fn delete(&self, id: i32) -> Result<bool, Box<dyn Error + Send + Sync>> {
        Self::delete_impl(self, id).await
    }
}
