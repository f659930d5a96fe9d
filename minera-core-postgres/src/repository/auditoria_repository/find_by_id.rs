use async_trait::async_trait;
use minera_core_db::models::auditoria::AuditoriaConUsuario;
use minera_core_db::repository::find_by_id::FindById;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::{AuditoriaRepositoryImpl, SELECT_CON_USUARIO};
use crate::utils::TryFromRow;

impl AuditoriaRepositoryImpl {
    pub(super) async fn find_by_id_impl(
        repo: &AuditoriaRepositoryImpl,
        id: i32,
    ) -> Result<Option<AuditoriaConUsuario>, Box<dyn Error + Send + Sync>> {
        let sql = format!("{SELECT_CON_USUARIO} WHERE a.id_auditoria = $1");
        let query = sqlx::query(&sql).bind(id);

        let row = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            query.fetch_optional(&mut **transaction).await?
        };

        row.map(|row| AuditoriaConUsuario::try_from_row(&row))
            .transpose()
    }
}

#[async_trait]
impl FindById<Postgres, AuditoriaConUsuario> for AuditoriaRepositoryImpl {
    async fn find_by_id(
        &self,
        id: i32,
    ) -> Result<Option<AuditoriaConUsuario>, Box<dyn Error + Send + Sync>> {
        Self::find_by_id_impl(self, id).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::{nueva_auditoria_de_prueba, setup_test_context};
    use minera_core_db::repository::append::Append;
    use minera_core_db::repository::find_by_id::FindById;
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    #[ignore = "requires DATABASE_URL pointing at a migrated Postgres"]
    async fn test_find_by_id_enriches_with_usuario(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repo = &ctx.repos().auditoria_repository;

        let guardada = repo
            .append(nueva_auditoria_de_prueba("UPDATE", "Expediente"))
            .await?;
        let encontrada = repo.find_by_id(guardada.id_auditoria).await?;

        let encontrada = encontrada.expect("record just appended");
        assert_eq!(encontrada.auditoria.entidad, "Expediente");
        // The test actor id matches no usuario row; the outer join keeps
        // the record and leaves the name empty.
        assert!(encontrada.usuario_nombre.is_none());
        Ok(())
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires DATABASE_URL pointing at a migrated Postgres"]
    async fn test_find_by_id_missing_is_none(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repo = &ctx.repos().auditoria_repository;

        assert!(repo.find_by_id(-1).await?.is_none());
        Ok(())
    }
}
