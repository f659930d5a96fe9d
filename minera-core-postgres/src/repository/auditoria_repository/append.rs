use async_trait::async_trait;
use minera_core_db::models::auditoria::AuditoriaModel;
use minera_core_db::repository::append::Append;
use sqlx::{Postgres, Row};
use std::error::Error;

use super::repo_impl::AuditoriaRepositoryImpl;

impl AuditoriaRepositoryImpl {
    pub(super) async fn append_impl(
        repo: &AuditoriaRepositoryImpl,
        mut item: AuditoriaModel,
    ) -> Result<AuditoriaModel, Box<dyn Error + Send + Sync>> {
        let query = sqlx::query(
            r#"
            INSERT INTO auditoria (accion, entidad, descripcion, aud_fecha, aud_usuario)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id_auditoria
            "#,
        )
        .bind(item.accion.as_str())
        .bind(item.entidad.as_str())
        .bind(item.descripcion.as_str())
        .bind(item.aud_fecha)
        .bind(item.aud_usuario);

        let row = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            query.fetch_one(&mut **transaction).await?
        };

        item.id_auditoria = row.try_get("id_auditoria")?;
        Ok(item)
    }
}

#[async_trait]
impl Append<Postgres, AuditoriaModel> for AuditoriaRepositoryImpl {
    async fn append(
        &self,
        item: AuditoriaModel,
    ) -> Result<AuditoriaModel, Box<dyn Error + Send + Sync>> {
        Self::append_impl(self, item).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::{nueva_auditoria_de_prueba, setup_test_context};
    use minera_core_db::repository::append::Append;
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    #[ignore = "requires DATABASE_URL pointing at a migrated Postgres"]
    async fn test_append_assigns_id() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repo = &ctx.repos().auditoria_repository;

        let guardada = repo
            .append(nueva_auditoria_de_prueba("CREATE", "PropiedadMinera"))
            .await?;

        assert!(guardada.id_auditoria > 0);
        assert_eq!(guardada.accion, "CREATE");
        Ok(())
    }
}
