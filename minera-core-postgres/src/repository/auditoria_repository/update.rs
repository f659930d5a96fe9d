use async_trait::async_trait;
use minera_core_db::models::auditoria::AuditoriaModel;
use minera_core_db::repository::update::Update;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::AuditoriaRepositoryImpl;
use crate::utils::TryFromRow;

impl AuditoriaRepositoryImpl {
    pub(super) async fn update_impl(
        repo: &AuditoriaRepositoryImpl,
        id: i32,
        item: AuditoriaModel,
    ) -> Result<Option<AuditoriaModel>, Box<dyn Error + Send + Sync>> {
        let query = sqlx::query(
            r#"
            UPDATE auditoria
            SET accion = $1, entidad = $2, descripcion = $3, aud_fecha = $4, aud_usuario = $5
            WHERE id_auditoria = $6
            RETURNING id_auditoria, accion, entidad, descripcion, aud_fecha, aud_usuario
            "#,
        )
        .bind(item.accion.as_str())
        .bind(item.entidad.as_str())
        .bind(item.descripcion.as_str())
        .bind(item.aud_fecha)
        .bind(item.aud_usuario)
        .bind(id);

        let row = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            query.fetch_optional(&mut **transaction).await?
        };

        row.map(|row| AuditoriaModel::try_from_row(&row)).transpose()
    }
}

#[async_trait]
impl Update<Postgres, AuditoriaModel> for AuditoriaRepositoryImpl {
    async fn update(
        &self,
        id: i32,
        item: AuditoriaModel,
    ) -> Result<Option<AuditoriaModel>, Box<dyn Error + Send + Sync>> {
        Self::update_impl(self, id, item).await
    }
}
