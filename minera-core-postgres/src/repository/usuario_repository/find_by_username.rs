use async_trait::async_trait;
use minera_core_db::models::usuario::UsuarioModel;
use minera_core_db::repository::find_by_username::FindByUsername;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::UsuarioRepositoryImpl;
use crate::utils::TryFromRow;

impl UsuarioRepositoryImpl {
    pub(super) async fn find_by_username_impl(
        repo: &UsuarioRepositoryImpl,
        nombre_usuario: &str,
    ) -> Result<Option<UsuarioModel>, Box<dyn Error + Send + Sync>> {
        let query = sqlx::query(
            r#"
            SELECT id_usuario, nombre_usuario, nombre_completo
            FROM usuario
            WHERE nombre_usuario = $1
            "#,
        )
        .bind(nombre_usuario);

        let row = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            query.fetch_optional(&mut **transaction).await?
        };

        row.map(|row| UsuarioModel::try_from_row(&row)).transpose()
    }
}

#[async_trait]
impl FindByUsername<Postgres, UsuarioModel> for UsuarioRepositoryImpl {
    async fn find_by_username(
        &self,
        nombre_usuario: &str,
    ) -> Result<Option<UsuarioModel>, Box<dyn Error + Send + Sync>> {
        Self::find_by_username_impl(self, nombre_usuario).await
    }
}
