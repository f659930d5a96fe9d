use async_trait::async_trait;
use std::sync::Arc;

use minera_core_api::domain::auditoria::{Auditoria, NuevaAuditoria};
use minera_core_api::domain::usuario::Usuario;
use minera_core_api::error::{ApiError, ApiResult};
use minera_core_api::service::{AuditoriaStore, DirectorioUsuarios};
use minera_core_db::models::auditoria::AuditoriaModel;
use minera_core_db::repository::append::Append;
use minera_core_db::repository::delete::Delete;
use minera_core_db::repository::find_by_id::FindById;
use minera_core_db::repository::find_by_username::FindByUsername;
use minera_core_db::repository::list_all::ListAll;
use minera_core_db::repository::pagination::PageRequest;
use minera_core_db::repository::update::Update;

use crate::executor::Executor;
use crate::repository::auditoria_repository::AuditoriaRepositoryImpl;
use crate::repository::usuario_repository::UsuarioRepositoryImpl;

fn db_error(error: Box<dyn std::error::Error + Send + Sync>) -> ApiError {
    ApiError::DatabaseError(error.to_string())
}

fn modelo_de(nueva: NuevaAuditoria) -> AuditoriaModel {
    AuditoriaModel {
        id_auditoria: 0,
        accion: nueva.accion,
        entidad: nueva.entidad,
        descripcion: nueva.descripcion,
        aud_fecha: nueva.aud_fecha,
        aud_usuario: nueva.aud_usuario,
    }
}

/// `AuditoriaStore` over the Postgres repositories. Each mutating
/// operation commits its session transaction; `rollback` resets it.
pub struct PostgresAuditoriaStore {
    repo: Arc<AuditoriaRepositoryImpl>,
    executor: Executor,
}

impl PostgresAuditoriaStore {
    pub fn new(repo: Arc<AuditoriaRepositoryImpl>, executor: Executor) -> Self {
        Self { repo, executor }
    }

    async fn commit(&self) -> ApiResult<()> {
        self.executor
            .commit()
            .await
            .map_err(|e| ApiError::DatabaseError(e.to_string()))
    }
}

#[async_trait]
impl AuditoriaStore for PostgresAuditoriaStore {
    async fn append(&self, nueva: NuevaAuditoria) -> ApiResult<Auditoria> {
        let guardada = self
            .repo
            .append(modelo_de(nueva))
            .await
            .map_err(db_error)?;
        self.commit().await?;
        Ok(guardada.into())
    }

    async fn find_by_id(&self, id: i32) -> ApiResult<Option<Auditoria>> {
        let fila = self.repo.find_by_id(id).await.map_err(db_error)?;
        Ok(fila.map(Into::into))
    }

    async fn list_all(&self, offset: usize, limit: usize) -> ApiResult<Vec<Auditoria>> {
        let page = self
            .repo
            .list_all(PageRequest::new(limit, offset))
            .await
            .map_err(db_error)?;
        Ok(page.items.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i32, cambios: NuevaAuditoria) -> ApiResult<Option<Auditoria>> {
        let actualizada = self
            .repo
            .update(id, modelo_de(cambios))
            .await
            .map_err(db_error)?;
        if actualizada.is_some() {
            self.commit().await?;
        }
        Ok(actualizada.map(Into::into))
    }

    async fn delete(&self, id: i32) -> ApiResult<bool> {
        let eliminada = self.repo.delete(id).await.map_err(db_error)?;
        if eliminada {
            self.commit().await?;
        }
        Ok(eliminada)
    }

    async fn rollback(&self) -> ApiResult<()> {
        self.executor
            .rollback()
            .await
            .map_err(|e| ApiError::DatabaseError(e.to_string()))
    }
}

/// `DirectorioUsuarios` over the Postgres user repository.
pub struct PostgresDirectorioUsuarios {
    repo: Arc<UsuarioRepositoryImpl>,
}

impl PostgresDirectorioUsuarios {
    pub fn new(repo: Arc<UsuarioRepositoryImpl>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl DirectorioUsuarios for PostgresDirectorioUsuarios {
    async fn find_by_username(&self, nombre_usuario: &str) -> ApiResult<Option<Usuario>> {
        let usuario = self
            .repo
            .find_by_username(nombre_usuario)
            .await
            .map_err(db_error)?;
        Ok(usuario.map(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use minera_core_api::domain::filtros::FiltrosExportacion;
    use minera_core_api::domain::usuario::Claims;
    use minera_core_api::service::{AuditLogger, ServicioAuditorias};
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    #[ignore = "requires DATABASE_URL pointing at a migrated Postgres"]
    async fn test_logger_writes_through_the_store(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.repos();

        let logger = AuditLogger::new(
            repos.auditoria_store(),
            repos.directorio_usuarios(),
            Claims::de_id(7),
        );
        logger
            .log_creacion(
                "PropiedadMineraStoreTest",
                1,
                Some(serde_json::json!({"Nombre": "Mina Sur"})),
            )
            .await;

        let servicio = ServicioAuditorias::new(repos.auditoria_store());
        let registros = servicio.listar(0, 50).await?;
        let filtros = FiltrosExportacion {
            entidad: vec!["PropiedadMineraStoreTest".into()],
            ..Default::default()
        };
        let filtradas = filtros.aplicar(registros);

        assert!(!filtradas.is_empty());
        assert_eq!(filtradas[0].accion, "CREATE");
        assert_eq!(filtradas[0].aud_usuario, 7);
        Ok(())
    }
}
