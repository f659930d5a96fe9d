use sqlx::PgPool;
use std::sync::Arc;

use crate::executor::Executor;
use crate::repository::auditoria_repository::AuditoriaRepositoryImpl;
use crate::repository::usuario_repository::UsuarioRepositoryImpl;
use crate::store::{PostgresAuditoriaStore, PostgresDirectorioUsuarios};

pub struct PostgresRepositories {
    pool: Arc<PgPool>,
}

impl PostgresRepositories {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Create all repositories sharing a single session transaction
    pub async fn create_all_repositories(&self) -> Result<Repositories, sqlx::Error> {
        let executor = Executor::begin(self.pool.clone()).await?;

        Ok(Repositories {
            auditoria_repository: Arc::new(AuditoriaRepositoryImpl::new(executor.clone())),
            usuario_repository: Arc::new(UsuarioRepositoryImpl::new(executor.clone())),
            executor,
        })
    }
}

/// The repositories of one request-scoped session.
pub struct Repositories {
    pub auditoria_repository: Arc<AuditoriaRepositoryImpl>,
    pub usuario_repository: Arc<UsuarioRepositoryImpl>,
    pub executor: Executor,
}

impl Repositories {
    /// Store adapter backing the audit write service and logger.
    pub fn auditoria_store(&self) -> PostgresAuditoriaStore {
        PostgresAuditoriaStore::new(self.auditoria_repository.clone(), self.executor.clone())
    }

    /// Directory adapter backing actor resolution.
    pub fn directorio_usuarios(&self) -> PostgresDirectorioUsuarios {
        PostgresDirectorioUsuarios::new(self.usuario_repository.clone())
    }
}
