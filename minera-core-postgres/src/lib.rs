pub mod executor;
pub mod postgres_repositories;
pub mod repository;
pub mod store;
pub mod utils;

pub use executor::Executor;
pub use postgres_repositories::PostgresRepositories;
pub use repository::auditoria_repository::AuditoriaRepositoryImpl;
pub use repository::usuario_repository::UsuarioRepositoryImpl;
pub use store::{PostgresAuditoriaStore, PostgresDirectorioUsuarios};

#[cfg(test)]
pub mod test_helper;
