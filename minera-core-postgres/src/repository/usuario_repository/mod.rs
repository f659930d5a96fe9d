pub mod repo_impl;

mod find_by_username;

pub use repo_impl::UsuarioRepositoryImpl;
