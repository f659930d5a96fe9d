pub mod repo_impl;

mod append;
mod delete;
mod find_by_id;
mod list_all;
mod update;

pub use repo_impl::AuditoriaRepositoryImpl;
