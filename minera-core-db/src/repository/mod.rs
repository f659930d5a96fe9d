pub mod append;
pub mod delete;
pub mod find_by_id;
pub mod find_by_username;
pub mod list_all;
pub mod pagination;
pub mod update;

// Re-exports
pub use append::*;
pub use delete::*;
pub use find_by_id::*;
pub use find_by_username::*;
pub use list_all::*;
pub use pagination::*;
pub use update::*;
