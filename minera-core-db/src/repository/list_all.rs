use async_trait::async_trait;
use sqlx::Database;

use crate::repository::pagination::{Page, PageRequest};

/// Generic repository trait for listing read-model rows with pagination
///
/// The ordering is part of each implementation's contract; audit records
/// come back sorted by their event timestamp, most recent first.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The read-model type returned by the listing
///
/// # Example
/// ```ignore
/// use minera_core_db::repository::pagination::PageRequest;
///
/// let page = repo.list_all(PageRequest::new(20, 0)).await?;
/// println!("Page {} of {}", page.page_number(), page.total_pages());
/// ```
#[async_trait]
pub trait ListAll<DB: Database, T>: Send + Sync {
    /// Load one page of records
    ///
    /// # Arguments
    /// * `page` - The pagination parameters (limit and offset)
    ///
    /// # Returns
    /// * `Ok(Page<T>)` - A page of records plus the total count
    /// * `Err` - An error if the query could not be executed
    async fn list_all(
        &self,
        page: PageRequest,
    ) -> Result<Page<T>, Box<dyn std::error::Error + Send + Sync>>;
}
