use async_trait::async_trait;
use minera_core_db::models::auditoria::AuditoriaConUsuario;
use minera_core_db::repository::list_all::ListAll;
use minera_core_db::repository::pagination::{Page, PageRequest};
use sqlx::{Postgres, Row};
use std::error::Error;

use super::repo_impl::{AuditoriaRepositoryImpl, SELECT_CON_USUARIO};
use crate::utils::TryFromRow;

impl AuditoriaRepositoryImpl {
    pub(super) async fn list_all_impl(
        repo: &AuditoriaRepositoryImpl,
        page: PageRequest,
    ) -> Result<Page<AuditoriaConUsuario>, Box<dyn Error + Send + Sync>> {
        let sql = format!("{SELECT_CON_USUARIO} ORDER BY a.aud_fecha DESC OFFSET $1 LIMIT $2");
        let query = sqlx::query(&sql)
            .bind(page.offset as i64)
            .bind(page.limit as i64);
        let count = sqlx::query("SELECT COUNT(*) AS total FROM auditoria");

        let (rows, total) = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            let rows = query.fetch_all(&mut **transaction).await?;
            let total: i64 = count
                .fetch_one(&mut **transaction)
                .await?
                .try_get("total")?;
            (rows, total)
        };

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(AuditoriaConUsuario::try_from_row(&row)?);
        }
        Ok(Page::new(items, total as usize, page.limit, page.offset))
    }
}

#[async_trait]
impl ListAll<Postgres, AuditoriaConUsuario> for AuditoriaRepositoryImpl {
    async fn list_all(
        &self,
        page: PageRequest,
    ) -> Result<Page<AuditoriaConUsuario>, Box<dyn Error + Send + Sync>> {
        Self::list_all_impl(self, page).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::{nueva_auditoria_de_prueba, setup_test_context};
    use minera_core_db::repository::append::Append;
    use minera_core_db::repository::list_all::ListAll;
    use minera_core_db::repository::pagination::PageRequest;
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    #[ignore = "requires DATABASE_URL pointing at a migrated Postgres"]
    async fn test_list_all_is_most_recent_first(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repo = &ctx.repos().auditoria_repository;

        for accion in ["CREATE", "UPDATE", "DELETE"] {
            repo.append(nueva_auditoria_de_prueba(accion, "PropiedadMinera"))
                .await?;
        }

        let page = repo.list_all(PageRequest::new(10, 0)).await?;
        assert!(page.total >= 3);
        let fechas: Vec<_> = page
            .items
            .iter()
            .map(|item| item.auditoria.aud_fecha)
            .collect();
        let mut ordenadas = fechas.clone();
        ordenadas.sort_by(|a, b| b.cmp(a));
        assert_eq!(fechas, ordenadas);
        Ok(())
    }
}
