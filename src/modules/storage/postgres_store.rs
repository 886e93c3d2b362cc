use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::features::issues::models::Issue;
use crate::features::reports::models::ReportDetail;
use crate::modules::storage::DataStore;

const ISSUE_COLUMNS: &str = "id, subject, address, date, priority, status, lat, lng";

const REPORT_DETAIL_COLUMNS: &str =
    "id, description, assistant_engineer, junior_engineer, subject, address, date, priority, status";

/// Store backed by the `issues` and `report_details` tables
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DataStore for PostgresStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn list_issues(&self) -> Result<Vec<Issue>> {
        sqlx::query_as::<_, Issue>(&format!(
            "SELECT {} FROM issues ORDER BY position",
            ISSUE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list issues: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_issue(&self, id: &str) -> Result<Option<Issue>> {
        sqlx::query_as::<_, Issue>(&format!("SELECT {} FROM issues WHERE id = $1", ISSUE_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get issue by id: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn list_report_details(&self) -> Result<Vec<ReportDetail>> {
        sqlx::query_as::<_, ReportDetail>(&format!(
            "SELECT {} FROM report_details ORDER BY position",
            REPORT_DETAIL_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list report details: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_report_detail(&self, id: &str) -> Result<Option<ReportDetail>> {
        sqlx::query_as::<_, ReportDetail>(&format!(
            "SELECT {} FROM report_details WHERE id = $1",
            REPORT_DETAIL_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get report detail by id: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn insert_report_detail(&self, detail: ReportDetail) -> Result<ReportDetail> {
        sqlx::query_as::<_, ReportDetail>(&format!(
            r#"
            INSERT INTO report_details ({columns})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {columns}
            "#,
            columns = REPORT_DETAIL_COLUMNS
        ))
        .bind(&detail.id)
        .bind(&detail.description)
        .bind(&detail.assistant_engineer)
        .bind(&detail.junior_engineer)
        .bind(&detail.subject)
        .bind(&detail.address)
        .bind(detail.date)
        .bind(detail.priority)
        .bind(detail.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                return AppError::Conflict(format!("Report '{}' already exists", detail.id));
            }
            tracing::error!("Failed to insert report detail: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn replace_all(&self, issues: &[Issue], details: &[ReportDetail]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM report_details")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM issues").execute(&mut *tx).await?;

        if !issues.is_empty() {
            let mut builder: QueryBuilder<Postgres> =
                QueryBuilder::new(format!("INSERT INTO issues ({}) ", ISSUE_COLUMNS));
            builder.push_values(issues, |mut row, issue| {
                row.push_bind(issue.id.clone())
                    .push_bind(issue.subject.clone())
                    .push_bind(issue.address.clone())
                    .push_bind(issue.date)
                    .push_bind(issue.priority)
                    .push_bind(issue.status)
                    .push_bind(issue.lat)
                    .push_bind(issue.lng);
            });
            builder.build().execute(&mut *tx).await?;
        }

        if !details.is_empty() {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
                "INSERT INTO report_details ({}) ",
                REPORT_DETAIL_COLUMNS
            ));
            builder.push_values(details, |mut row, detail| {
                row.push_bind(detail.id.clone())
                    .push_bind(detail.description.clone())
                    .push_bind(detail.assistant_engineer.clone())
                    .push_bind(detail.junior_engineer.clone())
                    .push_bind(detail.subject.clone())
                    .push_bind(detail.address.clone())
                    .push_bind(detail.date)
                    .push_bind(detail.priority)
                    .push_bind(detail.status);
            });
            builder.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;
        tracing::info!(
            "Replaced storage contents: {} issues, {} report details",
            issues.len(),
            details.len()
        );
        Ok(())
    }
}
