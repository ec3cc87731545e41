use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{RepositoryError, SummaryRepository};
use crate::domain::{Summary, SummaryId, SummaryStatus, SummaryTexts};

pub struct PgSummaryRepository {
    pool: PgPool,
}

impl PgSummaryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn query_failed(e: sqlx::Error) -> RepositoryError {
    RepositoryError::QueryFailed(e.to_string())
}

fn map_row(row: &PgRow) -> Result<Summary, RepositoryError> {
    let external_id: Uuid = row.try_get("external_id").map_err(query_failed)?;
    let status_str: String = row.try_get("status").map_err(query_failed)?;
    let status = status_str
        .parse::<SummaryStatus>()
        .map_err(RepositoryError::QueryFailed)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(query_failed)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(query_failed)?;

    let title: Option<String> = row.try_get("title").map_err(query_failed)?;
    let description: Option<String> = row.try_get("description").map_err(query_failed)?;
    let brief_resume: Option<String> = row.try_get("brief_resume").map_err(query_failed)?;
    let medium_resume: Option<String> = row.try_get("medium_resume").map_err(query_failed)?;
    let full_text: Option<String> = row.try_get("full_text").map_err(query_failed)?;

    // Text columns are written together on the final successful checkpoint;
    // a row only carries a payload when all five are present.
    let texts = match (title, description, brief_resume, medium_resume, full_text) {
        (Some(title), Some(description), Some(brief_resume), Some(medium_resume), Some(full_text)) => {
            Some(SummaryTexts {
                title,
                description,
                brief_resume,
                medium_resume,
                full_text,
            })
        }
        _ => None,
    };

    Ok(Summary {
        external_id: SummaryId::from_uuid(external_id),
        status,
        created_at,
        updated_at,
        texts,
    })
}

const SUMMARY_COLUMNS: &str = "external_id, status, created_at, updated_at, \
     title, description, brief_resume, medium_resume, full_text";

#[async_trait]
impl SummaryRepository for PgSummaryRepository {
    #[instrument(skip(self), fields(status = %status))]
    async fn create(&self, status: SummaryStatus) -> Result<Summary, RepositoryError> {
        let external_id = SummaryId::new();
        let now = Utc::now();

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO summaries (external_id, status, progress, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {SUMMARY_COLUMNS}
            "#
        ))
        .bind(external_id.as_uuid())
        .bind(status.as_str())
        .bind(status.progress())
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(query_failed)?;

        map_row(&row)
    }

    #[instrument(skip(self), fields(external_id = %id, status = %status))]
    async fn update_transcribed(
        &self,
        id: SummaryId,
        status: SummaryStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE summaries
            SET status = $2, progress = $3, updated_at = $4
            WHERE external_id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(status.as_str())
        .bind(status.progress())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(query_failed)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id.to_string()));
        }

        Ok(())
    }

    #[instrument(skip(self, texts), fields(external_id = %id, status = %status))]
    async fn update_summarized(
        &self,
        id: SummaryId,
        status: SummaryStatus,
        texts: Option<&SummaryTexts>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE summaries
            SET status = $2, progress = $3, updated_at = $4,
                title = $5, description = $6, brief_resume = $7,
                medium_resume = $8, full_text = $9
            WHERE external_id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(status.as_str())
        .bind(status.progress())
        .bind(Utc::now())
        .bind(texts.map(|t| t.title.as_str()))
        .bind(texts.map(|t| t.description.as_str()))
        .bind(texts.map(|t| t.brief_resume.as_str()))
        .bind(texts.map(|t| t.medium_resume.as_str()))
        .bind(texts.map(|t| t.full_text.as_str()))
        .execute(&self.pool)
        .await
        .map_err(query_failed)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id.to_string()));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Summary>, RepositoryError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {SUMMARY_COLUMNS}
            FROM summaries
            ORDER BY updated_at DESC
            "#
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed)?;

        rows.iter().map(map_row).collect()
    }

    #[instrument(skip(self), fields(external_id = %id))]
    async fn get_by_id(&self, id: SummaryId) -> Result<Summary, RepositoryError> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {SUMMARY_COLUMNS}
            FROM summaries
            WHERE external_id = $1
            "#
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_failed)?;

        match row {
            Some(row) => map_row(&row),
            None => Err(RepositoryError::NotFound(id.to_string())),
        }
    }

    #[instrument(skip(self), fields(external_id = %id))]
    async fn delete(&self, id: SummaryId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM summaries WHERE external_id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(query_failed)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
