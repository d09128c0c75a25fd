use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::matching::models::JobPosting;
use crate::storage::JobCatalog;

/// Reads postings from the `jobs` table owned by the job-board CRUD service.
#[derive(Clone)]
pub struct PgJobCatalog {
    pool: PgPool,
}

impl PgJobCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool sized for read-only catalog queries.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        info!("Connecting to PostgreSQL (max {max_connections} connections)...");

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        info!("PostgreSQL connection pool established");
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl JobCatalog for PgJobCatalog {
    async fn list_jobs(&self) -> Result<Vec<JobPosting>, AppError> {
        let jobs = sqlx::query_as::<_, JobPosting>(
            r#"
            SELECT id,
                   title,
                   COALESCE(skill_tags, '{}') AS skill_tags,
                   COALESCE(requirements, '{}') AS requirements,
                   COALESCE(experience_level, 0)::DOUBLE PRECISION AS experience_level_years,
                   COALESCE(location, '') AS location
            FROM jobs
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(jobs)
    }
}
