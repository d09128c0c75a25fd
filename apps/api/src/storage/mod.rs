//! External collaborators the engine reads from and writes to.
//!
//! Handlers only see the traits; `main` wires the S3/Postgres implementations
//! and tests wire the in-memory ones.

pub mod postgres;
pub mod s3;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::models::JobPosting;
use crate::resume::extract::RawDocument;
use crate::resume::models::StoredDocument;

/// Stored bytes plus their metadata.
#[derive(Debug, Clone)]
pub struct DocumentBlob {
    pub meta: StoredDocument,
    pub bytes: Bytes,
}

/// Byte-addressable store for uploaded resumes, keyed by an opaque id.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn put(&self, filename: &str, document: &RawDocument) -> Result<StoredDocument, AppError>;

    /// `Ok(None)` when no document has that id.
    async fn get(&self, id: Uuid) -> Result<Option<DocumentBlob>, AppError>;
}

/// Source of job postings to rank, newest first.
#[async_trait]
pub trait JobCatalog: Send + Sync {
    async fn list_jobs(&self) -> Result<Vec<JobPosting>, AppError>;
}
