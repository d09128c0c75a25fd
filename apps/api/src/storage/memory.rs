use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::models::JobPosting;
use crate::resume::extract::RawDocument;
use crate::resume::models::StoredDocument;
use crate::storage::{DocumentBlob, DocumentStore, JobCatalog};

#[derive(Default)]
pub struct InMemoryDocumentStore {
    blobs: Mutex<HashMap<Uuid, DocumentBlob>>,
}

impl InMemoryDocumentStore {
    pub fn len(&self) -> usize {
        self.blobs.lock().unwrap().len()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn put(&self, filename: &str, document: &RawDocument) -> Result<StoredDocument, AppError> {
        let meta = StoredDocument {
            id: Uuid::new_v4(),
            filename: filename.to_string(),
            content_type: document.media_type.clone(),
            size_bytes: document.bytes.len(),
            uploaded_at: Utc::now(),
        };
        self.blobs.lock().unwrap().insert(
            meta.id,
            DocumentBlob {
                meta: meta.clone(),
                bytes: document.bytes.clone(),
            },
        );
        Ok(meta)
    }

    async fn get(&self, id: Uuid) -> Result<Option<DocumentBlob>, AppError> {
        Ok(self.blobs.lock().unwrap().get(&id).cloned())
    }
}

/// Fixed catalog returned in the order given.
pub struct StaticJobCatalog {
    jobs: Vec<JobPosting>,
}

impl StaticJobCatalog {
    pub fn new(jobs: Vec<JobPosting>) -> Self {
        Self { jobs }
    }
}

#[async_trait]
impl JobCatalog for StaticJobCatalog {
    async fn list_jobs(&self) -> Result<Vec<JobPosting>, AppError> {
        Ok(self.jobs.clone())
    }
}
