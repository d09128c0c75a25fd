use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::resume::extract::RawDocument;
use crate::resume::models::StoredDocument;
use crate::storage::{DocumentBlob, DocumentStore};

const KEY_PREFIX: &str = "resumes";
const FILENAME_META: &str = "filename";
const UPLOADED_AT_META: &str = "uploaded-at";

/// Resume bytes in S3 (or MinIO) under `resumes/<uuid>`.
#[derive(Clone)]
pub struct S3DocumentStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3DocumentStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    fn key(id: Uuid) -> String {
        format!("{KEY_PREFIX}/{id}")
    }
}

#[async_trait]
impl DocumentStore for S3DocumentStore {
    async fn put(&self, filename: &str, document: &RawDocument) -> Result<StoredDocument, AppError> {
        let id = Uuid::new_v4();
        let key = Self::key(id);
        let uploaded_at = Utc::now();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(document.bytes.clone()))
            .content_type(&document.media_type)
            .metadata(FILENAME_META, filename)
            .metadata(UPLOADED_AT_META, uploaded_at.to_rfc3339())
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

        info!("Stored resume at s3://{}/{}", self.bucket, key);

        Ok(StoredDocument {
            id,
            filename: filename.to_string(),
            content_type: document.media_type.clone(),
            size_bytes: document.bytes.len(),
            uploaded_at,
        })
    }

    async fn get(&self, id: Uuid) -> Result<Option<DocumentBlob>, AppError> {
        let output = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(Self::key(id))
            .send()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                if e.as_service_error().is_some_and(|se| se.is_no_such_key()) {
                    return Ok(None);
                }
                return Err(AppError::Storage(format!("S3 download failed: {e}")));
            }
        };

        let content_type = output
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let metadata = output.metadata().cloned().unwrap_or_default();
        let filename = metadata
            .get(FILENAME_META)
            .cloned()
            .unwrap_or_else(|| "resume".to_string());
        let uploaded_at = metadata
            .get(UPLOADED_AT_META)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_default();

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| AppError::Storage(format!("S3 body read failed: {e}")))?
            .into_bytes();

        Ok(Some(DocumentBlob {
            meta: StoredDocument {
                id,
                filename,
                content_type,
                size_bytes: bytes.len(),
                uploaded_at,
            },
            bytes,
        }))
    }
}
