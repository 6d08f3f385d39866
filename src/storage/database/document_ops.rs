use crate::utils::error::{AppError, Result};
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

use super::entities::{self, document};
use super::{Database, Page};

/// Metadata for a freshly uploaded document
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub filename: String,
    pub content_type: String,
    pub size: i64,
    pub storage_key: String,
    pub uploaded_by: Uuid,
}

impl Database {
    /// Record an uploaded document
    pub async fn create_document(&self, new_document: NewDocument) -> Result<document::Model> {
        debug!("Recording document: {}", new_document.filename);

        let model = document::ActiveModel {
            id: Set(Uuid::new_v4()),
            filename: Set(new_document.filename),
            content_type: Set(new_document.content_type),
            size: Set(new_document.size),
            storage_key: Set(new_document.storage_key),
            uploaded_by: Set(new_document.uploaded_by),
            created_at: Set(chrono::Utc::now().into()),
        };

        model.insert(&self.db).await.map_err(AppError::Database)
    }

    /// Find document by ID
    pub async fn find_document_by_id(&self, id: Uuid) -> Result<Option<document::Model>> {
        entities::Document::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::Database)
    }

    /// List documents, newest first
    pub async fn list_documents(&self, page: u64, per_page: u64) -> Result<Page<document::Model>> {
        let paginator = entities::Document::find()
            .order_by_desc(document::Column::CreatedAt)
            .paginate(&self.db, per_page);

        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok(Page {
            items,
            total,
            page,
            per_page,
        })
    }

    /// Delete a document row. The caller is responsible for removing the
    /// stored file as well.
    pub async fn delete_document(&self, id: Uuid) -> Result<document::Model> {
        let document = self
            .find_document_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Document not found"))?;

        entities::Document::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::Database)?;

        Ok(document)
    }

    /// Total number of documents
    pub async fn count_documents(&self) -> Result<u64> {
        entities::Document::find()
            .count(&self.db)
            .await
            .map_err(AppError::Database)
    }
}
