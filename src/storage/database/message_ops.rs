use crate::utils::error::{AppError, Result};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::*;
use std::str::FromStr;
use tracing::debug;
use uuid::Uuid;

use super::entities::{self, contact_message};
use super::{Database, Page};

/// Handling state of a contact message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStatus {
    New,
    Read,
    Archived,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageStatus::New => "new",
            MessageStatus::Read => "read",
            MessageStatus::Archived => "archived",
        }
    }
}

impl FromStr for MessageStatus {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "new" => Ok(MessageStatus::New),
            "read" => Ok(MessageStatus::Read),
            "archived" => Ok(MessageStatus::Archived),
            _ => Err(()),
        }
    }
}

/// Fields captured from the public contact form
#[derive(Debug, Clone)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

impl Database {
    /// Store a contact-form submission with status `new`
    pub async fn create_contact_message(
        &self,
        new_message: NewContactMessage,
    ) -> Result<contact_message::Model> {
        debug!("Storing contact message from: {}", new_message.email);

        let now: DateTimeWithTimeZone = chrono::Utc::now().into();
        let model = contact_message::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(new_message.name),
            email: Set(new_message.email),
            subject: Set(new_message.subject),
            message: Set(new_message.message),
            status: Set(MessageStatus::New.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model.insert(&self.db).await.map_err(AppError::Database)
    }

    /// Find message by ID
    pub async fn find_message_by_id(&self, id: Uuid) -> Result<Option<contact_message::Model>> {
        entities::ContactMessage::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::Database)
    }

    /// List messages, newest first, optionally filtered by status
    pub async fn list_messages(
        &self,
        status: Option<MessageStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<Page<contact_message::Model>> {
        let mut query =
            entities::ContactMessage::find().order_by_desc(contact_message::Column::CreatedAt);
        if let Some(status) = status {
            query = query.filter(contact_message::Column::Status.eq(status.as_str()));
        }

        let paginator = query.paginate(&self.db, per_page);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok(Page {
            items,
            total,
            page,
            per_page,
        })
    }

    /// Set the handling status of a message
    pub async fn set_message_status(
        &self,
        id: Uuid,
        status: MessageStatus,
    ) -> Result<contact_message::Model> {
        let message = self
            .find_message_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Message not found"))?;

        let mut active: contact_message::ActiveModel = message.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(chrono::Utc::now().into());

        active.update(&self.db).await.map_err(AppError::Database)
    }

    /// Delete a message
    pub async fn delete_message(&self, id: Uuid) -> Result<()> {
        let result = entities::ContactMessage::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Message not found"));
        }
        Ok(())
    }

    /// Number of unread messages, for the dashboard
    pub async fn count_unread_messages(&self) -> Result<u64> {
        entities::ContactMessage::find()
            .filter(contact_message::Column::Status.eq(MessageStatus::New.as_str()))
            .count(&self.db)
            .await
            .map_err(AppError::Database)
    }
}
