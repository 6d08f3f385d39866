use crate::utils::error::{AppError, Result};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::*;
use std::str::FromStr;
use tracing::debug;
use uuid::Uuid;

use super::entities::{self, testimonial};
use super::{Database, Page};

/// Moderation state of a testimonial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestimonialStatus {
    Pending,
    Approved,
    Rejected,
}

impl TestimonialStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestimonialStatus::Pending => "pending",
            TestimonialStatus::Approved => "approved",
            TestimonialStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for TestimonialStatus {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TestimonialStatus::Pending),
            "approved" => Ok(TestimonialStatus::Approved),
            "rejected" => Ok(TestimonialStatus::Rejected),
            _ => Err(()),
        }
    }
}

/// Fields for creating a testimonial
#[derive(Debug, Clone)]
pub struct NewTestimonial {
    pub client_name: String,
    pub quote: String,
    pub rating: Option<i16>,
    pub status: TestimonialStatus,
}

/// Optional fields for updating a testimonial
#[derive(Debug, Clone, Default)]
pub struct TestimonialUpdate {
    pub client_name: Option<String>,
    pub quote: Option<String>,
    pub rating: Option<Option<i16>>,
    pub status: Option<TestimonialStatus>,
}

impl Database {
    /// Create a testimonial
    pub async fn create_testimonial(
        &self,
        new_testimonial: NewTestimonial,
    ) -> Result<testimonial::Model> {
        debug!("Creating testimonial from: {}", new_testimonial.client_name);

        let now: DateTimeWithTimeZone = chrono::Utc::now().into();
        let model = testimonial::ActiveModel {
            id: Set(Uuid::new_v4()),
            client_name: Set(new_testimonial.client_name),
            quote: Set(new_testimonial.quote),
            rating: Set(new_testimonial.rating),
            status: Set(new_testimonial.status.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model.insert(&self.db).await.map_err(AppError::Database)
    }

    /// Find testimonial by ID
    pub async fn find_testimonial_by_id(&self, id: Uuid) -> Result<Option<testimonial::Model>> {
        entities::Testimonial::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::Database)
    }

    /// List testimonials, newest first, optionally filtered by status
    pub async fn list_testimonials(
        &self,
        status: Option<TestimonialStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<Page<testimonial::Model>> {
        let mut query =
            entities::Testimonial::find().order_by_desc(testimonial::Column::CreatedAt);
        if let Some(status) = status {
            query = query.filter(testimonial::Column::Status.eq(status.as_str()));
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

    /// Update a testimonial
    pub async fn update_testimonial(
        &self,
        id: Uuid,
        update: TestimonialUpdate,
    ) -> Result<testimonial::Model> {
        let testimonial = self
            .find_testimonial_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Testimonial not found"))?;

        let mut active: testimonial::ActiveModel = testimonial.into();
        if let Some(client_name) = update.client_name {
            active.client_name = Set(client_name);
        }
        if let Some(quote) = update.quote {
            active.quote = Set(quote);
        }
        if let Some(rating) = update.rating {
            active.rating = Set(rating);
        }
        if let Some(status) = update.status {
            active.status = Set(status.as_str().to_string());
        }
        active.updated_at = Set(chrono::Utc::now().into());

        active.update(&self.db).await.map_err(AppError::Database)
    }

    /// Delete a testimonial
    pub async fn delete_testimonial(&self, id: Uuid) -> Result<()> {
        let result = entities::Testimonial::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Testimonial not found"));
        }
        Ok(())
    }
}
