use crate::utils::error::{AppError, Result};
use sea_orm::*;
use serde::Serialize;

use super::entities::{self, news, testimonial};
use super::news_ops::NewsStatus;
use super::testimonial_ops::TestimonialStatus;
use super::Database;

/// Counts shown on the admin dashboard
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub published_news: u64,
    pub draft_news: u64,
    pub pending_testimonials: u64,
    pub unread_messages: u64,
    pub users: u64,
    pub documents: u64,
}

impl Database {
    /// Gather the dashboard counts
    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        let published_news = entities::News::find()
            .filter(news::Column::Status.eq(NewsStatus::Published.as_str()))
            .count(&self.db)
            .await
            .map_err(AppError::Database)?;

        let draft_news = entities::News::find()
            .filter(news::Column::Status.eq(NewsStatus::Draft.as_str()))
            .count(&self.db)
            .await
            .map_err(AppError::Database)?;

        let pending_testimonials = entities::Testimonial::find()
            .filter(testimonial::Column::Status.eq(TestimonialStatus::Pending.as_str()))
            .count(&self.db)
            .await
            .map_err(AppError::Database)?;

        Ok(DashboardStats {
            published_news,
            draft_news,
            pending_testimonials,
            unread_messages: self.count_unread_messages().await?,
            users: self.count_users().await?,
            documents: self.count_documents().await?,
        })
    }
}
