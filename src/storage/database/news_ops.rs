use crate::utils::error::{AppError, Result};
use crate::utils::slug::slugify;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::*;
use std::str::FromStr;
use tracing::{debug, info};
use uuid::Uuid;

use super::entities::{self, news};
use super::{Database, Page};

/// Publication state of a news article
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsStatus {
    Draft,
    Published,
}

impl NewsStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsStatus::Draft => "draft",
            NewsStatus::Published => "published",
        }
    }
}

impl FromStr for NewsStatus {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "draft" => Ok(NewsStatus::Draft),
            "published" => Ok(NewsStatus::Published),
            _ => Err(()),
        }
    }
}

/// Fields for creating an article
#[derive(Debug, Clone)]
pub struct NewNews {
    pub title: String,
    pub summary: Option<String>,
    pub body: String,
    pub image_key: Option<String>,
    pub status: NewsStatus,
    pub author_id: Uuid,
}

/// Optional fields for updating an article
#[derive(Debug, Clone, Default)]
pub struct NewsUpdate {
    pub title: Option<String>,
    pub summary: Option<Option<String>>,
    pub body: Option<String>,
    pub image_key: Option<Option<String>>,
    pub status: Option<NewsStatus>,
}

impl Database {
    /// Create a news article, generating a unique slug from the title.
    pub async fn create_news(&self, new_news: NewNews) -> Result<news::Model> {
        debug!("Creating news article: {}", new_news.title);

        let slug = self.unique_slug(&new_news.title, None).await?;
        let now: DateTimeWithTimeZone = chrono::Utc::now().into();
        let published_at = match new_news.status {
            NewsStatus::Published => Some(now),
            NewsStatus::Draft => None,
        };

        let model = news::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(new_news.title),
            slug: Set(slug),
            summary: Set(new_news.summary),
            body: Set(new_news.body),
            image_key: Set(new_news.image_key),
            status: Set(new_news.status.as_str().to_string()),
            published_at: Set(published_at),
            author_id: Set(new_news.author_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = model.insert(&self.db).await.map_err(AppError::Database)?;
        info!("News article created: {} ({})", created.title, created.slug);
        Ok(created)
    }

    /// Find article by ID
    pub async fn find_news_by_id(&self, id: Uuid) -> Result<Option<news::Model>> {
        entities::News::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::Database)
    }

    /// Find article by slug
    pub async fn find_news_by_slug(&self, slug: &str) -> Result<Option<news::Model>> {
        entities::News::find()
            .filter(news::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(AppError::Database)
    }

    /// List articles, newest first, optionally filtered by status
    pub async fn list_news(
        &self,
        status: Option<NewsStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<Page<news::Model>> {
        let mut query = entities::News::find().order_by_desc(news::Column::CreatedAt);
        if let Some(status) = status {
            query = query.filter(news::Column::Status.eq(status.as_str()));
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

    /// List published articles for the public site, newest first
    pub async fn list_published_news(&self, page: u64, per_page: u64) -> Result<Page<news::Model>> {
        let paginator = entities::News::find()
            .filter(news::Column::Status.eq(NewsStatus::Published.as_str()))
            .order_by_desc(news::Column::PublishedAt)
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

    /// Update an article. A title change regenerates the slug; a transition
    /// to published stamps `published_at` once.
    pub async fn update_news(&self, id: Uuid, update: NewsUpdate) -> Result<news::Model> {
        let article = self
            .find_news_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("News article not found"))?;

        let new_slug = match &update.title {
            Some(title) if *title != article.title => {
                Some(self.unique_slug(title, Some(id)).await?)
            }
            _ => None,
        };

        let becomes_published = update.status == Some(NewsStatus::Published)
            && article.published_at.is_none();

        let mut active: news::ActiveModel = article.into();
        if let Some(title) = update.title {
            active.title = Set(title);
        }
        if let Some(slug) = new_slug {
            active.slug = Set(slug);
        }
        if let Some(summary) = update.summary {
            active.summary = Set(summary);
        }
        if let Some(body) = update.body {
            active.body = Set(body);
        }
        if let Some(image_key) = update.image_key {
            active.image_key = Set(image_key);
        }
        if let Some(status) = update.status {
            active.status = Set(status.as_str().to_string());
        }
        if becomes_published {
            active.published_at = Set(Some(chrono::Utc::now().into()));
        }
        active.updated_at = Set(chrono::Utc::now().into());

        active.update(&self.db).await.map_err(AppError::Database)
    }

    /// Delete an article
    pub async fn delete_news(&self, id: Uuid) -> Result<()> {
        let result = entities::News::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("News article not found"));
        }
        Ok(())
    }

    /// Build a slug from a title and suffix it with a counter until it is
    /// unique. `exclude` skips the article being renamed.
    async fn unique_slug(&self, title: &str, exclude: Option<Uuid>) -> Result<String> {
        let base = slugify(title);
        if base.is_empty() {
            return Err(AppError::validation(
                "Title must contain at least one alphanumeric character",
            ));
        }

        let mut candidate = base.clone();
        let mut counter = 2u32;
        loop {
            match self.find_news_by_slug(&candidate).await? {
                None => return Ok(candidate),
                Some(existing) if Some(existing.id) == exclude => return Ok(candidate),
                Some(_) => {
                    candidate = format!("{}-{}", base, counter);
                    counter += 1;
                }
            }
        }
    }
}
