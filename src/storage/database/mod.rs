//! Relational storage: connection handling, migrations and per-resource
//! operations.

pub mod entities;
pub mod migration;

mod connection;
mod document_ops;
mod message_ops;
mod news_ops;
mod stats_ops;
mod testimonial_ops;
mod user_ops;

pub use document_ops::NewDocument;
pub use message_ops::{MessageStatus, NewContactMessage};
pub use news_ops::{NewNews, NewsStatus, NewsUpdate};
pub use stats_ops::DashboardStats;
pub use testimonial_ops::{NewTestimonial, TestimonialStatus, TestimonialUpdate};
pub use user_ops::{NewUser, UserUpdate};

use sea_orm::DatabaseConnection;

/// Database handle shared by every request handler.
#[derive(Debug)]
pub struct Database {
    db: DatabaseConnection,
    backend_type: DatabaseBackendType,
}

/// Database backend type indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackendType {
    PostgreSQL,
    SQLite,
}

/// One page of a listing plus the total row count.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}
