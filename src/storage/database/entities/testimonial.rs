use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Client testimonial
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "testimonials")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Name the quote is attributed to
    pub client_name: String,

    /// Plain-text quote
    #[sea_orm(column_type = "Text")]
    pub quote: String,

    /// Star rating, 1-5
    pub rating: Option<i16>,

    /// "pending", "approved" or "rejected"; only approved quotes are public
    pub status: String,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
