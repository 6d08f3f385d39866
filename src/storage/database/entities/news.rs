use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// News article
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "news")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Headline
    pub title: String,

    /// URL slug generated from the title (unique)
    #[sea_orm(unique)]
    pub slug: String,

    /// Optional teaser shown in listings
    pub summary: Option<String>,

    /// Sanitized HTML body
    #[sea_orm(column_type = "Text")]
    pub body: String,

    /// Storage key of the cover image, when one was uploaded
    pub image_key: Option<String>,

    /// "draft" or "published"
    pub status: String,

    /// Set when the article first transitions to published
    pub published_at: Option<DateTimeWithTimeZone>,

    /// Authoring user
    pub author_id: Uuid,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id"
    )]
    Author,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
