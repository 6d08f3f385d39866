use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Uploaded document metadata; content lives in file storage under
/// `storage_key`
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Original filename as uploaded
    pub filename: String,

    /// MIME content type
    pub content_type: String,

    /// File size in bytes
    pub size: i64,

    /// Key into local file storage (unique)
    #[sea_orm(unique)]
    pub storage_key: String,

    /// Uploading user
    pub uploaded_by: Uuid,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UploadedBy",
        to = "super::user::Column::Id"
    )]
    Uploader,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Uploader.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
