use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Message submitted through the public contact form
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "contact_messages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Sender name
    pub name: String,

    /// Sender email for the reply
    pub email: String,

    /// Optional subject line
    pub subject: Option<String>,

    /// Message body, plain text
    #[sea_orm(column_type = "Text")]
    pub message: String,

    /// "new", "read" or "archived"
    pub status: String,

    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
