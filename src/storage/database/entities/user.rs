use crate::auth::rbac::Role;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Admin-panel user account
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// User ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Login name (unique)
    #[sea_orm(unique)]
    pub username: String,

    /// Email address (unique)
    #[sea_orm(unique)]
    pub email: String,

    /// Password hash; never serialized into API responses
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Name shown in the admin panel and on authored content
    pub display_name: String,

    /// Role tag, parsed through [`Role`] on every authorization check
    pub role: String,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// News articles authored by this user
    #[sea_orm(has_many = "super::news::Entity")]
    News,

    /// Documents uploaded by this user
    #[sea_orm(has_many = "super::document::Entity")]
    Documents,
}

impl Related<super::news::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::News.def()
    }
}

impl Related<super::document::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Documents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Parse the stored role tag. `None` means an unrecognized tag, which
    /// every permission check treats as deny.
    pub fn parsed_role(&self) -> Option<Role> {
        self.role.parse().ok()
    }
}
