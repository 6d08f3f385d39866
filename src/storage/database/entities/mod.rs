//! Database entities (sea-orm models).

pub mod contact_message;
pub mod document;
pub mod news;
pub mod testimonial;
pub mod user;

pub use contact_message::Entity as ContactMessage;
pub use document::Entity as Document;
pub use news::Entity as News;
pub use testimonial::Entity as Testimonial;
pub use user::Entity as User;
