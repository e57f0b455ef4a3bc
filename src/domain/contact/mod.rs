pub mod entity;
pub mod repository;

pub use entity::{ContactId, ContactMessage, NewContactMessage};
pub use repository::ContactRepository;
