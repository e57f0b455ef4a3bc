pub mod articles;
pub mod categories;
pub mod contacts;
pub mod videos;
