// src/domain/mod.rs
pub mod article;
pub mod category;
pub mod contact;
pub mod errors;
pub mod slug;
pub mod user;
pub mod video;
