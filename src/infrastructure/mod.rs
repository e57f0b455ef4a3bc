// src/infrastructure/mod.rs
pub mod database;
pub mod media;
pub mod repositories;
pub mod security;
pub mod time;
pub mod util;
