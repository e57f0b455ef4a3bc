// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_article;
mod postgres_category;
mod postgres_contact;
mod postgres_user;
mod postgres_video;

pub use error::map_sqlx;
pub use postgres_article::{PostgresArticleReadRepository, PostgresArticleWriteRepository};
pub use postgres_category::PostgresCategoryRepository;
pub use postgres_contact::PostgresContactRepository;
pub use postgres_user::PostgresUserRepository;
pub use postgres_video::PostgresVideoRepository;
