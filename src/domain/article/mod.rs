pub mod entity;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use entity::{Article, ArticleImage, ArticleUpdate, NewArticle};
pub use repository::{ArticleReadRepository, ArticleWriteRepository};
pub use services::ArticleSlugIndex;
pub use value_objects::{ArticleContent, ArticleId, ArticleTitle, ImageAlt, ReadingMinutes};
