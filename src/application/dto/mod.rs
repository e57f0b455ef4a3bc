pub mod articles;
pub mod auth;
pub mod categories;
pub mod contacts;
pub mod list;
pub mod serde_time;
pub mod uploads;
pub mod videos;

pub use articles::{ArticleDto, ArticleImageDto, ImageOnlyDto};
pub use auth::{AuthenticatedUser, LoginResult, SessionRecord, SessionUserDto};
pub use categories::{CategoryDto, CategoryRefDto};
pub use contacts::ContactDto;
pub use list::ListResponse;
pub use uploads::UploadSignatureDto;
pub use videos::VideoDto;
