pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::{NewVideo, Video, VideoCover, VideoUpdate};
pub use repository::VideoRepository;
pub use value_objects::{VideoId, VideoTitle, YoutubeId};
