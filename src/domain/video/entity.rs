// src/domain/video/entity.rs
use crate::domain::category::{CategoryId, CategoryRef};
use crate::domain::video::value_objects::{VideoId, VideoTitle, YoutubeId};
use chrono::{DateTime, Utc};

/// Cover image imported into the media store. Both fields are empty when
/// no thumbnail could be fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoCover {
    pub url: String,
    pub public_id: String,
}

impl VideoCover {
    pub fn is_empty(&self) -> bool {
        self.url.is_empty() && self.public_id.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Video {
    pub id: VideoId,
    pub title: VideoTitle,
    pub youtube_id: YoutubeId,
    pub cover: VideoCover,
    pub category: Option<CategoryRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Video {
    /// Identifier used to release the cover: the stored public id, or the
    /// YouTube id when the cover was never recorded.
    pub fn cover_handle(&self) -> &str {
        if self.cover.public_id.is_empty() {
            self.youtube_id.as_str()
        } else {
            &self.cover.public_id
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewVideo {
    pub title: VideoTitle,
    pub youtube_id: YoutubeId,
    pub cover: VideoCover,
    pub category_id: Option<CategoryId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `category_id: Some(None)` clears the category.
#[derive(Debug, Clone)]
pub struct VideoUpdate {
    pub id: VideoId,
    pub title: Option<VideoTitle>,
    pub youtube_id: Option<YoutubeId>,
    pub cover: Option<VideoCover>,
    pub category_id: Option<Option<CategoryId>>,
    pub updated_at: DateTime<Utc>,
}

impl VideoUpdate {
    pub fn new(id: VideoId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            youtube_id: None,
            cover: None,
            category_id: None,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(public_id: &str) -> Video {
        Video {
            id: VideoId::new(1).unwrap(),
            title: VideoTitle::new("Demo video").unwrap(),
            youtube_id: YoutubeId::new("dQw4w9WgXcQ").unwrap(),
            cover: VideoCover {
                url: String::new(),
                public_id: public_id.into(),
            },
            category: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn cover_handle_falls_back_to_youtube_id() {
        assert_eq!(video("").cover_handle(), "dQw4w9WgXcQ");
        assert_eq!(video("videos/abc").cover_handle(), "videos/abc");
    }
}
