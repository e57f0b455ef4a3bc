// src/infrastructure/media/thumbnails.rs
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::media::{CoverFetcher, MediaStore, RemoteProbe, UploadOptions};
use crate::domain::video::VideoCover;

const THUMBNAIL_HOSTS: [&str; 2] = ["i.ytimg.com", "img.youtube.com"];
const THUMBNAIL_VARIANTS: [&str; 5] = ["maxresdefault", "sddefault", "hqdefault", "mqdefault", "0"];
pub const COVER_FOLDER: &str = "videos";

/// Thumbnail URLs in preference order: host-major, best resolution first.
pub fn thumbnail_candidates(youtube_id: &str) -> impl Iterator<Item = String> + '_ {
    THUMBNAIL_HOSTS.iter().flat_map(move |host| {
        THUMBNAIL_VARIANTS
            .iter()
            .map(move |variant| format!("https://{host}/vi/{youtube_id}/{variant}.jpg"))
    })
}

/// `videos/<id>` for bare YouTube ids, unchanged otherwise.
pub fn cover_public_id(handle: &str) -> String {
    if handle.starts_with("videos/") {
        handle.to_string()
    } else {
        format!("{COVER_FOLDER}/{handle}")
    }
}

/// Copies the best available YouTube thumbnail into the media store.
pub struct YoutubeCoverFetcher {
    store: Arc<dyn MediaStore>,
    probe: Arc<dyn RemoteProbe>,
}

impl YoutubeCoverFetcher {
    pub fn new(store: Arc<dyn MediaStore>, probe: Arc<dyn RemoteProbe>) -> Self {
        Self { store, probe }
    }

    async fn best_thumbnail(&self, youtube_id: &str) -> Option<String> {
        for url in thumbnail_candidates(youtube_id) {
            if self
                .probe
                .head(&url)
                .await
                .is_ok_and(|response| response.is_success())
            {
                return Some(url);
            }
        }
        None
    }
}

#[async_trait]
impl CoverFetcher for YoutubeCoverFetcher {
    async fn fetch_cover(&self, youtube_id: &str) -> VideoCover {
        let Some(source) = self.best_thumbnail(youtube_id).await else {
            tracing::warn!(youtube_id, "no reachable thumbnail; storing video without cover");
            return VideoCover::default();
        };

        let options = UploadOptions {
            public_id: Some(youtube_id.to_string()),
            overwrite: true,
            invalidate: true,
            ..UploadOptions::in_folder(COVER_FOLDER)
        };
        match self.store.import_remote(&source, &options).await {
            Ok(stored) => VideoCover {
                url: stored.secure_url,
                public_id: stored.public_id,
            },
            Err(err) => {
                tracing::warn!(youtube_id, error = %err, "thumbnail import failed");
                VideoCover::default()
            }
        }
    }

    async fn remove_cover(&self, handle: &str) {
        if handle.is_empty() {
            return;
        }
        let public_id = cover_public_id(handle);
        if let Err(err) = self.store.destroy(&public_id).await {
            tracing::warn!(public_id, error = %err, "failed to remove video cover");
        }
    }
}
