// src/infrastructure/media/pipeline.rs
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use super::transforms;
use crate::application::{
    ApplicationResult,
    ports::media::{
        ImageIngestor, IngestedImage, MediaStore, RemoteProbe, StoredMedia, UploadOptions,
    },
};

/// Renditions at or above this many bytes are skipped when picking the
/// delivery URL.
pub const MAX_DELIVERY_BYTES: u64 = 1_000_000;

const FALLBACK_WIDTH: u32 = 1600;
const FALLBACK_QUALITY: &str = "auto:eco";
const TINY_FILL_WIDTH: u32 = 1600;

/// Stores article images and derives their delivery and placeholder URLs.
pub struct CdnImageIngestor {
    store: Arc<dyn MediaStore>,
    probe: Arc<dyn RemoteProbe>,
    folder: String,
}

impl CdnImageIngestor {
    pub fn new(
        store: Arc<dyn MediaStore>,
        probe: Arc<dyn RemoteProbe>,
        folder: impl Into<String>,
    ) -> Self {
        Self {
            store,
            probe,
            folder: folder.into(),
        }
    }

    fn upload_options(&self) -> UploadOptions {
        UploadOptions {
            overwrite: false,
            ..UploadOptions::in_folder(self.folder.clone())
        }
    }

    /// First candidate the probe reports below [`MAX_DELIVERY_BYTES`], else
    /// the last candidate. Probe failures just skip the candidate.
    async fn pick_under_1mb(&self, candidates: &[String]) -> Option<String> {
        for candidate in candidates {
            match self.probe.head(candidate).await {
                Ok(response) => {
                    if response
                        .content_length
                        .is_some_and(|len| len > 0 && len < MAX_DELIVERY_BYTES)
                    {
                        return Some(candidate.clone());
                    }
                }
                Err(err) => {
                    tracing::debug!(url = %candidate, error = %err, "rendition probe failed");
                }
            }
        }
        candidates.last().cloned()
    }

    async fn finish(&self, stored: StoredMedia) -> IngestedImage {
        let raw = stored.secure_url;

        let candidates = transforms::under_1mb_candidates(&raw);
        let url = match self.pick_under_1mb(&candidates).await {
            Some(url) => url,
            None => transforms::no_crop_fit(&raw, FALLBACK_WIDTH, None, FALLBACK_QUALITY)
                .unwrap_or_else(|| raw.clone()),
        };

        let tiny_url = transforms::tiny_blur(&raw)
            .or_else(|| transforms::tiny_blur_fill(&raw, Some(TINY_FILL_WIDTH)))
            .unwrap_or_else(|| raw.clone());

        IngestedImage {
            url,
            tiny_url,
            public_id: stored.public_id,
        }
    }
}

#[async_trait]
impl ImageIngestor for CdnImageIngestor {
    async fn ingest_bytes(&self, data: Bytes, file_name: &str) -> ApplicationResult<IngestedImage> {
        let stored = self
            .store
            .upload_bytes(data, file_name, &self.upload_options())
            .await?;
        Ok(self.finish(stored).await)
    }

    async fn ingest_remote(&self, source_url: &str) -> ApplicationResult<IngestedImage> {
        let stored = self
            .store
            .import_remote(source_url, &self.upload_options())
            .await?;
        Ok(self.finish(stored).await)
    }

    async fn release(&self, public_id: &str) {
        if public_id.is_empty() {
            return;
        }
        if let Err(err) = self.store.destroy(public_id).await {
            tracing::warn!(public_id, error = %err, "failed to release stored image");
        }
    }
}
