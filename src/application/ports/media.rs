// src/application/ports/media.rs
use async_trait::async_trait;
use bytes::Bytes;

use crate::application::ApplicationResult;
use crate::domain::video::VideoCover;

/// Options for one upload to the media store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadOptions {
    pub folder: String,
    pub public_id: Option<String>,
    pub overwrite: bool,
    pub invalidate: bool,
}

impl UploadOptions {
    pub fn in_folder(folder: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            ..Self::default()
        }
    }
}

/// What the media store returns for a stored asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    pub secure_url: String,
    pub public_id: String,
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload_bytes(
        &self,
        data: Bytes,
        file_name: &str,
        options: &UploadOptions,
    ) -> ApplicationResult<StoredMedia>;
    /// Let the store fetch `source_url` itself.
    async fn import_remote(
        &self,
        source_url: &str,
        options: &UploadOptions,
    ) -> ApplicationResult<StoredMedia>;
    async fn destroy(&self, public_id: &str) -> ApplicationResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
    pub content_length: Option<u64>,
}

impl ProbeResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// `HEAD` requests against public URLs.
#[async_trait]
pub trait RemoteProbe: Send + Sync {
    async fn head(&self, url: &str) -> ApplicationResult<ProbeResponse>;
}

/// An article image after ingestion: the delivery URL, a blurred
/// placeholder and the store's id for later removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestedImage {
    pub url: String,
    pub tiny_url: String,
    pub public_id: String,
}

#[async_trait]
pub trait ImageIngestor: Send + Sync {
    async fn ingest_bytes(&self, data: Bytes, file_name: &str) -> ApplicationResult<IngestedImage>;
    async fn ingest_remote(&self, source_url: &str) -> ApplicationResult<IngestedImage>;
    /// Best effort; failures are logged, never returned.
    async fn release(&self, public_id: &str);
}

#[async_trait]
pub trait CoverFetcher: Send + Sync {
    /// Empty cover when no thumbnail could be fetched or stored.
    async fn fetch_cover(&self, youtube_id: &str) -> VideoCover;
    /// Accepts a full public id or a bare YouTube id. Best effort.
    async fn remove_cover(&self, handle: &str);
}

/// Credentials half of a signed direct upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSignature {
    pub cloud_name: String,
    pub api_key: String,
    pub signature: String,
}

pub trait UploadSigner: Send + Sync {
    fn is_configured(&self) -> bool;
    /// Sign `params` (name/value pairs, any order). Fails when credentials
    /// are not configured.
    fn sign(&self, params: &[(&str, String)]) -> ApplicationResult<UploadSignature>;
}
