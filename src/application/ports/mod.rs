// src/application/ports/mod.rs
pub mod media;
pub mod security;
pub mod time;
pub mod util;

// Type aliases to make port injection sites more descriptive and reduce `dyn` noise
pub type PasswordHasherPort = dyn security::PasswordHasher;
pub type SessionStorePort = dyn security::SessionStore;
pub type ClockPort = dyn time::Clock;
pub type SlugGeneratorPort = dyn util::SlugGenerator;
pub type ImageIngestorPort = dyn media::ImageIngestor;
pub type CoverFetcherPort = dyn media::CoverFetcher;
pub type UploadSignerPort = dyn media::UploadSigner;
