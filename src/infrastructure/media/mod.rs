// src/infrastructure/media/mod.rs
pub mod cloudinary;
pub mod pipeline;
pub mod probe;
pub mod thumbnails;
pub mod transforms;

pub use cloudinary::{CloudinaryClient, CloudinaryCredentials};
pub use pipeline::CdnImageIngestor;
pub use probe::ReqwestProbe;
pub use thumbnails::YoutubeCoverFetcher;
