// src/application/commands/uploads.rs
use std::sync::Arc;

use crate::application::{
    dto::UploadSignatureDto,
    error::{ApplicationError, ApplicationResult},
    ports::{media::UploadSigner, time::Clock},
};

pub const DEFAULT_TARGET: &str = "article";

/// Where signed direct uploads land.
#[derive(Debug, Clone)]
pub struct UploadTargets {
    pub article_folder: String,
    pub article_upload_preset: Option<String>,
}

pub struct SignUploadCommand {
    pub target: Option<String>,
    pub public_id: Option<String>,
}

pub struct UploadCommandService {
    signer: Arc<dyn UploadSigner>,
    targets: UploadTargets,
    clock: Arc<dyn Clock>,
}

impl UploadCommandService {
    pub fn new(signer: Arc<dyn UploadSigner>, targets: UploadTargets, clock: Arc<dyn Clock>) -> Self {
        Self {
            signer,
            targets,
            clock,
        }
    }

    /// Unknown targets fall back to `article`.
    pub fn sign_upload(&self, command: SignUploadCommand) -> ApplicationResult<UploadSignatureDto> {
        if !self.signer.is_configured() {
            return Err(ApplicationError::infrastructure(
                "media storage credentials are not configured",
            ));
        }

        let target = DEFAULT_TARGET.to_string();
        if let Some(requested) = command.target.as_deref().filter(|t| *t != DEFAULT_TARGET) {
            tracing::debug!(requested, "unknown upload target; using article");
        }

        if command
            .public_id
            .as_deref()
            .is_some_and(|id| !is_valid_public_id(id))
        {
            return Err(ApplicationError::validation("invalid publicId format"));
        }

        let timestamp = self.clock.now().timestamp();
        let folder = self.targets.article_folder.clone();
        let upload_preset = self.targets.article_upload_preset.clone();

        let mut params = vec![("timestamp", timestamp.to_string()), ("folder", folder.clone())];
        if let Some(preset) = &upload_preset {
            params.push(("upload_preset", preset.clone()));
        }
        if let Some(public_id) = &command.public_id {
            params.push(("public_id", public_id.clone()));
        }

        let signed = self.signer.sign(&params)?;
        Ok(UploadSignatureDto {
            cloud_name: signed.cloud_name,
            api_key: signed.api_key,
            timestamp,
            signature: signed.signature,
            folder,
            resource_type: "image".into(),
            upload_preset,
            public_id: command.public_id,
            target,
        })
    }
}

fn is_valid_public_id(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::is_valid_public_id;

    #[test]
    fn public_id_charset() {
        assert!(is_valid_public_id("cover_2024-01"));
        assert!(!is_valid_public_id(""));
        assert!(!is_valid_public_id("a/b"));
        assert!(!is_valid_public_id("kapak görseli"));
    }
}
