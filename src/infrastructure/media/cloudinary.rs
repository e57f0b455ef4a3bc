// src/infrastructure/media/cloudinary.rs
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::{Digest, Sha1};

use crate::application::{
    ApplicationResult,
    error::ApplicationError,
    ports::media::{MediaStore, StoredMedia, UploadOptions, UploadSignature, UploadSigner},
};

const DEFAULT_API_BASE: &str = "https://api.cloudinary.com/v1_1";

#[derive(Clone, Default)]
pub struct CloudinaryCredentials {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl std::fmt::Debug for CloudinaryCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryCredentials")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// `k=v` pairs sorted by name, empty values dropped, joined with `&`.
/// This is the string Cloudinary hashes together with the API secret.
pub fn string_to_sign(params: &[(&str, String)]) -> String {
    let mut pairs: Vec<_> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));
    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

pub fn api_sign_request(params: &[(&str, String)], api_secret: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(string_to_sign(params).as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Signed calls against the Cloudinary upload API.
#[derive(Clone)]
pub struct CloudinaryClient {
    http: reqwest::Client,
    credentials: CloudinaryCredentials,
    api_base: String,
}

impl CloudinaryClient {
    pub fn new(credentials: CloudinaryCredentials) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            credentials,
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/{}/image/{action}", self.api_base, self.credentials.cloud_name)
    }

    fn ensure_configured(&self) -> ApplicationResult<()> {
        if self.is_configured() && !self.credentials.cloud_name.is_empty() {
            Ok(())
        } else {
            Err(ApplicationError::infrastructure(
                "media storage credentials are not configured",
            ))
        }
    }

    /// Signed form fields shared by upload and destroy.
    fn signed_form(&self, mut params: Vec<(&str, String)>, timestamp: i64) -> Form {
        params.push(("timestamp", timestamp.to_string()));
        let signature = api_sign_request(&params, &self.credentials.api_secret);

        let mut form = Form::new()
            .text("api_key", self.credentials.api_key.clone())
            .text("signature", signature);
        for (name, value) in params {
            if !value.is_empty() {
                form = form.text(name.to_string(), value);
            }
        }
        form
    }

    fn upload_params(options: &UploadOptions) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("folder", options.folder.clone()),
            ("overwrite", options.overwrite.to_string()),
        ];
        if options.invalidate {
            params.push(("invalidate", "true".to_string()));
        }
        if let Some(public_id) = &options.public_id {
            params.push(("public_id", public_id.clone()));
        }
        params
    }

    async fn post_upload(&self, form: Form) -> ApplicationResult<StoredMedia> {
        let response = self
            .http
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|err| ApplicationError::infrastructure(format!("media upload failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorEnvelope>().await {
                Ok(envelope) => envelope.error.message,
                Err(_) => status.to_string(),
            };
            return Err(ApplicationError::infrastructure(format!(
                "media upload rejected: {message}"
            )));
        }

        let body: UploadResponse = response.json().await.map_err(|err| {
            ApplicationError::infrastructure(format!("unexpected media upload response: {err}"))
        })?;
        Ok(StoredMedia {
            secure_url: body.secure_url,
            public_id: body.public_id,
        })
    }
}

fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

#[async_trait]
impl MediaStore for CloudinaryClient {
    async fn upload_bytes(
        &self,
        data: Bytes,
        file_name: &str,
        options: &UploadOptions,
    ) -> ApplicationResult<StoredMedia> {
        self.ensure_configured()?;
        let form = self
            .signed_form(Self::upload_params(options), unix_now())
            .part("file", Part::stream(data).file_name(file_name.to_string()));
        self.post_upload(form).await
    }

    async fn import_remote(
        &self,
        source_url: &str,
        options: &UploadOptions,
    ) -> ApplicationResult<StoredMedia> {
        self.ensure_configured()?;
        let form = self
            .signed_form(Self::upload_params(options), unix_now())
            .text("file", source_url.to_string());
        self.post_upload(form).await
    }

    async fn destroy(&self, public_id: &str) -> ApplicationResult<()> {
        self.ensure_configured()?;
        let params = vec![
            ("public_id", public_id.to_string()),
            ("invalidate", "true".to_string()),
        ];
        let form = self.signed_form(params, unix_now());

        let response = self
            .http
            .post(self.endpoint("destroy"))
            .multipart(form)
            .send()
            .await
            .map_err(|err| ApplicationError::infrastructure(format!("media destroy failed: {err}")))?;

        if !response.status().is_success() {
            return Err(ApplicationError::infrastructure(format!(
                "media destroy rejected with status {}",
                response.status()
            )));
        }

        let body: DestroyResponse = response.json().await.map_err(|err| {
            ApplicationError::infrastructure(format!("unexpected media destroy response: {err}"))
        })?;
        match body.result.as_str() {
            "ok" | "not found" => Ok(()),
            other => Err(ApplicationError::infrastructure(format!(
                "media destroy returned '{other}'"
            ))),
        }
    }
}

impl UploadSigner for CloudinaryClient {
    fn is_configured(&self) -> bool {
        !self.credentials.api_key.is_empty() && !self.credentials.api_secret.is_empty()
    }

    fn sign(&self, params: &[(&str, String)]) -> ApplicationResult<UploadSignature> {
        if !self.is_configured() {
            return Err(ApplicationError::infrastructure(
                "media storage credentials are not configured",
            ));
        }
        Ok(UploadSignature {
            cloud_name: self.credentials.cloud_name.clone(),
            api_key: self.credentials.api_key.clone(),
            signature: api_sign_request(params, &self.credentials.api_secret),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_key: &str, api_secret: &str) -> CloudinaryClient {
        CloudinaryClient::new(CloudinaryCredentials {
            cloud_name: "demo".into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        })
        .unwrap()
    }

    #[test]
    fn sign_string_sorts_and_skips_empty_values() {
        let params = [
            ("timestamp", "1315060510".to_string()),
            ("public_id", "sample_image".to_string()),
            ("eager", "w_400,h_300,c_pad|w_260,h_200,c_crop".to_string()),
            ("upload_preset", String::new()),
        ];
        assert_eq!(
            string_to_sign(&params),
            "eager=w_400,h_300,c_pad|w_260,h_200,c_crop&public_id=sample_image&timestamp=1315060510"
        );
    }

    #[test]
    fn signature_matches_documented_example() {
        let params = [
            ("timestamp", "1315060510".to_string()),
            ("public_id", "sample_image".to_string()),
            ("eager", "w_400,h_300,c_pad|w_260,h_200,c_crop".to_string()),
        ];
        assert_eq!(
            api_sign_request(&params, "abcd"),
            "bfd09f95f331f558cbd1320e67aa8d488770583e"
        );
    }

    #[test]
    fn signer_requires_key_and_secret() {
        assert!(!client("", "secret").is_configured());
        assert!(!client("key", "").is_configured());

        let signer = client("key", "secret");
        let signed = signer.sign(&[("timestamp", "1".into())]).unwrap();
        assert_eq!(signed.cloud_name, "demo");
        assert_eq!(signed.api_key, "key");
        assert_eq!(signed.signature.len(), 40);
    }

    #[test]
    fn endpoint_includes_cloud_name() {
        assert_eq!(
            client("k", "s").endpoint("destroy"),
            "https://api.cloudinary.com/v1_1/demo/image/destroy"
        );
    }

    #[test]
    fn credentials_debug_hides_secret() {
        let rendered = format!("{:?}", client("k", "very-secret").credentials);
        assert!(!rendered.contains("very-secret"));
    }
}
