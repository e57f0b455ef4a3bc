// src/infrastructure/media/probe.rs
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_LENGTH;

use crate::application::{
    ApplicationResult,
    error::ApplicationError,
    ports::media::{ProbeResponse, RemoteProbe},
};

#[derive(Clone)]
pub struct ReqwestProbe {
    http: reqwest::Client,
}

impl ReqwestProbe {
    pub fn new() -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl RemoteProbe for ReqwestProbe {
    async fn head(&self, url: &str) -> ApplicationResult<ProbeResponse> {
        let response = self
            .http
            .head(url)
            .send()
            .await
            .map_err(|err| ApplicationError::infrastructure(format!("HEAD {url} failed: {err}")))?;

        // `Response::content_length` is 0 for HEAD, read the header instead
        let content_length = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok());

        Ok(ProbeResponse {
            status: response.status().as_u16(),
            content_length,
        })
    }
}
