// src/presentation/http/extractors.rs
use crate::{
    application::{commands::FileUpload, dto::AuthenticatedUser, error::ApplicationError},
    infrastructure::security::cookie::SESSION_COOKIE,
    presentation::http::state::HttpState,
};
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Multipart, Path, Request},
    http::{StatusCode, header::CONTENT_TYPE, request::Parts},
};
use headers::{Cookie, HeaderMapExt};
use serde::{Deserialize, Deserializer};

use super::error::HttpError;

/// Uploaded article images above this size are rejected.
pub const MAX_IMAGE_BYTES: usize = 4 * 1024 * 1024;

fn app_state(parts: &Parts) -> Result<HttpState, HttpError> {
    parts.extensions.get::<HttpState>().cloned().ok_or_else(|| {
        HttpError::from_error(ApplicationError::Infrastructure(
            "application state missing".into(),
        ))
    })
}

/// Session id from a `sid` cookie whose signature checks out.
#[derive(Debug, Clone)]
pub struct SessionCookie(pub Option<String>);

impl<S> FromRequestParts<S> for SessionCookie
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let state = app_state(parts)?;
        let session_id = parts
            .headers
            .typed_get::<Cookie>()
            .and_then(|cookie| cookie.get(SESSION_COOKIE).map(str::to_string))
            .and_then(|value| state.cookies.verify(&value));
        Ok(Self(session_id))
    }
}

/// An authenticated admin; rejects with 401 otherwise.
#[derive(Debug, Clone)]
pub struct AdminSession(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let SessionCookie(session_id) = SessionCookie::from_request_parts(parts, state).await?;
        let session_id = session_id.ok_or_else(|| HttpError::unauthorized("unauthorized"))?;

        let app_state = app_state(parts)?;
        let user = app_state
            .services
            .authenticate(&session_id)
            .await
            .map_err(HttpError::from_error)?;
        Ok(Self(user))
    }
}

#[derive(Debug, Clone)]
pub struct MaybeSession(pub Option<AuthenticatedUser>);

impl<S> FromRequestParts<S> for MaybeSession
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let SessionCookie(session_id) = SessionCookie::from_request_parts(parts, state).await?;
        let Some(session_id) = session_id else {
            return Ok(Self(None));
        };

        let app_state = app_state(parts)?;
        match app_state.services.authenticate(&session_id).await {
            Ok(user) => Ok(Self(Some(user))),
            Err(ApplicationError::Unauthorized(_)) => Ok(Self(None)),
            Err(err) => Err(HttpError::from_error(err)),
        }
    }
}

/// Numeric record id from the path; anything else is a 400.
#[derive(Debug, Clone, Copy)]
pub struct RecordId(pub i64);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|err| HttpError::bad_request(err.body_text()))?;
        raw.parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(Self)
            .ok_or_else(|| HttpError::bad_request("invalid id"))
    }
}

/// Article write body: plain JSON, or multipart with an optional `file` part
/// and the JSON document in a `data` part.
#[derive(Debug, Default)]
pub struct ArticlePayload {
    pub data: Option<serde_json::Value>,
    pub file: Option<FileUpload>,
    /// Names of text parts other than `data`, in arrival order.
    pub text_fields: Vec<String>,
}

impl ArticlePayload {
    /// A multipart upload that carries nothing but the image, optionally
    /// tagged with `slug` or `_action`.
    pub fn is_file_only(&self) -> bool {
        self.file.is_some()
            && self.data.is_none()
            && (self.text_fields.is_empty()
                || (self.text_fields.len() == 1
                    && matches!(self.text_fields[0].as_str(), "slug" | "_action")))
    }

    /// Deserialize the JSON document; a missing document reads as `{}`.
    pub fn parse<T>(&self) -> Result<T, HttpError>
    where
        T: serde::de::DeserializeOwned,
    {
        let value = self
            .data
            .clone()
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));
        serde_json::from_value(value).map_err(|err| HttpError::bad_request(err.to_string()))
    }
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"))
}

impl<S> FromRequest<S> for ArticlePayload
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_multipart(&req) {
            let Json(value) = Json::<serde_json::Value>::from_request(req, state)
                .await
                .map_err(|err| HttpError::bad_request(err.body_text()))?;
            return Ok(Self {
                data: Some(value),
                ..Self::default()
            });
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|err| HttpError::bad_request(err.body_text()))?;

        let mut payload = Self::default();
        let mut loose_fields = serde_json::Map::new();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|err| HttpError::bad_request(err.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "file" => {
                    let file_name = field.file_name().unwrap_or("upload").to_string();
                    let content_type = field.content_type().map(str::to_string);
                    let data = field
                        .bytes()
                        .await
                        .map_err(|err| HttpError::bad_request(err.body_text()))?;
                    if data.len() > MAX_IMAGE_BYTES {
                        return Err(HttpError::new(
                            StatusCode::PAYLOAD_TOO_LARGE,
                            "image files are limited to 4 MB",
                        ));
                    }
                    if !data.is_empty() {
                        payload.file = Some(FileUpload {
                            file_name,
                            content_type,
                            data,
                        });
                    }
                }
                "data" => {
                    let text = field
                        .text()
                        .await
                        .map_err(|err| HttpError::bad_request(err.body_text()))?;
                    let value = serde_json::from_str(&text)
                        .map_err(|_| HttpError::bad_request("the data field must be a JSON document"))?;
                    payload.data = Some(value);
                }
                _ => {
                    let text = field
                        .text()
                        .await
                        .map_err(|err| HttpError::bad_request(err.body_text()))?;
                    loose_fields.insert(name.clone(), serde_json::Value::String(text));
                    payload.text_fields.push(name);
                }
            }
        }

        // Plain form fields stand in for the document when no `data` was sent.
        if payload.data.is_none() && !loose_fields.is_empty() && !payload.is_file_only() {
            payload.data = Some(serde_json::Value::Object(loose_fields));
        }
        Ok(payload)
    }
}

/// Ids as sent by the admin panel: a JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdInput {
    Number(i64),
    Text(String),
}

impl IdInput {
    pub fn parse(&self, what: &str) -> Result<i64, HttpError> {
        match self {
            Self::Number(id) => Ok(*id),
            Self::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| HttpError::bad_request(format!("invalid {what} id"))),
        }
    }
}

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`). Use with `#[serde(default)]`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn file() -> Option<FileUpload> {
        Some(FileUpload {
            file_name: "a.jpg".into(),
            content_type: Some("image/jpeg".into()),
            data: Bytes::from_static(b"jpeg"),
        })
    }

    #[test]
    fn file_only_detection() {
        let mut payload = ArticlePayload {
            file: file(),
            ..ArticlePayload::default()
        };
        assert!(payload.is_file_only());

        payload.text_fields = vec!["_action".into()];
        assert!(payload.is_file_only());

        payload.text_fields = vec!["title".into()];
        assert!(!payload.is_file_only());

        payload.text_fields.clear();
        payload.data = Some(serde_json::json!({"title": "x"}));
        assert!(!payload.is_file_only());
    }

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        summary: Option<Option<String>>,
    }

    #[test]
    fn double_option_separates_null_from_absent() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        let null: Patch = serde_json::from_str(r#"{"summary":null}"#).unwrap();
        let set: Patch = serde_json::from_str(r#"{"summary":"s"}"#).unwrap();
        assert_eq!(absent.summary, None);
        assert_eq!(null.summary, Some(None));
        assert_eq!(set.summary, Some(Some("s".into())));
    }

    #[test]
    fn id_input_accepts_numbers_and_numeric_strings() {
        let number: IdInput = serde_json::from_str("7").unwrap();
        let text: IdInput = serde_json::from_str(r#""12""#).unwrap();
        let junk: IdInput = serde_json::from_str(r#""abc""#).unwrap();
        assert_eq!(number.parse("category").unwrap(), 7);
        assert_eq!(text.parse("category").unwrap(), 12);
        assert_eq!(junk.parse("category").unwrap_err().status(), StatusCode::BAD_REQUEST);
    }
}
