// tests/support/builders.rs
use axum::body::Body;
use axum::http::{Method, Request, header};
use serde_json::{Value, json};

/// JSON body for `POST /api/articles`.
pub struct ArticleBuilder {
    title: String,
    content: String,
    slug: Option<String>,
    image_url: Option<String>,
    alt: String,
    category_id: Option<i64>,
    summary: Option<String>,
}

impl ArticleBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: "Yeterince uzun bir makale gövdesi.".into(),
            slug: None,
            image_url: Some("https://images.example.com/cover.jpg".into()),
            alt: "Kapak görseli".into(),
            category_id: None,
            summary: None,
        }
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn category(mut self, id: i64) -> Self {
        self.category_id = Some(id);
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn without_image_url(mut self) -> Self {
        self.image_url = None;
        self
    }

    pub fn build(self) -> Value {
        let mut image = json!({ "alt": self.alt });
        if let Some(url) = self.image_url {
            image["url"] = json!(url);
        }
        let mut body = json!({
            "title": self.title,
            "content": self.content,
            "image": image,
        });
        if let Some(slug) = self.slug {
            body["slug"] = json!(slug);
        }
        if let Some(id) = self.category_id {
            body["categoryId"] = json!(id);
        }
        if let Some(summary) = self.summary {
            body["summary"] = json!(summary);
        }
        body
    }
}

const BOUNDARY: &str = "folio-test-boundary";

/// Hand-assembled `multipart/form-data` body.
#[derive(Default)]
pub struct MultipartBuilder {
    body: Vec<u8>,
}

impl MultipartBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn request(mut self, method: Method, uri: &str, cookie: Option<&str>) -> Request<Body> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        let mut builder = Request::builder().method(method).uri(uri).header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(self.body)).unwrap()
    }
}
