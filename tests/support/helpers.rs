// tests/support/helpers.rs
use std::sync::Arc;

use axum::Router;
use axum::body::{self, Body};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use serde_json::Value;
use tower::util::ServiceExt as _;

use folio_core::application::commands::uploads::UploadTargets;
use folio_core::application::services::{
    Adapters, ApplicationServices, Repositories, ServiceSettings,
};
use folio_core::infrastructure::media::{CloudinaryClient, CloudinaryCredentials};
use folio_core::infrastructure::security::cookie::{CookieSettings, SessionCookieSigner};
use folio_core::infrastructure::security::session_store::InMemorySessionStore;
use folio_core::infrastructure::util::TurkishSlugGenerator;
use folio_core::presentation::http::routes::{RouterSettings, build_router_with_rate_limiter};
use folio_core::presentation::http::state::HttpState;

use super::mocks::{MemoryDb, PlainPasswordHasher, RecordingCovers, RecordingImages, TickingClock};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct-horse-battery";
pub const COOKIE_SECRET: &str = "test-secret-test-secret-test-secret!";
pub const CLOUD_NAME: &str = "demo";
pub const API_KEY: &str = "1234567890";
pub const API_SECRET: &str = "test-api-secret";
pub const SESSION_TTL_SECS: u64 = 3600;

/// A router over in-memory adapters, plus handles to inspect them.
pub struct TestApp {
    pub router: Router,
    pub db: Arc<MemoryDb>,
    pub images: Arc<RecordingImages>,
    pub covers: Arc<RecordingCovers>,
    pub cookies: Arc<SessionCookieSigner>,
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = body::to_bytes(resp.into_body(), 8 * 1024 * 1024).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        TestResponse {
            status,
            headers,
            json,
        }
    }

    /// Log in as the seeded admin and return the `Cookie` header value.
    pub async fn login(&self) -> String {
        let resp = self
            .send(json_request(
                Method::POST,
                "/api/auth/login",
                &serde_json::json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }),
                None,
            ))
            .await;
        assert_eq!(resp.status, StatusCode::OK, "login failed: {}", resp.json);
        resp.session_cookie().expect("login sets the sid cookie")
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub json: Value,
}

impl TestResponse {
    /// `sid=<value>` from `Set-Cookie`, ready to send back.
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("sid="))
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }

    pub fn set_cookie(&self) -> Option<String> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    pub fn error_code(&self) -> Option<&str> {
        self.json.get("code").and_then(Value::as_str)
    }
}

pub async fn spawn_app() -> TestApp {
    let db = Arc::new(MemoryDb::new());
    let images = Arc::new(RecordingImages::default());
    let covers = Arc::new(RecordingCovers::default());
    let signer = CloudinaryClient::new(CloudinaryCredentials {
        cloud_name: CLOUD_NAME.into(),
        api_key: API_KEY.into(),
        api_secret: API_SECRET.into(),
    })
    .expect("http client");

    let repos = Repositories {
        users: db.clone(),
        article_write: db.clone(),
        article_read: db.clone(),
        categories: db.clone(),
        videos: db.clone(),
        contacts: db.clone(),
    };
    let adapters = Adapters {
        password_hasher: Arc::new(PlainPasswordHasher),
        sessions: Arc::new(InMemorySessionStore::new()),
        images: images.clone(),
        covers: covers.clone(),
        upload_signer: Arc::new(signer),
        clock: Arc::new(TickingClock::new()),
        slugger: Arc::new(TurkishSlugGenerator),
    };
    let settings = ServiceSettings {
        session_ttl_secs: SESSION_TTL_SECS,
        upload_targets: UploadTargets {
            article_folder: "articles".into(),
            article_upload_preset: None,
        },
    };
    let services = Arc::new(ApplicationServices::new(repos, adapters, settings));

    services
        .auth
        .provision_admin(ADMIN_USERNAME, ADMIN_PASSWORD)
        .await
        .expect("seed admin");

    let cookies = Arc::new(
        SessionCookieSigner::new(
            COOKIE_SECRET,
            CookieSettings {
                secure: false,
                domain: None,
            },
        )
        .expect("cookie signer"),
    );

    let state = HttpState {
        services,
        cookies: cookies.clone(),
    };
    let router = build_router_with_rate_limiter(state, &RouterSettings::default(), false);

    TestApp {
        router,
        db,
        images,
        covers,
        cookies,
    }
}

pub async fn make_test_router() -> Router {
    spawn_app().await.router
}

pub fn json_request(method: Method, uri: &str, body: &Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: Method, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// Assert an `ErrorResponse` body with the expected status and `error` text.
pub fn assert_error_response(resp: &TestResponse, expected_status: StatusCode, expected_error: &str) {
    assert_eq!(resp.status, expected_status, "body: {}", resp.json);
    let ct = resp
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");
    let err_field = resp.json.get("error").and_then(Value::as_str).unwrap_or("");
    let msg_field = resp.json.get("message").and_then(Value::as_str).unwrap_or("");
    assert_eq!(err_field, expected_error, "unexpected error field: {err_field}");
    assert!(!msg_field.is_empty(), "expected non-empty message field in ErrorResponse");
}
