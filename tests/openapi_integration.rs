use axum::http::{Method, StatusCode};

mod support;

use support::{empty_request, spawn_app};

#[tokio::test]
async fn openapi_document_is_served() {
    let app = spawn_app().await;
    let resp = app.send(empty_request(Method::GET, "/openapi.json", None)).await;

    assert_eq!(resp.status, StatusCode::OK);
    let paths = resp.json["paths"].as_object().expect("paths object");
    for path in ["/api/articles", "/api/categories", "/api/videos", "/api/auth/login"] {
        assert!(paths.contains_key(path), "missing {path}");
    }
    assert!(resp.json["components"]["securitySchemes"]["sessionCookie"].is_object());
}

#[test]
fn snapshot_is_written_to_disk() {
    let dir = std::env::temp_dir().join(format!("folio-openapi-{}", std::process::id()));
    let path = dir.join("openapi.json");

    folio_core::presentation::http::openapi::write_openapi_snapshot(&path).unwrap();

    let written: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert!(written["paths"]["/api/contact"].is_object());
    std::fs::remove_dir_all(dir).ok();
}
