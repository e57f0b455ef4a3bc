use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::json;

mod support;

use support::{
    ADMIN_PASSWORD, ADMIN_USERNAME, assert_error_response, empty_request, json_request, spawn_app,
};

#[tokio::test]
async fn login_sets_a_signed_http_only_cookie() {
    let app = spawn_app().await;
    let resp = app
        .send(json_request(
            Method::POST,
            "/api/auth/login",
            &json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }),
            None,
        ))
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json["ok"], true);
    assert_eq!(resp.json["user"]["username"], ADMIN_USERNAME);

    let set_cookie = resp.set_cookie().unwrap();
    assert!(set_cookie.starts_with("sid="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Max-Age=3600"));

    let value = resp.session_cookie().unwrap();
    let signed = value.trim_start_matches("sid=");
    assert!(app.cookies.verify(signed).is_some());
}

#[tokio::test]
async fn bad_credentials_are_rejected() {
    let app = spawn_app().await;

    let wrong = app
        .send(json_request(
            Method::POST,
            "/api/auth/login",
            &json!({ "username": ADMIN_USERNAME, "password": "nope-nope" }),
            None,
        ))
        .await;
    assert_error_response(&wrong, StatusCode::UNAUTHORIZED, "Unauthorized");
    assert!(wrong.session_cookie().is_none());

    let unknown = app
        .send(json_request(
            Method::POST,
            "/api/auth/login",
            &json!({ "username": "someone", "password": ADMIN_PASSWORD }),
            None,
        ))
        .await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);

    let empty = app
        .send(json_request(
            Method::POST,
            "/api/auth/login",
            &json!({ "username": "", "password": "" }),
            None,
        ))
        .await;
    assert_error_response(&empty, StatusCode::BAD_REQUEST, "Bad Request");

    let garbage = app
        .send(
            Request::builder()
                .method(Method::POST)
                .uri("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;
    assert_eq!(garbage.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn me_reflects_the_session() {
    let app = spawn_app().await;

    let anonymous = app.send(empty_request(Method::GET, "/api/auth/me", None)).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
    assert_eq!(anonymous.json, json!({ "ok": false }));

    let cookie = app.login().await;
    let me = app
        .send(empty_request(Method::GET, "/api/auth/me", Some(&cookie)))
        .await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.json["user"]["username"], ADMIN_USERNAME);
}

#[tokio::test]
async fn forged_cookies_are_ignored() {
    let app = spawn_app().await;
    let cookie = app.login().await;
    let (name_and_id, _tag) = cookie.rsplit_once('.').unwrap();
    let forged = format!("{name_and_id}.AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA");

    let me = app
        .send(empty_request(Method::GET, "/api/auth/me", Some(&forged)))
        .await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);

    let unsigned = app
        .send(empty_request(Method::GET, "/api/contact", Some("sid=plain-session-id")))
        .await;
    assert_error_response(&unsigned, StatusCode::UNAUTHORIZED, "Unauthorized");
}

#[tokio::test]
async fn logout_clears_cookie_and_session() {
    let app = spawn_app().await;
    let cookie = app.login().await;

    let resp = app
        .send(empty_request(Method::POST, "/api/auth/logout", Some(&cookie)))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json["ok"], true);
    let cleared = resp.set_cookie().unwrap();
    assert!(cleared.starts_with("sid=;"));
    assert!(cleared.contains("Max-Age=0"));

    let me = app
        .send(empty_request(Method::GET, "/api/auth/me", Some(&cookie)))
        .await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);

    // Logging out without a session still succeeds.
    let again = app.send(empty_request(Method::POST, "/api/auth/logout", None)).await;
    assert_eq!(again.status, StatusCode::OK);
}

#[tokio::test]
async fn health_and_security_headers() {
    let app = spawn_app().await;
    for path in ["/health", "/api/health"] {
        let resp = app.send(empty_request(Method::GET, path, None)).await;
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.json, json!({ "ok": true }));
        assert_eq!(
            resp.headers.get("x-content-type-options").unwrap(),
            "nosniff"
        );
        assert_eq!(resp.headers.get("x-frame-options").unwrap(), "SAMEORIGIN");
    }
}
