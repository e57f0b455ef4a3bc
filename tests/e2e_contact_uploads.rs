use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::json;

use folio_core::infrastructure::media::cloudinary::api_sign_request;

mod support;

use support::{
    API_KEY, API_SECRET, CLOUD_NAME, assert_error_response, empty_request, json_request,
    spawn_app,
};

#[tokio::test]
async fn contact_form_is_public_and_inbox_is_admin_only() {
    let app = spawn_app().await;

    let submitted = app
        .send(json_request(
            Method::POST,
            "/api/contact",
            &json!({
                "name": " Ayşe ",
                "email": "ayse@example.com",
                "phone": "  ",
                "title": "Merhaba",
                "content": "Bir iş birliği fikrim var.",
            }),
            None,
        ))
        .await;
    assert_eq!(submitted.status, StatusCode::CREATED, "body: {}", submitted.json);
    assert_eq!(submitted.json["name"], "Ayşe");
    assert!(submitted.json["phone"].is_null());
    let uri = format!("/api/contact/{}", submitted.json["id"]);

    let anonymous = app.send(empty_request(Method::GET, "/api/contact", None)).await;
    assert_error_response(&anonymous, StatusCode::UNAUTHORIZED, "Unauthorized");

    let cookie = app.login().await;
    let inbox = app
        .send(empty_request(Method::GET, "/api/contact", Some(&cookie)))
        .await;
    assert_eq!(inbox.status, StatusCode::OK);
    assert_eq!(inbox.json["items"].as_array().unwrap().len(), 1);

    let one = app.send(empty_request(Method::GET, &uri, Some(&cookie))).await;
    assert_eq!(one.json["title"], "Merhaba");

    let deleted = app.send(empty_request(Method::DELETE, &uri, Some(&cookie))).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    let gone = app.send(empty_request(Method::GET, &uri, Some(&cookie))).await;
    assert_error_response(&gone, StatusCode::NOT_FOUND, "Not Found");
}

#[tokio::test]
async fn contact_validation() {
    let app = spawn_app().await;
    for body in [
        json!({ "name": "A", "title": "Konu", "content": "Yeterince uzun içerik" }),
        json!({ "name": "Ali", "title": "Konu", "content": "kısa" }),
        json!({ "name": "Ali", "email": "not-an-email", "title": "Konu", "content": "Yeterince uzun içerik" }),
        json!({ "name": "Ali" }),
    ] {
        let resp = app
            .send(json_request(Method::POST, "/api/contact", &body, None))
            .await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST, "accepted {body}");
    }
}

#[tokio::test]
async fn upload_signature_matches_the_documented_scheme() {
    let app = spawn_app().await;
    let cookie = app.login().await;

    let resp = app
        .send(json_request(
            Method::POST,
            "/api/uploads/signature",
            &json!({ "target": "article", "publicId": "kapak_2024" }),
            Some(&cookie),
        ))
        .await;
    assert_eq!(resp.status, StatusCode::OK, "body: {}", resp.json);
    assert_eq!(resp.json["cloudName"], CLOUD_NAME);
    assert_eq!(resp.json["apiKey"], API_KEY);
    assert_eq!(resp.json["folder"], "articles");
    assert_eq!(resp.json["resourceType"], "image");
    assert_eq!(resp.json["target"], "article");
    assert_eq!(resp.json["publicId"], "kapak_2024");

    let timestamp = resp.json["timestamp"].as_i64().unwrap();
    let expected = api_sign_request(
        &[
            ("timestamp", timestamp.to_string()),
            ("folder", "articles".to_string()),
            ("public_id", "kapak_2024".to_string()),
        ],
        API_SECRET,
    );
    assert_eq!(resp.json["signature"], expected);
}

#[tokio::test]
async fn upload_signature_edge_cases() {
    let app = spawn_app().await;

    let anonymous = app
        .send(json_request(Method::POST, "/api/uploads/signature", &json!({}), None))
        .await;
    assert_error_response(&anonymous, StatusCode::UNAUTHORIZED, "Unauthorized");

    let cookie = app.login().await;

    // No body at all signs an article upload.
    let empty = app
        .send(
            Request::builder()
                .method(Method::POST)
                .uri("/api/uploads/signature")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(empty.status, StatusCode::OK);
    assert!(empty.json.get("publicId").is_none());

    let unknown_target = app
        .send(json_request(
            Method::POST,
            "/api/uploads/signature",
            &json!({ "target": "avatar" }),
            Some(&cookie),
        ))
        .await;
    assert_eq!(unknown_target.json["target"], "article");

    for public_id in [json!(42), json!("a/b"), json!("boşluk var")] {
        let resp = app
            .send(json_request(
                Method::POST,
                "/api/uploads/signature",
                &json!({ "publicId": public_id }),
                Some(&cookie),
            ))
            .await;
        assert_error_response(&resp, StatusCode::BAD_REQUEST, "Bad Request");
    }
}
