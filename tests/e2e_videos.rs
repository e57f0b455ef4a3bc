use axum::http::{Method, StatusCode};
use serde_json::{Value, json};

mod support;

use support::{assert_error_response, empty_request, json_request, spawn_app};

async fn create_video(app: &support::TestApp, cookie: &str, body: Value) -> Value {
    let resp = app
        .send(json_request(Method::POST, "/api/videos", &body, Some(cookie)))
        .await;
    assert_eq!(resp.status, StatusCode::CREATED, "body: {}", resp.json);
    resp.json
}

#[tokio::test]
async fn create_fetches_a_cover_and_lists_newest_first() {
    let app = spawn_app().await;
    let cookie = app.login().await;

    let first = create_video(
        &app,
        &cookie,
        json!({ "title": "İlk video", "youtubeId": "abcdef123" }),
    )
    .await;
    assert_eq!(
        first["coverUrl"],
        "https://res.cloudinary.com/demo/image/upload/v1/videos/abcdef123.jpg"
    );
    create_video(
        &app,
        &cookie,
        json!({ "title": "İkinci video", "youtubeId": "zyxwvu987" }),
    )
    .await;

    let list = app.send(empty_request(Method::GET, "/api/videos", None)).await;
    let ids: Vec<&str> = list.json["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["youtubeId"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["zyxwvu987", "abcdef123"]);

    let one = app
        .send(empty_request(Method::GET, &format!("/api/videos/{}", first["id"]), None))
        .await;
    assert_eq!(one.status, StatusCode::OK);
    assert_eq!(one.json["title"], "İlk video");
}

#[tokio::test]
async fn invalid_input_is_rejected() {
    let app = spawn_app().await;
    let cookie = app.login().await;

    let bad_id = app
        .send(json_request(
            Method::POST,
            "/api/videos",
            &json!({ "title": "Video", "youtubeId": "no spaces!" }),
            Some(&cookie),
        ))
        .await;
    assert_error_response(&bad_id, StatusCode::BAD_REQUEST, "Bad Request");

    let bad_category = app
        .send(json_request(
            Method::POST,
            "/api/videos",
            &json!({ "title": "Video", "youtubeId": "abcdef123", "categoryId": "abc" }),
            Some(&cookie),
        ))
        .await;
    assert_error_response(&bad_category, StatusCode::BAD_REQUEST, "Bad Request");

    let bad_path = app
        .send(empty_request(Method::GET, "/api/videos/abc", None))
        .await;
    assert_error_response(&bad_path, StatusCode::BAD_REQUEST, "Bad Request");
}

#[tokio::test]
async fn changing_youtube_id_swaps_the_cover() {
    let app = spawn_app().await;
    let cookie = app.login().await;
    let video = create_video(
        &app,
        &cookie,
        json!({ "title": "Değişecek", "youtubeId": "oldvideo1" }),
    )
    .await;
    let uri = format!("/api/videos/{}", video["id"]);

    let same = app
        .send(json_request(
            Method::PATCH,
            &uri,
            &json!({ "youtubeId": "oldvideo1", "title": "Yeni başlık" }),
            Some(&cookie),
        ))
        .await;
    assert_eq!(same.status, StatusCode::OK);
    assert_eq!(same.json["title"], "Yeni başlık");
    assert!(app.covers.removed().is_empty());

    let swapped = app
        .send(json_request(
            Method::PATCH,
            &uri,
            &json!({ "youtubeId": "newvideo2" }),
            Some(&cookie),
        ))
        .await;
    assert_eq!(swapped.status, StatusCode::OK);
    assert_eq!(swapped.json["youtubeId"], "newvideo2");
    assert!(swapped.json["coverUrl"].as_str().unwrap().contains("newvideo2"));
    assert_eq!(app.covers.removed(), ["videos/oldvideo1"]);
}

#[tokio::test]
async fn category_can_be_set_and_cleared() {
    let app = spawn_app().await;
    let cookie = app.login().await;
    let category = app
        .send(json_request(
            Method::POST,
            "/api/categories",
            &json!({ "name": "Belgesel" }),
            Some(&cookie),
        ))
        .await
        .json;
    let video = create_video(
        &app,
        &cookie,
        json!({ "title": "Doğa", "youtubeId": "nature001", "categoryId": category["id"] }),
    )
    .await;
    assert_eq!(video["category"]["name"], "Belgesel");
    let uri = format!("/api/videos/{}", video["id"]);

    let kept = app
        .send(json_request(Method::PATCH, &uri, &json!({ "title": "Doğa 2" }), Some(&cookie)))
        .await;
    assert_eq!(kept.json["category"]["name"], "Belgesel");

    let cleared = app
        .send(json_request(Method::PATCH, &uri, &json!({ "categoryId": null }), Some(&cookie)))
        .await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert!(cleared.json.get("category").is_none());
}

#[tokio::test]
async fn delete_removes_the_cover() {
    let app = spawn_app().await;
    let cookie = app.login().await;
    let video = create_video(
        &app,
        &cookie,
        json!({ "title": "Silinecek", "youtubeId": "gone12345" }),
    )
    .await;
    let uri = format!("/api/videos/{}", video["id"]);

    let resp = app.send(empty_request(Method::DELETE, &uri, Some(&cookie))).await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
    assert_eq!(app.covers.removed(), ["videos/gone12345"]);

    let missing = app.send(empty_request(Method::GET, &uri, None)).await;
    assert_error_response(&missing, StatusCode::NOT_FOUND, "Not Found");
}

#[tokio::test]
async fn failed_update_keeps_the_old_cover() {
    let app = spawn_app().await;
    let cookie = app.login().await;
    let video = create_video(
        &app,
        &cookie,
        json!({ "title": "Kalıcı", "youtubeId": "keepme001" }),
    )
    .await;
    let uri = format!("/api/videos/{}", video["id"]);

    app.db.fail_video_updates();
    let resp = app
        .send(json_request(
            Method::PATCH,
            &uri,
            &json!({ "youtubeId": "other0002" }),
            Some(&cookie),
        ))
        .await;
    assert_error_response(&resp, StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
    assert!(app.covers.removed().is_empty());

    let stored = app.send(empty_request(Method::GET, &uri, None)).await;
    assert_eq!(stored.json["youtubeId"], "keepme001");
    assert_eq!(
        stored.json["coverUrl"],
        "https://res.cloudinary.com/demo/image/upload/v1/videos/keepme001.jpg"
    );
}
