mod helpers;

use axum::http::{Method, StatusCode};
use helpers::{create_id, delete, get, make_test_app, post, put, send};
use serde_json::json;

const PREFIX: &str = "/api/subject";

#[tokio::test]
async fn add_stamps_date_and_time_defaults() {
    let app = make_test_app();
    let (status, body) = post(
        &app,
        "/api/subject/add",
        json!({"class": "10th Grade", "subject": "Mathematics"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].is_string());
    assert_eq!(body["class"], "10th Grade");
    assert_eq!(body["subject"], "Mathematics");
    assert!(!body["date"].as_str().unwrap().is_empty());
    let time = body["time"].as_str().unwrap();
    assert!(time.ends_with("AM") || time.ends_with("PM"), "time {}", time);
}

#[tokio::test]
async fn defaults_are_not_recomputed_on_read() {
    let app = make_test_app();
    let (_, created) = post(
        &app,
        "/api/subject/add",
        json!({"class": "9B", "subject": "Physics"}),
    )
    .await;
    let id = created["id"].as_str().unwrap();
    let (_, fetched) = get(&app, &format!("{}/get/{}", PREFIX, id)).await;
    assert_eq!(fetched["date"], created["date"]);
    assert_eq!(fetched["time"], created["time"]);
}

#[tokio::test]
async fn add_with_empty_body_is_rejected_with_message() {
    let app = make_test_app();
    let (status, body) = post(&app, "/api/subject/add", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn add_with_non_object_body_is_bad_request() {
    let app = make_test_app();
    let (status, body) = post(&app, "/api/subject/add", json!(["class", "subject"])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let app = make_test_app();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/subject/add")
        .header("content-type", "application/json")
        .body(Body::from("{\"class\": "))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_all_returns_records_and_count() {
    let app = make_test_app();
    create_id(&app, PREFIX, json!({"class": "8A", "subject": "Art"})).await;
    create_id(&app, PREFIX, json!({"class": "8A", "subject": "Music"})).await;
    let (status, body) = get(&app, "/api/subject/get").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["subjects"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn update_then_delete_lifecycle() {
    let app = make_test_app();
    let id = create_id(&app, PREFIX, json!({"class": "8A", "subject": "Art"})).await;

    let (status, body) = put(&app, &format!("{}/update/{}", PREFIX, id), json!({"subject": "Drama"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subject"], "Drama");
    assert_eq!(body["class"], "8A");

    let (status, body) = delete(&app, &format!("{}/delete/{}", PREFIX, id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subject"]["subject"], "Drama");
    assert_eq!(body["count"], 0);

    let (status, _) = get(&app, &format!("{}/get/{}", PREFIX, id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn null_in_update_keeps_stored_value() {
    let app = make_test_app();
    let (_, created) = post(
        &app,
        "/api/subject/add",
        json!({"class": "7C", "subject": "Biology"}),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = put(
        &app,
        &format!("{}/update/{}", PREFIX, id),
        json!({"date": null, "time": null, "subject": null}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], created["date"]);
    assert_eq!(body["time"], created["time"]);
    assert_eq!(body["subject"], "Biology");

    let (_, fetched) = get(&app, &format!("{}/get/{}", PREFIX, id)).await;
    assert_eq!(fetched["date"], created["date"]);
}

#[tokio::test]
async fn class_lookup_is_only_mounted_for_schedules() {
    let app = make_test_app();
    let (status, _) = send(&app, Method::GET, "/api/subject/class?class=8A", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
