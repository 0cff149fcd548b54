mod helpers;

use axum::http::StatusCode;
use helpers::{create_id, delete, get, make_test_app, post, put};
use serde_json::{json, Value};

const PREFIX: &str = "/api/enquiry";

fn enquiry(name: &str) -> Value {
    json!({
        "name": name,
        "contactNumber": "555-0100",
        "email": format!("{}@example.com", name.to_lowercase()),
        "enquiryRelated": "Admissions"
    })
}

#[tokio::test]
async fn get_all_lists_every_enquiry_with_count() {
    let app = make_test_app();
    create_id(&app, PREFIX, enquiry("Alice")).await;
    create_id(&app, PREFIX, enquiry("Bob")).await;

    let (status, body) = get(&app, "/api/enquiry/get").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    let mut names: Vec<&str> = body["enquiries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Alice", "Bob"]);
}

#[tokio::test]
async fn contact_fields_are_free_text() {
    let app = make_test_app();
    let (status, body) = post(
        &app,
        "/api/enquiry/add",
        json!({
            "name": "Carol",
            "contactNumber": "ask at front desk",
            "email": "no email",
            "enquiryRelated": "Fees"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "no email");
}

#[tokio::test]
async fn missing_required_field_is_rejected() {
    let app = make_test_app();
    let mut body = enquiry("Dan");
    body.as_object_mut().unwrap().remove("enquiryRelated");
    let (status, err) = post(&app, "/api/enquiry/add", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], "validation_error");
}

#[tokio::test]
async fn undeclared_fields_are_not_stored() {
    let app = make_test_app();
    let mut body = enquiry("Erin");
    body["priority"] = json!("high");
    let (_, created) = post(&app, "/api/enquiry/add", body).await;
    assert!(created.get("priority").is_none());
}

#[tokio::test]
async fn round_trip_preserves_submitted_fields() {
    let app = make_test_app();
    let id = create_id(&app, PREFIX, enquiry("Frank")).await;
    let (status, fetched) = get(&app, &format!("{}/get/{}", PREFIX, id)).await;
    assert_eq!(status, StatusCode::OK);
    for (k, v) in enquiry("Frank").as_object().unwrap() {
        assert_eq!(&fetched[k], v, "field {}", k);
    }
}

#[tokio::test]
async fn update_with_empty_body_leaves_record_unchanged() {
    let app = make_test_app();
    let id = create_id(&app, PREFIX, enquiry("Gina")).await;
    let (status, body) = put(&app, &format!("{}/update/{}", PREFIX, id), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Gina");
    assert_eq!(body["enquiryRelated"], "Admissions");
}

#[tokio::test]
async fn deleting_n_records_reduces_count_by_n() {
    let app = make_test_app();
    let mut ids = Vec::new();
    for name in ["Hal", "Ivy", "Jo", "Kim"] {
        ids.push(create_id(&app, PREFIX, enquiry(name)).await);
    }
    for id in ids.iter().take(3) {
        let (status, _) = delete(&app, &format!("{}/delete/{}", PREFIX, id)).await;
        assert_eq!(status, StatusCode::OK);
    }
    let (_, body) = get(&app, "/api/enquiry/get").await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["enquiries"][0]["id"], ids[3].as_str());
}

#[tokio::test]
async fn repeated_add_creates_duplicates() {
    let app = make_test_app();
    let a = create_id(&app, PREFIX, enquiry("Lee")).await;
    let b = create_id(&app, PREFIX, enquiry("Lee")).await;
    assert_ne!(a, b);
    let (_, body) = get(&app, "/api/enquiry/get").await;
    assert_eq!(body["count"], 2);
}
