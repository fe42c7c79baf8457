mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{count_rows, router_for, send, service_for, test_db};

const ALICE: &str =
    r#"{"name":"A","email":"a@x.com","phone":"1","address":"addr","country":"US"}"#;

#[tokio::test]
async fn add_then_get_and_list() {
    let t = test_db().await;
    let router = router_for(service_for(&t.db));

    let (status, body) = send(&router, "POST", "/api/users/add", Some(ALICE)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"user_id": 1, "name": "A", "email": "a@x.com", "phone": "1", "address": "addr", "country": "US"})
    );

    let (status, got) = send(&router, "GET", "/api/users/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(got, body);

    let (status, list) = send(&router, "GET", "/api/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([body]));
}

#[tokio::test]
async fn empty_list_is_an_array() {
    let t = test_db().await;
    let router = router_for(service_for(&t.db));

    let (status, list) = send(&router, "GET", "/api/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn get_unknown_or_non_numeric_id_is_not_found_sentinel() {
    let t = test_db().await;
    let router = router_for(service_for(&t.db));

    for uri in ["/api/users/999", "/api/users/abc"] {
        let (status, body) = send(&router, "GET", uri, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, json!({"error": "User not found"}), "{uri}");
    }
}

#[tokio::test]
async fn add_with_missing_fields_is_rejected_before_storage() {
    let t = test_db().await;
    let router = router_for(service_for(&t.db));

    let (status, body) = send(
        &router,
        "POST",
        "/api/users/add",
        Some(r#"{"name":"A","email":"a@x.com"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Missing required fields"}));
    assert_eq!(count_rows(&t.db).await, 0);
}

#[tokio::test]
async fn add_with_non_object_body_is_missing_fields() {
    let t = test_db().await;
    let router = router_for(service_for(&t.db));

    let (status, body) = send(&router, "POST", "/api/users/add", Some("[1,2,3]")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Missing required fields"}));
}

#[tokio::test]
async fn add_with_unparsable_body_is_500_with_message() {
    let t = test_db().await;
    let router = router_for(service_for(&t.db));

    let (status, body) = send(&router, "POST", "/api/users/add", Some("{not json")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().expect("error text");
    assert!(!message.is_empty());
    assert_eq!(count_rows(&t.db).await, 0);
}

#[tokio::test]
async fn add_with_null_field_returns_empty_record() {
    let t = test_db().await;
    let router = router_for(service_for(&t.db));

    let (status, body) = send(
        &router,
        "POST",
        "/api/users/add",
        Some(r#"{"name":"A","email":"a@x.com","phone":"1","address":"addr","country":null}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
    assert_eq!(count_rows(&t.db).await, 0);
}

#[tokio::test]
async fn add_stores_numbers_as_text() {
    let t = test_db().await;
    let router = router_for(service_for(&t.db));

    let (_, body) = send(
        &router,
        "POST",
        "/api/users/add",
        Some(r#"{"name":"A","email":"a@x.com","phone":5551234,"address":"addr","country":"US"}"#),
    )
    .await;

    assert_eq!(body["phone"], json!("5551234"));
}

#[tokio::test]
async fn update_replaces_fields_and_keeps_id() {
    let t = test_db().await;
    let router = router_for(service_for(&t.db));
    send(&router, "POST", "/api/users/add", Some(ALICE)).await;

    let (status, body) = send(
        &router,
        "PUT",
        "/api/users/update",
        Some(r#"{"user_id":1,"name":"B","email":"b@x.com","phone":"2","address":"elsewhere","country":"DE"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"user_id": 1, "name": "B", "email": "b@x.com", "phone": "2", "address": "elsewhere", "country": "DE"})
    );
}

#[tokio::test]
async fn update_of_missing_id_reads_back_not_found() {
    let t = test_db().await;
    let router = router_for(service_for(&t.db));

    let (status, body) = send(
        &router,
        "PUT",
        "/api/users/update",
        Some(r#"{"user_id":77,"name":"B","email":"b","phone":"2","address":"x","country":"DE"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"error": "User not found"}));
    assert_eq!(count_rows(&t.db).await, 0);
}

#[tokio::test]
async fn update_with_unusable_body_returns_empty_record() {
    let t = test_db().await;
    let router = router_for(service_for(&t.db));
    send(&router, "POST", "/api/users/add", Some(ALICE)).await;

    for body in [
        r#"{"name":"B"}"#,
        r#"{"user_id":[1],"name":"B","email":"b","phone":"2","address":"x","country":"DE"}"#,
        r#"{"user_id":1,"name":["B"],"email":"b","phone":"2","address":"x","country":"DE"}"#,
        "garbage",
    ] {
        let (status, reply) = send(&router, "PUT", "/api/users/update", Some(body)).await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(reply, json!({}), "{body}");
    }

    let (_, still) = send(&router, "GET", "/api/users/1", None).await;
    assert_eq!(still["name"], json!("A"));
}

#[tokio::test]
async fn delete_reports_success_even_when_absent() {
    let t = test_db().await;
    let router = router_for(service_for(&t.db));
    send(&router, "POST", "/api/users/add", Some(ALICE)).await;

    for _ in 0..2 {
        let (status, body) = send(&router, "DELETE", "/api/users/delete/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "User deleted successfully"}));
    }

    let (_, got) = send(&router, "GET", "/api/users/1", None).await;
    assert_eq!(got, json!({"error": "User not found"}));
}

#[tokio::test]
async fn delete_with_non_numeric_id_is_404() {
    let t = test_db().await;
    let router = router_for(service_for(&t.db));

    let (status, body) = send(&router, "DELETE", "/api/users/delete/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "User not found"}));
}

#[tokio::test]
async fn update_accepts_numeric_text_id() {
    let t = test_db().await;
    let router = router_for(service_for(&t.db));
    send(&router, "POST", "/api/users/add", Some(ALICE)).await;

    let (status, body) = send(
        &router,
        "PUT",
        "/api/users/update",
        Some(r#"{"user_id":"1","name":"B","email":"b@x.com","phone":"2","address":"elsewhere","country":"DE"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"user_id": 1, "name": "B", "email": "b@x.com", "phone": "2", "address": "elsewhere", "country": "DE"})
    );
}

#[tokio::test]
async fn update_with_non_numeric_id_reads_back_not_found() {
    let t = test_db().await;
    let router = router_for(service_for(&t.db));
    send(&router, "POST", "/api/users/add", Some(ALICE)).await;

    let (status, body) = send(
        &router,
        "PUT",
        "/api/users/update",
        Some(r#"{"user_id":"one","name":"B","email":"b","phone":"2","address":"x","country":"DE"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"error": "User not found"}));

    let (_, still) = send(&router, "GET", "/api/users/1", None).await;
    assert_eq!(still["name"], json!("A"));
}

#[tokio::test]
async fn negative_ids_never_match() {
    let t = test_db().await;
    let router = router_for(service_for(&t.db));

    let (status, body) = send(&router, "DELETE", "/api/users/delete/-1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "User not found"}));

    let (status, body) = send(&router, "GET", "/api/users/-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"error": "User not found"}));
}

#[tokio::test]
async fn wrong_method_on_static_routes_is_405() {
    let t = test_db().await;
    let router = router_for(service_for(&t.db));

    for uri in ["/api/users/add", "/api/users/update"] {
        let (status, _) = send(&router, "GET", uri, None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{uri}");
    }
}
