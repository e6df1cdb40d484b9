use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use evaltrack_core::infrastructure::blobs::FsBlobStore;
use evaltrack_core::infrastructure::storage::MemoryStorage;
use evaltrack_service::api::{build_router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

fn test_app() -> (Router, TempDir) {
    let upload_dir = TempDir::new().expect("temp dir");
    let storage = Arc::new(MemoryStorage::new());
    let blobs = Arc::new(FsBlobStore::open(upload_dir.path()).expect("blob store"));
    let state = AppState::new(storage, blobs);
    (build_router(state, 16 * 1024 * 1024), upload_dir)
}

async fn call(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            builder.body(Body::from(serde_json::to_string(&value).expect("serialize body"))).expect("request")
        }
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body bytes");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn create_request(router: &Router, name: &str) -> Value {
    let (status, body) = call(
        router,
        Method::POST,
        "/api/requests",
        Some(json!({ "email": format!("{name}@example.com"), "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

fn reference_set(body: &Value) -> Vec<String> {
    let mut refs: Vec<String> = body
        .as_array()
        .expect("array body")
        .iter()
        .map(|r| r["referenceNumber"].as_str().expect("referenceNumber").to_string())
        .collect();
    refs.sort();
    refs
}

#[tokio::test]
async fn test_root_and_health() {
    let (router, _dir) = test_app();

    let (status, body) = call(&router, Method::GET, "/api", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "API is running");

    let (status, _) = call(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_assigns_dense_references_and_defaults() {
    let (router, _dir) = test_app();

    let first = create_request(&router, "alice").await;
    assert_eq!(first["referenceNumber"], "0001");
    assert_eq!(first["status"], 0);
    assert_eq!(first["detailedStatus"], "pending");
    assert_eq!(first["statusHistory"], json!([]));

    for expected in ["0002", "0003", "0004", "0005"] {
        let record = create_request(&router, expected).await;
        assert_eq!(record["referenceNumber"], expected);
    }
}

#[tokio::test]
async fn test_create_without_name_is_rejected() {
    let (router, _dir) = test_app();
    let (status, body) = call(&router, Method::POST, "/api/requests", Some(json!({ "email": "a@example.com" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().expect("message").contains("name"));
}

#[tokio::test]
async fn test_delete_renumbers_survivors() {
    let (router, _dir) = test_app();

    let mut ids = Vec::new();
    for name in ["a", "b", "c", "d", "e"] {
        ids.push(create_request(&router, name).await["id"].as_str().expect("id").to_string());
    }

    let (status, body) = call(&router, Method::DELETE, &format!("/api/requests/{}", ids[1]), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Request deleted successfully");

    let (status, body) = call(&router, Method::GET, "/api/requests", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reference_set(&body), vec!["0001", "0002", "0003", "0004"]);
}

#[tokio::test]
async fn test_create_after_delete_fills_the_freed_tail() {
    let (router, _dir) = test_app();

    let mut ids = Vec::new();
    for name in ["a", "b", "c"] {
        ids.push(create_request(&router, name).await["id"].as_str().expect("id").to_string());
    }
    let (status, _) = call(&router, Method::DELETE, &format!("/api/requests/{}", ids[1]), None).await;
    assert_eq!(status, StatusCode::OK);

    let newest = create_request(&router, "d").await;
    assert_eq!(newest["referenceNumber"], "0003");

    let (_, body) = call(&router, Method::GET, "/api/requests", None).await;
    assert_eq!(reference_set(&body), vec!["0001", "0002", "0003"]);
}

#[tokio::test]
async fn test_delete_unknown_request_is_not_found() {
    let (router, _dir) = test_app();
    let (status, _) = call(&router, Method::DELETE, "/api/requests/no-such-id", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_detailed_status_appends_history() {
    let (router, _dir) = test_app();
    let id = create_request(&router, "alice").await["id"].as_str().expect("id").to_string();

    let (status, body) = call(
        &router,
        Method::PUT,
        &format!("/api/requests/{id}/updateDetailedStatus"),
        Some(json!({ "detailedStatus": "done-system-sizing", "statusRemarks": "sized 3 units", "actor": "jo" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["detailedStatus"], "done-system-sizing");
    let history = body["statusHistory"].as_array().expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["status"], "done-system-sizing");
    assert_eq!(history[0]["remarks"], "sized 3 units");
    assert_eq!(history[0]["actor"], "jo");
}

#[tokio::test]
async fn test_invalid_detailed_status_is_rejected_and_history_untouched() {
    let (router, _dir) = test_app();
    let id = create_request(&router, "alice").await["id"].as_str().expect("id").to_string();

    let (status, _) = call(
        &router,
        Method::PUT,
        &format!("/api/requests/{id}/updateDetailedStatus"),
        Some(json!({ "detailedStatus": "ongoing-clarification" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(
        &router,
        Method::PUT,
        &format!("/api/requests/{id}/updateDetailedStatus"),
        Some(json!({ "detailedStatus": "bogus-status" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().expect("message").contains("bogus-status"));

    let (_, body) = call(&router, Method::GET, "/api/requests", None).await;
    let record = &body.as_array().expect("array")[0];
    assert_eq!(record["detailedStatus"], "ongoing-clarification");
    assert_eq!(record["statusHistory"].as_array().expect("history").len(), 1);
}

#[tokio::test]
async fn test_detailed_status_unknown_request_is_not_found() {
    let (router, _dir) = test_app();
    let (status, _) = call(
        &router,
        Method::PUT,
        "/api/requests/no-such-id/updateDetailedStatus",
        Some(json!({ "detailedStatus": "pending" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_remarks_empty_string_is_valid_missing_is_not() {
    let (router, _dir) = test_app();
    let id = create_request(&router, "alice").await["id"].as_str().expect("id").to_string();

    let (status, body) =
        call(&router, Method::PUT, &format!("/api/requests/{id}/updateRemarks"), Some(json!({ "remarks": "" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["remarks"], "");

    let (status, _) = call(&router, Method::PUT, &format!("/api/requests/{id}/updateRemarks"), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) =
        call(&router, Method::PUT, &format!("/api/requests/{id}/updateRemarks"), Some(json!({ "remarks": null }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_coarse_cancellation_stamps_reason() {
    let (router, _dir) = test_app();
    let id = create_request(&router, "alice").await["id"].as_str().expect("id").to_string();

    let (status, body) = call(&router, Method::PUT, &format!("/api/requests/{id}"), Some(json!({ "status": 3 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], 3);
    assert!(body["canceledAt"].is_u64());
    assert_eq!(body["cancellationReason"], "");
}

#[tokio::test]
async fn test_coarse_completion_keeps_caller_timestamp() {
    let (router, _dir) = test_app();
    let id = create_request(&router, "alice").await["id"].as_str().expect("id").to_string();

    let (status, body) = call(
        &router,
        Method::PUT,
        &format!("/api/requests/{id}"),
        Some(json!({ "status": 2, "completedAt": 777, "assignedTo": "jo" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], 2);
    assert_eq!(body["completedAt"], 777);
    assert_eq!(body["assignedTo"], "jo");
}

#[tokio::test]
async fn test_list_filters_by_assignee() {
    let (router, _dir) = test_app();
    let id = create_request(&router, "alice").await["id"].as_str().expect("id").to_string();
    create_request(&router, "bob").await;

    call(&router, Method::PUT, &format!("/api/requests/{id}"), Some(json!({ "status": 1, "assignedTo": "jo" }))).await;

    let (status, body) = call(&router, Method::GET, "/api/requests?assignedTo=jo", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("array").len(), 1);

    let (_, body) = call(&router, Method::GET, "/api/requests", None).await;
    assert_eq!(body.as_array().expect("array").len(), 2);
}

#[tokio::test]
async fn test_reset_counter_requires_confirmation() {
    let (router, _dir) = test_app();
    create_request(&router, "alice").await;

    let (status, _) = call(&router, Method::POST, "/api/reset-counter", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&router, Method::POST, "/api/reset-counter", Some(json!({ "confirm": false }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(&router, Method::POST, "/api/reset-counter", Some(json!({ "confirm": true }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Counter reset to 0");

    // Existing records keep their numbers; the next allocation restarts at 0001.
    let record = create_request(&router, "bob").await;
    assert_eq!(record["referenceNumber"], "0001");
}

#[tokio::test]
async fn test_delete_all_requests_resets_everything() {
    let (router, _dir) = test_app();
    for name in ["a", "b", "c"] {
        create_request(&router, name).await;
    }

    let (status, body) = call(&router, Method::DELETE, "/api/requests", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], 3);

    let (_, body) = call(&router, Method::GET, "/api/requests", None).await;
    assert!(body.as_array().expect("array").is_empty());

    let record = create_request(&router, "d").await;
    assert_eq!(record["referenceNumber"], "0001");
}

#[tokio::test]
async fn test_detailed_statuses_endpoint_lists_the_closed_set() {
    let (router, _dir) = test_app();
    let (status, body) = call(&router, Method::GET, "/api/detailedStatuses", None).await;
    assert_eq!(status, StatusCode::OK);
    let codes: Vec<&str> = body.as_array().expect("array").iter().map(|v| v.as_str().expect("code")).collect();
    assert!(codes.contains(&"pending"));
    assert!(codes.contains(&"done-system-sizing"));
    assert!(codes.contains(&"cancelled-double-entry"));
}

#[tokio::test]
async fn test_supplier_crud() {
    let (router, _dir) = test_app();

    let (status, _) = call(&router, Method::POST, "/api/suppliers", Some(json!({ "email": "s@example.com" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(
        &router,
        Method::POST,
        "/api/suppliers",
        Some(json!({ "companyName": "Acme Panels", "email": "s@example.com", "contactPerson": "Sam" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["companyName"], "Acme Panels");

    let (status, body) = call(&router, Method::GET, "/api/suppliers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("array").len(), 1);
}

#[tokio::test]
async fn test_pi_record_crud() {
    let (router, _dir) = test_app();

    let (status, _) = call(&router, Method::POST, "/api/piRecords", Some(json!({ "supplier": "Acme" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call(
        &router,
        Method::POST,
        "/api/piRecords",
        Some(json!({ "supplier": "Acme", "piNumber": "PI-001", "amount": 1250.5, "status": "paid" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["piNumber"], "PI-001");

    let (_, body) = call(&router, Method::GET, "/api/piRecords", None).await;
    assert_eq!(body.as_array().expect("array").len(), 1);
}

#[tokio::test]
async fn test_team_member_stats_derive_from_requests() {
    let (router, _dir) = test_app();
    let id = create_request(&router, "alice").await["id"].as_str().expect("id").to_string();
    call(&router, Method::PUT, &format!("/api/requests/{id}"), Some(json!({ "status": 2, "assignedTo": "jo" }))).await;

    let (status, body) = call(&router, Method::GET, "/api/teamMembers/stats?evaluatorId=jo", None).await;
    assert_eq!(status, StatusCode::OK);
    let stats = body.as_array().expect("array");
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0]["closedTasks"], 1);
    assert_eq!(stats[0]["completionRate"], 100);

    let (status, _) = call(&router, Method::GET, "/api/teamMembers/nobody", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upload_attaches_and_downloads() {
    let (router, _dir) = test_app();
    let id = create_request(&router, "alice").await["id"].as_str().expect("id").to_string();

    let content = b"%PDF-1.4 minimal";
    let (status, body) = call(
        &router,
        Method::POST,
        "/api/upload",
        Some(json!({ "requestId": id, "fileName": "quote.pdf", "contentBase64": BASE64.encode(content) })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fileName"], "quote.pdf");
    let file_url = body["fileUrl"].as_str().expect("fileUrl");
    let stored_name = file_url.rsplit('/').next().expect("stored name");

    let request = Request::builder()
        .method(Method::GET)
        .uri(format!("/api/download/{stored_name}"))
        .body(Body::empty())
        .expect("request");
    let response = router.clone().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("bytes");
    assert_eq!(&bytes[..], content);
}

#[tokio::test]
async fn test_upload_rejects_bad_type_and_unknown_request() {
    let (router, dir) = test_app();
    let id = create_request(&router, "alice").await["id"].as_str().expect("id").to_string();

    let (status, _) = call(
        &router,
        Method::POST,
        "/api/upload",
        Some(json!({ "requestId": id, "fileName": "script.exe", "contentBase64": BASE64.encode(b"MZ") })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        &router,
        Method::POST,
        "/api/requester/upload",
        Some(json!({ "requestId": "no-such-id", "fileName": "spec.pdf", "contentBase64": BASE64.encode(b"x") })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Neither rejection may leave a file behind.
    let leftover = std::fs::read_dir(dir.path()).expect("read dir").count();
    assert_eq!(leftover, 0);
}

#[tokio::test]
async fn test_upload_with_empty_content_is_rejected() {
    let (router, _dir) = test_app();
    let id = create_request(&router, "alice").await["id"].as_str().expect("id").to_string();

    let (status, body) = call(
        &router,
        Method::POST,
        "/api/upload",
        Some(json!({ "requestId": id, "fileName": "quote.pdf", "contentBase64": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "no file uploaded");
}

#[tokio::test]
async fn test_profile_upload_upserts_team_member() {
    let (router, _dir) = test_app();

    let (status, body) = call(
        &router,
        Method::POST,
        "/api/uploadProfile",
        Some(json!({ "evaluatorId": "jo", "fileName": "jo.png", "contentBase64": BASE64.encode(b"\x89PNG") })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["filePath"].as_str().expect("filePath").starts_with("/uploads/"));

    let (status, body) = call(&router, Method::GET, "/api/teamMembers/jo", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["profileImage"].as_str().expect("profileImage").starts_with("/uploads/"));
}
