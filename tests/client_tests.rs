mod common;

use classroom_buddy::api::models::{RegisterRequest, Role, UploadFile};
use classroom_buddy::api::{ApiClient, ApiError};
use common::*;
use reqwest::StatusCode;

#[tokio::test]
async fn test_login_returns_token() {
    let backend = spawn_backend().await;
    let client = ApiClient::new(&backend.base_url()).unwrap();

    let token = client.login(VALID_USERNAME, VALID_PASSWORD).await.unwrap();
    assert_eq!(token, VALID_TOKEN);
}

#[tokio::test]
async fn test_login_failure_carries_status_and_message() {
    let backend = spawn_backend().await;
    let client = ApiClient::new(&backend.base_url()).unwrap();

    let err = client.login(VALID_USERNAME, "wrong").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert_eq!(err.server_message(), Some("Invalid username or password"));
}

#[tokio::test]
async fn test_network_failure_is_distinct() {
    let client = ApiClient::new(&closed_base_url().await).unwrap();

    let err = client.login(VALID_USERNAME, VALID_PASSWORD).await.unwrap_err();
    assert!(err.is_network(), "expected network error, got {err:?}");
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_list_by_subject_sends_size_and_bearer() {
    let backend = spawn_backend().await;
    let client = ApiClient::new(&backend.base_url()).unwrap();

    let page = client
        .list_materials_by_subject(Some(VALID_TOKEN), "computer-science", 1)
        .await
        .unwrap();

    assert_eq!(page.content.len(), 1);
    assert_eq!(page.total_elements, 2);
    assert_eq!(
        backend.state.last_size.lock().unwrap().as_deref(),
        Some("1")
    );
    assert_eq!(
        backend.state.last_authorization.lock().unwrap().as_deref(),
        Some("Bearer test-token")
    );
}

#[tokio::test]
async fn test_list_by_subject_without_token_sends_no_header() {
    let backend = spawn_backend().await;
    let client = ApiClient::new(&backend.base_url()).unwrap();

    client
        .list_materials_by_subject(None, "mathematics", 10)
        .await
        .unwrap();

    assert!(backend.state.last_authorization.lock().unwrap().is_none());
}

#[tokio::test]
async fn test_bare_content_envelope_is_a_decode_error() {
    let backend = spawn_backend().await;
    let client = ApiClient::new(&backend.base_url()).unwrap();

    let err = client
        .list_materials_by_subject(Some(VALID_TOKEN), LEGACY_SUBJECT, 10)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn test_http_error_without_message() {
    let backend = spawn_backend().await;
    let client = ApiClient::new(&backend.base_url()).unwrap();

    let err = client
        .list_materials_by_subject(Some(VALID_TOKEN), BROKEN_SUBJECT, 10)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert_eq!(err.server_message(), None);
    assert_eq!(err.to_string(), "HTTP 500");
}

#[tokio::test]
async fn test_materials_for_current_user() {
    let backend = spawn_backend().await;
    let client = ApiClient::new(&backend.base_url()).unwrap();

    let page = client
        .materials_for_current_user(VALID_TOKEN, 100)
        .await
        .unwrap();
    assert_eq!(page.content.len(), 2);
    assert!(page.content.iter().all(|m| m.username == VALID_USERNAME));

    let err = client
        .materials_for_current_user("stale-token", 100)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
}

#[tokio::test]
async fn test_upload_sends_multipart() {
    let backend = spawn_backend().await;
    let client = ApiClient::new(&backend.base_url()).unwrap();

    let file = UploadFile::new("week1.pdf", b"%PDF-1.4 test".to_vec());
    let id = client
        .upload_material(VALID_TOKEN, "mathematics", file)
        .await
        .unwrap();
    assert_eq!(id, CREATED_MATERIAL_ID);

    let uploads = backend.state.uploads.lock().unwrap();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].subject, "mathematics");
    assert_eq!(uploads[0].file_name, "week1.pdf");
    assert_eq!(uploads[0].byte_size, 13);
}

#[tokio::test]
async fn test_register_returns_server_message() {
    let backend = spawn_backend().await;
    let client = ApiClient::new(&backend.base_url()).unwrap();

    let request = RegisterRequest {
        username: "newbie".to_string(),
        email: "newbie@university.edu".to_string(),
        password: "secret1".to_string(),
        role: Role::Teacher,
    };
    let message = client.register(&request).await.unwrap();
    assert_eq!(message.as_deref(), Some("Student registered successfully"));

    let taken = RegisterRequest {
        username: "taken".to_string(),
        ..request
    };
    let err = client.register(&taken).await.unwrap_err();
    assert_eq!(err.server_message(), Some("Username already exists"));
}

#[tokio::test]
async fn test_download_fetches_file_bytes() {
    let backend = spawn_backend().await;
    let client = ApiClient::new(&backend.base_url()).unwrap();

    let data = client
        .download(&backend.file_url("notes.pdf"))
        .await
        .unwrap();
    assert_eq!(&data[..], b"contents of notes.pdf");
}

#[test]
fn test_trailing_slash_is_trimmed() {
    let client = ApiClient::new("http://localhost:8080/").unwrap();
    assert_eq!(client.base_url(), "http://localhost:8080");
}
