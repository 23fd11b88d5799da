mod common;

use common::*;

use http::StatusCode;
use serde_json::json;
use sha2::{Digest, Sha256};

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nnot really a png";

#[tokio::test]
async fn test_upload_image_happy_path() {
    let setup = TestSetup::new();
    let token = setup.admin_token();

    let response = setup
        .send_upload_request("file", "image/png", PNG_BYTES, Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    let sha256 = hex::encode(Sha256::digest(PNG_BYTES));
    let expected_key = format!("things/{}/{sha256}.png", &sha256[0..2]);
    assert_eq!(body, json!({"url": format!("{IMAGE_BASE_URL}/{expected_key}")}));

    let stored = setup.image_store.get(&expected_key).await.expect("Not stored");
    assert_eq!(stored.bytes(), PNG_BYTES);
    assert_eq!(stored.content_type(), "image/png");
}

#[tokio::test]
async fn test_upload_extension_follows_mime_type() {
    let setup = TestSetup::new();
    let token = setup.admin_token();

    // The part's filename is upload.bin; the key still ends in .jpg
    let response = setup
        .send_upload_request("file", "image/jpeg", b"jpeg bytes", Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert!(body["url"].as_str().unwrap().ends_with(".jpg"));
}

#[tokio::test]
async fn test_identical_uploads_share_a_key() {
    let setup = TestSetup::new();
    let token = setup.admin_token();

    let first = parse_response_body(
        setup
            .send_upload_request("file", "image/png", PNG_BYTES, Some(&token))
            .await,
    )
    .await;
    let second = parse_response_body(
        setup
            .send_upload_request("file", "image/png", PNG_BYTES, Some(&token))
            .await,
    )
    .await;

    assert_eq!(first["url"], second["url"]);
    assert_eq!(setup.image_store.len().await, 1);
}

#[tokio::test]
async fn test_upload_rejects_non_image() {
    let setup = TestSetup::new();
    let token = setup.admin_token();

    let response = setup
        .send_upload_request("file", "text/plain", b"hello", Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        parse_response_body(response).await,
        json!({"error": "File must be an image"})
    );
    assert!(setup.image_store.is_empty().await);
}

#[tokio::test]
async fn test_upload_rejects_oversize_image() {
    let setup = TestSetup::new();
    let token = setup.admin_token();

    let too_large = vec![0_u8; 5 * 1024 * 1024 + 1];
    let response = setup
        .send_upload_request("file", "image/png", &too_large, Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        parse_response_body(response).await,
        json!({"error": "File too large (max 5MB)"})
    );
    assert!(setup.image_store.is_empty().await);
}

#[tokio::test]
async fn test_upload_rejects_body_over_limit() {
    let setup = TestSetup::new();
    let token = setup.admin_token();

    let way_too_large = vec![0_u8; 7 * 1024 * 1024];
    let response = setup
        .send_upload_request("file", "image/png", &way_too_large, Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        parse_response_body(response).await,
        json!({"error": "File too large (max 5MB)"})
    );
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let setup = TestSetup::new();
    let token = setup.admin_token();

    let response = setup
        .send_upload_request("picture", "image/png", PNG_BYTES, Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        parse_response_body(response).await,
        json!({"error": "No file provided"})
    );
}

#[tokio::test]
async fn test_upload_without_multipart_body() {
    let setup = TestSetup::new();
    let token = setup.admin_token();

    let response = setup
        .send_json_request("POST", "/api/upload", &json!({}), Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        parse_response_body(response).await,
        json!({"error": "No file provided"})
    );
}

#[tokio::test]
async fn test_upload_requires_session() {
    let setup = TestSetup::new();

    let response = setup
        .send_upload_request("file", "image/png", PNG_BYTES, None)
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(setup.image_store.is_empty().await);
}
