//! Multipart upload behavior: wire shape, response parsing, failures.

mod common;

use common::TestHarness;
use lettings_client::Error;
use mockito::Matcher;
use serde_json::{json, Value};
use std::path::PathBuf;

fn fixture_file(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[tokio::test]
async fn upload_parses_json_response() {
    let dir = tempfile::tempdir().unwrap();
    let photo = fixture_file(&dir, "photo.jpg", b"test image bytes");

    let mut harness = TestHarness::new().await;
    let _mock = harness
        .server
        .mock("POST", "/properties/prop-1/images")
        .with_status(200)
        .with_body(r#"{"url":"https://cdn.lettings.example/photo.jpg"}"#)
        .create_async()
        .await;

    let body = harness
        .client
        .upload_file("/properties/prop-1/images", &photo, &[])
        .await
        .unwrap();
    assert_eq!(
        body,
        json!({"url": "https://cdn.lettings.example/photo.jpg"})
    );
}

#[tokio::test]
async fn upload_keeps_non_json_response_as_text() {
    let dir = tempfile::tempdir().unwrap();
    let photo = fixture_file(&dir, "photo.jpg", b"test image bytes");

    let mut harness = TestHarness::new().await;
    let _mock = harness
        .server
        .mock("POST", "/properties/prop-1/images")
        .with_status(200)
        .with_body("uploaded!")
        .create_async()
        .await;

    let body = harness
        .client
        .upload_file("/properties/prop-1/images", &photo, &[])
        .await
        .unwrap();
    assert_eq!(body, Value::String("uploaded!".to_string()));
}

#[tokio::test]
async fn upload_failure_uses_status_template() {
    let dir = tempfile::tempdir().unwrap();
    let photo = fixture_file(&dir, "photo.jpg", b"test image bytes");

    let mut harness = TestHarness::new().await;
    let _mock = harness
        .server
        .mock("POST", "/properties/prop-1/images")
        .with_status(500)
        .create_async()
        .await;

    let err = harness
        .client
        .upload_file("/properties/prop-1/images", &photo, &[])
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "upload failed: 500");
    assert_eq!(err.status(), Some(500));
    assert_eq!(
        harness.client.last_error(),
        Some("upload failed: 500".to_string())
    );
}

#[tokio::test]
async fn upload_sends_multipart_with_fields_and_bearer() {
    let dir = tempfile::tempdir().unwrap();
    let photo = fixture_file(&dir, "photo.jpg", b"test image bytes");

    let mut harness = TestHarness::new().await;
    harness.seed_token("tok-upload").await;
    let mock = harness
        .server
        .mock("POST", "/properties/prop-1/images")
        .match_header("authorization", "Bearer tok-upload")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".to_string()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="file"; filename="photo.jpg""#.to_string()),
            Matcher::Regex(r#"name="kind""#.to_string()),
            Matcher::Regex("gallery".to_string()),
            Matcher::Regex("test image bytes".to_string()),
        ]))
        .with_status(200)
        .with_body(r#"{"ok":true}"#)
        .create_async()
        .await;

    harness
        .client
        .upload_file("/properties/prop-1/images", &photo, &[("kind", "gallery")])
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn upload_field_name_is_configurable() {
    let dir = tempfile::tempdir().unwrap();
    let avatar = fixture_file(&dir, "avatar.png", b"png bytes");

    let mut harness = TestHarness::new().await;
    let mock = harness
        .server
        .mock("POST", "/profile/avatar")
        .match_body(Matcher::Regex(
            r#"name="avatar"; filename="avatar.png""#.to_string(),
        ))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    harness
        .client
        .upload_file_as("/profile/avatar", &avatar, "avatar", &[])
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn upload_missing_file_is_an_io_error() {
    let harness = TestHarness::new().await;
    let err = harness
        .client
        .upload_file(
            "/properties/prop-1/images",
            std::path::Path::new("/no/such/file.jpg"),
            &[],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
