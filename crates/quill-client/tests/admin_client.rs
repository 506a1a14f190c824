//! Admin client tests against a mock server.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use quill_client::{AdminClient, BrowseParams, FilePart, ImageUpload, Params, RequestOptions};
use reqwest::Method;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "6470e5adf7b2e800012f0001:a1b2c3d4e5f6a1b2c3d4e5f6a1b2c3d4e5f6a1b2c3d4e5f6a1b2c3d4";

fn client(server: &MockServer) -> AdminClient {
    AdminClient::new(server.uri(), KEY).unwrap()
}

async fn only_request(server: &MockServer) -> wiremock::Request {
    let mut requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    requests.remove(0)
}

#[test]
fn test_canonical_base_url() {
    let client = AdminClient::new("https://example.site", KEY).unwrap();
    assert_eq!(client.base_url(), "https://example.site/ghost/api/admin");
}

#[tokio::test]
async fn test_get_sends_token_and_version() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ghost/api/admin/posts/"))
        .and(query_param("limit", "5"))
        .and(header("accept-version", "v5.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"posts": [{"id": "p1"}]})))
        .mount(&server)
        .await;

    let value = client(&server)
        .get("/posts/", Params::new().set("limit", 5).set_opt("filter", None::<String>))
        .await
        .unwrap();
    assert_eq!(value["posts"][0]["id"], "p1");

    let request = only_request(&server).await;
    let auth = request.headers.get("authorization").unwrap().to_str().unwrap();
    let token = auth.strip_prefix("Ghost ").unwrap();
    let header_segment = token.split('.').next().unwrap();
    let jose: serde_json::Value =
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(header_segment).unwrap()).unwrap();
    assert_eq!(jose["kid"], "6470e5adf7b2e800012f0001");
    assert!(request.headers.get("content-type").is_none());
    assert!(!request.url.as_str().contains("filter"));
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ghost/api/admin/tags/"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"tags": [{"name": "News"}]})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"tags": [{"id": "t1"}]})))
        .expect(1)
        .mount(&server)
        .await;

    let value = client(&server)
        .post("/tags/", json!({"tags": [{"name": "News"}]}))
        .await
        .unwrap();
    assert_eq!(value["tags"][0]["id"], "t1");
}

#[tokio::test]
async fn test_unauthorized_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ghost/api/admin/site/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errors": [{"message": "Invalid token", "type": "UnauthorizedError"}]
        })))
        .mount(&server)
        .await;

    let err = client(&server).site().await.unwrap_err();
    let api = err.as_api().unwrap();
    assert_eq!(api.status_code, 401);
    assert!(api.is_authentication_error());
    assert_eq!(api.message(), "Invalid token");
    assert!(err.is_auth_error());
}

#[tokio::test]
async fn test_non_json_error_uses_status_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let err = client(&server).get("/posts/", Params::new()).await.unwrap_err();
    let api = err.as_api().unwrap();
    assert!(api.is_server_error());
    assert_eq!(api.message(), "Service Unavailable");
}

#[tokio::test]
async fn test_no_content_returns_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/ghost/api/admin/posts/p1/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let value = client(&server).resource("posts").delete("p1").await.unwrap();
    assert_eq!(value, json!({}));
}

#[tokio::test]
async fn test_empty_ok_body_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ghost/api/admin/site/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let err = client(&server).site().await.unwrap_err();
    let api = err.as_api().unwrap();
    assert!(api.is_network_error());
    assert_eq!(api.status_code, 0);
}

#[tokio::test]
async fn test_timeout_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let options = RequestOptions::new(Method::GET).timeout(Duration::from_millis(150));
    let err = client(&server).request("/posts/", options).await.unwrap_err();
    assert!(err.is_timeout());
    assert!(err.to_string().contains("150"));
}

#[tokio::test]
async fn test_client_default_timeout_applies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let client = AdminClient::builder()
        .base_url(server.uri())
        .admin_key(KEY)
        .timeout(Duration::from_millis(120))
        .build()
        .unwrap();
    let err = client.get("/posts/", Params::new()).await.unwrap_err();
    assert!(err.as_api().unwrap().is_timeout());
    assert!(err.to_string().contains("120ms"));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = AdminClient::new(format!("http://127.0.0.1:{}", port), KEY).unwrap();

    let err = client.get("/posts/", Params::new()).await.unwrap_err();
    let api = err.as_api().unwrap();
    assert_eq!(api.status_code, 0);
    assert!(api.is_network_error());
}

#[tokio::test]
async fn test_resource_add_wraps_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ghost/api/admin/posts/"))
        .and(query_param("source", "html"))
        .and(body_json(json!({"posts": [{"title": "Hello", "html": "<p>Hi</p>"}]})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"posts": [{"id": "p9"}]})))
        .expect(1)
        .mount(&server)
        .await;

    let value = client(&server)
        .resource("posts")
        .add(
            json!({"title": "Hello", "html": "<p>Hi</p>"}),
            Params::new().set("source", "html"),
        )
        .await
        .unwrap();
    assert_eq!(value["posts"][0]["id"], "p9");
}

#[tokio::test]
async fn test_resource_browse_and_read_by_slug() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ghost/api/admin/tags/"))
        .and(query_param("limit", "all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tags": []})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ghost/api/admin/tags/slug/news/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tags": [{"slug": "news"}]})))
        .mount(&server)
        .await;

    let tags = client(&server).resource("tags");
    assert_eq!(
        tags.browse(BrowseParams::new().limit("all")).await.unwrap(),
        json!({"tags": []})
    );
    let news = tags.read_by_slug("news", Params::new()).await.unwrap();
    assert_eq!(news["tags"][0]["slug"], "news");
}

#[tokio::test]
async fn test_image_upload_is_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ghost/api/admin/images/upload/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "images": [{"url": "https://example.site/content/images/photo.png", "ref": "hero"}]
        })))
        .mount(&server)
        .await;

    let upload = ImageUpload {
        purpose: Some("image".to_string()),
        reference: Some("hero".to_string()),
    };
    let value = client(&server)
        .images()
        .upload("photo.png", vec![0x89, b'P', b'N', b'G'], upload)
        .await
        .unwrap();
    assert_eq!(value["images"][0]["ref"], "hero");

    let request = only_request(&server).await;
    let content_type = request.headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data; boundary="));
    assert!(request.headers.get("authorization").is_some());
    assert_eq!(request.headers.get("accept-version").unwrap(), "v5.0");

    let body = String::from_utf8_lossy(&request.body);
    assert!(body.contains("filename=\"photo.png\""));
    assert!(body.contains("name=\"purpose\""));
    assert!(body.contains("name=\"ref\""));
    assert!(body.contains("image/png"));
}

#[tokio::test]
async fn test_image_upload_missing_file() {
    let server = MockServer::start().await;
    let dir = tempfile::TempDir::new().unwrap();
    let err = client(&server)
        .images()
        .upload_file(dir.path().join("absent.png"), ImageUpload::default())
        .await
        .unwrap_err();
    assert!(matches!(err, quill_client::Error::ReadFile { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_image_from_disk() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ghost/api/admin/images/upload/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"images": [{"url": "u"}]})))
        .mount(&server)
        .await;

    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("cover.jpg");
    std::fs::write(&file, b"jpeg-bytes").unwrap();

    let value = client(&server)
        .upload_image(&file, ImageUpload::default())
        .await
        .unwrap();
    assert_eq!(value["images"][0]["url"], "u");

    let request = only_request(&server).await;
    let body = String::from_utf8_lossy(&request.body);
    assert!(body.contains("filename=\"cover.jpg\""));
    assert!(body.contains("image/jpeg"));
    assert!(body.contains("jpeg-bytes"));
    assert!(!body.contains("name=\"purpose\""));
}

#[tokio::test]
async fn test_bad_part_content_type_fails_before_sending() {
    let server = MockServer::start().await;
    let file = FilePart::new("file", "photo.png", vec![1, 2, 3]).with_content_type("image");

    let err = client(&server)
        .upload_multipart("/images/upload/", file, Vec::new(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, quill_client::Error::Config(_)));
    assert!(err.as_api().is_none());
    assert!(server.received_requests().await.unwrap().is_empty());
}
