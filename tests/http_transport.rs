//
//  gitlab-generic-client
//  tests/http_transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! End-to-end requests through the `reqwest` transport against a mock server.

use std::io::Write;

use gitlab_generic_client::transport::UploadFile;
use gitlab_generic_client::{AuthMode, ClientError, ClientOptions, GitlabClient, Payload};
use mockito::{Matcher, Server};
use serde_json::json;

fn client_for(server: &mockito::ServerGuard) -> GitlabClient {
    GitlabClient::new(&format!("{}/api/v4/", server.url()), ClientOptions::default())
        .expect("client should build")
}

#[tokio::test]
async fn get_sends_private_token_and_query() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v4/projects/42/merge_requests")
        .match_header("PRIVATE-TOKEN", "glpat-test")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("state".into(), "opened".into()),
            Matcher::UrlEncoded("labels[]".into(), "bug".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"iid":1,"title":"Fix"}]"#)
        .create_async()
        .await;

    let mut client = client_for(&server);
    let body = client
        .authenticate("glpat-test", AuthMode::HttpToken, None)
        .segment_with("projects", [42])
        .unwrap()
        .segment("merge_requests")
        .get(
            Payload::new()
                .param("state", "opened")
                .param("labels", json!(["bug"])),
        )
        .await
        .unwrap();

    assert_eq!(body, Some(json!([{"iid": 1, "title": "Fix"}])));
    mock.assert_async().await;
}

#[tokio::test]
async fn post_sends_form_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v4/projects")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(Matcher::Exact("name=demo&visibility=private".to_string()))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":7,"name":"demo"}"#)
        .create_async()
        .await;

    let mut client = client_for(&server);
    let body = client
        .segment("projects")
        .post(
            Payload::new()
                .param("name", "demo")
                .param("visibility", "private"),
        )
        .await
        .unwrap();

    assert_eq!(body.unwrap()["id"], 7);
    mock.assert_async().await;
}

#[tokio::test]
async fn put_with_file_sends_multipart() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"release notes").unwrap();

    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/api/v4/projects/3/uploads")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".to_string()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("release notes".to_string()),
            Matcher::Regex(r#"name="description""#.to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create_async()
        .await;

    let mut client = client_for(&server);
    client
        .segment_with("projects", [3])
        .unwrap()
        .segment("uploads")
        .put(
            Payload::new()
                .param("description", "notes")
                .file(UploadFile::from_path("file", file.path())),
        )
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn missing_upload_file_is_a_transport_failure() {
    let server = Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();

    let mut client = client_for(&server);
    let err = client
        .segment("uploads")
        .post(Payload::new().file(UploadFile::from_path("file", dir.path().join("absent.bin"))))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)));
}

#[tokio::test]
async fn not_found_reports_requested_url() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v4/projects/missing")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"404 Project Not Found"}"#)
        .create_async()
        .await;

    let mut client = client_for(&server);
    let err = client
        .segment_with("projects", ["missing"])
        .unwrap()
        .get(Payload::new())
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(
        err.to_string(),
        format!(
            "Page not found : {}/api/v4/projects/missing / 404 Project Not Found",
            server.url()
        )
    );
}

#[tokio::test]
async fn server_error_maps_to_http_error() {
    let mut server = Server::new_async().await;
    server
        .mock("DELETE", "/api/v4/projects/1")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"500 Internal Server Error"}"#)
        .create_async()
        .await;

    let mut client = client_for(&server);
    let err = client
        .segment_with("projects", [1])
        .unwrap()
        .delete(Payload::new())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "500 - 500 Internal Server Error");
}

#[tokio::test]
async fn configured_user_agent_is_sent() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v4/version")
        .match_header("user-agent", "release-bot/2.0")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"version":"17.0.0"}"#)
        .create_async()
        .await;

    let options = ClientOptions::from_overrides([("user_agent", json!("release-bot/2.0"))]).unwrap();
    let mut client =
        GitlabClient::new(&format!("{}/api/v4", server.url()), options).unwrap();
    let body = client.segment("version").get(Payload::new()).await.unwrap();

    assert_eq!(body.unwrap()["version"], "17.0.0");
    mock.assert_async().await;
}

#[tokio::test]
async fn delete_sends_oauth_and_sudo() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("DELETE", "/api/v4/projects/2/issues/9")
        .match_header("authorization", "Bearer oauth-token")
        .match_header("sudo", "jdoe")
        .match_header("x-request-id", "abc")
        .with_status(204)
        .create_async()
        .await;

    let mut client = client_for(&server);
    let body = client
        .authenticate("oauth-token", AuthMode::OAuthToken, Some("jdoe"))
        .segment_with("projects", [2])
        .unwrap()
        .segment_with("issues", [9])
        .unwrap()
        .delete(
            Payload::new()
                .header("X-Request-Id", "abc")
                .header("Authorization", "Bearer somebody-else"),
        )
        .await
        .unwrap();

    assert_eq!(body, None);
    mock.assert_async().await;
}

#[tokio::test]
async fn plain_text_body_is_returned_as_string() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v4/projects/5/repository/files/README%2Emd/raw")
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body("# Readme")
        .create_async()
        .await;

    let mut client = client_for(&server);
    let body = client
        .segment_with("projects", [5])
        .unwrap()
        .segment_with("repository", ["files", "README.md", "raw"])
        .unwrap()
        .get(Payload::new())
        .await
        .unwrap();

    assert_eq!(body, Some(json!("# Readme")));
}
