//! HTTP round trips against a real listener
//!
//! Starts the router on an ephemeral port and speaks plain HTTP/1.1 over a
//! TCP stream, so the listener and router are exercised together.

use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;

use docval_rules::builtin_catalog;
use docval_server::{ConfigLayer, ServerConfig, build_router};
use docval_test_utils::load_document;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::NamedTempFile;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

async fn spawn_server(config: ServerConfig) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = build_router(Arc::new(builtin_catalog().unwrap()), &config);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn post(addr: SocketAddr, path: &str, body: &str) -> (u16, Value) {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "POST {path} HTTP/1.1\r\nHost: {addr}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    let raw = String::from_utf8(raw).unwrap();

    let (head, payload) = raw.split_once("\r\n\r\n").unwrap();
    let status = head
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse().ok())
        .unwrap();
    (status, serde_json::from_str(payload).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_validate_over_tcp() {
    let config = ServerConfig::resolve(None, &ConfigLayer::default()).unwrap();
    let addr = spawn_server(config).await;

    let body = json!({
        "tests": [{ "name": "basic", "type": "preset" }],
        "document": load_document("valid")
    });
    let (status, report) = post(addr, "/api/v1/validate", &body.to_string()).await;

    assert_eq!(status, 200);
    assert_eq!(report["isValid"], json!(true));
    assert_eq!(report["tests"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_config_file_drives_the_server() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "route = \"/v2/check\"\nexecution = \"sequential\"").unwrap();

    let config = ServerConfig::resolve(Some(file.path()), &ConfigLayer::default()).unwrap();
    let addr = spawn_server(config).await;

    let body = json!({ "tests": [{ "name": "csaf_2_0", "type": "test" }], "document": {} });
    let (status, report) = post(addr, "/v2/check", &body.to_string()).await;
    assert_eq!(status, 200);
    assert_eq!(report["isValid"], json!(false));

    let (status, _) = post(addr, "/api/v1/validate", &body.to_string()).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_bad_request_over_tcp() {
    let config = ServerConfig::resolve(None, &ConfigLayer::default()).unwrap();
    let addr = spawn_server(config).await;

    let (status, error) = post(addr, "/api/v1/validate", r#"{"tests":[]}"#).await;
    assert_eq!(status, 400);
    assert_eq!(
        error["message"],
        json!("body must have required property 'document'")
    );
}
