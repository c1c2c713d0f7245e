//! End-to-end tests over a real socket

use docroot::config::Config;
use docroot::server::listener;
use std::net::SocketAddr;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

async fn start_server(root: &TempDir) -> SocketAddr {
    start_server_with(root, Config::default()).await
}

async fn start_server_with(root: &TempDir, mut cfg: Config) -> SocketAddr {
    let tcp = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = tcp.local_addr().unwrap();

    cfg.static_files.root = root.path().to_path_buf();

    tokio::spawn(async move {
        let _ = listener::serve(tcp, &cfg).await;
    });

    addr
}

async fn roundtrip(addr: SocketAddr, raw: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw).await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    response
}

fn site() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "hello").unwrap();
    std::fs::write(dir.path().join("a.css"), "p {}").unwrap();
    std::fs::create_dir(dir.path().join("deep")).unwrap();
    dir
}

#[tokio::test]
async fn test_serves_index_over_tcp() {
    let dir = site();
    let addr = start_server(&dir).await;

    let response = roundtrip(addr, b"GET / HTTP/1.1\r\nHost: x\r\n\r\n").await;

    assert_eq!(
        response,
        b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 5\r\n\r\nhello".to_vec()
    );
}

#[tokio::test]
async fn test_method_not_allowed_over_tcp() {
    let dir = site();
    let addr = start_server(&dir).await;

    let response = roundtrip(addr, b"DELETE /a.css HTTP/1.1\r\n\r\n").await;

    assert_eq!(response, b"HTTP/1.1 405 Method Not Allowed\r\n\r\n".to_vec());
}

#[tokio::test]
async fn test_not_found_over_tcp() {
    let dir = site();
    let addr = start_server(&dir).await;

    let response = roundtrip(addr, b"GET /nope.html HTTP/1.1\r\n\r\n").await;

    assert_eq!(response, b"HTTP/1.1 404 Not Found\r\n\r\n".to_vec());
}

#[tokio::test]
async fn test_redirect_over_tcp() {
    let dir = site();
    let addr = start_server(&dir).await;

    let response = roundtrip(addr, b"GET /deep HTTP/1.1\r\n\r\n").await;

    assert_eq!(
        response,
        b"HTTP/1.1 301 Moved Permanently\r\nLocation: /deep/\r\n\r\n".to_vec()
    );
}

#[tokio::test]
async fn test_request_split_across_writes() {
    let dir = site();
    let addr = start_server(&dir).await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(b"GET /a.css HT").await.unwrap();
    stream.flush().await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    stream.write_all(b"TP/1.1\r\nHost: x\r\n\r\n").await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();

    assert!(response.starts_with(b"HTTP/1.1 200 OK\r\nContent-Type: text/css\r\n"));
    assert!(response.ends_with(b"\r\n\r\np {}"));
}

#[tokio::test]
async fn test_request_without_blank_line_answered_on_half_close() {
    let dir = site();
    let addr = start_server(&dir).await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(b"GET /a.css HTTP/1.1").await.unwrap();
    stream.shutdown().await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();

    assert!(response.starts_with(b"HTTP/1.1 200 OK\r\n"));
}

#[tokio::test]
async fn test_malformed_request_closes_without_response() {
    let dir = site();
    let addr = start_server(&dir).await;

    let response = roundtrip(addr, b"GARBAGE\r\n\r\n").await;
    assert!(response.is_empty());

    // the server is still accepting
    let response = roundtrip(addr, b"GET / HTTP/1.1\r\n\r\n").await;
    assert!(response.ends_with(b"hello"));
}

#[tokio::test]
async fn test_empty_connection_closes_quietly() {
    let dir = site();
    let addr = start_server(&dir).await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.shutdown().await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    assert!(response.is_empty());
}

#[tokio::test]
async fn test_partial_head_answered_while_client_stays_open() {
    let dir = site();
    let mut cfg = Config::default();
    cfg.server.read_timeout_ms = 100;
    let addr = start_server_with(&dir, cfg).await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(b"GET / HTTP/1.1\r\nHost: x\r\n").await.unwrap();

    // no blank line and no half-close: the quiet period ends the read
    let mut response = Vec::new();
    tokio::time::timeout(
        std::time::Duration::from_secs(2),
        stream.read_to_end(&mut response),
    )
    .await
    .expect("server kept waiting for the rest of the head")
    .unwrap();

    assert_eq!(
        response,
        b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 5\r\n\r\nhello".to_vec()
    );
}
