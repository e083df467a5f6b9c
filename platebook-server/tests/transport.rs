//! Real sockets against a bound server

use std::future::Future;
use std::net::SocketAddr;

use platebook_core::store::Stores;
use platebook_core::test_utils::test_signing_key;
use platebook_server::{AppState, PlatebookServer};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

async fn start() -> (SocketAddr, oneshot::Sender<()>, impl Future<Output = std::io::Result<()>>) {
    let state = AppState::new(Stores::in_memory(), test_signing_key());
    let server = PlatebookServer::bind("127.0.0.1:0".parse().unwrap(), state)
        .await
        .unwrap();
    let addr = server.local_addr().unwrap();

    let (tx, rx) = oneshot::channel::<()>();
    let serving = server.serve(async move {
        let _ = rx.await;
    });
    (addr, tx, serving)
}

async fn raw_request(addr: SocketAddr, request: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    String::from_utf8_lossy(&response).into_owned()
}

#[tokio::test]
async fn serves_http1_and_shuts_down() {
    let (addr, stop, serving) = start().await;
    let handle = tokio::spawn(serving);

    let response = raw_request(
        addr,
        "GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    )
    .await;
    assert!(response.starts_with("HTTP/1.1 200"), "{}", response);
    assert!(response.contains("\"healthy\""));

    let body = r#"{"email":"a@x.com","username":"alice","password":"pw"}"#;
    let register = format!(
        "POST /api/auth/register HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    let response = raw_request(addr, &register).await;
    assert!(response.starts_with("HTTP/1.1 201"), "{}", response);

    stop.send(()).unwrap();
    handle.await.unwrap().unwrap();

    assert!(TcpStream::connect(addr).await.is_err());
}
