//! Minimal HTTP stub server for integration tests
//!
//! Serves one canned response per connection, counts requests and keeps
//! the raw request heads so tests can inspect the headers that were sent.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Response the stub sends for every request
#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl StubResponse {
    pub fn ok(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(body: &str, delay: Duration) -> Self {
        Self {
            delay,
            ..Self::ok(body)
        }
    }
}

#[derive(Debug)]
struct State {
    response: Mutex<StubResponse>,
    requests: Mutex<Vec<String>>,
    hits: AtomicUsize,
}

/// Handle to a running stub server
#[derive(Debug, Clone)]
pub struct StubServer {
    addr: SocketAddr,
    state: Arc<State>,
}

impl StubServer {
    /// Binds to an ephemeral localhost port and starts serving `response`
    pub async fn start(response: StubResponse) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub server");
        let addr = listener.local_addr().expect("Stub server has no address");
        let state = Arc::new(State {
            response: Mutex::new(response),
            requests: Mutex::new(Vec::new()),
            hits: AtomicUsize::new(0),
        });

        let accept_state = Arc::clone(&state);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(handle(stream, Arc::clone(&accept_state)));
            }
        });

        Self { addr, state }
    }

    /// Returns an absolute URI for `path` on this server
    pub fn uri(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Number of requests received so far
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    /// Raw request heads received so far
    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Replaces the response served to subsequent requests
    pub fn respond_with(&self, response: StubResponse) {
        *self.state.response.lock().unwrap() = response;
    }
}

async fn handle(mut stream: TcpStream, state: Arc<State>) {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }

    state.hits.fetch_add(1, Ordering::SeqCst);
    state
        .requests
        .lock()
        .unwrap()
        .push(String::from_utf8_lossy(&head).into_owned());

    let response = state.response.lock().unwrap().clone();
    if !response.delay.is_zero() {
        tokio::time::sleep(response.delay).await;
    }

    let reply = format!(
        "HTTP/1.1 {} Stub\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        response.body.len(),
        response.body
    );
    let _ = stream.write_all(reply.as_bytes()).await;
    let _ = stream.shutdown().await;
}
