//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use rpc_sentry::config::{BackendConfig, ProxyConfig};
use rpc_sentry::observability::AuditSink;
use rpc_sentry::{AllowList, HttpServer, Shutdown};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Start a mock backend on an ephemeral port that returns a fixed JSON body.
pub async fn start_mock_backend(response: &'static str) -> SocketAddr {
    start_programmable_backend(move || async move { (200, response.to_string()) }).await
}

/// Start a programmable mock backend; the closure produces (status, body)
/// for each connection.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        // Drain what the client sent before replying.
                        let mut buf = [0u8; 8192];
                        let _ = socket.read(&mut buf).await;

                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            _ => "200 OK",
                        };
                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Audit sink that records rejections in memory for assertions.
#[derive(Default)]
pub struct RecordingAudit {
    pub rejections: Mutex<Vec<(String, String)>>,
}

impl RecordingAudit {
    pub fn rejected_methods(&self) -> Vec<String> {
        self.rejections
            .lock()
            .unwrap()
            .iter()
            .map(|(method, _)| method.clone())
            .collect()
    }
}

impl AuditSink for RecordingAudit {
    fn record_rejection(&self, method: &str, payload: &str) {
        self.rejections
            .lock()
            .unwrap()
            .push((method.to_string(), payload.to_string()));
    }
}

/// A proxy instance running in-process against an ephemeral port.
pub struct TestProxy {
    pub addr: SocketAddr,
    pub audit: Arc<RecordingAudit>,
    pub shutdown: Shutdown,
}

impl TestProxy {
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }
}

/// Start the proxy forwarding to `backend_port` with the given allow-list.
pub async fn start_proxy(backend_port: u16, methods: &[&str]) -> TestProxy {
    let mut config = ProxyConfig::default();
    config.backend = BackendConfig::for_local_port(backend_port);
    config.backend.timeout_secs = 2;

    let allowlist: AllowList = methods.iter().copied().collect();
    let audit = Arc::new(RecordingAudit::default());

    let server = HttpServer::with_audit(config, allowlist, audit.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    TestProxy {
        addr,
        audit,
        shutdown,
    }
}

/// Grab a port nothing is listening on.
pub async fn unused_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}
