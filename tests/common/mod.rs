//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use issue_puller::config::{PullerConfig, WatcherConfig};
use issue_puller::{HttpServer, Shutdown};

#[allow(dead_code)]
/// Start a mock upstream that always answers `status` with `body`.
///
/// Returns its address and a receiver yielding the head (request line and
/// headers) of every request it receives.
pub async fn start_upstream(
    status: u16,
    body: &'static [u8],
) -> (SocketAddr, mpsc::UnboundedReceiver<String>) {
    start_programmable_upstream(move || (status, body.to_vec())).await
}

/// How a scripted upstream answers one request.
#[allow(dead_code)]
pub enum Reply {
    /// Well-formed response with a matching `Content-Length`.
    Respond(u16, Vec<u8>),
    /// Bytes written to the socket as they are, then the connection closes.
    Raw(Vec<u8>),
    /// Read the request, then never answer and never close.
    Hang,
}

#[allow(dead_code)]
/// Start a mock upstream whose response is computed per request.
pub async fn start_programmable_upstream<F>(f: F) -> (SocketAddr, mpsc::UnboundedReceiver<String>)
where
    F: Fn() -> (u16, Vec<u8>) + Send + Sync + 'static,
{
    start_scripted_upstream(move || {
        let (status, body) = f();
        Reply::Respond(status, body)
    })
    .await
}

#[allow(dead_code)]
/// Start a mock upstream that never answers.
pub async fn start_hanging_upstream() -> (SocketAddr, mpsc::UnboundedReceiver<String>) {
    start_scripted_upstream(|| Reply::Hang).await
}

#[allow(dead_code)]
/// Start a mock upstream driven by a [`Reply`] per request.
///
/// The receiver yields each request as text: head, then body when the
/// request declares a `Content-Length`.
pub async fn start_scripted_upstream<F>(f: F) -> (SocketAddr, mpsc::UnboundedReceiver<String>)
where
    F: Fn() -> Reply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let f = f.clone();
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let reply = (*f)();
                        serve_one(socket, reply, &tx).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, rx)
}

async fn serve_one(mut socket: TcpStream, reply: Reply, tx: &mpsc::UnboundedSender<String>) {
    let mut request = Vec::new();
    let mut buf = [0u8; 4096];
    let head_end = loop {
        if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        match socket.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    };

    let head = String::from_utf8_lossy(&request[..head_end]).into_owned();
    let body_len = header_value(&head, "content-length")
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while request.len() < head_end + body_len {
        match socket.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }
    let _ = tx.send(String::from_utf8_lossy(&request).into_owned());

    let response = match reply {
        Reply::Respond(status, body) => {
            let status_text = match status {
                200 => "200 OK",
                401 => "401 Unauthorized",
                404 => "404 Not Found",
                422 => "422 Unprocessable Entity",
                500 => "500 Internal Server Error",
                _ => "200 OK",
            };
            let mut response = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status_text,
                body.len()
            )
            .into_bytes();
            response.extend_from_slice(&body);
            response
        }
        Reply::Raw(bytes) => bytes,
        Reply::Hang => {
            std::future::pending::<()>().await;
            return;
        }
    };

    let _ = socket.write_all(&response).await;
    let _ = socket.shutdown().await;
}

/// An address nothing listens on.
#[allow(dead_code)]
pub fn closed_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

/// Value of header `name` in a captured request head, untrimmed at the end.
#[allow(dead_code)]
pub fn header_value(head: &str, name: &str) -> Option<String> {
    head.split("\r\n").skip(1).find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.eq_ignore_ascii_case(name)
            .then(|| value.trim_start_matches(' ').to_string())
    })
}

/// Configuration pointing the puller at `upstream`.
#[allow(dead_code)]
pub fn config_for(upstream: SocketAddr, org: &str, repo: &str, token: &str) -> PullerConfig {
    let mut config = PullerConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.github.org = org.into();
    config.github.repo = repo.into();
    config.github.token = token.into();
    config.github.api_base_url = format!("http://{}", upstream);
    config.github.use_system_proxy = false;
    config
}

/// Start the puller on an ephemeral port.
#[allow(dead_code)]
pub async fn start_puller(config: PullerConfig) -> (SocketAddr, Shutdown) {
    let (addr, shutdown, _server) = spawn_puller(config).await;
    (addr, shutdown)
}

/// Start the puller and keep the handle of its `run` task.
#[allow(dead_code)]
pub async fn spawn_puller(
    config: PullerConfig,
) -> (SocketAddr, Shutdown, JoinHandle<std::io::Result<()>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let rx = shutdown.subscribe();
    let handle = tokio::spawn(server.run(listener, rx));
    (addr, shutdown, handle)
}

/// Watcher configuration polling `source` every `period_ms`.
#[allow(dead_code)]
pub fn watcher_config(source: SocketAddr, period_ms: u64) -> WatcherConfig {
    WatcherConfig {
        source_url: format!("http://{}", source),
        period_ms,
        use_system_proxy: false,
        label_issues: false,
    }
}

/// A caller that bypasses any proxy from the environment.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
