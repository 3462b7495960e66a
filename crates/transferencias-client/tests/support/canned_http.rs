use std::net::TcpListener as StdTcpListener;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use tokio::sync::oneshot;

/// What the responder saw of the single request it answered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceivedRequest {
    pub method: String,
    pub path_and_query: String,
    pub body: String,
}

struct Canned {
    status: StatusCode,
    body: String,
    seen: Mutex<Sender<ReceivedRequest>>,
}

/// Loopback axum server answering every request with a fixed status and JSON
/// body. Shuts down when dropped.
pub struct CannedServer {
    pub base_url: String,
    seen: Receiver<ReceivedRequest>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl CannedServer {
    pub fn respond(status: u16, body: &str) -> std::io::Result<Self> {
        let listener = StdTcpListener::bind("127.0.0.1:0")?;
        listener.set_nonblocking(true)?;
        let address = listener.local_addr()?;

        let (seen_tx, seen_rx) = mpsc::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let canned = Arc::new(Canned {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body: body.to_string(),
            seen: Mutex::new(seen_tx),
        });

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let handle = thread::spawn(move || {
            runtime.block_on(async move {
                let Ok(listener) = tokio::net::TcpListener::from_std(listener) else {
                    return;
                };
                let app = Router::new().fallback(answer).with_state(canned);
                let _ = axum::serve(listener, app)
                    .with_graceful_shutdown(async {
                        let _ = shutdown_rx.await;
                    })
                    .await;
            });
        });

        Ok(Self {
            base_url: format!("http://{address}/api/transferencias"),
            seen: seen_rx,
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// The first request served, or an empty record when none arrived.
    pub fn received_request(&self) -> ReceivedRequest {
        self.seen
            .recv_timeout(Duration::from_secs(5))
            .unwrap_or_default()
    }
}

impl Drop for CannedServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

async fn answer(
    State(canned): State<Arc<Canned>>,
    method: Method,
    uri: Uri,
    body: String,
) -> Response {
    let received = ReceivedRequest {
        method: method.to_string(),
        path_and_query: uri
            .path_and_query()
            .map(|value| value.as_str().to_string())
            .unwrap_or_default(),
        body,
    };
    if let Ok(sender) = canned.seen.lock() {
        let _ = sender.send(received);
    }

    (
        canned.status,
        [(header::CONTENT_TYPE, "application/json")],
        canned.body.clone(),
    )
        .into_response()
}

/// A loopback URL with nothing listening behind it.
pub fn closed_port_url() -> std::io::Result<String> {
    let listener = StdTcpListener::bind("127.0.0.1:0")?;
    let address = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{address}/api/transferencias"))
}
