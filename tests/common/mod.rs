//! In-process stand-in for the remote catalog.
//!
//! Every request is recorded and answered with one configurable reply, so
//! tests can assert on exactly what went over the wire.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::IntoResponse;
use axum::Router;
use pelis_tui::catalog::{CatalogClient, CatalogConfig};
use reqwest::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl Reply {
    pub fn json(body: serde_json::Value) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Clone)]
struct Shared {
    requests: Arc<Mutex<Vec<Recorded>>>,
    reply: Reply,
}

pub struct MockCatalog {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockCatalog {
    /// Starts the server on a random port on its own runtime thread.
    pub fn start(reply: Reply) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let shared = Shared {
            requests: requests.clone(),
            reply,
        };

        let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = std_listener.local_addr().unwrap();
        std_listener.set_nonblocking(true).unwrap();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async {
                let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
                let app = Router::new().fallback(record).with_state(shared);
                axum::serve(listener, app).await
            })
            .unwrap();
        });

        Self { addr, requests }
    }

    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}/3", self.addr)).unwrap()
    }

    pub fn config(&self) -> CatalogConfig {
        CatalogConfig::new(self.base_url())
    }

    pub fn client(&self) -> CatalogClient {
        CatalogClient::new(self.config().with_access_token("test-token")).unwrap()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

async fn record(
    State(shared): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> impl IntoResponse {
    shared.requests.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });

    if !shared.reply.delay.is_zero() {
        tokio::time::sleep(shared.reply.delay).await;
    }

    (
        StatusCode::from_u16(shared.reply.status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        shared.reply.body.clone(),
    )
}

/// An address nothing listens on.
pub fn closed_base_url() -> Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}/3")).unwrap()
}
