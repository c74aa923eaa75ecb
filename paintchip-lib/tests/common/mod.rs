//! Local catalog server for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::Request;
use hyper::Response;
use hyper_util::rt::TokioIo;
use paintchip_lib::CatalogClient;
use paintchip_lib::cache::InMemoryCache;
use tokio::net::TcpListener;

pub const SW7008_JSON: &str = r##"{
    "colorNumber": "SW7008",
    "name": "Alabaster",
    "hex": "#EDEAE0",
    "red": "237",
    "green": "234",
    "blue": "224",
    "hue": "0.138",
    "saturation": "0.24",
    "lightness": "0.90",
    "lrv": "79.0",
    "isExterior": true,
    "coordinatingColors": [
        { "number": "SW7005", "name": "Pure White", "hex": "#EDECE6" }
    ]
}"##;

/// Builds a minimal catalog record body.
pub fn color_json(code: &str, r: u8, g: u8, b: u8) -> String {
    serde_json::json!({
        "colorNumber": code,
        "name": format!("Color {}", code),
        "hex": format!("#{:02X}{:02X}{:02X}", r, g, b),
        "red": r.to_string(),
        "green": g.to_string(),
        "blue": b.to_string(),
        "hue": "0",
        "saturation": "0",
        "lightness": "0.5",
        "lrv": "50"
    })
    .to_string()
}

/// Path the catalog serves a color code under.
pub fn color_path(code: &str) -> String {
    format!("/color/byColorNumber/{}", code)
}

#[derive(Default)]
struct ServerState {
    routes: Mutex<HashMap<String, (u16, String)>>,
    hits: Mutex<HashMap<String, usize>>,
}

impl ServerState {
    fn respond(&self, path: &str) -> Response<Full<Bytes>> {
        *self.hits.lock().unwrap().entry(path.to_string()).or_default() += 1;

        let (status, body) = self
            .routes
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .unwrap_or_else(|| (404, r#"{"message":"Not Found"}"#.to_string()));

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Full::new(Bytes::from(body)))
            .unwrap()
    }
}

/// An HTTP server answering canned responses per path.
///
/// Unknown paths answer 404. Every request is counted by path.
pub struct CatalogServer {
    addr: SocketAddr,
    state: Arc<ServerState>,
}

impl CatalogServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(ServerState::default());

        let server_state = state.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let io = TokioIo::new(stream);
                let state = server_state.clone();
                tokio::spawn(async move {
                    let service = service_fn(move |req: Request<Incoming>| {
                        let state = state.clone();
                        async move { Ok::<_, Infallible>(state.respond(req.uri().path())) }
                    });
                    let _ = http1::Builder::new().serve_connection(io, service).await;
                });
            }
        });

        Self { addr, state }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn route(&self, path: &str, status: u16, body: impl Into<String>) {
        self.state
            .routes
            .lock()
            .unwrap()
            .insert(path.to_string(), (status, body.into()));
    }

    pub fn hits(&self, path: &str) -> usize {
        self.state.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.state.hits.lock().unwrap().values().sum()
    }

    /// A client for this server with a fresh in-memory cache.
    pub fn cached_client(&self) -> CatalogClient {
        CatalogClient::builder()
            .base_url(self.url())
            .cache(InMemoryCache::new())
            .build()
            .unwrap()
    }
}

/// Returns a base URL on which nothing is listening.
pub async fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
