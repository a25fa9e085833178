//! Test utilities for standing up a fake GraphQL endpoint.
//!
//! The server hands every request, with its body collected, to a shared
//! handler so tests can script responses and inspect what the client sent.

use assert_cmd::prelude::*;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Request, Response, StatusCode, body::Incoming, server::conn::http1, service::service_fn};
use hyper_util::rt::TokioIo;
use std::io::ErrorKind;
use std::{
    collections::VecDeque,
    net::SocketAddr,
    process::Command,
    sync::{Arc, Mutex},
};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

/// Shared handler invoked with each request and its collected body.
pub type Handler = Arc<Mutex<Box<dyn FnMut(&Request<Bytes>) -> Response<Full<Bytes>> + Send>>>;

/// Request bodies recorded by [`set_recording_responder`], decoded as JSON.
pub type Recorded = Arc<Mutex<Vec<serde_json::Value>>>;

/// Handle returned by [`start_server`] for shutting down the server.
pub struct ShutdownHandle {
    join: JoinHandle<()>,
    stop: oneshot::Sender<()>,
}

impl ShutdownHandle {
    /// Signal the server to stop and await shutdown.
    pub async fn shutdown(self) {
        let _ = self.stop.send(());
        let _ = self.join.await;
    }
}

/// Start an HTTP/1 server forwarding requests to a shared handler.
///
/// # Errors
///
/// Returns an error if the server fails to bind to a local port.
///
/// # Panics
///
/// Panics if the default response cannot be constructed.
#[expect(
    clippy::integer_division_remainder_used,
    reason = "tokio::select! uses % internally"
)]
pub async fn start_server() -> Result<(SocketAddr, Handler, ShutdownHandle), std::io::Error> {
    let handler: Handler = Arc::new(Mutex::new(Box::new(|_req| {
        Response::builder()
            .status(404)
            .body(Full::from(Bytes::from_static(b"No handler")))
            .expect("failed to create default response")
    })));
    let handler_clone = handler.clone();

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (tx, mut rx) = oneshot::channel();

    let join = tokio::spawn(async move {
        loop {
            tokio::select! {
                res = listener.accept() => match res {
                    Ok((stream, _)) => {
                        let io = TokioIo::new(stream);
                        let h = handler_clone.clone();
                        let service = service_fn(move |req: Request<Incoming>| {
                            let h = h.clone();
                            async move {
                                let (parts, body) = req.into_parts();
                                let bytes = body.collect().await.map(|b| b.to_bytes()).unwrap_or_default();
                                let req = Request::from_parts(parts, bytes);
                                let mut f = h.lock().expect("lock handler in service");
                                Ok::<_, std::convert::Infallible>((f)(&req))
                            }
                        });
                        tokio::spawn(async move {
                            let _ = http1::Builder::new().serve_connection(io, service).await;
                        });
                    }
                    Err(e) => {
                        eprintln!("accept error: {e}");
                        match e.kind() {
                            ErrorKind::ConnectionAborted
                            | ErrorKind::ConnectionReset
                            | ErrorKind::Interrupted
                            | ErrorKind::WouldBlock => {}
                            _ => break,
                        }
                    }
                },
                _ = &mut rx => break,
            }
        }
    });

    Ok((addr, handler, ShutdownHandle { join, stop: tx }))
}

/// GraphQL URL served by the test server at `addr`.
#[allow(dead_code, reason = "helper used in some tests only")]
#[must_use]
pub fn graphql_url(addr: SocketAddr) -> String {
    format!("http://{addr}/graphql")
}

/// Create an `orgissues` command configured for testing.
///
/// The command points at the test server and disables colour output to make
/// assertions deterministic.
#[allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    reason = "helper for integration tests"
)]
pub fn orgissues_cmd(addr: SocketAddr) -> Command {
    let mut cmd = Command::cargo_bin("orgissues").expect("binary");
    cmd.env("GITHUB_GRAPHQL_URL", graphql_url(addr))
        .env("GITHUB_TOKEN", "dummy")
        .env("NO_COLOR", "1")
        .env("CLICOLOR_FORCE", "0")
        .env_remove("ORGISSUES_GITHUB_TOKEN");
    cmd
}

fn json_response(status: StatusCode, body: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::from(body))
        .expect("build response")
}

/// Configure handler to respond with bodies sequentially.
///
/// # Panics
///
/// Panics if more requests arrive than bodies were supplied.
#[allow(dead_code, reason = "helper used in some tests only")]
pub fn set_sequential_responder(handler: &Handler, bodies: impl Into<Vec<String>>) {
    let responses = Arc::new(Mutex::new(VecDeque::from(bodies.into())));
    *handler.lock().expect("lock handler") = Box::new(move |_req| {
        let body = responses
            .lock()
            .expect("lock responses")
            .pop_front()
            .expect("response");
        json_response(StatusCode::OK, body)
    });
}

/// Respond with bodies sequentially while recording each request's JSON.
///
/// Returns the shared log of request bodies, in arrival order.
///
/// # Panics
///
/// Panics if a request body is not JSON or a response body is missing.
#[allow(dead_code, reason = "helper used in some tests only")]
pub fn set_recording_responder(handler: &Handler, bodies: impl Into<Vec<String>>) -> Recorded {
    let responses = Arc::new(Mutex::new(VecDeque::from(bodies.into())));
    let recorded: Recorded = Arc::default();
    let log = Arc::clone(&recorded);
    *handler.lock().expect("lock handler") = Box::new(move |req: &Request<Bytes>| {
        let json = serde_json::from_slice::<serde_json::Value>(req.body())
            .expect("invalid JSON request body");
        log.lock().expect("lock recorded").push(json);
        let body = responses
            .lock()
            .expect("lock responses")
            .pop_front()
            .expect("response");
        json_response(StatusCode::OK, body)
    });
    recorded
}

/// Respond to every request with `status` and `body`.
#[allow(dead_code, reason = "helper used in some tests only")]
pub fn set_status_responder(handler: &Handler, status: StatusCode, body: &'static str) {
    *handler.lock().expect("lock handler") =
        Box::new(move |_req| json_response(status, body.to_string()));
}

/// Capture the `Authorization` header of every request.
#[allow(dead_code, reason = "helper used in some tests only")]
pub fn set_header_capture(handler: &Handler, body: String) -> Arc<Mutex<Vec<String>>> {
    let seen: Arc<Mutex<Vec<String>>> = Arc::default();
    let log = Arc::clone(&seen);
    *handler.lock().expect("lock handler") = Box::new(move |req: &Request<Bytes>| {
        let auth = req
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        log.lock().expect("lock headers").push(auth);
        json_response(StatusCode::OK, body.clone())
    });
    seen
}

/// A page of the issues query as GitHub would return it.
///
/// Issue `n` is titled `Issue n`; the first issue carries one `HEART`
/// reaction.
#[allow(dead_code, reason = "helper used in some tests only")]
#[must_use]
pub fn issues_page(numbers: &[u32], total: u32, next_cursor: Option<&str>) -> String {
    let edges: Vec<serde_json::Value> = numbers
        .iter()
        .enumerate()
        .map(|(i, n)| {
            let reactions: Vec<serde_json::Value> = if i == 0 {
                vec![serde_json::json!({"node": {"id": format!("R{n}"), "content": "HEART"}})]
            } else {
                Vec::new()
            };
            serde_json::json!({
                "node": {
                    "id": format!("I{n}"),
                    "title": format!("Issue {n}"),
                    "url": format!("https://github.com/facebook/react/issues/{n}"),
                    "reactions": {"edges": reactions}
                }
            })
        })
        .collect();
    serde_json::json!({
        "data": {
            "organization": {
                "name": "Meta",
                "url": "https://github.com/facebook",
                "repository": {
                    "name": "react",
                    "url": "https://github.com/facebook/react",
                    "issues": {
                        "edges": edges,
                        "totalCount": total,
                        "pageInfo": {
                            "endCursor": next_cursor,
                            "hasNextPage": next_cursor.is_some()
                        }
                    }
                }
            }
        }
    })
    .to_string()
}

/// A response carrying only a GraphQL error, as for an unknown repository.
#[allow(dead_code, reason = "helper used in some tests only")]
#[must_use]
pub fn error_response(message: &str) -> String {
    serde_json::json!({
        "data": {"organization": {"name": "Meta", "url": "https://github.com/facebook", "repository": null}},
        "errors": [{"type": "NOT_FOUND", "path": ["organization", "repository"], "message": message}]
    })
    .to_string()
}
