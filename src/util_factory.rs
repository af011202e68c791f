//! Canned-response factory for object-retrieval tooling
//!
//! Describe-style commands build their lookups through a factory rather
//! than a concrete client. The factory here is a throwaway: its backend
//! answers every request with the same fixed `200 OK` carrying a single
//! placeholder object, which is enough for CLI code under test to complete
//! a retrieval round trip. The payload is a constant, not per-test data.

use bytes::Bytes;
use futures::future::{ready, Ready};
use http::{Request, Response, StatusCode};
use http_body_util::Full;
use kube::client::Body as KubeBody;
use std::task::{Context, Poll};
use tower::Service;

/// Factory for object-retrieval tooling, backed by a canned response.
#[derive(Clone)]
pub struct UtilFactory {
    client: kube::Client,
}

impl UtilFactory {
    pub fn new() -> Self {
        Self {
            client: kube::Client::new(CannedService, "default"),
        }
    }

    /// Client whose every request resolves to the canned object.
    pub fn client(&self) -> kube::Client {
        self.client.clone()
    }
}

impl Default for UtilFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Service replying to any request with one placeholder object named `foo`.
#[derive(Clone)]
struct CannedService;

impl CannedService {
    fn response() -> Response<Full<Bytes>> {
        let body = serde_json::json!({
            "apiVersion": "v1",
            "kind": "ConfigMap",
            "metadata": {
                "name": "foo",
                "namespace": "default"
            }
        });

        Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", "application/json")
            .body(Full::new(Bytes::from(body.to_string())))
            .unwrap()
    }
}

impl Service<Request<KubeBody>> for CannedService {
    type Response = Response<Full<Bytes>>;
    type Error = Box<dyn std::error::Error + Send + Sync>;
    type Future = Ready<std::result::Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _req: Request<KubeBody>) -> Self::Future {
        ready(Ok(Self::response()))
    }
}
