//! In-memory fake of the mesh cluster client.
//!
//! Test suites for CLI and controller code reach the cluster through the
//! [`ClusterClient`] and [`ExtendedClient`] traits. This crate provides
//! [`FakeClient`], an implementation that answers entirely from fixtures
//! the test author supplies up front: canned proxy replies keyed by pod
//! name, pod lists keyed by namespace and label selector, plus fixed
//! revision, configuration, and version values. No network traffic and no
//! background tasks.
//!
//! Pod discovery is keyed by the exact selector string the fixture was
//! registered under; the fake does not evaluate selector expressions
//! against pod labels. Methods outside the fixture-backed surface either
//! panic (extend the fixtures before exercising that path) or return a
//! typed `not implemented` error.
//!
//! # Examples
//!
//! ```rust
//! use k8s_openapi::api::core::v1::Pod;
//! use mesh_fake_client::{ClientBuilder, ExtendedClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut pod = Pod::default();
//! pod.metadata.name = Some("discovery-7fd8".to_string());
//! pod.metadata.namespace = Some("mesh-system".to_string());
//!
//! let client = ClientBuilder::new()
//!     .with_pods("mesh-system", "app=discovery", vec![pod])
//!     .with_result("discovery-7fd8", "SYNCED")
//!     .build();
//!
//! let pods = client
//!     .pods_for_selector("mesh-system", &["app=discovery"])
//!     .await?;
//! assert_eq!(pods.items.len(), 1);
//!
//! let reply = client
//!     .proxy_command("discovery-7fd8", "mesh-system", "GET", "/stats", None)
//!     .await?;
//! assert_eq!(reply, "SYNCED");
//! # Ok(())
//! # }
//! ```

mod builder;
mod client;
mod error;
mod fake;
mod util_factory;
pub mod version;

#[cfg(test)]
mod builder_test;
#[cfg(test)]
mod util_factory_test;

pub use builder::ClientBuilder;
pub use client::{
    ClusterClient, ExtendedClient, MemberRollController, MemberRollListener, PortForwarder,
    RpcCredentials,
};
pub use error::{Error, Result};
pub use fake::{FakeClient, FakePortForwarder};
pub use util_factory::UtilFactory;
