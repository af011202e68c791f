//! Capability contract shared by the production cluster client and its fake
//!
//! Code under test takes a [`ClusterClient`] or [`ExtendedClient`] rather
//! than a concrete client type, so test suites can swap in the fixture-backed
//! fake without the calling code noticing. The traits here define that
//! surface together with the contracts of the collaborators a client hands
//! out: port-forwarding sessions, member-roll controllers, and per-request
//! credentials.

use crate::error::Result;
use crate::util_factory::UtilFactory;
use crate::version::MeshInfo;
use async_trait::async_trait;
use bytes::Bytes;
use k8s_openapi::api::core::v1::Pod;
use k8s_openapi::apimachinery::pkg::version::Info;
use kube::core::{DynamicObject, ObjectList};
use kube::runtime::reflector::Store;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Base capability surface of a cluster connection: configuration, the
/// family of sub-clients, shared watch caches, and mesh membership.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// Configuration the client was built from.
    fn config(&self) -> kube::Config;

    /// Typed client for core and well-known API groups.
    fn kube(&self) -> kube::Client;

    /// Client for dynamic (schema-less) resource access.
    fn dynamic(&self) -> kube::Client;

    /// Client issuing metadata-only requests.
    fn metadata(&self) -> kube::Client;

    /// Client for API-extension resources (custom resource definitions).
    fn ext(&self) -> kube::Client;

    /// Client for mesh configuration resources.
    fn mesh(&self) -> kube::Client;

    /// Client for gateway-api resources.
    fn gateway_api(&self) -> kube::Client;

    /// Raw REST access to the API server, bypassing the typed wrappers.
    fn rest(&self) -> kube::Client;

    /// Shared watch cache over core resources.
    fn kube_informers(&self) -> Store<DynamicObject>;

    /// Shared watch cache over mesh configuration resources.
    fn mesh_informers(&self) -> Store<DynamicObject>;

    /// Shared watch cache over gateway-api resources.
    fn gateway_api_informers(&self) -> Store<DynamicObject>;

    /// Shared watch cache over dynamically-discovered resources.
    fn dynamic_informers(&self) -> Store<DynamicObject>;

    /// Shared watch cache holding object metadata only.
    fn metadata_informers(&self) -> Store<DynamicObject>;

    /// Start all registered watches and return once their caches have
    /// synced.
    async fn run_and_wait(&self);

    /// Restrict watches to the given namespaces.
    fn set_namespaces(&self, namespaces: Vec<String>);

    /// Begin tracking the named member roll in a namespace.
    fn add_member_roll(&self, namespace: &str, name: &str) -> Result<()>;

    /// Controller distributing member-roll updates to listeners.
    fn member_roll(&self) -> Arc<dyn MemberRollController>;
}

/// Mesh-aware surface layered on top of [`ClusterClient`]: revision and
/// version queries, fixture-friendly pod discovery, proxy admin commands,
/// exec/log capture, port forwarding, and manifest application.
#[async_trait]
pub trait ExtendedClient: ClusterClient {
    /// Control-plane revision this client is pinned to.
    fn revision(&self) -> String;

    /// Version reported by the API server.
    fn kubernetes_version(&self) -> Result<Info>;

    /// Version report collected from every control-plane component.
    async fn mesh_version_info(&self, namespace: &str) -> Result<MeshInfo>;

    /// Control-plane pods matching the given label map.
    async fn control_plane_pods(
        &self,
        namespace: &str,
        labels: &BTreeMap<String, String>,
    ) -> Result<Vec<Pod>>;

    /// Pods in a namespace matching any of the given label selectors.
    async fn pods_for_selector(
        &self,
        namespace: &str,
        label_selectors: &[&str],
    ) -> Result<ObjectList<Pod>>;

    /// Issue a request against the admin endpoint of a single proxy and
    /// return the raw reply.
    async fn proxy_command(
        &self,
        pod_name: &str,
        pod_namespace: &str,
        method: &str,
        path: &str,
        body: Option<Bytes>,
    ) -> Result<Bytes>;

    /// Issue a request against every discovery pod and collect the replies
    /// keyed by pod name.
    async fn broadcast_discovery(
        &self,
        namespace: &str,
        path: &str,
    ) -> Result<HashMap<String, Bytes>>;

    /// Run a command inside a container, capturing stdout and stderr.
    async fn pod_exec(
        &self,
        pod_name: &str,
        namespace: &str,
        container: &str,
        command: &str,
    ) -> Result<(String, String)>;

    /// Fetch logs from a container.
    async fn pod_logs(
        &self,
        namespace: &str,
        pod_name: &str,
        container: &str,
        previous: bool,
    ) -> Result<String>;

    /// Open a port-forwarding session to a pod.
    fn new_port_forwarder(
        &self,
        pod_name: &str,
        namespace: &str,
        local_address: &str,
        local_port: u16,
        pod_port: u16,
    ) -> Result<Box<dyn PortForwarder>>;

    /// Apply manifests from the given files to a namespace.
    async fn apply_yaml_files(&self, namespace: &str, paths: &[&str]) -> Result<()>;

    /// Validate manifest application without persisting anything.
    async fn apply_yaml_files_dry_run(&self, namespace: &str, paths: &[&str]) -> Result<()>;

    /// Delete the objects described by the given manifest files.
    async fn delete_yaml_files(&self, namespace: &str, paths: &[&str]) -> Result<()>;

    /// Validate manifest deletion without persisting anything.
    async fn delete_yaml_files_dry_run(&self, namespace: &str, paths: &[&str]) -> Result<()>;

    /// Mint short-lived bearer credentials attached to individual
    /// control-plane requests.
    async fn create_rpc_credentials(
        &self,
        token_namespace: &str,
        token_service_account: &str,
        audiences: &[String],
        expiration_seconds: i64,
    ) -> Result<Arc<dyn RpcCredentials>>;

    /// Factory for the object-retrieval tooling used by describe-style
    /// commands.
    fn util_factory(&self) -> UtilFactory;
}

/// A single port-forwarding session to a pod.
#[async_trait]
pub trait PortForwarder: Send + Sync {
    /// Begin forwarding. Resolves once the local listener is accepting
    /// connections.
    async fn start(&mut self) -> Result<()>;

    /// Local address the session listens on, in `host:port` form.
    fn address(&self) -> String;

    /// Tear the session down. Safe to call more than once.
    fn close(&mut self);

    /// Wait until the session has fully stopped.
    async fn wait_for_stop(&self);
}

/// Receives namespace-set updates as mesh membership changes.
pub trait MemberRollListener: Send + Sync {
    fn set_namespaces(&self, namespaces: Vec<String>);
}

/// Tracks the mesh member roll and fans membership updates out to
/// registered listeners.
pub trait MemberRollController: Send + Sync {
    fn register(&self, listener: Arc<dyn MemberRollListener>, name: &str);
}

/// Bearer credentials presented on individual control-plane requests.
#[async_trait]
pub trait RpcCredentials: Send + Sync {
    /// Token to present on the next request.
    async fn token(&self) -> Result<String>;
}
