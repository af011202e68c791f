//! Fixture-backed fake of the mesh cluster client
//!
//! [`FakeClient`] satisfies the whole [`ExtendedClient`] contract but only
//! three method families carry logic: selector-keyed pod discovery, the
//! per-pod proxy result lookup, and the broadcast query. Everything else is
//! a fixture accessor, a trivially-successful stub, or unimplemented.
//! Unimplemented methods come in two tiers: the hard tier
//! panics, aborting the calling test with `"not used in mock"` or
//! `"not implemented by mock"`, while the soft tier (exec, logs,
//! control-plane pod discovery) returns [`Error::Unimplemented`] so callers
//! that tolerate errors keep running.

use crate::builder::ClientBuilder;
use crate::client::{
    ClusterClient, ExtendedClient, MemberRollController, PortForwarder, RpcCredentials,
};
use crate::error::{Error, Result};
use crate::util_factory::UtilFactory;
use crate::version::MeshInfo;
use async_trait::async_trait;
use bytes::Bytes;
use k8s_openapi::api::core::v1::Pod;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ListMeta;
use k8s_openapi::apimachinery::pkg::version::Info;
use kube::core::{DynamicObject, ObjectList, TypeMeta};
use kube::runtime::reflector::Store;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, trace};

/// Cluster client answering entirely from fixtures supplied at
/// construction time.
///
/// Build one with [`ClientBuilder`]; nothing on the client mutates the
/// fixture tables afterwards, so clones may be shared freely across test
/// tasks.
#[derive(Clone)]
pub struct FakeClient {
    /// Typed client backing `kube()`, when the test supplies one.
    pub(crate) kube: Option<kube::Client>,
    /// Proxy admin replies keyed by pod name.
    pub(crate) results: HashMap<String, Bytes>,
    /// namespace -> label selector -> pods answering that selector.
    pub(crate) discoverable_pods: Arc<HashMap<String, HashMap<String, ObjectList<Pod>>>>,
    pub(crate) revision: String,
    pub(crate) config: kube::Config,
    pub(crate) mesh_versions: MeshInfo,
}

impl Default for FakeClient {
    fn default() -> Self {
        ClientBuilder::new().build()
    }
}

fn empty_pod_list() -> ObjectList<Pod> {
    ObjectList {
        types: TypeMeta::default(),
        metadata: ListMeta::default(),
        items: Vec::new(),
    }
}

#[async_trait]
impl ClusterClient for FakeClient {
    fn config(&self) -> kube::Config {
        self.config.clone()
    }

    fn kube(&self) -> kube::Client {
        match &self.kube {
            Some(client) => client.clone(),
            None => panic!("not used in mock"),
        }
    }

    fn dynamic(&self) -> kube::Client {
        panic!("not used in mock")
    }

    fn metadata(&self) -> kube::Client {
        panic!("not used in mock")
    }

    fn ext(&self) -> kube::Client {
        panic!("not implemented by mock")
    }

    fn mesh(&self) -> kube::Client {
        panic!("not used in mock")
    }

    fn gateway_api(&self) -> kube::Client {
        panic!("not used in mock")
    }

    fn rest(&self) -> kube::Client {
        panic!("not implemented by mock")
    }

    fn kube_informers(&self) -> Store<DynamicObject> {
        panic!("not used in mock")
    }

    fn mesh_informers(&self) -> Store<DynamicObject> {
        panic!("not used in mock")
    }

    fn gateway_api_informers(&self) -> Store<DynamicObject> {
        panic!("not used in mock")
    }

    fn dynamic_informers(&self) -> Store<DynamicObject> {
        panic!("not used in mock")
    }

    fn metadata_informers(&self) -> Store<DynamicObject> {
        panic!("not used in mock")
    }

    async fn run_and_wait(&self) {
        panic!("not used in mock")
    }

    fn set_namespaces(&self, _namespaces: Vec<String>) {
        panic!("not used in mock")
    }

    fn add_member_roll(&self, _namespace: &str, _name: &str) -> Result<()> {
        panic!("not used in mock")
    }

    fn member_roll(&self) -> Arc<dyn MemberRollController> {
        panic!("not used in mock")
    }
}

#[async_trait]
impl ExtendedClient for FakeClient {
    fn revision(&self) -> String {
        self.revision.clone()
    }

    fn kubernetes_version(&self) -> Result<Info> {
        Ok(Info {
            major: "1".to_string(),
            minor: "16".to_string(),
            ..Info::default()
        })
    }

    async fn mesh_version_info(&self, _namespace: &str) -> Result<MeshInfo> {
        Ok(self.mesh_versions.clone())
    }

    async fn control_plane_pods(
        &self,
        _namespace: &str,
        _labels: &BTreeMap<String, String>,
    ) -> Result<Vec<Pod>> {
        Err(Error::Unimplemented("control-plane pod discovery"))
    }

    async fn pods_for_selector(
        &self,
        namespace: &str,
        label_selectors: &[&str],
    ) -> Result<ObjectList<Pod>> {
        let Some(for_namespace) = self.discoverable_pods.get(namespace) else {
            debug!("no pod fixtures for namespace {}", namespace);
            return Ok(empty_pod_list());
        };

        let mut all_pods = empty_pod_list();
        for (i, selector) in label_selectors.iter().enumerate() {
            let Some(matched) = for_namespace.get(*selector) else {
                // One unknown selector voids the whole query, including pods
                // already gathered for earlier selectors.
                debug!("no pod fixture for selector {} in {}", selector, namespace);
                return Ok(empty_pod_list());
            };
            if i == 0 {
                all_pods.types = matched.types.clone();
                all_pods.metadata = matched.metadata.clone();
            }
            all_pods.items.extend(matched.items.iter().cloned());
        }

        trace!(
            "resolved {} pods for {:?} in {}",
            all_pods.items.len(),
            label_selectors,
            namespace
        );
        Ok(all_pods)
    }

    async fn proxy_command(
        &self,
        pod_name: &str,
        _pod_namespace: &str,
        _method: &str,
        _path: &str,
        _body: Option<Bytes>,
    ) -> Result<Bytes> {
        match self.results.get(pod_name) {
            Some(payload) => Ok(payload.clone()),
            None => {
                debug!("no canned result for pod {}", pod_name);
                Err(Error::PodNotFound {
                    name: pod_name.to_string(),
                })
            }
        }
    }

    async fn broadcast_discovery(
        &self,
        _namespace: &str,
        _path: &str,
    ) -> Result<HashMap<String, Bytes>> {
        Ok(self.results.clone())
    }

    async fn pod_exec(
        &self,
        _pod_name: &str,
        _namespace: &str,
        _container: &str,
        _command: &str,
    ) -> Result<(String, String)> {
        Err(Error::Unimplemented("exec"))
    }

    async fn pod_logs(
        &self,
        _namespace: &str,
        _pod_name: &str,
        _container: &str,
        _previous: bool,
    ) -> Result<String> {
        Err(Error::Unimplemented("logs"))
    }

    fn new_port_forwarder(
        &self,
        _pod_name: &str,
        _namespace: &str,
        _local_address: &str,
        _local_port: u16,
        _pod_port: u16,
    ) -> Result<Box<dyn PortForwarder>> {
        Ok(Box::new(FakePortForwarder))
    }

    async fn apply_yaml_files(&self, _namespace: &str, _paths: &[&str]) -> Result<()> {
        panic!("not implemented by mock")
    }

    async fn apply_yaml_files_dry_run(&self, _namespace: &str, _paths: &[&str]) -> Result<()> {
        panic!("not implemented by mock")
    }

    async fn delete_yaml_files(&self, _namespace: &str, _paths: &[&str]) -> Result<()> {
        panic!("not implemented by mock")
    }

    async fn delete_yaml_files_dry_run(&self, _namespace: &str, _paths: &[&str]) -> Result<()> {
        panic!("not implemented by mock")
    }

    async fn create_rpc_credentials(
        &self,
        _token_namespace: &str,
        _token_service_account: &str,
        _audiences: &[String],
        _expiration_seconds: i64,
    ) -> Result<Arc<dyn RpcCredentials>> {
        panic!("not implemented by mock")
    }

    fn util_factory(&self) -> UtilFactory {
        UtilFactory::new()
    }
}

// The fake must cover the entire client contract, not only the methods it
// answers from fixtures.
const _: () = {
    const fn assert_extended_client<C: ExtendedClient>() {}
    assert_extended_client::<FakeClient>();
};

/// Port forwarder whose sessions succeed trivially and never carry traffic.
#[derive(Debug, Clone, Copy, Default)]
pub struct FakePortForwarder;

#[async_trait]
impl PortForwarder for FakePortForwarder {
    async fn start(&mut self) -> Result<()> {
        Ok(())
    }

    fn address(&self) -> String {
        "localhost:3456".to_string()
    }

    fn close(&mut self) {}

    async fn wait_for_stop(&self) {}
}
