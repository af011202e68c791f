//! Builder for assembling fake clients from fixtures

use crate::error::{Error, Result};
use crate::fake::FakeClient;
use crate::version::MeshInfo;
use bytes::Bytes;
use k8s_openapi::api::core::v1::Pod;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ListMeta, Time};
use kube::core::{ObjectList, TypeMeta};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Builder for creating fake clients
///
/// Provides a fluent API for populating every fixture table the fake
/// answers from: canned proxy replies, discoverable pods, and the scalar
/// revision/config/version values.
///
/// # Example
///
/// ```rust
/// use mesh_fake_client::ClientBuilder;
/// use k8s_openapi::api::core::v1::Pod;
///
/// let mut pod = Pod::default();
/// pod.metadata.name = Some("discovery-7fd8".to_string());
///
/// let client = ClientBuilder::new()
///     .with_pods("mesh-system", "app=discovery", vec![pod])
///     .with_result("discovery-7fd8", "SYNCED")
///     .with_revision("canary")
///     .build();
/// ```
pub struct ClientBuilder {
    kube: Option<kube::Client>,
    results: HashMap<String, Bytes>,
    pods: HashMap<String, HashMap<String, ObjectList<Pod>>>,
    revision: String,
    config: Option<kube::Config>,
    mesh_versions: MeshInfo,
    fixture_dir: Option<PathBuf>,
}

impl ClientBuilder {
    /// Create a new client builder
    pub fn new() -> Self {
        Self {
            kube: None,
            results: HashMap::new(),
            pods: HashMap::new(),
            revision: String::new(),
            config: None,
            mesh_versions: MeshInfo::default(),
            fixture_dir: None,
        }
    }

    /// Set the canned reply a proxy command on the named pod returns.
    pub fn with_result(mut self, pod_name: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        self.results.insert(pod_name.into(), payload.into());
        self
    }

    /// Add a batch of canned replies keyed by pod name.
    pub fn with_results(mut self, results: HashMap<String, Bytes>) -> Self {
        self.results.extend(results);
        self
    }

    /// Register pods answering a label selector in a namespace.
    ///
    /// The pods are wrapped in a `PodList` envelope with default list
    /// metadata. Use [`ClientBuilder::with_pod_list`] to control the
    /// envelope too.
    pub fn with_pods(
        self,
        namespace: impl Into<String>,
        selector: impl Into<String>,
        pods: Vec<Pod>,
    ) -> Self {
        let list = ObjectList {
            types: TypeMeta {
                api_version: "v1".to_string(),
                kind: "PodList".to_string(),
            },
            metadata: ListMeta::default(),
            items: pods,
        };
        self.with_pod_list(namespace, selector, list)
    }

    /// Register a full pod list, envelope included, for a selector in a
    /// namespace.
    pub fn with_pod_list(
        mut self,
        namespace: impl Into<String>,
        selector: impl Into<String>,
        list: ObjectList<Pod>,
    ) -> Self {
        self.pods
            .entry(namespace.into())
            .or_default()
            .insert(selector.into(), list);
        self
    }

    /// Set the control-plane revision reported by the client.
    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = revision.into();
        self
    }

    /// Set the connection configuration reported by the client.
    ///
    /// Defaults to a loopback configuration when not supplied.
    pub fn with_config(mut self, config: kube::Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the per-component version report returned by the client.
    pub fn with_mesh_versions(mut self, versions: MeshInfo) -> Self {
        self.mesh_versions = versions;
        self
    }

    /// Supply a typed client returned verbatim by the fake's typed-client
    /// accessor. Without one, that accessor is unimplemented.
    pub fn with_kube(mut self, client: kube::Client) -> Self {
        self.kube = Some(client);
        self
    }

    /// Set the base directory for `load_pod_fixture` calls.
    pub fn with_fixture_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fixture_dir = Some(dir.into());
        self
    }

    /// Load pods for a selector from a YAML fixture file.
    ///
    /// Supports both single-document and multi-document files (separated by
    /// `---`). Documents missing `metadata.namespace` inherit the given
    /// namespace, and a creation timestamp is filled in when absent.
    ///
    /// If a fixture directory was set with `with_fixture_dir`, the path is
    /// relative to that directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a document does not
    /// parse as a pod.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use mesh_fake_client::ClientBuilder;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = ClientBuilder::new()
    ///     .with_fixture_dir("fixtures")
    ///     .load_pod_fixture("mesh-system", "app=discovery", "discovery-pods.yaml")?
    ///     .build();
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_pod_fixture(
        self,
        namespace: &str,
        selector: &str,
        path: impl AsRef<Path>,
    ) -> Result<Self> {
        let fixture_path = match &self.fixture_dir {
            Some(dir) => dir.join(path),
            None => path.as_ref().to_path_buf(),
        };

        let content = std::fs::read_to_string(&fixture_path).map_err(|e| {
            Error::Fixture(format!(
                "failed to read fixture file {:?}: {}",
                fixture_path, e
            ))
        })?;

        let mut pods = Vec::new();
        for document in serde_yaml::Deserializer::from_str(&content) {
            let mut pod = Pod::deserialize(document).map_err(|e| {
                Error::Fixture(format!("failed to parse YAML in {:?}: {}", fixture_path, e))
            })?;

            if pod.metadata.namespace.is_none() {
                pod.metadata.namespace = Some(namespace.to_string());
            }
            if pod.metadata.creation_timestamp.is_none() {
                pod.metadata.creation_timestamp = Some(Time(chrono::Utc::now()));
            }

            pods.push(pod);
        }

        Ok(self.with_pods(namespace, selector, pods))
    }

    /// Assemble the fake client. Fixture tables are frozen from here on.
    pub fn build(self) -> FakeClient {
        FakeClient {
            kube: self.kube,
            results: self.results,
            discoverable_pods: Arc::new(self.pods),
            revision: self.revision,
            config: self.config.unwrap_or_else(default_config),
            mesh_versions: self.mesh_versions,
        }
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn default_config() -> kube::Config {
    kube::Config::new(http::Uri::from_static("http://localhost:8080"))
}
