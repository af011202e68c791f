#[cfg(test)]
mod tests {
    use crate::builder::ClientBuilder;
    use crate::client::{ClusterClient, ExtendedClient};
    use crate::Error;
    use k8s_openapi::api::core::v1::Pod;

    #[tokio::test]
    async fn defaults_are_empty_fixtures() {
        let client = ClientBuilder::new().build();

        assert_eq!(client.revision(), "");
        assert!(client
            .broadcast_discovery("mesh-system", "/path")
            .await
            .unwrap()
            .is_empty());
        assert!(client
            .mesh_version_info("mesh-system")
            .await
            .unwrap()
            .0
            .is_empty());

        let url = client.config().cluster_url;
        assert_eq!(url.host(), Some("localhost"));
        assert_eq!(url.port_u16(), Some(8080));
    }

    #[tokio::test]
    async fn with_pods_wraps_items_in_a_pod_list() {
        let mut pod = Pod::default();
        pod.metadata.name = Some("discovery-1".to_string());

        let client = ClientBuilder::new()
            .with_pods("mesh-system", "app=discovery", vec![pod])
            .build();

        let pods = client
            .pods_for_selector("mesh-system", &["app=discovery"])
            .await
            .unwrap();
        assert_eq!(pods.types.kind, "PodList");
        assert_eq!(pods.types.api_version, "v1");
        assert_eq!(pods.items.len(), 1);
    }

    #[tokio::test]
    async fn load_pod_fixture_parses_multi_document_yaml() {
        let dir = std::env::temp_dir().join(format!("mesh-fake-client-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("discovery-pods.yaml");
        std::fs::write(
            &path,
            concat!(
                "apiVersion: v1\n",
                "kind: Pod\n",
                "metadata:\n",
                "  name: discovery-1\n",
                "---\n",
                "apiVersion: v1\n",
                "kind: Pod\n",
                "metadata:\n",
                "  name: discovery-2\n",
                "  namespace: elsewhere\n",
            ),
        )
        .unwrap();

        let client = ClientBuilder::new()
            .with_fixture_dir(&dir)
            .load_pod_fixture("mesh-system", "app=discovery", "discovery-pods.yaml")
            .unwrap()
            .build();

        let pods = client
            .pods_for_selector("mesh-system", &["app=discovery"])
            .await
            .unwrap();
        assert_eq!(pods.items.len(), 2);

        // Namespace defaulting applies only where the document omitted it.
        assert_eq!(
            pods.items[0].metadata.namespace.as_deref(),
            Some("mesh-system")
        );
        assert_eq!(
            pods.items[1].metadata.namespace.as_deref(),
            Some("elsewhere")
        );
        assert!(pods.items[0].metadata.creation_timestamp.is_some());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn load_pod_fixture_reports_missing_files() {
        let result = ClientBuilder::new().load_pod_fixture(
            "mesh-system",
            "app=discovery",
            "does-not-exist.yaml",
        );

        assert!(matches!(result, Err(Error::Fixture(_))));
    }
}
