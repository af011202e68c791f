#[cfg(test)]
mod tests {
    use crate::client::ExtendedClient;
    use crate::fake::FakeClient;
    use crate::util_factory::UtilFactory;
    use k8s_openapi::api::core::v1::ConfigMap;
    use kube::Api;

    #[tokio::test]
    async fn canned_response_answers_any_retrieval() {
        let factory = FakeClient::default().util_factory();
        let api: Api<ConfigMap> = Api::namespaced(factory.client(), "default");

        let object = api.get("anything").await.unwrap();
        assert_eq!(object.metadata.name.as_deref(), Some("foo"));
    }

    #[tokio::test]
    async fn canned_response_is_independent_of_the_request() {
        let factory = UtilFactory::new();
        let api: Api<ConfigMap> = Api::namespaced(factory.client(), "other");

        let first = api.get("a").await.unwrap();
        let second = api.get("b").await.unwrap();
        assert_eq!(first.metadata.name, second.metadata.name);
    }
}
