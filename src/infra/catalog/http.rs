//! Catalog source backed by the content backend's list endpoints.

use std::time::Duration;

use async_trait::async_trait;
use metrics::counter;
use reelboard_api_types::{JsonRow, ListEnvelope};
use reqwest::{Client, Url};
use tracing::{debug, warn};

use crate::{
    application::catalog::{CatalogError, CatalogSource, ListRequest},
    domain::resources::Resource,
    infra::{
        error::InfraError,
        telemetry::{METRIC_CATALOG_ERROR_TOTAL, METRIC_CATALOG_REQUEST_TOTAL},
    },
};

#[derive(Clone, Debug)]
pub struct HttpCatalog {
    client: Client,
    base: Url,
}

impl HttpCatalog {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, InfraError> {
        let mut base = Url::parse(base_url).map_err(|source| InfraError::CatalogUrl {
            url: base_url.to_string(),
            source,
        })?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(timeout)
            .build()
            .map_err(InfraError::CatalogClient)?;

        Ok(Self { client, base })
    }

    pub fn user_agent() -> &'static str {
        concat!("reelboard/", env!("CARGO_PKG_VERSION"))
    }

    /// Endpoint for `resource` with the request encoded as its query string.
    pub fn list_url(&self, resource: Resource, request: &ListRequest) -> Result<Url, CatalogError> {
        let mut url = self
            .base
            .join(resource.slug())
            .map_err(|err| CatalogError::transport(err.to_string()))?;
        url.set_query(Some(&request.to_params().to_query_string()));
        Ok(url)
    }

    async fn fetch(
        &self,
        resource: Resource,
        request: &ListRequest,
    ) -> Result<ListEnvelope<JsonRow>, CatalogError> {
        let url = self.list_url(resource, request)?;
        debug!(target = "reelboard::catalog::http", url = %url, "requesting list page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| CatalogError::transport(err.to_string()))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| CatalogError::transport(err.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ListEnvelope<JsonRow>>(&bytes)
                .ok()
                .and_then(|envelope| envelope.message)
                .unwrap_or_else(|| format!("status {status}"));
            return Err(CatalogError::upstream(message));
        }

        serde_json::from_slice(&bytes).map_err(|err| CatalogError::decode(err.to_string()))
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn list(
        &self,
        resource: Resource,
        request: &ListRequest,
    ) -> Result<ListEnvelope<JsonRow>, CatalogError> {
        counter!(METRIC_CATALOG_REQUEST_TOTAL, "resource" => resource.slug(), "source" => "http")
            .increment(1);

        let result = self.fetch(resource, request).await;
        if let Err(err) = &result {
            counter!(METRIC_CATALOG_ERROR_TOTAL, "resource" => resource.slug(), "kind" => err.as_label())
                .increment(1);
            warn!(
                target = "reelboard::catalog::http",
                resource = resource.slug(),
                error = %err,
                "catalog request failed"
            );
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::QueryParams;

    #[test]
    fn list_url_appends_collection_and_query() {
        let catalog =
            HttpCatalog::new("https://api.example.mn/v1", Duration::from_secs(5)).expect("client");
        let request = ListRequest::from_query(&QueryParams::parse(
            "page=2&filters=name%3Dfoo&filters.type=series",
        ));
        let url = catalog
            .list_url(Resource::Categories, &request)
            .expect("url");

        assert_eq!(url.path(), "/v1/categories");
        assert_eq!(
            url.query(),
            Some("page=2&page_size=30&filters=name%3Dfoo&filters.type=series")
        );
    }

    #[test]
    fn invalid_base_url_is_a_configuration_error() {
        let error = HttpCatalog::new("not a url", Duration::from_secs(5)).unwrap_err();
        assert!(matches!(error, InfraError::CatalogUrl { .. }));
    }
}
