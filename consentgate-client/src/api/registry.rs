use consentgate_core::{
    HospitalSearch, HospitalSelection, ProviderSearch, ProviderSelection, RegistryPage,
};

use super::{query_string, ApiClient};
use crate::error::Result;
use crate::http::RequestOptions;

impl ApiClient {
    /// `GET /cms/hospitals`: read-through query against the national registry.
    /// Filters are checked locally first; a rejected search never reaches the network.
    pub async fn search_hospitals_cms(
        &self,
        search: &HospitalSearch,
    ) -> Result<RegistryPage<HospitalSelection>> {
        search.validate()?;
        let path = format!("/cms/hospitals{}", query_string(&search.query_pairs()));
        self.http
            .request(&path, RequestOptions::get(), self.registry_auth)
            .await
    }

    /// `GET /cms/providers`
    pub async fn search_providers_cms(
        &self,
        search: &ProviderSearch,
    ) -> Result<RegistryPage<ProviderSelection>> {
        search.validate()?;
        let path = format!("/cms/providers{}", query_string(&search.query_pairs()));
        self.http
            .request(&path, RequestOptions::get(), self.registry_auth)
            .await
    }
}
