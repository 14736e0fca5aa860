use consentgate_core::{
    CatalogCreate, CatalogEntryCreated, MyPointerRequest, RecordPointer, RecordsPage, ScopeFilter,
};

use super::{query_string, segment, ApiClient};
use crate::error::Result;
use crate::http::RequestOptions;

impl ApiClient {
    /// `GET /patients/{id}/records?scope=`. Needs an active grant covering `scope`;
    /// without one the backend answers 403.
    pub async fn get_records(&self, patient_id: &str, scope: ScopeFilter) -> Result<RecordsPage> {
        let path = format!(
            "/patients/{}/records{}",
            segment(patient_id),
            query_string(&[("scope", scope.as_str().to_string())])
        );
        self.http.request(&path, RequestOptions::get(), true).await
    }

    /// `GET /me/records?scope=`
    pub async fn get_my_records(&self, scope: ScopeFilter) -> Result<RecordsPage> {
        let path = format!(
            "/me/records{}",
            query_string(&[("scope", scope.as_str().to_string())])
        );
        self.http.request(&path, RequestOptions::get(), true).await
    }

    /// `POST /me/pointers`
    pub async fn add_my_pointer(&self, pointer: &MyPointerRequest) -> Result<RecordPointer> {
        self.http
            .request("/me/pointers", RequestOptions::post(pointer)?, true)
            .await
    }

    /// `POST /me/catalog`: the server synthesizes a resource and links it
    pub async fn create_from_catalog(&self, entry: &CatalogCreate) -> Result<CatalogEntryCreated> {
        self.http
            .request("/me/catalog", RequestOptions::post(entry)?, true)
            .await
    }
}
