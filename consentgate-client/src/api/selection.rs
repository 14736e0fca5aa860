use consentgate_core::{HospitalSelection, ProviderSelection};
use serde::de::IgnoredAny;

use super::ApiClient;
use crate::error::Result;
use crate::http::RequestOptions;

const HOSPITAL_SELECTION: &str = "/me/hospital-selection";
const PROVIDER_SELECTION: &str = "/me/provider-selection";

impl ApiClient {
    /// `GET /me/hospital-selection`; `None` when nothing is selected
    pub async fn get_my_hospital_selection(&self) -> Result<Option<HospitalSelection>> {
        self.http
            .request(HOSPITAL_SELECTION, RequestOptions::get(), true)
            .await
    }

    /// `PUT /me/hospital-selection`
    pub async fn set_my_hospital_selection(
        &self,
        selection: &HospitalSelection,
    ) -> Result<HospitalSelection> {
        self.http
            .request(HOSPITAL_SELECTION, RequestOptions::put(selection)?, true)
            .await
    }

    /// `GET /me/provider-selection`
    pub async fn get_my_provider_selection(&self) -> Result<Option<ProviderSelection>> {
        self.http
            .request(PROVIDER_SELECTION, RequestOptions::get(), true)
            .await
    }

    /// `PUT /me/provider-selection`
    pub async fn set_my_provider_selection(
        &self,
        selection: &ProviderSelection,
    ) -> Result<ProviderSelection> {
        self.http
            .request(PROVIDER_SELECTION, RequestOptions::put(selection)?, true)
            .await
    }

    /// `DELETE /me/provider-selection`; any response body is ignored
    pub async fn clear_my_provider_selection(&self) -> Result<()> {
        let _: IgnoredAny = self
            .http
            .request(PROVIDER_SELECTION, RequestOptions::delete(), true)
            .await?;
        Ok(())
    }
}
