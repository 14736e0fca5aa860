use consentgate_core::{ConsentGrant, ConsentGrantRequest, RevokeOutcome};

use super::{segment, ApiClient};
use crate::error::Result;
use crate::http::RequestOptions;

impl ApiClient {
    /// `POST /patients/{id}/consents`
    pub async fn grant_consent(
        &self,
        patient_id: &str,
        request: &ConsentGrantRequest,
    ) -> Result<ConsentGrant> {
        let path = format!("/patients/{}/consents", segment(patient_id));
        self.http
            .request(&path, RequestOptions::post(request)?, true)
            .await
    }

    /// `GET /patients/{id}/consents`
    pub async fn get_consents_for_patient(&self, patient_id: &str) -> Result<Vec<ConsentGrant>> {
        let path = format!("/patients/{}/consents", segment(patient_id));
        self.http.request(&path, RequestOptions::get(), true).await
    }

    /// `GET /me/consents`: grants on the calling patient's own record
    pub async fn get_my_consents(&self) -> Result<Vec<ConsentGrant>> {
        self.http
            .request("/me/consents", RequestOptions::get(), true)
            .await
    }

    /// `POST /consents/{id}/revoke`. A second revoke reports `already_revoked`.
    pub async fn revoke_consent(&self, consent_id: &str) -> Result<RevokeOutcome> {
        let path = format!("/consents/{}/revoke", segment(consent_id));
        self.http
            .request(&path, RequestOptions::post_empty(), true)
            .await
    }
}
