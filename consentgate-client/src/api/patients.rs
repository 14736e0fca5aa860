use consentgate_core::{PatientIdentity, PointerRequest, RecordPointer, SelfRegisterRequest};

use super::{segment, ApiClient};
use crate::error::Result;
use crate::http::RequestOptions;

impl ApiClient {
    /// `POST /patients`: new patient owned by the calling guardian
    pub async fn create_patient(&self) -> Result<PatientIdentity> {
        self.http
            .request("/patients", RequestOptions::post_empty(), true)
            .await
    }

    /// `POST /patients/{id}/pointers`: link an existing external resource
    pub async fn add_pointer(
        &self,
        patient_id: &str,
        pointer: &PointerRequest,
    ) -> Result<RecordPointer> {
        let path = format!("/patients/{}/pointers", segment(patient_id));
        self.http
            .request(&path, RequestOptions::post(pointer)?, true)
            .await
    }

    /// `POST /me/patient`: a patient account registers its own record
    pub async fn self_register_patient(&self, dob: &str) -> Result<PatientIdentity> {
        let payload = SelfRegisterRequest {
            dob: dob.to_string(),
        };
        self.http
            .request("/me/patient", RequestOptions::post(&payload)?, true)
            .await
    }
}
