use consentgate_core::validation::require_patient_id;
use consentgate_core::{PatientIdentity, PointerRequest, RecordPointer};

use super::{Controller, StatusLine};
use crate::api::ApiClient;
use crate::error::{ApiError, Result};
use crate::session::{SessionBound, SessionEpoch};

/// Guardian dashboard: patients created in this session and their pointers
#[derive(Debug)]
pub struct GuardianWorkflow {
    api: ApiClient,
    status: StatusLine,
    epoch: SessionEpoch,
    patients: Vec<PatientIdentity>,
}

impl GuardianWorkflow {
    pub fn new(api: ApiClient) -> Self {
        Self {
            epoch: SessionEpoch::new(api.session()),
            api,
            status: StatusLine::default(),
            patients: Vec::new(),
        }
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn patients(&self) -> &[PatientIdentity] {
        if self.epoch.is_current() {
            &self.patients
        } else {
            &[]
        }
    }

    pub async fn create_patient(&mut self) -> Result<PatientIdentity> {
        self.begin()?;
        let result = self.api.create_patient().await;
        let patient = self.settle(result)?;
        tracing::info!(public_id = %patient.public_id, "Patient created");
        self.status
            .finish(Some(format!("Created patient {}", patient.public_id)));
        self.patients.push(patient.clone());
        Ok(patient)
    }

    pub async fn add_pointer(
        &mut self,
        patient_id: &str,
        pointer: PointerRequest,
    ) -> Result<RecordPointer> {
        let patient_id = self.settle(require_patient_id(patient_id).map_err(ApiError::from))?;
        if pointer.fhir_resource_id.trim().is_empty() {
            return Err(self.fail(ApiError::validation("Resource ID required")));
        }
        self.begin()?;

        let result = self.api.add_pointer(&patient_id, &pointer).await;
        let created = self.settle(result)?;
        self.status.finish(Some(format!(
            "Linked {}/{} to {}",
            pointer.fhir_resource_type, pointer.fhir_resource_id, patient_id
        )));
        Ok(created)
    }
}

impl SessionBound for GuardianWorkflow {
    fn reset_session_state(&mut self) {
        self.patients.clear();
    }
}

impl Controller for GuardianWorkflow {
    fn api(&self) -> &ApiClient {
        &self.api
    }

    fn status_mut(&mut self) -> &mut StatusLine {
        &mut self.status
    }

    fn epoch_mut(&mut self) -> &mut SessionEpoch {
        &mut self.epoch
    }
}
