use consentgate_core::{
    CatalogEntryCreated, CatalogWizard, HospitalSelection, MyPointerRequest, RecordPointer, Scope,
    Vocabulary,
};

use super::{Controller, StatusLine};
use crate::api::ApiClient;
use crate::error::{ApiError, Result};
use crate::session::{SessionBound, SessionEpoch};

/// Patient-side record creation: the catalog wizard, or linking a resource
/// that already exists on the patient's FHIR server.
#[derive(Debug)]
pub struct CatalogWorkflow {
    api: ApiClient,
    status: StatusLine,
    epoch: SessionEpoch,
    wizard: CatalogWizard,
    last_created: Option<CatalogEntryCreated>,
}

impl CatalogWorkflow {
    pub fn new(api: ApiClient, vocabulary: Vocabulary, scope: Scope) -> Self {
        Self {
            epoch: SessionEpoch::new(api.session()),
            api,
            status: StatusLine::default(),
            wizard: CatalogWizard::new(vocabulary, scope),
            last_created: None,
        }
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn wizard(&self) -> &CatalogWizard {
        &self.wizard
    }

    pub fn wizard_mut(&mut self) -> &mut CatalogWizard {
        &mut self.wizard
    }

    pub fn last_created(&self) -> Option<&CatalogEntryCreated> {
        self.last_created.as_ref().filter(|_| self.epoch.is_current())
    }

    /// Offer the patient's selected hospital as the source of step 3
    pub fn use_hospital(&mut self, selection: Option<&HospitalSelection>) {
        self.wizard
            .set_hospital(selection.map(|h| h.name.clone()).filter(|n| !n.trim().is_empty()));
    }

    pub async fn submit(&mut self) -> Result<CatalogEntryCreated> {
        let Some(entry) = self.wizard.submission() else {
            return Err(self.fail(ApiError::validation(
                "Complete every step before submitting",
            )));
        };
        self.begin()?;

        let result = self.api.create_from_catalog(&entry).await;
        let created = self.settle(result)?;
        tracing::info!(
            resource_type = %created.resource_type,
            resource_id = %created.resource_id,
            "Catalog entry created"
        );
        self.status.finish(Some(format!(
            "Created {}/{}",
            created.resource_type, created.resource_id
        )));
        self.wizard.reset();
        self.last_created = Some(created.clone());
        Ok(created)
    }

    /// Link an existing resource by identifier
    pub async fn link_existing(
        &mut self,
        scope: Scope,
        resource_id: &str,
        issuer: Option<&str>,
    ) -> Result<RecordPointer> {
        let resource_id = resource_id.trim();
        if resource_id.is_empty() {
            return Err(self.fail(ApiError::validation("Resource ID required")));
        }
        let request = MyPointerRequest {
            scope,
            fhir_resource_id: resource_id.to_string(),
            issuer: issuer
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        };
        self.begin()?;

        let result = self.api.add_my_pointer(&request).await;
        let pointer = self.settle(result)?;
        self.status.finish(Some(format!(
            "Linked {}/{}",
            pointer.resource.resource_type, resource_id
        )));
        Ok(pointer)
    }
}

impl SessionBound for CatalogWorkflow {
    fn reset_session_state(&mut self) {
        self.wizard.reset();
        self.wizard.set_hospital(None);
        self.last_created = None;
    }
}

impl Controller for CatalogWorkflow {
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
