use consentgate_core::validation::require_patient_id;
use consentgate_core::{RecordPointer, RecordSnapshot, RecordsPage, Scope, ScopeFilter};

use super::{Controller, StatusLine};
use crate::api::ApiClient;
use crate::error::Result;
use crate::session::{SessionBound, SessionEpoch};

/// Whose records are read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSource {
    /// Patient dashboard
    Mine,
    /// Doctor dashboard; needs an active grant from the patient
    Patient(String),
}

/// Record viewer shared by the patient and doctor dashboards.
///
/// A doctor without a covering grant gets the backend's 403 as an error,
/// never an empty list.
#[derive(Debug)]
pub struct RecordsWorkflow {
    api: ApiClient,
    source: RecordSource,
    status: StatusLine,
    epoch: SessionEpoch,
    page: Option<RecordsPage>,
    snapshot: Option<RecordSnapshot>,
}

impl RecordsWorkflow {
    pub fn new(api: ApiClient, source: RecordSource) -> Self {
        Self {
            epoch: SessionEpoch::new(api.session()),
            api,
            source,
            status: StatusLine::default(),
            page: None,
            snapshot: None,
        }
    }

    pub fn source(&self) -> &RecordSource {
        &self.source
    }

    pub fn set_source(&mut self, source: RecordSource) {
        if self.source != source {
            self.source = source;
            self.reset_session_state();
            self.status.clear();
        }
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn page(&self) -> Option<&RecordsPage> {
        self.page.as_ref().filter(|_| self.epoch.is_current())
    }

    pub fn records(&self) -> &[RecordPointer] {
        self.page().map(|p| p.records.as_slice()).unwrap_or(&[])
    }

    pub fn snapshot(&self) -> Option<&RecordSnapshot> {
        self.snapshot.as_ref().filter(|_| self.epoch.is_current())
    }

    /// Load one scope (or every scope with [`ScopeFilter::All`])
    pub async fn fetch(&mut self, scope: ScopeFilter) -> Result<&RecordsPage> {
        let source = self.settle(checked_source(&self.source))?;
        self.begin()?;
        let result = query(&self.api, &source, scope).await;
        let page = self.settle(result)?;
        tracing::debug!(scope = %scope, count = page.records.len(), "Records loaded");
        self.status.finish(None);
        Ok(self.page.insert(page))
    }

    /// Query the three scopes concurrently and wait for all of them.
    ///
    /// Nothing is stored unless every query succeeds.
    pub async fn fetch_snapshot(&mut self) -> Result<&RecordSnapshot> {
        let source = self.settle(checked_source(&self.source))?;
        self.begin()?;

        let (immunizations, allergies, conditions) = tokio::join!(
            query(&self.api, &source, Scope::Immunizations.into()),
            query(&self.api, &source, Scope::Allergies.into()),
            query(&self.api, &source, Scope::Conditions.into()),
        );
        let result = immunizations.and_then(|imm| {
            Ok(RecordSnapshot {
                immunizations: imm.records,
                allergies: allergies?.records,
                conditions: conditions?.records,
            })
        });

        let snapshot = self.settle(result)?;
        tracing::debug!(total = snapshot.total(), "Record snapshot loaded");
        self.status.finish(None);
        Ok(self.snapshot.insert(snapshot))
    }
}

async fn query(api: &ApiClient, source: &RecordSource, scope: ScopeFilter) -> Result<RecordsPage> {
    match source {
        RecordSource::Mine => api.get_my_records(scope).await,
        RecordSource::Patient(id) => api.get_records(id, scope).await,
    }
}

fn checked_source(source: &RecordSource) -> Result<RecordSource> {
    Ok(match source {
        RecordSource::Mine => RecordSource::Mine,
        RecordSource::Patient(id) => RecordSource::Patient(require_patient_id(id)?),
    })
}

impl SessionBound for RecordsWorkflow {
    fn reset_session_state(&mut self) {
        self.page = None;
        self.snapshot = None;
    }
}

impl Controller for RecordsWorkflow {
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
