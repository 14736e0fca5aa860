//! Consent dashboard: list, grant and revoke.
//!
//! Mutations never patch the local list; every successful grant or revoke is
//! followed by a full reload so the table always shows what the server holds.

use chrono::{DateTime, Utc};
use consentgate_core::validation::{parse_expiry, require_patient_id, validate_email};
use consentgate_core::{ConsentGrant, ConsentGrantRequest, ConsentStatus, RevokeOutcome, ScopeFilter};

use super::{Controller, StatusLine};
use crate::api::ApiClient;
use crate::error::{ApiError, Result};
use crate::session::{SessionBound, SessionEpoch};

/// Whose grants the dashboard shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsentSource {
    /// The signed-in patient's own record
    Mine,
    /// A patient by public identifier (guardian view)
    Patient(String),
}

/// One table row, derived at render time
#[derive(Debug, Clone, PartialEq)]
pub struct ConsentRow {
    pub id: String,
    pub grantee_email: String,
    pub scope: ScopeFilter,
    pub expires_at: DateTime<Utc>,
    pub created_at: Option<DateTime<Utc>>,
    pub status: ConsentStatus,
}

#[derive(Debug)]
pub struct ConsentWorkflow {
    api: ApiClient,
    source: ConsentSource,
    status: StatusLine,
    epoch: SessionEpoch,
    grants: Vec<ConsentGrant>,
}

impl ConsentWorkflow {
    pub fn new(api: ApiClient, source: ConsentSource) -> Self {
        Self {
            epoch: SessionEpoch::new(api.session()),
            api,
            source,
            status: StatusLine::default(),
            grants: Vec::new(),
        }
    }

    pub fn source(&self) -> &ConsentSource {
        &self.source
    }

    /// Switch to another patient; the current list is dropped
    pub fn set_source(&mut self, source: ConsentSource) {
        if self.source != source {
            self.source = source;
            self.grants.clear();
            self.status.clear();
        }
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn grants(&self) -> &[ConsentGrant] {
        if self.epoch.is_current() {
            &self.grants
        } else {
            &[]
        }
    }

    pub fn rows(&self, now: DateTime<Utc>) -> Vec<ConsentRow> {
        self.grants()
            .iter()
            .map(|grant| ConsentRow {
                id: grant.id.clone(),
                grantee_email: grant.grantee_email.clone(),
                scope: grant.scope,
                expires_at: grant.expires_at,
                created_at: grant.created_at,
                status: grant.status_at(now),
            })
            .collect()
    }

    pub async fn load(&mut self) -> Result<usize> {
        let source = self.settle(checked_source(&self.source))?;
        self.begin()?;
        let result = self.fetch(&source).await;
        let count = self.settle(result)?;
        self.status.finish(None);
        Ok(count)
    }

    /// Grant `grantee_email` access to `scope` on the selected patient until `expiry`
    pub async fn grant(
        &mut self,
        grantee_email: &str,
        scope: ScopeFilter,
        expiry: &str,
        now: DateTime<Utc>,
    ) -> Result<ConsentGrant> {
        let prepared = self.settle(prepare_grant(&self.source, grantee_email, scope, expiry, now))?;
        let (patient_id, request) = prepared;
        self.begin()?;

        let result = self.api.grant_consent(&patient_id, &request).await;
        let grant = self.settle(result)?;
        tracing::info!(consent_id = %grant.id, scope = %grant.scope, "Consent granted");

        let reload = self.fetch(&ConsentSource::Patient(patient_id)).await;
        self.settle(reload)?;
        self.status
            .finish(Some(format!("Consent granted to {}", grant.grantee_email)));
        Ok(grant)
    }

    /// Revoke a grant. Revoking twice is reported, not raised.
    pub async fn revoke(&mut self, consent_id: &str) -> Result<RevokeOutcome> {
        let consent_id = consent_id.trim().to_string();
        if consent_id.is_empty() {
            return Err(self.fail(ApiError::validation("Consent ID required")));
        }
        let source = self.settle(checked_source(&self.source))?;
        self.begin()?;

        let result = self.api.revoke_consent(&consent_id).await;
        let outcome = self.settle(result)?;

        let reload = self.fetch(&source).await;
        self.settle(reload)?;

        let message = if outcome.already_revoked() {
            "Consent was already revoked"
        } else {
            "Consent revoked"
        };
        tracing::info!(consent_id = %consent_id, already = outcome.already_revoked(), "{}", message);
        self.status.finish(Some(message.to_string()));
        Ok(outcome)
    }

    async fn fetch(&mut self, source: &ConsentSource) -> Result<usize> {
        let grants = match source {
            ConsentSource::Mine => self.api.get_my_consents().await?,
            ConsentSource::Patient(id) => self.api.get_consents_for_patient(id).await?,
        };
        self.grants = grants;
        Ok(self.grants.len())
    }
}

fn checked_source(source: &ConsentSource) -> Result<ConsentSource> {
    Ok(match source {
        ConsentSource::Mine => ConsentSource::Mine,
        ConsentSource::Patient(id) => ConsentSource::Patient(require_patient_id(id)?),
    })
}

fn prepare_grant(
    source: &ConsentSource,
    grantee_email: &str,
    scope: ScopeFilter,
    expiry: &str,
    now: DateTime<Utc>,
) -> Result<(String, ConsentGrantRequest)> {
    let patient_id = match source {
        ConsentSource::Patient(id) => require_patient_id(id)?,
        ConsentSource::Mine => return Err(ApiError::validation("Patient ID required")),
    };
    let email = validate_email(grantee_email)?;
    let expires_at = parse_expiry(expiry, now)?;
    Ok((patient_id, ConsentGrantRequest::new(email, scope, expires_at)))
}

impl SessionBound for ConsentWorkflow {
    fn reset_session_state(&mut self) {
        self.grants.clear();
    }
}

impl Controller for ConsentWorkflow {
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
