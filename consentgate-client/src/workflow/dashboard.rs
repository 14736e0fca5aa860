//! Per-role dashboard configuration.
//!
//! The patient, guardian, doctor and clinic dashboards share the same
//! controllers; what differs is carried here as data.

use consentgate_core::{Role, Scope, Vocabulary};

use super::{ConsentSource, RecordSource};

/// How a dashboard reaches clinical records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordAccess {
    None,
    /// The signed-in patient's own record
    Own,
    /// Any patient by public identifier, subject to consent
    ByPatientId,
}

/// Which consent list a dashboard shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentAccess {
    None,
    Own,
    ByPatientId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub role: Role,
    pub scopes: &'static [Scope],
    pub records: RecordAccess,
    pub consents: ConsentAccess,
    pub can_grant: bool,
    pub can_revoke: bool,
    pub can_create_patients: bool,
    /// Catalog wizard and pointer linking
    pub catalog: Option<Vocabulary>,
    /// Hospital/provider selection and registry search
    pub selections: bool,
}

impl DashboardConfig {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Patient => Self {
                role,
                scopes: &Scope::ALL,
                records: RecordAccess::Own,
                consents: ConsentAccess::Own,
                can_grant: false,
                can_revoke: true,
                can_create_patients: false,
                catalog: Some(Vocabulary::STANDARD),
                selections: true,
            },
            Role::Guardian => Self {
                role,
                scopes: &Scope::ALL,
                records: RecordAccess::None,
                consents: ConsentAccess::ByPatientId,
                can_grant: true,
                can_revoke: true,
                can_create_patients: true,
                catalog: None,
                selections: false,
            },
            Role::Doctor => Self {
                role,
                scopes: &Scope::ALL,
                records: RecordAccess::ByPatientId,
                consents: ConsentAccess::None,
                can_grant: false,
                can_revoke: false,
                can_create_patients: false,
                catalog: None,
                selections: false,
            },
            Role::ClinicAdmin => Self {
                role,
                scopes: &[],
                records: RecordAccess::None,
                consents: ConsentAccess::None,
                can_grant: false,
                can_revoke: false,
                can_create_patients: false,
                catalog: None,
                selections: true,
            },
        }
    }

    /// Record source for this dashboard, `None` when it shows no records
    pub fn record_source(&self, patient_id: Option<&str>) -> Option<RecordSource> {
        match self.records {
            RecordAccess::None => None,
            RecordAccess::Own => Some(RecordSource::Mine),
            RecordAccess::ByPatientId => Some(RecordSource::Patient(
                patient_id.unwrap_or_default().to_string(),
            )),
        }
    }

    pub fn consent_source(&self, patient_id: Option<&str>) -> Option<ConsentSource> {
        match self.consents {
            ConsentAccess::None => None,
            ConsentAccess::Own => Some(ConsentSource::Mine),
            ConsentAccess::ByPatientId => Some(ConsentSource::Patient(
                patient_id.unwrap_or_default().to_string(),
            )),
        }
    }
}
