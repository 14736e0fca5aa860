use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::scope::{Scope, ScopeFilter};
use crate::wire::{id_string, opt_id_string};

/// Time-bound, scope-bound access grant as returned by the backend.
///
/// `revoked` only ever moves from false to true. Expiry is not stored; it is
/// derived from `expires_at` at the moment of evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConsentGrant {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub patient_public_id: Option<String>,
    pub grantee_email: String,
    pub scope: ScopeFilter,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub revoked: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentStatus {
    Active,
    Expired,
    Revoked,
}

impl ConsentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ConsentStatus::Active => "Active",
            ConsentStatus::Expired => "Expired",
            ConsentStatus::Revoked => "Revoked",
        }
    }
}

impl fmt::Display for ConsentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl ConsentGrant {
    /// Revoked wins over expiry.
    pub fn status_at(&self, now: DateTime<Utc>) -> ConsentStatus {
        if self.revoked {
            ConsentStatus::Revoked
        } else if now > self.expires_at {
            ConsentStatus::Expired
        } else {
            ConsentStatus::Active
        }
    }

    /// Whether this grant lets the grantee read `scope` at `now`
    pub fn authorizes(&self, scope: Scope, now: DateTime<Utc>) -> bool {
        self.status_at(now) == ConsentStatus::Active && self.scope.covers(scope)
    }
}

/// Payload for `POST /patients/{id}/consents`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConsentGrantRequest {
    pub grantee_email: String,
    pub scope: ScopeFilter,
    /// ISO-8601 with millisecond precision, e.g. `2099-01-01T00:00:00.000Z`
    pub expires_at: String,
}

impl ConsentGrantRequest {
    pub fn new(
        grantee_email: impl Into<String>,
        scope: impl Into<ScopeFilter>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            grantee_email: grantee_email.into(),
            scope: scope.into(),
            expires_at: expires_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RevokeStatus {
    Revoked,
    AlreadyRevoked,
}

/// Result of `POST /consents/{id}/revoke`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RevokeOutcome {
    #[serde(default, deserialize_with = "opt_id_string")]
    pub consent_id: Option<String>,
    pub status: RevokeStatus,
}

impl RevokeOutcome {
    pub fn already_revoked(&self) -> bool {
        self.status == RevokeStatus::AlreadyRevoked
    }
}
