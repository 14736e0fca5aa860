use serde::{Deserialize, Serialize};

use crate::resource::ClinicalResource;
use crate::scope::{Scope, ScopeFilter};
use crate::wire::{id_string, opt_id_string};

/// Reference linking a patient to an externally stored clinical resource
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordPointer {
    #[serde(alias = "pointer_id", deserialize_with = "id_string")]
    pub id: String,
    pub issuer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
    pub resource: ClinicalResource,
}

/// Response of the record queries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordsPage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    pub scope: ScopeFilter,
    #[serde(default)]
    pub records: Vec<RecordPointer>,
}

/// Records for every concrete scope, fetched together
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSnapshot {
    pub immunizations: Vec<RecordPointer>,
    pub allergies: Vec<RecordPointer>,
    pub conditions: Vec<RecordPointer>,
}

impl RecordSnapshot {
    pub fn get(&self, scope: Scope) -> &[RecordPointer] {
        match scope {
            Scope::Immunizations => &self.immunizations,
            Scope::Allergies => &self.allergies,
            Scope::Conditions => &self.conditions,
        }
    }

    pub fn total(&self) -> usize {
        self.immunizations.len() + self.allergies.len() + self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Guardian-side link of an existing FHIR resource (`POST /patients/{id}/pointers`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PointerRequest {
    pub record_type: Scope,
    pub fhir_base_url: String,
    pub fhir_resource_type: String,
    pub fhir_resource_id: String,
    pub issuer: String,
}

/// Patient-side link (`POST /me/pointers`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MyPointerRequest {
    pub scope: Scope,
    pub fhir_resource_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
}

/// Catalog creation payload (`POST /me/catalog`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogCreate {
    pub scope: Scope,
    pub display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
}

/// Resource the server synthesized from a catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEntryCreated {
    pub resource_type: String,
    #[serde(deserialize_with = "id_string")]
    pub resource_id: String,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub pointer_id: Option<String>,
}
