use serde::{Deserialize, Serialize};
use serde_json::Value;

/// External clinical document embedded in a record pointer.
///
/// Only the resource type, id and meta are modelled; the rest of the document
/// is carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClinicalResource {
    #[serde(rename = "resourceType")]
    pub resource_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    /// All other fields are stored here
    #[serde(flatten)]
    pub rest: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Meta {
    #[serde(rename = "versionId", skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,

    #[serde(rename = "lastUpdated", skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Fields that carry the coded concept, by resource type
const CODE_FIELDS: &[&str] = &["vaccineCode", "code", "medicationCodeableConcept"];

/// Fields that carry the clinically relevant date, in preference order
const DATE_FIELDS: &[&str] = &[
    "occurrenceDateTime",
    "onsetDateTime",
    "recordedDate",
    "effectiveDateTime",
    "date",
];

impl ClinicalResource {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: None,
            meta: None,
            rest: Value::Object(serde_json::Map::new()),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Text of the primary coded concept (`text`, else the first coding's `display`)
    pub fn code_text(&self) -> Option<&str> {
        CODE_FIELDS.iter().find_map(|field| {
            let concept = self.rest.get(*field)?;
            concept.get("text").and_then(Value::as_str).or_else(|| {
                concept
                    .get("coding")
                    .and_then(Value::as_array)
                    .and_then(|codings| codings.first())
                    .and_then(|c| c.get("display"))
                    .and_then(Value::as_str)
            })
        })
    }

    /// Date part (`YYYY-MM-DD`) of the most relevant timestamp
    pub fn clinical_date(&self) -> Option<&str> {
        DATE_FIELDS.iter().find_map(|field| {
            let value = self.rest.get(*field)?.as_str()?;
            Some(value.get(..10).unwrap_or(value))
        })
    }

    /// One-line label for listings, e.g. `Immunization: MMR (2020-01-01)`
    pub fn summary(&self) -> String {
        let mut line = format!(
            "{}: {}",
            self.resource_type,
            self.code_text().unwrap_or("(uncoded)")
        );
        if let Some(date) = self.clinical_date() {
            line.push_str(&format!(" ({})", date));
        }
        line
    }
}
