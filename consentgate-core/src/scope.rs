use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// Category of clinical data a record or consent grant belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Immunizations,
    Allergies,
    Conditions,
}

impl Scope {
    pub const ALL: [Scope; 3] = [Scope::Immunizations, Scope::Allergies, Scope::Conditions];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Immunizations => "immunizations",
            Scope::Allergies => "allergies",
            Scope::Conditions => "conditions",
        }
    }

    /// Human-readable heading
    pub fn label(&self) -> &'static str {
        match self {
            Scope::Immunizations => "Immunizations",
            Scope::Allergies => "Allergies",
            Scope::Conditions => "Conditions",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "immunizations" => Ok(Scope::Immunizations),
            "allergies" => Ok(Scope::Allergies),
            "conditions" => Ok(Scope::Conditions),
            _ => Err(CoreError::InvalidValue {
                kind: "scope",
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Scope::parse(s)
    }
}

/// A concrete scope or the `all` sentinel.
///
/// Wire form is the plain string (`"immunizations"`, `"all"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ScopeFilter {
    All,
    Only(Scope),
}

impl ScopeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeFilter::All => "all",
            ScopeFilter::Only(scope) => scope.as_str(),
        }
    }

    /// Whether a grant with this filter covers `scope`
    pub fn covers(&self, scope: Scope) -> bool {
        match self {
            ScopeFilter::All => true,
            ScopeFilter::Only(own) => *own == scope,
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(ScopeFilter::All);
        }
        Scope::parse(value).map(ScopeFilter::Only)
    }
}

impl From<Scope> for ScopeFilter {
    fn from(scope: Scope) -> Self {
        ScopeFilter::Only(scope)
    }
}

impl From<ScopeFilter> for String {
    fn from(filter: ScopeFilter) -> Self {
        filter.as_str().to_string()
    }
}

impl TryFrom<String> for ScopeFilter {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        ScopeFilter::parse(&value)
    }
}

impl fmt::Display for ScopeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScopeFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        ScopeFilter::parse(s)
    }
}
