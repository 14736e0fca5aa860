use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};
use crate::wire::id_string;

/// Portal role selected at login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Guardian,
    Doctor,
    Patient,
    ClinicAdmin,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Guardian, Role::Doctor, Role::Patient, Role::ClinicAdmin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guardian => "guardian",
            Role::Doctor => "doctor",
            Role::Patient => "patient",
            Role::ClinicAdmin => "clinic_admin",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "guardian" => Ok(Role::Guardian),
            "doctor" => Ok(Role::Doctor),
            "patient" => Ok(Role::Patient),
            "clinic_admin" => Ok(Role::ClinicAdmin),
            _ => Err(CoreError::InvalidValue {
                kind: "role",
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Role::parse(s)
    }
}

/// Login / registration payload
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            role,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .field("role", &self.role)
            .finish()
    }
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Bearer credential issued by login and register
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

/// The signed-in account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub email: String,
    pub role: Role,
}

/// Internal identifier plus the shareable public identifier.
///
/// Only `public_id` is ever passed back to the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatientIdentity {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub public_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelfRegisterRequest {
    /// `YYYY-MM-DD`
    pub dob: String,
}
