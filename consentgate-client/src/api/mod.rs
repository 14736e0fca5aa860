//! Typed API surface: one method per backend operation.
//!
//! Every identifier placed in a path goes through [`segment`]; every query
//! string through [`query_string`].

pub mod auth;
pub mod consent;
pub mod patients;
pub mod records;
pub mod registry;
pub mod selection;

use std::borrow::Cow;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::HttpClient;
use crate::session::{AuthFailureDetection, RecoveryPolicy, Session};

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: HttpClient,
    registry_auth: bool,
    detection: AuthFailureDetection,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: Session) -> Result<Self> {
        let http = HttpClient::new(config, session)?;
        Ok(Self::from_http(
            http,
            config.registry.authenticated,
            config.auth.failure_detection,
        ))
    }

    pub fn from_http(http: HttpClient, registry_auth: bool, detection: AuthFailureDetection) -> Self {
        Self {
            http,
            registry_auth,
            detection,
        }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn session(&self) -> &Session {
        self.http.session()
    }

    /// Recovery policy bound to this client's session
    pub fn recovery(&self) -> RecoveryPolicy {
        RecoveryPolicy::new(self.session().clone(), self.detection)
    }
}

/// Percent-escape one path segment
pub fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// `?k=v&...` with keys and values URL-encoded; empty for no pairs
pub fn query_string(pairs: &[(&str, String)]) -> String {
    if pairs.is_empty() {
        return String::new();
    }
    let joined = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("?{}", joined)
}
