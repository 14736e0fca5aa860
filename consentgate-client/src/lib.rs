//! consentgate - client for the consent-gated clinical record portal
//!
//! Typed access to the portal backend plus the workflow controllers that sit
//! between a dashboard and the API: consent management, record retrieval,
//! the catalog wizard and the hospital/provider selections.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod session;
pub mod workflow;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, Result};
pub use http::{HttpClient, RequestOptions};
pub use session::{
    AuthFailureDetection, RecoveryPolicy, Session, SessionBound, SessionEpoch, SessionState,
    SESSION_EXPIRED_MESSAGE,
};
