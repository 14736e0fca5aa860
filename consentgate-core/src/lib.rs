//! consentgate-core - data model and pure workflow logic for the consent portal client.

pub mod catalog;
pub mod consent;
pub mod error;
pub mod identity;
pub mod record;
pub mod registry;
pub mod resource;
pub mod scope;
pub mod validation;
pub mod wire;
pub mod wizard;

pub use catalog::{Category, Vocabulary};
pub use consent::{ConsentGrant, ConsentGrantRequest, ConsentStatus, RevokeOutcome, RevokeStatus};
pub use error::{CoreError, Result};
pub use identity::{Credentials, PatientIdentity, Role, SelfRegisterRequest, TokenResponse, UserProfile};
pub use record::{
    CatalogCreate, CatalogEntryCreated, MyPointerRequest, PointerRequest, RecordPointer,
    RecordSnapshot, RecordsPage,
};
pub use registry::{HospitalSearch, HospitalSelection, ProviderSearch, ProviderSelection, RegistryPage};
pub use resource::{ClinicalResource, Meta};
pub use scope::{Scope, ScopeFilter};
pub use wizard::{CatalogWizard, SourceMode};
