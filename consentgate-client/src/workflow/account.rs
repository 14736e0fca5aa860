use chrono::NaiveDate;
use consentgate_core::validation::{validate_dob, validate_email};
use consentgate_core::{Credentials, PatientIdentity, Role, UserProfile};

use super::{Controller, StatusLine};
use crate::api::ApiClient;
use crate::error::{ApiError, Result};
use crate::session::{SessionBound, SessionEpoch};

/// Sign-in, sign-up and the signed-in account's profile
#[derive(Debug)]
pub struct AccountController {
    api: ApiClient,
    status: StatusLine,
    epoch: SessionEpoch,
    profile: Option<UserProfile>,
    patient: Option<PatientIdentity>,
}

impl AccountController {
    pub fn new(api: ApiClient) -> Self {
        Self {
            epoch: SessionEpoch::new(api.session()),
            api,
            status: StatusLine::default(),
            profile: None,
            patient: None,
        }
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref().filter(|_| self.epoch.is_current())
    }

    /// Patient record created by [`Self::register_patient_record`]
    pub fn patient(&self) -> Option<&PatientIdentity> {
        self.patient.as_ref().filter(|_| self.epoch.is_current())
    }

    pub fn is_authenticated(&self) -> bool {
        self.api.session().is_authenticated()
    }

    pub async fn login(&mut self, email: &str, password: &str, role: Role) -> Result<UserProfile> {
        let credentials = self.settle(credentials(email, password, role))?;
        self.begin()?;
        let result = self.api.login(&credentials).await;
        result.map_err(|err| self.report(err))?;
        self.sync_session();
        self.fetch_profile().await
    }

    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<UserProfile> {
        let credentials = self.settle(credentials(email, password, role))?;
        self.begin()?;
        let result = self.api.register(&credentials).await;
        result.map_err(|err| self.report(err))?;
        self.sync_session();
        self.fetch_profile().await
    }

    pub fn logout(&mut self) {
        let cleared = self.api.logout();
        self.sync_session();
        let message = if cleared {
            "Signed out"
        } else {
            "Signed out, but the saved token could not be removed"
        };
        self.status.finish(Some(message.to_string()));
    }

    pub async fn load_profile(&mut self) -> Result<UserProfile> {
        self.begin()?;
        self.fetch_profile().await
    }

    /// Create the patient record of a patient account
    pub async fn register_patient_record(
        &mut self,
        dob: &str,
        today: NaiveDate,
    ) -> Result<PatientIdentity> {
        let dob = self.settle(validate_dob(dob, today).map_err(ApiError::from))?;
        self.begin()?;
        let result = self.api.self_register_patient(&dob).await;
        let patient = self.settle(result)?;
        self.status
            .finish(Some(format!("Patient record created: {}", patient.public_id)));
        self.patient = Some(patient.clone());
        Ok(patient)
    }

    async fn fetch_profile(&mut self) -> Result<UserProfile> {
        let result = self.api.me().await;
        let profile = self.settle(result)?;
        self.status.finish(Some(format!(
            "Signed in as {} ({})",
            profile.email,
            profile.role.as_str()
        )));
        self.profile = Some(profile.clone());
        Ok(profile)
    }
}

fn credentials(email: &str, password: &str, role: Role) -> Result<Credentials> {
    let email = validate_email(email)?;
    if password.is_empty() {
        return Err(ApiError::validation("Password required"));
    }
    Ok(Credentials::new(email, password, role))
}

impl SessionBound for AccountController {
    fn reset_session_state(&mut self) {
        self.profile = None;
        self.patient = None;
    }
}

impl Controller for AccountController {
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
