//! Page-level controllers between a dashboard and the API.
//!
//! Each controller owns a [`StatusLine`] (the single user-visible message plus
//! the loading flag) and implements [`SessionBound`] so the recovery policy can
//! drop its session-derived state. A controller issues its requests strictly in
//! sequence; while one is in flight every further operation fails with
//! [`ApiError::Busy`] without touching the network.
//!
//! Controllers sharing a session also share its teardown: each one tracks a
//! [`SessionEpoch`], hides its derived state as soon as the session moves on and
//! drops that state on its next operation.

pub mod account;
pub mod catalog;
pub mod consent;
pub mod dashboard;
pub mod guardian;
pub mod records;
pub mod selection;

pub use account::AccountController;
pub use catalog::CatalogWorkflow;
pub use consent::{ConsentRow, ConsentSource, ConsentWorkflow};
pub use dashboard::{ConsentAccess, DashboardConfig, RecordAccess};
pub use guardian::GuardianWorkflow;
pub use records::{RecordSource, RecordsWorkflow};
pub use selection::{Origin, PageStep, SelectionWorkflow, Sourced};

use crate::api::ApiClient;
use crate::error::{ApiError, Result};
use crate::session::{SessionBound, SessionEpoch, SESSION_EXPIRED_MESSAGE};

/// Loading flag plus the one message shown to the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLine {
    loading: bool,
    message: Option<String>,
}

impl StatusLine {
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Mark a request as started, clearing the previous message
    pub(crate) fn begin(&mut self) -> Result<()> {
        if self.loading {
            tracing::debug!("Request already in flight, ignoring");
            return Err(ApiError::Busy);
        }
        self.loading = true;
        self.message = None;
        Ok(())
    }

    pub(crate) fn finish(&mut self, message: Option<String>) {
        self.loading = false;
        self.message = message;
    }

    pub fn clear(&mut self) {
        self.loading = false;
        self.message = None;
    }
}

/// Shared plumbing of every workflow controller
pub(crate) trait Controller: SessionBound {
    fn api(&self) -> &ApiClient;

    fn status_mut(&mut self) -> &mut StatusLine;

    fn epoch_mut(&mut self) -> &mut SessionEpoch;

    /// Drop state left over from an earlier session
    fn sync_session(&mut self) {
        if self.epoch_mut().sync() {
            tracing::debug!("Session changed, dropping page state");
            self.reset_session_state();
        }
    }

    /// Start a request against the current session
    fn begin(&mut self) -> Result<()> {
        self.sync_session();
        self.status_mut().begin()
    }

    /// Show the error's own message; the recovery policy is not consulted
    fn report(&mut self, err: ApiError) -> ApiError {
        if !matches!(err, ApiError::Busy) {
            self.status_mut().finish(Some(err.to_string()));
        }
        err
    }

    /// Record a failure in the status line and hand the error back.
    ///
    /// Auth failures tear the session down (token cleared, page state reset)
    /// and show the session-expired message instead of the raw one.
    fn fail(&mut self, err: ApiError) -> ApiError {
        if matches!(err, ApiError::Busy) {
            return err;
        }
        let recovery = self.api().recovery();
        let message = if recovery.handle(&err, self) {
            SESSION_EXPIRED_MESSAGE.to_string()
        } else {
            err.to_string()
        };
        self.status_mut().finish(Some(message));
        err
    }

    /// Turn a call result into the workflow result, reporting failures
    fn settle<T>(&mut self, result: Result<T>) -> Result<T> {
        result.map_err(|err| self.fail(err))
    }
}
