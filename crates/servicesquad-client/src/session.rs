//! Login/signup flow
//!
//! [`SessionController`] validates credentials, submits them to the backend and
//! writes the returned user into the shared [`AppState`]. [`SessionForm`] is the
//! editable state behind the login view.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use servicesquad_protocol::UserData;
use thiserror::Error;

use crate::network::{ApiError, AuthBackend};
use crate::state::{AppState, AuthMode, Credentials, Field, Violations, validate};

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Invalid input: {0}")]
    Invalid(Violations),

    #[error("A request is already in progress")]
    InFlight,

    #[error("Request failed ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("{0}")]
    Transport(String),
}

impl From<ApiError> for SubmitError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status { status, message } => SubmitError::Rejected {
                status: status.as_u16(),
                message,
            },
            other => SubmitError::Transport(other.to_string()),
        }
    }
}

/// Released when the pending submission finishes, on every exit path.
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(flag.clone()))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct SessionController<B> {
    backend: Arc<B>,
    state: AppState,
    in_flight: Arc<AtomicBool>,
}

impl<B> Clone for SessionController<B> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            state: self.state.clone(),
            in_flight: self.in_flight.clone(),
        }
    }
}

impl<B: AuthBackend> SessionController<B> {
    pub fn new(backend: B, state: AppState) -> Self {
        Self {
            backend: Arc::new(backend),
            state,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validate and submit `credentials` to the endpoint of `mode`.
    ///
    /// Nothing is sent when validation fails or another submission is pending.
    /// The shared user is only written on success.
    pub async fn submit(
        &self,
        credentials: &Credentials,
        mode: AuthMode,
    ) -> Result<UserData, SubmitError> {
        let violations = validate(credentials);
        if !violations.is_empty() {
            tracing::debug!("Not submitting {:?}: {}", mode, violations);
            return Err(SubmitError::Invalid(violations));
        }

        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            tracing::debug!("Ignoring {:?} submit while another is pending", mode);
            return Err(SubmitError::InFlight);
        };

        match self.backend.authenticate(mode, credentials).await {
            Ok(user) => {
                tracing::info!("{:?} succeeded for {}", mode, user.username);
                self.state.set_user(user.clone()).await;
                Ok(user)
            }
            Err(e) => {
                tracing::warn!("{:?} failed for {}: {}", mode, credentials.username, e);
                Err(e.into())
            }
        }
    }

    /// End the backend session. The local user is kept if the backend refuses.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.backend.logout().await?;
        self.state.clear_user().await;
        tracing::info!("Logged out");
        Ok(())
    }

    /// Pick up a session the backend still holds, e.g. after a restart.
    pub async fn restore_session(&self) -> Result<Option<UserData>, ApiError> {
        let user = self.backend.current_session().await?;
        match &user {
            Some(user) => {
                tracing::info!("Restored session for {}", user.username);
                self.state.set_user(user.clone()).await;
            }
            None => tracing::debug!("No active session"),
        }
        Ok(user)
    }
}

/// Editable state of the login/signup form
#[derive(Debug, Default)]
pub struct SessionForm {
    mode: AuthMode,
    pub username: String,
    pub password: String,
    violations: Violations,
    error: Option<String>,
}

impl SessionForm {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.error = None;
    }

    pub fn set_mode(&mut self, mode: AuthMode) {
        if self.mode != mode {
            self.toggle_mode();
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.password.clone())
    }

    /// Re-run validation on the current fields. Returns true when submittable.
    pub fn validate(&mut self) -> bool {
        self.violations = validate(&self.credentials());
        self.violations.is_empty()
    }

    pub fn field_error(&self, field: Field) -> Option<String> {
        self.violations.message(field)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Record the outcome of a submission started from this form.
    ///
    /// Once credentials have been sent the password is dropped; only the
    /// username survives a failed attempt.
    pub fn finish(&mut self, result: &Result<UserData, SubmitError>) {
        match result {
            Ok(_) => self.reset(),
            Err(SubmitError::Invalid(violations)) => {
                self.violations = violations.clone();
                self.error = None;
            }
            Err(SubmitError::InFlight) => self.error = Some(SubmitError::InFlight.to_string()),
            Err(e @ (SubmitError::Rejected { .. } | SubmitError::Transport(_))) => {
                self.password.clear();
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    /// Clear the fields and messages; the mode is kept.
    pub fn reset(&mut self) {
        self.username.clear();
        self.password.clear();
        self.violations = Violations::default();
        self.error = None;
    }
}
