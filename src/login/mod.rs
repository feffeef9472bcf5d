//! Login flow: drives one sign-in attempt from form submission to either the
//! authenticated root view or an inline error.
//!
//! Phases run `Idle -> Submitting -> Idle`, and the settled attempt is kept as
//! an [`Outcome`]. The form is disabled for the whole of `Submitting`, which is
//! the only thing keeping a second submission out. Dropping an in-flight
//! submit re-enables the form and dismisses its progress toast. The password
//! is never logged.

pub mod form;
pub mod view;

pub use form::LoginValues;

use crate::auth::AuthContext;
use crate::client::{ApiClient, NormalizedError};
use crate::forms::{FormErrors, SUBMIT};
use crate::notify::{Notifier, ToastId};
use crate::router::{Navigator, paths};
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument};

pub const LOGIN_PATH: &str = "/auth/login";
pub const SIGNING_IN: &str = "Signing in...";
pub const SIGNED_IN: &str = "Successfully logged in!";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
}

/// How the last settled submission ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failed,
}

/// What mounting the flow did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mount {
    /// A session already existed; the user was sent to the root view.
    Redirected,
    RenderForm,
}

/// Outcome of one call to [`LoginFlow::submit`].
#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    /// Signed in; carries the user value kept by the auth context.
    Succeeded(Value),
    Failed(NormalizedError),
    /// Field validation failed; nothing was sent.
    Blocked(FormErrors),
    /// Another submission is in flight; nothing was sent.
    Busy,
}

/// Observable form state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    pub errors: FormErrors,
    pub disabled: bool,
}

#[derive(Debug)]
struct FlowState {
    phase: Phase,
    outcome: Option<Outcome>,
    form: FormState,
}

pub struct LoginFlow {
    client: ApiClient,
    auth: AuthContext,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    state: Mutex<FlowState>,
}

/// Held across the request. Dropping it unsettled means the submit future was
/// cancelled, so the form goes back to idle.
struct InFlight<'a> {
    flow: &'a LoginFlow,
    toast: ToastId,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flow.notifier.dismiss(self.toast);
        if !self.settled {
            let mut state = self.flow.lock();
            state.form.disabled = false;
            state.phase = Phase::Idle;
            debug!("submission cancelled");
        }
    }
}

impl LoginFlow {
    #[must_use]
    pub fn new(
        client: ApiClient,
        auth: AuthContext,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            client,
            auth,
            notifier,
            navigator,
            state: Mutex::new(FlowState {
                phase: Phase::Idle,
                outcome: None,
                form: FormState::default(),
            }),
        }
    }

    /// Redirect guard. With an existing session the form is never rendered.
    pub fn mount(&self) -> Mount {
        if self.auth.is_authenticated() {
            debug!("session exists, skipping login form");
            self.navigator.navigate(paths::ROOT);
            Mount::Redirected
        } else {
            Mount::RenderForm
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.lock().phase
    }

    /// Result of the last settled submission, cleared when a new one starts.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.lock().outcome
    }

    #[must_use]
    pub fn form(&self) -> FormState {
        self.lock().form.clone()
    }

    /// Validates and submits `values`, then settles the flow.
    #[instrument(skip(self, values))]
    pub async fn submit(&self, values: LoginValues) -> Submission {
        {
            let mut state = self.lock();
            if state.form.disabled {
                debug!("submission ignored while another is in flight");
                return Submission::Busy;
            }

            state.outcome = None;
            state.form.errors = values.validate();
            if state.form.errors.has_field_errors() {
                return Submission::Blocked(state.form.errors.clone());
            }

            state.form.disabled = true;
            state.phase = Phase::Submitting;
        }

        let mut in_flight = InFlight {
            flow: self,
            toast: self.notifier.loading(SIGNING_IN),
            settled: false,
        };
        let result = self.attempt(&values).await;
        in_flight.settled = true;
        drop(in_flight);

        let mut state = self.lock();
        state.form.disabled = false;
        state.phase = Phase::Idle;

        match result {
            Ok(user) => {
                state.outcome = Some(Outcome::Success);
                drop(state);

                info!("signed in");
                self.notifier.success(SIGNED_IN);
                self.navigator.navigate(paths::ROOT);
                Submission::Succeeded(user)
            }
            Err(error) => {
                state.outcome = Some(Outcome::Failed);
                state.form.errors.set(SUBMIT, error.message.clone());
                drop(state);

                info!(code = ?error.code, "sign in failed: {}", error.message);
                self.notifier.error(&error.message);
                Submission::Failed(error)
            }
        }
    }

    async fn attempt(&self, values: &LoginValues) -> Result<Value, NormalizedError> {
        let response = self.client.post(LOGIN_PATH, values).await?;
        let payload: Value = response.json()?;
        self.auth
            .login(payload)
            .map_err(|err| NormalizedError::new(err.to_string(), None))
    }

    fn lock(&self) -> MutexGuard<'_, FlowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
