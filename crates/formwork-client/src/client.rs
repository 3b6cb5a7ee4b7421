//! The form client and its submission state machine.
//!
//! Submission follows `Idle -> Submitting -> {Success, Forwarded,
//! Error}`. Validation gates the transition out of `Idle` and never
//! touches the network. A single-flight guard makes a second submit
//! request a no-op while one is in flight, and is cleared on every exit
//! path. A 403 reply triggers exactly one credential refresh and retry
//! when a provider is configured; a forward directive in a successful
//! reply replaces the whole session with the next form's.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tracing::{debug, info, warn};

use formwork_render::FormView;
use formwork_schema::{FieldErrors, SchemaNode};

use crate::config::ClientConfig;
use crate::envelope::SubmissionEnvelope;
use crate::error::Result;
use crate::session::FormSession;
use crate::transport::{
    AnswersSource, CredentialProvider, ReplyBody, SchemaSource, SinkResponse, SubmissionSink,
};

/// Fallback text when the server supplies no failure details.
pub const SUBMIT_FAILURE_MESSAGE: &str = "Failed to submit form";

/// Failure text for an authorization failure refresh could not fix.
pub const ACCESS_DENIED_MESSAGE: &str = "Access denied even after refresh";

/// Where the submission flow currently stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmitState {
    /// Editable; nothing in flight.
    #[default]
    Idle,
    /// A submission is in flight.
    Submitting,
    /// Terminal success; controls are hidden.
    Success {
        /// Server-supplied messages for the success notice.
        messages: Vec<String>,
    },
    /// Success with a forward directive: the notice is shown while the
    /// next form's controls render.
    Forwarded {
        /// Server-supplied messages for the success notice.
        messages: Vec<String>,
    },
    /// Submission failed; the form stays editable.
    Error {
        /// Human-readable failure text.
        message: String,
    },
}

impl SubmitState {
    /// Returns whether the form is editable and idle.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// Returns whether the submission succeeded, forwarded or not.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. } | Self::Forwarded { .. })
    }
}

/// Events emitted to the embedding caller.
#[derive(Debug, Clone)]
pub enum FormEvent {
    /// A submission was accepted.
    SubmitSuccess {
        /// The envelope that was posted.
        envelope: SubmissionEnvelope,
    },
    /// A submission failed.
    SubmitError {
        /// The failure text shown to the user.
        error: String,
    },
}

/// A registered event handler.
pub type EventHandler = Arc<dyn Fn(&FormEvent) + Send + Sync>;

enum Outcome {
    Accepted {
        messages: Vec<String>,
        forward: Option<String>,
    },
    Rejected {
        message: String,
    },
}

#[derive(Debug, Default)]
struct ClientInner {
    session: Option<FormSession>,
    state: SubmitState,
    in_flight: bool,
}

/// Drives one form at a time against the configured collaborators.
pub struct FormClient {
    config: ClientConfig,
    schema_source: Arc<dyn SchemaSource>,
    answers_source: Arc<dyn AnswersSource>,
    sink: Arc<dyn SubmissionSink>,
    credentials: Option<Arc<dyn CredentialProvider>>,
    handlers: Vec<EventHandler>,
    inner: Mutex<ClientInner>,
}

impl FormClient {
    /// Creates a client over the given collaborators.
    pub fn new(
        schema_source: Arc<dyn SchemaSource>,
        answers_source: Arc<dyn AnswersSource>,
        sink: Arc<dyn SubmissionSink>,
    ) -> Self {
        Self {
            config: ClientConfig::default(),
            schema_source,
            answers_source,
            sink,
            credentials: None,
            handlers: Vec::new(),
            inner: Mutex::new(ClientInner::default()),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Attaches a credential provider.
    #[must_use]
    pub fn credentials(mut self, provider: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = Some(provider);
        self
    }

    /// Registers an event handler.
    #[must_use]
    pub fn on_event(mut self, handler: impl Fn(&FormEvent) + Send + Sync + 'static) -> Self {
        self.handlers.push(Arc::new(handler));
        self
    }

    /// Loads a form, replacing any current session.
    ///
    /// Schema and prior answers are fetched concurrently; both must land
    /// before the session exists. A missing answers record means empty
    /// answers, while a schema failure is fatal to the load.
    pub async fn load(&self, form_name: &str) -> Result<()> {
        let session = self.load_session(form_name).await?;
        let mut inner = self.lock();
        inner.session = Some(session);
        inner.state = SubmitState::Idle;
        inner.in_flight = false;
        info!(form = form_name, "form session loaded");
        Ok(())
    }

    /// The current submission state.
    pub fn state(&self) -> SubmitState {
        self.lock().state.clone()
    }

    /// The active form name, once loaded.
    pub fn form_fname(&self) -> Option<String> {
        self.lock()
            .session
            .as_ref()
            .map(|session| session.form_fname().to_string())
    }

    /// Builds the renderable view of the current session.
    pub fn view(&self) -> Option<FormView> {
        self.lock().session.as_ref().map(FormSession::view)
    }

    /// The current field errors (empty when no session is loaded).
    pub fn field_errors(&self) -> FieldErrors {
        self.lock()
            .session
            .as_ref()
            .map(|session| session.errors().clone())
            .unwrap_or_default()
    }

    /// Reads the answer value at a dotted path.
    pub fn value_at(&self, path: &str) -> Option<Value> {
        self.lock()
            .session
            .as_ref()
            .and_then(|session| session.value_at(path).cloned())
    }

    /// Resolves the schema node at a dotted path.
    pub fn schema_at(&self, path: &str) -> Option<SchemaNode> {
        self.lock()
            .session
            .as_ref()
            .and_then(|session| session.schema_at(path).cloned())
    }

    /// Writes an answer value at a dotted path.
    ///
    /// Clears that path's error synchronously and repairs an `Error`
    /// state back to `Idle`, so stale failure notices never outlive an
    /// edit.
    pub fn set_value(&self, path: &str, value: Value) {
        let mut inner = self.lock();
        if matches!(inner.state, SubmitState::Error { .. }) {
            inner.state = SubmitState::Idle;
        }
        if let Some(session) = inner.session.as_mut() {
            session.set_value(path, value);
        }
    }

    /// Runs a full validation pass; returns whether the answers are
    /// valid.
    pub fn validate_form(&self) -> bool {
        self.lock()
            .session
            .as_mut()
            .is_some_and(FormSession::validate)
    }

    /// Restores load-time answers and returns to `Idle`.
    pub fn reset(&self) {
        let mut inner = self.lock();
        if let Some(session) = inner.session.as_mut() {
            session.reset();
        }
        inner.state = SubmitState::Idle;
    }

    /// Validates and, if valid, submits the current answers.
    ///
    /// Returns the state the machine settled in. Transport problems are
    /// absorbed into the `Error` state; this method never panics the
    /// caller's flow.
    pub async fn submit(&self) -> SubmitState {
        let envelope = {
            let mut guard = self.lock();
            let inner = &mut *guard;
            if inner.in_flight {
                debug!("submission already in flight, ignoring");
                return inner.state.clone();
            }
            let Some(session) = inner.session.as_mut() else {
                warn!("submit requested without a loaded session");
                return inner.state.clone();
            };
            if !session.validate() {
                debug!(
                    errors = session.errors().len(),
                    "validation failed, submission not attempted"
                );
                inner.state = SubmitState::Idle;
                return inner.state.clone();
            }

            let username = self
                .credentials
                .as_ref()
                .and_then(|provider| provider.username())
                .unwrap_or_else(|| self.config.fallback_username.clone());
            let envelope = SubmissionEnvelope::new(
                username,
                session.form_fname(),
                session.form_version(),
                session.answers().clone(),
            );
            inner.in_flight = true;
            inner.state = SubmitState::Submitting;
            envelope
        };

        let outcome = self.perform_submit(&envelope).await;

        let mut events = Vec::new();
        let mut next_session = None;
        let final_state = match outcome {
            Outcome::Accepted { messages, forward } => {
                events.push(FormEvent::SubmitSuccess { envelope });
                if let Some(next_form) = forward {
                    info!(form = %next_form, "forward directive received, loading next form");
                    match self.load_session(&next_form).await {
                        Ok(session) => {
                            next_session = Some(session);
                            SubmitState::Forwarded { messages }
                        }
                        Err(err) => {
                            warn!(error = %err, "failed to load forwarded form");
                            SubmitState::Error {
                                message: err.to_string(),
                            }
                        }
                    }
                } else {
                    SubmitState::Success { messages }
                }
            }
            Outcome::Rejected { message } => {
                events.push(FormEvent::SubmitError {
                    error: message.clone(),
                });
                SubmitState::Error { message }
            }
        };

        {
            let mut inner = self.lock();
            // the guard drops on every exit from Submitting
            inner.in_flight = false;
            if let Some(session) = next_session {
                inner.session = Some(session);
            }
            inner.state = final_state.clone();
        }
        for event in &events {
            self.emit(event);
        }
        final_state
    }

    async fn load_session(&self, form_name: &str) -> Result<FormSession> {
        debug!(form = form_name, "fetching schema and prior answers");
        let (document, answers) = futures::join!(
            self.schema_source.fetch(form_name),
            self.answers_source.fetch(form_name)
        );
        Ok(FormSession::new(form_name, document?, answers?))
    }

    async fn perform_submit(&self, envelope: &SubmissionEnvelope) -> Outcome {
        let token = match &self.credentials {
            Some(provider) => match provider.token().await {
                Ok(token) => Some(token),
                Err(err) => {
                    warn!(error = %err, "token fetch failed");
                    return Outcome::Rejected {
                        message: err.to_string(),
                    };
                }
            },
            None => None,
        };

        let reply = match self.sink.submit(envelope, token.as_deref()).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(error = %err, "submission transport failed");
                return Outcome::Rejected {
                    message: SUBMIT_FAILURE_MESSAGE.to_string(),
                };
            }
        };

        if reply.status == 403 {
            if let Some(provider) = &self.credentials {
                debug!("authorization expired, refreshing credential once");
                let fresh = match provider.refresh().await {
                    Ok(fresh) => fresh,
                    Err(err) => {
                        warn!(error = %err, "credential refresh failed");
                        return Outcome::Rejected {
                            message: ACCESS_DENIED_MESSAGE.to_string(),
                        };
                    }
                };
                return match self.sink.submit(envelope, Some(&fresh)).await {
                    Ok(retry) if retry.is_success() => self.accepted(&retry),
                    Ok(retry) if retry.status == 403 => Outcome::Rejected {
                        message: ACCESS_DENIED_MESSAGE.to_string(),
                    },
                    Ok(retry) => Outcome::Rejected {
                        message: failure_message(&retry),
                    },
                    Err(err) => {
                        warn!(error = %err, "submission retry transport failed");
                        Outcome::Rejected {
                            message: SUBMIT_FAILURE_MESSAGE.to_string(),
                        }
                    }
                };
            }
            return Outcome::Rejected {
                message: failure_message(&reply),
            };
        }

        if reply.is_success() {
            self.accepted(&reply)
        } else {
            Outcome::Rejected {
                message: failure_message(&reply),
            }
        }
    }

    fn accepted(&self, reply: &SinkResponse) -> Outcome {
        let body: ReplyBody = reply.json().unwrap_or_default();
        let forward = reply
            .get_header(&self.config.forward_header)
            .map(str::to_string)
            .filter(|name| !name.is_empty());
        Outcome::Accepted {
            messages: body.messages,
            forward,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ClientInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: &FormEvent) {
        for handler in &self.handlers {
            handler(event);
        }
    }
}

/// Picks the failure text out of a rejection reply.
///
/// Prefers the headline message, then the messages list, then the
/// generic fallback when the body is absent or unparsable.
fn failure_message(reply: &SinkResponse) -> String {
    reply
        .json::<ReplyBody>()
        .ok()
        .and_then(|body| {
            body.message_header.or_else(|| {
                if body.messages.is_empty() {
                    None
                } else {
                    Some(body.messages.join(" "))
                }
            })
        })
        .unwrap_or_else(|| SUBMIT_FAILURE_MESSAGE.to_string())
}
