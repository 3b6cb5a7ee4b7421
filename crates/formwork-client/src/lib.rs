//! # formwork-client
//!
//! Form session lifecycle and submission state machine for
//! schema-driven forms.
//!
//! The [`FormClient`] owns one [`FormSession`] at a time and drives it
//! against four host-supplied collaborators: a [`SchemaSource`], an
//! [`AnswersSource`], a [`SubmissionSink`], and an optional
//! [`CredentialProvider`]. Loading fetches schema and prior answers
//! concurrently; editing goes through copy-on-write dotted-path writes;
//! submission validates locally, posts a camelCase envelope, retries
//! once after a 403 when credentials can refresh, and follows
//! server-directed forward chains by replacing the session wholesale.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use formwork_client::{FormClient, SubmitState};
//! use serde_json::json;
//!
//! let client = FormClient::new(schema_source, answers_source, sink)
//!     .credentials(provider)
//!     .on_event(|event| println!("{event:?}"));
//!
//! client.load("registration").await?;
//! client.set_value("name", json!("Ada"));
//! match client.submit().await {
//!     SubmitState::Success { messages } => { /* show notice */ }
//!     SubmitState::Forwarded { .. } => { /* render the next form */ }
//!     SubmitState::Error { message } => { /* show failure */ }
//!     _ => {}
//! }
//! ```

mod client;
mod config;
mod envelope;
mod error;
mod session;
mod transport;

pub use client::{
    EventHandler, FormClient, FormEvent, SubmitState, ACCESS_DENIED_MESSAGE,
    SUBMIT_FAILURE_MESSAGE,
};
pub use config::ClientConfig;
pub use envelope::SubmissionEnvelope;
pub use error::{ClientError, Result};
pub use session::FormSession;
pub use transport::{
    AnswersSource, BoxFuture, CredentialProvider, FormDocument, ReplyBody, SchemaSource,
    SinkResponse, SubmissionSink,
};
