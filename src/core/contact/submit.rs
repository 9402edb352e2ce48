use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::task::JoinHandle;

use super::validator::{validate, ContactFields, Field, FieldErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    #[error("message delivery failed: {0}")]
    Delivery(String),
}

/// Why a submit attempt did not start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejected {
    /// A send is already in flight.
    InFlight,
    /// One or more fields failed validation.
    Invalid(FieldErrors),
}

/// Delivers a validated contact message somewhere.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, message: &ContactFields) -> Result<(), SendError>;
}

/// Stand-in transport: waits `latency`, then reports success.
#[derive(Debug, Clone)]
pub struct SimulatedSender {
    latency: Duration,
}

impl SimulatedSender {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl MessageSender for SimulatedSender {
    async fn send(&self, message: &ContactFields) -> Result<(), SendError> {
        tokio::time::sleep(self.latency).await;
        log::info!(
            "Contact message from {} <{}> accepted ({} chars)",
            message.name.trim(),
            message.email,
            message.message.chars().count()
        );
        Ok(())
    }
}

/// Form contents, inline errors and the submission status banner.
///
/// The form itself is synchronous. The caller drives the send between
/// [`ContactForm::begin_submit`] and [`ContactForm::finish_submit`], then
/// arranges for [`ContactForm::expire_status`] to be called after the reset
/// delay with the epoch `finish_submit` returned.
#[derive(Debug, Default)]
pub struct ContactForm {
    fields: ContactFields,
    errors: FieldErrors,
    status: SubmitStatus,
    epoch: u64,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    pub fn value(&self, field: Field) -> &str {
        self.fields.get(field)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmitStatus::Submitting
    }

    /// Update one field. Editing a field clears its error.
    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        self.fields.set(field, value);
        self.errors.remove(&field);
    }

    /// Validate and, if clean, move to `Submitting`.
    ///
    /// Returns the message to send. A rejected attempt leaves the status
    /// untouched.
    pub fn begin_submit(&mut self) -> Result<ContactFields, SubmitRejected> {
        if self.is_submitting() {
            return Err(SubmitRejected::InFlight);
        }

        let errors = validate(&self.fields);
        if !errors.is_empty() {
            log::debug!("Contact form rejected: {} invalid field(s)", errors.len());
            self.errors = errors.clone();
            return Err(SubmitRejected::Invalid(errors));
        }

        self.errors.clear();
        self.status = SubmitStatus::Submitting;
        Ok(self.fields.clone())
    }

    /// Record the outcome of the send. Returns the epoch to expire later.
    pub fn finish_submit(&mut self, result: Result<(), SendError>) -> u64 {
        match result {
            Ok(()) => {
                self.status = SubmitStatus::Success;
                self.fields = ContactFields::default();
            }
            Err(e) => {
                log::warn!("Contact form submission failed: {e}");
                self.status = SubmitStatus::Error;
            }
        }
        self.epoch += 1;
        self.epoch
    }

    /// Return to `Idle` if `epoch` is still the latest outcome.
    ///
    /// A stale epoch (a newer submission has finished since) is ignored.
    pub fn expire_status(&mut self, epoch: u64) -> bool {
        let settled = matches!(self.status, SubmitStatus::Success | SubmitStatus::Error);
        if settled && epoch == self.epoch {
            self.status = SubmitStatus::Idle;
            true
        } else {
            false
        }
    }
}

/// One-shot delayed callback, aborted when replaced or dropped.
#[derive(Debug, Default)]
pub struct StatusTimer {
    handle: Option<JoinHandle<()>>,
}

impl StatusTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `on_expire` after `delay`, cancelling any pending callback.
    pub fn schedule<F>(&mut self, delay: Duration, on_expire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            on_expire();
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for StatusTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
