use std::{
    panic,
    sync::{
        Arc,
        atomic::{AtomicU8, Ordering},
    },
};

use strum::Display;
use tokio::task::JoinHandle;

use crate::{
    FormInput, NotificationKind, NotificationPresenter, NotificationSink, QuoteTransport,
    SubmissionError, ValidationResult, validate,
};

pub const SUBMITTING_CAPTION: &str = "Submitting...";
pub const CORRECT_ERRORS_MESSAGE: &str = "Please correct the errors below.";
pub const SUCCESS_MESSAGE: &str =
    "Thank you! Your quote request has been submitted. We will contact you within 24 hours.";
pub const FAILURE_MESSAGE: &str =
    "Sorry, we could not submit your quote request. Please try again or call us directly.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[repr(u8)]
pub enum SubmissionState {
    Idle = 0,
    Submitting = 1,
}

impl From<u8> for SubmissionState {
    fn from(value: u8) -> Self {
        match value {
            1 => SubmissionState::Submitting,
            _ => SubmissionState::Idle,
        }
    }
}

#[derive(Debug)]
pub enum SubmissionOutcome {
    Invalid(ValidationResult),
    Submitted,
    Failed(SubmissionError),
    Busy,
}

/// The page elements the controller drives.
pub trait FormView: Send + Sync + 'static {
    fn clear_errors(&self);
    /// Marks a field as errored, visually and for assistive technology.
    fn show_field_error(&self, field: &str, message: &str);
    fn focus(&self, field: &str);
    fn submit_caption(&self) -> String;
    fn set_submit(&self, caption: &str, enabled: bool);
    fn reset(&self);
}

struct Inner<V, S> {
    view: V,
    transport: Box<dyn QuoteTransport>,
    presenter: NotificationPresenter<S>,
    state: AtomicU8,
}

/// Exclusive claim on the form for one submit call. Goes back to Idle when dropped, and
/// restores the submit control if it was locked, which also covers a submission task being
/// cancelled mid-flight.
struct Submitting<'a, V: FormView> {
    view: &'a V,
    state: &'a AtomicU8,
    caption: Option<String>,
}

impl<'a, V: FormView> Submitting<'a, V> {
    fn claim(view: &'a V, state: &'a AtomicU8) -> Option<Self> {
        state
            .compare_exchange(
                SubmissionState::Idle as u8,
                SubmissionState::Submitting as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .ok()?;

        Some(Self {
            view,
            state,
            caption: None,
        })
    }

    fn lock_control(&mut self) {
        self.caption = Some(self.view.submit_caption());
        self.view.set_submit(SUBMITTING_CAPTION, false);
    }
}

impl<V: FormView> Drop for Submitting<'_, V> {
    fn drop(&mut self) {
        if let Some(caption) = self.caption.take() {
            self.view.set_submit(&caption, true);
        }
        self.state
            .store(SubmissionState::Idle as u8, Ordering::Release);
    }
}

/// Quote form controller. Built once with handles to the view, the transport and the
/// notification presenter.
pub struct QuoteForm<V, S> {
    inner: Arc<Inner<V, S>>,
}

impl<V, S> Clone for QuoteForm<V, S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<V: FormView, S: NotificationSink> QuoteForm<V, S> {
    pub fn new(
        view: V,
        transport: impl QuoteTransport + 'static,
        presenter: NotificationPresenter<S>,
    ) -> Self {
        Self::with_transport(view, Box::new(transport), presenter)
    }

    pub fn with_transport(
        view: V,
        transport: Box<dyn QuoteTransport>,
        presenter: NotificationPresenter<S>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                view,
                transport,
                presenter,
                state: AtomicU8::new(SubmissionState::Idle as u8),
            }),
        }
    }

    pub fn view(&self) -> &V {
        &self.inner.view
    }

    pub fn presenter(&self) -> &NotificationPresenter<S> {
        &self.inner.presenter
    }

    pub fn state(&self) -> SubmissionState {
        self.inner.state.load(Ordering::Acquire).into()
    }

    /// Clears previous error markings, then marks every errored field.
    pub fn validate(&self, input: &FormInput) -> ValidationResult {
        self.inner.view.clear_errors();

        let result = validate(input);
        for (field, error) in result.iter() {
            self.inner.view.show_field_error(field, error.message);
        }

        result
    }

    #[tracing::instrument(skip_all)]
    pub async fn submit(&self, input: FormInput) -> SubmissionOutcome {
        let inner = &self.inner;

        let Some(mut submitting) = Submitting::claim(&inner.view, &inner.state) else {
            tracing::debug!("submission already in progress");
            return SubmissionOutcome::Busy;
        };

        let result = self.validate(&input);
        if let Some(field) = result.first_field() {
            tracing::debug!(errors = result.len(), "quote form rejected");
            inner.view.focus(field);
            inner
                .presenter
                .notify(CORRECT_ERRORS_MESSAGE, NotificationKind::Error);
            return SubmissionOutcome::Invalid(result);
        }

        submitting.lock_control();
        let delivered = inner.transport.deliver(&input).await;

        // No await from here on: the outcome is announced in the same poll that releases the form.
        drop(submitting);

        match delivered {
            Ok(()) => {
                tracing::info!("quote request submitted");
                inner
                    .presenter
                    .notify(SUCCESS_MESSAGE, NotificationKind::Success);
                inner.view.reset();
                SubmissionOutcome::Submitted
            }
            Err(err) => {
                tracing::error!(error = %err, "quote request failed");
                inner.presenter.notify(FAILURE_MESSAGE, NotificationKind::Error);
                SubmissionOutcome::Failed(err)
            }
        }
    }

    /// Runs [`QuoteForm::submit`] as a task that can be cancelled, e.g. on teardown.
    pub fn spawn_submit(&self, input: FormInput) -> SubmissionTask {
        let form = self.clone();
        SubmissionTask {
            handle: tokio::spawn(async move { form.submit(input).await }),
        }
    }
}

pub struct SubmissionTask {
    handle: JoinHandle<SubmissionOutcome>,
}

impl SubmissionTask {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Waits for the submission. `None` when it was cancelled.
    pub async fn outcome(self) -> Option<SubmissionOutcome> {
        match self.handle.await {
            Ok(outcome) => Some(outcome),
            Err(err) if err.is_panic() => panic::resume_unwind(err.into_panic()),
            Err(_) => None,
        }
    }
}
