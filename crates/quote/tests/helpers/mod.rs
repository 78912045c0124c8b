use std::{
    collections::BTreeMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use earlybird_quote::{
    FormInput, FormView, Notification, NotificationPresenter, NotificationSink, QuoteForm,
    QuoteTransport, SimulatedTransport, SubmissionError,
};
use ulid::Ulid;

pub const ORIGINAL_CAPTION: &str = "Request Quote";

#[derive(Default)]
pub struct ViewState {
    pub errors: BTreeMap<String, String>,
    pub focused: Option<String>,
    pub caption: String,
    pub enabled: bool,
    pub resets: usize,
}

pub struct RecordingView(Mutex<ViewState>);

impl Default for RecordingView {
    fn default() -> Self {
        Self(Mutex::new(ViewState {
            caption: ORIGINAL_CAPTION.to_owned(),
            enabled: true,
            ..Default::default()
        }))
    }
}

#[allow(dead_code)]
impl RecordingView {
    pub fn errors(&self) -> BTreeMap<String, String> {
        self.0.lock().unwrap().errors.clone()
    }

    pub fn focused(&self) -> Option<String> {
        self.0.lock().unwrap().focused.clone()
    }

    pub fn caption(&self) -> String {
        self.0.lock().unwrap().caption.clone()
    }

    pub fn enabled(&self) -> bool {
        self.0.lock().unwrap().enabled
    }

    pub fn resets(&self) -> usize {
        self.0.lock().unwrap().resets
    }
}

impl FormView for RecordingView {
    fn clear_errors(&self) {
        self.0.lock().unwrap().errors.clear();
    }

    fn show_field_error(&self, field: &str, message: &str) {
        self.0
            .lock()
            .unwrap()
            .errors
            .insert(field.to_owned(), message.to_owned());
    }

    fn focus(&self, field: &str) {
        self.0.lock().unwrap().focused = Some(field.to_owned());
    }

    fn submit_caption(&self) -> String {
        self.caption()
    }

    fn set_submit(&self, caption: &str, enabled: bool) {
        let mut state = self.0.lock().unwrap();
        state.caption = caption.to_owned();
        state.enabled = enabled;
    }

    fn reset(&self) {
        self.0.lock().unwrap().resets += 1;
    }
}

#[derive(Default)]
pub struct RecordingSink {
    visible: Mutex<Vec<Notification>>,
    shown: Mutex<Vec<Notification>>,
    removed: Mutex<Vec<Ulid>>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn visible(&self) -> Vec<Notification> {
        self.visible.lock().unwrap().clone()
    }

    pub fn shown(&self) -> Vec<Notification> {
        self.shown.lock().unwrap().clone()
    }

    pub fn removed(&self) -> Vec<Ulid> {
        self.removed.lock().unwrap().clone()
    }
}

impl NotificationSink for RecordingSink {
    fn show(&self, notification: &Notification) {
        self.visible.lock().unwrap().push(notification.clone());
        self.shown.lock().unwrap().push(notification.clone());
    }

    fn remove(&self, id: Ulid) {
        self.visible.lock().unwrap().retain(|n| n.id != id);
        self.removed.lock().unwrap().push(id);
    }
}

/// Counts deliveries and answers with a fixed result after a delay.
#[derive(Clone)]
pub struct StubTransport {
    pub calls: Arc<AtomicUsize>,
    delay: Duration,
    reject: Option<(u16, String)>,
}

#[allow(dead_code)]
impl StubTransport {
    pub fn accepting(delay: Duration) -> Self {
        Self {
            calls: Arc::default(),
            delay,
            reject: None,
        }
    }

    pub fn rejecting(delay: Duration, status: u16, message: &str) -> Self {
        Self {
            calls: Arc::default(),
            delay,
            reject: Some((status, message.to_owned())),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuoteTransport for StubTransport {
    async fn deliver(&self, _input: &FormInput) -> earlybird_quote::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;

        match &self.reject {
            Some((status, message)) => Err(SubmissionError::Rejected {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

pub type TestForm = QuoteForm<RecordingView, RecordingSink>;

pub fn presenter() -> NotificationPresenter<RecordingSink> {
    NotificationPresenter::new(RecordingSink::default(), Duration::from_millis(5000))
}

#[allow(dead_code)]
pub fn form(transport: impl QuoteTransport + 'static) -> TestForm {
    QuoteForm::new(RecordingView::default(), transport, presenter())
}

#[allow(dead_code)]
pub fn simulated_form() -> TestForm {
    form(SimulatedTransport::default())
}

#[allow(dead_code)]
pub fn valid_input() -> FormInput {
    FormInput::new()
        .with("name", "Jane Doe")
        .with("phone", "5551234567")
        .with("email", "jane@example.com")
}
