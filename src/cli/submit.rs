use std::sync::Mutex;

use anyhow::Result;
use clap::Args;
use earlybird::Config;
use earlybird_quote::{
    FormInput, FormView, Notification, NotificationKind, NotificationPresenter, NotificationSink,
    QuoteForm, SubmissionOutcome, format_phone, input,
};
use ulid::Ulid;

const SUBMIT_CAPTION: &str = "Request Quote";

#[derive(Args, Debug)]
pub struct SubmitArgs {
    #[arg(long)]
    pub name: String,
    /// Formatted as (555) 123-4567 before submitting
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub company: Option<String>,
    /// Service needed, repeat for several
    #[arg(long = "service")]
    pub services: Vec<String>,
    #[arg(long)]
    pub details: Option<String>,
    /// Quote endpoint (overrides config file); simulated when neither is set
    #[arg(long)]
    pub endpoint: Option<String>,
}

impl SubmitArgs {
    fn into_input(self) -> FormInput {
        let mut form = FormInput::new()
            .with(input::NAME, self.name)
            .with(input::PHONE, format_phone(&self.phone))
            .with(input::EMAIL, self.email);

        if let Some(company) = self.company {
            form.append(input::COMPANY, company);
        }
        for service in self.services {
            form.append(input::SERVICES, service);
        }
        if let Some(details) = self.details {
            form.append(input::PROJECT_DETAILS, details);
        }

        form
    }
}

/// Form view rendering to the log.
struct ConsoleView {
    submit: Mutex<(String, bool)>,
}

impl Default for ConsoleView {
    fn default() -> Self {
        Self {
            submit: Mutex::new((SUBMIT_CAPTION.to_owned(), true)),
        }
    }
}

impl FormView for ConsoleView {
    fn clear_errors(&self) {}

    fn show_field_error(&self, field: &str, message: &str) {
        tracing::warn!(field, "{message}");
    }

    fn focus(&self, field: &str) {
        tracing::debug!(field, "focus");
    }

    fn submit_caption(&self) -> String {
        self.submit
            .lock()
            .map(|submit| submit.0.clone())
            .unwrap_or_else(|_| SUBMIT_CAPTION.to_owned())
    }

    fn set_submit(&self, caption: &str, enabled: bool) {
        if let Ok(mut submit) = self.submit.lock() {
            *submit = (caption.to_owned(), enabled);
        }
        tracing::debug!(caption, enabled, "submit control");
    }

    fn reset(&self) {
        tracing::debug!("form reset");
    }
}

struct TracingSink;

impl NotificationSink for TracingSink {
    fn show(&self, notification: &Notification) {
        let id = notification.id.to_string();
        let color = notification.kind.color();
        match notification.kind {
            NotificationKind::Error => tracing::error!(id, color, "{}", notification.message),
            NotificationKind::Warning => tracing::warn!(id, color, "{}", notification.message),
            NotificationKind::Success | NotificationKind::Info => {
                tracing::info!(id, color, "{}", notification.message)
            }
        }
    }

    fn remove(&self, id: Ulid) {
        tracing::debug!(%id, "notification dismissed");
    }
}

pub async fn submit(config: Config, args: SubmitArgs) -> Result<()> {
    let mut form_config = config.form;
    if let Some(endpoint) = &args.endpoint {
        form_config.endpoint = Some(endpoint.to_owned());
    }

    let transport = form_config.transport()?;
    let presenter = NotificationPresenter::new(TracingSink, form_config.notification_ttl());
    let form = QuoteForm::with_transport(ConsoleView::default(), transport, presenter);

    let outcome = form.submit(args.into_input()).await;
    form.presenter().shutdown();

    match outcome {
        SubmissionOutcome::Submitted => Ok(()),
        SubmissionOutcome::Invalid(result) => {
            anyhow::bail!("quote request rejected, {} field(s) invalid", result.len())
        }
        SubmissionOutcome::Failed(err) => Err(err.into()),
        SubmissionOutcome::Busy => anyhow::bail!("a submission is already in progress"),
    }
}
