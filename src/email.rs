//! Email notification service using lettre

use lettre::{
    Message, SmtpTransport, Transport,
    address::Envelope,
    message::header,
    transport::{smtp::authentication::Credentials, stub::StubTransport},
};

use crate::config::EmailConfig;

#[derive(Clone)]
enum Mailer {
    Smtp(SmtpTransport),
    Stub(StubTransport),
}

/// Email service for forwarding quote requests
#[derive(Clone)]
pub struct EmailService {
    mailer: Mailer,
    from: String,
}

impl EmailService {
    /// Create a new email service from configuration
    pub fn new(config: &EmailConfig) -> anyhow::Result<Self> {
        let mailer = if config.smtp_username.is_empty() || config.smtp_password.is_empty() {
            tracing::info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                "SMTP credentials not configured, using unauthenticated connection (e.g., MailDev)"
            );
            SmtpTransport::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .build()
        } else {
            tracing::info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                from = %config.from_address,
                "Email service initialized with authentication and TLS"
            );

            // STARTTLS, as expected on port 587
            let creds =
                Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

            SmtpTransport::starttls_relay(&config.smtp_host)?
                .port(config.smtp_port)
                .credentials(creds)
                .build()
        };

        Ok(Self {
            mailer: Mailer::Smtp(mailer),
            from: config.from_address.clone(),
        })
    }

    /// Email service that records messages instead of sending them
    pub fn new_mock(config: &EmailConfig) -> Self {
        Self {
            mailer: Mailer::Stub(StubTransport::new_ok()),
            from: config.from_address.clone(),
        }
    }

    /// Email service whose every send fails
    pub fn new_failing(config: &EmailConfig) -> Self {
        Self {
            mailer: Mailer::Stub(StubTransport::new_error()),
            from: config.from_address.clone(),
        }
    }

    /// Messages recorded by a mock service, empty for a real one
    pub fn sent(&self) -> Vec<(Envelope, String)> {
        match &self.mailer {
            Mailer::Smtp(_) => vec![],
            Mailer::Stub(stub) => stub.messages(),
        }
    }

    #[tracing::instrument(skip_all, fields(to = tracing::field::Empty, subject = tracing::field::Empty))]
    pub async fn send_plain(
        &self,
        to: impl Into<String>,
        subject: impl Into<String>,
        plain: impl Into<String>,
    ) -> anyhow::Result<()> {
        let to = to.into();
        let subject = subject.into();
        let plain = plain.into();

        tracing::Span::current()
            .record("to", &to)
            .record("subject", &subject);

        tracing::info!("Sending email text plain");

        let message = Message::builder()
            .from(self.from.parse()?)
            .to(to.parse()?)
            .subject(subject)
            .header(header::ContentType::TEXT_PLAIN)
            .body(plain)?;

        let mailer = self.mailer.clone();
        tokio::task::spawn_blocking(move || match mailer {
            Mailer::Smtp(smtp) => smtp.send(&message).map(|_| ()).map_err(anyhow::Error::from),
            Mailer::Stub(stub) => stub.send(&message).map(|_| ()).map_err(anyhow::Error::from),
        })
        .await??;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_message() -> anyhow::Result<()> {
        let service = EmailService::new_mock(&EmailConfig::default());

        service
            .send_plain("quotes@earlybird.localhost", "Hello", "Body")
            .await?;

        let sent = service.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].0.to()[0].to_string(),
            "quotes@earlybird.localhost"
        );
        assert!(sent[0].1.contains("Subject: Hello"));

        Ok(())
    }

    #[tokio::test]
    async fn test_failing_service_errors() {
        let service = EmailService::new_failing(&EmailConfig::default());

        let result = service
            .send_plain("quotes@earlybird.localhost", "Hello", "Body")
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_invalid_recipient_errors() {
        let service = EmailService::new_mock(&EmailConfig::default());

        let result = service.send_plain("not an address", "Hello", "Body").await;

        assert!(result.is_err());
        assert!(service.sent().is_empty());
    }
}
