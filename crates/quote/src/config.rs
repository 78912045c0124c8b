use std::time::Duration;

use serde::Deserialize;

use crate::{
    DEFAULT_NOTIFICATION_TTL, DEFAULT_REQUEST_TIMEOUT, DEFAULT_SUBMIT_DELAY, QuoteTransport,
    SimulatedTransport,
};

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct FormConfig {
    /// Round-trip of the simulated transport.
    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,
    #[serde(default = "default_notification_ttl_ms")]
    pub notification_ttl_ms: u64,
    /// Upper bound on one round-trip to the quote endpoint.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Quote endpoint. Submissions are simulated when unset.
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: default_submit_delay_ms(),
            notification_ttl_ms: default_notification_ttl_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            endpoint: None,
        }
    }
}

fn default_submit_delay_ms() -> u64 {
    DEFAULT_SUBMIT_DELAY.as_millis() as u64
}

fn default_notification_ttl_ms() -> u64 {
    DEFAULT_NOTIFICATION_TTL.as_millis() as u64
}

fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_millis() as u64
}

impl FormConfig {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn transport(&self) -> crate::Result<Box<dyn QuoteTransport>> {
        match &self.endpoint {
            Some(endpoint) => http_transport(endpoint, self.request_timeout()),
            None => Ok(Box::new(SimulatedTransport::new(self.submit_delay()))),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.notification_ttl_ms == 0 {
            return Err("Notification TTL must be greater than 0".to_string());
        }
        if self.request_timeout_ms == 0 {
            return Err("Request timeout must be greater than 0".to_string());
        }
        if let Some(endpoint) = &self.endpoint {
            url::Url::parse(endpoint).map_err(|e| format!("Invalid quote endpoint: {e}"))?;
        }
        Ok(())
    }
}

#[cfg(feature = "full")]
fn http_transport(endpoint: &str, timeout: Duration) -> crate::Result<Box<dyn QuoteTransport>> {
    let endpoint = url::Url::parse(endpoint)?;

    Ok(Box::new(crate::HttpTransport::with_timeout(endpoint, timeout)?))
}

#[cfg(not(feature = "full"))]
fn http_transport(endpoint: &str, _timeout: Duration) -> crate::Result<Box<dyn QuoteTransport>> {
    url::Url::parse(endpoint)?;
    tracing::warn!(endpoint, "built without HTTP support, submissions are simulated");
    Ok(Box::new(SimulatedTransport::default()))
}
