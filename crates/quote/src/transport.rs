use std::time::Duration;

use async_trait::async_trait;

use crate::{FormInput, Result};

pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(2000);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[async_trait]
pub trait QuoteTransport: Send + Sync {
    async fn deliver(&self, input: &FormInput) -> Result<()>;
}

/// Stand-in for a backend: waits out a round-trip and always succeeds.
#[derive(Debug, Clone)]
pub struct SimulatedTransport {
    delay: Duration,
}

impl SimulatedTransport {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_DELAY)
    }
}

#[async_trait]
impl QuoteTransport for SimulatedTransport {
    async fn deliver(&self, input: &FormInput) -> Result<()> {
        tokio::time::sleep(self.delay).await;
        tracing::info!(payload = ?input.to_pairs(), "Form submitted");

        Ok(())
    }
}
