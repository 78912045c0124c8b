use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::{
    DEFAULT_REQUEST_TIMEOUT, FormInput, QuoteResponse, QuoteTransport, Result, SubmissionError,
};

/// Posts the form to a quote endpoint as `application/x-www-form-urlencoded`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(endpoint: Url) -> Result<Self> {
        Self::with_timeout(endpoint, DEFAULT_REQUEST_TIMEOUT)
    }

    /// A backend that accepts the connection but never answers fails after `timeout`.
    pub fn with_timeout(endpoint: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub fn parse(endpoint: &str) -> Result<Self> {
        Self::new(Url::parse(endpoint)?)
    }
}

#[async_trait]
impl QuoteTransport for HttpTransport {
    #[tracing::instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn deliver(&self, input: &FormInput) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .form(&input.to_pairs())
            .send()
            .await?;

        let status = response.status();
        let body = response.json::<QuoteResponse>().await;

        match body {
            Ok(body) if status.is_success() && body.success => Ok(()),
            Ok(body) => Err(SubmissionError::Rejected {
                status: status.as_u16(),
                message: body.message,
            }),
            Err(err) if status.is_success() => Err(err.into()),
            Err(_) => Err(SubmissionError::Rejected {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_owned(),
            }),
        }
    }
}
