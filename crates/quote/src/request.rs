use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    FormInput, ValidationResult,
    input::{COMPANY, EMAIL, NAME, PHONE, PROJECT_DETAILS, SERVICES},
};

pub const QUOTE_EMAIL_SUBJECT: &str = "New Quote Request from Earlybird Strategies Website";

/// Quote request as forwarded to the business inbox.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Validate)]
pub struct QuoteRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 40))]
    pub phone: String,
    #[validate(length(max = 254))]
    pub email: String,
    #[validate(length(max = 200))]
    pub company: String,
    pub services: Vec<String>,
    #[validate(length(max = 5000))]
    pub details: String,
}

impl From<&FormInput> for QuoteRequest {
    fn from(input: &FormInput) -> Self {
        Self {
            name: input.text(NAME).trim().to_owned(),
            phone: input.text(PHONE).trim().to_owned(),
            email: input.text(EMAIL).trim().to_owned(),
            company: input.text(COMPANY).trim().to_owned(),
            services: input
                .list(SERVICES)
                .into_iter()
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
            details: input.text(PROJECT_DETAILS).trim().to_owned(),
        }
    }
}

impl QuoteRequest {
    pub fn email_body(&self) -> String {
        format!(
            r#"
Name: {}
Phone: {}
Email: {}
Company: {}
Services Needed: {}
Project Details: {}
"#,
            self.name,
            self.phone,
            self.email,
            self.company,
            self.services.join(", "),
            self.details
        )
    }
}

/// JSON body returned by the quote endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, String>,
}

impl QuoteResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            errors: BTreeMap::new(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: BTreeMap::new(),
        }
    }

    pub fn invalid(message: impl Into<String>, result: &ValidationResult) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: result
                .iter()
                .map(|(field, error)| (field.to_owned(), error.message.to_owned()))
                .collect(),
        }
    }
}
