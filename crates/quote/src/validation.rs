use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use strum::{Display, IntoStaticStr};

use crate::input::{EMAIL, FormInput, NAME, PHONE};

static RE_PHONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\d\s\-()+.]+$").unwrap());
static RE_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, IntoStaticStr)]
pub enum ErrorKind {
    MissingField,
    FormatError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub kind: ErrorKind,
    pub message: &'static str,
}

impl FieldError {
    fn missing(message: &'static str) -> Self {
        Self {
            kind: ErrorKind::MissingField,
            message,
        }
    }

    fn format(message: &'static str) -> Self {
        Self {
            kind: ErrorKind::FormatError,
            message,
        }
    }
}

/// Field errors in form order. Empty means the input is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<(&'static str, FieldError)>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.errors
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, error)| error)
    }

    pub fn first_field(&self) -> Option<&'static str> {
        self.errors.first().map(|(name, _)| *name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldError)> {
        self.errors.iter().map(|(name, error)| (*name, error))
    }

    fn push(&mut self, field: &'static str, error: FieldError) {
        self.errors.push((field, error));
    }
}

impl From<ValidationResult> for validator::ValidationErrors {
    fn from(value: ValidationResult) -> Self {
        let mut errors = validator::ValidationErrors::new();
        for (field, error) in value.errors {
            errors.add(
                field,
                validator::ValidationError::new(error.kind.into())
                    .with_message(error.message.into()),
            );
        }
        errors
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn validate(input: &FormInput) -> ValidationResult {
    let mut result = ValidationResult::default();

    if is_blank(input.text(NAME)) {
        result.push(NAME, FieldError::missing("Name is required."));
    }

    let phone = input.text(PHONE);
    if is_blank(phone) {
        result.push(PHONE, FieldError::missing("Phone number is required."));
    } else if !RE_PHONE.is_match(phone) {
        result.push(PHONE, FieldError::format("Please enter a valid phone number."));
    }

    let email = input.text(EMAIL);
    if is_blank(email) {
        result.push(EMAIL, FieldError::missing("Email address is required."));
    } else if !RE_EMAIL.is_match(email) {
        result.push(EMAIL, FieldError::format("Please enter a valid email address."));
    }

    result
}
