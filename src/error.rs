use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use earlybird_quote::{CORRECT_ERRORS_MESSAGE, QuoteResponse, ValidationResult};
use thiserror::Error;

pub const EMAIL_FAILURE_MESSAGE: &str =
    "Unable to send your quote request. Please try again later.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {} field(s) rejected", .0.len())]
    Validation(ValidationResult),

    #[error("Validation error: {0}")]
    Invalid(#[from] validator::ValidationErrors),

    #[error("Email error: {0}")]
    Email(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, body) = match self {
            AppError::Validation(result) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                QuoteResponse::invalid(CORRECT_ERRORS_MESSAGE, &result),
            ),
            AppError::Invalid(errors) => {
                let mut body = QuoteResponse::failed(CORRECT_ERRORS_MESSAGE);
                for (field, errors) in errors.field_errors() {
                    let Some(error) = errors.first() else {
                        continue;
                    };
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{field} is too long."));
                    body.errors.insert(field.to_string(), message);
                }
                (StatusCode::UNPROCESSABLE_ENTITY, body)
            }
            AppError::Email(e) => {
                tracing::error!("Email error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    QuoteResponse::failed(EMAIL_FAILURE_MESSAGE),
                )
            }
        };

        (status_code, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use earlybird_quote::{FormInput, validate};

    use super::*;

    #[test]
    fn test_validation_maps_to_unprocessable() {
        let result = validate(&FormInput::new());
        let response = AppError::Validation(result).into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_email_maps_to_internal_error() {
        let response = AppError::Email(anyhow::anyhow!("connection refused")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
