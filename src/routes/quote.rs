use axum::{
    Json,
    extract::{Form, State},
};
use earlybird_quote::{FormInput, QUOTE_EMAIL_SUBJECT, QuoteRequest, QuoteResponse, validate};
use validator::Validate;

use crate::{error::AppError, routes::AppState};

pub const SENT_MESSAGE: &str = "Quote request sent successfully.";

/// POST /quote - Validates a form-encoded quote request and forwards it by email
#[tracing::instrument(skip_all)]
pub async fn action(
    State(app_state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Json<QuoteResponse>, AppError> {
    let input = FormInput::from_pairs(pairs);

    let result = validate(&input);
    if !result.is_valid() {
        tracing::debug!(errors = result.len(), "quote request rejected");
        return Err(AppError::Validation(result));
    }

    let request = QuoteRequest::from(&input);
    request.validate()?;

    app_state
        .email
        .send_plain(
            &app_state.config.email.quote_address,
            QUOTE_EMAIL_SUBJECT,
            request.email_body(),
        )
        .await
        .map_err(AppError::Email)?;

    tracing::info!(services = request.services.len(), "quote request forwarded");

    Ok(Json(QuoteResponse::ok(SENT_MESSAGE)))
}
