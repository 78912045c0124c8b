use axum::http::StatusCode;
use earlybird::{error::EMAIL_FAILURE_MESSAGE, routes::SENT_MESSAGE};
use earlybird_quote::{CORRECT_ERRORS_MESSAGE, QUOTE_EMAIL_SUBJECT};

mod helpers;

#[tokio::test]
async fn test_valid_quote_is_emailed() -> anyhow::Result<()> {
    let app = helpers::mock_app();

    let (status, body) = helpers::post_quote(&app.router, &helpers::valid_form()).await?;

    assert_eq!(status, StatusCode::OK);
    assert!(body.success);
    assert_eq!(body.message, SENT_MESSAGE);
    assert!(body.errors.is_empty());

    let sent = app.email.sent();
    assert_eq!(sent.len(), 1);

    let (envelope, message) = &sent[0];
    assert_eq!(envelope.to()[0].to_string(), "quotes@earlybird.localhost");
    assert!(message.contains(QUOTE_EMAIL_SUBJECT));
    assert!(message.contains("Name: Jane Doe"));
    assert!(message.contains("Company: Acme Nonprofit"));
    assert!(message.contains("Services Needed: Grant Writing, Strategic Planning"));

    Ok(())
}

#[tokio::test]
async fn test_missing_fields_are_rejected() -> anyhow::Result<()> {
    let app = helpers::mock_app();

    let (status, body) =
        helpers::post_quote(&app.router, &[("company", "Acme Nonprofit")]).await?;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(!body.success);
    assert_eq!(body.message, CORRECT_ERRORS_MESSAGE);
    assert_eq!(
        body.errors.get("name").map(String::as_str),
        Some("Name is required.")
    );
    assert!(body.errors.contains_key("phone"));
    assert!(body.errors.contains_key("email"));
    assert!(app.email.sent().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_malformed_email_is_rejected() -> anyhow::Result<()> {
    let app = helpers::mock_app();
    let mut form = helpers::valid_form();
    form[2] = ("email", "not-an-email");

    let (status, body) = helpers::post_quote(&app.router, &form).await?;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body.errors.len(), 1);
    assert!(body.errors.contains_key("email"));

    Ok(())
}

#[tokio::test]
async fn test_over_long_name_is_rejected() -> anyhow::Result<()> {
    let app = helpers::mock_app();
    let name = "x".repeat(101);
    let mut form: Vec<(&str, &str)> = helpers::valid_form();
    form[0] = ("name", &name);

    let (status, body) = helpers::post_quote(&app.router, &form).await?;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.errors.contains_key("name"));
    assert!(app.email.sent().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_email_failure_is_internal_error() -> anyhow::Result<()> {
    let app = helpers::failing_app();

    let (status, body) = helpers::post_quote(&app.router, &helpers::valid_form()).await?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.success);
    assert_eq!(body.message, EMAIL_FAILURE_MESSAGE);

    Ok(())
}

#[tokio::test]
async fn test_health() -> anyhow::Result<()> {
    let app = helpers::mock_app();

    let (status, body) = helpers::get(&app.router, "/health").await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&body)?,
        serde_json::json!({"status": "ok"})
    );

    Ok(())
}
