//! Shared setup for router tests

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use earlybird::{
    AppState, Config,
    config::{EmailConfig, LoggingConfig, ServerConfig},
    email::EmailService,
};
use earlybird_quote::{FormConfig, QuoteResponse};
use http_body_util::BodyExt;
use tower::ServiceExt;

pub fn test_config(public_dir: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5000,
            public_dir: public_dir.to_string(),
        },
        email: EmailConfig::default(),
        form: FormConfig::default(),
        logging: LoggingConfig::default(),
    }
}

pub struct TestApp {
    pub router: Router,
    pub email: EmailService,
}

pub fn create_test_app(email: EmailService) -> TestApp {
    create_test_app_serving("public", email)
}

pub fn create_test_app_serving(public_dir: &str, email: EmailService) -> TestApp {
    let state = AppState {
        config: test_config(public_dir),
        email: email.clone(),
    };

    TestApp {
        router: earlybird::routes::router(state),
        email,
    }
}

pub fn mock_app() -> TestApp {
    create_test_app(EmailService::new_mock(&EmailConfig::default()))
}

pub fn failing_app() -> TestApp {
    create_test_app(EmailService::new_failing(&EmailConfig::default()))
}

pub fn valid_form() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "Jane Doe"),
        ("phone", "(555) 123-4567"),
        ("email", "jane@example.com"),
        ("company", "Acme Nonprofit"),
        ("services[]", "Grant Writing"),
        ("services[]", "Strategic Planning"),
        ("project-details", "Need help with a federal grant."),
    ]
}

pub async fn post_quote(
    router: &Router,
    pairs: &[(&str, &str)],
) -> anyhow::Result<(StatusCode, QuoteResponse)> {
    let body = serde_urlencoded::to_string(pairs)?;

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/quote")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))?,
        )
        .await?;

    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();

    Ok((status, serde_json::from_slice(&bytes)?))
}

pub async fn get(router: &Router, uri: &str) -> anyhow::Result<(StatusCode, String)> {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty())?)
        .await?;

    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();

    Ok((status, String::from_utf8(bytes.to_vec())?))
}
