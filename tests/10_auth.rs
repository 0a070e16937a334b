mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let app = common::test_app().await?;

    let (status, body) = common::send(&app, common::get("/health")).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn registration_creates_an_account() -> Result<()> {
    let app = common::test_app().await?;

    let (status, body) = common::send(
        &app,
        common::json_request(
            "POST",
            "/register",
            None,
            &json!({ "login": "jkowalski", "password": "sekret123" }),
        ),
    )
    .await?;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Użytkownik zarejestrowany pomyślnie!");
    Ok(())
}

#[tokio::test]
async fn duplicate_login_returns_conflict_envelope() -> Result<()> {
    let app = common::test_app().await?;
    let credentials = json!({ "login": "jkowalski", "password": "sekret123" });

    let (status, _) =
        common::send(&app, common::json_request("POST", "/register", None, &credentials)).await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) =
        common::send(&app, common::json_request("POST", "/register", None, &credentials)).await?;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);
    assert_eq!(body["error"], "Conflict");
    assert!(body["timestamp"].is_string());
    Ok(())
}

#[tokio::test]
async fn registration_reports_field_errors_in_order() -> Result<()> {
    let app = common::test_app().await?;

    let (status, body) = common::send(
        &app,
        common::json_request(
            "POST",
            "/register",
            None,
            &json!({ "login": "ab", "password": "123" }),
        ),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let field_errors = body["fieldErrors"].as_array().expect("fieldErrors");
    assert_eq!(field_errors.len(), 2);
    assert_eq!(field_errors[0]["field"], "login");
    assert_eq!(field_errors[0]["code"], "INVALID_LENGTH");
    assert_eq!(field_errors[1]["field"], "password");
    assert_eq!(field_errors[1]["code"], "INVALID_LENGTH");
    Ok(())
}

#[tokio::test]
async fn registration_requires_both_fields() -> Result<()> {
    let app = common::test_app().await?;

    let (status, body) =
        common::send(&app, common::json_request("POST", "/register", None, &json!({}))).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let field_errors = body["fieldErrors"].as_array().expect("fieldErrors");
    assert_eq!(field_errors.len(), 2);
    assert_eq!(field_errors[0]["code"], "REQUIRED");
    assert_eq!(field_errors[1]["code"], "REQUIRED");
    Ok(())
}

#[tokio::test]
async fn login_returns_a_token_for_valid_credentials() -> Result<()> {
    let app = common::test_app().await?;

    let token = common::register_and_login(&app).await?;

    assert!(!token.is_empty());
    Ok(())
}

#[tokio::test]
async fn login_rejects_a_wrong_password() -> Result<()> {
    let app = common::test_app().await?;
    common::register_and_login(&app).await?;

    let (status, body) = common::send(
        &app,
        common::json_request(
            "POST",
            "/login",
            None,
            &json!({ "login": "tester", "password": "zlehaslo" }),
        ),
    )
    .await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
    assert_eq!(body["message"], "Nieprawidłowy login lub hasło");
    Ok(())
}

#[tokio::test]
async fn login_rejects_an_unknown_login() -> Result<()> {
    let app = common::test_app().await?;

    let (status, body) = common::send(
        &app,
        common::json_request(
            "POST",
            "/login",
            None,
            &json!({ "login": "niktaki", "password": "sekret123" }),
        ),
    )
    .await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Nieprawidłowy login lub hasło");
    Ok(())
}

#[tokio::test]
async fn login_requires_both_fields() -> Result<()> {
    let app = common::test_app().await?;

    let (status, body) = common::send(
        &app,
        common::json_request("POST", "/login", None, &json!({ "login": "tester" })),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let field_errors = body["fieldErrors"].as_array().expect("fieldErrors");
    assert_eq!(field_errors.len(), 1);
    assert_eq!(field_errors[0]["field"], "password");
    assert_eq!(field_errors[0]["code"], "REQUIRED");
    Ok(())
}
