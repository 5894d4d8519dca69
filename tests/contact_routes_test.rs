use actix_web::{test, web, App};
use serde_json::json;
use serial_test::serial;

use travelmate_api::routes;

fn contact_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().route(
        "/api/contact/send-email",
        web::post().to(routes::contact::send_contact_email),
    )
}

#[actix_rt::test]
#[serial]
async fn test_contact_missing_fields() {
    let app = test::init_service(contact_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/contact/send-email")
        .set_json(&json!({
            "name": "Test User",
            "email": "test@example.com"
            // Missing subject, message, to
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Please provide all required fields");
}

#[actix_rt::test]
#[serial]
async fn test_contact_blank_fields_rejected() {
    let app = test::init_service(contact_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/contact/send-email")
        .set_json(&json!({
            "name": "Test User",
            "email": "test@example.com",
            "subject": "   ",
            "message": "Hello",
            "to": "inbox@example.com"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
#[serial]
async fn test_contact_unconfigured_email_service() {
    std::env::remove_var("SENDGRID_API_KEY");
    std::env::remove_var("EMAIL_FROM");

    let app = test::init_service(contact_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/contact/send-email")
        .set_json(&json!({
            "name": "Test User",
            "email": "test@example.com",
            "subject": "Trip query",
            "message": "Do you arrange group tours?",
            "to": "inbox@example.com"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}
