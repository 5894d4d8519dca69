use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use crate::services::email_service::EmailService;

#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub to: Option<String>,
}

/*
    POST /api/contact/send-email
*/
pub async fn send_contact_email(input: web::Json<ContactForm>) -> impl Responder {
    let input = input.into_inner();

    let filled = |field: &Option<String>| {
        field
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    let (name, email, subject, message, to) = match (
        filled(&input.name),
        filled(&input.email),
        filled(&input.subject),
        filled(&input.message),
        filled(&input.to),
    ) {
        (Some(name), Some(email), Some(subject), Some(message), Some(to)) => {
            (name, email, subject, message, to)
        }
        _ => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "message": "Please provide all required fields",
            }))
        }
    };

    let service = match EmailService::new() {
        Ok(service) => service,
        Err(err) => {
            eprintln!("Failed to initialize email service: {}", err);
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "message": "Email service is not configured",
            }));
        }
    };

    match service
        .send_contact_email(&to, &name, &email, &subject, &message)
        .await
    {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": "Email sent successfully",
        })),
        Err(err) => {
            eprintln!("Error sending contact email: {}", err);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "message": "Failed to send email",
            }))
        }
    }
}
