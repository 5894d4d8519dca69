use serde::{Deserialize, Serialize};
use std::env;

use crate::models::custom_trip::{CustomTrip, TripStatus};

#[derive(Debug, Serialize, Deserialize)]
pub struct SendGridEmail {
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SendGridPersonalization {
    pub to: Vec<SendGridEmail>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SendGridContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SendGridRequest {
    pub personalizations: Vec<SendGridPersonalization>,
    pub from: SendGridEmail,
    pub subject: String,
    pub content: Vec<SendGridContent>,
}

#[derive(Debug)]
pub enum EmailError {
    EnvironmentError(String),
    RequestError(String),
    ApiError(String),
}

impl std::fmt::Display for EmailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmailError::EnvironmentError(err) => write!(f, "Environment error: {}", err),
            EmailError::RequestError(err) => write!(f, "Request error: {}", err),
            EmailError::ApiError(err) => write!(f, "API error: {}", err),
        }
    }
}

impl std::error::Error for EmailError {}

pub struct EmailService {
    api_key: String,
    from_email: String,
    client: reqwest::Client,
}

impl EmailService {
    pub fn new() -> Result<Self, EmailError> {
        let api_key = env::var("SENDGRID_API_KEY").map_err(|_| {
            EmailError::EnvironmentError("SENDGRID_API_KEY must be set".to_string())
        })?;
        let from_email = env::var("EMAIL_FROM")
            .map_err(|_| EmailError::EnvironmentError("EMAIL_FROM must be set".to_string()))?;

        Ok(Self {
            api_key,
            from_email,
            client: reqwest::Client::new(),
        })
    }

    async fn send(
        &self,
        to_email: &str,
        subject: &str,
        content_type: &str,
        content: &str,
    ) -> Result<(), EmailError> {
        let url = "https://api.sendgrid.com/v3/mail/send";

        let request = SendGridRequest {
            personalizations: vec![SendGridPersonalization {
                to: vec![SendGridEmail {
                    email: to_email.to_string(),
                }],
            }],
            from: SendGridEmail {
                email: self.from_email.clone(),
            },
            subject: subject.to_string(),
            content: vec![SendGridContent {
                content_type: content_type.to_string(),
                value: content.to_string(),
            }],
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| EmailError::RequestError(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(EmailError::ApiError(format!(
                "SendGrid error ({}): {}",
                status, text
            )));
        }

        Ok(())
    }

    pub async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        text_content: &str,
    ) -> Result<(), EmailError> {
        self.send(to_email, subject, "text/plain", text_content).await
    }

    pub async fn send_html_email(
        &self,
        to_email: &str,
        subject: &str,
        html_content: &str,
    ) -> Result<(), EmailError> {
        self.send(to_email, subject, "text/html", html_content).await
    }

    /// Status-change notification for a reviewed custom trip. Wording
    /// depends on whether the trip was approved.
    pub async fn send_trip_status_email(
        &self,
        trip: &CustomTrip,
        to_email: &str,
    ) -> Result<(), EmailError> {
        let (subject, message) = if trip.status == TripStatus::Approved {
            (
                "Your Custom Trip Plan Has Been Approved!",
                format!(
                    "Dear {},\n\nWe are pleased to inform you that your custom trip plan for {} \
                     has been approved! Our team will contact you shortly to discuss the next \
                     steps.\n\nBest regards,\nTravel Mate",
                    trip.user_details.name, trip.tour_plan.destination
                ),
            )
        } else {
            let notes = trip
                .admin_notes
                .as_deref()
                .map(|notes| format!("\n\nAdmin Notes: {}", notes))
                .unwrap_or_default();
            (
                "Update on Your Custom Trip Plan",
                format!(
                    "Dear {},\n\nWe regret to inform you that your custom trip plan for {} has \
                     been {}.{}\n\nIf you have any questions, please feel free to contact us.\n\n\
                     Best regards,\nTravel Mate",
                    trip.user_details.name, trip.tour_plan.destination, trip.status, notes
                ),
            )
        };

        self.send_email(to_email, subject, &message).await
    }

    /// Contact-form relay to the site inbox.
    pub async fn send_contact_email(
        &self,
        to_email: &str,
        name: &str,
        reply_to: &str,
        subject: &str,
        message: &str,
    ) -> Result<(), EmailError> {
        let full_subject = format!("New Contact Form Submission: {}", subject);
        let html = format!(
            r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #2B8A3E;">New Contact Form Submission</h2>
  <div style="background-color: #f9f9f9; padding: 20px; border-radius: 5px;">
    <p><strong>From:</strong> {name}</p>
    <p><strong>Email:</strong> {reply_to}</p>
    <p><strong>Subject:</strong> {subject}</p>
    <div style="margin-top: 20px;">
      <p><strong>Message:</strong></p>
      <p style="white-space: pre-wrap;">{message}</p>
    </div>
  </div>
  <p style="color: #666; font-size: 12px; margin-top: 20px;">
    This email was sent from your travel website's contact form.
  </p>
</div>"#
        );

        self.send_html_email(to_email, &full_subject, &html).await
    }
}
