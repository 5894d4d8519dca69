use actix_web::{web, HttpResponse, Responder};
use mongodb::{bson::doc, Client};
use serde::Serialize;
use std::collections::HashMap;
use std::env;
use std::sync::Arc;

use crate::db::mongo::DB_NAME;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(client: web::Data<Arc<Client>>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let mongo_result = check_mongodb(&client).await;
    health
        .services
        .insert("mongodb".to_string(), mongo_result.clone());

    let stripe_result = check_key("STRIPE_SECRET_KEY", "Stripe");
    health
        .services
        .insert("stripe".to_string(), stripe_result.clone());

    let sendgrid_result = check_key("SENDGRID_API_KEY", "SendGrid");
    health
        .services
        .insert("sendgrid".to_string(), sendgrid_result.clone());

    let openrouter_result = check_key("OPENROUTER_API_KEY", "OpenRouter");
    health
        .services
        .insert("openrouter".to_string(), openrouter_result.clone());

    // Any failing service degrades the overall status.
    if mongo_result.status != "ok"
        || stripe_result.status != "ok"
        || sendgrid_result.status != "ok"
        || openrouter_result.status != "ok"
    {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

async fn check_mongodb(client: &web::Data<Arc<Client>>) -> ServiceStatus {
    match client.database(DB_NAME).run_command(doc! {"ping": 1}).await {
        Ok(_) => ServiceStatus {
            status: "ok".to_string(),
            details: Some("Connected successfully to MongoDB".to_string()),
        },
        Err(e) => {
            eprintln!("MongoDB health check failed: {}", e);

            ServiceStatus {
                status: "error".to_string(),
                details: Some(format!("Failed to connect: {}", e)),
            }
        }
    }
}

// Key presence only; a full check would make a test API call.
fn check_key(var: &str, label: &str) -> ServiceStatus {
    match env::var(var) {
        Ok(key) => {
            let masked_key = if key.len() > 8 {
                format!("{}***{}", &key[0..4], &key[key.len() - 4..])
            } else {
                "***".to_string()
            };

            ServiceStatus {
                status: "ok".to_string(),
                details: Some(format!("{} API key configured ({})", label, masked_key)),
            }
        }
        Err(_) => ServiceStatus {
            status: "error".to_string(),
            details: Some(format!("{} not configured", var)),
        },
    }
}
