use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use std::sync::Arc;

use travelmate_api::db;
use travelmate_api::routes;
use travelmate_api::routes::booking::StripeConfig;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Application starting...");

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    println!("Logger initialized");

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    } else {
        println!("Release mode");
    }

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);
    println!("Attempting to bind to {}:{}", host, port);

    let mongo_uri = std::env::var("MONGODB_URI").expect("MONGODB_URI must be set");
    println!("Got MongoDB URI, attempting connection...");
    let client = db::mongo::create_mongo_client(&mongo_uri).await;
    println!("MongoDB connection established");

    let stripe_secret = std::env::var("STRIPE_SECRET_KEY").unwrap_or_default();
    let stripe_client = Arc::new(stripe::Client::new(stripe_secret));
    let stripe_config = StripeConfig {
        webhook_secret: std::env::var("STRIPE_WEBHOOK_SECRET").unwrap_or_default(),
    };

    println!("Starting HTTP server...");

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_origin("http://localhost:5173")
            .allowed_origin("http://localhost:5174")
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        if let Ok(server_url) = std::env::var("SERVER_URL") {
            cors = cors.allowed_origin(&server_url);
        }

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .route("/health", web::get().to(|| async { "OK" }))
            .app_data(web::Data::new(client.clone()))
            .app_data(web::Data::new(stripe_client.clone()))
            .app_data(web::Data::new(stripe_config.clone()))
            .service(
                web::scope("/api")
                    .route("/health/db", web::get().to(routes::health::health_check))
                    .service(
                        web::scope("/chatbot")
                            .route(
                                "/generate-plan",
                                web::post().to(routes::chatbot::generate_plan),
                            )
                            .route("/submit-plan", web::post().to(routes::chatbot::submit_plan)),
                    )
                    .service(
                        web::scope("/custom-trips")
                            .route("", web::post().to(routes::chatbot::submit_plan))
                            .route("", web::get().to(routes::custom_trip::get_custom_trips))
                            .route(
                                "/{id}",
                                web::put().to(routes::custom_trip::update_custom_trip),
                            ),
                    )
                    .service(
                        web::scope("/packages")
                            .route("", web::get().to(routes::package::get_packages))
                            .route("/{id}", web::get().to(routes::package::get_package_by_id)),
                    )
                    .service(
                        web::scope("/bookings")
                            .route("", web::post().to(routes::booking::book_package))
                            .route("", web::get().to(routes::booking::get_bookings))
                            .route(
                                "/payment-intent",
                                web::post().to(routes::booking::create_payment_intent),
                            )
                            .route(
                                "/webhook",
                                web::post().to(routes::booking::handle_stripe_webhook),
                            )
                            .route(
                                "/{id}/cancel",
                                web::put().to(routes::booking::cancel_booking),
                            ),
                    )
                    .service(web::scope("/contact").route(
                        "/send-email",
                        web::post().to(routes::contact::send_contact_email),
                    )),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
