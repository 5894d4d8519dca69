use actix_web::{web, HttpRequest, HttpResponse, Responder};
use bson::DateTime;
use futures::TryStreamExt;
use mongodb::{bson::doc, bson::oid::ObjectId, Client};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use stripe::{EventObject, EventType, Webhook};

use crate::db::mongo::DB_NAME;
use crate::models::booking::{Booking, BookingStatus, Buyer};
use crate::models::package::TravelPackage;

#[derive(Clone)]
pub struct StripeConfig {
    pub webhook_secret: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPackageInput {
    pub package_id: String,
    pub buyer: Buyer,
    pub persons: u32,
    pub total_price: f64,
    pub date: String,
}

/*
    POST /api/bookings
*/
pub async fn book_package(
    data: web::Data<Arc<Client>>,
    input: web::Json<BookPackageInput>,
) -> impl Responder {
    let client = data.into_inner();
    let input = input.into_inner();

    if input.persons == 0 || input.total_price <= 0.0 || input.date.trim().is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "message": "All fields are required!",
        }));
    }

    let package_id = match ObjectId::parse_str(&input.package_id) {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "message": "Invalid package ID",
            }))
        }
    };

    // Only existing packages can be booked.
    let packages: mongodb::Collection<TravelPackage> =
        client.database(DB_NAME).collection("Packages");
    match packages.find_one(doc! { "_id": package_id }).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "success": false,
                "message": "Package Not Found!",
            }))
        }
        Err(err) => {
            eprintln!("Failed to look up package: {:?}", err);
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "message": "Server error",
            }));
        }
    }

    let booking = Booking {
        id: None,
        package_id,
        buyer: input.buyer,
        persons: input.persons,
        total_price: input.total_price,
        date: input.date,
        status: BookingStatus::Booked,
        payment_intent_id: None,
        created_at: Some(DateTime::now()),
    };

    let bookings: mongodb::Collection<Booking> = client.database(DB_NAME).collection("Bookings");
    match bookings.insert_one(&booking).await {
        Ok(result) => HttpResponse::Created().json(serde_json::json!({
            "success": true,
            "message": "Package Booked!",
            "bookingId": result.inserted_id.as_object_id().map(|id| id.to_hex()),
        })),
        Err(err) => {
            eprintln!("Failed to insert booking: {:?}", err);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "message": "Something went wrong!",
            }))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BookingQuery {
    pub email: Option<String>,
}

/*
    GET /api/bookings?email=
*/
pub async fn get_bookings(
    data: web::Data<Arc<Client>>,
    params: web::Query<BookingQuery>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Booking> =
        client.database(DB_NAME).collection("Bookings");

    let filter = match &params.email {
        Some(email) if !email.is_empty() => doc! { "buyer.email": email },
        _ => doc! {},
    };

    match collection.find(filter).sort(doc! { "createdAt": 1 }).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Booking>>().await {
            Ok(bookings) if bookings.is_empty() => HttpResponse::Ok().json(serde_json::json!({
                "success": false,
                "message": "No Bookings Available",
            })),
            Ok(bookings) => HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "bookings": bookings,
            })),
            Err(err) => {
                eprintln!("Failed to collect bookings: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to collect bookings.")
            }
        },
        Err(err) => {
            eprintln!("Failed to find bookings: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to find bookings.")
        }
    }
}

/*
    PUT /api/bookings/{id}/cancel
*/
pub async fn cancel_booking(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Booking> =
        client.database(DB_NAME).collection("Bookings");

    let id = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid booking ID"),
    };

    let update = doc! { "$set": { "status": "cancelled" } };
    match collection.update_one(doc! { "_id": id }, update).await {
        Ok(result) if result.matched_count == 0 => {
            HttpResponse::NotFound().json(serde_json::json!({
                "success": false,
                "message": "Booking not found",
            }))
        }
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": "Booking Cancelled!",
        })),
        Err(err) => {
            eprintln!("Failed to cancel booking: {:?}", err);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "message": "Something went wrong while cancelling booking!",
            }))
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentInput {
    pub booking_id: String,
}

/*
    POST /api/bookings/payment-intent

    The amount always comes from the stored booking, never the client.
*/
pub async fn create_payment_intent(
    data: web::Data<Arc<Client>>,
    stripe_client: web::Data<Arc<stripe::Client>>,
    input: web::Json<PaymentIntentInput>,
) -> impl Responder {
    println!("Creating payment intent...");

    let client = data.into_inner();
    let collection: mongodb::Collection<Booking> =
        client.database(DB_NAME).collection("Bookings");

    let booking_id = match ObjectId::parse_str(&input.booking_id) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid booking ID"),
    };

    let booking = match collection.find_one(doc! { "_id": booking_id }).await {
        Ok(Some(booking)) => booking,
        Ok(None) => return HttpResponse::NotFound().body("Booking not found"),
        Err(err) => {
            eprintln!("Failed to retrieve booking: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to retrieve booking");
        }
    };

    if booking.status == BookingStatus::Cancelled {
        return HttpResponse::BadRequest().body("Booking has been cancelled");
    }

    // Stripe takes the amount in the smallest currency unit (paise).
    let amount = (booking.total_price * 100.0).round() as i64;
    let mut create_intent = stripe::CreatePaymentIntent::new(amount, stripe::Currency::INR);
    create_intent.metadata = Some(HashMap::from([(
        "booking_id".to_string(),
        booking_id.to_hex(),
    )]));

    match stripe::PaymentIntent::create(stripe_client.as_ref(), create_intent).await {
        Ok(intent) => {
            let update = doc! { "$set": { "paymentIntentId": intent.id.as_str() } };
            if let Err(err) = collection.update_one(doc! { "_id": booking_id }, update).await {
                eprintln!("Failed to store payment intent id: {:?}", err);
            }
            HttpResponse::Ok().json(intent)
        }
        Err(e) => {
            eprintln!("Error creating payment intent: {:?}", e);
            HttpResponse::InternalServerError()
                .body(format!("Failed to create payment intent: {}", e))
        }
    }
}

/*
    POST /api/bookings/webhook
*/
pub async fn handle_stripe_webhook(
    req: HttpRequest,
    payload: web::Bytes,
    stripe_config: web::Data<StripeConfig>,
    data: web::Data<Arc<Client>>,
) -> impl Responder {
    let signature = match req.headers().get("stripe-signature") {
        Some(sig) => sig.to_str().unwrap_or(""),
        None => {
            return HttpResponse::BadRequest().body("Missing stripe-signature header");
        }
    };

    let payload_str = match String::from_utf8(payload.to_vec()) {
        Ok(s) => s,
        Err(_) => {
            return HttpResponse::BadRequest().body("Invalid payload encoding");
        }
    };

    let event =
        match Webhook::construct_event(&payload_str, signature, &stripe_config.webhook_secret) {
            Ok(event) => event,
            Err(e) => {
                eprintln!("Webhook error: {:?}", e);
                return HttpResponse::BadRequest().body(format!("Webhook error: {}", e));
            }
        };

    match event.type_ {
        EventType::PaymentIntentSucceeded => {
            if let EventObject::PaymentIntent(payment_intent) = event.data.object {
                if let Some(booking_id) = payment_intent
                    .metadata
                    .get("booking_id")
                    .and_then(|id| ObjectId::parse_str(id).ok())
                {
                    let collection: mongodb::Collection<Booking> =
                        data.database(DB_NAME).collection("Bookings");
                    let update = doc! { "$set": { "status": "paid" } };
                    match collection.update_one(doc! { "_id": booking_id }, update).await {
                        Ok(_) => println!("Booking {} marked as paid", booking_id.to_hex()),
                        Err(err) => eprintln!("Failed to mark booking paid: {:?}", err),
                    }
                }
                HttpResponse::Ok().json(serde_json::json!({ "received": true }))
            } else {
                HttpResponse::BadRequest().body("Invalid payment intent object")
            }
        }

        EventType::PaymentIntentPaymentFailed => {
            if let EventObject::PaymentIntent(payment_intent) = event.data.object {
                println!("Payment failed: {}", payment_intent.id);
                HttpResponse::Ok().json(serde_json::json!({ "received": true }))
            } else {
                HttpResponse::BadRequest().body("Invalid payment intent object")
            }
        }

        _ => {
            println!("Unhandled event type: {:?}", event.type_);
            HttpResponse::Ok().json(serde_json::json!({ "received": true }))
        }
    }
}
