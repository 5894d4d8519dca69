use actix_web::{web, HttpResponse, Responder};
use bson::DateTime;
use futures::TryStreamExt;
use mongodb::{bson::doc, bson::oid::ObjectId, Client};
use serde::Deserialize;
use std::sync::Arc;

use crate::db::mongo::DB_NAME;
use crate::models::custom_trip::{CustomTrip, TripStatus};
use crate::services::email_service::EmailService;

/*
    GET /api/custom-trips
*/
pub async fn get_custom_trips(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<CustomTrip> =
        client.database(DB_NAME).collection("CustomTrips");

    match collection.find(doc! {}).sort(doc! { "createdAt": -1 }).await {
        Ok(cursor) => match cursor.try_collect::<Vec<CustomTrip>>().await {
            Ok(trips) => HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "data": trips,
            })),
            Err(err) => {
                eprintln!("Failed to collect custom trips: {:?}", err);
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "success": false,
                    "message": "Server error",
                }))
            }
        },
        Err(err) => {
            eprintln!("Failed to find custom trips: {:?}", err);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "message": "Server error",
            }))
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewTripInput {
    pub status: Option<TripStatus>,
    pub admin_notes: Option<String>,
}

/*
    PUT /api/custom-trips/{id}
*/
pub async fn update_custom_trip(
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
    input: web::Json<ReviewTripInput>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<CustomTrip> =
        client.database(DB_NAME).collection("CustomTrips");

    let id = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "message": "Invalid trip ID",
            }))
        }
    };

    let mut trip = match collection.find_one(doc! { "_id": id }).await {
        Ok(Some(trip)) => trip,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "success": false,
                "message": "Custom trip not found",
            }))
        }
        Err(err) => {
            eprintln!("Failed to retrieve custom trip: {:?}", err);
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "message": "Server error",
            }));
        }
    };

    let input = input.into_inner();
    let old_status = trip.status.clone();
    if let Some(status) = input.status {
        trip.status = status;
    }
    if let Some(notes) = input.admin_notes {
        trip.admin_notes = Some(notes);
    }
    trip.updated_at = Some(DateTime::now());

    if let Err(err) = collection.replace_one(doc! { "_id": id }, &trip).await {
        eprintln!("Failed to update custom trip: {:?}", err);
        return HttpResponse::InternalServerError().json(serde_json::json!({
            "success": false,
            "message": "Server error",
        }));
    }

    // Notify the submitter on a status change. Email trouble is logged and
    // swallowed; the review itself already succeeded.
    if trip.status != old_status {
        if let Some(email) = trip.user_details.email.clone() {
            match EmailService::new() {
                Ok(service) => match service.send_trip_status_email(&trip, &email).await {
                    Ok(_) => println!("Status update email sent successfully"),
                    Err(err) => eprintln!("Error sending status update email: {}", err),
                },
                Err(err) => eprintln!("Failed to initialize email service: {}", err),
            }
        }
    }

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Custom trip updated successfully",
        "customTrip": trip,
    }))
}
