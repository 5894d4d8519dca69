use actix_web::{web, HttpResponse, Responder};
use bson::DateTime;
use mongodb::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::db::mongo::DB_NAME;
use crate::models::custom_trip::{CustomTrip, TripStatus, UserDetails};
use crate::models::tour_plan::TourPlan;
use crate::services::ai_plan_service::AiPlanService;
use crate::services::{fallback_plan, travel_info};

const CLARIFICATION_MESSAGE: &str = "I'd need a bit more information to create your tour plan. \
     Could you please specify your destination, how many days you'll be traveling, number of \
     people, and your budget?";
const PLAN_READY_MESSAGE: &str = "Here's a custom tour plan based on your preferences:";
const FALLBACK_PLAN_MESSAGE: &str =
    "Here's a custom tour plan based on your preferences (simplified version):";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePlanInput {
    pub user_prompt: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tour_plan: Option<TourPlan>,
}

/*
    POST /api/chatbot/generate-plan
*/
pub async fn generate_plan(input: web::Json<GeneratePlanInput>) -> impl Responder {
    let user_prompt = match input
        .into_inner()
        .user_prompt
        .filter(|prompt| !prompt.trim().is_empty())
    {
        Some(prompt) => prompt,
        None => {
            return HttpResponse::BadRequest().json(PlanResponse {
                message: "Please provide a prompt for the travel plan.".to_string(),
                tour_plan: None,
            })
        }
    };

    let info = travel_info::extract_travel_info(&user_prompt);
    println!("Extracted travel info: {:?}", info);

    // The one hard gate in the flow: without a destination there is nothing
    // to plan, so ask the user instead of guessing.
    if !info.is_actionable() {
        return HttpResponse::Ok().json(PlanResponse {
            message: CLARIFICATION_MESSAGE.to_string(),
            tour_plan: None,
        });
    }

    let ai_result = match AiPlanService::new() {
        Ok(service) => service.generate_tour_plan(&info).await,
        Err(err) => Err(err),
    };

    match ai_result {
        Ok(tour_plan) => HttpResponse::Ok().json(PlanResponse {
            message: PLAN_READY_MESSAGE.to_string(),
            tour_plan: Some(tour_plan),
        }),
        Err(err) => {
            eprintln!("AI processing error: {}", err);
            let tour_plan = fallback_plan::generate_fallback_plan(&info);
            HttpResponse::Ok().json(PlanResponse {
                message: FALLBACK_PLAN_MESSAGE.to_string(),
                tour_plan: Some(tour_plan),
            })
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPlanInput {
    pub tour_plan: TourPlan,
    pub user_details: Option<UserDetails>,
}

/*
    POST /api/chatbot/submit-plan
    POST /api/custom-trips
*/
pub async fn submit_plan(
    data: web::Data<Arc<Client>>,
    input: web::Json<SubmitPlanInput>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<CustomTrip> =
        client.database(DB_NAME).collection("CustomTrips");

    let input = input.into_inner();
    let trip = CustomTrip {
        id: None,
        tour_plan: input.tour_plan,
        user_details: input.user_details.unwrap_or_default(),
        status: TripStatus::Pending,
        admin_notes: None,
        created_at: DateTime::now(),
        updated_at: None,
    };

    match collection.insert_one(&trip).await {
        Ok(result) => HttpResponse::Created().json(serde_json::json!({
            "message": "Custom trip request submitted successfully",
            "tripId": result.inserted_id.as_object_id().map(|id| id.to_hex()),
        })),
        Err(err) => {
            eprintln!("Failed to insert custom trip: {:?}", err);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to submit tour plan",
            }))
        }
    }
}
