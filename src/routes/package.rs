use actix_web::{web, HttpResponse, Responder};
use futures::TryStreamExt;
use mongodb::{bson::doc, bson::oid::ObjectId, Client};
use serde::Deserialize;
use std::sync::Arc;

use crate::db::mongo::DB_NAME;
use crate::models::package::TravelPackage;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageQuery {
    pub search_term: Option<String>,
}

/*
    GET /api/packages
*/
pub async fn get_packages(
    data: web::Data<Arc<Client>>,
    params: web::Query<PackageQuery>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<TravelPackage> =
        client.database(DB_NAME).collection("Packages");

    let filter = match &params.search_term {
        Some(term) if !term.is_empty() => {
            let pattern = regex::escape(term);
            doc! {
                "$or": [
                    { "packageName": { "$regex": &pattern, "$options": "i" } },
                    { "destination": { "$regex": &pattern, "$options": "i" } },
                ]
            }
        }
        _ => doc! {},
    };

    match collection.find(filter).sort(doc! { "createdAt": -1 }).await {
        Ok(cursor) => match cursor.try_collect::<Vec<TravelPackage>>().await {
            Ok(packages) => HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "packages": packages,
            })),
            Err(err) => {
                eprintln!("Failed to collect packages: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to collect packages.")
            }
        },
        Err(err) => {
            eprintln!("Failed to find packages: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to find packages.")
        }
    }
}

/*
    GET /api/packages/{id}
*/
pub async fn get_package_by_id(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<TravelPackage> =
        client.database(DB_NAME).collection("Packages");

    let id = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid package ID"),
    };

    match collection.find_one(doc! { "_id": id }).await {
        Ok(Some(package)) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "package": package,
        })),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "success": false,
            "message": "Package Not Found!",
        })),
        Err(err) => {
            eprintln!("Failed to retrieve package: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve package")
        }
    }
}
