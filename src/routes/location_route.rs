use crate::models::location::LocationListResponse;
use crate::services::location_service::LocationService;
use crate::utils::error::AppError;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

/// List airports, optionally filtered by city, country or code
#[openapi(tag = "Locations")]
#[get("/locations?<search>")]
pub async fn list_locations(
    search: Option<String>,
    location_service: &State<LocationService>,
) -> Result<Json<LocationListResponse>, AppError> {
    let locations = location_service.list(search.as_deref()).await?;
    Ok(Json(LocationListResponse { locations }))
}
