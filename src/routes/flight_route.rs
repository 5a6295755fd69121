use crate::models::flight::{Flight, FlightSearchQuery, FlightSearchResponse};
use crate::models::search::{SearchForm, SearchResponse};
use crate::routes::query_param;
use crate::services::flight_service::FlightService;
use crate::utils::error::AppError;
use chrono::NaiveDate;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

/// Search flights
#[openapi(tag = "Flights")]
#[get("/flights?<from>&<to>&<date>&<exact_first>")]
pub async fn search_flights(
    from: String,
    to: String,
    date: Option<String>,
    exact_first: Option<String>,
    flight_service: &State<FlightService>,
) -> Result<Json<FlightSearchResponse>, AppError> {
    let date = match date {
        Some(date) => Some(
            NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .map_err(|_| AppError::BadRequest("Invalid date format".into()))?,
        ),
        None => None,
    };

    let query = FlightSearchQuery {
        origin: from.trim().to_uppercase(),
        destination: to.trim().to_uppercase(),
        date,
        exact_first: query_param("exact_first", exact_first.as_deref())?.unwrap_or(true),
    };
    let flights = flight_service.search_flights(query).await?;
    Ok(Json(flights))
}

/// Get one flight
#[openapi(tag = "Flights")]
#[get("/flights/<id>")]
pub async fn get_flight(
    id: i32,
    flight_service: &State<FlightService>,
) -> Result<Json<Flight>, AppError> {
    let flight = flight_service.get_flight(id).await?;
    Ok(Json(flight))
}

/// Validate the search form and get the results page link
#[openapi(tag = "Flights")]
#[post("/search", format = "json", data = "<form>")]
pub async fn submit_search(form: Json<SearchForm>) -> Result<Json<SearchResponse>, AppError> {
    let today = chrono::Utc::now().date_naive();
    let params = form.into_inner().validate(today)?;
    let next = params.href()?;
    Ok(Json(SearchResponse { params, next }))
}
