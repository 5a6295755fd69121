use crate::models::itinerary::{QuoteQuery, SelectionRequest, SelectionResponse};
use crate::models::passenger::{passenger_forms, PassengerFormsResponse};
use crate::models::pricing::{AddOns, PriceQuote};
use crate::models::search::{CabinClass, PassengerCounts};
use crate::routes::query_param;
use crate::services::itinerary_service::ItineraryService;
use crate::utils::error::AppError;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

/// Pick the outbound or return flight
#[openapi(tag = "Itineraries")]
#[post("/itineraries/select", format = "json", data = "<request>")]
pub async fn select_flight(
    request: Json<SelectionRequest>,
    itinerary_service: &State<ItineraryService>,
) -> Result<Json<SelectionResponse>, AppError> {
    let response = itinerary_service.select_flight(request.into_inner()).await?;
    Ok(Json(response))
}

/// Price an itinerary for the searched passengers
#[openapi(tag = "Itineraries")]
#[get("/itineraries/quote?<outbound_id>&<inbound_id>&<adults>&<children>&<infants>&<class>&<fare_lock>&<disruption_assistance>")]
pub async fn quote(
    outbound_id: i32,
    inbound_id: Option<String>,
    adults: Option<String>,
    children: Option<String>,
    infants: Option<String>,
    class: Option<String>,
    fare_lock: Option<String>,
    disruption_assistance: Option<String>,
    itinerary_service: &State<ItineraryService>,
) -> Result<Json<PriceQuote>, AppError> {
    let query = QuoteQuery {
        outbound_id,
        inbound_id: query_param("inbound_id", inbound_id.as_deref())?,
        class: CabinClass::from_param(class.as_deref()),
        passengers: counts_from_query(adults, children, infants)?,
        add_ons: AddOns {
            fare_lock: query_param("fare_lock", fare_lock.as_deref())?.unwrap_or(false),
            disruption_assistance: query_param(
                "disruption_assistance",
                disruption_assistance.as_deref(),
            )?
            .unwrap_or(false),
        },
    };
    let quote = itinerary_service.quote(query).await?;
    Ok(Json(quote))
}

fn counts_from_query(
    adults: Option<String>,
    children: Option<String>,
    infants: Option<String>,
) -> Result<PassengerCounts, AppError> {
    Ok(PassengerCounts {
        adults: query_param("adults", adults.as_deref())?.unwrap_or(1),
        children: query_param("children", children.as_deref())?.unwrap_or(0),
        infants: query_param("infants", infants.as_deref())?.unwrap_or(0),
    })
}

/// Empty passenger forms, one per counted traveller
#[openapi(tag = "Itineraries")]
#[get("/itineraries/passenger-forms?<adults>&<children>&<infants>")]
pub async fn get_passenger_forms(
    adults: Option<String>,
    children: Option<String>,
    infants: Option<String>,
) -> Result<Json<PassengerFormsResponse>, AppError> {
    let counts = counts_from_query(adults, children, infants)?;
    counts.validate()?;
    Ok(Json(PassengerFormsResponse {
        forms: passenger_forms(&counts),
    }))
}
