#[macro_use]
extern crate rocket;

pub mod config;
pub mod db;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;

use crate::config::AppConfig;
use crate::services::booking_service::BookingService;
use crate::services::flight_service::FlightService;
use crate::services::itinerary_service::ItineraryService;
use crate::services::location_service::LocationService;
use crate::services::user_service::UserService;
use crate::store::{
    BookingRepository, FlightRepository, LocationRepository, MemoryStore, MySqlStore,
    UserRepository,
};
use crate::utils::error::AppError;
use crate::utils::swagger_doc::swagger_ui;
use rocket::fairing::AdHoc;
use rocket::{Build, Rocket};
use rocket_okapi::openapi_get_routes;
use rocket_okapi::swagger_ui::make_swagger_ui;
use sqlx::MySqlPool;
use std::sync::Arc;

/// Repository handles the services are built from.
#[derive(Clone)]
pub struct Stores {
    pub locations: Arc<dyn LocationRepository>,
    pub flights: Arc<dyn FlightRepository>,
    pub users: Arc<dyn UserRepository>,
    pub bookings: Arc<dyn BookingRepository>,
}

impl Stores {
    pub fn mysql(pool: MySqlPool) -> Self {
        Self::shared(Arc::new(MySqlStore::new(pool)))
    }

    pub fn memory() -> Self {
        Self::shared(Arc::new(MemoryStore::new()))
    }

    fn shared<S>(store: Arc<S>) -> Self
    where
        S: LocationRepository + FlightRepository + UserRepository + BookingRepository + 'static,
    {
        Stores {
            locations: store.clone(),
            flights: store.clone(),
            users: store.clone(),
            bookings: store,
        }
    }
}

#[catch(401)]
fn unauthorized() -> AppError {
    AppError::AuthError("Authentication required".into())
}

#[catch(404)]
fn not_found() -> AppError {
    AppError::NotFound("No such resource".into())
}

#[catch(422)]
fn unprocessable() -> AppError {
    AppError::Unprocessable("Malformed request body".into())
}

#[catch(400)]
fn bad_request() -> AppError {
    AppError::BadRequest("Malformed request".into())
}

pub fn build_rocket(config: &AppConfig, stores: Stores) -> Rocket<Build> {
    let user_service = UserService::new(stores.users.clone(), config.auth.clone());
    let location_service = LocationService::new(stores.locations.clone());
    let flight_service = FlightService::new(stores.flights.clone());
    let itinerary_service = ItineraryService::new(stores.flights.clone(), config.checkout.clone());
    let booking_service = BookingService::new(
        stores.bookings.clone(),
        stores.flights.clone(),
        config.checkout.clone(),
    );

    rocket::build()
        .manage(config.auth.clone())
        .manage(user_service)
        .manage(location_service)
        .manage(flight_service)
        .manage(itinerary_service)
        .manage(booking_service)
        .mount(
            "/api",
            openapi_get_routes![
                routes::user_route::register,
                routes::user_route::login,
                routes::user_route::me,
                routes::location_route::list_locations,
                routes::flight_route::search_flights,
                routes::flight_route::get_flight,
                routes::flight_route::submit_search,
                routes::itinerary_route::select_flight,
                routes::itinerary_route::quote,
                routes::itinerary_route::get_passenger_forms,
                routes::booking_route::create_booking,
                routes::booking_route::list_bookings,
                routes::booking_route::get_booking,
                routes::booking_route::confirm_booking,
                routes::booking_route::cancel_booking,
            ],
        )
        .mount("/swagger", make_swagger_ui(&swagger_ui()))
        .register("/", catchers![unauthorized, not_found, unprocessable, bad_request])
        .attach(AdHoc::on_response("CORS", |_, res| {
            Box::pin(async move {
                res.set_header(rocket::http::Header::new(
                    "Access-Control-Allow-Origin",
                    "*",
                ));
            })
        }))
}
