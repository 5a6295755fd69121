use crate::models::flight::{Flight, FlightSearchQuery, FlightSearchResponse, NewFlight};
use crate::store::FlightRepository;
use crate::utils::error::{AppError, AppResult};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;

pub struct FlightService {
    flights: Arc<dyn FlightRepository>,
}

impl FlightService {
    pub fn new(flights: Arc<dyn FlightRepository>) -> Self {
        FlightService { flights }
    }

    // Search flights around a route
    pub async fn search_flights(
        &self,
        search_query: FlightSearchQuery,
    ) -> AppResult<FlightSearchResponse> {
        let mut flights = self
            .flights
            .flights_touching(
                &search_query.origin,
                &search_query.destination,
                search_query.date,
            )
            .await?;

        if search_query.exact_first {
            sort_exact_route_first(&mut flights, &search_query.origin, &search_query.destination);
        }

        tracing::debug!(
            origin = %search_query.origin,
            destination = %search_query.destination,
            found = flights.len(),
            "flight search"
        );

        Ok(FlightSearchResponse { flights })
    }

    pub async fn get_flight(&self, id: i32) -> AppResult<Flight> {
        self.flights
            .get_flight(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Flight not found".into()))
    }

    pub async fn create_flight(&self, flight: NewFlight) -> AppResult<Flight> {
        if flight.arrival_at <= flight.departure_at {
            return Err(AppError::ValidationError(
                "Arrival must be after departure".into(),
            ));
        }
        if flight.origin_code.eq_ignore_ascii_case(&flight.destination_code) {
            return Err(AppError::ValidationError(
                "Origin and destination must differ".into(),
            ));
        }
        if flight.price_economy.is_sign_negative() || flight.price_business.is_sign_negative() {
            return Err(AppError::ValidationError("Fares cannot be negative".into()));
        }
        self.flights.insert_flight(&flight).await
    }

    /// A week of daily return services from Baku, for running without a database.
    pub async fn seed_demo_flights(&self, from: NaiveDate) -> AppResult<usize> {
        let routes = [
            ("J2-051", "GYD", "IST", 8, 185, 620),
            ("J2-052", "IST", "GYD", 14, 190, 640),
            ("J2-011", "GYD", "LHR", 9, 410, 1350),
            ("J2-012", "LHR", "GYD", 16, 395, 1320),
            ("J2-223", "GYD", "TBS", 7, 95, 260),
            ("J2-224", "TBS", "GYD", 12, 99, 270),
        ];

        let mut created = 0;
        for day in 0..7 {
            let date = from + Duration::days(day);
            for (number, origin, destination, hour, economy, business) in routes {
                let departure_at = Utc.from_utc_datetime(
                    &date
                        .and_hms_opt(hour, 0, 0)
                        .ok_or_else(|| AppError::ValidationError("Invalid departure hour".into()))?,
                );
                self.create_flight(NewFlight {
                    flight_number: number.to_string(),
                    departure_at,
                    arrival_at: departure_at + Duration::minutes(195),
                    price_economy: Decimal::from(economy),
                    price_business: Decimal::from(business),
                    origin_code: origin.to_string(),
                    destination_code: destination.to_string(),
                })
                .await?;
                created += 1;
            }
        }
        Ok(created)
    }
}

/// Moves flights serving exactly `origin -> destination` to the front, keeping relative order.
pub fn sort_exact_route_first(flights: &mut [Flight], origin: &str, destination: &str) {
    // sort_by_key is stable
    flights.sort_by_key(|f| !f.serves(origin, destination));
}
