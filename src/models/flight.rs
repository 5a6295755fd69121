use crate::models::location::Location;
use crate::models::search::CabinClass;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Flight {
    pub id: i32,
    pub flight_number: String,
    pub departure_at: DateTime<Utc>,
    pub arrival_at: DateTime<Utc>,
    pub price_economy: Decimal,
    pub price_business: Decimal,
    pub origin: Location,
    pub destination: Location,
}

impl Flight {
    pub fn fare(&self, class: CabinClass) -> Decimal {
        match class {
            CabinClass::Economy => self.price_economy,
            CabinClass::Business => self.price_business,
        }
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.arrival_at - self.departure_at).num_minutes()
    }

    pub fn serves(&self, origin: &str, destination: &str) -> bool {
        self.origin.code.eq_ignore_ascii_case(origin)
            && self.destination.code.eq_ignore_ascii_case(destination)
    }
}

// Flight row joined with its two locations
#[derive(Debug, sqlx::FromRow)]
pub struct FlightRow {
    pub id: i32,
    pub flight_number: String,
    pub departure_at: DateTime<Utc>,
    pub arrival_at: DateTime<Utc>,
    pub price_economy: Decimal,
    pub price_business: Decimal,
    pub origin_id: i32,
    pub origin_city: String,
    pub origin_country: String,
    pub origin_code: String,
    pub destination_id: i32,
    pub destination_city: String,
    pub destination_country: String,
    pub destination_code: String,
}

impl From<FlightRow> for Flight {
    fn from(row: FlightRow) -> Self {
        Flight {
            id: row.id,
            flight_number: row.flight_number,
            departure_at: row.departure_at,
            arrival_at: row.arrival_at,
            price_economy: row.price_economy,
            price_business: row.price_business,
            origin: Location {
                id: row.origin_id,
                city: row.origin_city,
                country: row.origin_country,
                code: row.origin_code,
            },
            destination: Location {
                id: row.destination_id,
                city: row.destination_city,
                country: row.destination_country,
                code: row.destination_code,
            },
        }
    }
}

// Administrator-side flight record, locations referenced by code
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct NewFlight {
    pub flight_number: String,
    pub departure_at: DateTime<Utc>,
    pub arrival_at: DateTime<Utc>,
    pub price_economy: Decimal,
    pub price_business: Decimal,
    pub origin_code: String,
    pub destination_code: String,
}

#[derive(Debug, Clone)]
pub struct FlightSearchQuery {
    pub origin: String,
    pub destination: String,
    pub date: Option<NaiveDate>,
    pub exact_first: bool,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct FlightSearchResponse {
    pub flights: Vec<Flight>,
}
