use crate::models::flight::{Flight, FlightRow};
use crate::models::passenger::Passenger;
use crate::models::pricing::AddOns;
use crate::models::search::{CabinClass, PassengerCounts};
use crate::utils::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    // pending -> confirmed, pending | confirmed -> cancelled
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Pending, BookingStatus::Confirmed)
                | (BookingStatus::Pending, BookingStatus::Cancelled)
                | (BookingStatus::Confirmed, BookingStatus::Cancelled)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Leg {
    Outbound,
    Inbound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct ContactInfo {
    #[validate(email(message = "contact email is not valid"))]
    pub email: String,
    #[validate(length(min = 5, max = 32, message = "contact phone must be 5-32 characters"))]
    pub phone: String,
}

/// Reservation for one leg of an itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct Booking {
    pub id: i32,
    pub document_id: String,
    pub reference: String,
    pub itinerary_id: String,
    pub leg: Leg,
    pub flight: Flight,
    pub passengers: Vec<Passenger>,
    pub contact: ContactInfo,
    pub cabin_class: CabinClass,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

// Booking row joined with its flight; enums and passengers are stored as text
#[derive(Debug, sqlx::FromRow)]
pub struct BookingRow {
    pub booking_id: i32,
    pub document_id: String,
    pub reference: String,
    pub itinerary_id: String,
    pub leg: String,
    pub passengers: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub cabin_class: String,
    pub total_price: Decimal,
    pub status: String,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    #[sqlx(flatten)]
    pub flight: FlightRow,
}

impl TryFrom<BookingRow> for Booking {
    type Error = AppError;

    fn try_from(row: BookingRow) -> AppResult<Self> {
        Ok(Booking {
            id: row.booking_id,
            document_id: row.document_id,
            reference: row.reference,
            itinerary_id: row.itinerary_id,
            leg: parse_stored("leg", &row.leg)?,
            flight: row.flight.into(),
            passengers: serde_json::from_str(&row.passengers)?,
            contact: ContactInfo {
                email: row.contact_email,
                phone: row.contact_phone,
            },
            cabin_class: parse_stored("cabin_class", &row.cabin_class)?,
            total_price: row.total_price,
            status: parse_stored("status", &row.status)?,
            user_id: row.user_id,
            created_at: row.created_at,
        })
    }
}

fn parse_stored<T: std::str::FromStr>(column: &str, value: &str) -> AppResult<T> {
    value
        .parse()
        .map_err(|_| AppError::DatabaseError(format!("Unexpected {} value: {}", column, value)))
}

// One leg to insert; all legs of an itinerary go in together
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub document_id: String,
    pub reference: String,
    pub itinerary_id: String,
    pub leg: Leg,
    pub flight_id: i32,
    pub passengers: Vec<Passenger>,
    pub contact: ContactInfo,
    pub cabin_class: CabinClass,
    pub total_price: Decimal,
    pub user_id: i32,
}

/// Short code printed on confirmations, e.g. `K7Q2ZD`.
pub fn generate_reference() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(|c| (c as char).to_ascii_uppercase())
        .collect()
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct BookingRequest {
    pub outbound_id: i32,
    pub inbound_id: Option<i32>,
    #[serde(default)]
    pub cabin_class: CabinClass,
    pub counts: PassengerCounts,
    pub passengers: Vec<Passenger>,
    #[validate(nested)]
    pub contact: ContactInfo,
    #[serde(default)]
    pub add_ons: AddOns,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ItineraryResponse {
    pub itinerary_id: String,
    pub bookings: Vec<Booking>,
    pub total_price: Decimal,
    pub next: String,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct BookingListResponse {
    pub bookings: Vec<Booking>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct BookingStatusResponse {
    pub booking: Booking,
    pub next: String,
}

/// Card details for the simulated payment step. Nothing is charged or stored.
#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct PaymentRequest {
    #[validate(custom(function = "validate_card_number"))]
    pub card_number: String,
    #[validate(custom(function = "validate_expiry"))]
    pub expiry: String,
    #[validate(
        length(equal = 3, message = "CVC must be 3 digits"),
        custom(function = "validate_cvc")
    )]
    pub cvc: String,
}

fn card_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

// 13-16 digits, spaces between groups allowed
fn validate_card_number(card_number: &str) -> Result<(), ValidationError> {
    let digits: Vec<char> = card_number.chars().filter(|c| !c.is_whitespace()).collect();
    if (13..=16).contains(&digits.len()) && digits.iter().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(card_error("card_number", "Card number must be 13-16 digits"))
    }
}

// MM/YY with a real month
fn validate_expiry(expiry: &str) -> Result<(), ValidationError> {
    let month = expiry
        .split_once('/')
        .filter(|(mm, yy)| {
            mm.len() == 2 && yy.len() == 2 && yy.chars().all(|c| c.is_ascii_digit())
        })
        .and_then(|(mm, _)| mm.parse::<u8>().ok());
    match month {
        Some(1..=12) => Ok(()),
        _ => Err(card_error("expiry", "Card expiry must be MM/YY")),
    }
}

fn validate_cvc(cvc: &str) -> Result<(), ValidationError> {
    if cvc.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(card_error("cvc", "CVC must be 3 digits"))
    }
}
