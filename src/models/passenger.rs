use crate::models::search::{PassengerCounts, PassengerType};
use crate::utils::error::{AppError, AppResult};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, EnumString, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DocumentType {
    Passport,
    IdCard,
}

/// One traveller as entered during checkout. Stored verbatim on the booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct Passenger {
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "surname is required"))]
    pub surname: String,
    pub gender: Gender,
    pub birth_date: NaiveDate,
    pub document_type: DocumentType,
    #[validate(length(min = 3, max = 32, message = "document number must be 3-32 characters"))]
    pub document_number: String,
    #[validate(length(min = 2, max = 64, message = "issuing country is required"))]
    pub issuing_country: String,
    pub document_expiry: NaiveDate,
    pub passenger_type: PassengerType,
}

// Empty slot the client fills in, one per counted traveller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct PassengerForm {
    pub index: u16,
    pub passenger_type: PassengerType,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct PassengerFormsResponse {
    pub forms: Vec<PassengerForm>,
}

/// Adults first, then children, then infants.
pub fn passenger_forms(counts: &PassengerCounts) -> Vec<PassengerForm> {
    let kinds = [
        (PassengerType::Adult, counts.adults),
        (PassengerType::Child, counts.children),
        (PassengerType::Infant, counts.infants),
    ];

    kinds
        .into_iter()
        .flat_map(|(kind, n)| std::iter::repeat(kind).take(n as usize))
        .enumerate()
        .map(|(index, passenger_type)| PassengerForm {
            index: index as u16,
            passenger_type,
        })
        .collect()
}

/// Checks that the submitted travellers are exactly the ones that were counted and priced.
pub fn check_passengers(counts: &PassengerCounts, passengers: &[Passenger]) -> AppResult<()> {
    counts.validate()?;

    if passengers.len() != counts.total() as usize {
        return Err(AppError::ValidationError(format!(
            "Expected {} passengers, got {}",
            counts.total(),
            passengers.len()
        )));
    }

    for kind in [PassengerType::Adult, PassengerType::Child, PassengerType::Infant] {
        let submitted = passengers.iter().filter(|p| p.passenger_type == kind).count();
        if submitted != counts.count(kind) as usize {
            return Err(AppError::ValidationError(format!(
                "Expected {} {} passengers, got {}",
                counts.count(kind),
                kind.to_string().to_lowercase(),
                submitted
            )));
        }
    }

    for passenger in passengers {
        passenger.validate()?;
        if passenger.document_expiry <= passenger.birth_date {
            return Err(AppError::ValidationError(format!(
                "Document of {} {} expires before birth date",
                passenger.name, passenger.surname
            )));
        }
    }

    Ok(())
}
