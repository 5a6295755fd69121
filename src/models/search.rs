use crate::models::navigation::ClientRoute;
use crate::utils::error::{AppError, AppResult};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub const MAX_PASSENGERS: u8 = 9;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, EnumString, Display, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum CabinClass {
    #[default]
    Economy,
    Business,
}

impl CabinClass {
    // Missing or unrecognised classes fall back to economy
    pub fn from_param(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or_default()
    }

    pub fn toggle(self) -> Self {
        match self {
            CabinClass::Economy => CabinClass::Business,
            CabinClass::Business => CabinClass::Economy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum PassengerType {
    Adult,
    Child,
    Infant,
}

/// Passenger tally for one search.
///
/// Holds at least one adult and at most [`MAX_PASSENGERS`] travellers in total.
/// `increment`/`decrement` refuse any move that would break this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PassengerCounts {
    pub adults: u8,
    pub children: u8,
    pub infants: u8,
}

impl Default for PassengerCounts {
    fn default() -> Self {
        PassengerCounts {
            adults: 1,
            children: 0,
            infants: 0,
        }
    }
}

impl PassengerCounts {
    pub fn new(adults: u8, children: u8, infants: u8) -> AppResult<Self> {
        let counts = PassengerCounts {
            adults,
            children,
            infants,
        };
        counts.validate()?;
        Ok(counts)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.adults < 1 {
            return Err(AppError::ValidationError(
                "At least one adult passenger is required".into(),
            ));
        }
        if self.total() > MAX_PASSENGERS as u16 {
            return Err(AppError::ValidationError(format!(
                "No more than {} passengers per booking",
                MAX_PASSENGERS
            )));
        }
        Ok(())
    }

    pub fn total(&self) -> u16 {
        self.adults as u16 + self.children as u16 + self.infants as u16
    }

    pub fn count(&self, kind: PassengerType) -> u8 {
        match kind {
            PassengerType::Adult => self.adults,
            PassengerType::Child => self.children,
            PassengerType::Infant => self.infants,
        }
    }

    fn slot(&mut self, kind: PassengerType) -> &mut u8 {
        match kind {
            PassengerType::Adult => &mut self.adults,
            PassengerType::Child => &mut self.children,
            PassengerType::Infant => &mut self.infants,
        }
    }

    /// Returns false and leaves the counts untouched when the total is already at the cap.
    pub fn increment(&mut self, kind: PassengerType) -> bool {
        if self.total() >= MAX_PASSENGERS as u16 {
            return false;
        }
        *self.slot(kind) += 1;
        true
    }

    /// Returns false when the count is already at its floor (one adult, zero otherwise).
    pub fn decrement(&mut self, kind: PassengerType) -> bool {
        let floor = if kind == PassengerType::Adult { 1 } else { 0 };
        let slot = self.slot(kind);
        if *slot <= floor {
            return false;
        }
        *slot -= 1;
        true
    }
}

// Search form as filled in on the home page
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct SearchForm {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    #[serde(default)]
    pub passengers: PassengerCounts,
    #[serde(default)]
    pub cabin_class: CabinClass,
}

impl SearchForm {
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.origin, &mut self.destination);
    }

    pub fn validate(&self, today: NaiveDate) -> AppResult<SearchParams> {
        let from = normalize_code(self.origin.as_deref())
            .ok_or_else(|| AppError::ValidationError("Origin is required".into()))?;
        let to = normalize_code(self.destination.as_deref())
            .ok_or_else(|| AppError::ValidationError("Destination is required".into()))?;

        if from == to {
            return Err(AppError::ValidationError(
                "Origin and destination must differ".into(),
            ));
        }

        let start = self
            .start
            .ok_or_else(|| AppError::ValidationError("Departure date is required".into()))?;
        if start < today {
            return Err(AppError::ValidationError(
                "Departure date cannot be in the past".into(),
            ));
        }
        if let Some(end) = self.end {
            if end < start {
                return Err(AppError::ValidationError(
                    "Return date cannot be before departure date".into(),
                ));
            }
        }

        self.passengers.validate()?;

        Ok(SearchParams {
            from,
            to,
            start,
            end: self.end,
            adults: self.passengers.adults,
            children: self.passengers.children,
            infants: self.passengers.infants,
            class: self.cabin_class,
        })
    }
}

fn normalize_code(code: Option<&str>) -> Option<String> {
    code.map(|c| c.trim().to_uppercase()).filter(|c| !c.is_empty())
}

/// Query contract of the flight results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SearchParams {
    pub from: String,
    pub to: String,
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
    pub adults: u8,
    pub children: u8,
    pub infants: u8,
    pub class: CabinClass,
}

impl SearchParams {
    pub fn passengers(&self) -> PassengerCounts {
        PassengerCounts {
            adults: self.adults,
            children: self.children,
            infants: self.infants,
        }
    }

    pub fn is_round_trip(&self) -> bool {
        self.end.is_some()
    }

    /// Link to the results page; fields go out in declaration order.
    pub fn href(&self) -> AppResult<String> {
        ClientRoute::Booking.href(self)
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct SearchResponse {
    pub params: SearchParams,
    pub next: String,
}
