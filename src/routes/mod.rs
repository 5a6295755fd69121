pub mod booking_route;
pub mod flight_route;
pub mod itinerary_route;
pub mod location_route;
pub mod user_route;

use crate::utils::error::{AppError, AppResult};
use std::str::FromStr;

/// Parses an optional query value; a value that is present but malformed is a 400, not a default.
pub(crate) fn query_param<T: FromStr>(name: &str, raw: Option<&str>) -> AppResult<Option<T>> {
    match raw.map(str::trim) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| AppError::ValidationError(format!("Invalid value for {}: {}", name, value))),
    }
}
