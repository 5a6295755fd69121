use crate::models::booking::{Booking, BookingStatus, NewBooking};
use crate::models::flight::{Flight, NewFlight};
use crate::models::location::{default_locations, Location};
use crate::models::user::{NewUser, User};
use crate::utils::error::AppResult;
use async_trait::async_trait;
use chrono::NaiveDate;

pub mod memory;
pub mod mysql;

pub use memory::MemoryStore;
pub use mysql::MySqlStore;

#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn list_locations(&self) -> AppResult<Vec<Location>>;

    async fn find_location_by_code(&self, code: &str) -> AppResult<Option<Location>>;

    async fn insert_location(&self, city: &str, country: &str, code: &str) -> AppResult<Location>;
}

#[async_trait]
pub trait FlightRepository: Send + Sync {
    /// Flights leaving `origin` or arriving at `destination`, ordered by departure.
    async fn flights_touching(
        &self,
        origin: &str,
        destination: &str,
        date: Option<NaiveDate>,
    ) -> AppResult<Vec<Flight>>;

    async fn get_flight(&self, id: i32) -> AppResult<Option<Flight>>;

    async fn insert_flight(&self, flight: &NewFlight) -> AppResult<Flight>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user_by_id(&self, id: i32) -> AppResult<Option<User>>;

    // Matches either the username or the email
    async fn find_user_by_identifier(&self, identifier: &str) -> AppResult<Option<User>>;

    async fn username_or_email_taken(&self, username: &str, email: &str) -> AppResult<bool>;

    async fn insert_user(&self, user: &NewUser) -> AppResult<User>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Inserts every leg or none of them.
    async fn insert_itinerary(&self, legs: &[NewBooking]) -> AppResult<Vec<Booking>>;

    async fn get_booking(&self, id: i32) -> AppResult<Option<Booking>>;

    // Newest first
    async fn bookings_for_user(&self, user_id: i32) -> AppResult<Vec<Booking>>;

    /// Moves `id` to `next` only if it is still in `expected`; returns false otherwise.
    async fn update_status(
        &self,
        id: i32,
        expected: BookingStatus,
        next: BookingStatus,
    ) -> AppResult<bool>;
}

/// Fills an empty location directory with the built-in airports.
pub async fn seed_default_locations(locations: &dyn LocationRepository) -> AppResult<()> {
    if !locations.list_locations().await?.is_empty() {
        return Ok(());
    }
    for location in default_locations() {
        locations
            .insert_location(&location.city, &location.country, &location.code)
            .await?;
    }
    Ok(())
}
