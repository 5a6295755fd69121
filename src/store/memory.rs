use super::{BookingRepository, FlightRepository, LocationRepository, UserRepository};
use crate::models::booking::{Booking, BookingStatus, NewBooking};
use crate::models::flight::{Flight, NewFlight};
use crate::models::location::Location;
use crate::models::user::{NewUser, User};
use crate::utils::error::{AppError, AppResult};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    locations: BTreeMap<i32, Location>,
    flights: BTreeMap<i32, Flight>,
    users: BTreeMap<i32, User>,
    bookings: BTreeMap<i32, Booking>,
    next_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn location_by_code(&self, code: &str) -> Option<&Location> {
        self.locations
            .values()
            .find(|l| l.code.eq_ignore_ascii_case(code))
    }
}

/// Process-local store for development runs and tests.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocationRepository for MemoryStore {
    async fn list_locations(&self) -> AppResult<Vec<Location>> {
        Ok(self.tables.read().await.locations.values().cloned().collect())
    }

    async fn find_location_by_code(&self, code: &str) -> AppResult<Option<Location>> {
        Ok(self.tables.read().await.location_by_code(code).cloned())
    }

    async fn insert_location(&self, city: &str, country: &str, code: &str) -> AppResult<Location> {
        let mut tables = self.tables.write().await;
        if tables.location_by_code(code).is_some() {
            return Err(AppError::Conflict(format!("Location {} already exists", code)));
        }
        let location = Location {
            id: tables.next_id(),
            city: city.to_string(),
            country: country.to_string(),
            code: code.to_uppercase(),
        };
        tables.locations.insert(location.id, location.clone());
        Ok(location)
    }
}

#[async_trait]
impl FlightRepository for MemoryStore {
    async fn flights_touching(
        &self,
        origin: &str,
        destination: &str,
        date: Option<NaiveDate>,
    ) -> AppResult<Vec<Flight>> {
        let tables = self.tables.read().await;
        let mut flights: Vec<Flight> = tables
            .flights
            .values()
            .filter(|f| {
                f.origin.code.eq_ignore_ascii_case(origin)
                    || f.destination.code.eq_ignore_ascii_case(destination)
            })
            .filter(|f| date.map_or(true, |d| f.departure_at.date_naive() == d))
            .cloned()
            .collect();
        flights.sort_by_key(|f| (f.departure_at, f.id));
        Ok(flights)
    }

    async fn get_flight(&self, id: i32) -> AppResult<Option<Flight>> {
        Ok(self.tables.read().await.flights.get(&id).cloned())
    }

    async fn insert_flight(&self, flight: &NewFlight) -> AppResult<Flight> {
        let mut tables = self.tables.write().await;
        let origin = tables
            .location_by_code(&flight.origin_code)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Location {}", flight.origin_code)))?;
        let destination = tables
            .location_by_code(&flight.destination_code)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Location {}", flight.destination_code)))?;

        let stored = Flight {
            id: tables.next_id(),
            flight_number: flight.flight_number.clone(),
            departure_at: flight.departure_at,
            arrival_at: flight.arrival_at,
            price_economy: flight.price_economy,
            price_business: flight.price_business,
            origin,
            destination,
        };
        tables.flights.insert(stored.id, stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_user_by_id(&self, id: i32) -> AppResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_identifier(&self, identifier: &str) -> AppResult<Option<User>> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|u| u.username == identifier || u.email.eq_ignore_ascii_case(identifier))
            .cloned())
    }

    async fn username_or_email_taken(&self, username: &str, email: &str) -> AppResult<bool> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .any(|u| u.username == username || u.email.eq_ignore_ascii_case(email)))
    }

    async fn insert_user(&self, user: &NewUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        let taken = tables
            .users
            .values()
            .any(|u| u.username == user.username || u.email.eq_ignore_ascii_case(&user.email));
        if taken {
            return Err(AppError::Conflict("Username or email already exists".into()));
        }

        let stored = User {
            id: tables.next_id(),
            document_id: user.document_id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            password: user.password_hash.clone(),
            name: user.profile.name.clone(),
            surname: user.profile.surname.clone(),
            date_of_birth: user.profile.date_of_birth,
            gender: user.profile.gender.clone(),
            document_number: user.profile.document_number.clone(),
            document_expiry: user.profile.document_expiry,
            phone_number: user.profile.phone_number.clone(),
            created_at: Utc::now(),
        };
        tables.users.insert(stored.id, stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl BookingRepository for MemoryStore {
    async fn insert_itinerary(&self, legs: &[NewBooking]) -> AppResult<Vec<Booking>> {
        let mut tables = self.tables.write().await;

        // Resolve every leg before touching the table so a bad leg leaves nothing behind
        let mut flights = Vec::with_capacity(legs.len());
        for leg in legs {
            let flight = tables
                .flights
                .get(&leg.flight_id)
                .cloned()
                .ok_or_else(|| AppError::NotFound(format!("Flight {} not found", leg.flight_id)))?;
            flights.push(flight);
        }

        let created_at = Utc::now();
        let mut created = Vec::with_capacity(legs.len());
        for (leg, flight) in legs.iter().zip(flights) {
            let booking = Booking {
                id: tables.next_id(),
                document_id: leg.document_id.clone(),
                reference: leg.reference.clone(),
                itinerary_id: leg.itinerary_id.clone(),
                leg: leg.leg,
                flight,
                passengers: leg.passengers.clone(),
                contact: leg.contact.clone(),
                cabin_class: leg.cabin_class,
                total_price: leg.total_price,
                status: BookingStatus::Pending,
                user_id: leg.user_id,
                created_at,
            };
            created.push(booking);
        }

        for booking in &created {
            tables.bookings.insert(booking.id, booking.clone());
        }
        Ok(created)
    }

    async fn get_booking(&self, id: i32) -> AppResult<Option<Booking>> {
        Ok(self.tables.read().await.bookings.get(&id).cloned())
    }

    async fn bookings_for_user(&self, user_id: i32) -> AppResult<Vec<Booking>> {
        let tables = self.tables.read().await;
        let mut bookings: Vec<Booking> = tables
            .bookings
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(bookings)
    }

    async fn update_status(
        &self,
        id: i32,
        expected: BookingStatus,
        next: BookingStatus,
    ) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.bookings.get_mut(&id) {
            Some(booking) if booking.status == expected => {
                booking.status = next;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
