use super::{BookingRepository, FlightRepository, LocationRepository, UserRepository};
use crate::models::booking::{Booking, BookingRow, BookingStatus, NewBooking};
use crate::models::flight::{Flight, FlightRow, NewFlight};
use crate::models::location::Location;
use crate::models::user::{NewUser, User};
use crate::utils::error::{AppError, AppResult};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::MySqlPool;

const FLIGHT_SELECT: &str = r#"
    SELECT
        f.id,
        f.flight_number,
        f.departure_at,
        f.arrival_at,
        f.price_economy,
        f.price_business,
        o.id AS origin_id,
        o.city AS origin_city,
        o.country AS origin_country,
        o.code AS origin_code,
        d.id AS destination_id,
        d.city AS destination_city,
        d.country AS destination_country,
        d.code AS destination_code
    FROM flight f
    JOIN location o ON f.origin_id = o.id
    JOIN location d ON f.destination_id = d.id
"#;

const BOOKING_SELECT: &str = r#"
    SELECT
        b.id AS booking_id,
        b.document_id,
        b.reference,
        b.itinerary_id,
        b.leg,
        b.passengers,
        b.contact_email,
        b.contact_phone,
        b.cabin_class,
        b.total_price,
        b.status,
        b.user_id,
        b.created_at,
        f.id,
        f.flight_number,
        f.departure_at,
        f.arrival_at,
        f.price_economy,
        f.price_business,
        o.id AS origin_id,
        o.city AS origin_city,
        o.country AS origin_country,
        o.code AS origin_code,
        d.id AS destination_id,
        d.city AS destination_city,
        d.country AS destination_country,
        d.code AS destination_code
    FROM booking b
    JOIN flight f ON b.flight_id = f.id
    JOIN location o ON f.origin_id = o.id
    JOIN location d ON f.destination_id = d.id
"#;

const USER_SELECT: &str = r#"
    SELECT id, document_id, username, email, password, name, surname, date_of_birth,
        gender, document_number, document_expiry, phone_number, created_at
    FROM user
"#;

pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlStore { pool }
    }
}

#[async_trait]
impl LocationRepository for MySqlStore {
    async fn list_locations(&self) -> AppResult<Vec<Location>> {
        let locations = sqlx::query_as::<_, Location>(
            "SELECT id, city, country, code FROM location ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(locations)
    }

    async fn find_location_by_code(&self, code: &str) -> AppResult<Option<Location>> {
        let location = sqlx::query_as::<_, Location>(
            "SELECT id, city, country, code FROM location WHERE code = ?",
        )
        .bind(code.to_uppercase())
        .fetch_optional(&self.pool)
        .await?;
        Ok(location)
    }

    async fn insert_location(&self, city: &str, country: &str, code: &str) -> AppResult<Location> {
        if self.find_location_by_code(code).await?.is_some() {
            return Err(AppError::Conflict(format!("Location {} already exists", code)));
        }

        let result = sqlx::query("INSERT INTO location (city, country, code) VALUES (?, ?, ?)")
            .bind(city)
            .bind(country)
            .bind(code.to_uppercase())
            .execute(&self.pool)
            .await?;

        Ok(Location {
            id: result.last_insert_id() as i32,
            city: city.to_string(),
            country: country.to_string(),
            code: code.to_uppercase(),
        })
    }
}

#[async_trait]
impl FlightRepository for MySqlStore {
    async fn flights_touching(
        &self,
        origin: &str,
        destination: &str,
        date: Option<NaiveDate>,
    ) -> AppResult<Vec<Flight>> {
        let rows = match date {
            // If a date is provided, only flights departing that day
            Some(date) => {
                let sql = format!(
                    "{} WHERE (o.code = ? OR d.code = ?) AND DATE(f.departure_at) = ? ORDER BY f.departure_at, f.id",
                    FLIGHT_SELECT
                );
                sqlx::query_as::<_, FlightRow>(&sql)
                    .bind(origin.to_uppercase())
                    .bind(destination.to_uppercase())
                    .bind(date)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!(
                    "{} WHERE (o.code = ? OR d.code = ?) ORDER BY f.departure_at, f.id",
                    FLIGHT_SELECT
                );
                sqlx::query_as::<_, FlightRow>(&sql)
                    .bind(origin.to_uppercase())
                    .bind(destination.to_uppercase())
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(rows.into_iter().map(Flight::from).collect())
    }

    async fn get_flight(&self, id: i32) -> AppResult<Option<Flight>> {
        let sql = format!("{} WHERE f.id = ?", FLIGHT_SELECT);
        let row = sqlx::query_as::<_, FlightRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Flight::from))
    }

    async fn insert_flight(&self, flight: &NewFlight) -> AppResult<Flight> {
        let origin = self
            .find_location_by_code(&flight.origin_code)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Location {}", flight.origin_code)))?;
        let destination = self
            .find_location_by_code(&flight.destination_code)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Location {}", flight.destination_code)))?;

        let result = sqlx::query(
            r#"
            INSERT INTO flight (flight_number, departure_at, arrival_at, price_economy,
                price_business, origin_id, destination_id)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&flight.flight_number)
        .bind(flight.departure_at)
        .bind(flight.arrival_at)
        .bind(flight.price_economy)
        .bind(flight.price_business)
        .bind(origin.id)
        .bind(destination.id)
        .execute(&self.pool)
        .await?;

        Ok(Flight {
            id: result.last_insert_id() as i32,
            flight_number: flight.flight_number.clone(),
            departure_at: flight.departure_at,
            arrival_at: flight.arrival_at,
            price_economy: flight.price_economy,
            price_business: flight.price_business,
            origin,
            destination,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlStore {
    async fn find_user_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let sql = format!("{} WHERE id = ?", USER_SELECT);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_identifier(&self, identifier: &str) -> AppResult<Option<User>> {
        let sql = format!("{} WHERE username = ? OR email = ? LIMIT 1", USER_SELECT);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(identifier)
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn username_or_email_taken(&self, username: &str, email: &str) -> AppResult<bool> {
        let existing: Option<(i32,)> =
            sqlx::query_as("SELECT id FROM user WHERE username = ? OR email = ? LIMIT 1")
                .bind(username)
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        Ok(existing.is_some())
    }

    async fn insert_user(&self, user: &NewUser) -> AppResult<User> {
        let result = sqlx::query(
            r#"
            INSERT INTO user (document_id, username, email, password, name, surname,
                date_of_birth, gender, document_number, document_expiry, phone_number)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.document_id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.profile.name)
        .bind(&user.profile.surname)
        .bind(user.profile.date_of_birth)
        .bind(&user.profile.gender)
        .bind(&user.profile.document_number)
        .bind(user.profile.document_expiry)
        .bind(&user.profile.phone_number)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            // Raced with another registration past user_exists
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict("Username or email already exists".into())
            }
            e => e.into(),
        })?;

        let id = result.last_insert_id() as i32;
        self.find_user_by_id(id)
            .await?
            .ok_or_else(|| AppError::DatabaseError("Inserted user not found".into()))
    }
}

#[async_trait]
impl BookingRepository for MySqlStore {
    async fn insert_itinerary(&self, legs: &[NewBooking]) -> AppResult<Vec<Booking>> {
        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(legs.len());

        for leg in legs {
            // Lock the flight row; a missing flight aborts the whole itinerary
            let flight: Option<(i32,)> = sqlx::query_as("SELECT id FROM flight WHERE id = ? FOR UPDATE")
                .bind(leg.flight_id)
                .fetch_optional(&mut *tx)
                .await?;
            if flight.is_none() {
                tx.rollback().await?;
                return Err(AppError::NotFound(format!("Flight {} not found", leg.flight_id)));
            }

            let result = sqlx::query(
                r#"
                INSERT INTO booking (document_id, reference, itinerary_id, leg, flight_id,
                    passengers, contact_email, contact_phone, cabin_class, total_price, status, user_id)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&leg.document_id)
            .bind(&leg.reference)
            .bind(&leg.itinerary_id)
            .bind(leg.leg.to_string())
            .bind(leg.flight_id)
            .bind(serde_json::to_string(&leg.passengers)?)
            .bind(&leg.contact.email)
            .bind(&leg.contact.phone)
            .bind(leg.cabin_class.to_string())
            .bind(leg.total_price)
            .bind(BookingStatus::Pending.to_string())
            .bind(leg.user_id)
            .execute(&mut *tx)
            .await?;

            ids.push(result.last_insert_id() as i32);
        }

        tx.commit().await?;

        let mut created = Vec::with_capacity(ids.len());
        for id in ids {
            let booking = self
                .get_booking(id)
                .await?
                .ok_or_else(|| AppError::DatabaseError("Inserted booking not found".into()))?;
            created.push(booking);
        }
        Ok(created)
    }

    async fn get_booking(&self, id: i32) -> AppResult<Option<Booking>> {
        let sql = format!("{} WHERE b.id = ?", BOOKING_SELECT);
        let row = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Booking::try_from).transpose()
    }

    async fn bookings_for_user(&self, user_id: i32) -> AppResult<Vec<Booking>> {
        let sql = format!(
            "{} WHERE b.user_id = ? ORDER BY b.created_at DESC, b.id DESC",
            BOOKING_SELECT
        );
        let rows = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn update_status(
        &self,
        id: i32,
        expected: BookingStatus,
        next: BookingStatus,
    ) -> AppResult<bool> {
        let result = sqlx::query("UPDATE booking SET status = ? WHERE id = ? AND status = ?")
            .bind(next.to_string())
            .bind(id)
            .bind(expected.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }
}
