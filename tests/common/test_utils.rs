#![allow(dead_code)]

use airline_booking_service::config::{AppConfig, AuthConfig, CheckoutConfig, StoreBackend};
use airline_booking_service::db::Database;
use airline_booking_service::models::booking::ContactInfo;
use airline_booking_service::models::flight::{Flight, NewFlight};
use airline_booking_service::models::passenger::{DocumentType, Gender, Passenger};
use airline_booking_service::models::search::{PassengerCounts, PassengerType};
use airline_booking_service::store::seed_default_locations;
use airline_booking_service::Stores;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use once_cell::sync::OnceCell;
use rust_decimal::Decimal;
use sqlx::mysql::MySqlPool as Pool;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::Error;
use std::env;
use std::time::{Duration as StdDuration, SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;

pub fn test_config() -> AppConfig {
    AppConfig {
        store: StoreBackend::Memory,
        database_url: None,
        max_connections: 1,
        auth: AuthConfig {
            jwt_secret: "integration-test-secret".to_string(),
            expiration_hours: 1,
            // bcrypt's minimum, keeps registration fast
            password_cost: 4,
        },
        checkout: CheckoutConfig {
            payment_delay: StdDuration::ZERO,
            ..CheckoutConfig::default()
        },
    }
}

// Memory store with the default airports loaded
pub async fn seeded_stores() -> Stores {
    let stores = Stores::memory();
    seed_default_locations(stores.locations.as_ref())
        .await
        .expect("Failed to seed locations");
    stores
}

pub fn departure(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 11, day, hour, 0, 0).unwrap()
}

pub async fn create_test_flight(
    stores: &Stores,
    flight_number: &str,
    origin: &str,
    destination: &str,
    departure_at: DateTime<Utc>,
    economy: i64,
    business: i64,
) -> Flight {
    stores
        .flights
        .insert_flight(&NewFlight {
            flight_number: flight_number.to_string(),
            departure_at,
            arrival_at: departure_at + Duration::hours(3),
            price_economy: Decimal::from(economy),
            price_business: Decimal::from(business),
            origin_code: origin.to_string(),
            destination_code: destination.to_string(),
        })
        .await
        .expect("Failed to create test flight")
}

pub fn passenger(name: &str, kind: PassengerType) -> Passenger {
    Passenger {
        name: name.to_string(),
        surname: "Mammadov".to_string(),
        gender: Gender::Male,
        birth_date: match kind {
            PassengerType::Adult => NaiveDate::from_ymd_opt(1985, 3, 2).unwrap(),
            PassengerType::Child => NaiveDate::from_ymd_opt(2016, 7, 9).unwrap(),
            PassengerType::Infant => NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
        },
        document_type: DocumentType::Passport,
        document_number: format!("P{}", name.len() * 1_000_003),
        issuing_country: "Azerbaijan".to_string(),
        document_expiry: NaiveDate::from_ymd_opt(2031, 1, 1).unwrap(),
        passenger_type: kind,
    }
}

// One passenger per counted traveller, in form order
pub fn passengers_for(counts: &PassengerCounts) -> Vec<Passenger> {
    airline_booking_service::models::passenger::passenger_forms(counts)
        .into_iter()
        .map(|form| passenger(&format!("Traveller{}", form.index), form.passenger_type))
        .collect()
}

pub fn contact() -> ContactInfo {
    ContactInfo {
        email: "orkhan@example.com".to_string(),
        phone: "+994501234567".to_string(),
    }
}

static TEST_DB: OnceCell<Mutex<Option<TestDb>>> = OnceCell::new();

#[derive(Debug)]
pub struct TestDb {
    pub pool: Pool,
    pub db_name: String,
}

// Server URL without the database path
fn server_url() -> Option<String> {
    dotenv::dotenv().ok();
    let db_url = env::var("ADMIN_DATABASE_URL").ok()?;
    Some(db_url.split('/').collect::<Vec<&str>>()[..3].join("/"))
}

impl TestDb {
    /// Fresh schema in a throwaway database, shared by all tests of one run.
    /// `None` when no `ADMIN_DATABASE_URL` is configured.
    pub async fn get_instance() -> Result<Option<Pool>, Error> {
        let base_url = match server_url() {
            Some(url) => url,
            None => return Ok(None),
        };

        let test_db = TEST_DB.get_or_init(|| Mutex::new(None));
        let mut guard = test_db.lock().await;

        // Avoid creating a new database instance for each test
        if let Some(db) = guard.as_ref() {
            return Ok(Some(db.pool.clone()));
        }

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let db_name = format!("airline_booking_test_{}", timestamp);

        let admin_pool = MySqlPoolOptions::new()
            .max_connections(1)
            .connect(&base_url)
            .await?;
        sqlx::query(&format!("CREATE DATABASE {}", db_name))
            .execute(&admin_pool)
            .await?;

        let url = format!("{}/{}", base_url, db_name);
        let database = Database::new(&url, 5).await?;
        database.init_schema().await?;

        let pool = database.get_pool().clone();
        *guard = Some(TestDb {
            pool: pool.clone(),
            db_name,
        });
        Ok(Some(pool))
    }
}
