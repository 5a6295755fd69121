use crate::models::location::default_locations;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::Duration;

const SCHEMA: [&str; 4] = [
    "CREATE TABLE IF NOT EXISTS location (
        id INT AUTO_INCREMENT PRIMARY KEY,
        city VARCHAR(255) NOT NULL,
        country VARCHAR(255) NOT NULL,
        code CHAR(3) NOT NULL,
        CONSTRAINT location_code_uindex UNIQUE (code)
    )",
    "CREATE TABLE IF NOT EXISTS user (
        id INT AUTO_INCREMENT PRIMARY KEY,
        document_id CHAR(36) NOT NULL,
        username VARCHAR(64) NOT NULL,
        email VARCHAR(255) NOT NULL,
        password VARCHAR(255) NOT NULL,
        name VARCHAR(100) NULL,
        surname VARCHAR(100) NULL,
        date_of_birth DATE NULL,
        gender VARCHAR(16) NULL,
        document_number VARCHAR(32) NULL,
        document_expiry DATE NULL,
        phone_number VARCHAR(32) NULL,
        created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
        CONSTRAINT user_username_uindex UNIQUE (username),
        CONSTRAINT user_email_uindex UNIQUE (email)
    )",
    "CREATE TABLE IF NOT EXISTS flight (
        id INT AUTO_INCREMENT PRIMARY KEY,
        flight_number VARCHAR(16) NOT NULL,
        departure_at DATETIME NOT NULL,
        arrival_at DATETIME NOT NULL,
        price_economy DECIMAL(10,2) NOT NULL,
        price_business DECIMAL(10,2) NOT NULL,
        origin_id INT NOT NULL,
        destination_id INT NOT NULL,
        CONSTRAINT flight_origin_fk FOREIGN KEY (origin_id) REFERENCES location(id),
        CONSTRAINT flight_destination_fk FOREIGN KEY (destination_id) REFERENCES location(id)
    )",
    "CREATE TABLE IF NOT EXISTS booking (
        id INT AUTO_INCREMENT PRIMARY KEY,
        document_id CHAR(36) NOT NULL,
        reference CHAR(6) NOT NULL,
        itinerary_id CHAR(36) NOT NULL,
        leg VARCHAR(16) NOT NULL,
        flight_id INT NOT NULL,
        passengers LONGTEXT NOT NULL,
        contact_email VARCHAR(255) NOT NULL,
        contact_phone VARCHAR(32) NOT NULL,
        cabin_class VARCHAR(16) NOT NULL,
        total_price DECIMAL(12,2) NOT NULL,
        status VARCHAR(16) NOT NULL DEFAULT 'pending',
        user_id INT NOT NULL,
        created_at DATETIME(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6),
        INDEX booking_itinerary_index (itinerary_id),
        CONSTRAINT booking_flight_fk FOREIGN KEY (flight_id) REFERENCES flight(id),
        CONSTRAINT booking_user_fk FOREIGN KEY (user_id) REFERENCES user(id) ON DELETE CASCADE
    )",
];

// Database connection manager
pub struct Database {
    pub pool: MySqlPool,
}

impl Database {
    // Create a new database connection pool
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(database_url)
            .await?;

        Ok(Database { pool })
    }

    // Get a reference to the connection pool
    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Creates missing tables and fills an empty location directory with the defaults.
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM location")
            .fetch_one(&self.pool)
            .await?;

        if count == 0 {
            tracing::info!("seeding default locations");
            for location in default_locations() {
                sqlx::query("INSERT INTO location (city, country, code) VALUES (?, ?, ?)")
                    .bind(&location.city)
                    .bind(&location.country)
                    .bind(&location.code)
                    .execute(&self.pool)
                    .await?;
            }
        }

        Ok(())
    }
}
