use airline_booking_service::config::{AppConfig, StoreBackend};
use airline_booking_service::db::Database;
use airline_booking_service::services::flight_service::FlightService;
use airline_booking_service::store::seed_default_locations;
use airline_booking_service::{build_rocket, Stores};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[rocket::launch]
async fn rocket() -> _ {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "airline_booking_service=debug,rocket=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().expect("Failed to load configuration");

    let stores = match config.store {
        StoreBackend::MySql => {
            let url = config
                .database_url
                .as_deref()
                .expect("DATABASE_URL must be set");

            // Connect to the database
            let database = Database::new(url, config.max_connections)
                .await
                .expect("Failed to connect to database");
            database
                .init_schema()
                .await
                .expect("Failed to initialise database schema");

            Stores::mysql(database.get_pool().clone())
        }
        StoreBackend::Memory => {
            let stores = Stores::memory();
            seed_default_locations(stores.locations.as_ref())
                .await
                .expect("Failed to seed locations");
            let today = chrono::Utc::now().date_naive();
            let seeded = FlightService::new(stores.flights.clone())
                .seed_demo_flights(today)
                .await
                .expect("Failed to seed flights");
            tracing::info!(flights = seeded, "using in-memory store");
            stores
        }
    };

    build_rocket(&config, stores)
}
