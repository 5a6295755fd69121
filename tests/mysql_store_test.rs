//! Runs against a real MySQL server when `ADMIN_DATABASE_URL` is set, otherwise every test passes trivially.

use airline_booking_service::{
    models::{
        booking::{generate_reference, BookingStatus, Leg, NewBooking},
        flight::NewFlight,
        search::{CabinClass, PassengerType},
        user::{NewUser, UserProfile},
    },
    store::{BookingRepository, FlightRepository, LocationRepository, MySqlStore, UserRepository},
    utils::error::AppError,
};
use chrono::Duration;
use rust_decimal::Decimal;

mod common {
    pub mod test_utils;
}
use common::test_utils::{contact, departure, passenger, TestDb};

async fn store() -> Option<MySqlStore> {
    TestDb::get_instance()
        .await
        .expect("Failed to get test database instance")
        .map(MySqlStore::new)
}

fn new_flight(number: &str, origin: &str, destination: &str, day: u32) -> NewFlight {
    NewFlight {
        flight_number: number.to_string(),
        departure_at: departure(day, 8),
        arrival_at: departure(day, 8) + Duration::minutes(195),
        price_economy: Decimal::new(18550, 2),
        price_business: Decimal::from(620),
        origin_code: origin.to_string(),
        destination_code: destination.to_string(),
    }
}

async fn new_user(store: &MySqlStore, username: &str) -> Result<i32, AppError> {
    let user = store
        .insert_user(&NewUser {
            document_id: uuid::Uuid::new_v4().to_string(),
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password_hash: "not-a-real-hash".to_string(),
            profile: UserProfile::default(),
        })
        .await?;
    Ok(user.id)
}

#[tokio::test]
async fn test_schema_seeds_locations() -> Result<(), AppError> {
    let Some(store) = store().await else {
        return Ok(());
    };

    let baku = store.find_location_by_code("gyd").await?;
    assert_eq!(baku.map(|l| l.city), Some("Baku".to_string()));
    assert!(store.list_locations().await?.len() >= 8);
    Ok(())
}

#[tokio::test]
async fn test_flight_round_trip_through_joins() -> Result<(), AppError> {
    let Some(store) = store().await else {
        return Ok(());
    };

    let created = store.insert_flight(&new_flight("MY-001", "GYD", "IST", 21)).await?;
    let fetched = store.get_flight(created.id).await?.expect("flight stored");

    assert_eq!(fetched, created);
    assert_eq!(fetched.origin.code, "GYD");
    assert_eq!(fetched.destination.code, "IST");
    assert_eq!(fetched.price_economy, Decimal::new(18550, 2));

    let touching = store
        .flights_touching("GYD", "IST", Some(departure(21, 0).date_naive()))
        .await?;
    assert!(touching.iter().any(|f| f.id == created.id));
    Ok(())
}

#[tokio::test]
async fn test_itinerary_rolls_back_on_missing_leg() -> Result<(), AppError> {
    let Some(store) = store().await else {
        return Ok(());
    };

    let user_id = new_user(&store, "mysql_rollback_user").await?;
    let flight = store.insert_flight(&new_flight("MY-002", "GYD", "TBS", 22)).await?;

    let new_leg = |leg: Leg, flight_id: i32| NewBooking {
        document_id: uuid::Uuid::new_v4().to_string(),
        reference: generate_reference(),
        itinerary_id: uuid::Uuid::new_v4().to_string(),
        leg,
        flight_id,
        passengers: vec![passenger("Kamran", PassengerType::Adult)],
        contact: contact(),
        cabin_class: CabinClass::Economy,
        total_price: Decimal::new(18550, 2),
        user_id,
    };

    let result = store
        .insert_itinerary(&[new_leg(Leg::Outbound, flight.id), new_leg(Leg::Inbound, i32::MAX)])
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert!(store.bookings_for_user(user_id).await?.is_empty());

    let stored = store
        .insert_itinerary(&[new_leg(Leg::Outbound, flight.id)])
        .await?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].status, BookingStatus::Pending);
    assert_eq!(stored[0].passengers[0].name, "Kamran");
    Ok(())
}

#[tokio::test]
async fn test_status_update_checks_expected_state() -> Result<(), AppError> {
    let Some(store) = store().await else {
        return Ok(());
    };

    let user_id = new_user(&store, "mysql_status_user").await?;
    let flight = store.insert_flight(&new_flight("MY-003", "IST", "GYD", 23)).await?;
    let booking = store
        .insert_itinerary(&[NewBooking {
            document_id: uuid::Uuid::new_v4().to_string(),
            reference: generate_reference(),
            itinerary_id: uuid::Uuid::new_v4().to_string(),
            leg: Leg::Outbound,
            flight_id: flight.id,
            passengers: vec![passenger("Sabina", PassengerType::Adult)],
            contact: contact(),
            cabin_class: CabinClass::Business,
            total_price: Decimal::from(620),
            user_id,
        }])
        .await?
        .remove(0);

    assert!(
        store
            .update_status(booking.id, BookingStatus::Pending, BookingStatus::Confirmed)
            .await?
    );
    // Already confirmed, so a second pending -> cancelled move loses
    assert!(
        !store
            .update_status(booking.id, BookingStatus::Pending, BookingStatus::Cancelled)
            .await?
    );

    let stored = store.get_booking(booking.id).await?.expect("booking stored");
    assert_eq!(stored.status, BookingStatus::Confirmed);
    assert_eq!(stored.cabin_class, CabinClass::Business);
    Ok(())
}

#[tokio::test]
async fn test_duplicate_username_is_a_conflict() -> Result<(), AppError> {
    let Some(store) = store().await else {
        return Ok(());
    };

    new_user(&store, "mysql_duplicate_user").await?;

    // Same username, fresh email: only the unique index can catch it
    let result = store
        .insert_user(&NewUser {
            document_id: uuid::Uuid::new_v4().to_string(),
            username: "mysql_duplicate_user".to_string(),
            email: "someone_else@example.com".to_string(),
            password_hash: "not-a-real-hash".to_string(),
            profile: UserProfile::default(),
        })
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
    Ok(())
}
