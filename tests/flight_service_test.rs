use airline_booking_service::{
    models::flight::{FlightSearchQuery, NewFlight},
    services::flight_service::FlightService,
    utils::error::AppError,
    Stores,
};
use async_trait::async_trait;
use chrono::Duration;
use rust_decimal::Decimal;
use test_context::{test_context, AsyncTestContext};

mod common {
    pub mod test_utils;
}
use common::test_utils::{create_test_flight, departure, seeded_stores};

struct FlightServiceContext {
    stores: Stores,
    flight_service: FlightService,
}

#[async_trait]
impl AsyncTestContext for FlightServiceContext {
    async fn setup() -> Self {
        let stores = seeded_stores().await;
        let flight_service = FlightService::new(stores.flights.clone());

        FlightServiceContext {
            stores,
            flight_service,
        }
    }

    async fn teardown(self) {}
}

fn query(origin: &str, destination: &str, exact_first: bool) -> FlightSearchQuery {
    FlightSearchQuery {
        origin: origin.to_string(),
        destination: destination.to_string(),
        date: None,
        exact_first,
    }
}

#[test_context(FlightServiceContext)]
#[tokio::test]
async fn test_search_returns_flights_touching_either_end(
    ctx: &FlightServiceContext,
) -> Result<(), AppError> {
    let from_origin = create_test_flight(&ctx.stores, "J2-101", "GYD", "DXB", departure(3, 6), 150, 500).await;
    let to_destination = create_test_flight(&ctx.stores, "J2-102", "LHR", "IST", departure(3, 7), 210, 700).await;
    let unrelated = create_test_flight(&ctx.stores, "J2-103", "CDG", "JFK", departure(3, 8), 480, 1900).await;

    let response = ctx.flight_service.search_flights(query("GYD", "IST", false)).await?;
    let ids: Vec<i32> = response.flights.iter().map(|f| f.id).collect();

    assert_eq!(ids, vec![from_origin.id, to_destination.id]);
    assert!(!ids.contains(&unrelated.id));
    Ok(())
}

#[test_context(FlightServiceContext)]
#[tokio::test]
async fn test_exact_route_sorted_first_and_stable(
    ctx: &FlightServiceContext,
) -> Result<(), AppError> {
    // Departure order: partial, exact, partial, exact
    let partial_early = create_test_flight(&ctx.stores, "J2-201", "GYD", "DXB", departure(4, 6), 150, 500).await;
    let exact_early = create_test_flight(&ctx.stores, "J2-202", "GYD", "IST", departure(4, 8), 185, 620).await;
    let partial_late = create_test_flight(&ctx.stores, "J2-203", "TBS", "IST", departure(4, 10), 99, 300).await;
    let exact_late = create_test_flight(&ctx.stores, "J2-204", "GYD", "IST", departure(4, 18), 175, 600).await;

    let response = ctx.flight_service.search_flights(query("GYD", "IST", true)).await?;
    let ids: Vec<i32> = response.flights.iter().map(|f| f.id).collect();

    assert_eq!(
        ids,
        vec![exact_early.id, exact_late.id, partial_early.id, partial_late.id]
    );

    // Without the flag results stay in departure order
    let response = ctx.flight_service.search_flights(query("GYD", "IST", false)).await?;
    let ids: Vec<i32> = response.flights.iter().map(|f| f.id).collect();
    assert_eq!(
        ids,
        vec![partial_early.id, exact_early.id, partial_late.id, exact_late.id]
    );
    Ok(())
}

#[test_context(FlightServiceContext)]
#[tokio::test]
async fn test_search_filters_by_departure_date(ctx: &FlightServiceContext) -> Result<(), AppError> {
    let on_day = create_test_flight(&ctx.stores, "J2-301", "GYD", "IST", departure(5, 9), 185, 620).await;
    create_test_flight(&ctx.stores, "J2-302", "GYD", "IST", departure(6, 9), 185, 620).await;

    let mut search = query("GYD", "IST", true);
    search.date = Some(on_day.departure_at.date_naive());
    let response = ctx.flight_service.search_flights(search).await?;

    assert_eq!(response.flights.len(), 1);
    assert_eq!(response.flights[0].id, on_day.id);
    Ok(())
}

#[test_context(FlightServiceContext)]
#[tokio::test]
async fn test_get_flight(ctx: &FlightServiceContext) -> Result<(), AppError> {
    let created = create_test_flight(&ctx.stores, "J2-401", "GYD", "LHR", departure(7, 9), 410, 1350).await;

    let flight = ctx.flight_service.get_flight(created.id).await?;
    assert_eq!(flight.flight_number, "J2-401");
    assert_eq!(flight.origin.code, "GYD");
    assert_eq!(flight.destination.city, "London");
    assert_eq!(flight.duration_minutes(), 180);

    let missing = ctx.flight_service.get_flight(created.id + 1_000).await;
    assert_eq!(
        missing.err(),
        Some(AppError::NotFound("Flight not found".to_string()))
    );
    Ok(())
}

#[test_context(FlightServiceContext)]
#[tokio::test]
async fn test_create_flight_validation(ctx: &FlightServiceContext) -> Result<(), AppError> {
    let base = NewFlight {
        flight_number: "J2-501".to_string(),
        departure_at: departure(8, 9),
        arrival_at: departure(8, 9) + Duration::hours(2),
        price_economy: Decimal::from(120),
        price_business: Decimal::from(400),
        origin_code: "GYD".to_string(),
        destination_code: "TBS".to_string(),
    };

    let created = ctx.flight_service.create_flight(base.clone()).await?;
    assert_eq!(created.destination.code, "TBS");

    let backwards = NewFlight {
        arrival_at: base.departure_at - Duration::hours(1),
        ..base.clone()
    };
    assert!(matches!(
        ctx.flight_service.create_flight(backwards).await,
        Err(AppError::ValidationError(_))
    ));

    let same_airport = NewFlight {
        destination_code: "gyd".to_string(),
        ..base.clone()
    };
    assert!(matches!(
        ctx.flight_service.create_flight(same_airport).await,
        Err(AppError::ValidationError(_))
    ));

    let unknown_airport = NewFlight {
        destination_code: "ZZZ".to_string(),
        ..base
    };
    assert!(matches!(
        ctx.flight_service.create_flight(unknown_airport).await,
        Err(AppError::NotFound(_))
    ));
    Ok(())
}

#[test_context(FlightServiceContext)]
#[tokio::test]
async fn test_demo_week_is_seeded_through_create_flight(
    ctx: &FlightServiceContext,
) -> Result<(), AppError> {
    let first_day = departure(1, 0).date_naive();
    let created = ctx.flight_service.seed_demo_flights(first_day).await?;
    assert_eq!(created, 42);

    let mut search = query("GYD", "IST", true);
    search.date = Some(first_day + Duration::days(6));
    let response = ctx.flight_service.search_flights(search).await?;

    // GYD departures that day: IST, LHR and TBS
    assert_eq!(response.flights.len(), 3);
    let first = &response.flights[0];
    assert_eq!(first.flight_number, "J2-051");
    assert!(first.arrival_at > first.departure_at);
    assert_eq!(first.price_economy, Decimal::from(185));
    Ok(())
}
