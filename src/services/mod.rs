pub mod booking_service;
pub mod flight_service;
pub mod itinerary_service;
pub mod location_service;
pub mod user_service;
