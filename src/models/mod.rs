pub mod booking;
pub mod flight;
pub mod itinerary;
pub mod location;
pub mod navigation;
pub mod passenger;
pub mod pricing;
pub mod search;
pub mod user;
