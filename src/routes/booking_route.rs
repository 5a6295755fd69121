use crate::models::booking::{
    Booking, BookingListResponse, BookingRequest, BookingStatusResponse, ItineraryResponse,
    PaymentRequest,
};
use crate::services::booking_service::BookingService;
use crate::utils::error::AppError;
use crate::utils::jwt::AuthenticatedUser;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

/// Book the outbound and optional return flight
#[openapi(tag = "Bookings")]
#[post("/bookings", format = "json", data = "<request>")]
pub async fn create_booking(
    request: Json<BookingRequest>,
    auth: AuthenticatedUser,
    booking_service: &State<BookingService>,
) -> Result<Json<ItineraryResponse>, AppError> {
    let response = booking_service
        .create_itinerary(auth.user_id, request.into_inner())
        .await?;
    Ok(Json(response))
}

/// Bookings of the signed-in user, newest first
#[openapi(tag = "Bookings")]
#[get("/bookings")]
pub async fn list_bookings(
    auth: AuthenticatedUser,
    booking_service: &State<BookingService>,
) -> Result<Json<BookingListResponse>, AppError> {
    let response = booking_service.list_for_user(auth.user_id).await?;
    Ok(Json(response))
}

#[openapi(tag = "Bookings")]
#[get("/bookings/<id>")]
pub async fn get_booking(
    id: i32,
    auth: AuthenticatedUser,
    booking_service: &State<BookingService>,
) -> Result<Json<Booking>, AppError> {
    let booking = booking_service.get_for_user(auth.user_id, id).await?;
    Ok(Json(booking))
}

/// Pay for a pending booking
#[openapi(tag = "Bookings")]
#[put("/bookings/<id>/confirm", format = "json", data = "<payment>")]
pub async fn confirm_booking(
    id: i32,
    payment: Json<PaymentRequest>,
    auth: AuthenticatedUser,
    booking_service: &State<BookingService>,
) -> Result<Json<BookingStatusResponse>, AppError> {
    let response = booking_service
        .confirm(auth.user_id, id, payment.into_inner())
        .await?;
    Ok(Json(response))
}

#[openapi(tag = "Bookings")]
#[put("/bookings/<id>/cancel")]
pub async fn cancel_booking(
    id: i32,
    auth: AuthenticatedUser,
    booking_service: &State<BookingService>,
) -> Result<Json<BookingStatusResponse>, AppError> {
    let response = booking_service.cancel(auth.user_id, id).await?;
    Ok(Json(response))
}
