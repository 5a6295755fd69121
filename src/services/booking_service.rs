use crate::config::CheckoutConfig;
use crate::models::booking::{
    generate_reference, Booking, BookingListResponse, BookingRequest, BookingStatus,
    BookingStatusResponse, ItineraryResponse, Leg, NewBooking, PaymentRequest,
};
use crate::models::navigation::ClientRoute;
use crate::models::passenger::check_passengers;
use crate::models::pricing::{leg_total, round_money};
use crate::services::flight_service::FlightService;
use crate::store::{BookingRepository, FlightRepository};
use crate::utils::error::{AppError, AppResult};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
    flight_service: FlightService,
    checkout: CheckoutConfig,
}

impl BookingService {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        flights: Arc<dyn FlightRepository>,
        checkout: CheckoutConfig,
    ) -> Self {
        BookingService {
            bookings,
            flight_service: FlightService::new(flights),
            checkout,
        }
    }

    /// Books every leg of the itinerary in one step. Either all legs are stored as
    /// pending bookings or none is.
    pub async fn create_itinerary(
        &self,
        user_id: i32,
        request: BookingRequest,
    ) -> AppResult<ItineraryResponse> {
        request.validate()?;
        check_passengers(&request.counts, &request.passengers)?;

        if request.inbound_id == Some(request.outbound_id) {
            return Err(AppError::ValidationError(
                "Return flight must differ from the outbound flight".into(),
            ));
        }

        let outbound = self.flight_service.get_flight(request.outbound_id).await?;
        let inbound = match request.inbound_id {
            Some(id) => Some(self.flight_service.get_flight(id).await?),
            None => None,
        };

        let itinerary_id = Uuid::new_v4().to_string();
        let class = request.cabin_class;

        // Add-ons are charged once, on the outbound leg
        let mut legs = vec![NewBooking {
            document_id: Uuid::new_v4().to_string(),
            reference: generate_reference(),
            itinerary_id: itinerary_id.clone(),
            leg: Leg::Outbound,
            flight_id: outbound.id,
            passengers: request.passengers.clone(),
            contact: request.contact.clone(),
            cabin_class: class,
            total_price: round_money(
                leg_total(&outbound, class, &request.counts) + request.add_ons.total(&self.checkout),
            ),
            user_id,
        }];

        if let Some(inbound) = &inbound {
            legs.push(NewBooking {
                document_id: Uuid::new_v4().to_string(),
                reference: generate_reference(),
                itinerary_id: itinerary_id.clone(),
                leg: Leg::Inbound,
                flight_id: inbound.id,
                passengers: request.passengers,
                contact: request.contact,
                cabin_class: class,
                total_price: round_money(leg_total(inbound, class, &request.counts)),
                user_id,
            });
        }

        let bookings = self.bookings.insert_itinerary(&legs).await?;
        if bookings.len() != legs.len() {
            return Err(AppError::DatabaseError(format!(
                "Stored {} of {} itinerary legs",
                bookings.len(),
                legs.len()
            )));
        }

        let total_price: Decimal = bookings.iter().map(|b| b.total_price).sum();
        let first_id = bookings[0].id;

        tracing::info!(
            user_id,
            itinerary_id = %itinerary_id,
            legs = bookings.len(),
            total = %total_price,
            "created itinerary"
        );

        Ok(ItineraryResponse {
            itinerary_id,
            bookings,
            total_price,
            next: ClientRoute::DataConfirmation.href(&[("booking_id", first_id)])?,
        })
    }

    pub async fn list_for_user(&self, user_id: i32) -> AppResult<BookingListResponse> {
        let bookings = self.bookings.bookings_for_user(user_id).await?;
        Ok(BookingListResponse { bookings })
    }

    // Bookings of other users look exactly like missing ones
    pub async fn get_for_user(&self, user_id: i32, booking_id: i32) -> AppResult<Booking> {
        self.bookings
            .get_booking(booking_id)
            .await?
            .filter(|b| b.user_id == user_id)
            .ok_or_else(|| AppError::NotFound("Booking not found".into()))
    }

    /// Simulated payment: checks the card, waits, then marks the booking confirmed.
    pub async fn confirm(
        &self,
        user_id: i32,
        booking_id: i32,
        payment: PaymentRequest,
    ) -> AppResult<BookingStatusResponse> {
        let booking = self.get_for_user(user_id, booking_id).await?;
        if !booking.status.can_transition_to(BookingStatus::Confirmed) {
            return Err(AppError::Conflict(format!(
                "Booking is {} and cannot be paid",
                booking.status
            )));
        }

        payment.validate()?;

        if !self.checkout.payment_delay.is_zero() {
            tokio::time::sleep(self.checkout.payment_delay).await;
        }

        self.transition(booking, BookingStatus::Confirmed, ClientRoute::Home)
            .await
    }

    pub async fn cancel(&self, user_id: i32, booking_id: i32) -> AppResult<BookingStatusResponse> {
        let booking = self.get_for_user(user_id, booking_id).await?;
        if !booking.status.can_transition_to(BookingStatus::Cancelled) {
            return Err(AppError::Conflict(format!(
                "Booking is {} and cannot be cancelled",
                booking.status
            )));
        }

        self.transition(booking, BookingStatus::Cancelled, ClientRoute::Cabinet)
            .await
    }

    async fn transition(
        &self,
        booking: Booking,
        next: BookingStatus,
        then: ClientRoute,
    ) -> AppResult<BookingStatusResponse> {
        let updated = self
            .bookings
            .update_status(booking.id, booking.status, next)
            .await?;
        if !updated {
            // Someone else moved the booking since we read it
            return Err(AppError::Conflict("Booking status changed concurrently".into()));
        }

        tracing::info!(
            booking_id = booking.id,
            from = %booking.status,
            to = %next,
            "booking status changed"
        );

        let booking = self.get_for_user(booking.user_id, booking.id).await?;
        Ok(BookingStatusResponse {
            booking,
            next: then.path().to_string(),
        })
    }
}
