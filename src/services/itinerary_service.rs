use crate::config::CheckoutConfig;
use crate::models::itinerary::{QuoteQuery, SelectionRequest, SelectionResponse};
use crate::models::pricing::{self, PriceQuote};
use crate::services::flight_service::FlightService;
use crate::store::FlightRepository;
use crate::utils::error::{AppError, AppResult};
use std::sync::Arc;

pub struct ItineraryService {
    flight_service: FlightService,
    checkout: CheckoutConfig,
}

impl ItineraryService {
    pub fn new(flights: Arc<dyn FlightRepository>, checkout: CheckoutConfig) -> Self {
        ItineraryService {
            flight_service: FlightService::new(flights),
            checkout,
        }
    }

    /// Advances the outbound/inbound selection with the picked flight.
    pub async fn select_flight(&self, request: SelectionRequest) -> AppResult<SelectionResponse> {
        request.search.passengers().validate()?;

        // Unknown flights never enter an itinerary
        self.flight_service.get_flight(request.flight_id).await?;

        let state = request.state.select(request.flight_id, &request.search)?;
        let next = state.next(&request.search)?;

        Ok(SelectionResponse { state, next })
    }

    pub async fn quote(&self, query: QuoteQuery) -> AppResult<PriceQuote> {
        query.passengers.validate()?;
        if query.inbound_id == Some(query.outbound_id) {
            return Err(AppError::ValidationError(
                "Return flight must differ from the outbound flight".into(),
            ));
        }

        let outbound = self.flight_service.get_flight(query.outbound_id).await?;
        let inbound = match query.inbound_id {
            Some(id) => Some(self.flight_service.get_flight(id).await?),
            None => None,
        };

        Ok(pricing::quote(
            &outbound,
            inbound.as_ref(),
            query.class,
            &query.passengers,
            query.add_ons,
            &self.checkout,
        ))
    }
}
