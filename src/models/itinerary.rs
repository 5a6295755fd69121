use crate::models::navigation::ClientRoute;
use crate::models::pricing::AddOns;
use crate::models::search::{CabinClass, PassengerCounts, SearchParams};
use crate::utils::error::{AppError, AppResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Query contract of the passenger-details page: the chosen legs plus what was searched for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Checkout {
    pub outbound_id: i32,
    pub inbound_id: Option<i32>,
    pub adults: u8,
    pub children: u8,
    pub infants: u8,
    pub class: CabinClass,
}

impl Checkout {
    pub fn new(outbound_id: i32, inbound_id: Option<i32>, search: &SearchParams) -> Self {
        Checkout {
            outbound_id,
            inbound_id,
            adults: search.adults,
            children: search.children,
            infants: search.infants,
            class: search.class,
        }
    }

    pub fn passengers(&self) -> PassengerCounts {
        PassengerCounts {
            adults: self.adults,
            children: self.children,
            infants: self.infants,
        }
    }

    pub fn href(&self) -> AppResult<String> {
        ClientRoute::PassengerDetails.href(self)
    }
}

/// Two-phase flight pick on the results page.
///
/// `OutboundSelecting -> InboundSelecting -> Done` for round trips,
/// `OutboundSelecting -> Done` when no return date was searched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SelectionState {
    #[default]
    OutboundSelecting,
    InboundSelecting {
        outbound_id: i32,
    },
    Done(Checkout),
}

impl SelectionState {
    pub fn select(self, flight_id: i32, search: &SearchParams) -> AppResult<SelectionState> {
        match self {
            SelectionState::OutboundSelecting if search.is_round_trip() => {
                Ok(SelectionState::InboundSelecting {
                    outbound_id: flight_id,
                })
            }
            SelectionState::OutboundSelecting => {
                Ok(SelectionState::Done(Checkout::new(flight_id, None, search)))
            }
            SelectionState::InboundSelecting { outbound_id } => {
                if outbound_id == flight_id {
                    return Err(AppError::ValidationError(
                        "Return flight must differ from the outbound flight".into(),
                    ));
                }
                Ok(SelectionState::Done(Checkout::new(
                    outbound_id,
                    Some(flight_id),
                    search,
                )))
            }
            SelectionState::Done(_) => Err(AppError::Conflict(
                "Itinerary is already complete".into(),
            )),
        }
    }

    // Results page while picking, passenger details once done
    pub fn next(&self, search: &SearchParams) -> AppResult<String> {
        match self {
            SelectionState::Done(checkout) => checkout.href(),
            _ => search.href(),
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SelectionRequest {
    pub search: SearchParams,
    #[serde(default)]
    pub state: SelectionState,
    pub flight_id: i32,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct SelectionResponse {
    pub state: SelectionState,
    pub next: String,
}

#[derive(Debug, Clone)]
pub struct QuoteQuery {
    pub outbound_id: i32,
    pub inbound_id: Option<i32>,
    pub class: CabinClass,
    pub passengers: PassengerCounts,
    pub add_ons: AddOns,
}
