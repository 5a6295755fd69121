use crate::utils::error::{AppError, AppResult};
use schemars::JsonSchema;
use serde::Serialize;

// Pages of the booking front end that responses can point at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
pub enum ClientRoute {
    Home,
    Booking,
    Cabinet,
    Login,
    Confirmation,
    PassengerDetails,
    DataConfirmation,
    Payment,
}

impl ClientRoute {
    pub fn path(&self) -> &'static str {
        match self {
            ClientRoute::Home => "/",
            ClientRoute::Booking => "/booking",
            ClientRoute::Cabinet => "/cabinet",
            ClientRoute::Login => "/login",
            ClientRoute::Confirmation => "/confirmation",
            ClientRoute::PassengerDetails => "/passenger-details",
            ClientRoute::DataConfirmation => "/data-confirmation",
            ClientRoute::Payment => "/payment",
        }
    }

    /// Builds `path?k=v&...` from any flat serializable query; `None` fields are left out.
    pub fn href<Q: Serialize + ?Sized>(&self, query: &Q) -> AppResult<String> {
        let query = serde_urlencoded::to_string(query)
            .map_err(|e| AppError::ValidationError(format!("Failed to build link: {}", e)))?;

        if query.is_empty() {
            Ok(self.path().to_string())
        } else {
            Ok(format!("{}?{}", self.path(), query))
        }
    }
}
