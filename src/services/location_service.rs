use crate::models::location::{default_locations, Location};
use crate::store::LocationRepository;
use crate::utils::error::AppResult;
use std::sync::Arc;

pub struct LocationService {
    locations: Arc<dyn LocationRepository>,
}

impl LocationService {
    pub fn new(locations: Arc<dyn LocationRepository>) -> Self {
        LocationService { locations }
    }

    /// Locations matching `search`; the built-in directory stands in while the store is empty.
    pub async fn list(&self, search: Option<&str>) -> AppResult<Vec<Location>> {
        let mut locations = self.locations.list_locations().await?;
        if locations.is_empty() {
            tracing::debug!("location store empty, serving defaults");
            locations = default_locations();
        }

        Ok(match search {
            Some(term) => locations.into_iter().filter(|l| l.matches(term)).collect(),
            None => locations,
        })
    }
}
