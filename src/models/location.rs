use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, sqlx::FromRow)]
pub struct Location {
    pub id: i32,
    pub city: String,
    pub country: String,
    pub code: String,
}

impl Location {
    /// Case-insensitive substring match on city, country or airport code.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.city.to_lowercase().contains(&term)
            || self.country.to_lowercase().contains(&term)
            || self.code.to_lowercase().contains(&term)
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct LocationListResponse {
    pub locations: Vec<Location>,
}

// Directory used when no locations have been loaded
pub fn default_locations() -> Vec<Location> {
    [
        (1, "Baku", "Azerbaijan", "GYD"),
        (2, "Istanbul", "Türkiye", "IST"),
        (3, "Moscow", "Russia", "VKO"),
        (4, "Dubai", "United Arab Emirates", "DXB"),
        (5, "London", "United Kingdom", "LHR"),
        (6, "Paris", "France", "CDG"),
        (7, "New York", "United States", "JFK"),
        (8, "Tbilisi", "Georgia", "TBS"),
    ]
    .into_iter()
    .map(|(id, city, country, code)| Location {
        id,
        city: city.to_string(),
        country: country.to_string(),
        code: code.to_string(),
    })
    .collect()
}
