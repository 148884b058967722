use std::sync::Arc;

use tracing::{debug, instrument, warn};

use super::{NutritionDatabase, NutritionResult};

/// Outcome of resolving one food item.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(NutritionResult),
    /// The database has no usable data for the food.
    NoMatch,
    /// The lookup itself failed (transport error, non-success status, bad payload).
    Unavailable(String),
}

/// Builds the phrase sent to the natural-language nutrient endpoint.
///
/// The descriptive measurement wins when present. Otherwise quantities of
/// 100 and up are sent as grams and smaller ones unitless, so "50 egg"
/// reads as a count rather than 50 grams.
pub fn nutrient_query(food: &str, quantity: f64, measurement: Option<&str>) -> String {
    match measurement.map(str::trim).filter(|m| !m.is_empty()) {
        Some(m) => format!("{} {}", m, food),
        None if quantity >= 100.0 => format!("{}g {}", quantity, food),
        None => format!("{} {}", quantity, food),
    }
}

#[derive(Clone)]
pub struct NutritionResolver {
    db: Arc<dyn NutritionDatabase>,
}

impl NutritionResolver {
    pub fn new(db: Arc<dyn NutritionDatabase>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn resolve(&self, food: &str, quantity: f64, measurement: Option<&str>) -> Resolution {
        let candidates = match self.db.search_instant(food).await {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "instant search failed");
                return Resolution::Unavailable(e.to_string());
            }
        };
        if candidates.is_empty() {
            debug!("no search candidates");
            return Resolution::NoMatch;
        }

        let query = nutrient_query(food, quantity, measurement);
        let foods = match self.db.natural_nutrients(&query).await {
            Ok(f) => f,
            Err(e) => {
                warn!(error = %e, %query, "nutrient lookup failed");
                return Resolution::Unavailable(e.to_string());
            }
        };
        let Some(first) = foods.into_iter().next() else {
            debug!(%query, "nutrient lookup returned no foods");
            return Resolution::NoMatch;
        };

        let measurement = match measurement.filter(|m| !m.trim().is_empty()) {
            Some(m) => m.to_string(),
            None => format!("{}g", quantity),
        };
        Resolution::Resolved(NutritionResult {
            calories: first.nf_calories.unwrap_or(0.0).max(0.0),
            protein: first.nf_protein.unwrap_or(0.0).max(0.0),
            measurement,
        })
    }
}
