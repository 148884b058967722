use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod nutritionix;
pub mod resolver;

pub use nutritionix::NutritionixClient;
pub use resolver::{NutritionResolver, Resolution};

#[derive(Debug, thiserror::Error)]
pub enum NutritionError {
    #[error("nutrition api request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("nutrition api returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Candidates from the fuzzy name search. Entries are kept opaque, only
/// their presence matters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstantSearch {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub common: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub branded: Vec<serde_json::Value>,
}

impl InstantSearch {
    pub fn is_empty(&self) -> bool {
        self.common.is_empty() && self.branded.is_empty()
    }
}

/// One food from the natural-language nutrient endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NutrientRecord {
    #[serde(default)]
    pub nf_calories: Option<f64>,
    #[serde(default)]
    pub nf_protein: Option<f64>,
}

/// Calories and protein for one resolved portion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionResult {
    pub calories: f64,
    pub protein: f64,
    pub measurement: String,
}

#[async_trait]
pub trait NutritionDatabase: Send + Sync {
    async fn search_instant(&self, query: &str) -> Result<InstantSearch, NutritionError>;

    /// An empty list means the phrase matched no food.
    async fn natural_nutrients(&self, query: &str) -> Result<Vec<NutrientRecord>, NutritionError>;
}

fn null_as_empty<'de, D, T>(de: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(de)?.unwrap_or_default())
}
