use serde::{Deserialize, Serialize};

use crate::extraction::ClarificationSuggestion;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

/// One extracted item that the nutrition database could resolve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodDetail {
    pub food: String,
    pub quantity: f64,
    pub measurement: String,
    pub calories: f64,
    pub protein: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Totals {
    pub calories: f64,
    pub protein: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatSummary {
    pub summary: String,
    pub details: Vec<FoodDetail>,
    pub totals: Totals,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChatOutcome {
    Logged(ChatSummary),
    NeedsClarification(ClarificationSuggestion),
}
