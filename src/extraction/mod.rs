use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::llm::{strip_code_fences, CompletionRequest, LanguageModel, LlmError};

pub mod prompts;

/// A food mentioned in the utterance with the model's portion estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodItem {
    pub food: String,
    /// Estimated grams or millilitres, always positive.
    pub quantity: f64,
    /// The portion phrase as the user said it, if any.
    pub measurement: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClarificationSuggestion {
    pub needs_clarification: bool,
    pub suggestions: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error(transparent)]
    Model(#[from] LlmError),
    #[error("model reply is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("model reply has unexpected shape: expected {0}")]
    Shape(&'static str),
}

#[derive(Clone)]
pub struct FoodExtractor {
    llm: Arc<dyn LanguageModel>,
    model: String,
}

impl FoodExtractor {
    pub fn new(llm: Arc<dyn LanguageModel>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
        }
    }

    /// Items found in `utterance`, or an empty list if extraction failed.
    pub async fn extract(&self, utterance: &str) -> Vec<FoodItem> {
        match self.try_extract(utterance).await {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "food extraction failed");
                Vec::new()
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn try_extract(&self, utterance: &str) -> Result<Vec<FoodItem>, ExtractionError> {
        let reply = self
            .llm
            .complete(CompletionRequest {
                model: self.model.clone(),
                system: prompts::EXTRACT_SYSTEM.to_string(),
                prompt: prompts::extraction_prompt(utterance),
                max_tokens: prompts::EXTRACT_MAX_TOKENS,
                temperature: prompts::TEMPERATURE,
            })
            .await?;
        let items = parse_food_items(&reply)?;
        debug!(count = items.len(), "food items extracted");
        Ok(items)
    }

    #[instrument(skip(self))]
    pub async fn clarify(&self, utterance: &str) -> Result<ClarificationSuggestion, ExtractionError> {
        let reply = self
            .llm
            .complete(CompletionRequest {
                model: self.model.clone(),
                system: prompts::CLARIFY_SYSTEM.to_string(),
                prompt: prompts::clarification_prompt(utterance),
                max_tokens: prompts::CLARIFY_MAX_TOKENS,
                temperature: prompts::TEMPERATURE,
            })
            .await?;
        parse_clarification(&reply)
    }
}

pub fn parse_food_items(reply: &str) -> Result<Vec<FoodItem>, ExtractionError> {
    let value: Value = serde_json::from_str(strip_code_fences(reply))?;
    let Value::Array(entries) = value else {
        return Err(ExtractionError::Shape("a JSON array"));
    };

    let mut items = Vec::with_capacity(entries.len());
    for entry in entries {
        match food_item(&entry) {
            Some(item) => items.push(item),
            None => warn!(%entry, "dropping malformed food item"),
        }
    }
    Ok(items)
}

fn food_item(entry: &Value) -> Option<FoodItem> {
    let food = entry.get("food")?.as_str()?.trim();
    if food.is_empty() {
        return None;
    }
    let quantity = match entry.get("quantity")? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !quantity.is_finite() || quantity <= 0.0 {
        return None;
    }
    let measurement = entry
        .get("measurement")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string);

    Some(FoodItem {
        food: food.to_string(),
        quantity,
        measurement,
    })
}

pub fn parse_clarification(reply: &str) -> Result<ClarificationSuggestion, ExtractionError> {
    let value: Value = serde_json::from_str(strip_code_fences(reply))?;
    let Value::Object(obj) = value else {
        return Err(ExtractionError::Shape("a JSON object"));
    };

    // We only get here because nothing was extracted, so a missing flag
    // still means clarification is needed.
    let needs_clarification = obj.get("needs_clarification").map_or(true, truthy);
    let suggestions = match obj.get("suggestions") {
        Some(Value::Array(list)) => list
            .iter()
            .filter_map(|s| s.as_str())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    Ok(ClarificationSuggestion {
        needs_clarification,
        suggestions,
    })
}

fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
