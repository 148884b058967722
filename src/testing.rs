//! In-process fakes for the external collaborators.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use crate::llm::{CompletionRequest, LanguageModel, LlmError};
use crate::nutrition::{InstantSearch, NutrientRecord, NutritionDatabase, NutritionError};

/// Replays canned completions in order. `None` replies fail with
/// [`LlmError::Empty`], as does running out of replies.
#[derive(Default)]
pub struct FakeLanguageModel {
    replies: Mutex<VecDeque<Option<String>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeLanguageModel {
    pub fn replying<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(|r| r.map(Into::into)).collect()),
            requests: Mutex::default(),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for FakeLanguageModel {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .flatten()
            .ok_or(LlmError::Empty)
    }
}

/// Knows a fixed set of foods. A nutrient query matches the known food
/// whose name it ends with.
#[derive(Default)]
pub struct FakeNutritionDatabase {
    foods: HashMap<String, Vec<NutrientRecord>>,
    failing: bool,
    branded_only: bool,
    nutrient_queries: Mutex<Vec<String>>,
}

impl FakeNutritionDatabase {
    pub fn with_food(mut self, name: &str, records: Vec<NutrientRecord>) -> Self {
        self.foods.insert(name.to_string(), records);
        self
    }

    pub fn with_calories(self, name: &str, calories: f64, protein: f64) -> Self {
        self.with_food(
            name,
            vec![NutrientRecord {
                nf_calories: Some(calories),
                nf_protein: Some(protein),
            }],
        )
    }

    /// Report search candidates under `branded` instead of `common`.
    pub fn branded_only(mut self) -> Self {
        self.branded_only = true;
        self
    }

    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn nutrient_queries(&self) -> Vec<String> {
        self.nutrient_queries.lock().unwrap().clone()
    }

    fn outage() -> NutritionError {
        NutritionError::Status {
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            body: "unavailable".into(),
        }
    }
}

#[async_trait]
impl NutritionDatabase for FakeNutritionDatabase {
    async fn search_instant(&self, query: &str) -> Result<InstantSearch, NutritionError> {
        if self.failing {
            return Err(Self::outage());
        }
        let hits = if self.foods.contains_key(query) {
            vec![json!({ "food_name": query })]
        } else {
            Vec::new()
        };
        Ok(if self.branded_only {
            InstantSearch {
                common: Vec::new(),
                branded: hits,
            }
        } else {
            InstantSearch {
                common: hits,
                branded: Vec::new(),
            }
        })
    }

    async fn natural_nutrients(&self, query: &str) -> Result<Vec<NutrientRecord>, NutritionError> {
        self.nutrient_queries.lock().unwrap().push(query.to_string());
        if self.failing {
            return Err(Self::outage());
        }
        Ok(self
            .foods
            .iter()
            .filter(|(name, _)| query.ends_with(name.as_str()))
            .max_by_key(|(name, _)| name.len())
            .map(|(_, records)| records.clone())
            .unwrap_or_default())
    }
}
