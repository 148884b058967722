use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::{InstantSearch, NutrientRecord, NutritionDatabase, NutritionError};
use crate::config::NutritionixConfig;

#[derive(Debug, Clone)]
pub struct NutritionixClient {
    app_id: String,
    app_key: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct NaturalResponse {
    #[serde(default)]
    foods: Option<Vec<NutrientRecord>>,
}

impl NutritionixClient {
    pub fn new(config: &NutritionixConfig) -> Self {
        Self {
            app_id: config.app_id.clone(),
            app_key: config.app_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("x-app-id", &self.app_id)
            .header("x-app-key", &self.app_key)
            .header("x-remote-user-id", "0")
    }
}

async fn error_for_status(response: reqwest::Response) -> NutritionError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    NutritionError::Status { status, body }
}

#[async_trait]
impl NutritionDatabase for NutritionixClient {
    async fn search_instant(&self, query: &str) -> Result<InstantSearch, NutritionError> {
        let url = format!("{}/search/instant", self.base_url);
        let response = self
            .authed(self.client.get(&url))
            .query(&[("query", query), ("detailed", "true")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_for_status(response).await);
        }

        let results: InstantSearch = response.json().await?;
        debug!(
            %query,
            common = results.common.len(),
            branded = results.branded.len(),
            "instant search"
        );
        Ok(results)
    }

    async fn natural_nutrients(&self, query: &str) -> Result<Vec<NutrientRecord>, NutritionError> {
        let url = format!("{}/natural/nutrients", self.base_url);
        let response = self
            .authed(self.client.post(&url))
            .json(&json!({ "query": query }))
            .send()
            .await?;

        // Nutritionix answers 404 when the phrase matched nothing.
        if response.status() == StatusCode::NOT_FOUND {
            debug!(%query, "natural nutrients: no match");
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            return Err(error_for_status(response).await);
        }

        let parsed: NaturalResponse = response.json().await?;
        let foods = parsed.foods.unwrap_or_default();
        debug!(%query, foods = foods.len(), "natural nutrients");
        Ok(foods)
    }
}
