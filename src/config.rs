use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NutritionixConfig {
    pub app_id: String,
    pub app_key: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub llm: LlmConfig,
    pub nutritionix: NutritionixConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://data/macro_tracker.db?mode=rwc".into());
        let llm = LlmConfig {
            api_key: std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY is not set")?,
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".into()),
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".into()),
        };
        let nutritionix = NutritionixConfig {
            app_id: std::env::var("NUTRITIONIX_APP_ID")
                .context("NUTRITIONIX_APP_ID is not set")?,
            app_key: std::env::var("NUTRITIONIX_APP_KEY")
                .context("NUTRITIONIX_APP_KEY is not set")?,
            base_url: std::env::var("NUTRITIONIX_BASE_URL")
                .unwrap_or_else(|_| "https://trackapi.nutritionix.com/v2".into()),
        };
        Ok(Self {
            database_url,
            llm,
            nutritionix,
        })
    }
}
