use std::sync::Arc;

use sqlx::SqlitePool;

use crate::clock::{Clock, LocalClock};
use crate::config::AppConfig;
use crate::db;
use crate::extraction::FoodExtractor;
use crate::llm::{LanguageModel, OpenAiClient};
use crate::nutrition::{NutritionDatabase, NutritionResolver, NutritionixClient};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub extractor: FoodExtractor,
    pub resolver: NutritionResolver,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub async fn init(config: AppConfig, clock: LocalClock) -> anyhow::Result<Self> {
        let db = db::connect(&config.database_url).await?;
        db::migrate(&db).await?;

        let llm = Arc::new(OpenAiClient::new(&config.llm)) as Arc<dyn LanguageModel>;
        let nutrition =
            Arc::new(NutritionixClient::new(&config.nutritionix)) as Arc<dyn NutritionDatabase>;

        Ok(Self::from_parts(
            db,
            &config.llm.model,
            llm,
            nutrition,
            Arc::new(clock),
        ))
    }

    pub fn from_parts(
        db: SqlitePool,
        model: &str,
        llm: Arc<dyn LanguageModel>,
        nutrition: Arc<dyn NutritionDatabase>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let extractor = FoodExtractor::new(llm, model);
        let resolver = NutritionResolver::new(nutrition);
        Self {
            db,
            extractor,
            resolver,
            clock,
        }
    }

    /// State backed by an in-memory database, the given fakes, and a clock
    /// frozen at `now`.
    #[cfg(test)]
    pub async fn fake(
        llm: Arc<dyn LanguageModel>,
        nutrition: Arc<dyn NutritionDatabase>,
        now: time::OffsetDateTime,
    ) -> Self {
        use crate::clock::FixedClock;

        Self::from_parts(
            db::memory_pool().await,
            "gpt-3.5-turbo",
            llm,
            nutrition,
            Arc::new(FixedClock(now)),
        )
    }
}
