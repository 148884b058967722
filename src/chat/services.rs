use anyhow::Context;
use tracing::{debug, info, instrument, warn};

use super::dto::{ChatOutcome, ChatSummary, FoodDetail, Totals};
use crate::clock::{format_date, format_timestamp};
use crate::error::ApiError;
use crate::logs::repo::{self, NewFoodLog};
use crate::nutrition::Resolution;
use crate::state::AppState;

pub const NOT_UNDERSTOOD: &str =
    "Could not understand your input. Please be more specific about what you ate.";

/// Extract foods from `message`, resolve their nutrition one by one, log
/// every resolved item for today and report the totals.
///
/// Items the nutrition database can't resolve are left out silently. When
/// nothing at all can be extracted the model is asked for suggestions
/// instead, and nothing is written.
#[instrument(skip(st))]
pub async fn handle_chat(st: &AppState, message: &str) -> Result<ChatOutcome, ApiError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(ApiError::bad_request("Message is required"));
    }

    let items = st.extractor.extract(message).await;
    if items.is_empty() {
        return match st.extractor.clarify(message).await {
            Ok(suggestion) => {
                info!(suggestions = suggestion.suggestions.len(), "asking for clarification");
                Ok(ChatOutcome::NeedsClarification(suggestion))
            }
            Err(e) => {
                warn!(error = %e, "clarification failed");
                Err(ApiError::bad_request(NOT_UNDERSTOOD))
            }
        };
    }

    let mut details = Vec::with_capacity(items.len());
    for item in items {
        match st
            .resolver
            .resolve(&item.food, item.quantity, item.measurement.as_deref())
            .await
        {
            Resolution::Resolved(n) => details.push(FoodDetail {
                food: item.food,
                quantity: item.quantity,
                measurement: n.measurement,
                calories: n.calories,
                protein: n.protein,
            }),
            Resolution::NoMatch => debug!(food = %item.food, "no nutrition match; skipping"),
            Resolution::Unavailable(reason) => {
                warn!(food = %item.food, %reason, "nutrition lookup unavailable; skipping")
            }
        }
    }

    persist(st, &details).await?;

    let summary = summarize(details);
    info!(summary = %summary.summary, items = summary.details.len(), "chat logged");
    Ok(ChatOutcome::Logged(summary))
}

/// Human-readable name stored in the log, e.g. "palm-sized chicken".
pub fn log_name(detail: &FoodDetail) -> String {
    if detail.measurement.is_empty() {
        format!("{} {}", detail.quantity, detail.food)
    } else {
        format!("{} {}", detail.measurement, detail.food)
    }
}

pub fn summarize(details: Vec<FoodDetail>) -> ChatSummary {
    let totals = details.iter().fold(Totals::default(), |acc, d| Totals {
        calories: acc.calories + d.calories,
        protein: acc.protein + d.protein,
    });
    ChatSummary {
        summary: format!(
            "{:.0} calories, {:.1}g protein",
            totals.calories, totals.protein
        ),
        details,
        totals,
    }
}

/// All entries of one turn share today's date and land in one transaction.
async fn persist(st: &AppState, details: &[FoodDetail]) -> Result<(), ApiError> {
    if details.is_empty() {
        return Ok(());
    }
    let now = st.clock.now();
    let date = format_date(now.date());
    let created_at = format_timestamp(now);

    let mut tx = st.db.begin().await.context("begin tx")?;
    for detail in details {
        let entry = NewFoodLog {
            food_name: log_name(detail),
            calories: detail.calories,
            protein: detail.protein,
            date: date.clone(),
        };
        repo::insert(&mut *tx, &entry, &created_at)
            .await
            .with_context(|| format!("insert food log {}", entry.food_name))?;
    }
    tx.commit().await.context("commit tx")?;
    Ok(())
}
