use std::collections::HashMap;

use serde::Serialize;
use sqlx::SqlitePool;
use time::{Date, Duration};

use crate::clock::format_date;

pub const WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotals {
    pub date: String,
    pub calories: f64,
    pub protein: f64,
}

async fn totals_between(
    db: &SqlitePool,
    start: &str,
    end: &str,
) -> sqlx::Result<Vec<(String, f64, f64)>> {
    sqlx::query_as::<_, (String, f64, f64)>(
        r#"
        SELECT date, SUM(calories), SUM(protein)
          FROM food_logs
         WHERE date BETWEEN ?1 AND ?2
         GROUP BY date
         ORDER BY date
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(db)
    .await
}

/// One row per day for the week ending `today`, oldest first. Days with no
/// entries are zero-filled.
pub async fn weekly_stats(db: &SqlitePool, today: Date) -> sqlx::Result<Vec<DailyTotals>> {
    let days: Vec<String> = (0..WINDOW_DAYS)
        .rev()
        .map(|back| format_date(today - Duration::days(back)))
        .collect();

    let rows = totals_between(db, &days[0], &days[days.len() - 1]).await?;
    let mut by_date: HashMap<String, (f64, f64)> = rows
        .into_iter()
        .map(|(date, calories, protein)| (date, (calories, protein)))
        .collect();

    Ok(days
        .into_iter()
        .map(|date| {
            let (calories, protein) = by_date.remove(&date).unwrap_or((0.0, 0.0));
            DailyTotals {
                date,
                calories,
                protein,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;
    use crate::logs::repo::{insert, NewFoodLog};
    use time::macros::date;

    async fn log(db: &SqlitePool, date: &str, calories: f64, protein: f64) {
        let entry = NewFoodLog {
            food_name: "x".into(),
            calories,
            protein,
            date: date.into(),
        };
        insert(db, &entry, "2024-01-01 00:00:00").await.unwrap();
    }

    #[tokio::test]
    async fn seven_days_zero_filled_and_summed() {
        let db = memory_pool().await;
        log(&db, "2024-03-01", 300.0, 20.0).await;
        log(&db, "2024-03-01", 200.0, 5.5).await;
        log(&db, "2024-02-25", 100.0, 1.0).await;
        log(&db, "2024-02-24", 50.0, 2.0).await;
        // outside the window on both sides
        log(&db, "2024-02-23", 999.0, 99.0).await;
        log(&db, "2024-03-02", 999.0, 99.0).await;

        let stats = weekly_stats(&db, date!(2024 - 03 - 01)).await.unwrap();
        let dates: Vec<&str> = stats.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(
            dates,
            vec![
                "2024-02-24",
                "2024-02-25",
                "2024-02-26",
                "2024-02-27",
                "2024-02-28",
                "2024-02-29",
                "2024-03-01",
            ]
        );
        assert_eq!(stats[0].calories, 50.0);
        assert_eq!(stats[1].calories, 100.0);
        assert_eq!(stats[2].calories, 0.0);
        assert_eq!(stats[2].protein, 0.0);
        assert_eq!(stats[6].calories, 500.0);
        assert_eq!(stats[6].protein, 25.5);
    }

    #[tokio::test]
    async fn empty_store_is_all_zero() {
        let db = memory_pool().await;
        let stats = weekly_stats(&db, date!(2024 - 12 - 31)).await.unwrap();
        assert_eq!(stats.len(), 7);
        assert_eq!(stats[0].date, "2024-12-25");
        assert!(stats.iter().all(|d| d.calories == 0.0 && d.protein == 0.0));
    }
}
