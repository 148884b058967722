use serde::Serialize;
use sqlx::{FromRow, Sqlite, SqlitePool};

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct FoodLogEntry {
    pub id: i64,
    pub food_name: String,
    pub calories: f64,
    pub protein: f64,
    pub date: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewFoodLog {
    pub food_name: String,
    pub calories: f64,
    pub protein: f64,
    pub date: String,
}

/// Newest first, optionally restricted to one `YYYY-MM-DD` date.
pub async fn list(db: &SqlitePool, date: Option<&str>) -> sqlx::Result<Vec<FoodLogEntry>> {
    sqlx::query_as::<_, FoodLogEntry>(
        r#"
        SELECT id, food_name, calories, protein, date, created_at
          FROM food_logs
         WHERE ?1 IS NULL OR date = ?1
         ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(date)
    .fetch_all(db)
    .await
}

/// Insert one entry; works on the pool or inside a transaction.
pub async fn insert<'e, E>(exec: E, entry: &NewFoodLog, created_at: &str) -> sqlx::Result<i64>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let done = sqlx::query(
        r#"
        INSERT INTO food_logs (food_name, calories, protein, date, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&entry.food_name)
    .bind(entry.calories)
    .bind(entry.protein)
    .bind(&entry.date)
    .bind(created_at)
    .execute(exec)
    .await?;
    Ok(done.last_insert_rowid())
}

/// Returns `false` when no entry had that id.
pub async fn delete(db: &SqlitePool, id: i64) -> sqlx::Result<bool> {
    let done = sqlx::query("DELETE FROM food_logs WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(done.rows_affected() > 0)
}

pub async fn delete_all(db: &SqlitePool) -> sqlx::Result<u64> {
    let done = sqlx::query("DELETE FROM food_logs").execute(db).await?;
    Ok(done.rows_affected())
}
