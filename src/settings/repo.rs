use sqlx::SqlitePool;

pub const DEFAULT_MAINTENANCE_CALORIES: i64 = 2000;

pub async fn maintenance_calories(db: &SqlitePool) -> sqlx::Result<i64> {
    let row = sqlx::query_scalar::<_, i64>(
        "SELECT maintenance_calories FROM settings WHERE id = 1",
    )
    .fetch_optional(db)
    .await?;
    Ok(row.unwrap_or(DEFAULT_MAINTENANCE_CALORIES))
}

pub async fn set_maintenance_calories(
    db: &SqlitePool,
    calories: i64,
    updated_at: &str,
) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO settings (id, maintenance_calories, updated_at)
        VALUES (1, ?1, ?2)
        ON CONFLICT (id) DO UPDATE
           SET maintenance_calories = excluded.maintenance_calories,
               updated_at = excluded.updated_at
        "#,
    )
    .bind(calories)
    .bind(updated_at)
    .execute(db)
    .await?;
    Ok(())
}
