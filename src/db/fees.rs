use crate::error::AppError;
use crate::models::fee::RegistrationFee;
use crate::models::registration::RegistrationType;
use sqlx::SqlitePool;

pub async fn find_by_type(
    pool: &SqlitePool,
    registration_type: RegistrationType,
) -> Result<Option<RegistrationFee>, AppError> {
    let fee = sqlx::query_as::<_, RegistrationFee>(
        r#"
        SELECT id, registration_type, regular_fee, early_bird_fee, updated_at
        FROM registration_fees
        WHERE registration_type = ?
        "#,
    )
    .bind(registration_type)
    .fetch_optional(pool)
    .await?;

    Ok(fee)
}

pub async fn list_fees(pool: &SqlitePool) -> Result<Vec<RegistrationFee>, AppError> {
    let fees = sqlx::query_as::<_, RegistrationFee>(
        r#"
        SELECT id, registration_type, regular_fee, early_bird_fee, updated_at
        FROM registration_fees
        ORDER BY registration_type
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(fees)
}

pub async fn upsert_fee(
    pool: &SqlitePool,
    id: &str,
    registration_type: RegistrationType,
    regular_fee: i64,
    early_bird_fee: i64,
    updated_at: &str,
) -> Result<RegistrationFee, AppError> {
    sqlx::query(
        r#"
        INSERT INTO registration_fees (id, registration_type, regular_fee, early_bird_fee, updated_at)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(registration_type) DO UPDATE SET
            regular_fee = excluded.regular_fee,
            early_bird_fee = excluded.early_bird_fee,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(id)
    .bind(registration_type)
    .bind(regular_fee)
    .bind(early_bird_fee)
    .bind(updated_at)
    .execute(pool)
    .await?;

    find_by_type(pool, registration_type)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve upserted fee".to_string()))
}
