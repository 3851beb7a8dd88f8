use crate::error::AppError;
use crate::models::fee::EarlyBirdPeriod;
use chrono::Utc;
use sqlx::SqlitePool;

/// 저장 형식과 동일한 고정 UTC 타임스탬프 문자열.
/// 이 형식은 사전순 비교가 시간순 비교와 일치합니다.
pub fn now_utc() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// 현재 시각을 포함하는 활성 기간 중 end_date가 가장 늦은 것을 고릅니다.
/// 겹치는 기간이 있으면 연장된(늦게 끝나는) 쪽이 결정적으로 이깁니다.
/// 없으면 None입니다. 정가가 적용된다는 신호이며 에러가 아닙니다.
/// 관리자가 언제든 기간을 수정할 수 있으므로 결과를 캐시하지 않습니다.
pub async fn resolve_active_period(
    pool: &SqlitePool,
    now: &str,
) -> Result<Option<EarlyBirdPeriod>, AppError> {
    let period = sqlx::query_as::<_, EarlyBirdPeriod>(
        r#"
        SELECT id, start_date, end_date, is_active, created_at
        FROM early_bird_periods
        WHERE is_active = 1 AND start_date <= ? AND end_date >= ?
        ORDER BY end_date DESC
        LIMIT 1
        "#,
    )
    .bind(now)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(period)
}

pub async fn list_periods(pool: &SqlitePool) -> Result<Vec<EarlyBirdPeriod>, AppError> {
    let periods = sqlx::query_as::<_, EarlyBirdPeriod>(
        r#"
        SELECT id, start_date, end_date, is_active, created_at
        FROM early_bird_periods
        ORDER BY end_date DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(periods)
}

pub async fn find_period(
    pool: &SqlitePool,
    id: &str,
) -> Result<Option<EarlyBirdPeriod>, AppError> {
    let period = sqlx::query_as::<_, EarlyBirdPeriod>(
        r#"
        SELECT id, start_date, end_date, is_active, created_at
        FROM early_bird_periods
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(period)
}

pub async fn create_period(
    pool: &SqlitePool,
    id: &str,
    start_date: &str,
    end_date: &str,
) -> Result<EarlyBirdPeriod, AppError> {
    sqlx::query(
        r#"
        INSERT INTO early_bird_periods (id, start_date, end_date, is_active)
        VALUES (?, ?, ?, 1)
        "#,
    )
    .bind(id)
    .bind(start_date)
    .bind(end_date)
    .execute(pool)
    .await?;

    find_period(pool, id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created period".to_string()))
}

pub async fn update_period(
    pool: &SqlitePool,
    id: &str,
    start_date: &str,
    end_date: &str,
    is_active: bool,
) -> Result<EarlyBirdPeriod, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE early_bird_periods
        SET start_date = ?, end_date = ?, is_active = ?
        WHERE id = ?
        "#,
    )
    .bind(start_date)
    .bind(end_date)
    .bind(is_active)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    find_period(pool, id)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn delete_period(pool: &SqlitePool, id: &str) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM early_bird_periods WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!().run(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn no_period_resolves_to_none() {
        let pool = test_pool().await;
        let resolved = resolve_active_period(&pool, &now_utc()).await.unwrap();
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn latest_ending_period_wins_regardless_of_insert_order() {
        let pool = test_pool().await;

        // 나중에 끝나는 기간을 먼저 넣고, 먼저 끝나는 기간을 나중에 넣는다.
        create_period(&pool, "p-late", "2026-01-01T00:00:00.000Z", "2026-12-31T00:00:00.000Z")
            .await
            .unwrap();
        create_period(&pool, "p-early", "2026-01-01T00:00:00.000Z", "2026-06-30T00:00:00.000Z")
            .await
            .unwrap();

        let resolved = resolve_active_period(&pool, "2026-03-15T12:00:00.000Z")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(resolved.id, "p-late");

        // 삽입 순서를 뒤집어도 결과는 같다.
        delete_period(&pool, "p-late").await.unwrap();
        create_period(&pool, "p-late2", "2026-01-01T00:00:00.000Z", "2026-12-31T00:00:00.000Z")
            .await
            .unwrap();
        let resolved = resolve_active_period(&pool, "2026-03-15T12:00:00.000Z")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(resolved.id, "p-late2");
    }

    #[tokio::test]
    async fn inactive_and_out_of_window_periods_are_ignored() {
        let pool = test_pool().await;

        create_period(&pool, "p-past", "2025-01-01T00:00:00.000Z", "2025-02-01T00:00:00.000Z")
            .await
            .unwrap();
        create_period(&pool, "p-off", "2026-01-01T00:00:00.000Z", "2026-12-31T00:00:00.000Z")
            .await
            .unwrap();
        update_period(
            &pool,
            "p-off",
            "2026-01-01T00:00:00.000Z",
            "2026-12-31T00:00:00.000Z",
            false,
        )
        .await
        .unwrap();

        let resolved = resolve_active_period(&pool, "2026-03-15T12:00:00.000Z")
            .await
            .unwrap();
        assert!(resolved.is_none());
    }
}
