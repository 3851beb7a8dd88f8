//! # 요금 산정 서비스
//!
//! 분류기 + 얼리버드 기간 판정 + 요금표 조회를 조합합니다.
//! 요금표 항목이 없는 범주는 `None`("미설정")으로 구분해서 돌려주며,
//! 절대 0원으로 대체하지 않습니다. 0원은 "무료 등록"이라는 별개의 정상 결과입니다.

use crate::db;
use crate::error::AppError;
use crate::models::fee::FeeQuote;
use crate::models::registration::{AttendingAs, RegistrationType, SessionType};
use crate::services::classify::classify;
use sqlx::SqlitePool;

/// 범주와 얼리버드 여부로 요금을 조회합니다.
/// `Ok(None)`은 요금표에 해당 범주가 없다는 뜻입니다. 호출자는 이를
/// "미설정" 상태로 표면화해야 하며 숫자 기본값으로 다뤄서는 안 됩니다.
pub async fn resolve_fee(
    pool: &SqlitePool,
    registration_type: RegistrationType,
    is_early_bird: bool,
) -> Result<Option<i64>, AppError> {
    let fee = db::fees::find_by_type(pool, registration_type).await?;
    Ok(fee.map(|f| {
        if is_early_bird {
            f.early_bird_fee
        } else {
            f.regular_fee
        }
    }))
}

/// 공개 요금 미리보기. 부작용이 없고 멱등합니다.
/// 제출 핸들러와 같은 분류기/기간 판정/요금 조회를 거치므로
/// 미리보기와 실제 저장 값이 어긋날 수 없습니다.
pub async fn quote(
    pool: &SqlitePool,
    attending_as: AttendingAs,
    nationality: Option<&str>,
    session_type: SessionType,
) -> Result<FeeQuote, AppError> {
    let now = db::periods::now_utc();
    let period = db::periods::resolve_active_period(pool, &now).await?;
    let is_early_bird = period.is_some();

    let registration_type = classify(attending_as, nationality, session_type);
    let fee = resolve_fee(pool, registration_type, is_early_bird).await?;

    Ok(FeeQuote {
        registration_type,
        is_early_bird,
        configured: fee.is_some(),
        fee,
        period_ends_at: period.map(|p| p.end_date),
    })
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
    async fn missing_fee_entry_is_unconfigured_for_both_flags() {
        let pool = test_pool().await;
        sqlx::query("DELETE FROM registration_fees WHERE registration_type = ?")
            .bind(RegistrationType::PresenterForeignerOnline)
            .execute(&pool)
            .await
            .unwrap();

        for early in [true, false] {
            let fee = resolve_fee(&pool, RegistrationType::PresenterForeignerOnline, early)
                .await
                .unwrap();
            assert_eq!(fee, None);
        }
    }

    #[tokio::test]
    async fn fee_of_zero_is_distinct_from_unconfigured() {
        let pool = test_pool().await;
        db::fees::upsert_fee(
            &pool,
            "fee-test",
            RegistrationType::OnlineParticipantOneDay,
            0,
            0,
            &db::periods::now_utc(),
        )
        .await
        .unwrap();

        let fee = resolve_fee(&pool, RegistrationType::OnlineParticipantOneDay, false)
            .await
            .unwrap();
        assert_eq!(fee, Some(0));
    }

    #[tokio::test]
    async fn quote_picks_early_bird_fee_inside_active_period() {
        let pool = test_pool().await;
        let now = db::periods::now_utc();

        // 현재 시각을 포함하는 활성 기간을 하나 만든다.
        db::periods::create_period(&pool, "p-1", "2000-01-01T00:00:00.000Z", "2999-01-01T00:00:00.000Z")
            .await
            .unwrap();
        db::fees::upsert_fee(
            &pool,
            "fee-offline-domestic",
            RegistrationType::PresenterIndonesiaStudentOffline,
            50000,
            40000,
            &now,
        )
        .await
        .unwrap();

        let quote = quote(
            &pool,
            AttendingAs::Presenter,
            Some("Indonesia"),
            SessionType::Offline,
        )
        .await
        .unwrap();

        assert_eq!(
            quote.registration_type,
            RegistrationType::PresenterIndonesiaStudentOffline
        );
        assert!(quote.is_early_bird);
        assert_eq!(quote.fee, Some(40000));
        assert!(quote.configured);
    }
}
