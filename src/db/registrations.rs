use crate::db;
use crate::error::AppError;
use crate::models::presenter::{PaperStatus, Presenter, PresenterRegistration};
use crate::models::registration::{
    AttendingAs, NewRegistration, PaymentStatus, PresenterRegistrationDetail, Registration,
    RegistrationDetail,
};
use crate::models::user::UserRole;
use sqlx::SqlitePool;
use std::collections::HashMap;

/// 등록 집계를 하나의 트랜잭션으로 저장합니다:
/// registrations + presenter_registrations + presenters + 발급된 로그인 계정.
/// 어느 단계에서든 실패하면 전체가 롤백되어 부분 레코드가 남지 않습니다.
pub async fn create_registration(
    pool: &SqlitePool,
    new: &NewRegistration,
) -> Result<String, AppError> {
    let mut tx = pool.begin().await?;

    let now = db::periods::now_utc();
    let registration_id = uuid::Uuid::now_v7().to_string();

    sqlx::query(
        r#"
        INSERT INTO registrations
            (id, attending_as, session_type, registration_type, payment_status,
             is_early_bird, period_id, proof_of_payment, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&registration_id)
    .bind(new.attending_as)
    .bind(new.session_type)
    .bind(new.registration_type)
    .bind(PaymentStatus::Pending)
    .bind(new.is_early_bird)
    .bind(&new.period_id)
    .bind(&new.proof_of_payment)
    .bind(&now)
    .execute(&mut *tx)
    .await?;

    let user_id = uuid::Uuid::now_v7().to_string();
    sqlx::query(
        r#"
        INSERT INTO users (id, email, name, password_hash, role, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&user_id)
    .bind(&new.email)
    .bind(&new.presenters[0].name)
    .bind(&new.password_hash)
    .bind(UserRole::Presenter)
    .bind(&now)
    .bind(&now)
    .execute(&mut *tx)
    .await?;

    let presenter_registration_id = uuid::Uuid::now_v7().to_string();
    sqlx::query(
        r#"
        INSERT INTO presenter_registrations
            (id, registration_id, user_id, email, current_status, affiliation,
             topic_preference, presentation_title, presentation_category,
             paper_submission, abstract_submission, paper_status, dietary_preference)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&presenter_registration_id)
    .bind(&registration_id)
    .bind(&user_id)
    .bind(&new.email)
    .bind(new.current_status)
    .bind(&new.affiliation)
    .bind(new.topic_preference)
    .bind(&new.presentation_title)
    .bind(new.presentation_category)
    .bind(&new.paper_submission)
    .bind(&new.abstract_submission)
    .bind(PaperStatus::UnderReview)
    .bind(new.dietary_preference)
    .execute(&mut *tx)
    .await?;

    for (index, presenter) in new.presenters.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO presenters
                (id, presenter_registration_id, name, nationality, presenter_order)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(uuid::Uuid::now_v7().to_string())
        .bind(&presenter_registration_id)
        .bind(&presenter.name)
        .bind(&presenter.nationality)
        .bind((index + 1) as i64)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(registration_id)
}

pub async fn find_registration(
    pool: &SqlitePool,
    id: &str,
) -> Result<Option<Registration>, AppError> {
    let registration = sqlx::query_as::<_, Registration>(
        r#"
        SELECT id, attending_as, session_type, registration_type, payment_status,
               is_early_bird, period_id, proof_of_payment, created_at
        FROM registrations
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(registration)
}

/// 관리자 목록: 등록 + 발표자 상세 + 현재 요금표가 시사하는 금액.
/// 금액은 저장된 isEarlyBird 스냅샷과 현재 요금표의 조합이며,
/// 요금표 항목이 없는 범주는 None으로 내려갑니다.
pub async fn list_registrations(pool: &SqlitePool) -> Result<Vec<RegistrationDetail>, AppError> {
    let registrations = sqlx::query_as::<_, Registration>(
        r#"
        SELECT id, attending_as, session_type, registration_type, payment_status,
               is_early_bird, period_id, proof_of_payment, created_at
        FROM registrations
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    let fees = db::fees::list_fees(pool).await?;
    let fee_map: HashMap<_, _> = fees
        .into_iter()
        .map(|f| (f.registration_type, (f.regular_fee, f.early_bird_fee)))
        .collect();

    let mut details = Vec::with_capacity(registrations.len());
    for registration in registrations {
        let fee = fee_map.get(&registration.registration_type).map(|&(regular, early)| {
            if registration.is_early_bird {
                early
            } else {
                regular
            }
        });

        let presenter_registration = if registration.attending_as == AttendingAs::Presenter {
            find_presenter_detail(pool, &registration.id).await?
        } else {
            None
        };

        details.push(RegistrationDetail {
            registration,
            presenter_registration,
            fee,
        });
    }

    Ok(details)
}

async fn find_presenter_detail(
    pool: &SqlitePool,
    registration_id: &str,
) -> Result<Option<PresenterRegistrationDetail>, AppError> {
    let record = sqlx::query_as::<_, PresenterRegistration>(
        r#"
        SELECT id, registration_id, user_id, email, current_status, affiliation,
               topic_preference, presentation_title, presentation_category,
               paper_submission, abstract_submission, paper_status, dietary_preference
        FROM presenter_registrations
        WHERE registration_id = ?
        "#,
    )
    .bind(registration_id)
    .fetch_optional(pool)
    .await?;

    let Some(record) = record else {
        return Ok(None);
    };

    let presenters = sqlx::query_as::<_, Presenter>(
        r#"
        SELECT id, presenter_registration_id, name, nationality, presenter_order, comment
        FROM presenters
        WHERE presenter_registration_id = ?
        ORDER BY presenter_order
        "#,
    )
    .bind(&record.id)
    .fetch_all(pool)
    .await?;

    Ok(Some(PresenterRegistrationDetail { record, presenters }))
}

pub async fn update_payment_status(
    pool: &SqlitePool,
    id: &str,
    status: PaymentStatus,
) -> Result<(), AppError> {
    let result = sqlx::query("UPDATE registrations SET payment_status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(())
}

pub async fn update_paper_status(
    pool: &SqlitePool,
    presenter_registration_id: &str,
    status: PaperStatus,
) -> Result<(), AppError> {
    let result = sqlx::query("UPDATE presenter_registrations SET paper_status = ? WHERE id = ?")
        .bind(status)
        .bind(presenter_registration_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(())
}

pub async fn update_presenter_comment(
    pool: &SqlitePool,
    presenter_id: &str,
    comment: &str,
) -> Result<(), AppError> {
    let result = sqlx::query("UPDATE presenters SET comment = ? WHERE id = ?")
        .bind(comment)
        .bind(presenter_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(())
}

/// 등록 삭제. 하위 레코드(발표자 등록, 발표자 목록)는 FK CASCADE로 함께 지워집니다.
/// 발급되었던 로그인 계정은 남겨둡니다.
pub async fn delete_registration(pool: &SqlitePool, id: &str) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM registrations WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(())
}

pub async fn count_registrations(pool: &SqlitePool) -> Result<i64, AppError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM registrations")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
