//! # 얼리버드 기간 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET    /api/v1/early-bird`      → 기간 목록 (관리자)
//! - `POST   /api/v1/early-bird`      → 기간 생성 (관리자)
//! - `PUT    /api/v1/early-bird/{id}` → 기간 수정 (관리자)
//! - `DELETE /api/v1/early-bird/{id}` → 기간 삭제 (관리자)
//!
//! 생성은 추가(additive)입니다: 새 기간을 만들어도 기존 기간은 비활성화되지
//! 않습니다. 겹치는 활성 기간이 있으면 요금 판정에서 end_date가 가장 늦은
//! 기간이 이깁니다.

use crate::{
    db,
    error::AppError,
    middleware::auth::AdminUser,
    models::*,
    routes::registrations::AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

/// 입력 날짜를 저장 형식으로 정규화합니다.
/// RFC 3339를 받아 UTC의 고정 형식 문자열로 변환합니다.
/// 형식이 일정해야 사전순 비교가 시간순 비교와 일치합니다.
fn normalize_date(value: &str, field: &str) -> Result<String, AppError> {
    let parsed = DateTime::parse_from_rfc3339(value)
        .map_err(|_| AppError::BadRequest(format!("Invalid {} date format", field)))?;
    Ok(parsed
        .with_timezone(&Utc)
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string())
}

pub async fn list_periods(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Value>, AppError> {
    let periods = db::list_periods(&state.pool).await?;
    Ok(Json(json!({ "periods": periods })))
}

pub async fn create_period(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(req): Json<CreatePeriodRequest>,
) -> Result<Json<Value>, AppError> {
    let start_date = normalize_date(&req.start_date, "start")?;
    let end_date = normalize_date(&req.end_date, "end")?;
    if end_date <= start_date {
        return Err(AppError::BadRequest(
            "End date must be after start date".to_string(),
        ));
    }

    let period = db::create_period(
        &state.pool,
        &uuid::Uuid::now_v7().to_string(),
        &start_date,
        &end_date,
    )
    .await?;

    Ok(Json(json!({ "success": true, "period": period })))
}

pub async fn update_period(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(req): Json<UpdatePeriodRequest>,
) -> Result<Json<Value>, AppError> {
    let start_date = normalize_date(&req.start_date, "start")?;
    let end_date = normalize_date(&req.end_date, "end")?;
    if end_date <= start_date {
        return Err(AppError::BadRequest(
            "End date must be after start date".to_string(),
        ));
    }

    let is_active = match req.is_active {
        Some(value) => value,
        None => db::find_period(&state.pool, &id)
            .await?
            .ok_or(AppError::NotFound)?
            .is_active,
    };

    let period = db::update_period(&state.pool, &id, &start_date, &end_date, is_active).await?;

    Ok(Json(json!({ "success": true, "period": period })))
}

pub async fn delete_period(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    db::delete_period(&state.pool, &id).await?;
    Ok(Json(json!({ "success": true })))
}
