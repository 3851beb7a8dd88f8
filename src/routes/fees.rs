//! # 요금(Fee) 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET /api/v1/fees`                     → 요금표 전체 조회 (공개)
//! - `GET /api/v1/fees/quote`               → 요금 미리보기 (공개, 부작용 없음)
//! - `PUT /api/v1/fees/{registration_type}` → 요금표 항목 편집 (관리자)
//!
//! 미리보기는 제출 핸들러와 같은 분류기/기간 판정/요금 조회를 사용하므로
//! 폼에 보여준 금액과 실제 저장되는 등록의 금액이 어긋날 수 없습니다.

use crate::{
    db,
    error::AppError,
    middleware::auth::AdminUser,
    models::*,
    routes::registrations::AppState,
    services,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeQuoteParams {
    pub attending_as: AttendingAs,
    pub session_type: SessionType,
    pub nationality: Option<String>,
}

/// `GET /fees/quote` — 현재 시점 기준의 요금 미리보기.
/// 몇 번을 호출해도 같은 입력과 같은 요금표/기간 상태에서는 같은 결과가 나옵니다.
pub async fn quote_fee(
    State(state): State<AppState>,
    Query(params): Query<FeeQuoteParams>,
) -> Result<Json<FeeQuote>, AppError> {
    let quote = services::fees::quote(
        &state.pool,
        params.attending_as,
        params.nationality.as_deref(),
        params.session_type,
    )
    .await?;

    Ok(Json(quote))
}

/// `GET /fees` — 요금표 전체. 가격 안내 페이지와 관리자 편집기가 사용합니다.
pub async fn list_fees(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let fees = db::fees::list_fees(&state.pool).await?;
    Ok(Json(json!({ "fees": fees })))
}

/// `PUT /fees/{registration_type}` — 요금표 항목 편집.
/// 두 금액 모두 0 이상이어야 합니다. earlyBirdFee ≤ regularFee는 강제하지 않습니다.
/// 변경은 다음 요금 조회부터 즉시 반영됩니다.
pub async fn upsert_fee(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(registration_type): Path<String>,
    Json(req): Json<UpsertFeeRequest>,
) -> Result<Json<Value>, AppError> {
    let registration_type = RegistrationType::parse(&registration_type).ok_or_else(|| {
        AppError::BadRequest(format!("Unknown registration type: {}", registration_type))
    })?;

    if req.regular_fee < 0 || req.early_bird_fee < 0 {
        return Err(AppError::BadRequest(
            "Fees must be non-negative".to_string(),
        ));
    }

    let fee = db::fees::upsert_fee(
        &state.pool,
        &uuid::Uuid::now_v7().to_string(),
        registration_type,
        req.regular_fee,
        req.early_bird_fee,
        &db::periods::now_utc(),
    )
    .await?;

    Ok(Json(json!({ "success": true, "fee": fee })))
}
