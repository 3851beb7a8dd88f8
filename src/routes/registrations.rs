//! # 등록(Registration) 라우트 핸들러
//!
//! 공개 등록 제출과 관리자 대시보드의 등록 관리 핸들러들입니다.
//!
//! ## 엔드포인트
//! - `POST   /api/v1/registrations`                          → 등록 제출 (공개)
//! - `GET    /api/v1/registrations`                          → 등록 목록 (관리자)
//! - `GET    /api/v1/registrations/export`                   → CSV 내보내기 (관리자)
//! - `DELETE /api/v1/registrations/{id}`                     → 등록 삭제 (관리자)
//! - `PATCH  /api/v1/registrations/{id}/payment-status`      → 결제 상태 변경 (관리자)
//! - `PATCH  /api/v1/presenter-registrations/{id}/paper-status` → 논문 상태 변경 (관리자)
//! - `PATCH  /api/v1/presenters/{id}/comment`                → 심사 코멘트 저장 (관리자)
//!
//! 결제 상태와 논문 상태는 서로 독립적인 평면(flat) 상태 집합입니다.
//! 강제된 진행 순서가 없으며, 관리자가 어떤 상태에서든 다른 상태로 바꿀 수 있습니다.

use crate::{
    db,
    error::AppError,
    middleware::auth::AdminUser,
    models::*,
    services,
};
use axum::{
    extract::{Path, State},
    http::header,
    Json,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// SqlitePool은 내부적으로 Arc를 사용하므로 clone해도 풀이 복제되지 않습니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀 (내부적으로 Arc로 공유)
    pub pool: SqlitePool,
    /// JWT 토큰 서명용 비밀키
    pub jwt_secret: String,
}

/// `POST /registrations` — 공개 등록 제출.
///
/// 검증 → 기간 판정 → 분류 → 요금 확인 → 원자적 저장의 전 과정은
/// `services::registration::submit`에 있습니다. 성공 시 새 등록 id를 반환합니다.
pub async fn submit_registration(
    State(state): State<AppState>,
    Json(req): Json<SubmitRegistrationRequest>,
) -> Result<Json<Value>, AppError> {
    let id = services::registration::submit(&state.pool, &req).await?;
    Ok(Json(json!({ "success": true, "id": id })))
}

/// `GET /registrations` — 관리자 목록 조회.
/// 각 행에는 현재 요금표가 시사하는 금액(fee)이 함께 내려갑니다.
pub async fn list_registrations(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Value>, AppError> {
    let registrations = db::list_registrations(&state.pool).await?;
    Ok(Json(json!({ "registrations": registrations })))
}

/// `GET /registrations/export` — 발표자 목록 CSV 내보내기.
pub async fn export_registrations(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<([(header::HeaderName, String); 2], String), AppError> {
    let registrations = db::list_registrations(&state.pool).await?;
    let csv = services::export::registrations_csv(&registrations);

    let today = chrono::Utc::now().format("%Y-%m-%d");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"presenters-{}.csv\"", today),
            ),
        ],
        csv,
    ))
}

/// `PATCH /registrations/{id}/payment-status` — 결제 상태 직접 변경.
/// 값이 enum의 멤버인지는 역직렬화가 보장합니다. 그 외의 검증은 없습니다.
pub async fn update_payment_status(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(req): Json<UpdatePaymentStatusRequest>,
) -> Result<Json<Value>, AppError> {
    db::update_payment_status(&state.pool, &id, req.status).await?;
    Ok(Json(json!({ "success": true })))
}

/// `PATCH /presenter-registrations/{id}/paper-status` — 논문 심사 상태 변경.
pub async fn update_paper_status(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(req): Json<UpdatePaperStatusRequest>,
) -> Result<Json<Value>, AppError> {
    db::update_paper_status(&state.pool, &id, req.status).await?;
    Ok(Json(json!({ "success": true })))
}

/// `PATCH /presenters/{id}/comment` — 발표자별 심사 코멘트 저장.
pub async fn update_presenter_comment(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateCommentRequest>,
) -> Result<Json<Value>, AppError> {
    db::update_presenter_comment(&state.pool, &id, &req.comment).await?;
    Ok(Json(json!({ "success": true })))
}

/// `DELETE /registrations/{id}` — 등록 삭제. 하위 레코드는 CASCADE로 함께 삭제됩니다.
pub async fn delete_registration(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    db::delete_registration(&state.pool, &id).await?;
    Ok(Json(json!({ "success": true })))
}
