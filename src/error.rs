//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//! Rust에서는 예외(exception) 대신 `Result<T, E>` 타입으로 에러를 처리합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환
//!
//! 등록 도메인에서 특히 중요한 구분:
//! - `BadRequest`: 폼 검증 실패. 어떤 필드가 문제인지 메시지에 담아 사용자에게 보여줍니다.
//! - `FeeNotConfigured`: 분류된 등록 유형에 해당하는 요금표 항목이 없는 상태.
//!   검증 실패와는 다른 별도의 에러 코드로 내려가며, 0원으로 조용히 처리하지 않습니다.

use axum::{
    http::StatusCode,                     // HTTP 상태 코드 (200, 404, 500 등)
    response::{IntoResponse, Response},   // Axum의 응답 변환 트레이트
    Json,                                 // JSON 응답 래퍼
};
use serde_json::json; // json! 매크로: JSON 객체를 간편하게 생성
use thiserror::Error; // thiserror: 커스텀 에러 타입을 쉽게 만들어주는 매크로 크레이트

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 리소스를 찾을 수 없음 (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// 잘못된 요청. 폼 검증 실패 포함 (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 분류된 등록 유형에 요금표 항목이 없음 (HTTP 422)
    /// 무료(0원)와는 다른 상태입니다. 사용자에게 "관리자에게 문의" 안내가 나갑니다.
    #[error("Registration fee is not configured for {0}")]
    FeeNotConfigured(String),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// #[from]: sqlx::Error → AppError::Database 자동 변환.
    /// sqlx 호출에 `?`를 쓰면 이 variant로 전파됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 파일 입출력 오류 (HTTP 500)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 인증 실패 (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 인증은 되었지만 권한 부족. 관리자 전용 경계 (HTTP 403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// 리소스 충돌. 이미 존재하는 계정 이메일 등 (HTTP 409)
    #[error("Conflict: {0}")]
    Conflict(String),
}

// Err(AppError)를 반환하면 Axum이 이 구현을 호출하여
// 적절한 상태 코드와 { "error": { code, message } } 본문을 생성합니다.
// 내부 에러(Database, IO, Internal)는 실제 내용을 로그에만 기록하고,
// 클라이언트에는 일반적인 메시지만 반환합니다 (보안을 위해).
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            AppError::BadRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", msg.clone())
            }
            AppError::FeeNotConfigured(ref ty) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "fee_not_configured",
                format!(
                    "Registration fee for {} is not configured yet. Please contact the administrator.",
                    ty
                ),
            ),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Io(ref e) => {
                tracing::error!("IO error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "io_error",
                    "An IO error occurred".to_string(),
                )
            }
            AppError::Unauthorized(ref msg) => {
                (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone())
            }
            AppError::Forbidden(ref msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
