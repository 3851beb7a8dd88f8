//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//! Axum에서 핸들러는 HTTP 요청을 받아 응답을 반환하는 async 함수입니다.
//!
//! 각 하위 모듈:
//! - `auth`: 인증 관련 (로그인, 토큰 갱신, 로그아웃, 내 정보)
//! - `fees`: 요금표 조회/미리보기/편집 핸들러
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `periods`: 얼리버드 기간 관리 핸들러
//! - `registrations`: 등록 제출과 관리자 등록 관리 핸들러

pub mod auth;
pub mod fees;
pub mod health;
pub mod periods;
pub mod registrations;

// 각 모듈의 핸들러 함수들을 재공개하여
// main.rs에서 `routes::submit_registration`처럼 바로 접근 가능하게 합니다.
pub use fees::*;
pub use health::*;
pub use periods::*;
pub use registrations::*;
