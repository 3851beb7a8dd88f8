//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)와 서비스(services/)에서 이 모듈의 함수를 호출합니다.
//!
//! 각 하위 모듈:
//! - `fees`: 등록비 테이블 조회/편집 쿼리
//! - `periods`: 얼리버드 기간 판정과 CRUD 쿼리
//! - `registrations`: 등록 집계의 원자적 저장과 관리자 상태 변경 쿼리
//! - `users`: 사용자 인증 관련 쿼리

pub mod fees;
pub mod periods;
pub mod registrations;
pub mod users;

// 하위 모듈의 모든 공개 함수를 재공개(re-export)하여
// `crate::db::list_registrations`처럼 바로 접근할 수 있게 합니다.
pub use fees::*;
pub use periods::*;
pub use registrations::*;
