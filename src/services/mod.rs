//! # 서비스(비즈니스 로직) 모듈
//!
//! 라우트 핸들러가 호출하는 도메인 로직을 모아둔 모듈입니다.
//! - `classify`: 참가 역할/국적/세션 방식 → 등록 범주 (순수 함수)
//! - `fees`: 요금 산정 (분류기 + 얼리버드 기간 + 요금표의 조합)
//! - `registration`: 제출 검증과 원자적 저장 오케스트레이션
//! - `export`: 관리자용 CSV 투영

pub mod classify;
pub mod export;
pub mod fees;
pub mod registration;
