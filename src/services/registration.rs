//! # 등록 제출 서비스
//!
//! 공개 등록 폼의 제출을 처리합니다. 처리 순서는 고정입니다:
//! (1) 스키마 검증 → (2) 활성 얼리버드 기간 판정 → (3) 범주 분류 →
//! (4) 요금 확인(미설정이면 차단, 0원이면 입금증 생략 허용) →
//! (5) 집계 전체를 하나의 트랜잭션으로 저장.
//! 검증은 어떤 영속화보다도 먼저 수행되며, 실패한 제출은 레코드를 남기지 않습니다.

use crate::db;
use crate::error::AppError;
use crate::models::registration::{AttendingAs, NewRegistration, SubmitRegistrationRequest};
use crate::services::classify::classify;
use crate::services::fees::resolve_fee;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use sqlx::SqlitePool;

const MAX_PRESENTERS: usize = 3;
const MIN_PASSWORD_LEN: usize = 6;

pub async fn submit(
    pool: &SqlitePool,
    req: &SubmitRegistrationRequest,
) -> Result<String, AppError> {
    validate(req)?;

    // 계정 이메일 중복은 트랜잭션을 열기 전에 걸러냅니다.
    if db::users::find_by_email(pool, &req.email).await?.is_some() {
        return Err(AppError::Conflict(
            "An account with this email already exists".to_string(),
        ));
    }

    // 기간 판정은 요청마다 새로 수행합니다. 관리자가 언제든 기간을 고칠 수 있습니다.
    let now = db::periods::now_utc();
    let period = db::periods::resolve_active_period(pool, &now).await?;
    let is_early_bird = period.is_some();

    // 범주는 서버가 계산합니다. 클라이언트가 고른 값은 신뢰하지 않습니다.
    let nationality = req.presenters.first().map(|p| p.nationality.as_str());
    let registration_type = classify(req.attending_as, nationality, req.session_type);

    let fee = resolve_fee(pool, registration_type, is_early_bird)
        .await?
        .ok_or_else(|| AppError::FeeNotConfigured(registration_type.as_str().to_string()))?;

    // 입금증은 무료(0원) 등록에서만 생략할 수 있습니다.
    if fee > 0 && req.proof_of_payment.is_empty() {
        return Err(AppError::BadRequest(
            "Payment proof must be uploaded".to_string(),
        ));
    }

    // Argon2id로 비밀번호를 해싱합니다. 평문은 저장하지도, 로그에 남기지도 않습니다.
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?
        .to_string();

    let new = NewRegistration {
        attending_as: req.attending_as,
        session_type: req.session_type,
        registration_type,
        is_early_bird,
        period_id: period.map(|p| p.id),
        proof_of_payment: req.proof_of_payment.clone(),
        email: req.email.clone(),
        password_hash,
        current_status: req.current_status,
        affiliation: req.affiliation.clone(),
        topic_preference: req.topic_preference,
        presentation_title: req.presentation_title.clone(),
        presentation_category: req.presentation_category,
        paper_submission: req.paper_submission.clone(),
        abstract_submission: req.abstract_submission.clone(),
        dietary_preference: req.dietary_preference,
        presenters: req.presenters.clone(),
    };

    let id = db::registrations::create_registration(pool, &new).await?;
    tracing::info!(registration_id = %id, registration_type = registration_type.as_str(), "registration created");

    Ok(id)
}

/// 스키마 수준 검증. 어떤 영속화보다 먼저 실행됩니다.
/// 입금증의 "필수 여부"는 요금에 달려 있으므로 여기서는 형식만 확인하고,
/// 요금이 정해진 뒤 submit()에서 필수 여부를 확인합니다.
fn validate(req: &SubmitRegistrationRequest) -> Result<(), AppError> {
    if req.attending_as != AttendingAs::Presenter {
        return Err(AppError::BadRequest(
            "Only presenter registration is currently open".to_string(),
        ));
    }
    if req.presenters.is_empty() {
        return Err(AppError::BadRequest(
            "At least one presenter is required".to_string(),
        ));
    }
    if req.presenters.len() > MAX_PRESENTERS {
        return Err(AppError::BadRequest(
            "Maximum of three presenters allowed".to_string(),
        ));
    }
    for presenter in &req.presenters {
        if presenter.name.trim().is_empty() {
            return Err(AppError::BadRequest("Presenter name is required".to_string()));
        }
        if presenter.nationality.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Presenter nationality is required".to_string(),
            ));
        }
    }
    if !req.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email format".to_string()));
    }
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(
            "Password must be at least 6 characters".to_string(),
        ));
    }
    if req.affiliation.trim().is_empty() {
        return Err(AppError::BadRequest("Affiliation is required".to_string()));
    }
    if req.presentation_title.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Presentation title is required".to_string(),
        ));
    }
    if req.paper_submission.trim().is_empty() {
        return Err(AppError::BadRequest("Paper must be uploaded".to_string()));
    }
    // 업로드 협력자는 프로토콜이 붙은 URL을 돌려줍니다. 그 외의 값은 거부합니다.
    if !req.proof_of_payment.is_empty() && !req.proof_of_payment.starts_with("http") {
        return Err(AppError::BadRequest(
            "Payment proof must be an uploaded file URL".to_string(),
        ));
    }
    if !req.agree_to_terms {
        return Err(AppError::BadRequest(
            "You must agree to the terms and conditions".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::presenter::{
        CurrentStatus, PresentationCategory, PresenterInput, TopicPreference,
    };
    use crate::models::registration::SessionType;

    fn valid_request() -> SubmitRegistrationRequest {
        SubmitRegistrationRequest {
            attending_as: AttendingAs::Presenter,
            session_type: SessionType::Offline,
            presentation_category: PresentationCategory::Oral,
            presenters: vec![PresenterInput {
                name: "Siti Rahma".to_string(),
                nationality: "Indonesia".to_string(),
            }],
            email: "siti@example.com".to_string(),
            password: "secret123".to_string(),
            current_status: CurrentStatus::MasterStudent,
            affiliation: "Seoul National University".to_string(),
            topic_preference: TopicPreference::Engineering,
            presentation_title: "Catalyst design".to_string(),
            paper_submission: "https://files.example.com/paper.pdf".to_string(),
            abstract_submission: None,
            dietary_preference: None,
            proof_of_payment: "https://files.example.com/proof.png".to_string(),
            agree_to_terms: true,
        }
    }

    #[test]
    fn valid_request_passes_schema_validation() {
        assert!(validate(&valid_request()).is_ok());
    }

    #[test]
    fn participant_payload_is_rejected() {
        let mut req = valid_request();
        req.attending_as = AttendingAs::Participant;
        assert!(validate(&req).is_err());
    }

    #[test]
    fn presenter_count_is_bounded() {
        let mut req = valid_request();
        req.presenters.clear();
        assert!(validate(&req).is_err());

        let mut req = valid_request();
        let presenter = req.presenters[0].clone();
        req.presenters = vec![presenter; 4];
        assert!(validate(&req).is_err());
    }

    #[test]
    fn short_password_is_rejected() {
        let mut req = valid_request();
        req.password = "abc".to_string();
        assert!(validate(&req).is_err());
    }

    #[test]
    fn non_url_payment_proof_is_rejected() {
        let mut req = valid_request();
        req.proof_of_payment = "not-a-url".to_string();
        assert!(validate(&req).is_err());
    }

    #[test]
    fn terms_must_be_accepted() {
        let mut req = valid_request();
        req.agree_to_terms = false;
        assert!(validate(&req).is_err());
    }
}
