use serde::{Deserialize, Serialize};

use crate::models::presenter::{
    CurrentStatus, DietaryPreference, PresentationCategory, Presenter, PresenterInput,
    PresenterRegistration, TopicPreference,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendingAs {
    Presenter,
    Participant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Confirmed,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionType {
    Online,
    Offline,
}

/// 8개의 가격 책정 범주. 제출 시점에 분류기가 결정하며 이후 변경되지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationType {
    OnlineParticipantOneDay,
    OnlineParticipantTwoDays,
    OfflineParticipantOneDay,
    OfflineParticipantTwoDays,
    PresenterIndonesiaStudentOnline,
    PresenterIndonesiaStudentOffline,
    PresenterForeignerOnline,
    PresenterForeignerOffline,
}

impl RegistrationType {
    pub fn as_str(self) -> &'static str {
        match self {
            RegistrationType::OnlineParticipantOneDay => "ONLINE_PARTICIPANT_ONE_DAY",
            RegistrationType::OnlineParticipantTwoDays => "ONLINE_PARTICIPANT_TWO_DAYS",
            RegistrationType::OfflineParticipantOneDay => "OFFLINE_PARTICIPANT_ONE_DAY",
            RegistrationType::OfflineParticipantTwoDays => "OFFLINE_PARTICIPANT_TWO_DAYS",
            RegistrationType::PresenterIndonesiaStudentOnline => {
                "PRESENTER_INDONESIA_STUDENT_ONLINE"
            }
            RegistrationType::PresenterIndonesiaStudentOffline => {
                "PRESENTER_INDONESIA_STUDENT_OFFLINE"
            }
            RegistrationType::PresenterForeignerOnline => "PRESENTER_FOREIGNER_ONLINE",
            RegistrationType::PresenterForeignerOffline => "PRESENTER_FOREIGNER_OFFLINE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ONLINE_PARTICIPANT_ONE_DAY" => Some(RegistrationType::OnlineParticipantOneDay),
            "ONLINE_PARTICIPANT_TWO_DAYS" => Some(RegistrationType::OnlineParticipantTwoDays),
            "OFFLINE_PARTICIPANT_ONE_DAY" => Some(RegistrationType::OfflineParticipantOneDay),
            "OFFLINE_PARTICIPANT_TWO_DAYS" => Some(RegistrationType::OfflineParticipantTwoDays),
            "PRESENTER_INDONESIA_STUDENT_ONLINE" => {
                Some(RegistrationType::PresenterIndonesiaStudentOnline)
            }
            "PRESENTER_INDONESIA_STUDENT_OFFLINE" => {
                Some(RegistrationType::PresenterIndonesiaStudentOffline)
            }
            "PRESENTER_FOREIGNER_ONLINE" => Some(RegistrationType::PresenterForeignerOnline),
            "PRESENTER_FOREIGNER_OFFLINE" => Some(RegistrationType::PresenterForeignerOffline),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: String,
    pub attending_as: AttendingAs,
    pub session_type: SessionType,
    pub registration_type: RegistrationType,
    pub payment_status: PaymentStatus,
    pub is_early_bird: bool,
    pub period_id: Option<String>,
    pub proof_of_payment: String,
    pub created_at: String,
}

/// 공개 등록 폼이 보내는 payload. registrationType은 받지 않습니다.
/// 범주는 서버가 분류기로 계산하며, 미리보기 경로와 같은 코드를 사용합니다.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRegistrationRequest {
    pub attending_as: AttendingAs,
    pub session_type: SessionType,
    pub presentation_category: PresentationCategory,
    pub presenters: Vec<PresenterInput>,
    pub email: String,
    pub password: String,
    pub current_status: CurrentStatus,
    pub affiliation: String,
    pub topic_preference: TopicPreference,
    pub presentation_title: String,
    pub paper_submission: String,
    #[serde(default)]
    pub abstract_submission: Option<String>,
    #[serde(default)]
    pub dietary_preference: Option<DietaryPreference>,
    #[serde(default)]
    pub proof_of_payment: String,
    pub agree_to_terms: bool,
}

/// 검증과 요금 산정이 끝난 뒤 하나의 트랜잭션으로 저장되는 집계(aggregate).
#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub attending_as: AttendingAs,
    pub session_type: SessionType,
    pub registration_type: RegistrationType,
    pub is_early_bird: bool,
    pub period_id: Option<String>,
    pub proof_of_payment: String,
    pub email: String,
    pub password_hash: String,
    pub current_status: CurrentStatus,
    pub affiliation: String,
    pub topic_preference: TopicPreference,
    pub presentation_title: String,
    pub presentation_category: PresentationCategory,
    pub paper_submission: String,
    pub abstract_submission: Option<String>,
    pub dietary_preference: Option<DietaryPreference>,
    pub presenters: Vec<PresenterInput>,
}

/// 관리자 대시보드 목록의 한 행: 등록 + 발표자 상세 + 현재 요금표가 시사하는 금액.
/// fee는 저장된 isEarlyBird 스냅샷과 현재 요금표를 조합한 값이며,
/// 요금표 항목이 없으면 None입니다.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDetail {
    #[serde(flatten)]
    pub registration: Registration,
    pub presenter_registration: Option<PresenterRegistrationDetail>,
    pub fee: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenterRegistrationDetail {
    #[serde(flatten)]
    pub record: PresenterRegistration,
    pub presenters: Vec<Presenter>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePaymentStatusRequest {
    pub status: PaymentStatus,
}
