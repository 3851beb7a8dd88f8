use serde::{Deserialize, Serialize};

use crate::models::registration::RegistrationType;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationFee {
    pub id: String,
    pub registration_type: RegistrationType,
    pub regular_fee: i64,
    pub early_bird_fee: i64,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EarlyBirdPeriod {
    pub id: String,
    pub start_date: String,
    pub end_date: String,
    pub is_active: bool,
    pub created_at: String,
}

/// 공개 요금 미리보기의 응답. 제출 핸들러와 같은 분류/산정 코드를 거칩니다.
///
/// `configured = false`는 분류된 범주에 요금표 항목이 없다는 뜻이며,
/// fee가 0인 것(무료 등록)과는 다른 상태입니다.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeQuote {
    pub registration_type: RegistrationType,
    pub is_early_bird: bool,
    pub configured: bool,
    pub fee: Option<i64>,
    pub period_ends_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertFeeRequest {
    pub regular_fee: i64,
    pub early_bird_fee: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePeriodRequest {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePeriodRequest {
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub is_active: Option<bool>,
}
