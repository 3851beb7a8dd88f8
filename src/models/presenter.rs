use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaperStatus {
    NotSubmitted,
    UnderReview,
    RevisionRequested,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CurrentStatus {
    BachelorStudent,
    MasterStudent,
    PhdStudent,
    ResearcherProfessional,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TopicPreference {
    Engineering,
    HealthScience,
    LifeScience,
    EarthScience,
    MaterialScience,
    SocialLawPoliticalScience,
    Humanities,
    SportsAndArts,
    BusinessPublicAdministration,
    Education,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PresentationCategory {
    Oral,
    Poster,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DietaryPreference {
    Halal,
    Vegetarian,
    NoPreference,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PresenterRegistration {
    pub id: String,
    pub registration_id: String,
    pub user_id: String,
    pub email: String,
    pub current_status: CurrentStatus,
    pub affiliation: String,
    pub topic_preference: TopicPreference,
    pub presentation_title: String,
    pub presentation_category: PresentationCategory,
    pub paper_submission: String,
    pub abstract_submission: Option<String>,
    pub paper_status: PaperStatus,
    pub dietary_preference: Option<DietaryPreference>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Presenter {
    pub id: String,
    pub presenter_registration_id: String,
    pub name: String,
    pub nationality: String,
    pub presenter_order: i64,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenterInput {
    pub name: String,
    pub nationality: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePaperStatusRequest {
    pub status: PaperStatus,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub comment: String,
}
