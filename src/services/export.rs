//! # CSV 내보내기 서비스
//!
//! 관리자 대시보드의 발표자 목록을 CSV 텍스트로 투영(projection)합니다.
//! 읽기 전용이며 역방향(CSV 가져오기)은 없습니다.

use crate::models::presenter::PresentationCategory;
use crate::models::registration::{AttendingAs, RegistrationDetail, SessionType};

const HEADERS: [&str; 13] = [
    "Name",
    "Email",
    "Status",
    "Presentation Type",
    "Session",
    "Affiliation",
    "Topic",
    "Nationality",
    "Presentation Title",
    "Paper URL",
    "Payment Status",
    "Dietary Preference",
    "Paper Status",
];

/// 발표자 등록만 골라 한 행씩 CSV로 만듭니다.
/// 모든 셀은 따옴표로 감싸고, 내부 따옴표는 두 번 써서 이스케이프합니다.
pub fn registrations_csv(rows: &[RegistrationDetail]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(HEADERS.iter().map(|h| quote(h)).collect::<Vec<_>>().join(","));

    for row in rows {
        if row.registration.attending_as != AttendingAs::Presenter {
            continue;
        }
        let Some(detail) = &row.presenter_registration else {
            continue;
        };
        let first = detail.presenters.first();

        let presentation_type = match detail.record.presentation_category {
            PresentationCategory::Oral => "Oral Presenter",
            PresentationCategory::Poster => "Poster Presenter",
        };
        let session = match row.registration.session_type {
            SessionType::Online => "Online",
            SessionType::Offline => "Onsite",
        };

        let cells = [
            first.map(|p| p.name.clone()).unwrap_or_default(),
            detail.record.email.clone(),
            wire_label(&detail.record.current_status),
            presentation_type.to_string(),
            session.to_string(),
            detail.record.affiliation.clone(),
            wire_label(&detail.record.topic_preference),
            first.map(|p| p.nationality.clone()).unwrap_or_default(),
            detail.record.presentation_title.clone(),
            detail.record.paper_submission.clone(),
            wire_label(&row.registration.payment_status),
            detail
                .record
                .dietary_preference
                .as_ref()
                .map(wire_label)
                .unwrap_or_else(|| "N/A".to_string()),
            wire_label(&detail.record.paper_status),
        ];

        lines.push(cells.iter().map(|c| quote(c)).collect::<Vec<_>>().join(","));
    }

    lines.join("\n")
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// 상태 enum의 와이어 표현(SCREAMING_SNAKE_CASE)을 셀 값으로 씁니다.
fn wire_label<T: serde::Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::presenter::{
        CurrentStatus, PaperStatus, PresentationCategory, Presenter, PresenterRegistration,
        TopicPreference,
    };
    use crate::models::registration::{
        PaymentStatus, PresenterRegistrationDetail, Registration, RegistrationType,
    };

    fn sample_row() -> RegistrationDetail {
        RegistrationDetail {
            registration: Registration {
                id: "reg-1".to_string(),
                attending_as: AttendingAs::Presenter,
                session_type: SessionType::Offline,
                registration_type: RegistrationType::PresenterIndonesiaStudentOffline,
                payment_status: PaymentStatus::Pending,
                is_early_bird: true,
                period_id: Some("p-1".to_string()),
                proof_of_payment: "https://files.example.com/proof.png".to_string(),
                created_at: "2026-03-01T09:00:00.000Z".to_string(),
            },
            presenter_registration: Some(PresenterRegistrationDetail {
                record: PresenterRegistration {
                    id: "pr-1".to_string(),
                    registration_id: "reg-1".to_string(),
                    user_id: "u-1".to_string(),
                    email: "siti@example.com".to_string(),
                    current_status: CurrentStatus::MasterStudent,
                    affiliation: "Seoul \"SNU\" University".to_string(),
                    topic_preference: TopicPreference::Engineering,
                    presentation_title: "Catalyst design".to_string(),
                    presentation_category: PresentationCategory::Oral,
                    paper_submission: "https://files.example.com/paper.pdf".to_string(),
                    abstract_submission: None,
                    paper_status: PaperStatus::UnderReview,
                    dietary_preference: None,
                },
                presenters: vec![Presenter {
                    id: "pres-1".to_string(),
                    presenter_registration_id: "pr-1".to_string(),
                    name: "Siti Rahma".to_string(),
                    nationality: "Indonesia".to_string(),
                    presenter_order: 1,
                    comment: None,
                }],
            }),
            fee: Some(40000),
        }
    }

    #[test]
    fn header_and_presenter_row_are_emitted() {
        let csv = registrations_csv(&[sample_row()]);
        let mut lines = csv.lines();

        let header = lines.next().unwrap();
        assert!(header.starts_with("\"Name\",\"Email\""));

        let row = lines.next().unwrap();
        assert!(row.contains("\"Siti Rahma\""));
        assert!(row.contains("\"MASTER_STUDENT\""));
        assert!(row.contains("\"Oral Presenter\""));
        assert!(row.contains("\"Onsite\""));
        assert!(row.contains("\"UNDER_REVIEW\""));
        assert!(lines.next().is_none());
    }

    #[test]
    fn quotes_inside_cells_are_escaped() {
        let csv = registrations_csv(&[sample_row()]);
        assert!(csv.contains("\"Seoul \"\"SNU\"\" University\""));
    }

    #[test]
    fn participant_rows_are_skipped() {
        let mut row = sample_row();
        row.registration.attending_as = AttendingAs::Participant;
        row.presenter_registration = None;

        let csv = registrations_csv(&[row]);
        assert_eq!(csv.lines().count(), 1);
    }
}
