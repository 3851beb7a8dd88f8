//! # 등록 유형 분류기
//!
//! 참가 역할, 국적, 세션 방식으로부터 가격 책정 범주(RegistrationType)를
//! 결정하는 순수 함수입니다. DB나 폼 상태에 의존하지 않으므로
//! 요금 미리보기 엔드포인트와 제출 핸들러가 같은 함수를 호출하므로
//! 두 경로의 분류 결과가 어긋날 수 없습니다.

use crate::models::registration::{AttendingAs, RegistrationType, SessionType};

/// 등록 범주를 분류합니다. 순수·전역(total) 함수이며 실패하지 않습니다.
///
/// - 참가자(PARTICIPANT): 세션 방식만 봅니다. 국적은 무시됩니다.
///   (현재 공개 폼은 1일권만 판매하므로 ONE_DAY 범주를 냅니다.
///   TWO_DAYS 범주는 요금표와 관리자 도구에서만 쓰입니다.)
/// - 발표자(PRESENTER): 국적을 공백 제거 후 소문자로 정규화하여
///   정확히 "indonesia"면 국내 학생 범주, 비어 있으면 국내 기본값,
///   그 외에는 외국인 범주입니다.
pub fn classify(
    attending_as: AttendingAs,
    nationality: Option<&str>,
    session_type: SessionType,
) -> RegistrationType {
    match attending_as {
        AttendingAs::Participant => match session_type {
            SessionType::Online => RegistrationType::OnlineParticipantOneDay,
            SessionType::Offline => RegistrationType::OfflineParticipantOneDay,
        },
        AttendingAs::Presenter => {
            let domestic = match nationality {
                Some(value) => {
                    let normalized = value.trim().to_lowercase();
                    normalized.is_empty() || normalized == "indonesia"
                }
                None => true,
            };
            match (domestic, session_type) {
                (true, SessionType::Online) => RegistrationType::PresenterIndonesiaStudentOnline,
                (true, SessionType::Offline) => RegistrationType::PresenterIndonesiaStudentOffline,
                (false, SessionType::Online) => RegistrationType::PresenterForeignerOnline,
                (false, SessionType::Offline) => RegistrationType::PresenterForeignerOffline,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn participant_ignores_nationality() {
        for nationality in [None, Some("Indonesia"), Some("Germany"), Some("")] {
            assert_eq!(
                classify(AttendingAs::Participant, nationality, SessionType::Online),
                RegistrationType::OnlineParticipantOneDay,
            );
            assert_eq!(
                classify(AttendingAs::Participant, nationality, SessionType::Offline),
                RegistrationType::OfflineParticipantOneDay,
            );
        }
    }

    #[test]
    fn indonesian_presenter_matches_case_insensitively() {
        for nationality in ["indonesia", "Indonesia", "INDONESIA", "  InDoNeSiA  "] {
            assert_eq!(
                classify(AttendingAs::Presenter, Some(nationality), SessionType::Online),
                RegistrationType::PresenterIndonesiaStudentOnline,
            );
            assert_eq!(
                classify(AttendingAs::Presenter, Some(nationality), SessionType::Offline),
                RegistrationType::PresenterIndonesiaStudentOffline,
            );
        }
    }

    #[test]
    fn other_nationalities_are_foreigner() {
        for nationality in ["South Korea", "Japan", "Malaysia"] {
            assert_eq!(
                classify(AttendingAs::Presenter, Some(nationality), SessionType::Online),
                RegistrationType::PresenterForeignerOnline,
            );
            assert_eq!(
                classify(AttendingAs::Presenter, Some(nationality), SessionType::Offline),
                RegistrationType::PresenterForeignerOffline,
            );
        }
    }

    #[test]
    fn missing_nationality_defaults_to_domestic() {
        assert_eq!(
            classify(AttendingAs::Presenter, None, SessionType::Offline),
            RegistrationType::PresenterIndonesiaStudentOffline,
        );
        assert_eq!(
            classify(AttendingAs::Presenter, Some("   "), SessionType::Online),
            RegistrationType::PresenterIndonesiaStudentOnline,
        );
    }
}
