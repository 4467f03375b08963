use axum::http::{HeaderMap, HeaderValue, StatusCode};
use chrono::{NaiveDate, NaiveTime};
use clinic_api::{
    config::parse_log_level,
    middleware::{
        auth::{ROLE_HEADER, USER_HEADER, actor_from_headers},
        error_handling::map_error,
    },
};
use clinic_core::{errors::ClinicError, models::actor::Actor};
use rstest::rstest;
use tracing::Level;
use uuid::Uuid;

#[rstest]
#[case::invalid_schedule(ClinicError::InvalidSchedule("end before start".to_string()), StatusCode::BAD_REQUEST)]
#[case::outside_hours(ClinicError::OutsideWorkingHours("too late".to_string()), StatusCode::BAD_REQUEST)]
#[case::validation(ClinicError::Validation("Invalid input".to_string()), StatusCode::BAD_REQUEST)]
#[case::not_found(ClinicError::NotFound("Resource not found".to_string()), StatusCode::NOT_FOUND)]
#[case::authentication(ClinicError::Authentication("missing role".to_string()), StatusCode::UNAUTHORIZED)]
#[case::authorization(ClinicError::Authorization("Not authorized".to_string()), StatusCode::FORBIDDEN)]
#[case::database(ClinicError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status(#[case] error: ClinicError, #[case] expected: StatusCode) {
    assert_eq!(map_error(error).status(), expected);
}

#[test]
fn test_slot_conflict_is_409() {
    let error = ClinicError::SlotConflict {
        doctor_id: Uuid::new_v4(),
        date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
    };

    assert_eq!(map_error(error).status(), StatusCode::CONFLICT);
}

fn headers(role: Option<&'static str>, user: Option<String>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Some(role) = role {
        headers.insert(ROLE_HEADER, HeaderValue::from_static(role));
    }
    if let Some(user) = user {
        headers.insert(USER_HEADER, HeaderValue::from_str(&user).unwrap());
    }
    headers
}

#[test]
fn test_actor_from_headers() {
    let id = Uuid::new_v4();

    assert_eq!(actor_from_headers(&headers(Some("admin"), None)).unwrap(), Actor::Admin);
    assert_eq!(
        actor_from_headers(&headers(Some("Doctor"), Some(id.to_string()))).unwrap(),
        Actor::Doctor(id)
    );
    assert_eq!(
        actor_from_headers(&headers(Some("patient"), Some(id.to_string()))).unwrap(),
        Actor::Patient(id)
    );
}

#[rstest]
#[case::no_role(headers(None, None))]
#[case::unknown_role(headers(Some("nurse"), Some(Uuid::new_v4().to_string())))]
#[case::patient_without_id(headers(Some("patient"), None))]
#[case::doctor_with_bad_id(headers(Some("doctor"), Some("42".to_string())))]
fn test_actor_from_headers_rejects(#[case] headers: HeaderMap) {
    assert!(matches!(
        actor_from_headers(&headers),
        Err(ClinicError::Authentication(_))
    ));
}

#[rstest]
#[case("trace", Level::TRACE)]
#[case("DEBUG", Level::DEBUG)]
#[case(" warn ", Level::WARN)]
#[case("error", Level::ERROR)]
#[case("verbose", Level::INFO)]
fn test_parse_log_level(#[case] value: &str, #[case] expected: Level) {
    assert_eq!(parse_log_level(value), expected);
}
