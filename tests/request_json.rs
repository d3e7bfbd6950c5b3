mod common;

use chrono::NaiveDate;
use forensic_report::{Error, Risk, artifact_file_name, load_request, parse_request};

#[test]
fn fixture_request_decodes() {
    let req = load_request(&common::fixture("report_request.json")).expect("load fixture");

    assert_eq!(req.query_id, "q_mock_1736950000000");
    assert_eq!(req.dataset, "mock_device");
    assert_eq!(req.total_results, 3);
    assert_eq!(req.selected_results.len(), 3);
    assert_eq!(req.selected_results[0].id, "r3");
    assert_eq!(req.selected_results[1].entities[0].kind, "BTC");
    assert_eq!(req.selected_results[1].entities[0].risk, Risk::High);
    assert_eq!(req.selected_results[2].entities[0].risk, Risk::Medium);
    assert!(req.options.include_timeline);
    // legacy `includeRawJson` key
    assert!(req.options.include_raw_dump);
    assert_eq!(req.generated_at, "1/15/2025, 5:00:00 PM");
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let req = parse_request(br#"{ "queryId": "q1", "selectedResults": [ { "id": "r1" } ] }"#)
        .expect("parse");

    assert_eq!(req.query, "");
    assert_eq!(req.dataset, "unknown");
    assert_eq!(req.total_results, 0);
    assert!(req.options.include_timeline);
    assert!(!req.options.include_raw_dump);
    let item = &req.selected_results[0];
    assert_eq!(item.sender, "");
    assert_eq!(item.timestamp, "");
    assert!(item.entities.is_empty());
}

#[test]
fn raw_dump_key_is_accepted() {
    let req = parse_request(br#"{ "options": { "includeTimeline": false, "includeRawDump": true } }"#)
        .expect("parse");

    assert!(!req.options.include_timeline);
    assert!(req.options.include_raw_dump);
}

#[test]
fn malformed_request_is_an_invalid_request_error() {
    let err = parse_request(b"{ \"selectedResults\": 42 }").unwrap_err();
    assert!(matches!(err, Error::InvalidRequest(_)), "{err}");

    let err = parse_request(b"not json").unwrap_err();
    assert!(err.to_string().starts_with("invalid report request"));
}

#[test]
fn unreadable_request_file_names_the_path() {
    let err = load_request(&common::fixture("does_not_exist.json")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(err.to_string().contains("does_not_exist.json"));
}

#[test]
fn artifact_name_uses_query_id_and_date() {
    let date = NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date");
    assert_eq!(
        artifact_file_name("q_mock_1", date),
        "forensic-report-q_mock_1-2026-10-18.pdf"
    );
}

#[test]
fn artifact_name_replaces_path_and_reserved_characters() {
    let date = NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date");
    assert_eq!(
        artifact_file_name("../cases\\q:1*?", date),
        "forensic-report-.._cases_q_1__-2026-10-18.pdf"
    );
}

#[test]
fn unrecognised_risk_label_does_not_reject_the_request() {
    let req = parse_request(
        br#"{ "selectedResults": [ { "id": "r1", "entities": [
            { "type": "BTC", "value": "bc1q", "risk": "critical" },
            { "type": "IBAN", "value": "AE07", "risk": "high" } ] } ] }"#,
    )
    .expect("parse");

    let entities = &req.selected_results[0].entities;
    assert_eq!(entities[0].risk, Risk::Unknown);
    assert_eq!(entities[1].risk, Risk::High);
}
