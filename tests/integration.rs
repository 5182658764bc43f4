//! Integration tests for the Working Time Engine.
//!
//! This test suite covers:
//! - Merging within and beyond the gap tolerance
//! - Discarding entries from forgotten timers
//! - Break subtraction for single and merged entries
//! - Spans exceeding the maximum duration carried over to the next day
//! - Entries crossing the year boundary
//! - The HTTP API end to end
//! - Error cases

use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{Value, json};
use tower::ServiceExt;

use working_time_engine::api::{AppState, create_router};
use working_time_engine::calculation::TimeSpanCalculator;
use working_time_engine::config::{CalculatorSettings, ConfigLoader};
use working_time_engine::error::EngineError;
use working_time_engine::models::{TimeEntry, User};
use working_time_engine::source::InMemoryEntrySource;

// =============================================================================
// Test Helpers
// =============================================================================

fn make_datetime(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn make_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn entry(id: &str, begin: &str, end: &str, break_seconds: i64) -> TimeEntry {
    TimeEntry {
        id: id.to_string(),
        begin: make_datetime(begin),
        end: make_datetime(end),
        break_seconds,
    }
}

fn calculate(entries: Vec<TimeEntry>, year: i32) -> BTreeMap<NaiveDate, i64> {
    TimeSpanCalculator::new(
        InMemoryEntrySource::for_user("user_001", entries),
        CalculatorSettings::default(),
    )
    .calculate_for_year(&User::new("user_001"), year)
    .unwrap()
}

fn create_router_for_test() -> Router {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let source = InMemoryEntrySource::for_user(
        "user_001",
        vec![
            entry("nye", "2025-12-31 23:45:00", "2026-01-01 01:15:00", 0),
            entry("jan", "2026-01-05 09:00:00", "2026-01-05 17:00:00", 1800),
        ],
    );
    create_router(AppState::new(config, source))
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post_calculate(router: Router, body: Value) -> (StatusCode, Value) {
    send(
        router,
        Request::builder()
            .method("POST")
            .uri("/calculate")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

// =============================================================================
// Merge and gap tolerance
// =============================================================================

#[test]
fn test_gap_of_exactly_tolerance_merges() {
    let days = calculate(
        vec![
            entry("a", "2026-01-15 10:00:00", "2026-01-15 11:00:00", 0),
            entry("b", "2026-01-15 11:03:00", "2026-01-15 12:00:00", 0),
        ],
        2026,
    );

    assert_eq!(days, BTreeMap::from([(make_date("2026-01-15"), 7200)]));
}

#[test]
fn test_gap_one_second_over_tolerance_keeps_spans_apart() {
    let settings = CalculatorSettings::default();
    let calculator = TimeSpanCalculator::new(
        InMemoryEntrySource::for_user(
            "user_001",
            vec![
                entry("a", "2026-01-15 10:00:00", "2026-01-15 11:00:00", 0),
                entry("b", "2026-01-15 11:03:01", "2026-01-15 12:00:00", 0),
            ],
        ),
        settings,
    );

    let result = calculator
        .calculate_with_trace(&User::new("user_001"), 2026)
        .unwrap();
    assert_eq!(result.spans.len(), 2);
    // The gap itself is not worked time once the entries stay apart.
    assert_eq!(result.days[&make_date("2026-01-15")], 3600 + 3419);
}

#[test]
fn test_entries_on_separate_days_stay_separate() {
    let days = calculate(
        vec![
            entry("mon", "2026-03-02 09:00:00", "2026-03-02 17:00:00", 1800),
            entry("tue", "2026-03-03 09:00:00", "2026-03-03 13:00:00", 0),
        ],
        2026,
    );

    assert_eq!(days[&make_date("2026-03-02")], 8 * 3600 - 1800);
    assert_eq!(days[&make_date("2026-03-03")], 4 * 3600);
}

// =============================================================================
// Outlier filtering
// =============================================================================

#[test]
fn test_forgotten_timer_is_discarded() {
    let days = calculate(
        vec![
            entry("forgotten", "2026-01-15 08:00:00", "2026-01-16 02:00:00", 0),
            entry("meeting", "2026-01-15 10:00:00", "2026-01-15 11:00:00", 0),
        ],
        2026,
    );

    assert_eq!(days, BTreeMap::from([(make_date("2026-01-15"), 3600)]));
}

#[test]
fn test_discarded_entry_does_not_bridge_neighbours() {
    // Without the long entry the two short ones are hours apart.
    let days = calculate(
        vec![
            entry("morning", "2026-01-15 08:00:00", "2026-01-15 09:00:00", 0),
            entry("forgotten", "2026-01-15 09:00:00", "2026-01-16 03:00:00", 0),
            entry("evening", "2026-01-15 20:00:00", "2026-01-15 21:00:00", 0),
        ],
        2026,
    );

    assert_eq!(days[&make_date("2026-01-15")], 7200);
}

// =============================================================================
// Breaks
// =============================================================================

#[test]
fn test_single_entry_break() {
    let days = calculate(
        vec![entry("a", "2026-01-15 10:00:00", "2026-01-15 12:00:00", 1800)],
        2026,
    );
    assert_eq!(days[&make_date("2026-01-15")], 5400);
}

#[test]
fn test_overlapping_entries_breaks_summed() {
    let days = calculate(
        vec![
            entry("a", "2026-01-15 10:00:00", "2026-01-15 12:00:00", 900),
            entry("b", "2026-01-15 11:00:00", "2026-01-15 13:00:00", 900),
        ],
        2026,
    );
    assert_eq!(days[&make_date("2026-01-15")], 9000);
}

#[test]
fn test_fully_broken_entry_leaves_no_day() {
    let days = calculate(
        vec![entry("a", "2026-01-15 10:00:00", "2026-01-15 11:00:00", 3600)],
        2026,
    );
    assert!(days.is_empty());
}

// =============================================================================
// Maximum duration split
// =============================================================================

#[test]
fn test_span_from_2230_split_at_entry_boundary() {
    let calculator = TimeSpanCalculator::new(
        InMemoryEntrySource::for_user(
            "user_001",
            vec![
                entry("a", "2026-01-15 22:30:00", "2026-01-16 06:30:00", 0),
                entry("b", "2026-01-16 06:31:00", "2026-01-16 15:00:00", 1200),
                entry("c", "2026-01-16 15:02:00", "2026-01-16 18:00:00", 0),
            ],
        ),
        CalculatorSettings::default(),
    );

    let result = calculator
        .calculate_with_trace(&User::new("user_001"), 2026)
        .unwrap();

    // b ends 16.5 hours after the span start, so the cut falls at the end of a.
    assert_eq!(result.days[&make_date("2026-01-15")], 8 * 3600);
    assert_eq!(result.days[&make_date("2026-01-16")], 11 * 3600 + 1800 - 1200);

    let segments = &result.spans[0].segments;
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].end, make_datetime("2026-01-16 06:30:00"));
    assert!(segments[1].carry_over);
    let wall: i64 = segments.iter().map(|s| s.wall_seconds).sum();
    assert_eq!(wall, 19 * 3600 + 1800);
}

#[test]
fn test_span_of_exactly_max_duration_stays_on_start_day() {
    let days = calculate(
        vec![
            entry("a", "2026-01-15 22:00:00", "2026-01-16 06:00:00", 0),
            entry("b", "2026-01-16 06:00:00", "2026-01-16 14:00:00", 0),
        ],
        2026,
    );

    assert_eq!(days, BTreeMap::from([(make_date("2026-01-15"), 16 * 3600)]));
}

#[test]
fn test_split_span_total_matches_unsplit_total() {
    // Overlapping entries whose breaks together exceed the head of the split.
    let entries = vec![
        entry("a", "2026-01-15 06:00:00", "2026-01-15 14:00:00", 8 * 3600),
        entry("b", "2026-01-15 06:00:00", "2026-01-15 14:00:00", 8 * 3600),
        entry("c", "2026-01-15 14:00:00", "2026-01-15 23:00:00", 0),
    ];

    let split = calculate(entries.clone(), 2026);
    assert_eq!(split, BTreeMap::from([(make_date("2026-01-16"), 3600)]));

    let long_max = CalculatorSettings {
        max_duration_hours: 20,
        ..CalculatorSettings::default()
    };
    let unsplit = TimeSpanCalculator::new(
        InMemoryEntrySource::for_user("user_001", entries),
        long_max,
    )
    .calculate_for_year(&User::new("user_001"), 2026)
    .unwrap();
    assert_eq!(unsplit, BTreeMap::from([(make_date("2026-01-15"), 3600)]));
    assert_eq!(
        split.values().sum::<i64>(),
        unsplit.values().sum::<i64>()
    );
}

// =============================================================================
// Year boundary
// =============================================================================

#[test]
fn test_new_years_eve_entry_belongs_to_previous_year() {
    let entries = vec![entry("nye", "2025-12-31 23:45:00", "2026-01-01 01:15:00", 0)];

    assert!(calculate(entries.clone(), 2026).is_empty());
    assert_eq!(
        calculate(entries, 2025),
        BTreeMap::from([(make_date("2025-12-31"), 5400)])
    );
}

#[test]
fn test_span_merged_across_year_boundary() {
    // The two entries merge into one span started in 2025.
    let entries = vec![
        entry("a", "2025-12-31 22:00:00", "2026-01-01 00:00:00", 0),
        entry("b", "2026-01-01 00:02:00", "2026-01-01 03:00:00", 0),
    ];

    assert!(calculate(entries.clone(), 2026).is_empty());
    assert_eq!(calculate(entries, 2025)[&make_date("2025-12-31")], 5 * 3600);
}

#[test]
fn test_all_keys_within_requested_year() {
    let entries = vec![
        entry("a", "2025-12-31 08:00:00", "2025-12-31 12:00:00", 0),
        entry("b", "2026-06-15 08:00:00", "2026-06-15 12:00:00", 0),
        entry("c", "2026-12-31 20:00:00", "2027-01-01 02:00:00", 0),
        entry("d", "2027-01-01 08:00:00", "2027-01-01 12:00:00", 0),
    ];

    let days = calculate(entries, 2026);
    assert_eq!(days.len(), 2);
    assert!(days.keys().all(|d| d.format("%Y").to_string() == "2026"));
    assert_eq!(days[&make_date("2026-12-31")], 6 * 3600);
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn test_concurrent_calls_for_different_users() {
    let mut source = InMemoryEntrySource::new();
    for i in 0..8 {
        source.insert(
            format!("user_{:03}", i),
            vec![entry(
                &format!("entry_{}", i),
                "2026-02-02 09:00:00",
                "2026-02-02 10:00:00",
                i * 60,
            )],
        );
    }
    let calculator = Arc::new(TimeSpanCalculator::new(
        source,
        CalculatorSettings::default(),
    ));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let calculator = Arc::clone(&calculator);
            thread::spawn(move || {
                let user = User::new(format!("user_{:03}", i));
                calculator.calculate_for_year(&user, 2026).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let days = handle.join().unwrap();
        assert_eq!(days[&make_date("2026-02-02")], 3600 - i as i64 * 60);
    }
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_malformed_entry_rejects_whole_call() {
    let result = TimeSpanCalculator::new(
        InMemoryEntrySource::for_user(
            "user_001",
            vec![
                entry("ok", "2026-01-15 10:00:00", "2026-01-15 11:00:00", 0),
                entry("backwards", "2026-01-15 12:00:00", "2026-01-15 11:30:00", 0),
            ],
        ),
        CalculatorSettings::default(),
    )
    .calculate_for_year(&User::new("user_001"), 2026);

    match result {
        Err(EngineError::InvalidEntry { entry_id, .. }) => assert_eq!(entry_id, "backwards"),
        other => panic!("Expected InvalidEntry, got {:?}", other),
    }
}

// =============================================================================
// HTTP API
// =============================================================================

#[tokio::test]
async fn test_api_calculate_scenarios() {
    let router = create_router_for_test();
    let body = json!({
        "user": { "id": "user_002" },
        "year": 2026,
        "entries": [
            { "id": "a", "begin": "2026-01-15T10:00:00", "end": "2026-01-15T12:00:00", "break_seconds": 900 },
            { "id": "b", "begin": "2026-01-15T11:00:00", "end": "2026-01-15T13:00:00", "break_seconds": 900 },
            { "id": "c", "begin": "2026-01-20T08:00:00", "end": "2026-01-21T02:00:00" }
        ]
    });

    let (status, json) = post_calculate(router, body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["user_id"], "user_002");
    assert_eq!(json["days"]["2026-01-15"], 9000);
    assert!(json["days"].get("2026-01-20").is_none());
    assert_eq!(json["total_seconds"], 9000);
    assert_eq!(json["audit_trace"]["warnings"][0]["code"], "ENTRY_DISCARDED");
    assert_eq!(json["audit_trace"]["steps"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_api_stored_entries_trimmed_to_year() {
    let request = |year: i32| {
        Request::builder()
            .uri(format!("/users/user_001/working-time/{}", year))
            .body(Body::empty())
            .unwrap()
    };

    let (status, json) = send(create_router_for_test(), request(2026)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_seconds"], 8 * 3600 - 1800);
    assert!(json["days"].get("2025-12-31").is_none());

    let (status, json) = send(create_router_for_test(), request(2025)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["days"]["2025-12-31"], 5400);
}

#[tokio::test]
async fn test_api_invalid_break_returns_400() {
    let router = create_router_for_test();
    let body = json!({
        "user": { "id": "user_002" },
        "year": 2026,
        "entries": [
            { "id": "a", "begin": "2026-01-15T10:00:00", "end": "2026-01-15T11:00:00", "break_seconds": -60 }
        ]
    });

    let (status, json) = post_calculate(router, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_ENTRY");
}

#[tokio::test]
async fn test_api_unrepresentable_year_returns_400() {
    let router = create_router_for_test();
    let body = json!({ "user": { "id": "user_002" }, "year": 2_000_000_000, "entries": [] });

    let (status, json) = post_calculate(router, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_YEAR");
}
