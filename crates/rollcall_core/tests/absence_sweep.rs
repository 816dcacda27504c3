use chrono::{NaiveDate, NaiveDateTime};
use rollcall_core::{
    AttendanceError, AttendanceService, AttendanceStatus, ClassCatalog, ClassSchedule, Coordinate,
    FixedClock, InMemoryRecordStore, StaticLocationSource, TimeWindow,
};

const ANCHOR: Coordinate = Coordinate {
    latitude: 40.7128,
    longitude: -74.0060,
};

fn catalog() -> ClassCatalog {
    ClassCatalog::new(vec![ClassSchedule {
        id: "math-101".to_string(),
        name: "Advanced Mathematics".to_string(),
        location: "Building A, Room 101".to_string(),
        lecturer: "Dr. Smith".to_string(),
        window: TimeWindow::parse("09:00 AM - 10:30 AM").unwrap(),
        anchor: ANCHOR,
    }])
    .unwrap()
}

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 2)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn service_at(
    clock_time: NaiveDateTime,
) -> AttendanceService<FixedClock, StaticLocationSource, InMemoryRecordStore> {
    AttendanceService::new(
        catalog(),
        InMemoryRecordStore::new(),
        FixedClock(clock_time),
        StaticLocationSource(ANCHOR),
    )
}

fn roster(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

#[test]
fn sweep_marks_only_users_without_a_record() {
    let service = service_at(at(11, 0));
    service.submit_attendance("math-101", "alice").unwrap();

    let appended = service
        .sweep_absentees("math-101", &roster(&["alice", "bob", "carol"]))
        .unwrap();

    assert_eq!(appended.len(), 2);
    for record in &appended {
        assert_eq!(record.status, AttendanceStatus::Absent);
        assert_eq!(record.class_id, "math-101");
        assert_eq!(record.reported, ANCHOR);
        assert_eq!(record.timestamp, at(11, 0));
    }

    let bob = service.attendance_for_user("bob");
    assert_eq!(bob.len(), 1);
    assert_eq!(bob[0].status, AttendanceStatus::Absent);
}

#[test]
fn sweep_is_idempotent() {
    let service = service_at(at(11, 0));

    let first = service
        .sweep_absentees("math-101", &roster(&["bob", "carol"]))
        .unwrap();
    assert_eq!(first.len(), 2);

    let second = service
        .sweep_absentees("math-101", &roster(&["bob", "carol"]))
        .unwrap();
    assert!(second.is_empty());

    assert_eq!(service.attendance_for_class("math-101").len(), 2);
}

#[test]
fn duplicate_roster_entries_produce_one_record() {
    let service = service_at(at(11, 0));

    let appended = service
        .sweep_absentees("math-101", &roster(&["bob", "bob"]))
        .unwrap();
    assert_eq!(appended.len(), 1);
}

#[test]
fn sweep_refuses_to_run_while_the_window_is_open() {
    let service = service_at(at(10, 0));

    let err = service
        .sweep_absentees("math-101", &roster(&["bob"]))
        .unwrap_err();
    assert!(matches!(err, AttendanceError::WindowStillOpen { class_id, .. } if class_id == "math-101"));
    assert!(service.attendance_for_class("math-101").is_empty());
}

#[test]
fn sweep_exactly_at_window_end_is_still_refused() {
    let service = service_at(at(10, 30));

    let err = service
        .sweep_absentees("math-101", &roster(&["bob"]))
        .unwrap_err();
    assert!(matches!(err, AttendanceError::WindowStillOpen { .. }));
}

#[test]
fn sweep_of_unknown_class_fails() {
    let service = service_at(at(11, 0));

    let err = service
        .sweep_absentees("history-999", &roster(&["bob"]))
        .unwrap_err();
    assert!(matches!(err, AttendanceError::ClassNotFound(_)));
}
