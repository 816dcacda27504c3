//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level attendance functions to Dart via FRB.
//! - Keep error semantics simple for UI integration: envelopes, not panics.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - The record log lives for the process lifetime; each call builds a
//!   short-lived service around the shared store.
//! - The device coordinate crosses the boundary per call: the platform owns
//!   the GPS and the permission prompt, core owns the decision.

use log::warn;
use rollcall_core::{
    core_version as core_version_inner, demo_catalog, init_logging as init_logging_inner,
    ping as ping_inner, AttendanceRecord, AttendanceService, ClassSchedule, Coordinate,
    InMemoryRecordStore, RecordStore, StaticLocationSource, SystemClock,
};
use std::sync::{Arc, OnceLock};

static RECORD_STORE: OnceLock<Arc<InMemoryRecordStore>> = OnceLock::new();

fn shared_store() -> Arc<InMemoryRecordStore> {
    Arc::clone(RECORD_STORE.get_or_init(|| Arc::new(InMemoryRecordStore::new())))
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One timetable entry for class-list display.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassItem {
    pub class_id: String,
    pub name: String,
    pub location: String,
    pub lecturer: String,
    /// Display window, e.g. `09:00 AM - 10:30 AM`.
    pub window: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&ClassSchedule> for ClassItem {
    fn from(class: &ClassSchedule) -> Self {
        Self {
            class_id: class.id.clone(),
            name: class.name.clone(),
            location: class.location.clone(),
            lecturer: class.lecturer.clone(),
            window: class.window.to_string(),
            latitude: class.anchor.latitude,
            longitude: class.anchor.longitude,
        }
    }
}

/// One attendance record for history display.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordItem {
    pub record_id: String,
    pub class_id: String,
    pub user_id: String,
    /// Local wall-clock timestamp, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
    /// Timing status (`present|late|absent`).
    pub status: String,
}

impl From<&AttendanceRecord> for RecordItem {
    fn from(record: &AttendanceRecord) -> Self {
        Self {
            record_id: record.id.to_string(),
            class_id: record.class_id.clone(),
            user_id: record.user_id.clone(),
            timestamp: record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            status: record.status.as_str().to_string(),
        }
    }
}

/// Action response envelope for the mark-attendance flow.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkActionResponse {
    /// Whether the submission was accepted.
    pub ok: bool,
    /// Created record on success.
    pub record: Option<RecordItem>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl MarkActionResponse {
    fn success(record: RecordItem) -> Self {
        Self {
            ok: true,
            record: Some(record),
            message: "attendance recorded".to_string(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            record: None,
            message: message.into(),
        }
    }
}

/// Lists the seeded timetable.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never panics; order matches the seed.
#[flutter_rust_bridge::frb(sync)]
pub fn list_classes() -> Vec<ClassItem> {
    demo_catalog().classes().iter().map(ClassItem::from).collect()
}

/// Marks attendance for one user at one class.
///
/// The coordinate is the one the platform's location API reported for this
/// call; permission denial is handled on the Dart side before calling in.
///
/// # FFI contract
/// - Sync call; evaluates the fence and appends on acceptance.
/// - Never panics; rejections come back as `ok = false` envelopes.
#[flutter_rust_bridge::frb(sync)]
pub fn submit_attendance(
    class_id: String,
    user_id: String,
    latitude: f64,
    longitude: f64,
) -> MarkActionResponse {
    let service = AttendanceService::new(
        demo_catalog(),
        shared_store(),
        SystemClock,
        StaticLocationSource(Coordinate::new(latitude, longitude)),
    );

    match service.submit_attendance(&class_id, &user_id) {
        Ok(record) => MarkActionResponse::success(RecordItem::from(&record)),
        Err(err) => MarkActionResponse::failure(err.to_string()),
    }
}

/// Returns all records for one class, in submission order.
///
/// # FFI contract
/// - Sync call, snapshot read.
/// - Never panics; store failures degrade to an empty list with a warning.
#[flutter_rust_bridge::frb(sync)]
pub fn class_attendance(class_id: String) -> Vec<RecordItem> {
    match shared_store().by_class(&class_id) {
        Ok(records) => records.iter().map(RecordItem::from).collect(),
        Err(err) => {
            warn!("event=query_failed module=ffi kind=class error={err}");
            Vec::new()
        }
    }
}

/// Returns all records for one user, in submission order.
///
/// # FFI contract
/// - Sync call, snapshot read.
/// - Never panics; store failures degrade to an empty list with a warning.
#[flutter_rust_bridge::frb(sync)]
pub fn user_attendance(user_id: String) -> Vec<RecordItem> {
    match shared_store().by_user(&user_id) {
        Ok(records) => records.iter().map(RecordItem::from).collect(),
        Err(err) => {
            warn!("event=query_failed module=ffi kind=user error={err}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{class_attendance, list_classes, ping, submit_attendance, user_attendance};

    #[test]
    fn ping_roundtrip() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn list_classes_returns_the_demo_timetable() {
        let classes = list_classes();
        assert_eq!(classes.len(), 3);
        assert_eq!(classes[0].class_id, "1");
        assert_eq!(classes[0].window, "09:00 AM - 10:30 AM");
    }

    #[test]
    fn rejected_submission_returns_failure_envelope() {
        let response = submit_attendance(
            "no-such-class".to_string(),
            "student-7".to_string(),
            40.7128,
            -74.0060,
        );
        assert!(!response.ok);
        assert!(response.record.is_none());
        assert!(response.message.contains("class not found"));
    }

    #[test]
    fn accepted_submission_appears_in_both_queries() {
        let response = submit_attendance(
            "2".to_string(),
            "ffi-test-user".to_string(),
            40.7129,
            -74.0061,
        );
        assert!(response.ok, "unexpected rejection: {}", response.message);

        let record = response.record.unwrap();
        assert!(class_attendance("2".to_string())
            .iter()
            .any(|item| item.record_id == record.record_id));
        assert!(user_attendance("ffi-test-user".to_string())
            .iter()
            .any(|item| item.record_id == record.record_id));
    }
}
