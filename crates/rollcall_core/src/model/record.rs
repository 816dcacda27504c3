//! Attendance record model.
//!
//! # Responsibility
//! - Define the immutable event appended for every accepted submission.
//! - Keep the timing status a closed enumeration.
//!
//! # Invariants
//! - `id` is stable and never reused for another record.
//! - `class_id` referred to a catalog entry at creation time; classes are
//!   immutable, so the reference cannot dangle afterwards.
//! - Records are never mutated or deleted once appended.

use crate::geo::Coordinate;
use crate::model::class::ClassId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one attendance record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type RecordId = Uuid;

/// Opaque identifier of the submitting user.
pub type UserId = String;

/// Timing classification of one attendance event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Submitted at or before the class start time.
    Present,
    /// Submitted strictly after the class start time.
    Late,
    /// Assigned by the post-window absence sweep, never by submission.
    Absent,
}

impl AttendanceStatus {
    /// Stable string id used in logs and FFI envelopes.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Late => "late",
            Self::Absent => "absent",
        }
    }
}

/// One user's attendance event for one class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Stable global ID used for auditing and display.
    pub id: RecordId,
    /// Catalog entry this event belongs to.
    pub class_id: ClassId,
    /// Submitting user; no uniqueness constraint per class.
    pub user_id: UserId,
    /// Wall-clock instant of submission (or of the absence sweep).
    pub timestamp: NaiveDateTime,
    /// Timing classification at creation time.
    pub status: AttendanceStatus,
    /// Device coordinate captured at submission time, stored for audit.
    pub reported: Coordinate,
}

impl AttendanceRecord {
    /// Creates a record with a freshly generated stable ID.
    pub fn new(
        class_id: ClassId,
        user_id: UserId,
        timestamp: NaiveDateTime,
        status: AttendanceStatus,
        reported: Coordinate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            class_id,
            user_id,
            timestamp,
            status,
            reported,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AttendanceRecord, AttendanceStatus};
    use crate::geo::Coordinate;
    use chrono::NaiveDate;

    fn sample_timestamp() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(9, 1, 0)
            .unwrap()
    }

    #[test]
    fn new_generates_unique_ids() {
        let reported = Coordinate::new(40.7128, -74.0060);
        let a = AttendanceRecord::new(
            "1".to_string(),
            "student-7".to_string(),
            sample_timestamp(),
            AttendanceStatus::Present,
            reported,
        );
        let b = AttendanceRecord::new(
            "1".to_string(),
            "student-7".to_string(),
            sample_timestamp(),
            AttendanceStatus::Present,
            reported,
        );
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_value(AttendanceStatus::Late).unwrap();
        assert_eq!(json, "late");
        assert_eq!(AttendanceStatus::Absent.as_str(), "absent");
    }
}
