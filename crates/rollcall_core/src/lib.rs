//! Core domain logic for Rollcall geofenced attendance.
//! This crate is the single source of truth for business invariants.

pub mod catalog;
pub mod geo;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod source;

pub use catalog::{demo_catalog, CatalogError, CatalogResult, ClassCatalog};
pub use geo::{
    distance_meters, is_within_fence, Coordinate, GeoError, GeofenceCheck, GeoResult,
    DEFAULT_FENCE_RADIUS_METERS,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::class::{ClassId, ClassSchedule, TimeWindow, TimeWindowError};
pub use model::record::{AttendanceRecord, AttendanceStatus, RecordId, UserId};
pub use repo::record_store::{InMemoryRecordStore, RecordStore, StoreError, StoreResult};
pub use service::attendance_service::{AttendanceError, AttendanceResult, AttendanceService};
pub use source::{
    Clock, DeniedLocationSource, FixedClock, LocationError, LocationSource, StaticLocationSource,
    SystemClock,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
