//! Attendance submission workflow and queries.
//!
//! # Responsibility
//! - Validate a submission (class lookup, location, geofence), classify its
//!   timing and append the resulting record.
//! - Serve class/user attendance queries and the post-window absence sweep.
//!
//! # Invariants
//! - Every failure is a hard stop; no partial record is ever appended.
//! - Nothing is mutated until location acquisition has succeeded, so
//!   cancelling a stuck acquisition can never corrupt state.
//! - `Late` means strictly after the class start; exactly on time is
//!   `Present`.

use crate::catalog::ClassCatalog;
use crate::geo::{self, Coordinate, GeoError, GeofenceCheck};
use crate::model::class::{ClassId, ClassSchedule};
use crate::model::record::{AttendanceRecord, AttendanceStatus, UserId};
use crate::repo::record_store::{RecordStore, StoreError};
use crate::source::{Clock, LocationError, LocationSource};
use chrono::NaiveTime;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type AttendanceResult<T> = Result<T, AttendanceError>;

/// Submission and sweep failures.
///
/// All variants are recoverable at the call site; the caller presents a
/// message and may retry. The core itself never retries, since repeated
/// location queries have externally visible cost.
#[derive(Debug)]
pub enum AttendanceError {
    /// The class id is not in the catalog.
    ClassNotFound(ClassId),
    /// The location source denied or failed; covers permission and hardware
    /// cases uniformly.
    LocationUnavailable(LocationError),
    /// The device is outside the fence; carries the measured distance.
    OutOfRange {
        distance_meters: f64,
        radius_meters: f64,
    },
    /// The reported coordinate is not a valid point on the ellipsoid.
    InvalidCoordinate(GeoError),
    /// The absence sweep ran before the class window closed.
    WindowStillOpen {
        class_id: ClassId,
        closes_at: NaiveTime,
    },
    /// The record store rejected the operation.
    Store(StoreError),
}

impl Display for AttendanceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ClassNotFound(id) => write!(f, "class not found: {id}"),
            Self::LocationUnavailable(err) => write!(f, "{err}"),
            Self::OutOfRange {
                distance_meters,
                radius_meters,
            } => write!(
                f,
                "device is {distance_meters:.0} m from the class location, outside the {radius_meters:.0} m fence"
            ),
            Self::InvalidCoordinate(err) => write!(f, "{err}"),
            Self::WindowStillOpen { class_id, closes_at } => write!(
                f,
                "class {class_id} is still in session until {closes_at}; absence sweep refused"
            ),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AttendanceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ClassNotFound(_) => None,
            Self::LocationUnavailable(err) => Some(err),
            Self::OutOfRange { .. } => None,
            Self::InvalidCoordinate(err) => Some(err),
            Self::WindowStillOpen { .. } => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<LocationError> for AttendanceError {
    fn from(value: LocationError) -> Self {
        Self::LocationUnavailable(value)
    }
}

impl From<StoreError> for AttendanceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Attendance registry: catalog, record log and injected collaborators.
///
/// Owns its state exclusively; all mutation happens through
/// [`submit_attendance`](Self::submit_attendance) and
/// [`sweep_absentees`](Self::sweep_absentees).
pub struct AttendanceService<C: Clock, L: LocationSource, S: RecordStore> {
    catalog: ClassCatalog,
    store: S,
    clock: C,
    location: L,
    fence_radius_meters: f64,
}

impl<C: Clock, L: LocationSource, S: RecordStore> AttendanceService<C, L, S> {
    /// Creates a service with the default 100 m fence radius.
    pub fn new(catalog: ClassCatalog, store: S, clock: C, location: L) -> Self {
        Self::with_fence_radius(catalog, store, clock, location, geo::DEFAULT_FENCE_RADIUS_METERS)
    }

    /// Creates a service with a caller-chosen fence radius.
    pub fn with_fence_radius(
        catalog: ClassCatalog,
        store: S,
        clock: C,
        location: L,
        fence_radius_meters: f64,
    ) -> Self {
        Self {
            catalog,
            store,
            clock,
            location,
            fence_radius_meters,
        }
    }

    /// Returns the seeded catalog.
    pub fn catalog(&self) -> &ClassCatalog {
        &self.catalog
    }

    /// Returns the active fence radius in meters.
    pub fn fence_radius_meters(&self) -> f64 {
        self.fence_radius_meters
    }

    /// Marks attendance for one user at one class.
    ///
    /// # Contract
    /// - Resolves the class, acquires the device coordinate, evaluates the
    ///   fence, classifies timing against the class start anchored to the
    ///   current date, then appends and returns the record.
    /// - Each step is a hard stop; on any failure no record is appended.
    /// - Repeated submissions for the same (class, user) pair each produce
    ///   an independent record; deduplication is the caller's concern.
    ///
    /// # Errors
    /// - `ClassNotFound` for an id absent from the catalog.
    /// - `LocationUnavailable` when the location source denies or fails.
    /// - `InvalidCoordinate` when the reported coordinate is malformed.
    /// - `OutOfRange` when the device is outside the fence.
    pub fn submit_attendance(
        &self,
        class_id: &str,
        user_id: &str,
    ) -> AttendanceResult<AttendanceRecord> {
        let class = self.resolve_class(class_id)?;

        let reported = self.location.current_coordinate().map_err(|err| {
            warn!(
                "event=attendance_rejected module=service reason=location class_id={} user_id={}",
                class.id, user_id
            );
            AttendanceError::LocationUnavailable(err)
        })?;

        let check = self.check_fence(class, user_id, reported)?;

        let now = self.clock.now();
        let start_today = now.date().and_time(class.window.start);
        let status = if now > start_today {
            AttendanceStatus::Late
        } else {
            AttendanceStatus::Present
        };

        let record = AttendanceRecord::new(
            class.id.clone(),
            user_id.to_string(),
            now,
            status,
            reported,
        );
        self.store.append(record.clone())?;

        info!(
            "event=attendance_accepted module=service status={} class_id={} user_id={} distance_m={:.1}",
            status.as_str(),
            class.id,
            user_id,
            check.distance_meters
        );

        Ok(record)
    }

    /// Returns all records for one class, in submission order.
    ///
    /// Infallible: an unknown class id yields an empty list, and a poisoned
    /// store degrades to an empty snapshot with a logged warning.
    pub fn attendance_for_class(&self, class_id: &str) -> Vec<AttendanceRecord> {
        self.store.by_class(class_id).unwrap_or_else(|err| {
            warn!("event=query_degraded module=service kind=class error={err}");
            Vec::new()
        })
    }

    /// Returns all records for one user, in submission order.
    ///
    /// Infallible: an unknown user id yields an empty list, and a poisoned
    /// store degrades to an empty snapshot with a logged warning.
    pub fn attendance_for_user(&self, user_id: &str) -> Vec<AttendanceRecord> {
        self.store.by_user(user_id).unwrap_or_else(|err| {
            warn!("event=query_degraded module=service kind=user error={err}");
            Vec::new()
        })
    }

    /// Marks roster members with no record for a class as absent.
    ///
    /// # Contract
    /// - Refuses to run while the class window is still open, so an absence
    ///   can never race a legitimate submission.
    /// - Appends one `Absent` record per no-show, with the class anchor as
    ///   the reported coordinate, and returns the appended records.
    /// - Already-marked users (any status) are skipped; running the sweep
    ///   twice appends nothing new.
    ///
    /// # Errors
    /// - `ClassNotFound` for an id absent from the catalog.
    /// - `WindowStillOpen` before the window's end on the current day.
    pub fn sweep_absentees(
        &self,
        class_id: &str,
        roster: &[UserId],
    ) -> AttendanceResult<Vec<AttendanceRecord>> {
        let class = self.resolve_class(class_id)?;

        let now = self.clock.now();
        if now.time() <= class.window.end {
            return Err(AttendanceError::WindowStillOpen {
                class_id: class.id.clone(),
                closes_at: class.window.end,
            });
        }

        let marked = self.store.by_class(class_id)?;
        let mut appended = Vec::new();
        for user_id in roster {
            if marked.iter().any(|record| &record.user_id == user_id) {
                continue;
            }
            if appended
                .iter()
                .any(|record: &AttendanceRecord| &record.user_id == user_id)
            {
                continue;
            }
            let record = AttendanceRecord::new(
                class.id.clone(),
                user_id.clone(),
                now,
                AttendanceStatus::Absent,
                class.anchor,
            );
            self.store.append(record.clone())?;
            appended.push(record);
        }

        info!(
            "event=absence_sweep module=service status=ok class_id={} roster={} marked_absent={}",
            class.id,
            roster.len(),
            appended.len()
        );

        Ok(appended)
    }

    fn resolve_class(&self, class_id: &str) -> AttendanceResult<&ClassSchedule> {
        self.catalog.get(class_id).ok_or_else(|| {
            warn!(
                "event=attendance_rejected module=service reason=unknown_class class_id={class_id}"
            );
            AttendanceError::ClassNotFound(class_id.to_string())
        })
    }

    fn check_fence(
        &self,
        class: &ClassSchedule,
        user_id: &str,
        reported: Coordinate,
    ) -> AttendanceResult<GeofenceCheck> {
        // The anchor was validated at catalog build; a geo error here means
        // the device coordinate is malformed.
        let check = geo::is_within_fence(reported, class.anchor, self.fence_radius_meters)
            .map_err(AttendanceError::InvalidCoordinate)?;

        if !check.within {
            warn!(
                "event=attendance_rejected module=service reason=out_of_range class_id={} user_id={} distance_m={:.1} radius_m={:.1}",
                class.id, user_id, check.distance_meters, check.radius_meters
            );
            return Err(AttendanceError::OutOfRange {
                distance_meters: check.distance_meters,
                radius_meters: check.radius_meters,
            });
        }

        Ok(check)
    }
}
