//! Injected collaborators: wall clock and device location.
//!
//! # Responsibility
//! - Define the seams through which the host platform supplies time and
//!   position, so decision logic stays testable without device hardware.
//!
//! # Invariants
//! - Implementations never mutate registry state; they only observe.
//! - Location acquisition is the workflow's single fallible suspension
//!   point; its failure variants are defined here.

use crate::geo::Coordinate;
use chrono::{Local, NaiveDateTime};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Wall-clock source for submission timestamps and timing classification.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Device wall clock in local time, matching what the user's timetable shows.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Fixed clock for tests and deterministic demos.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Device location acquisition failures.
///
/// Permission prompts and hardware errors are kept distinct here, but the
/// submission workflow reports them uniformly as location-unavailable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    /// The user or OS denied the location permission.
    PermissionDenied,
    /// Hardware failure, timeout or missing provider.
    Unavailable(String),
}

impl Display for LocationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied => write!(f, "location permission denied"),
            Self::Unavailable(reason) => write!(f, "location unavailable: {reason}"),
        }
    }
}

impl Error for LocationError {}

/// Source of the device's current coordinate.
///
/// Acquisition may block (GPS fix, permission prompt); callers may time it
/// out externally, since nothing is mutated until a coordinate is returned.
pub trait LocationSource {
    fn current_coordinate(&self) -> Result<Coordinate, LocationError>;
}

/// Location source returning one fixed coordinate.
///
/// Backs tests, and the FFI shell where each call carries the coordinate
/// the platform's own location API already produced.
#[derive(Debug, Clone, Copy)]
pub struct StaticLocationSource(pub Coordinate);

impl LocationSource for StaticLocationSource {
    fn current_coordinate(&self) -> Result<Coordinate, LocationError> {
        Ok(self.0)
    }
}

/// Location source that always fails, for exercising denial paths.
#[derive(Debug, Clone)]
pub struct DeniedLocationSource(pub LocationError);

impl LocationSource for DeniedLocationSource {
    fn current_coordinate(&self) -> Result<Coordinate, LocationError> {
        Err(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        DeniedLocationSource, LocationError, LocationSource, StaticLocationSource,
    };
    use crate::geo::Coordinate;

    #[test]
    fn static_source_returns_its_coordinate() {
        let source = StaticLocationSource(Coordinate::new(40.7128, -74.0060));
        let coordinate = source.current_coordinate().unwrap();
        assert_eq!(coordinate.latitude, 40.7128);
    }

    #[test]
    fn denied_source_returns_its_error() {
        let source = DeniedLocationSource(LocationError::PermissionDenied);
        assert_eq!(
            source.current_coordinate().unwrap_err(),
            LocationError::PermissionDenied
        );
    }
}
