//! Immutable class catalog seeded at startup.
//!
//! # Responsibility
//! - Accept the class list as configuration data and validate it once.
//! - Resolve class ids for the submission workflow.
//!
//! # Invariants
//! - The catalog never changes after construction.
//! - Every seeded entry has a unique id, a valid anchor coordinate and a
//!   well-formed window; lookups can therefore trust what they return.

use crate::geo::{Coordinate, GeoError};
use crate::model::class::{ClassId, ClassSchedule, TimeWindow, TimeWindowError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog seed validation errors.
#[derive(Debug)]
pub enum CatalogError {
    /// Two seed entries share one id.
    DuplicateClassId(ClassId),
    /// A seed entry's anchor coordinate is invalid.
    InvalidAnchor { class_id: ClassId, source: GeoError },
    /// A seed entry's window is reversed.
    InvalidWindow {
        class_id: ClassId,
        source: TimeWindowError,
    },
    /// The JSON seed document cannot be decoded.
    MalformedSeed(serde_json::Error),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateClassId(id) => write!(f, "duplicate class id in seed: {id}"),
            Self::InvalidAnchor { class_id, source } => {
                write!(f, "class {class_id} has an invalid anchor: {source}")
            }
            Self::InvalidWindow { class_id, source } => {
                write!(f, "class {class_id} has an invalid window: {source}")
            }
            Self::MalformedSeed(err) => write!(f, "malformed catalog seed: {err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DuplicateClassId(_) => None,
            Self::InvalidAnchor { source, .. } => Some(source),
            Self::InvalidWindow { source, .. } => Some(source),
            Self::MalformedSeed(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(value: serde_json::Error) -> Self {
        Self::MalformedSeed(value)
    }
}

/// Immutable catalog of schedulable classes.
#[derive(Debug, Clone)]
pub struct ClassCatalog {
    classes: Vec<ClassSchedule>,
}

impl ClassCatalog {
    /// Builds a catalog from already-typed seed entries.
    ///
    /// # Errors
    /// - `DuplicateClassId` when two entries share an id.
    /// - `InvalidAnchor` when an anchor coordinate fails validation.
    /// - `InvalidWindow` when an entry's window end precedes its start.
    pub fn new(classes: Vec<ClassSchedule>) -> CatalogResult<Self> {
        for (index, class) in classes.iter().enumerate() {
            if classes[..index].iter().any(|other| other.id == class.id) {
                return Err(CatalogError::DuplicateClassId(class.id.clone()));
            }
            class.anchor.validate().map_err(|source| {
                CatalogError::InvalidAnchor {
                    class_id: class.id.clone(),
                    source,
                }
            })?;
            if class.window.end < class.window.start {
                return Err(CatalogError::InvalidWindow {
                    class_id: class.id.clone(),
                    source: TimeWindowError::ReversedWindow {
                        start: class.window.start,
                        end: class.window.end,
                    },
                });
            }
        }
        Ok(Self { classes })
    }

    /// Builds a catalog from a JSON seed document (an array of classes).
    pub fn from_json(seed: &str) -> CatalogResult<Self> {
        let classes: Vec<ClassSchedule> = serde_json::from_str(seed)?;
        Self::new(classes)
    }

    /// Resolves one class by id.
    pub fn get(&self, class_id: &str) -> Option<&ClassSchedule> {
        self.classes.iter().find(|class| class.id == class_id)
    }

    /// Returns all classes in seed order.
    pub fn classes(&self) -> &[ClassSchedule] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// The demo seed used by the CLI and FFI shells: three classes around the
/// same city block, matching the mobile app's mock timetable.
pub fn demo_catalog() -> ClassCatalog {
    let classes = vec![
        demo_class(
            "1",
            "Advanced Mathematics",
            "Building A, Room 101",
            "Dr. Smith",
            "09:00 AM - 10:30 AM",
            40.7128,
            -74.0060,
        ),
        demo_class(
            "2",
            "Computer Science",
            "Building B, Room 205",
            "Prof. Johnson",
            "11:00 AM - 12:30 PM",
            40.7129,
            -74.0061,
        ),
        demo_class(
            "3",
            "Physics Lab",
            "Science Building, Lab 3",
            "Dr. Brown",
            "02:00 PM - 03:30 PM",
            40.7130,
            -74.0062,
        ),
    ];

    // The demo seed is a fixed literal; validation cannot fail on it.
    ClassCatalog::new(classes).expect("demo catalog seed is valid")
}

fn demo_class(
    id: &str,
    name: &str,
    location: &str,
    lecturer: &str,
    window: &str,
    latitude: f64,
    longitude: f64,
) -> ClassSchedule {
    ClassSchedule {
        id: id.to_string(),
        name: name.to_string(),
        location: location.to_string(),
        lecturer: lecturer.to_string(),
        window: TimeWindow::parse(window).expect("demo window literal is valid"),
        anchor: Coordinate::new(latitude, longitude),
    }
}
