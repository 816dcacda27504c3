//! Append-only attendance record store.
//!
//! # Responsibility
//! - Keep the process-lifetime attendance log and serve filtered reads.
//! - Serialize concurrent appends so near-simultaneous submissions cannot
//!   interleave.
//!
//! # Invariants
//! - Insertion order is preserved; with a monotone clock upstream this is
//!   also chronological order.
//! - Queries observe a consistent snapshot; they never block appends longer
//!   than the copy takes.

use crate::model::record::AttendanceRecord;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::RwLock;

pub type StoreResult<T> = Result<T, StoreError>;

/// Record store failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A writer panicked while holding the lock; the log is suspect.
    Poisoned,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Poisoned => write!(f, "record store lock poisoned by a failed writer"),
        }
    }
}

impl Error for StoreError {}

/// Storage interface for the append-only attendance log.
pub trait RecordStore {
    /// Appends one record at the end of the log.
    fn append(&self, record: AttendanceRecord) -> StoreResult<()>;
    /// Returns all records for one class, in insertion order.
    fn by_class(&self, class_id: &str) -> StoreResult<Vec<AttendanceRecord>>;
    /// Returns all records for one user, in insertion order.
    fn by_user(&self, user_id: &str) -> StoreResult<Vec<AttendanceRecord>>;
    /// Returns the whole log, in insertion order.
    fn all(&self) -> StoreResult<Vec<AttendanceRecord>>;
    /// Returns the number of stored records.
    fn len(&self) -> StoreResult<usize>;
}

/// Process-memory store guarding the log with a read/write lock.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: RwLock<Vec<AttendanceRecord>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

// Shells keep one shared store and build short-lived services around it.
impl<T: RecordStore + ?Sized> RecordStore for std::sync::Arc<T> {
    fn append(&self, record: AttendanceRecord) -> StoreResult<()> {
        (**self).append(record)
    }

    fn by_class(&self, class_id: &str) -> StoreResult<Vec<AttendanceRecord>> {
        (**self).by_class(class_id)
    }

    fn by_user(&self, user_id: &str) -> StoreResult<Vec<AttendanceRecord>> {
        (**self).by_user(user_id)
    }

    fn all(&self) -> StoreResult<Vec<AttendanceRecord>> {
        (**self).all()
    }

    fn len(&self) -> StoreResult<usize> {
        (**self).len()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn append(&self, record: AttendanceRecord) -> StoreResult<()> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        records.push(record);
        Ok(())
    }

    fn by_class(&self, class_id: &str) -> StoreResult<Vec<AttendanceRecord>> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records
            .iter()
            .filter(|record| record.class_id == class_id)
            .cloned()
            .collect())
    }

    fn by_user(&self, user_id: &str) -> StoreResult<Vec<AttendanceRecord>> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records
            .iter()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect())
    }

    fn all(&self) -> StoreResult<Vec<AttendanceRecord>> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.clone())
    }

    fn len(&self) -> StoreResult<usize> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.len())
    }
}
