//! Domain model for scheduled classes and attendance events.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep class metadata and attendance records independent of any UI shape.
//!
//! # Invariants
//! - Classes are immutable once seeded into a catalog.
//! - Attendance records are append-only and never mutated after creation.

pub mod class;
pub mod record;
