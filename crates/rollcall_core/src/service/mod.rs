//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate catalog, geofence, clock and store into the attendance
//!   submission workflow.
//! - Keep UI/FFI layers decoupled from storage and locking details.

pub mod attendance_service;
