//! Record storage contracts and the in-memory implementation.
//!
//! # Responsibility
//! - Define use-case oriented access to the append-only attendance log.
//! - Isolate locking details from service/business orchestration.
//!
//! # Invariants
//! - Stores are append-only; no update or delete API exists.
//! - Queries return snapshots in insertion order.

pub mod record_store;
