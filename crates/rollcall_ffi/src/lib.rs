//! FFI shell exposing the attendance core to the mobile UI.

pub mod api;
