//! Lead scoring derived from how attribute values split between closed and
//! non-closed deals in a historical lead export.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
