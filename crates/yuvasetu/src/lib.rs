//! Internship matching for the YuvaSetu placement portal.
//!
//! The scoring engine lives in [`workflows::matching`]; the remaining modules provide the
//! configuration, telemetry, and error plumbing shared with the API service.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
