//! Test utilities for DTI services.
//!
//! Provides `MockAuth` for signed-in requests, a movable `ManualClock` and JSON
//! request/response helpers.
//! Import from tests only, never from production code.

pub mod auth;
pub mod clock;
pub mod request;
