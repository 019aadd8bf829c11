//! Auth types shared by the DTI services.
//!
//! Provides JWT claims and validation, cookie builders, and the [`identity::Identity`]
//! extractor that authenticates requests from the `access_token` cookie.

pub mod cookie;
pub mod identity;
pub mod token;
