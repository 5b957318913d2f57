//! Cross-backend API conformance checking
//!
//! Fires the same logical request at a legacy integration endpoint and at its
//! cloud gateway replacement, then checks that status, latency envelope and
//! payload shape agree.

pub mod api;
pub mod auth;
pub mod compare;
pub mod config;
pub mod error;
pub mod report;
pub mod scenario;

pub use error::{ParityError, Result};
