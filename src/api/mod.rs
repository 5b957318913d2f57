//! HTTP boundary: client construction, request dispatch and captured responses

pub mod client;
pub mod dispatch;
pub mod response;

pub use client::ApiClient;
pub use dispatch::{PayloadEncoding, TimedResponse, parse_method, payload_encoding};
pub use response::CapturedResponse;
