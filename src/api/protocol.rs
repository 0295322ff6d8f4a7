//! Shared API Protocol
//!
//! Route prefixes and the envelopes common to every endpoint. Every JSON body
//! carries a `status` of either `"success"` or `"error"`.

use serde::Serialize;

pub const API_VERSION: &str = "v1";
pub const API_PREFIX: &str = "/api/v1";

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

pub const HEADER_REQUEST_ID: &str = "x-request-id";
pub const HEADER_RESPONSE_TIME: &str = "x-response-time";

/// Success response with only a human-readable message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub status: &'static str,
    pub message: String,
}

impl MessageResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_SUCCESS,
            message: message.into(),
        }
    }
}

/// Body of every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
    /// Identifier of the violated validation rule, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<&'static str>,
    /// Error chain, only exposed in the development environment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EndpointIndex {
    pub items: String,
    pub files: String,
}

/// Response for `GET /api/v1`.
#[derive(Debug, Serialize)]
pub struct ApiIndexResponse {
    pub status: &'static str,
    pub message: String,
    pub endpoints: EndpointIndex,
}

/// Response for any route the router does not know.
#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
    pub documentation: &'static str,
}
