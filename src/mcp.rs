//! The MCP double: health and command-discovery endpoints answering
//! with static fixtures.

use serde::{Deserialize, Serialize};

use crate::http::{Request, Response};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub fn health() -> HealthResponse {
    HealthResponse {
        status: "ok".to_string(),
        version: "1.0".to_string(),
    }
}

pub fn command_list() -> Vec<String> {
    vec![
        "test_command".to_string(),
        "echo_command".to_string(),
        "status_command".to_string(),
    ]
}

/// Route one request for the MCP double. Unmatched routes answer 404
/// with a plain-text body.
pub fn route(request: &Request) -> Response {
    match (request.method.as_str(), request.path.as_str()) {
        ("GET", "/health") => Response::ok_json(&health()),
        ("GET", "/commands") => Response::ok_json(&command_list()),
        _ => Response::not_found("Not found"),
    }
}
