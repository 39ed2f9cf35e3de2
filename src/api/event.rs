//! Gateway proxy event records.
//!
//! The handlers consume the API Gateway proxy integration shape directly:
//! a body that may be base64-encoded, a query-string map that may be absent
//! entirely, and a case-insensitive header map. Keeping this shape explicit
//! (instead of hiding it behind framework extractors) keeps the base64 flag
//! and the absent-query case unit-testable.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const ALLOW_POST: &str = "OPTIONS,POST";
pub const ALLOW_GET: &str = "OPTIONS,GET";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
    /// `None` when the gateway sends no query map at all, which is distinct
    /// from an empty map.
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl ProxyRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl ProxyResponse {
    /// JSON response with the permissive CORS headers every endpoint sends.
    pub fn json<T: Serialize>(status_code: u16, body: &T, allowed_methods: &str) -> Self {
        Self {
            status_code,
            headers: cors_headers(allowed_methods),
            // Serializing our own response shapes cannot fail.
            body: serde_json::to_string(body).unwrap_or_default(),
            is_base64_encoded: false,
        }
    }

    /// Response with no body, headers included.
    pub fn empty(status_code: u16, allowed_methods: &str) -> Self {
        Self {
            status_code,
            headers: cors_headers(allowed_methods),
            body: String::new(),
            is_base64_encoded: false,
        }
    }
}

fn cors_headers(allowed_methods: &str) -> HashMap<String, String> {
    HashMap::from([
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        ("Access-Control-Allow-Headers".to_string(), "*".to_string()),
        (
            "Access-Control-Allow-Methods".to_string(),
            allowed_methods.to_string(),
        ),
        ("Content-Type".to_string(), "application/json".to_string()),
    ])
}
