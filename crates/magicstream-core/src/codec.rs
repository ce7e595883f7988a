// Copyright (c) 2026 Roman Barinov <rbarinov@gmail.com>
// Licensed under the FSL-1.1-NC.

use crate::RequestConfig;
use std::fmt;

/// Identity of "the same logical request" for in-flight deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey(String);

impl RequestKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `METHOD:url:params:body`. Params live in a `BTreeMap` and JSON objects keep
/// sorted keys, so the key does not depend on insertion order.
pub fn request_key(config: &RequestConfig) -> RequestKey {
    let params = serde_json::to_string(&config.params).unwrap_or_default();
    let body = match &config.body {
        Some(body) => body.to_string(),
        None => "null".to_string(),
    };
    RequestKey(format!(
        "{}:{}:{}:{}",
        config.method, config.url, params, body
    ))
}

/// Empty payloads decode to `null`; non-JSON payloads are kept as a string.
pub fn decode_body(data: &[u8]) -> serde_json::Value {
    if data.is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_slice(data)
        .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(data).into_owned()))
}
