//! Transport-neutral method response.

use bytes::Bytes;
use serde::Serialize;

use crate::error::{OkapiError, Result};

pub const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";
pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";
pub const CONTENT_TYPE_XML: &str = "text/xml; charset=utf-8";

/// Response returned by a method handler. The dispatcher passes it back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: String,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: u16, content_type: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            content_type: content_type.into(),
            body: body.into(),
        }
    }

    /// 200 with a JSON-encoded body.
    pub fn json<T: Serialize>(value: &T) -> Result<Self> {
        let body = serde_json::to_vec(value)
            .map_err(|e| OkapiError::Internal(format!("json encode failed: {e}")))?;
        Ok(Self::new(200, CONTENT_TYPE_JSON, body))
    }

    pub fn html(status: u16, body: impl Into<Bytes>) -> Self {
        Self::new(status, CONTENT_TYPE_HTML, body)
    }
}
