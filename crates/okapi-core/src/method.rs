//! Method metadata: auth levels and the options a handler reports about itself.

use serde::Serialize;

use crate::error::{OkapiError, Result};

/// Minimum authentication level of a method.
///
/// Levels are ordinal: a level-3 method needs everything a level-2 method needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum AuthLevel {
    /// No identity at all.
    None = 0,
    /// Consumer key optional, used for statistics when present.
    Anonymous = 1,
    /// Consumer required.
    Consumer = 2,
    /// Consumer and token required.
    Token = 3,
}

impl AuthLevel {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn requires_consumer(self) -> bool {
        self >= AuthLevel::Consumer
    }

    pub fn requires_token(self) -> bool {
        self >= AuthLevel::Token
    }
}

impl TryFrom<u8> for AuthLevel {
    type Error = OkapiError;

    fn try_from(v: u8) -> Result<Self> {
        match v {
            0 => Ok(AuthLevel::None),
            1 => Ok(AuthLevel::Anonymous),
            2 => Ok(AuthLevel::Consumer),
            3 => Ok(AuthLevel::Token),
            other => Err(OkapiError::BadRequest(format!("auth level out of range: {other}"))),
        }
    }
}

/// Options descriptor returned by a method handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MethodOptions {
    pub min_auth_level: AuthLevel,
}

impl MethodOptions {
    pub fn level(min_auth_level: AuthLevel) -> Self {
        Self { min_auth_level }
    }
}

/// Namespace prefix of externally exposed methods.
pub const SERVICES_PREFIX: &str = "services/";

/// Namespace prefix of internal stats-only operation names.
pub const EXTRA_PREFIX: &str = "extra/";

/// Checks the `^services/[a-z0-9_/]*$` naming convention.
pub fn is_valid_method_name(name: &str) -> bool {
    match name.strip_prefix(SERVICES_PREFIX) {
        Some(rest) => rest
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'/'),
        None => false,
    }
}
