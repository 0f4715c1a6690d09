//! Per-call request identity.
//!
//! A request is anonymous, bound to a consumer, or bound to a consumer plus a
//! token. A token without a consumer cannot be constructed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// API client identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consumer {
    pub key: String,
}

impl Consumer {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Token discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// End-user session token.
    Access,
    /// Request-only token (OAuth handshake in progress).
    Request,
}

/// End-user authorization attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub key: String,
    pub token_type: TokenType,
    pub user_id: i64,
}

impl Token {
    pub fn access(key: impl Into<String>, user_id: i64) -> Self {
        Self { key: key.into(), token_type: TokenType::Access, user_id }
    }

    pub fn request(key: impl Into<String>, user_id: i64) -> Self {
        Self { key: key.into(), token_type: TokenType::Request, user_id }
    }

    pub fn is_access(&self) -> bool {
        self.token_type == TokenType::Access
    }
}

/// Where the request entered the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    /// External HTTP caller.
    Http,
    /// In-process call (another method, a cron job, ...).
    #[default]
    Internal,
}

/// Request passed to every method handler.
#[derive(Debug, Clone, Default)]
pub struct Request {
    consumer: Option<Consumer>,
    token: Option<Token>,
    transport: Transport,
    langpref: Vec<String>,
    params: BTreeMap<String, String>,
}

impl Request {
    /// Request with no consumer and no token.
    pub fn anonymous(transport: Transport) -> Self {
        Self { transport, ..Self::default() }
    }

    pub fn with_consumer(consumer: Consumer, transport: Transport) -> Self {
        Self {
            consumer: Some(consumer),
            transport,
            ..Self::default()
        }
    }

    pub fn with_token(consumer: Consumer, token: Token, transport: Transport) -> Self {
        Self {
            consumer: Some(consumer),
            token: Some(token),
            transport,
            ..Self::default()
        }
    }

    /// Preferred languages, most preferred first.
    pub fn langpref(mut self, langs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.langpref = langs.into_iter().map(Into::into).collect();
        self
    }

    /// Method arguments (query string or form fields).
    pub fn params(mut self, params: impl IntoIterator<Item = (String, String)>) -> Self {
        self.params = params.into_iter().collect();
        self
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn consumer(&self) -> Option<&Consumer> {
        self.consumer.as_ref()
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn transport(&self) -> Transport {
        self.transport
    }

    pub fn is_http_request(&self) -> bool {
        self.transport == Transport::Http
    }

    pub fn preferred_languages(&self) -> &[String] {
        &self.langpref
    }

    /// User id of an access token, if the request carries one.
    pub fn access_user_id(&self) -> Option<i64> {
        self.token.as_ref().filter(|t| t.is_access()).map(|t| t.user_id)
    }
}
