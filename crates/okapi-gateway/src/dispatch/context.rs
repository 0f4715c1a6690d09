//! Per-call context handed to method handlers.
//!
//! Replaces a process-wide translation domain: the language is chosen per call
//! and lives exactly as long as the call.

/// Languages the gateway has message catalogues for.
pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "pl", "de", "nl", "ro", "fr", "es", "it"];

#[derive(Debug, Clone)]
pub struct CallContext {
    method: String,
    language: String,
}

impl CallContext {
    /// Pick the first supported language from `langpref`, else `default_language`.
    pub fn new(method: &str, langpref: &[String], default_language: &str) -> Self {
        let language = langpref
            .iter()
            .find(|l| SUPPORTED_LANGUAGES.contains(&l.as_str()))
            .cloned()
            .unwrap_or_else(|| default_language.to_string());
        tracing::trace!(method = %method, language = %language, "call context entered");
        Self {
            method: method.to_string(),
            language,
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

impl Drop for CallContext {
    fn drop(&mut self) {
        tracing::trace!(method = %self.method, "call context released");
    }
}
