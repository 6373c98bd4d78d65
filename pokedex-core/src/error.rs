//! Error types for the Pokedex client.
//!
//! One hierarchy built with `thiserror`, shared by the cache, the catalog
//! client, and the REPL.

use thiserror::Error;

/// Result type alias using `PokedexError`.
pub type Result<T> = std::result::Result<T, PokedexError>;

/// Main error type for all Pokedex operations.
#[derive(Debug, Error)]
pub enum PokedexError {
    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// A configured value is out of range (e.g. a non-positive cache TTL).
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A background task was requested outside of a Tokio runtime.
    #[error("Runtime unavailable: {0}")]
    RuntimeUnavailable(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // NETWORK ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// HTTP request failed before a response arrived.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Remote catalog answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Requested catalog resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Connection timeout.
    #[error("Connection timeout: {0}")]
    ConnectionTimeout(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // SESSION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Input validation failed.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A command was invoked with missing or malformed arguments.
    #[error("{0}")]
    UsageError(String),

    /// The creature is already in the Pokedex.
    #[error("you already have {0} in your Pokedex")]
    AlreadyCaught(String),

    /// Terminal or pipe I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PokedexError {
    /// Returns true if this error is recoverable (can retry).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PokedexError::HttpError(_)
                | PokedexError::ConnectionTimeout(_)
                | PokedexError::HttpStatus { status: 500..=599, .. }
        )
    }

    /// Returns true if the user can fix this by typing something else.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            PokedexError::ValidationError(_)
                | PokedexError::UsageError(_)
                | PokedexError::AlreadyCaught(_)
                | PokedexError::NotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_error_display() {
        let err = PokedexError::HttpStatus {
            url: "https://pokeapi.co/api/v2/pokemon/ditto".into(),
            status: 503,
        };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("ditto"));
    }

    #[test_case(PokedexError::HttpError("reset".into()), true; "transport failure")]
    #[test_case(PokedexError::ConnectionTimeout("slow".into()), true; "timeout")]
    #[test_case(PokedexError::HttpStatus { url: "u".into(), status: 502 }, true; "server error")]
    #[test_case(PokedexError::HttpStatus { url: "u".into(), status: 400 }, false; "client error")]
    #[test_case(PokedexError::InvalidConfiguration("ttl".into()), false; "bad config")]
    fn test_is_recoverable(err: PokedexError, expected: bool) {
        assert_eq!(err.is_recoverable(), expected);
    }

    #[test]
    fn test_error_classification() {
        assert!(PokedexError::AlreadyCaught("pikachu".into()).is_user_error());
        assert!(PokedexError::NotFound("missingno".into()).is_user_error());
        assert!(!PokedexError::HttpError("test".into()).is_user_error());
        assert!(!PokedexError::JsonError(serde_json::from_str::<u8>("x").unwrap_err()).is_user_error());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_result: std::result::Result<serde_json::Value, _> = serde_json::from_str("invalid");
        let result: Result<serde_json::Value> = json_result.map_err(PokedexError::from);
        assert!(matches!(result, Err(PokedexError::JsonError(_))));
    }
}
