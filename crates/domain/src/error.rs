//! Domain error types.

/// Errors raised while building domain values from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Timeframe label not one of `1h`, `24h`, `7d`, `30d`.
    #[error("Unknown timeframe: {0}")]
    UnknownTimeframe(String),
}
