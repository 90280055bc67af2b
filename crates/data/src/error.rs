//! Error taxonomy for provider access.

/// Errors raised by the provider clients and the aggregation layer.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// Connection, DNS or timeout failure.
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-2xx response.
    #[error("{provider} returned HTTP {status}")]
    Status {
        /// Provider name.
        provider: &'static str,
        /// Response status code.
        status: u16,
    },
    /// Provider reported an application error in the response body.
    #[error("{provider} reported errors: {}", errors.join("; "))]
    Provider {
        /// Provider name.
        provider: &'static str,
        /// Error strings as returned by the provider.
        errors: Vec<String>,
    },
    /// Body did not match the expected schema.
    #[error("Failed to decode {provider} response: {source}")]
    Decode {
        /// Provider name.
        provider: &'static str,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// A numeric string field could not be parsed.
    #[error("Invalid number in field {field}: {value:?}")]
    InvalidNumber {
        /// Field name.
        field: &'static str,
        /// Raw value.
        value: String,
    },
    /// Bad configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, DataError>;

/// Parses one of the provider's decimal strings into `f64`.
pub(crate) fn parse_decimal(field: &'static str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DataError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("open", "64000.5").unwrap(), 64000.5);
        assert_eq!(parse_decimal("open", " 0.000025 ").unwrap(), 0.000025);
        assert!(matches!(
            parse_decimal("close", "abc"),
            Err(DataError::InvalidNumber { field: "close", .. })
        ));
        assert!(parse_decimal("close", "NaN").is_err());
    }

    #[test]
    fn test_provider_error_message() {
        let err = DataError::Provider {
            provider: "kraken",
            errors: vec!["EQuery:Unknown asset pair".to_string(), "EGeneral".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "kraken reported errors: EQuery:Unknown asset pair; EGeneral"
        );
    }
}
