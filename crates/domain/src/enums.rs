use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// History window selectable in the detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1h")]
    OneHour,
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHours,
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
}

impl Timeframe {
    /// All timeframes, shortest first.
    pub const ALL: [Timeframe; 4] = [
        Self::OneHour,
        Self::TwentyFourHours,
        Self::SevenDays,
        Self::ThirtyDays,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneHour => "1h",
            Self::TwentyFourHours => "24h",
            Self::SevenDays => "7d",
            Self::ThirtyDays => "30d",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1h" => Ok(Self::OneHour),
            "24h" => Ok(Self::TwentyFourHours),
            "7d" => Ok(Self::SevenDays),
            "30d" => Ok(Self::ThirtyDays),
            other => Err(DomainError::UnknownTimeframe(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe_parse_and_display() {
        for tf in Timeframe::ALL {
            assert_eq!(tf.as_str().parse::<Timeframe>().unwrap(), tf);
        }
        assert_eq!(" 30D ".parse::<Timeframe>().unwrap(), Timeframe::ThirtyDays);
        assert_eq!(Timeframe::SevenDays.to_string(), "7d");
    }

    #[test]
    fn test_timeframe_rejects_unknown_label() {
        let err = "2w".parse::<Timeframe>().unwrap_err();
        assert!(matches!(err, DomainError::UnknownTimeframe(ref s) if s == "2w"));
        assert!("1d".parse::<Timeframe>().is_err());
    }

    #[test]
    fn test_timeframe_serde_uses_labels() {
        let json = serde_json::to_string(&Timeframe::OneHour).unwrap();
        assert_eq!(json, "\"1h\"");
        let tf: Timeframe = serde_json::from_str("\"30d\"").unwrap();
        assert_eq!(tf, Timeframe::ThirtyDays);
    }
}
