use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Layout of the text report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStyle {
    /// Header with identifier and studio; episode lines carry titles.
    #[default]
    Detailed,
    /// Header with titles, year and restriction only; no episode titles.
    Brief,
}

#[derive(Debug, Error)]
#[error("unknown report style: '{0}' (expected 'detailed' or 'brief')")]
pub struct StyleParseError(pub String);

impl std::str::FromStr for ReportStyle {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "detailed" | "full" => Ok(ReportStyle::Detailed),
            "brief" | "short" => Ok(ReportStyle::Brief),
            _ => Err(StyleParseError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("detailed".parse::<ReportStyle>().unwrap(), ReportStyle::Detailed);
        assert_eq!("Brief".parse::<ReportStyle>().unwrap(), ReportStyle::Brief);
        assert_eq!("full".parse::<ReportStyle>().unwrap(), ReportStyle::Detailed);
        assert!("fancy".parse::<ReportStyle>().is_err());
    }

    #[test]
    fn defaults_to_detailed() {
        assert_eq!(ReportStyle::default(), ReportStyle::Detailed);
    }
}
