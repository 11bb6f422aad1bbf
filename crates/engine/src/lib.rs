pub mod analysis;
pub mod config;
pub mod play;
pub mod scoring;
pub mod table;

pub use analysis::{analyze, HandAnalysis, Suggestion};
pub use config::{ConfigError, TableConfig, VulnerabilityMode};
pub use play::{PlayError, PlayOutcome, Trick, TrickValidator};
pub use scoring::{score, Score, ScoreBreakdown, ScoringError};
pub use table::{BoardRecord, Phase, SeatStatistics, Table, TableError, TableEvent};

use types::call::Call;
use types::error::ParseError;

/// Parse a whitespace- or comma-separated call string (e.g. "1C P 1D" or
/// "1C,P,1D") into a Vec<Call>.
pub fn parse_calls(calls_string: &str) -> Result<Vec<Call>, ParseError> {
    calls_string
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::strain::Strain;

    #[test]
    fn test_parse_calls() {
        assert_eq!(parse_calls("").unwrap(), Vec::new());
        assert_eq!(
            parse_calls("1C, P,X XX 3N").unwrap(),
            vec![
                Call::bid(1, Strain::Clubs),
                Call::Pass,
                Call::Double,
                Call::Redouble,
                Call::bid(3, Strain::NoTrump),
            ]
        );
        assert_eq!(
            parse_calls("1C 8S"),
            Err(ParseError::Call("8S".to_string()))
        );
    }
}
