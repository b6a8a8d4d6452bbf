use std::num::IntErrorKind;

/// Rows ranked above this in the search results are never confirmed
pub const MAX_QUERY_RANKING: i64 = 5;

pub const EXPLANATION_RANK: &str = "Query Ranking > 5";
pub const EXPLANATION_NOT_FOUND: &str = "School String not found in website.";
pub const EXPLANATION_CONFIRMED: &str = "Validity is confirmed according to current tests.";
pub const EXPLANATION_MALFORMED_RANK: &str = "Query Ranking is not an integer";

/// Outcome of the validity gates for one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Passed the rank gate and the school name was found on the page
    Confirmed,
    /// Query ranking above the threshold; the page was not fetched
    RankAboveThreshold,
    /// Page did not mention the school, or could not be fetched
    SchoolNotFound,
    /// Query ranking could not be parsed as an integer
    MalformedRanking,
    /// Annotation carried over from a previous run
    Cached { confirmed: bool, explanation: String },
}

impl Verdict {
    pub fn confirmed(&self) -> bool {
        match self {
            Verdict::Confirmed => true,
            Verdict::RankAboveThreshold | Verdict::SchoolNotFound | Verdict::MalformedRanking => {
                false
            }
            Verdict::Cached { confirmed, .. } => *confirmed,
        }
    }

    pub fn explanation(&self) -> &str {
        match self {
            Verdict::Confirmed => EXPLANATION_CONFIRMED,
            Verdict::RankAboveThreshold => EXPLANATION_RANK,
            Verdict::SchoolNotFound => EXPLANATION_NOT_FOUND,
            Verdict::MalformedRanking => EXPLANATION_MALFORMED_RANK,
            Verdict::Cached { explanation, .. } => explanation.as_str(),
        }
    }

    /// Line written to the run log for this decision
    pub fn log_line(&self) -> String {
        match self {
            Verdict::Confirmed => "VALID: Confirmed validity of school's URL!".to_string(),
            Verdict::Cached { confirmed, .. } => format!(
                "Taking previously found value for validity_confirmed: {}",
                format_flag(*confirmed)
            ),
            other => format!("INVALID: {}", other.explanation().trim_end_matches('.')),
        }
    }
}

/// Rank gate: `None` when the row may go on to the content gate.
///
/// Integers too large for i64 still compare against the threshold.
pub fn rank_gate(query_ranking: &str) -> Option<Verdict> {
    match query_ranking.trim().parse::<i64>() {
        Ok(rank) if rank > MAX_QUERY_RANKING => Some(Verdict::RankAboveThreshold),
        Ok(_) => None,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(Verdict::RankAboveThreshold),
            IntErrorKind::NegOverflow => None,
            _ => Some(Verdict::MalformedRanking),
        },
    }
}

/// Parse a stored VALIDITY_CONFIRMED cell. Empty or unrecognised cells are `None`.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

pub fn format_flag(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}
