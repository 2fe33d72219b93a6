// 🚩 Risk Signals - Evidence units derived from adverse findings
// One signal = one piece of evidence with a fixed score contribution

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Score contribution of a regulator warning / enforcement match
pub const REGULATOR_WARNING_WEIGHT: u32 = 40;

// ============================================================================
// TIMESTAMP
// ============================================================================

/// ISO-8601 date or date-time exactly as the regulator published it.
///
/// Stored verbatim so offsets and date-only values round-trip unchanged;
/// parsing is on demand and never required for matching or scoring.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    pub fn new(raw: &str) -> Self {
        Timestamp(raw.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// RFC 3339 date-time with its original offset
    pub fn date_time(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(self.0.trim()).ok()
    }

    /// Calendar date, from either a date-time or a bare YYYY-MM-DD
    pub fn date(&self) -> Option<NaiveDate> {
        self.date_time()
            .map(|dt| dt.date_naive())
            .or_else(|| NaiveDate::parse_from_str(self.0.trim(), "%Y-%m-%d").ok())
    }
}

impl FromStr for Timestamp {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Timestamp::new(s))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// SIGNAL TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalType {
    /// Broker appears on a regulator warning or enforcement list
    RegulatorWarning,

    /// Website URL flagged by an external checker
    UrlFlag,

    /// Broker appears on a third-party blacklist
    Blacklist,

    /// Volume of user complaints crossed a threshold
    UserComplaints,

    /// Heuristic flag (e.g. offshore-only licence, clone-site pattern)
    Heuristic,
}

impl SignalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalType::RegulatorWarning => "REGULATOR_WARNING",
            SignalType::UrlFlag => "URL_FLAG",
            SignalType::Blacklist => "BLACKLIST",
            SignalType::UserComplaints => "USER_COMPLAINTS",
            SignalType::Heuristic => "HEURISTIC",
        }
    }
}

// ============================================================================
// SIGNAL
// ============================================================================

/// Evidence that contributes `score_weight` points to a broker's risk score.
///
/// Two signals are the same evidence when `(description, source)` match;
/// see [`Signal::identity`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    #[serde(rename = "type")]
    pub signal_type: SignalType,

    /// Human-readable name of the originating list (e.g. "FCA Warning List")
    pub source: String,

    /// Why the broker was flagged
    pub description: String,

    /// Points this signal contributes to the raw score
    pub score_weight: u32,

    /// Link to the evidence, when one is known
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_url: Option<String>,

    /// When the underlying finding was published (pass-through, never clock-read)
    pub timestamp: Timestamp,
}

impl Signal {
    /// Build a regulator-warning signal with the fixed weight
    pub fn regulator_warning(
        source: &str,
        description: &str,
        evidence_url: &str,
        timestamp: Timestamp,
    ) -> Self {
        Signal {
            signal_type: SignalType::RegulatorWarning,
            source: source.to_string(),
            description: description.to_string(),
            score_weight: REGULATOR_WARNING_WEIGHT,
            evidence_url: Some(evidence_url.to_string()),
            timestamp,
        }
    }

    /// Deduplication key
    pub fn identity(&self) -> (&str, &str) {
        (&self.description, &self.source)
    }
}

// ============================================================================
// TESTS
// ============================================================================
