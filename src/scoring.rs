// 📊 Risk Scorer - Signal set → bounded score + severity level
//
// score = min(sum of weights, 100)
// level = step function of the UNCAPPED sum (120 → Critical, stored score 100)

use crate::signals::Signal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound of the stored score
pub const MAX_RISK_SCORE: u32 = 100;

pub const CRITICAL_THRESHOLD: u32 = 80;
pub const HIGH_THRESHOLD: u32 = 60;
pub const MEDIUM_THRESHOLD: u32 = 30;

// ============================================================================
// RISK LEVEL
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Thresholds evaluated high to low, first match wins
    pub fn from_raw_score(raw_score: u32) -> Self {
        if raw_score >= CRITICAL_THRESHOLD {
            RiskLevel::Critical
        } else if raw_score >= HIGH_THRESHOLD {
            RiskLevel::High
        } else if raw_score >= MEDIUM_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// RISK PROFILE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    /// 0-100, capped
    pub score: u32,

    pub level: RiskLevel,

    /// Free-text summary set by another subsystem; never produced by the scorer
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Deduplicated signals behind the score, in first-seen order
    #[serde(default)]
    pub signals: Vec<Signal>,
}

impl RiskProfile {
    /// One-line description for listings and logs
    pub fn describe(&self) -> String {
        let mut sources: Vec<&str> = Vec::new();
        for signal in &self.signals {
            if !sources.contains(&signal.source.as_str()) {
                sources.push(&signal.source);
            }
        }

        format!(
            "Score {}/{} ({}), {} signal(s): {}",
            self.score,
            MAX_RISK_SCORE,
            self.level,
            self.signals.len(),
            sources.join(", ")
        )
    }

    pub fn is_critical(&self) -> bool {
        self.level == RiskLevel::Critical
    }
}

// ============================================================================
// RISK SCORER
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct RiskScorer;

impl RiskScorer {
    pub fn new() -> Self {
        RiskScorer
    }

    /// `None` when there are no signals: "no adverse findings", not "score 0"
    pub fn score(&self, signals: Vec<Signal>) -> Option<RiskProfile> {
        if signals.is_empty() {
            return None;
        }

        let raw_score = raw_score(&signals);

        Some(RiskProfile {
            score: raw_score.min(MAX_RISK_SCORE),
            level: RiskLevel::from_raw_score(raw_score),
            summary: None,
            signals,
        })
    }
}

/// Sum of weights; saturates instead of overflowing on absurd inputs
pub fn raw_score(signals: &[Signal]) -> u32 {
    signals
        .iter()
        .fold(0u32, |acc, s| acc.saturating_add(s.score_weight))
}

// ============================================================================
// TESTS
// ============================================================================
