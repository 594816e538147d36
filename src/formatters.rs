//! Pure display-classification helpers. Total over their inputs: unknown
//! enum values map to a neutral category instead of failing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::types::{AiDecision, Severity};

/// Display category the UI maps to its styling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Tone {
    Success,
    Info,
    Caution,
    Warning,
    Danger,
    Neutral,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TrustTier {
    High,
    Medium,
    Low,
}

impl TrustTier {
    pub fn label(self) -> &'static str {
        match self {
            TrustTier::High => "High",
            TrustTier::Medium => "Medium",
            TrustTier::Low => "Low",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            TrustTier::High => Tone::Success,
            TrustTier::Medium => Tone::Warning,
            TrustTier::Low => Tone::Danger,
        }
    }
}

/// Band boundaries are inclusive on the lower bound: 80 is High, 60 is
/// Medium.
pub fn trust_tier(score: u8) -> TrustTier {
    if score >= 80 {
        TrustTier::High
    } else if score >= 60 {
        TrustTier::Medium
    } else {
        TrustTier::Low
    }
}

pub fn decision_tone(decision: AiDecision) -> Tone {
    match decision {
        AiDecision::Accept => Tone::Success,
        AiDecision::Review => Tone::Warning,
        AiDecision::Reject => Tone::Danger,
        AiDecision::Unknown => Tone::Neutral,
    }
}

/// Coarse alert levels used by the system-status views.
pub fn alert_level_tone(level: &str) -> Tone {
    match level {
        "Safe" => Tone::Success,
        "Warning" => Tone::Warning,
        "Critical" => Tone::Danger,
        _ => Tone::Neutral,
    }
}

pub fn severity_tone(severity: Severity) -> Tone {
    match severity {
        Severity::Critical => Tone::Danger,
        Severity::High => Tone::Warning,
        Severity::Medium => Tone::Caution,
        Severity::Low => Tone::Info,
        Severity::Unknown => Tone::Neutral,
    }
}

/// Trust score rendered for display: the tier's label and tone travel with
/// the raw value so the UI never re-derives thresholds.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TrustBadge {
    pub score: u8,
    pub label: &'static str,
    pub tone: Tone,
}

impl TrustBadge {
    pub fn for_score(score: u8) -> Self {
        let tier = trust_tier(score);
        Self {
            score,
            label: tier.label(),
            tone: tier.tone(),
        }
    }
}

const HASH_PREFIX_LEN: usize = 10;
const HASH_SUFFIX_LEN: usize = 6;

/// Shorten a blockchain hash for display: first 10 chars, an ellipsis, last
/// 6 chars. Inputs that are not longer than prefix+suffix are returned
/// unchanged; absent or empty input renders as "N/A".
pub fn truncate_hash(hash: Option<&str>) -> String {
    truncate_hash_with(hash, HASH_PREFIX_LEN)
}

pub fn truncate_hash_with(hash: Option<&str>, prefix_len: usize) -> String {
    let Some(hash) = hash.filter(|h| !h.is_empty()) else {
        return "N/A".to_string();
    };

    let chars: Vec<char> = hash.chars().collect();
    if chars.len() <= prefix_len + HASH_SUFFIX_LEN {
        return hash.to_string();
    }

    let prefix: String = chars[..prefix_len].iter().collect();
    let suffix: String = chars[chars.len() - HASH_SUFFIX_LEN..].iter().collect();
    format!("{prefix}...{suffix}")
}

/// Short human date, e.g. "Jan 31, 2027".
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trust_tiers_partition_the_score_range() {
        for score in 0u8..=100 {
            let tier = trust_tier(score);
            let expected = if score >= 80 {
                TrustTier::High
            } else if score >= 60 {
                TrustTier::Medium
            } else {
                TrustTier::Low
            };
            assert_eq!(tier, expected, "score {score}");
        }
    }

    #[test]
    fn trust_tier_boundaries_are_inclusive_on_the_lower_bound() {
        assert_eq!(trust_tier(79), TrustTier::Medium);
        assert_eq!(trust_tier(80), TrustTier::High);
        assert_eq!(trust_tier(59), TrustTier::Low);
        assert_eq!(trust_tier(60), TrustTier::Medium);
    }

    #[test]
    fn tier_styling_matches_label() {
        assert_eq!(trust_tier(92).label(), "High");
        assert_eq!(trust_tier(92).tone(), Tone::Success);
        assert_eq!(trust_tier(15).tone(), Tone::Danger);
    }

    #[test]
    fn decision_and_alert_tones_are_total() {
        assert_eq!(decision_tone(AiDecision::Accept), Tone::Success);
        assert_eq!(decision_tone(AiDecision::Review), Tone::Warning);
        assert_eq!(decision_tone(AiDecision::Reject), Tone::Danger);
        assert_eq!(decision_tone(AiDecision::Unknown), Tone::Neutral);

        assert_eq!(alert_level_tone("Safe"), Tone::Success);
        assert_eq!(alert_level_tone("Critical"), Tone::Danger);
        assert_eq!(alert_level_tone("anything else"), Tone::Neutral);

        assert_eq!(severity_tone(Severity::Critical), Tone::Danger);
        assert_eq!(severity_tone(Severity::Low), Tone::Info);
        assert_eq!(severity_tone(Severity::Unknown), Tone::Neutral);
    }

    #[test]
    fn truncates_long_hashes() {
        assert_eq!(
            truncate_hash(Some("0x1a2b3c4d5e6f7890abcdef")),
            "0x1a2b3c4d...abcdef"
        );
    }

    #[test]
    fn missing_or_empty_hash_renders_sentinel() {
        assert_eq!(truncate_hash(None), "N/A");
        assert_eq!(truncate_hash(Some("")), "N/A");
    }

    #[test]
    fn short_hashes_are_returned_unchanged() {
        assert_eq!(truncate_hash(Some("0x1a2b")), "0x1a2b");
        // Exactly prefix + suffix long: still no ellipsis.
        assert_eq!(truncate_hash(Some("0123456789abcdef")), "0123456789abcdef");
        assert_eq!(
            truncate_hash(Some("0123456789abcdefX")),
            "0123456789...bcdefX"
        );
    }

    #[test]
    fn formats_dates_short() {
        let date = NaiveDate::from_ymd_opt(2027, 1, 31).unwrap();
        assert_eq!(format_date(date), "Jan 31, 2027");
    }
}
