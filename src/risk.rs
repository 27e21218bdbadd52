use std::fmt;

use crate::style::{StyleDescriptor, Tint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RiskTier {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskTier {
    pub const ALL: [RiskTier; 4] = [
        RiskTier::Critical,
        RiskTier::High,
        RiskTier::Medium,
        RiskTier::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Critical => "critical",
            RiskTier::High => "high",
            RiskTier::Medium => "medium",
            RiskTier::Low => "low",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Buckets a 0-100 risk score. Lower bounds are inclusive. Scores outside
/// the documented range are not clamped: negatives land in `Low`, anything
/// above 100 in `Critical`, and NaN in `Low`.
pub fn classify_risk_tier(score: f64) -> RiskTier {
    if score >= 75.0 {
        RiskTier::Critical
    } else if score >= 50.0 {
        RiskTier::High
    } else if score >= 25.0 {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

pub fn tier_to_badge_style(tier: RiskTier) -> StyleDescriptor {
    match tier {
        RiskTier::Critical => StyleDescriptor::uniform(Tint::Red),
        RiskTier::High => StyleDescriptor::uniform(Tint::Orange),
        RiskTier::Medium => StyleDescriptor::uniform(Tint::Yellow),
        RiskTier::Low => StyleDescriptor::uniform(Tint::Green),
    }
}

pub fn risk_color(score: f64) -> Tint {
    tier_to_badge_style(classify_risk_tier(score)).text
}

pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}
