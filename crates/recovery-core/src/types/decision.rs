//! Risk decision types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk tier derived from recovery probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskCategory {
    LowRisk,
    MediumRisk,
    HighRisk,
}

impl RiskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::LowRisk => "LOW_RISK",
            RiskCategory::MediumRisk => "MEDIUM_RISK",
            RiskCategory::HighRisk => "HIGH_RISK",
        }
    }

    /// Collection strategy recommended for the tier
    pub fn strategy(&self) -> RecommendedStrategy {
        match self {
            RiskCategory::LowRisk => RecommendedStrategy::StandardFollowUp,
            RiskCategory::MediumRisk => RecommendedStrategy::NegotiationOffer,
            RiskCategory::HighRisk => RecommendedStrategy::Escalation,
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recommended collection strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendedStrategy {
    StandardFollowUp,
    NegotiationOffer,
    Escalation,
}

impl RecommendedStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendedStrategy::StandardFollowUp => "STANDARD_FOLLOW_UP",
            RecommendedStrategy::NegotiationOffer => "NEGOTIATION_OFFER",
            RecommendedStrategy::Escalation => "ESCALATION",
        }
    }
}

impl fmt::Display for RecommendedStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scoring outcome for a single case
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskDecision {
    /// Probability of recovery, in [0, 1]
    pub recovery_probability: f64,
    pub risk_category: RiskCategory,
    pub recommended_strategy: RecommendedStrategy,
}
