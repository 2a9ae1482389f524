//! Probability to risk tier

use recovery_core::{RiskCategory, RiskDecision};

/// Lowest probability in the low-risk band
pub const LOW_RISK_THRESHOLD: f64 = 0.70;
/// Lowest probability in the medium-risk band
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.40;

/// Risk tier for a recovery probability. Boundaries belong to the higher band.
pub fn categorize(recovery_probability: f64) -> RiskCategory {
    if recovery_probability >= LOW_RISK_THRESHOLD {
        RiskCategory::LowRisk
    } else if recovery_probability >= MEDIUM_RISK_THRESHOLD {
        RiskCategory::MediumRisk
    } else {
        RiskCategory::HighRisk
    }
}

/// Full decision; the tier is taken from the unrounded probability and the
/// reported probability is rounded to 4 decimals
pub fn decide(recovery_probability: f64) -> RiskDecision {
    let risk_category = categorize(recovery_probability);
    RiskDecision {
        recovery_probability: (recovery_probability * 10_000.0).round() / 10_000.0,
        risk_category,
        recommended_strategy: risk_category.strategy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recovery_core::RecommendedStrategy;

    fn check(p: f64, category: RiskCategory, strategy: RecommendedStrategy) {
        let decision = decide(p);
        assert_eq!(decision.risk_category, category, "probability {}", p);
        assert_eq!(decision.recommended_strategy, strategy, "probability {}", p);
    }

    #[test]
    fn test_threshold_boundaries() {
        check(0.70, RiskCategory::LowRisk, RecommendedStrategy::StandardFollowUp);
        check(0.6999, RiskCategory::MediumRisk, RecommendedStrategy::NegotiationOffer);
        check(0.40, RiskCategory::MediumRisk, RecommendedStrategy::NegotiationOffer);
        check(0.3999, RiskCategory::HighRisk, RecommendedStrategy::Escalation);
        check(0.0, RiskCategory::HighRisk, RecommendedStrategy::Escalation);
        check(1.0, RiskCategory::LowRisk, RecommendedStrategy::StandardFollowUp);
    }

    #[test]
    fn test_tier_uses_unrounded_probability() {
        // rounds to 0.7 for reporting but stays medium risk
        let decision = decide(0.69996);
        assert_eq!(decision.recovery_probability, 0.7);
        assert_eq!(decision.risk_category, RiskCategory::MediumRisk);
    }

    #[test]
    fn test_probability_is_rounded() {
        assert_eq!(decide(0.123456).recovery_probability, 0.1235);
        assert_eq!(decide(0.72).recovery_probability, 0.72);
    }
}
