use crate::journal::Trade;

/// Discipline percentages shown on the dashboard, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct ComplianceScores {
    pub risk_management: f64,
    pub strategy_adherence: f64,
    pub entry_quality: f64,
}

/// Scores a month's trades for rule compliance.
/// Implementations must be deterministic: same trades, same scores.
pub trait ComplianceScorer: Send + Sync {
    fn name(&self) -> &'static str;

    fn score(&self, trades: &[&Trade]) -> ComplianceScores;
}

/// Provisional scoring driven only by the share of out-of-strategy trades.
/// No ground truth exists for these numbers yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutOfStrategyHeuristic;

impl ComplianceScorer for OutOfStrategyHeuristic {
    fn name(&self) -> &'static str {
        "out-of-strategy-heuristic"
    }

    fn score(&self, trades: &[&Trade]) -> ComplianceScores {
        if trades.is_empty() {
            return ComplianceScores::default();
        }
        let flagged = trades.iter().filter(|t| t.strategy.out_of_strategy).count();
        let ratio = flagged as f64 / trades.len() as f64;

        ComplianceScores {
            risk_management: pct(1.0 - ratio / 2.0),
            strategy_adherence: pct(1.0 - ratio),
            entry_quality: pct(1.0 - 2.0 * ratio),
        }
    }
}

#[inline]
fn pct(fraction: f64) -> f64 {
    (fraction * 100.0).clamp(0.0, 100.0)
}
