use crate::journal::{Classification, Trade};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScalarMetrics {
    pub net_result: f64,
    pub win_rate: f64,
    pub profit_factor: f64,
    pub total_trades: u32,
}

/// Net result, win rate (%) and profit factor over a month's trades.
/// Every ratio guards its denominator and falls back to 0.
pub fn compute_scalars<'a, I>(trades: I) -> ScalarMetrics
where
    I: IntoIterator<Item = &'a Trade>,
{
    let mut net_result = 0.0_f64;
    let mut gross_profit = 0.0_f64;
    let mut gross_loss = 0.0_f64;
    let mut wins = 0_u32;
    let mut total = 0_u32;

    for trade in trades {
        total += 1;
        net_result += trade.result;
        match trade.classification {
            Classification::Win => {
                wins += 1;
                gross_profit += trade.result;
            }
            Classification::Loss => gross_loss += trade.result.abs(),
            Classification::Breakeven => {}
        }
    }

    let win_rate = if total == 0 {
        0.0
    } else {
        wins as f64 / total as f64 * 100.0
    };

    ScalarMetrics {
        net_result,
        win_rate,
        profit_factor: profit_factor(gross_profit, gross_loss),
        total_trades: total,
    }
}

/// Gross profit over gross loss. Zero loss yields 0, never infinity.
#[inline]
pub fn profit_factor(gross_profit: f64, gross_loss: f64) -> f64 {
    if gross_loss <= 0.0 {
        return 0.0;
    }
    let pf = gross_profit / gross_loss;
    if pf.is_finite() {
        pf.max(0.0)
    } else {
        0.0
    }
}
