pub mod compliance;
pub mod daily;
pub mod scalar;
pub mod streak;

use crate::journal::{Month, Trade};
use chrono_tz::Tz;
use compliance::{ComplianceScorer, ComplianceScores, OutOfStrategyHeuristic};
use daily::{DailyAggregation, EquityPoint};

/// Everything the dashboard needs for one calendar month.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MonthlyMetrics {
    pub month: Month,
    pub net_result: f64,
    pub win_rate: f64,
    pub profit_factor: f64,
    pub total_trades: u32,
    pub consistency_streak: u32,
    pub equity_curve: Vec<EquityPoint>,
    pub daily: Vec<DailyAggregation>,
    pub compliance: ComplianceScores,
    /// Records dropped because their date or result could not be read
    pub skipped_records: usize,
}

/// Stateless monthly aggregator.
/// Holds only the calendar basis and the compliance scorer, so a shared
/// instance is safe to call from concurrent requests.
pub struct TradeAggregator {
    tz: Tz,
    scorer: Box<dyn ComplianceScorer>,
}

impl TradeAggregator {
    pub fn new(tz: Tz) -> Self {
        Self::with_scorer(tz, Box::new(OutOfStrategyHeuristic))
    }

    pub fn with_scorer(tz: Tz, scorer: Box<dyn ComplianceScorer>) -> Self {
        Self { tz, scorer }
    }

    pub fn timezone(&self) -> &Tz {
        &self.tz
    }

    /// Filter → group by day → equity curve, plus month-level scalars.
    pub fn aggregate_month<'a, I>(&self, trades: I, month: Month) -> MonthlyMetrics
    where
        I: IntoIterator<Item = &'a Trade>,
    {
        let slice = daily::filter_month(trades, month, &self.tz);
        let daily = daily::group_by_day(&slice.trades);
        let equity_curve = daily::build_equity_curve(&daily);
        let consistency_streak = streak::consistency_streak(daily.iter().map(|d| d.date));

        let in_month: Vec<&Trade> = slice.trades.iter().map(|d| d.trade).collect();
        let scalars = scalar::compute_scalars(in_month.iter().copied());
        let compliance = self.scorer.score(&in_month);

        tracing::debug!(
            month = %month,
            trades = scalars.total_trades,
            days = daily.len(),
            skipped = slice.skipped,
            scorer = self.scorer.name(),
            "month aggregated"
        );

        MonthlyMetrics {
            month,
            net_result: scalars.net_result,
            win_rate: scalars.win_rate,
            profit_factor: scalars.profit_factor,
            total_trades: scalars.total_trades,
            consistency_streak,
            equity_curve,
            daily,
            compliance,
            skipped_records: slice.skipped,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::journal::trade::{Classification, Direction, Strategy, Trade};

    pub fn trade(id: &str, date: &str, result: f64) -> Trade {
        Trade {
            id: id.to_string(),
            date: date.to_string(),
            result,
            classification: Classification::from_result(result),
            direction: Direction::Buy,
            strategy: Strategy {
                id: "s-1".into(),
                name: "Pullback".into(),
                out_of_strategy: false,
            },
            asset: "WINJ25".into(),
            account_id: "acc-1".into(),
            out_of_risk: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::test_support::trade;
    use chrono::NaiveDate;
    use chrono_tz::America::Sao_Paulo;
    use proptest::prelude::*;

    fn march() -> Month {
        Month::new(2025, 3).unwrap()
    }

    #[test]
    fn test_reference_month() {
        let trades = vec![
            trade("c", "2025-03-05T10:00:00", -195.0),
            trade("a", "2025-03-03T10:00:00", 305.0),
            trade("b", "2025-03-04T10:00:00", 350.0),
            trade("feb", "2025-02-27T10:00:00", 1000.0),
        ];
        let m = TradeAggregator::new(Sao_Paulo).aggregate_month(&trades, march());
        assert_eq!(m.net_result, 460.0);
        assert_eq!(m.total_trades, 3);
        assert!((m.win_rate - 66.67).abs() < 0.01, "win rate: {}", m.win_rate);
        assert!((m.profit_factor - 3.359).abs() < 1e-3, "profit factor: {}", m.profit_factor);
        assert_eq!(m.consistency_streak, 3);
        assert_eq!(m.equity_curve.last().map(|p| p.cumulative), Some(460.0));
        assert_eq!(m.skipped_records, 0);
    }

    #[test]
    fn test_empty_month() {
        let m = TradeAggregator::new(Sao_Paulo).aggregate_month(&Vec::new(), march());
        assert_eq!(m.net_result, 0.0);
        assert_eq!(m.win_rate, 0.0);
        assert_eq!(m.profit_factor, 0.0);
        assert_eq!(m.total_trades, 0);
        assert_eq!(m.consistency_streak, 0);
        assert!(m.equity_curve.is_empty());
        assert!(m.daily.is_empty());
    }

    #[test]
    fn test_malformed_records_are_counted_not_fatal() {
        let trades = vec![
            trade("ok", "2025-03-03T10:00:00", 50.0),
            trade("bad", "03/04/2025", 75.0),
        ];
        let m = TradeAggregator::new(Sao_Paulo).aggregate_month(&trades, march());
        assert_eq!(m.total_trades, 1);
        assert_eq!(m.skipped_records, 1);
    }

    #[test]
    fn test_custom_scorer() {
        struct Fixed;
        impl ComplianceScorer for Fixed {
            fn name(&self) -> &'static str {
                "fixed"
            }
            fn score(&self, _trades: &[&Trade]) -> ComplianceScores {
                ComplianceScores {
                    risk_management: 1.0,
                    strategy_adherence: 2.0,
                    entry_quality: 3.0,
                }
            }
        }
        let agg = TradeAggregator::with_scorer(Sao_Paulo, Box::new(Fixed));
        let m = agg.aggregate_month(&[trade("a", "2025-03-03", 1.0)], march());
        assert_eq!(m.compliance.entry_quality, 3.0);
    }

    #[test]
    fn test_metrics_serialize_iso_dates() {
        let trades = vec![trade("a", "2025-03-03T10:00:00", 5.0)];
        let m = TradeAggregator::new(Sao_Paulo).aggregate_month(&trades, march());
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["month"], "2025-03");
        assert_eq!(json["daily"][0]["date"], "2025-03-03");
        assert_eq!(json["equity_curve"][0]["cumulative"], 5.0);
    }

    fn arb_trade() -> impl Strategy<Value = Trade> {
        (1u32..=28, 0u32..24, -1000i32..1000, any::<bool>(), any::<bool>(), 0u32..3).prop_map(
            |(day, hour, cents, risk, off, month_shift)| {
                let month = 2 + month_shift; // Feb, Mar, Apr
                let date = format!("2025-{month:02}-{day:02}T{hour:02}:00:00");
                let mut t = trade("p", &date, cents as f64 / 10.0);
                t.out_of_risk = risk;
                t.strategy.out_of_strategy = off;
                t
            },
        )
    }

    proptest! {
        #[test]
        fn prop_filtered_trades_stay_in_month(trades in prop::collection::vec(arb_trade(), 0..60)) {
            let slice = daily::filter_month(&trades, march(), &Sao_Paulo);
            for dated in &slice.trades {
                let date = dated.trade.local_date(&Sao_Paulo).unwrap();
                prop_assert!(march().contains(date));
            }
        }

        #[test]
        fn prop_equity_recurrence(trades in prop::collection::vec(arb_trade(), 1..60)) {
            let m = TradeAggregator::new(Sao_Paulo).aggregate_month(&trades, march());
            prop_assert_eq!(m.equity_curve.len(), m.daily.len());
            for (i, point) in m.equity_curve.iter().enumerate() {
                let prev = if i == 0 { 0.0 } else { m.equity_curve[i - 1].cumulative };
                prop_assert_eq!(point.cumulative, prev + m.daily[i].result);
                prop_assert!(march().contains(m.daily[i].date));
                if i > 0 {
                    prop_assert!(m.daily[i - 1].date < m.daily[i].date);
                }
            }
        }

        #[test]
        fn prop_ratios_bounded(trades in prop::collection::vec(arb_trade(), 0..60)) {
            let m = TradeAggregator::new(Sao_Paulo).aggregate_month(&trades, march());
            prop_assert!((0.0..=100.0).contains(&m.win_rate));
            prop_assert!(m.profit_factor.is_finite() && m.profit_factor >= 0.0);
            prop_assert!(m.consistency_streak as usize <= m.daily.len());
            let c = m.compliance;
            for v in [c.risk_management, c.strategy_adherence, c.entry_quality] {
                prop_assert!((0.0..=100.0).contains(&v));
            }
        }

        #[test]
        fn prop_idempotent(trades in prop::collection::vec(arb_trade(), 0..60)) {
            let agg = TradeAggregator::new(Sao_Paulo);
            let first = agg.aggregate_month(&trades, march());
            let second = agg.aggregate_month(&trades, march());
            prop_assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn test_streak_over_calendar_days() {
        let trades = vec![
            trade("a", "2025-03-01T10:00:00", 1.0),
            trade("b", "2025-03-02T10:00:00", 1.0),
            trade("c", "2025-03-04T10:00:00", 1.0),
        ];
        let m = TradeAggregator::new(Sao_Paulo).aggregate_month(&trades, march());
        assert_eq!(m.consistency_streak, 2);
        assert_eq!(m.daily[2].date, NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
    }
}
