use crate::journal::{Month, Trade};
use chrono::NaiveDate;
use chrono_tz::Tz;
use std::collections::BTreeMap;

/// A trade paired with its calendar date in the journal time zone.
#[derive(Debug, Clone, Copy)]
pub struct DatedTrade<'a> {
    pub date: NaiveDate,
    pub trade: &'a Trade,
}

/// Output of the month filter: in-month trades plus the number of records
/// that could not be dated and were skipped.
#[derive(Debug, Clone, Default)]
pub struct MonthSlice<'a> {
    pub trades: Vec<DatedTrade<'a>>,
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct DailyAggregation {
    pub date: NaiveDate,
    pub result: f64,
    pub trade_count: u32,
    pub out_of_risk: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub cumulative: f64,
    pub daily_result: f64,
    pub trade_count: u32,
}

/// Keep trades whose local calendar date falls in `month`.
/// Output order follows input order; nothing downstream relies on it.
pub fn filter_month<'a, I>(trades: I, month: Month, tz: &Tz) -> MonthSlice<'a>
where
    I: IntoIterator<Item = &'a Trade>,
{
    let mut slice = MonthSlice::default();
    for trade in trades {
        match trade.local_date(tz) {
            Ok(date) if month.contains(date) => slice.trades.push(DatedTrade { date, trade }),
            Ok(_) => {}
            Err(e) => {
                slice.skipped += 1;
                tracing::warn!(trade_id = %trade.id, error = %e, "skipping malformed trade");
            }
        }
    }
    slice
}

/// Per-day sum, count and risk-flag OR, ascending by date.
pub fn group_by_day(trades: &[DatedTrade<'_>]) -> Vec<DailyAggregation> {
    let mut days: BTreeMap<NaiveDate, DailyAggregation> = BTreeMap::new();
    for dated in trades {
        let day = days.entry(dated.date).or_insert(DailyAggregation {
            date: dated.date,
            result: 0.0,
            trade_count: 0,
            out_of_risk: false,
        });
        day.result += dated.trade.result;
        day.trade_count += 1;
        day.out_of_risk |= dated.trade.out_of_risk;
    }
    days.into_values().collect()
}

/// Running cumulative result over days already sorted ascending.
pub fn build_equity_curve(daily: &[DailyAggregation]) -> Vec<EquityPoint> {
    daily
        .iter()
        .scan(0.0_f64, |cumulative, day| {
            *cumulative += day.result;
            Some(EquityPoint {
                date: day.date,
                cumulative: *cumulative,
                daily_result: day.result,
                trade_count: day.trade_count,
            })
        })
        .collect()
}
