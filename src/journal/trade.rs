use crate::errors::{JournalError, JournalResult};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

// ── Canonical trade schema ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Win,
    Loss,
    Breakeven,
}

impl Classification {
    /// Classification implied by the sign of a result.
    pub fn from_result(result: f64) -> Self {
        if result > 0.0 {
            Self::Win
        } else if result < 0.0 {
            Self::Loss
        } else {
            Self::Breakeven
        }
    }
}

impl FromStr for Classification {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "win" | "gain" => Ok(Self::Win),
            "loss" => Ok(Self::Loss),
            "breakeven" | "break_even" | "be" => Ok(Self::Breakeven),
            other => Err(JournalError::InvalidRecord(format!("unknown classification: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Buy,
    Sell,
}

impl FromStr for Direction {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" | "long" => Ok(Self::Buy),
            "sell" | "short" => Ok(Self::Sell),
            other => Err(JournalError::InvalidRecord(format!("unknown direction: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Strategy {
    pub id: String,
    pub name: String,
    pub out_of_strategy: bool,
}

/// One realized trade. Created at the fixture/UI boundary and never mutated
/// by aggregation. `date` keeps the timestamp exactly as received so that a
/// malformed value can be skipped and counted at aggregation time.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Trade {
    pub id: String,
    pub date: String,
    pub result: f64,
    pub classification: Classification,
    pub direction: Direction,
    pub strategy: Strategy,
    pub asset: String,
    pub account_id: String,
    pub out_of_risk: bool,
}

impl Trade {
    /// Calendar date of the trade in the journal time zone.
    pub fn local_date(&self, tz: &Tz) -> JournalResult<NaiveDate> {
        if !self.result.is_finite() {
            return Err(JournalError::InvalidRecord(format!(
                "trade {} has non-finite result",
                self.id
            )));
        }
        let at = parse_trade_time(&self.date, tz)?;
        Ok(at.with_timezone(tz).date_naive())
    }
}

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a trade timestamp. RFC 3339 values keep their offset; naive
/// date-times and bare dates are read as wall-clock time in `tz`.
pub fn parse_trade_time(raw: &str, tz: &Tz) -> JournalResult<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return localize(naive, tz, raw);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return localize(date.and_time(chrono::NaiveTime::MIN), tz, raw);
    }

    Err(JournalError::InvalidDate(raw.to_string()))
}

fn localize(naive: NaiveDateTime, tz: &Tz, raw: &str) -> JournalResult<DateTime<Utc>> {
    // Wall-clock times inside a DST gap are pushed forward by the gap.
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| JournalError::InvalidDate(format!("{raw} does not exist in {tz}")))
}

// ── Calendar month ──

/// A calendar month, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> JournalResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(JournalError::InvalidMonth(format!("{year}-{month}")));
        }
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Month containing "now" in the journal time zone.
    pub fn current(tz: &Tz) -> Self {
        Self::of(Utc::now().with_timezone(tz).date_naive())
    }

    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl FromStr for Month {
    type Err = JournalError;

    /// Accepts `YYYY-MM` or a full `YYYY-MM-DD` reference date.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self::of(date));
        }
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| JournalError::InvalidMonth(s.to_string()))?;
        let year = year
            .parse::<i32>()
            .map_err(|_| JournalError::InvalidMonth(s.to_string()))?;
        let month = month
            .parse::<u32>()
            .map_err(|_| JournalError::InvalidMonth(s.to_string()))?;
        Self::new(year, month)
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl serde::Serialize for Month {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
