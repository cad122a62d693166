use crate::errors::{JournalError, JournalResult};
use crate::journal::{Trade, TradeRecord};
use crate::mentor::{Mentor, Student};
use std::collections::HashSet;
use std::path::Path;

/// Mock journal compiled into the binary; `JOURNAL_FIXTURES` overrides it.
const BUILTIN_FIXTURE: &str = include_str!("../fixtures/journal.json");

#[derive(serde::Deserialize)]
struct FixtureFile {
    #[serde(default)]
    mentor: Option<MentorFixture>,
    /// Kept as raw values so one bad record does not sink the whole file
    #[serde(default)]
    trades: Vec<serde_json::Value>,
}

#[derive(serde::Deserialize)]
struct MentorFixture {
    name: String,
    #[serde(default)]
    students: Vec<Student>,
}

/// In-memory journal: canonical trades plus the mentor roster.
#[derive(Debug, Clone)]
pub struct Journal {
    pub trades: Vec<Trade>,
    pub mentor: Mentor,
    /// Records that failed the adapter or repeated an id
    pub rejected: usize,
}

impl Journal {
    pub fn load(path: Option<&Path>, share_id: &str) -> JournalResult<Self> {
        match path {
            Some(p) => {
                let raw = std::fs::read_to_string(p)
                    .map_err(|e| JournalError::Fixture(format!("{}: {e}", p.display())))?;
                tracing::info!(path = %p.display(), "loading journal fixture");
                Self::from_json(&raw, share_id)
            }
            None => {
                tracing::info!("loading built-in journal fixture");
                Self::from_json(BUILTIN_FIXTURE, share_id)
            }
        }
    }

    pub fn from_json(raw: &str, share_id: &str) -> JournalResult<Self> {
        let file: FixtureFile = serde_json::from_str(raw)?;

        let mut trades = Vec::with_capacity(file.trades.len());
        let mut seen = HashSet::with_capacity(file.trades.len());
        let mut rejected = 0;

        for (idx, value) in file.trades.into_iter().enumerate() {
            let trade = serde_json::from_value::<TradeRecord>(value)
                .map_err(JournalError::from)
                .and_then(TradeRecord::into_trade);
            match trade {
                Ok(t) if seen.insert(t.id.clone()) => trades.push(t),
                Ok(t) => {
                    rejected += 1;
                    tracing::warn!(index = idx, trade_id = %t.id, "duplicate trade id in fixture");
                }
                Err(e) => {
                    rejected += 1;
                    tracing::warn!(index = idx, error = %e, "rejecting fixture record");
                }
            }
        }

        let mentor = match file.mentor {
            Some(m) => Mentor::new(m.name, share_id, m.students),
            None => Mentor::new("", share_id, Vec::new()),
        };

        tracing::info!(
            trades = trades.len(),
            rejected,
            students = mentor.students.len(),
            "journal loaded"
        );

        Ok(Self {
            trades,
            mentor,
            rejected,
        })
    }

    pub fn trades_for_account<'a>(&'a self, account_id: &'a str) -> impl Iterator<Item = &'a Trade> + 'a {
        self.trades.iter().filter(move |t| t.account_id == account_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::TradeAggregator;
    use crate::journal::Month;
    use chrono_tz::America::Sao_Paulo;

    #[test]
    fn test_builtin_fixture_loads() {
        let journal = Journal::load(None, "share-1").unwrap();
        assert_eq!(journal.trades.len(), 10);
        assert_eq!(journal.rejected, 0);
        assert_eq!(journal.mentor.students.len(), 2);
        assert!(journal.mentor.accepts("share-1"));
    }

    #[test]
    fn test_builtin_march_metrics() {
        let journal = Journal::load(None, "share-1").unwrap();
        let m = TradeAggregator::new(Sao_Paulo)
            .aggregate_month(&journal.trades, Month::new(2025, 3).unwrap());
        assert_eq!(m.total_trades, 7);
        assert!((m.net_result - 625.5).abs() < 1e-9, "net: {}", m.net_result);
        assert_eq!(m.consistency_streak, 3);
        assert_eq!(m.daily.len(), 6);
    }

    #[test]
    fn test_bad_records_rejected_individually() {
        let raw = r#"{
            "trades": [
                { "id": "a", "date": "2025-03-03", "result": 1.0, "direction": "buy",
                  "strategyId": "s", "asset": "X", "accountId": "acc" },
                { "id": "a", "date": "2025-03-04", "result": 2.0, "direction": "buy",
                  "strategyId": "s", "asset": "X", "accountId": "acc" },
                { "id": "b", "date": "2025-03-05", "result": "lots", "direction": "buy" },
                { "id": "c", "date": "2025-03-05", "result": 3.0, "direction": "hold",
                  "strategyId": "s", "asset": "X", "accountId": "acc" }
            ]
        }"#;
        let journal = Journal::from_json(raw, "share").unwrap();
        assert_eq!(journal.trades.len(), 1);
        assert_eq!(journal.rejected, 3);
        assert!(journal.mentor.students.is_empty());
    }

    #[test]
    fn test_unreadable_file_is_fixture_error() {
        let err = Journal::load(Some(Path::new("/nonexistent/journal.json")), "s").unwrap_err();
        assert!(matches!(err, JournalError::Fixture(_)));
    }

    #[test]
    fn test_trades_for_account() {
        let journal = Journal::load(None, "share-1").unwrap();
        assert_eq!(journal.trades_for_account("acc-bruno-01").count(), 2);
    }
}
