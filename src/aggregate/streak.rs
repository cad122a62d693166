use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Longest run of calendar-consecutive trading days.
/// Duplicate dates collapse; days without trades are simply absent.
pub fn consistency_streak<I>(dates: I) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let days: BTreeSet<NaiveDate> = dates.into_iter().collect();
    let mut iter = days.iter();
    let Some(mut prev) = iter.next() else {
        return 0;
    };

    let mut current = 1_u32;
    let mut best = 1_u32;
    for day in iter {
        if (*day - *prev).num_days() == 1 {
            current += 1;
        } else {
            current = 1;
        }
        best = best.max(current);
        prev = day;
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(consistency_streak(Vec::new()), 0);
    }

    #[test]
    fn test_single_day_is_one() {
        assert_eq!(consistency_streak(vec![d(7)]), 1);
        assert_eq!(consistency_streak(vec![d(7), d(7), d(7)]), 1, "duplicates collapse");
    }

    #[test]
    fn test_gap_resets() {
        assert_eq!(consistency_streak(vec![d(1), d(2), d(4)]), 2);
        assert_eq!(consistency_streak(vec![d(4), d(1), d(2)]), 2, "input order is irrelevant");
    }

    #[test]
    fn test_longest_run_wins() {
        let days = vec![d(1), d(2), d(5), d(6), d(7), d(8), d(20), d(21)];
        assert_eq!(consistency_streak(days), 4);
    }

    #[test]
    fn test_month_boundary_is_consecutive() {
        let days = vec![
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        ];
        assert_eq!(consistency_streak(days), 2);
    }
}
