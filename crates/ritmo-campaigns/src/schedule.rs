// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post cadence: two posts a week from the campaign start date.

use chrono::{Duration, NaiveDate};

/// Every campaign ships with this many draft posts.
pub const POSTS_PER_CAMPAIGN: usize = 8;

/// Dates for `count` posts starting from `start`, two per week: the first
/// of each week's pair lands one day after the week opens, the second
/// three days after that. For a start of 2026-03-01 the eight dates are
/// 03-02, 03-05, 03-09, 03-12, 03-16, 03-19, 03-23 and 03-26.
pub fn schedule_dates(start: NaiveDate, count: usize) -> Vec<NaiveDate> {
    (0..count)
        .map(|i| {
            let week = (i / 2) as i64;
            let day_in_week = if i % 2 == 0 { 1 } else { 4 };
            start + Duration::days(week * 7 + day_in_week)
        })
        .collect()
}

/// 1-based week number a post index falls in; used for template text.
pub fn week_number(index: usize) -> usize {
    index / 2 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn march_2026_reference_dates() {
        let dates = schedule_dates(date("2026-03-01"), POSTS_PER_CAMPAIGN);
        let rendered: Vec<String> = dates.iter().map(|d| d.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "2026-03-02",
                "2026-03-05",
                "2026-03-09",
                "2026-03-12",
                "2026-03-16",
                "2026-03-19",
                "2026-03-23",
                "2026-03-26",
            ]
        );
    }

    #[test]
    fn cadence_crosses_month_boundaries() {
        let dates = schedule_dates(date("2026-01-20"), POSTS_PER_CAMPAIGN);
        assert_eq!(dates.len(), POSTS_PER_CAMPAIGN);
        assert_eq!(dates[0].to_string(), "2026-01-21");
        assert_eq!(dates[7].to_string(), "2026-02-14");
        assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn week_numbers_pair_up() {
        let weeks: Vec<usize> = (0..8).map(week_number).collect();
        assert_eq!(weeks, vec![1, 1, 2, 2, 3, 3, 4, 4]);
    }
}
