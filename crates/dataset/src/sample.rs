use chrono::NaiveDate;
use core_types::{MatchRecord, MatchResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Returns the fixed demonstration dataset used when no file is supplied.
///
/// Twenty competitive matches played between 2025-12-22 and 2025-12-26,
/// returned sorted by date ascending like every loader output. The exact
/// values are not a contract, but the set is internally consistent: every
/// `won` flag matches its `result`, and `is_mvp` agrees with the placement
/// label.
pub fn sample_matches() -> Vec<MatchRecord> {
    let mut rows = vec![
        row(26, "Haven", "13:3", "Phoenix", "Silver 1", MatchResult::Win, 20, 8, 5, dec!(2.5), 87, 18, 214, 346, 967, "MVP"),
        row(26, "Haven", "13:8", "Phoenix", "Silver 1", MatchResult::Win, 26, 11, 6, dec!(2.4), 82, 25, 218, 340, 970, "MVP"),
        row(26, "Pearl", "13:11", "Phoenix", "Silver 1", MatchResult::Win, 32, 16, 10, dec!(2.0), 153, 19, 295, 432, 941, "MVP"),
        row(26, "Pearl", "7:13", "KAY/O", "Silver 1", MatchResult::Loss, 12, 16, 6, dec!(0.8), 9, 15, 136, 207, 543, "6th"),
        row(26, "Bind", "8:13", "Phoenix", "Silver 1", MatchResult::Loss, 15, 16, 6, dec!(0.9), 10, 36, 153, 217, 492, "6th"),
        row(26, "Abyss", "2:13", "Reyna", "Silver 1", MatchResult::Loss, 17, 14, 0, dec!(1.2), 44, 28, 195, 331, 677, "2nd"),
        row(25, "Split", "4:13", "Reyna", "Silver 1", MatchResult::Loss, 13, 15, 4, dec!(0.9), -19, 8, 129, 219, 385, "2nd"),
        row(25, "Haven", "13:7", "Sage", "Silver 1", MatchResult::Win, 9, 13, 7, dec!(0.7), -28, 23, 97, 131, 311, "10th"),
        row(25, "Haven", "10:13", "Reyna", "Silver 1", MatchResult::Loss, 19, 19, 5, dec!(1.0), -1, 29, 165, 241, 474, "4th"),
        row(25, "Corrode", "13:4", "Reyna", "Silver 1", MatchResult::Win, 23, 12, 7, dec!(1.9), 104, 33, 240, 384, 987, "MVP"),
        row(25, "Bind", "13:5", "Tejo", "Silver 1", MatchResult::Win, 9, 11, 4, dec!(0.8), -6, 26, 128, 165, 583, "7th"),
        row(25, "Corrode", "13:11", "Phoenix", "Silver 1", MatchResult::Win, 13, 19, 9, dec!(0.7), -31, 19, 111, 170, 398, "9th"),
        row(25, "Split", "13:9", "Clove", "Silver 1", MatchResult::Win, 24, 13, 14, dec!(1.8), 100, 26, 220, 314, 937, "2nd"),
        row(25, "Sunset", "13:11", "Clove", "Silver 1", MatchResult::Win, 22, 17, 7, dec!(1.3), 32, 31, 176, 261, 843, "5th"),
        row(24, "Abyss", "13:4", "Clove", "Silver 1", MatchResult::Win, 11, 13, 12, dec!(0.8), -32, 22, 96, 161, 590, "8th"),
        row(24, "Sunset", "13:11", "Reyna", "Silver 1", MatchResult::Win, 31, 14, 5, dec!(2.2), 86, 23, 232, 357, 893, "MVP"),
        row(24, "Corrode", "13:9", "Reyna", "Bronze 3", MatchResult::Win, 17, 16, 2, dec!(1.1), -1, 25, 138, 216, 519, "5th"),
        row(23, "Split", "9:13", "Reyna", "Bronze 3", MatchResult::Loss, 14, 18, 3, dec!(0.8), -14, 31, 122, 176, 368, "8th"),
        row(23, "Pearl", "2:13", "Phoenix", "Bronze 3", MatchResult::Loss, 12, 16, 0, dec!(0.8), -23, 22, 148, 240, 375, "3rd"),
        row(22, "Haven", "9:13", "Sage", "Bronze 3", MatchResult::Loss, 12, 15, 6, dec!(0.8), -31, 22, 97, 162, 341, "8th"),
    ];

    rows.sort_by_key(|r| r.date);
    rows
}

fn row(
    day: u32,
    map_name: &str,
    round_score: &str,
    agent: &str,
    rank: &str,
    result: MatchResult,
    kills: u32,
    deaths: u32,
    assists: u32,
    kd_ratio: Decimal,
    damage_delta: i64,
    headshot_pct: u32,
    adr: u32,
    acs: u32,
    performance_score: u32,
    placement: &str,
) -> MatchRecord {
    MatchRecord {
        // All sample matches fall in December 2025.
        date: NaiveDate::from_ymd_opt(2025, 12, day).expect("valid sample date"),
        map_name: map_name.to_string(),
        mode: "Competitive".to_string(),
        round_score: round_score.to_string(),
        agent: agent.to_string(),
        rank: rank.to_string(),
        result,
        won: result.is_win(),
        kills,
        deaths,
        assists,
        kd_ratio,
        damage_delta,
        headshot_pct: Decimal::from(headshot_pct),
        adr: Decimal::from(adr),
        acs: Decimal::from(acs),
        performance_score: Decimal::from(performance_score),
        placement: placement.to_string(),
        is_mvp: placement == "MVP",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_is_internally_consistent() {
        let records = sample_matches();
        assert_eq!(records.len(), 20);
        for r in &records {
            assert_eq!(r.won, r.result.is_win());
            assert_eq!(r.is_mvp, r.placement == "MVP");
            assert!(r.headshot_pct >= Decimal::ZERO && r.headshot_pct <= Decimal::from(100));
        }
    }

    #[test]
    fn sample_is_sorted_by_date() {
        let records = sample_matches();
        assert!(records.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn sample_spans_the_documented_range() {
        let records = sample_matches();
        assert_eq!(
            records.first().unwrap().date,
            NaiveDate::from_ymd_opt(2025, 12, 22).unwrap()
        );
        assert_eq!(
            records.last().unwrap().date,
            NaiveDate::from_ymd_opt(2025, 12, 26).unwrap()
        );
        assert_eq!(records.iter().filter(|r| r.won).count(), 12);
    }
}
