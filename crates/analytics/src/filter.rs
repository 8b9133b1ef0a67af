use crate::error::AnalyticsError;
use chrono::NaiveDate;
use core_types::MatchRecord;

/// Restricts a record sequence to the inclusive date range `[start, end]`,
/// preserving relative order.
///
/// An empty result is valid, not an error: the caller simply picked a range
/// no match falls into. A range whose start is after its end is rejected with
/// `InvalidRange` before anything is filtered.
pub fn filter_by_date(
    records: &[MatchRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<MatchRecord>, AnalyticsError> {
    if start > end {
        return Err(AnalyticsError::InvalidRange { start, end });
    }

    Ok(records
        .iter()
        .filter(|r| r.date >= start && r.date <= end)
        .cloned()
        .collect())
}

/// Returns the earliest and latest match dates in the sequence, or `None`
/// when it is empty. Used to default the filter range to "everything".
pub fn date_bounds(records: &[MatchRecord]) -> Option<(NaiveDate, NaiveDate)> {
    let min = records.iter().map(|r| r.date).min()?;
    let max = records.iter().map(|r| r.date).max()?;
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::MatchResult;
    use rust_decimal::Decimal;

    fn make_record(day: u32, map_name: &str) -> MatchRecord {
        MatchRecord {
            date: NaiveDate::from_ymd_opt(2025, 12, day).unwrap(),
            map_name: map_name.to_string(),
            mode: "Competitive".to_string(),
            round_score: "13:8".to_string(),
            agent: "Phoenix".to_string(),
            rank: "Silver 1".to_string(),
            result: MatchResult::Win,
            won: true,
            kills: 20,
            deaths: 10,
            assists: 5,
            kd_ratio: Decimal::from(2),
            damage_delta: 50,
            headshot_pct: Decimal::from(30),
            adr: Decimal::from(200),
            acs: Decimal::from(300),
            performance_score: Decimal::from(900),
            placement: "MVP".to_string(),
            is_mvp: true,
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, day).unwrap()
    }

    #[test]
    fn full_bounds_return_the_sequence_unchanged() {
        let records = vec![
            make_record(22, "Haven"),
            make_record(24, "Pearl"),
            make_record(26, "Bind"),
        ];
        let (min, max) = date_bounds(&records).unwrap();
        assert_eq!((min, max), (date(22), date(26)));

        let filtered = filter_by_date(&records, min, max).unwrap();
        assert_eq!(filtered, records);
    }

    #[test]
    fn range_outside_all_dates_yields_empty_not_error() {
        let records = vec![make_record(22, "Haven"), make_record(26, "Bind")];
        let filtered = filter_by_date(&records, date(1), date(15)).unwrap();
        assert!(filtered.is_empty());
    }

    #[test]
    fn bounds_are_inclusive_on_both_ends() {
        let records = vec![
            make_record(22, "Haven"),
            make_record(24, "Pearl"),
            make_record(26, "Bind"),
        ];
        let filtered = filter_by_date(&records, date(22), date(24)).unwrap();
        let maps: Vec<&str> = filtered.iter().map(|r| r.map_name.as_str()).collect();
        assert_eq!(maps, ["Haven", "Pearl"]);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let records = vec![make_record(24, "Pearl")];
        let err = filter_by_date(&records, date(26), date(22)).unwrap_err();
        assert_eq!(
            err,
            AnalyticsError::InvalidRange {
                start: date(26),
                end: date(22),
            }
        );
    }

    #[test]
    fn empty_sequence_has_no_bounds() {
        assert_eq!(date_bounds(&[]), None);
    }
}
