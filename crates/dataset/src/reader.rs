use crate::error::DatasetError;
use chrono::NaiveDate;
use core_types::{MatchRecord, MatchResult};
use csv::StringRecord;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// The required input column schema, in canonical order.
pub const COLUMNS: [&str; 18] = [
    "Date",
    "Map",
    "Mode",
    "Round_Score",
    "Agent",
    "Rank",
    "Result",
    "K",
    "D",
    "A",
    "KD",
    "DDΔ",
    "HS%",
    "ADR",
    "ACS",
    "Performance_Score",
    "Position",
    "MVP",
];

/// Resolved positions of the required columns within the header row.
///
/// Columns are located by name, not position, so tables carrying extra
/// columns (e.g., a previously exported file with the derived `Win` column)
/// re-import cleanly.
struct ColumnIndices {
    date: usize,
    map: usize,
    mode: usize,
    round_score: usize,
    agent: usize,
    rank: usize,
    result: usize,
    kills: usize,
    deaths: usize,
    assists: usize,
    kd: usize,
    damage_delta: usize,
    headshot_pct: usize,
    adr: usize,
    acs: usize,
    performance_score: usize,
    position: usize,
    mvp: usize,
}

impl ColumnIndices {
    fn resolve(headers: &StringRecord) -> Result<Self, DatasetError> {
        let index = |name: &str| -> Result<usize, DatasetError> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            date: index("Date")?,
            map: index("Map")?,
            mode: index("Mode")?,
            round_score: index("Round_Score")?,
            agent: index("Agent")?,
            rank: index("Rank")?,
            result: index("Result")?,
            kills: index("K")?,
            deaths: index("D")?,
            assists: index("A")?,
            kd: index("KD")?,
            damage_delta: index("DDΔ")?,
            headshot_pct: index("HS%")?,
            adr: index("ADR")?,
            acs: index("ACS")?,
            performance_score: index("Performance_Score")?,
            position: index("Position")?,
            mvp: index("MVP")?,
        })
    }
}

/// Parses a CSV match table into a sequence of `MatchRecord`s.
///
/// The first row must be a header containing every column in [`COLUMNS`]
/// (extra columns are ignored). Any cell that fails to parse aborts the load
/// with a `MalformedRecord` error naming the 1-based data row and the column;
/// no partial sequence is returned.
///
/// The returned records are stably sorted by `date` ascending, preserving
/// source order within a day. The `won` flag is derived from `Result` here.
pub fn read_matches<R: Read>(source: R) -> Result<Vec<MatchRecord>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(source);

    let columns = ColumnIndices::resolve(reader.headers()?)?;

    let mut records = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row_number = i + 1;
        let record = row?;
        records.push(parse_row(&record, &columns, row_number)?);
    }

    // Tracker exports arrive newest-first; the pipeline works oldest-first.
    records.sort_by_key(|r| r.date);

    tracing::debug!("Parsed {} match records from CSV source", records.len());

    Ok(records)
}

/// Opens `path` and parses it with [`read_matches`].
pub fn read_matches_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<MatchRecord>, DatasetError> {
    let file = File::open(path.as_ref())?;
    let records = read_matches(file)?;
    tracing::info!(
        "Loaded {} match records from {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(records)
}

fn parse_row(
    record: &StringRecord,
    columns: &ColumnIndices,
    row: usize,
) -> Result<MatchRecord, DatasetError> {
    let result: MatchResult = parse_with(record, columns.result, "Result", row, |s| {
        MatchResult::from_str(s).map_err(|e| e.to_string())
    })?;

    Ok(MatchRecord {
        date: parse_with(record, columns.date, "Date", row, |s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| e.to_string())
        })?,
        map_name: field(record, columns.map, "Map", row)?.to_string(),
        mode: field(record, columns.mode, "Mode", row)?.to_string(),
        round_score: field(record, columns.round_score, "Round_Score", row)?.to_string(),
        agent: field(record, columns.agent, "Agent", row)?.to_string(),
        rank: field(record, columns.rank, "Rank", row)?.to_string(),
        result,
        won: result.is_win(),
        kills: parse_u32(record, columns.kills, "K", row)?,
        deaths: parse_u32(record, columns.deaths, "D", row)?,
        assists: parse_u32(record, columns.assists, "A", row)?,
        kd_ratio: parse_decimal(record, columns.kd, "KD", row, DecimalBound::NonNegative)?,
        damage_delta: parse_with(record, columns.damage_delta, "DDΔ", row, |s| {
            s.parse::<i64>().map_err(|e| e.to_string())
        })?,
        headshot_pct: parse_decimal(record, columns.headshot_pct, "HS%", row, DecimalBound::Percentage)?,
        adr: parse_decimal(record, columns.adr, "ADR", row, DecimalBound::NonNegative)?,
        acs: parse_decimal(record, columns.acs, "ACS", row, DecimalBound::NonNegative)?,
        performance_score: parse_decimal(
            record,
            columns.performance_score,
            "Performance_Score",
            row,
            DecimalBound::NonNegative,
        )?,
        placement: field(record, columns.position, "Position", row)?.to_string(),
        is_mvp: parse_with(record, columns.mvp, "MVP", row, |s| match s {
            "Yes" => Ok(true),
            "No" => Ok(false),
            other => Err(format!("expected 'Yes' or 'No', got '{other}'")),
        })?,
    })
}

/// Domain constraint applied to a decimal column after parsing.
enum DecimalBound {
    NonNegative,
    /// Must lie within [0, 100].
    Percentage,
}

fn field<'r>(
    record: &'r StringRecord,
    index: usize,
    column: &str,
    row: usize,
) -> Result<&'r str, DatasetError> {
    record
        .get(index)
        .map(str::trim)
        .ok_or_else(|| DatasetError::MalformedRecord {
            row,
            column: column.to_string(),
            reason: "field is missing".to_string(),
        })
}

fn parse_with<T>(
    record: &StringRecord,
    index: usize,
    column: &str,
    row: usize,
    parse: impl FnOnce(&str) -> Result<T, String>,
) -> Result<T, DatasetError> {
    let value = field(record, index, column, row)?;
    parse(value).map_err(|reason| DatasetError::MalformedRecord {
        row,
        column: column.to_string(),
        reason,
    })
}

fn parse_u32(
    record: &StringRecord,
    index: usize,
    column: &str,
    row: usize,
) -> Result<u32, DatasetError> {
    parse_with(record, index, column, row, |s| {
        s.parse::<u32>().map_err(|e| e.to_string())
    })
}

fn parse_decimal(
    record: &StringRecord,
    index: usize,
    column: &str,
    row: usize,
    bound: DecimalBound,
) -> Result<Decimal, DatasetError> {
    parse_with(record, index, column, row, |s| {
        let value = Decimal::from_str(s).map_err(|e| e.to_string())?;
        match bound {
            DecimalBound::NonNegative if value.is_sign_negative() => {
                Err(format!("must be non-negative, got {value}"))
            }
            DecimalBound::Percentage if value < Decimal::ZERO || value > Decimal::from(100) => {
                Err(format!("must lie in [0, 100], got {value}"))
            }
            _ => Ok(value),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const HEADER: &str =
        "Date,Map,Mode,Round_Score,Agent,Rank,Result,K,D,A,KD,DDΔ,HS%,ADR,ACS,Performance_Score,Position,MVP";

    fn table(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out
    }

    #[test]
    fn parses_a_well_formed_row() {
        let csv = table(&[
            "2025-12-26,Haven,Competitive,13:3,Phoenix,Silver 1,Win,20,8,5,2.5,87,18,214,346,967,MVP,Yes",
        ]);
        let records = read_matches(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2025, 12, 26).unwrap());
        assert_eq!(r.map_name, "Haven");
        assert_eq!(r.agent, "Phoenix");
        assert_eq!(r.result, MatchResult::Win);
        assert!(r.won);
        assert_eq!(r.kills, 20);
        assert_eq!(r.kd_ratio, dec!(2.5));
        assert_eq!(r.damage_delta, 87);
        assert_eq!(r.headshot_pct, dec!(18));
        assert!(r.is_mvp);
    }

    #[test]
    fn sorts_records_by_date_preserving_same_day_order() {
        let csv = table(&[
            "2025-12-26,Haven,Competitive,13:3,Phoenix,Silver 1,Win,20,8,5,2.5,87,18,214,346,967,MVP,Yes",
            "2025-12-24,Abyss,Competitive,13:4,Clove,Silver 1,Win,11,13,12,0.8,-32,22,96,161,590,8th,No",
            "2025-12-24,Sunset,Competitive,13:11,Reyna,Silver 1,Win,31,14,5,2.2,86,23,232,357,893,MVP,Yes",
        ]);
        let records = read_matches(csv.as_bytes()).unwrap();

        let maps: Vec<&str> = records.iter().map(|r| r.map_name.as_str()).collect();
        // Oldest first; the two Dec 24 rows keep their source order.
        assert_eq!(maps, ["Abyss", "Sunset", "Haven"]);
    }

    #[test]
    fn derives_won_from_result_for_every_record() {
        let csv = table(&[
            "2025-12-25,Split,Competitive,4:13,Reyna,Silver 1,Loss,13,15,4,0.9,-19,8,129,219,385,2nd,No",
            "2025-12-25,Haven,Competitive,13:7,Sage,Silver 1,Win,9,13,7,0.7,-28,23,97,131,311,10th,No",
        ]);
        let records = read_matches(csv.as_bytes()).unwrap();
        for r in &records {
            assert_eq!(r.won, r.result.is_win());
        }
    }

    #[test]
    fn rejects_unparseable_date_with_row_and_column() {
        let csv = table(&[
            "26/12/2025,Haven,Competitive,13:3,Phoenix,Silver 1,Win,20,8,5,2.5,87,18,214,346,967,MVP,Yes",
        ]);
        match read_matches(csv.as_bytes()) {
            Err(DatasetError::MalformedRecord { row, column, .. }) => {
                assert_eq!(row, 1);
                assert_eq!(column, "Date");
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_result_label() {
        let csv = table(&[
            "2025-12-26,Haven,Competitive,13:3,Phoenix,Silver 1,Win,20,8,5,2.5,87,18,214,346,967,MVP,Yes",
            "2025-12-26,Pearl,Competitive,7:13,KAY/O,Silver 1,Draw,12,16,6,0.8,9,15,136,207,543,6th,No",
        ]);
        match read_matches(csv.as_bytes()) {
            Err(DatasetError::MalformedRecord { row, column, .. }) => {
                assert_eq!(row, 2);
                assert_eq!(column, "Result");
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn rejects_negative_kill_count() {
        let csv = table(&[
            "2025-12-26,Haven,Competitive,13:3,Phoenix,Silver 1,Win,-3,8,5,2.5,87,18,214,346,967,MVP,Yes",
        ]);
        match read_matches(csv.as_bytes()) {
            Err(DatasetError::MalformedRecord { row, column, .. }) => {
                assert_eq!(row, 1);
                assert_eq!(column, "K");
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn rejects_headshot_pct_out_of_range() {
        let csv = table(&[
            "2025-12-26,Haven,Competitive,13:3,Phoenix,Silver 1,Win,20,8,5,2.5,87,118,214,346,967,MVP,Yes",
        ]);
        match read_matches(csv.as_bytes()) {
            Err(DatasetError::MalformedRecord { row, column, .. }) => {
                assert_eq!(row, 1);
                assert_eq!(column, "HS%");
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn missing_required_column_is_reported_by_name() {
        let csv = "Date,Map,Mode\n2025-12-26,Haven,Competitive";
        match read_matches(csv.as_bytes()) {
            Err(DatasetError::MissingColumn(name)) => assert_eq!(name, "Round_Score"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn ignores_extra_columns() {
        let header = format!("{HEADER},Win,One_Tap_Opportunity");
        let csv = format!(
            "{header}\n2025-12-26,Haven,Competitive,13:3,Phoenix,Silver 1,Win,20,8,5,2.5,87,18,214,346,967,MVP,Yes,True,False"
        );
        let records = read_matches(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].won);
    }

    #[test]
    fn empty_table_is_not_an_error() {
        let records = read_matches(table(&[]).as_bytes()).unwrap();
        assert!(records.is_empty());
    }
}
