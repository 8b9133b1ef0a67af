use crate::error::DatasetError;
use crate::reader::COLUMNS;
use configuration::OneTapThresholds;
use core_types::MatchRecord;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Serializes a record sequence back to the input column schema, plus the two
/// derived columns `Win` and `One_Tap_Opportunity` appended at the end.
///
/// Derived cells use title-case `True`/`False`, the casing the dashboard's
/// download format uses; `MVP` round-trips as `Yes`/`No`. The reader locates
/// columns by header name and ignores extras, so exported files re-import
/// cleanly.
pub fn write_matches<W: Write>(
    sink: W,
    records: &[MatchRecord],
    one_tap: &OneTapThresholds,
) -> Result<(), DatasetError> {
    let mut writer = csv::Writer::from_writer(sink);

    let mut header: Vec<&str> = COLUMNS.to_vec();
    header.push("Win");
    header.push("One_Tap_Opportunity");
    writer.write_record(&header)?;

    for record in records {
        let one_tap_flag =
            record.one_tap_opportunity(one_tap.min_headshot_pct, one_tap.min_kd);
        writer.write_record([
            record.date.format("%Y-%m-%d").to_string(),
            record.map_name.clone(),
            record.mode.clone(),
            record.round_score.clone(),
            record.agent.clone(),
            record.rank.clone(),
            record.result.to_string(),
            record.kills.to_string(),
            record.deaths.to_string(),
            record.assists.to_string(),
            record.kd_ratio.to_string(),
            record.damage_delta.to_string(),
            record.headshot_pct.to_string(),
            record.adr.to_string(),
            record.acs.to_string(),
            record.performance_score.to_string(),
            record.placement.clone(),
            if record.is_mvp { "Yes" } else { "No" }.to_string(),
            bool_cell(record.won).to_string(),
            bool_cell(one_tap_flag).to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Creates `path` and writes the record sequence with [`write_matches`].
pub fn write_matches_to_path<P: AsRef<Path>>(
    path: P,
    records: &[MatchRecord],
    one_tap: &OneTapThresholds,
) -> Result<(), DatasetError> {
    let file = File::create(path.as_ref())?;
    write_matches(file, records, one_tap)?;
    tracing::info!(
        "Exported {} match records to {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(())
}

fn bool_cell(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_matches;
    use crate::sample::sample_matches;

    fn thresholds() -> OneTapThresholds {
        OneTapThresholds::default()
    }

    fn export(records: &[MatchRecord]) -> String {
        let mut out = Vec::new();
        write_matches(&mut out, records, &thresholds()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn header_carries_schema_plus_derived_columns() {
        let csv = export(&sample_matches());
        let header = csv.lines().next().unwrap();
        assert_eq!(
            header,
            "Date,Map,Mode,Round_Score,Agent,Rank,Result,K,D,A,KD,DDΔ,HS%,ADR,ACS,Performance_Score,Position,MVP,Win,One_Tap_Opportunity"
        );
    }

    #[test]
    fn derived_cells_agree_with_record_state() {
        let records = sample_matches();
        let csv = export(&records);
        let t = thresholds();

        for (line, record) in csv.lines().skip(1).zip(&records) {
            let cells: Vec<&str> = line.split(',').collect();
            let expected_win = if record.won { "True" } else { "False" };
            let expected_one_tap =
                if record.one_tap_opportunity(t.min_headshot_pct, t.min_kd) {
                    "True"
                } else {
                    "False"
                };
            assert_eq!(cells[cells.len() - 2], expected_win);
            assert_eq!(cells[cells.len() - 1], expected_one_tap);
        }
    }

    #[test]
    fn export_round_trips_through_the_reader() {
        let records = sample_matches();
        let csv = export(&records);
        let reparsed = read_matches(csv.as_bytes()).unwrap();
        assert_eq!(reparsed, records);
    }
}
