use crate::enums::MatchResult;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One played match, as loaded from the source table.
///
/// Records are immutable after load and carry no identity beyond their
/// position in the loaded sequence. The `won` flag is derived from `result`
/// by the loader; the two must always agree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Calendar date of the match (day granularity).
    pub date: NaiveDate,
    pub map_name: String,
    /// Game mode label (e.g., "Competitive").
    pub mode: String,
    /// Rounds won:lost, kept as opaque text ("13:8"). Never parsed further.
    pub round_score: String,
    /// The character/loadout played.
    pub agent: String,
    /// Ranked tier label at match time.
    pub rank: String,
    pub result: MatchResult,
    /// Derived at load time: `result == MatchResult::Win`.
    pub won: bool,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    /// Kill/death ratio as supplied by the source column. Carried, not
    /// re-derived from `kills`/`deaths`: the upstream tracker applies its
    /// own rounding, and recomputing would shift every downstream mean.
    pub kd_ratio: Decimal,
    /// Damage delta versus the lobby average. The only signed metric.
    pub damage_delta: i64,
    /// Headshot percentage in [0, 100].
    pub headshot_pct: Decimal,
    /// Average damage per round.
    pub adr: Decimal,
    /// Average combat score.
    pub acs: Decimal,
    pub performance_score: Decimal,
    /// Placement label among match participants (e.g., "MVP", "6th").
    pub placement: String,
    pub is_mvp: bool,
}

impl MatchRecord {
    /// Whether this match qualifies as a one-tap opportunity: high headshot
    /// rate and a kill/death ratio above the given floor. Computed on demand,
    /// never stored on the record.
    pub fn one_tap_opportunity(&self, min_headshot_pct: Decimal, min_kd: Decimal) -> bool {
        self.headshot_pct >= min_headshot_pct && self.kd_ratio >= min_kd
    }
}
