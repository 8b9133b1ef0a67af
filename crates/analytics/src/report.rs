use chrono::NaiveDate;
use core_types::MatchRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A comprehensive, standardized report over a filtered set of matches.
///
/// This struct is the final output of the `MetricsEngine` and serves as the
/// data transfer object for results throughout the system. Scalar metrics
/// that would require dividing by the record count are `Option<_>` and come
/// back `None` for an empty input; the engine never divides by zero and
/// never fails on degenerate input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    // I. Headline Statistics
    pub total_matches: usize,
    pub wins: usize,
    pub losses: usize,
    /// `wins / total * 100`, unrounded. Always within [0, 100].
    pub win_rate_pct: Option<Decimal>,
    pub avg_kd: Option<Decimal>,
    pub avg_headshot_pct: Option<Decimal>,
    pub mvp_rate_pct: Option<Decimal>,
    /// The most-played agent; ties go to the first encountered in input order.
    pub top_agent: Option<String>,

    // II. Grouped Aggregates
    pub agent_table: Vec<AgentRow>,
    pub map_table: Vec<MapRow>,

    // III. One-Tap Heuristics
    pub one_tap: OneTapReport,

    // IV. Presentation Feeds
    pub trend: Vec<TrendPoint>,
    pub recommendation: Option<AimRecommendation>,
}

impl MatchReport {
    /// Creates a new, zeroed-out MatchReport.
    /// This is useful as a default or starting point before calculations.
    pub fn new() -> Self {
        Self {
            total_matches: 0,
            wins: 0,
            losses: 0,
            win_rate_pct: None,
            avg_kd: None,
            avg_headshot_pct: None,
            mvp_rate_pct: None,
            top_agent: None,
            agent_table: Vec::new(),
            map_table: Vec::new(),
            one_tap: OneTapReport::new(),
            trend: Vec::new(),
            recommendation: None,
        }
    }

    /// The first agent-table row whose every match was a win, if any.
    ///
    /// The table is sorted by win rate descending, so a qualifying row is
    /// also the table's strongest agent. Powers the "consider maining" banner.
    pub fn standout_agent(&self) -> Option<&AgentRow> {
        self.agent_table.iter().find(|row| row.wins == row.matches)
    }
}

impl Default for MatchReport {
    fn default() -> Self {
        Self::new()
    }
}

/// One row of the per-agent aggregate table.
///
/// Only agents with at least the configured minimum number of matches appear;
/// groups below the minimum are excluded from the table entirely, not hidden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRow {
    pub agent: String,
    pub matches: usize,
    pub wins: usize,
    /// Percentage, rounded to 1 decimal place.
    pub win_rate_pct: Decimal,
    /// Rounded to 2 decimal places.
    pub avg_kd: Decimal,
    /// Rounded to 2 decimal places.
    pub avg_headshot_pct: Decimal,
    /// Rounded to 2 decimal places.
    pub avg_acs: Decimal,
}

/// One row of the per-map aggregate table.
///
/// Unlike the agent table, every map that appears in the input gets a row;
/// there is deliberately no minimum-count filter here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapRow {
    pub map_name: String,
    pub wins: usize,
    pub matches: usize,
    /// Percentage, rounded to 1 decimal place.
    pub win_rate_pct: Decimal,
}

/// The subset of matches flagged as one-tap opportunities, with its own
/// summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneTapReport {
    /// Qualifying records, sorted by headshot percentage descending.
    pub matches: Vec<MatchRecord>,
    pub count: usize,
    /// `count / total * 100`; `None` when the input set was empty.
    pub share_pct: Option<Decimal>,
    /// Mean headshot percentage within the subset; `None` when it is empty.
    pub avg_headshot_pct: Option<Decimal>,
    /// Most frequent agent in the subset (first-encountered on ties), or the
    /// configured fallback agent when the subset is empty.
    pub modal_agent: String,
}

impl OneTapReport {
    pub fn new() -> Self {
        Self {
            matches: Vec::new(),
            count: 0,
            share_pct: None,
            avg_headshot_pct: None,
            modal_agent: String::new(),
        }
    }
}

impl Default for OneTapReport {
    fn default() -> Self {
        Self::new()
    }
}

/// One point of the performance-over-time series: the chartable pair of
/// per-match K/D and headshot percentage, in date order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub kd_ratio: Decimal,
    pub headshot_pct: Decimal,
}

/// The aim-training suggestion derived from the best headshot performance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AimRecommendation {
    /// The highest headshot percentage in the filtered set.
    pub best_headshot_pct: Decimal,
    /// Agent and map that produced it.
    pub agent: String,
    pub map_name: String,
    /// The one-tap modal agent, suggested as the pick for aim routines.
    pub suggested_agent: String,
}
