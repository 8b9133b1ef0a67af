use crate::report::{AgentRow, AimRecommendation, MapRow, MatchReport, TrendPoint};
use configuration::Config;
use core_types::MatchRecord;
use rust_decimal::Decimal;

/// A stateless calculator for deriving performance metrics from match records.
///
/// The engine is parameterized by the application `Config` (one-tap
/// thresholds, agent-table rules, recommendation defaults) and holds no other
/// state; `calculate` is a pure function of its input slice.
#[derive(Debug, Default)]
pub struct MetricsEngine {
    config: Config,
}

impl MetricsEngine {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The main entry point for calculating match metrics.
    ///
    /// Accepts any record slice, including an empty one: for an empty input
    /// every scalar metric is `None`, both aggregate tables are empty, and
    /// the one-tap modal agent is the configured fallback. This is the
    /// engine's empty-input policy: degenerate values, never an error.
    pub fn calculate(&self, records: &[MatchRecord]) -> MatchReport {
        let mut report = MatchReport::new();
        report.one_tap.modal_agent = self.config.recommendation.fallback_agent.clone();

        if records.is_empty() {
            return report;
        }

        self.calculate_headline(records, &mut report);
        self.calculate_agent_table(records, &mut report);
        self.calculate_map_table(records, &mut report);
        self.calculate_one_tap(records, &mut report);
        self.calculate_trend(records, &mut report);
        self.calculate_recommendation(records, &mut report);

        tracing::debug!(
            "Computed report over {} matches ({} agents, {} maps)",
            report.total_matches,
            report.agent_table.len(),
            report.map_table.len()
        );

        report
    }

    /// Calculates the headline scalar statistics.
    fn calculate_headline(&self, records: &[MatchRecord], report: &mut MatchReport) {
        report.total_matches = records.len();
        report.wins = records.iter().filter(|r| r.won).count();
        report.losses = report.total_matches - report.wins;

        report.win_rate_pct = percentage(report.wins, report.total_matches);
        report.avg_kd = mean(records.iter().map(|r| r.kd_ratio));
        report.avg_headshot_pct = mean(records.iter().map(|r| r.headshot_pct));

        let mvp_count = records.iter().filter(|r| r.is_mvp).count();
        report.mvp_rate_pct = percentage(mvp_count, report.total_matches);

        report.top_agent = most_frequent_agent(records.iter().map(|r| r.agent.as_str()));
    }

    /// Builds the per-agent aggregate table.
    ///
    /// Groups below the configured minimum match count are excluded entirely;
    /// the survivors are sorted by win rate descending with a stable sort, so
    /// equal rates keep first-encounter order.
    fn calculate_agent_table(&self, records: &[MatchRecord], report: &mut MatchReport) {
        struct AgentAcc {
            agent: String,
            matches: usize,
            wins: usize,
            kd_sum: Decimal,
            headshot_sum: Decimal,
            acs_sum: Decimal,
        }

        // Insertion-ordered accumulation keeps the pre-sort order
        // deterministic. The input is a few dozen rows; a linear scan beats
        // a map here and preserves first-encounter order for free.
        let mut groups: Vec<AgentAcc> = Vec::new();
        for record in records {
            let index = match groups.iter().position(|g| g.agent == record.agent) {
                Some(index) => index,
                None => {
                    groups.push(AgentAcc {
                        agent: record.agent.clone(),
                        matches: 0,
                        wins: 0,
                        kd_sum: Decimal::ZERO,
                        headshot_sum: Decimal::ZERO,
                        acs_sum: Decimal::ZERO,
                    });
                    groups.len() - 1
                }
            };
            let group = &mut groups[index];
            group.matches += 1;
            if record.won {
                group.wins += 1;
            }
            group.kd_sum += record.kd_ratio;
            group.headshot_sum += record.headshot_pct;
            group.acs_sum += record.acs;
        }

        let min_matches = self.config.agent_table.min_matches;
        report.agent_table = groups
            .into_iter()
            .filter(|g| g.matches >= min_matches)
            .map(|g| {
                let matches = Decimal::from(g.matches);
                AgentRow {
                    win_rate_pct: (Decimal::from(g.wins) / matches * Decimal::from(100))
                        .round_dp(1),
                    avg_kd: (g.kd_sum / matches).round_dp(2),
                    avg_headshot_pct: (g.headshot_sum / matches).round_dp(2),
                    avg_acs: (g.acs_sum / matches).round_dp(2),
                    agent: g.agent,
                    matches: g.matches,
                    wins: g.wins,
                }
            })
            .collect();

        report
            .agent_table
            .sort_by(|a, b| b.win_rate_pct.cmp(&a.win_rate_pct));
    }

    /// Builds the per-map aggregate table.
    ///
    /// Every map present in the input gets a row, in first-encounter order.
    /// There is no minimum-count filter and no sort here.
    fn calculate_map_table(&self, records: &[MatchRecord], report: &mut MatchReport) {
        let mut groups: Vec<MapRow> = Vec::new();
        for record in records {
            let index = match groups.iter().position(|g| g.map_name == record.map_name) {
                Some(index) => index,
                None => {
                    groups.push(MapRow {
                        map_name: record.map_name.clone(),
                        wins: 0,
                        matches: 0,
                        win_rate_pct: Decimal::ZERO,
                    });
                    groups.len() - 1
                }
            };
            let group = &mut groups[index];
            group.matches += 1;
            if record.won {
                group.wins += 1;
            }
        }

        for group in &mut groups {
            group.win_rate_pct = (Decimal::from(group.wins) / Decimal::from(group.matches)
                * Decimal::from(100))
            .round_dp(1);
        }

        report.map_table = groups;
    }

    /// Extracts the one-tap opportunity subset and its summary statistics.
    fn calculate_one_tap(&self, records: &[MatchRecord], report: &mut MatchReport) {
        let thresholds = &self.config.one_tap;
        let mut subset: Vec<MatchRecord> = records
            .iter()
            .filter(|r| r.one_tap_opportunity(thresholds.min_headshot_pct, thresholds.min_kd))
            .cloned()
            .collect();

        if let Some(modal) = most_frequent_agent(subset.iter().map(|r| r.agent.as_str())) {
            report.one_tap.modal_agent = modal;
        }
        report.one_tap.count = subset.len();
        report.one_tap.share_pct = percentage(subset.len(), records.len());
        report.one_tap.avg_headshot_pct = mean(subset.iter().map(|r| r.headshot_pct));

        // Display order: strongest headshot performances first. Stable, so
        // equal percentages keep their input order.
        subset.sort_by(|a, b| b.headshot_pct.cmp(&a.headshot_pct));
        report.one_tap.matches = subset;
    }

    /// Emits the per-match K/D and headshot series for the trend chart.
    /// Input order is preserved; the loader already sorts by date.
    fn calculate_trend(&self, records: &[MatchRecord], report: &mut MatchReport) {
        report.trend = records
            .iter()
            .map(|r| TrendPoint {
                date: r.date,
                kd_ratio: r.kd_ratio,
                headshot_pct: r.headshot_pct,
            })
            .collect();
    }

    /// Derives the aim-training recommendation from the best headshot match.
    /// Ties on headshot percentage go to the first record holding the maximum.
    fn calculate_recommendation(&self, records: &[MatchRecord], report: &mut MatchReport) {
        let mut best: Option<&MatchRecord> = None;
        for record in records {
            match best {
                Some(current) if record.headshot_pct <= current.headshot_pct => {}
                _ => best = Some(record),
            }
        }

        report.recommendation = best.map(|record| AimRecommendation {
            best_headshot_pct: record.headshot_pct,
            agent: record.agent.clone(),
            map_name: record.map_name.clone(),
            suggested_agent: report.one_tap.modal_agent.clone(),
        });
    }
}

/// `part / total * 100` as an exact decimal; `None` when `total` is zero.
fn percentage(part: usize, total: usize) -> Option<Decimal> {
    if total == 0 {
        return None;
    }
    Some(Decimal::from(part) / Decimal::from(total) * Decimal::from(100))
}

/// Arithmetic mean of the values; `None` when the iterator is empty.
fn mean(values: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    let mut sum = Decimal::ZERO;
    let mut count: u64 = 0;
    for value in values {
        sum += value;
        count += 1;
    }
    if count == 0 {
        return None;
    }
    Some(sum / Decimal::from(count))
}

/// The most frequent agent, counted in input order. Ties resolve to the
/// first-encountered agent among the max-count set.
fn most_frequent_agent<'a>(agents: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for agent in agents {
        match counts.iter_mut().find(|(name, _)| *name == agent) {
            Some((_, count)) => *count += 1,
            None => counts.push((agent, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (name, count) in counts {
        match best {
            // Strictly greater, so the first-encountered agent wins ties.
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((name, count)),
        }
    }

    best.map(|(name, _)| name.to_string())
}
