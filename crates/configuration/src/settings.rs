use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// The root configuration structure for the entire application.
///
/// Every section has defaults matching the dashboard's stock behavior, so a
/// missing `config.toml` yields a fully usable configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub one_tap: OneTapThresholds,
    pub agent_table: AgentTableRules,
    pub recommendation: RecommendationDefaults,
}

/// Thresholds for classifying a match as a one-tap opportunity.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OneTapThresholds {
    /// Minimum headshot percentage (inclusive).
    pub min_headshot_pct: Decimal,
    /// Minimum kill/death ratio (inclusive).
    pub min_kd: Decimal,
}

impl Default for OneTapThresholds {
    fn default() -> Self {
        Self {
            min_headshot_pct: dec!(25),
            min_kd: dec!(1.5),
        }
    }
}

/// Rules governing the per-agent aggregate table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AgentTableRules {
    /// Agents with fewer matches than this are excluded from the table
    /// entirely. The per-map table intentionally has no such minimum.
    pub min_matches: usize,
}

impl Default for AgentTableRules {
    fn default() -> Self {
        Self { min_matches: 2 }
    }
}

/// Defaults used by the aim-training recommendation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecommendationDefaults {
    /// Agent suggested when the one-tap subset is empty and no modal agent
    /// exists. An arbitrary placeholder, not a heuristic.
    pub fallback_agent: String,
}

impl Default for RecommendationDefaults {
    fn default() -> Self {
        Self {
            fallback_agent: "Reyna".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_dashboard_behavior() {
        let config = Config::default();
        assert_eq!(config.one_tap.min_headshot_pct, dec!(25));
        assert_eq!(config.one_tap.min_kd, dec!(1.5));
        assert_eq!(config.agent_table.min_matches, 2);
        assert_eq!(config.recommendation.fallback_agent, "Reyna");
    }
}
