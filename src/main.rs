use analytics::{MatchReport, MetricsEngine, date_bounds, filter_by_date};
use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use comfy_table::{Table, presets::UTF8_FULL};
use configuration::{Config, load_config};
use core_types::MatchRecord;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the Crosshair analytics application.
fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load the application configuration (falls back to defaults when no
    // config.toml is present).
    let config = load_config()?;

    // Parse command-line arguments.
    let cli = Cli::parse();

    // Execute the appropriate command.
    match cli.command {
        Commands::Report(args) => handle_report(args, config)?,
        Commands::Export(args) => handle_export(args, config)?,
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A terminal analytics dashboard for competitive shooter match logs.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute and render the performance report for a match log.
    Report(ReportArgs),
    /// Write the filtered match log back out as CSV, with derived columns.
    Export(ExportArgs),
}

#[derive(Parser)]
struct ReportArgs {
    /// Path to a match CSV. The built-in sample dataset is used when omitted.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Inclusive start of the date range (format: YYYY-MM-DD).
    /// Defaults to the earliest match in the log.
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Inclusive end of the date range (format: YYYY-MM-DD).
    /// Defaults to the latest match in the log.
    #[arg(long)]
    to: Option<NaiveDate>,
}

#[derive(Parser)]
struct ExportArgs {
    /// Path to a match CSV. The built-in sample dataset is used when omitted.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Inclusive start of the date range (format: YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Inclusive end of the date range (format: YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,

    /// The output file path for the exported CSV.
    #[arg(long, short)]
    output: PathBuf,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Runs the shared pipeline: load the log, then restrict it to the requested
/// date range (defaulting to the log's own bounds).
fn load_and_filter(
    file: Option<&PathBuf>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> anyhow::Result<Vec<MatchRecord>> {
    let records = match file {
        Some(path) => dataset::read_matches_from_path(path)
            .with_context(|| format!("Failed to load match log from {}", path.display()))?,
        None => {
            tracing::info!("No input file given; using the built-in sample dataset");
            dataset::sample_matches()
        }
    };

    let (start, end) = match date_bounds(&records) {
        Some((min_date, max_date)) => (from.unwrap_or(min_date), to.unwrap_or(max_date)),
        // An empty log has no bounds; an explicitly given range still gets
        // validated by the filter below.
        None => match (from, to) {
            (Some(start), Some(end)) => (start, end),
            _ => return Ok(records),
        },
    };

    let filtered = filter_by_date(&records, start, end)?;
    Ok(filtered)
}

/// Handles the orchestration of the `report` command.
fn handle_report(args: ReportArgs, config: Config) -> anyhow::Result<()> {
    let records = load_and_filter(args.file.as_ref(), args.from, args.to)?;
    if records.is_empty() {
        println!("No matches in the selected range.");
        return Ok(());
    }

    let min_matches = config.agent_table.min_matches;
    let engine = MetricsEngine::new(config);
    let report = engine.calculate(&records);

    println!("--- Performance Summary ---");
    println!("{}", summary_table(&report));

    if let Some(standout) = report.standout_agent() {
        println!(
            "{} is undefeated: {}-0 across {} matches ({} avg K/D, {}% avg HS). Consider maining.",
            standout.agent,
            standout.wins,
            standout.matches,
            standout.avg_kd,
            standout.avg_headshot_pct.round_dp(0),
        );
        println!();
    }

    if !report.agent_table.is_empty() {
        println!("--- Agent Performance (min. {min_matches} matches) ---");
        println!("{}", agent_table(&report));
    }

    println!("--- Map Performance ---");
    println!("{}", map_table(&report));

    println!("--- One-Tap Aim Potential ---");
    println!(
        "High-potential matches: {}/{} ({} of games)",
        report.one_tap.count,
        report.total_matches,
        fmt_pct(report.one_tap.share_pct, 0),
    );
    if !report.one_tap.matches.is_empty() {
        println!(
            "Avg HS% in these: {}",
            fmt_pct(report.one_tap.avg_headshot_pct, 1)
        );
        println!("{}", one_tap_table(&report));
    }

    if let Some(rec) = &report.recommendation {
        println!(
            "Your highest HS% ({}%) came on {} ({}).",
            rec.best_headshot_pct, rec.agent, rec.map_name
        );
        println!(
            "Suggested agent for one-tap aim routines: {}.",
            rec.suggested_agent
        );
    }

    Ok(())
}

/// Handles the orchestration of the `export` command.
fn handle_export(args: ExportArgs, config: Config) -> anyhow::Result<()> {
    let records = load_and_filter(args.file.as_ref(), args.from, args.to)?;

    dataset::write_matches_to_path(&args.output, &records, &config.one_tap)
        .with_context(|| format!("Failed to export to {}", args.output.display()))?;

    println!(
        "Exported {} matches to {}",
        records.len(),
        args.output.display()
    );
    Ok(())
}

// ==============================================================================
// Table Rendering
// ==============================================================================

fn summary_table(report: &MatchReport) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec![
        "Win Rate".to_string(),
        format!(
            "{} ({}W / {}L)",
            fmt_pct(report.win_rate_pct, 1),
            report.wins,
            report.losses
        ),
    ]);
    table.add_row(vec![
        "Avg K/D".to_string(),
        fmt_decimal(report.avg_kd, 2),
    ]);
    table.add_row(vec![
        "Avg HS%".to_string(),
        fmt_pct(report.avg_headshot_pct, 1),
    ]);
    table.add_row(vec![
        "MVP Rate".to_string(),
        fmt_pct(report.mvp_rate_pct, 0),
    ]);
    table.add_row(vec![
        "Top Agent".to_string(),
        report.top_agent.clone().unwrap_or_else(|| "-".to_string()),
    ]);
    table
}

fn agent_table(report: &MatchReport) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Agent", "Matches", "Wins", "Win Rate", "Avg K/D", "Avg HS%", "Avg ACS",
    ]);
    for row in &report.agent_table {
        table.add_row(vec![
            row.agent.clone(),
            row.matches.to_string(),
            row.wins.to_string(),
            format!("{}%", row.win_rate_pct),
            row.avg_kd.to_string(),
            row.avg_headshot_pct.to_string(),
            row.avg_acs.to_string(),
        ]);
    }
    table
}

fn map_table(report: &MatchReport) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Map", "Wins", "Matches", "Win Rate"]);
    for row in &report.map_table {
        table.add_row(vec![
            row.map_name.clone(),
            row.wins.to_string(),
            row.matches.to_string(),
            format!("{}%", row.win_rate_pct),
        ]);
    }
    table
}

fn one_tap_table(report: &MatchReport) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Date", "Map", "Agent", "K", "D", "HS%", "K/D"]);
    for record in &report.one_tap.matches {
        table.add_row(vec![
            record.date.format("%Y-%m-%d").to_string(),
            record.map_name.clone(),
            record.agent.clone(),
            record.kills.to_string(),
            record.deaths.to_string(),
            record.headshot_pct.to_string(),
            record.kd_ratio.to_string(),
        ]);
    }
    table
}

// ==============================================================================
// Display Formatting
// ==============================================================================

fn fmt_pct(value: Option<Decimal>, dp: u32) -> String {
    match value {
        Some(v) => format!("{}%", v.round_dp(dp)),
        None => "-".to_string(),
    }
}

fn fmt_decimal(value: Option<Decimal>, dp: u32) -> String {
    match value {
        Some(v) => v.round_dp(dp).to_string(),
        None => "-".to_string(),
    }
}
