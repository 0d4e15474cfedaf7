//! Campaign Insights — offline analyzer for campaign performance exports.
//!
//! Imports the delimited export into a local store, then renders grouped,
//! filtered, and sorted performance summaries in the terminal.

mod render;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use insights_core::config::AppConfig;
use insights_core::types::{CampaignRecord, GroupKey, Preferences, SortDirection, SortField};
use insights_ingest::decode_export;
use insights_reporting::filter::parse_day;
use insights_reporting::SessionContext;
use insights_store::{load_json, save_json, JsonFileStore, KeyValueStore};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "campaign-insights")]
#[command(about = "Offline analyzer for campaign performance exports")]
#[command(version)]
struct Cli {
    /// Data directory for the persisted dataset and preferences (overrides config)
    #[arg(long, env = "CAMPAIGN_INSIGHTS__STORE__DATA_DIR")]
    data_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import an export file, wholly replacing any stored dataset
    Import {
        /// Path to the delimited export (UTF-8)
        file: PathBuf,
    },
    /// Render the summary and grouped table from the stored dataset
    Report(ReportArgs),
    /// Drop the stored dataset and preferences
    Clear,
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Grouping dimension: account, campaign, ad-set, or ad
    #[arg(long)]
    group_by: Option<GroupKey>,

    /// Restrict to these account names (repeatable)
    #[arg(long = "account")]
    accounts: Vec<String>,

    /// Restrict to these campaign names (repeatable)
    #[arg(long = "campaign")]
    campaigns: Vec<String>,

    /// Restrict to these ad-set names (repeatable)
    #[arg(long = "ad-set")]
    ad_sets: Vec<String>,

    /// Inclusive start of the day interval (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,

    /// Inclusive end of the day interval (YYYY-MM-DD)
    #[arg(long)]
    to: Option<String>,

    /// Column to sort the table by
    #[arg(long)]
    sort_by: Option<SortField>,

    /// Sort direction: asc or desc
    #[arg(long)]
    direction: Option<SortDirection>,

    /// Persist these view controls as session defaults
    #[arg(long, default_value_t = false)]
    save_prefs: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campaign_insights=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    if let Some(dir) = cli.data_dir {
        config.store.data_dir = dir;
    }

    let store = JsonFileStore::open(&config.store.data_dir)
        .with_context(|| format!("opening data directory {}", config.store.data_dir))?;

    match cli.command {
        Command::Import { file } => run_import(&store, &config, &file),
        Command::Report(args) => run_report(&store, &config, args),
        Command::Clear => run_clear(&store, &config),
    }
}

fn run_import(store: &JsonFileStore, config: &AppConfig, file: &PathBuf) -> anyhow::Result<()> {
    let bytes =
        std::fs::read(file).with_context(|| format!("reading export {}", file.display()))?;
    let content = String::from_utf8_lossy(&bytes);

    let (records, report) = decode_export(&content);
    info!(
        dataset_id = %report.dataset_id,
        decoded = report.decoded,
        skipped = report.skipped,
        "import finished"
    );

    save_json(store, &config.store.dataset_key, &records)?;

    println!(
        "{} registros importados ({} ignorados) de {} linhas",
        report.decoded, report.skipped, report.total_lines
    );
    if report.legacy_layout_rows > 0 {
        println!(
            "{} registros no layout reduzido (sem dia/leads/cliques)",
            report.legacy_layout_rows
        );
    }
    Ok(())
}

fn run_report(store: &JsonFileStore, config: &AppConfig, args: ReportArgs) -> anyhow::Result<()> {
    let records: Vec<CampaignRecord> =
        load_json(store, &config.store.dataset_key).unwrap_or_default();
    if records.is_empty() {
        println!("Nenhum dado importado. Use `campaign-insights import <arquivo>`.");
        return Ok(());
    }

    let prefs = load_json::<Preferences>(store, &config.store.prefs_key);
    let visibility = prefs
        .as_ref()
        .map(|p| p.column_visibility.clone())
        .unwrap_or_default();

    let mut session = match &prefs {
        Some(p) => SessionContext::with_preferences(records, p),
        None => {
            let mut session = SessionContext::new(records);
            session.group_by = config.report.default_group_by.parse().unwrap_or_default();
            session.sort.field = config.report.default_sort_field.parse().unwrap_or_default();
            session.sort.direction = config
                .report
                .default_sort_direction
                .parse()
                .unwrap_or_default();
            session
        }
    };

    if let Some(group_by) = args.group_by {
        session.group_by = group_by;
    }
    if !args.accounts.is_empty() {
        session.filters.accounts = args.accounts.into_iter().collect();
    }
    if !args.campaigns.is_empty() {
        session.filters.campaigns = args.campaigns.into_iter().collect();
    }
    if !args.ad_sets.is_empty() {
        session.filters.ad_sets = args.ad_sets.into_iter().collect();
    }
    // Unparsable bounds are dropped, not fatal: the filter runs unconstrained.
    if let Some(raw) = args.from {
        match parse_day(&raw) {
            Some(day) => session.filters.date_start = Some(day),
            None => warn!(value = %raw, "unparsable start date, ignoring bound"),
        }
    }
    if let Some(raw) = args.to {
        match parse_day(&raw) {
            Some(day) => session.filters.date_end = Some(day),
            None => warn!(value = %raw, "unparsable end date, ignoring bound"),
        }
    }
    if let Some(field) = args.sort_by {
        session.sort.field = field;
    }
    if let Some(direction) = args.direction {
        session.sort.direction = direction;
    }

    let view = session.view();

    println!("{}", render::render_summary(&view.summary));
    println!();
    println!(
        "{}",
        render::render_table(&view.rows, session.group_by, &visibility)
    );
    println!();
    println!(
        "{} de {} registros após filtros",
        view.filtered_count,
        session.raw.len()
    );

    if args.save_prefs {
        save_json(store, &config.store.prefs_key, &session.preferences(visibility))?;
        info!("preferences saved");
    }
    Ok(())
}

fn run_clear(store: &JsonFileStore, config: &AppConfig) -> anyhow::Result<()> {
    store.remove(&config.store.dataset_key)?;
    store.remove(&config.store.prefs_key)?;
    info!("stored dataset and preferences removed");
    println!("Dados removidos.");
    Ok(())
}
