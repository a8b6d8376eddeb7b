//! Marketplace trade history viewer
//!
//! Loads a marketplace trade export, caches it locally, and prints the
//! transaction list, sales analytics, and frequently sold items.

mod cache;
mod config;
mod constants;
mod display;
mod reports;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use market_core::{
    find_record, item_sale_history, item_type_options, parse_trade_export_str, top_sellers,
    translate_item_type, Action, ItemSort, Language, Session, StringTable, TimeOrder, TypeFilter,
    View,
};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use cache::Cache;
use config::{Config, FileConfig, Overrides};

#[derive(Parser, Debug)]
#[command(name = "market-history")]
#[command(about = "Browse and analyze a marketplace trade history export")]
struct Args {
    /// Data directory for the cache database
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output directory for exported CSV reports
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,

    /// Config file (optional)
    #[arg(long, default_value = constants::CONFIG_FILENAME, global = true)]
    config: PathBuf,

    /// Display language: en, zh
    #[arg(long, global = true)]
    lang: Option<Language>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import an export file and cache it
    Load {
        /// Path to the exported JSON file
        file: PathBuf,
    },

    /// Show the transaction list
    History {
        /// Match item name, tag, or type
        #[arg(short, long, default_value = "")]
        search: String,

        /// Raw item type, or "all"
        #[arg(long = "type")]
        item_type: Option<String>,

        #[arg(long, value_enum, default_value_t = OrderArg::Newest)]
        order: OrderArg,

        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Transactions per page
        #[arg(long)]
        per_page: Option<usize>,
    },

    /// Show one transaction
    Show {
        /// Record ID
        id: String,
    },

    /// List item types present in the data
    Types,

    /// Sales analytics
    Stats {
        #[arg(long, value_enum, default_value_t = SortArg::Count)]
        sort: SortArg,

        /// Only show the first N items
        #[arg(long)]
        top: Option<usize>,
    },

    /// Items sold successfully three or more times
    Limits {
        /// Match item name or type
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Sale history of one item
    Item {
        /// Item ID
        item_id: String,
    },

    /// Write transactions.csv and item_stats.csv
    Export,

    /// Clear the cached export
    Reset,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OrderArg {
    Newest,
    Oldest,
}

impl From<OrderArg> for TimeOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Newest => TimeOrder::Newest,
            OrderArg::Oldest => TimeOrder::Oldest,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SortArg {
    Count,
    Earned,
}

impl From<SortArg> for ItemSort {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Count => ItemSort::Count,
            SortArg::Earned => ItemSort::Earned,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let per_page = match &args.command {
        Some(Command::History { per_page, .. }) => *per_page,
        _ => None,
    };
    let file_config = FileConfig::load_or_default(&args.config)?;
    let config = Config::resolve(
        file_config,
        Overrides {
            language: args.lang,
            page_size: per_page,
            data_dir: args.data_dir,
            output_dir: args.output_dir,
        },
    )?;
    debug!("Resolved config: {:?}", config);

    // Open cache database (in data directory)
    let cache_path = config.data_dir.join(constants::CACHE_FILENAME);
    let cache = Cache::open(&cache_path).await?;

    let mut session = Session::new(StringTable::new(config.language), config.page_size);
    restore_cached(&cache, &mut session).await?;

    match args.command {
        Some(command) => handle_command(command, &config, &cache, &mut session).await,
        None => {
            print_summary(&cache, &session).await?;
            Ok(())
        }
    }
}

/// Reload the cached export into the session, discarding it if it no longer parses
async fn restore_cached(cache: &Cache, session: &mut Session) -> Result<()> {
    let Some(raw) = cache.load_market_data().await? else {
        debug!("No cached export");
        return Ok(());
    };

    match parse_trade_export_str(&raw) {
        Ok(records) => {
            info!("Restored {} cached records", records.len());
            session.apply(Action::Loaded(records));
        }
        Err(e) => {
            warn!("Discarding cached export: {}", e);
            cache.clear_market_data().await?;
        }
    }
    Ok(())
}

/// Validate raw export bytes, cache them, and swap them into the session.
/// Non-UTF-8 text, invalid JSON and exports without records all fail with the
/// same invalid-file message and leave the cache untouched.
async fn import_export(cache: &Cache, session: &mut Session, bytes: Vec<u8>) -> Result<usize> {
    let parsed = String::from_utf8(bytes)
        .map_err(anyhow::Error::from)
        .and_then(|raw| Ok((parse_trade_export_str(&raw)?, raw)));

    let (records, raw) = match parsed {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Rejected export: {}", e);
            anyhow::bail!("{}", session.strings().get("error_invalid"));
        }
    };

    cache.store_market_data(&raw).await?;
    let count = records.len();
    session.apply(Action::Loaded(records));
    Ok(count)
}

async fn handle_command(
    command: Command,
    config: &Config,
    cache: &Cache,
    session: &mut Session,
) -> Result<()> {
    match command {
        Command::Load { file } => {
            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;

            let count = import_export(cache, session, bytes).await?;
            let t = session.strings();
            println!("{} {} {}", t.get("load_ok"), count, t.get("records"));
            Ok(())
        }

        Command::Reset => {
            cache.clear_market_data().await?;
            session.apply(Action::Reset);
            println!("{}", session.strings().get("reset_ok"));
            Ok(())
        }

        command => {
            if !session.has_data() {
                println!("{}", session.strings().get("load_hint"));
                return Ok(());
            }
            show_view(command, config, session)
        }
    }
}

/// Commands that only read the loaded records
fn show_view(command: Command, config: &Config, session: &mut Session) -> Result<()> {
    match command {
        Command::History {
            search,
            item_type,
            order,
            page,
            ..
        } => {
            session.apply(Action::SelectView(View::History));
            session.apply(Action::SetSearch(search));
            session.apply(Action::SetTypeFilter(TypeFilter::from_arg(item_type.as_deref())));
            session.apply(Action::SetOrder(order.into()));
            session.apply(Action::GoToPage(page));

            let t = session.strings();
            let order = session.history_params().order;
            println!("{} ({})\n", t.get("hist_title"), t.get(order.label_key()));
            println!("{}", display::render_history(&session.history_page(), t));
        }

        Command::Show { id } => {
            let t = session.strings();
            let record = find_record(session.records(), &id)
                .with_context(|| format!("No transaction with ID {}", id))?;
            println!("{}", display::render_transaction(record, t));
        }

        Command::Types => {
            let t = session.strings();
            println!("all    {}", t.get("all_types"));
            for item_type in item_type_options(session.records()) {
                println!("{}    {}", item_type, translate_item_type(&item_type, t));
            }
        }

        Command::Stats { sort, top } => {
            session.apply(Action::SelectView(View::Stats));
            session.apply(Action::SetItemSort(sort.into()));

            let t = session.strings();
            let aggregates = session.item_aggregates();
            println!("{}\n", t.get("stats_title"));
            println!("{}\n", display::render_totals(&session.totals(), t));
            println!("{}", t.get("top_5"));
            println!(
                "{}\n",
                display::render_items(&top_sellers(&aggregates, constants::TOP_SELLERS), t)
            );

            let mut items = session.item_stats();
            if let Some(n) = top {
                items.truncate(n);
            }
            println!("{} ({})", t.get("item_perf"), t.get(session.item_sort().label_key()));
            println!("{}", display::render_items(&items, t));
        }

        Command::Limits { search } => {
            session.apply(Action::SelectView(View::Limits));
            session.apply(Action::SetLimitsSearch(search));

            let t = session.strings();
            println!("{}", t.get("limits_title"));
            println!("{}\n", t.get("limits_subtitle"));
            println!("{}", display::render_items(&session.limit_items(), t));
        }

        Command::Item { item_id } => {
            let t = session.strings();
            let history = item_sale_history(session.records(), &item_id);
            let name = session
                .item_aggregates()
                .get(&item_id)
                .map(|item| item.name.clone())
                .unwrap_or_else(|| item_id.clone());
            println!("{}: {}\n", t.get("history_popup_title"), name);
            println!("{}", display::render_sale_history(&history, t));
        }

        Command::Export => {
            let records: Vec<_> = session.records().iter().collect();
            let written = reports::generate_all_reports(
                &config.output_dir,
                &records,
                &session.item_stats(),
            )?;
            for path in written {
                println!("Generated: {}", path.display());
            }
        }

        Command::Load { .. } | Command::Reset => {}
    }
    Ok(())
}

/// Overview printed when no subcommand is given
async fn print_summary(cache: &Cache, session: &Session) -> Result<()> {
    let t = session.strings();
    if !session.has_data() {
        println!("{}", t.get("load_hint"));
        return Ok(());
    }

    let totals = session.totals();
    println!("{} {}", session.records().len(), t.get("records"));
    if let Some(loaded_at) = cache.loaded_at().await? {
        println!("{}: {}", t.get("load_ok"), display::format_date(&loaded_at));
    }
    println!();
    println!("{}", display::render_totals(&totals, t));
    Ok(())
}
