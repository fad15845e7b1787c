use anyhow::Context;
use bill_tracker::config::{self, FEED_FILE, PAGE_FILE};
use bill_tracker::feed::bills_to_rss;
use bill_tracker::logging::init_tracing;
use bill_tracker::page::render_page;
use bill_tracker::prelude::*;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

/// Browse a static bills document: filter, sort and render legislation
#[derive(Parser, Debug)]
#[command(name = "bill-tracker")]
#[command(about = "Filter, sort and render bills from a static bills document")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render index.html (and feed.xml) into the output directory
    Render {
        #[command(flatten)]
        common: CommonArgs,

        /// Directory to write the page and feed into (default: public)
        #[arg(long = "out")]
        output_dir: Option<PathBuf>,

        /// Page title
        #[arg(long)]
        title: Option<String>,

        /// Public URL of the page, used as the feed link
        #[arg(long = "site-url")]
        site_url: Option<String>,

        /// Do not write feed.xml
        #[arg(long = "no-feed")]
        no_feed: bool,
    },

    /// Print the visible bills as JSON, one per line
    List {
        #[command(flatten)]
        common: CommonArgs,

        /// Limit number of results
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print collection statistics as JSON
    Stats {
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(ClapArgs, Debug)]
struct CommonArgs {
    /// Bills document: file path or http(s) URL (default: bills.json)
    #[arg(long)]
    source: Option<String>,

    /// Config file (default: BILL_TRACKER_CONFIG env var, then ./tracker.yml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Case-insensitive search over title, description, bill number and state
    #[arg(long)]
    search: Option<String>,

    /// Status filter: all, introduced, committee, passed, enacted, or any status text
    #[arg(long)]
    status: Option<String>,

    /// Jurisdiction filter: all, US, or a state name
    #[arg(long)]
    jurisdiction: Option<String>,

    /// Sort order
    #[arg(long, value_parser = ["recent", "oldest", "state", "alphabetical"])]
    sort: Option<String>,

    /// Jurisdiction coverage of the bills document
    #[arg(long, value_parser = ["single", "multi"])]
    coverage: Option<String>,

    /// Log level when RUST_LOG is not set (e.g. info, debug)
    #[arg(long = "log-level")]
    log_level: Option<String>,
}

fn print_available_commands() {
    println!("Available commands:");
    println!("  render  Render index.html (and feed.xml) into the output directory");
    println!("  list    Print the visible bills as JSON, one per line");
    println!("  stats   Print collection statistics as JSON");
}

/// Config file first, then command-line flags on top
fn build_builder(common: &CommonArgs) -> anyhow::Result<ConfigBuilder> {
    let mut builder = ConfigBuilder::new();

    if let Some(path) = config::resolve_config_path(common.config.clone()) {
        let file = config::load_config_file(&path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;
        builder = builder.file(file);
    }

    if let Some(source) = &common.source {
        builder = builder.source_str(source);
    }
    if let Some(search) = &common.search {
        builder = builder.search(search.clone());
    }
    if let Some(status) = &common.status {
        builder = builder.status(status);
    }
    if let Some(jurisdiction) = &common.jurisdiction {
        builder = builder.jurisdiction(jurisdiction);
    }
    if let Some(sort) = &common.sort {
        builder = builder.sort_order_str(sort)?;
    }
    if let Some(coverage) = &common.coverage {
        builder = builder.coverage_str(coverage)?;
    }
    if let Some(level) = &common.log_level {
        builder = builder.log_level(level.clone());
    }

    Ok(builder)
}

fn tracker_for(config: &Config) -> Tracker<PageSurface> {
    init_tracing(&config.log_level);
    Tracker::new(config.coverage, PageSurface::new()).with_query(config.query.clone())
}

async fn run_render_command(cmd: Command) -> anyhow::Result<()> {
    let Command::Render {
        common,
        output_dir,
        title,
        site_url,
        no_feed,
    } = cmd
    else {
        unreachable!()
    };

    let mut builder = build_builder(&common)?;
    if let Some(dir) = output_dir {
        builder = builder.output_dir(dir);
    }
    if let Some(title) = title {
        builder = builder.title(title);
    }
    if let Some(url) = site_url {
        builder = builder.site_url(url);
    }
    if no_feed {
        builder = builder.feed(false);
    }
    let config = builder.build()?;

    let mut tracker = tracker_for(&config);
    let loaded = tracker.load(&config.source).await;

    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            config.output_dir.display()
        )
    })?;

    // The page is written either way: on failure it carries the error message
    let page_path = config.output_dir.join(PAGE_FILE);
    let page = render_page(tracker.surface(), tracker.query(), &config.page_options());
    std::fs::write(&page_path, page)
        .with_context(|| format!("Failed to write {}", page_path.display()))?;
    info!(path = %page_path.display(), visible = tracker.visible().len(), "wrote page");

    loaded.with_context(|| format!("Failed to load bills from {}", config.source))?;

    if config.feed {
        let feed_path = config.output_dir.join(FEED_FILE);
        let channel = config.feed_channel(&tracker.store().collection().last_updated);
        let feed = bills_to_rss(&tracker.visible(), &channel);
        std::fs::write(&feed_path, feed)
            .with_context(|| format!("Failed to write {}", feed_path.display()))?;
        info!(path = %feed_path.display(), "wrote feed");
    }

    Ok(())
}

async fn run_list_command(cmd: Command) -> anyhow::Result<()> {
    let Command::List { common, limit } = cmd else {
        unreachable!()
    };

    let config = build_builder(&common)?.build()?;
    let mut tracker = tracker_for(&config);
    tracker
        .load(&config.source)
        .await
        .with_context(|| format!("Failed to load bills from {}", config.source))?;

    let visible = tracker.visible();
    let limit = limit.unwrap_or(visible.len());

    // Write JSON to stdout (one per line)
    for bill in visible.into_iter().take(limit) {
        let json = serde_json::to_string(bill)?;
        println!("{}", json);
    }

    Ok(())
}

async fn run_stats_command(cmd: Command) -> anyhow::Result<()> {
    let Command::Stats { common } = cmd else {
        unreachable!()
    };

    let config = build_builder(&common)?.build()?;
    let mut tracker = tracker_for(&config);
    tracker
        .load(&config.source)
        .await
        .with_context(|| format!("Failed to load bills from {}", config.source))?;

    println!(
        "{}",
        serde_json::to_string_pretty(tracker.store().statistics())?
    );
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.command {
        Some(cmd @ Command::Render { .. }) => run_render_command(cmd).await,
        Some(cmd @ Command::List { .. }) => run_list_command(cmd).await,
        Some(cmd @ Command::Stats { .. }) => run_stats_command(cmd).await,
        None => {
            print_available_commands();
            Ok(())
        }
    }
}
