//! Knowledge-Index main entry point
//!
//! Command-line front end: crawls the configured documentation sections,
//! keeps them fresh on a schedule, and answers queries typed on stdin.

use clap::Parser;
use knowledge_index::config::{load_config_with_hash, Config};
use knowledge_index::crawler::{build_crawler, CrawlScheduler, ScheduleSettings};
use knowledge_index::output::{print_context, print_hits, print_pass_report, print_status};
use knowledge_index::search::SearchIndex;
use knowledge_index::store::DocumentStore;
use knowledge_index::IndexError;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

/// Knowledge-Index: an in-memory documentation index
///
/// Knowledge-Index crawls a fixed set of documentation sections to a
/// shallow depth, re-crawls them on a schedule, and serves substring
/// lookups used as context for a completion request.
#[derive(Parser, Debug)]
#[command(name = "knowledge-index")]
#[command(version)]
#[command(about = "An in-memory documentation index", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with = "once")]
    dry_run: bool,

    /// Run a single crawl pass, print the report, and exit
    #[arg(long, conflicts_with = "dry_run")]
    once: bool,

    /// Query to answer once the index is populated
    #[arg(long, value_name = "Q")]
    query: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(IndexError::from(e).into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.once {
        handle_once(&config, cli.query.as_deref()).await?;
    } else {
        handle_serve(config, cli.query).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("knowledge_index=info,warn"),
            1 => EnvFilter::new("knowledge_index=debug,info"),
            2 => EnvFilter::new("knowledge_index=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Knowledge-Index Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Pacing delay: {}ms", config.crawler.pacing_delay_ms);
    println!("  Fetch timeout: {}s", config.crawler.fetch_timeout_secs);
    println!("  Re-crawl interval: {}h", config.crawler.recrawl_interval_hours);
    println!("  Crawl on start: {}", config.crawler.crawl_on_start);

    println!("\nUser Agent: {}", config.user_agent.header_value());
    println!("Domain prefix: {}", config.site.domain_prefix);

    println!("\nSearch:");
    println!("  Context limit: {}", config.search.context_limit);
    println!("  Result limit: {}", config.search.result_limit);

    println!("\nSections ({}):", config.sections.len());
    for section in &config.sections {
        println!("  - {}: {}", section.name, section.url);
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would start crawling with {} seed URLs",
        config.sections.len()
    );
}

/// Handles the --once mode: one pass, report, optional query
async fn handle_once(config: &Config, query: Option<&str>) -> Result<(), IndexError> {
    let store = Arc::new(DocumentStore::new());
    let crawler = build_crawler(config, Arc::clone(&store))?;

    let report = match crawler.crawl(&config.sections).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e);
        }
    };
    print_pass_report(&report);

    if let Some(query) = query {
        println!();
        let index = SearchIndex::with_limits(store, config.search.clone());
        answer(&index, query)?;
    }
    Ok(())
}

/// Default mode: scheduled re-crawls plus an interactive query loop
async fn handle_serve(config: Config, query: Option<String>) -> Result<(), IndexError> {
    let store = Arc::new(DocumentStore::new());
    let crawler = Arc::new(build_crawler(&config, Arc::clone(&store))?);
    let index = SearchIndex::with_limits(store, config.search.clone());

    let mut settings = ScheduleSettings::from_config(&config);

    if let Some(query) = query {
        // Fill the index before answering; the timer then starts one interval out
        if settings.run_immediately {
            settings.run_immediately = false;
            match crawler
                .crawl_until(&config.sections, tokio::signal::ctrl_c())
                .await
            {
                Some(Ok(report)) => print_pass_report(&report),
                Some(Err(e)) => tracing::error!("Initial crawl failed: {}", e),
                None => return Ok(()),
            }
            println!();
        }
        answer(&index, &query)?;
    }

    let scheduler = CrawlScheduler::start(crawler, config.sections.clone(), settings);

    println!("Type a query, :crawl, :status or :quit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, shutting down");
                break;
            }
            line = lines.next_line() => line?,
        };

        // EOF on stdin
        let Some(line) = line else { break };
        let line = line.trim();

        match line {
            "" => continue,
            ":quit" | ":q" => break,
            ":status" => print_status(&scheduler.crawler().status()),
            ":crawl" => match scheduler.trigger_until(tokio::signal::ctrl_c()).await {
                Some(Ok(report)) => print_pass_report(&report),
                Some(Err(e)) => {
                    println!("Crawl failed: {}", e);
                    println!(
                        "Index still holds {} documents",
                        scheduler.crawler().status().document_count
                    );
                }
                None => {
                    tracing::info!("Interrupted, shutting down");
                    break;
                }
            },
            query => {
                if let Err(e) = answer(&index, query) {
                    tracing::error!("Search failed: {}", e);
                }
            }
        }
    }

    scheduler.shutdown().await;
    Ok(())
}

fn answer(index: &SearchIndex, query: &str) -> Result<(), IndexError> {
    let hits = index.search_default(query)?;
    print_hits(query, &hits);
    print_context(&index.context_for(query)?);
    Ok(())
}
