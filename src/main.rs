use anyhow::Context;
use billboard::prelude::*;
use billboard::{jurisdiction_options, load_collection, FileConfig, Statistics};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "billboard.yml";

/// Filter, sort and render legislative bill feeds
#[derive(Parser, Debug)]
#[command(name = "billboard")]
#[command(about = "Filter, sort and render legislative bill feeds as card pages")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(ClapArgs, Debug)]
struct FeedArgs {
    /// Feed URL or file path (default: BILLBOARD_FEED env var, then config file, then bills.json)
    #[arg(long)]
    feed: Option<String>,

    /// YAML config file (default: ./billboard.yml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
struct FilterArgs {
    /// Free-text search over title, description, bill number and jurisdiction
    #[arg(long)]
    search: Option<String>,

    /// "all", "US" for federal bills, or an exact jurisdiction name
    #[arg(long)]
    jurisdiction: Option<String>,

    /// "all" or a status substring (introduced, committee, passed, enacted, ...)
    #[arg(long)]
    status: Option<String>,

    /// Sort order
    #[arg(long, value_parser = ["recent", "oldest", "state", "alphabetical"])]
    sort: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the bill board as a static HTML page
    Render {
        #[command(flatten)]
        feed: FeedArgs,

        #[command(flatten)]
        filters: FilterArgs,

        /// Write the page here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Page title
        #[arg(long)]
        title: Option<String>,
    },

    /// Print the filtered, sorted bills as JSON Lines
    List {
        #[command(flatten)]
        feed: FeedArgs,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Print summary statistics for the whole feed as JSON
    Stats {
        #[command(flatten)]
        feed: FeedArgs,
    },

    /// Print the jurisdictions available to the jurisdiction filter
    Jurisdictions {
        #[command(flatten)]
        feed: FeedArgs,
    },
}

fn print_available_commands() {
    println!("Available commands:");
    println!("  render         Render the bill board as a static HTML page");
    println!("  list           Print the filtered, sorted bills as JSON Lines");
    println!("  stats          Print summary statistics for the whole feed as JSON");
    println!("  jurisdictions  Print the jurisdictions available to the jurisdiction filter");
}

fn load_file_config(path: Option<&Path>) -> anyhow::Result<FileConfig> {
    match path {
        Some(path) => FileConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            FileConfig::load(Path::new(DEFAULT_CONFIG_FILE))
                .with_context(|| format!("Failed to load config: {}", DEFAULT_CONFIG_FILE))
        }
        None => Ok(FileConfig::default()),
    }
}

/// Flags win over BILLBOARD_FEED, which wins over the config file
fn build_config(
    feed: &FeedArgs,
    filters: Option<&FilterArgs>,
    title: Option<&str>,
    output: Option<&Path>,
) -> anyhow::Result<Config> {
    let file = load_file_config(feed.config.as_deref())?;
    let mut builder = ConfigBuilder::new().file_config(&file);

    if let Some(feed) = &feed.feed {
        builder = builder.feed_str(feed);
    } else if let Ok(feed) = std::env::var("BILLBOARD_FEED") {
        builder = builder.feed_str(&feed);
    }

    if let Some(filters) = filters {
        if let Some(search) = &filters.search {
            builder = builder.search(search.clone());
        }
        if let Some(jurisdiction) = &filters.jurisdiction {
            builder = builder.jurisdiction_str(jurisdiction);
        }
        if let Some(status) = &filters.status {
            builder = builder.status_str(status);
        }
        if let Some(sort) = &filters.sort {
            builder = builder.sort_str(sort);
        }
    }

    if let Some(title) = title {
        builder = builder.title(title);
    }
    if let Some(output) = output {
        builder = builder.output(output);
    }

    Ok(builder.build()?)
}

async fn run_render_command(cmd: Command) -> anyhow::Result<()> {
    let Command::Render {
        feed,
        filters,
        output,
        title,
    } = cmd
    else {
        unreachable!()
    };

    let config = build_config(&feed, Some(&filters), title.as_deref(), output.as_deref())?;
    log::debug!("Rendering board from {}", config.feed.location());

    let mut board =
        BillBoard::with_criteria(HtmlSurface::new(config.title.clone()), config.criteria.clone());
    // The page is written either way; a failed load renders its error message.
    let loaded = board.load(&config.feed).await;
    let html = board.render_page();

    match &config.output {
        Some(path) => std::fs::write(path, html)
            .with_context(|| format!("Failed to write page: {}", path.display()))?,
        None => print!("{}", html),
    }

    loaded.context("Bill feed could not be loaded")?;
    Ok(())
}

async fn run_list_command(cmd: Command) -> anyhow::Result<()> {
    let Command::List { feed, filters } = cmd else {
        unreachable!()
    };

    let config = build_config(&feed, Some(&filters), None, None)?;
    let mut board =
        BillBoard::with_criteria(HtmlSurface::new(config.title.clone()), config.criteria.clone());
    board
        .load(&config.feed)
        .await
        .context("Bill feed could not be loaded")?;

    for bill in board.view() {
        println!("{}", serde_json::to_string(bill)?);
    }

    Ok(())
}

async fn run_stats_command(cmd: Command) -> anyhow::Result<()> {
    let Command::Stats { feed } = cmd else {
        unreachable!()
    };

    let config = build_config(&feed, None, None, None)?;
    let collection = load_collection(&config.feed)
        .await
        .context("Bill feed could not be loaded")?;

    println!(
        "{}",
        serde_json::to_string_pretty(&Statistics::compute(&collection))?
    );
    Ok(())
}

async fn run_jurisdictions_command(cmd: Command) -> anyhow::Result<()> {
    let Command::Jurisdictions { feed } = cmd else {
        unreachable!()
    };

    let config = build_config(&feed, None, None, None)?;
    let collection = load_collection(&config.feed)
        .await
        .context("Bill feed could not be loaded")?;

    for name in jurisdiction_options(&collection) {
        println!("{}", name);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    match args.command {
        Some(cmd @ Command::Render { .. }) => run_render_command(cmd).await,
        Some(cmd @ Command::List { .. }) => run_list_command(cmd).await,
        Some(cmd @ Command::Stats { .. }) => run_stats_command(cmd).await,
        Some(cmd @ Command::Jurisdictions { .. }) => run_jurisdictions_command(cmd).await,
        None => {
            print_available_commands();
            Ok(())
        }
    }
}
