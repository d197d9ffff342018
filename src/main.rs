mod commands;
mod core;
mod release;
mod reviews;
mod stores;
mod ui;

use clap::{Parser, Subcommand};
use crate::core::context::DeckContext;
use crate::core::error::{DeckError, DeckResult, error_json, print_error};
use crate::release::model::Store;
use std::path::PathBuf;

/// Unified release dashboard for Google Play and App Store Connect
#[derive(Parser)]
#[command(name = "shipdeck")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Path to shipdeck.toml (default: search the working directory)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// Serve both stores from a fixture directory instead of the live APIs
  #[arg(long, global = true)]
  fixtures: Option<PathBuf>,

  /// Output in JSON format
  #[arg(long, global = true)]
  json: bool,

  /// Enable debug logging (overrides SHIPDECK_LOG)
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  // ============================================================================
  // Setup & Inspection
  // ============================================================================
  /// Write a starter shipdeck.toml in the working directory
  Init {
    /// Overwrite an existing configuration
    #[arg(long)]
    force: bool,
  },

  /// List configured app groups
  Groups,

  /// List App Store Connect apps, or check Google Play packages are reachable
  Apps {
    /// Store to query
    #[arg(long, value_enum)]
    store: Store,
    /// Google Play package to check (default: every configured package)
    #[arg(long)]
    package: Option<String>,
  },

  /// Latest releases for every group and store
  Status,

  // ============================================================================
  // Releases
  // ============================================================================
  /// Show a group's releases
  Releases {
    /// App group id
    group: String,
    /// Only this store
    #[arg(long, value_enum)]
    store: Option<Store>,
    /// Show the full history instead of the latest per track/platform
    #[arg(long)]
    all: bool,
  },

  /// Show where each Google Play release can be promoted
  Targets {
    /// App group id
    group: String,
    /// Only releases on this track
    #[arg(long)]
    track: Option<String>,
  },

  /// Promote a Google Play release to a higher track
  Promote {
    /// App group id
    group: String,
    /// Source track (internal, alpha, beta)
    #[arg(long)]
    from: String,
    /// Destination track (alpha, beta, production)
    #[arg(long)]
    to: String,
    /// Percentage of users receiving the release (1-100, default 100)
    #[arg(long)]
    rollout: Option<u32>,
    /// Validate and print the plan without touching the store
    #[arg(long)]
    dry_run: bool,
  },

  /// Compare two dotted versions
  Compare {
    a: String,
    b: String,
    /// Build number of A, used when versions are equal
    #[arg(long)]
    code_a: Option<String>,
    /// Build number of B, used when versions are equal
    #[arg(long)]
    code_b: Option<String>,
  },

  // ============================================================================
  // Reviews
  // ============================================================================
  /// Show a group's newest reviews
  Reviews {
    /// App group id
    group: String,
    /// Only this store
    #[arg(long, value_enum)]
    store: Option<Store>,
    /// Maximum number of reviews
    #[arg(long, default_value_t = reviews::DEFAULT_REVIEW_LIMIT)]
    limit: usize,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

/// Log to stderr; SHIPDECK_LOG sets the filter (default warn), -v forces debug
fn init_logging(verbose: bool) {
  let filter = if verbose {
    tracing_subscriber::EnvFilter::new("shipdeck=debug")
  } else {
    tracing_subscriber::EnvFilter::try_from_env("SHIPDECK_LOG").unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
  };

  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init();
}

fn main() {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let root = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => handle_error(DeckError::from(e).context("Failed to get current directory"), cli.json),
  };

  if let Err(err) = run(cli.command, &root, cli.config, cli.fixtures, cli.json) {
    handle_error(err, cli.json);
  }
}

fn run(
  command: Commands,
  root: &std::path::Path,
  config: Option<PathBuf>,
  fixtures: Option<PathBuf>,
  json: bool,
) -> DeckResult<()> {
  // Commands that need no configuration
  match &command {
    Commands::Init { force } => return commands::run_init(root, *force),
    Commands::Compare { a, b, code_a, code_b } => {
      return commands::run_compare(a, b, code_a.as_deref(), code_b.as_deref(), json);
    }
    _ => {}
  }

  // Build context once (config + store clients)
  let ctx = DeckContext::build(root, config.as_deref(), fixtures.as_deref())?;

  match command {
    Commands::Groups => commands::run_groups(&ctx, json),
    Commands::Apps { store, package } => commands::run_apps(&ctx, store, package.as_deref(), json),
    Commands::Status => commands::run_status(&ctx, json),
    Commands::Releases { group, store, all } => commands::run_releases(&ctx, &group, store, all, json),
    Commands::Targets { group, track } => commands::run_targets(&ctx, &group, track.as_deref(), json),
    Commands::Promote {
      group,
      from,
      to,
      rollout,
      dry_run,
    } => commands::run_promote(&ctx, &group, &from, &to, rollout, dry_run, json),
    Commands::Reviews { group, store, limit } => commands::run_reviews(&ctx, &group, store, limit, json),
    Commands::Init { .. } | Commands::Compare { .. } => Ok(()),
  }
}

fn handle_error(err: DeckError, json: bool) -> ! {
  if json {
    println!("{}", error_json(&err));
  } else {
    print_error(&err);
  }
  std::process::exit(err.exit_code().as_i32());
}
