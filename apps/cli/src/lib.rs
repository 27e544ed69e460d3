//! # stockcart CLI Library
//!
//! Core library for the `stockcart` binary: a terminal storefront cart
//! backed by the inventory API and a local SQLite file.
//!
//! ## Module Organization
//! ```text
//! stockcart_cli_lib/
//! ├── lib.rs          ◄─── You are here (argument parsing, startup, run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── CartStore
//! │   ├── ports.rs    ◄─── InventoryClient / Notifier / CartStorage
//! │   ├── notify.rs   ◄─── CartNotice, console and recording notifiers
//! │   ├── storage.rs  ◄─── MemoryStorage
//! │   └── config.rs   ◄─── AppConfig
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   └── cart.rs     ◄─── show / add / remove / update / clear
//! └── error.rs        ◄─── AppError and exit codes
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use commands::{render_table, CartCommand};
use error::{AppResult, EXIT_NOTICE};
use state::{AppConfig, CartStore, ConsoleNotifier};
use stockcart_client::InventoryApi;
use stockcart_db::{Database, DbConfig};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "stockcart", version, about = "Shopping cart with live stock limits")]
pub struct Cli {
    /// Config file (default: platform config dir, stockcart.toml)
    #[arg(long, global = true, env = "STOCKCART_CONFIG")]
    pub config: Option<PathBuf>,

    /// Inventory API base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// SQLite file holding the saved cart
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Print the cart as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

/// Runs the CLI.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Parse arguments, initialize logging                                │
/// │                                                                         │
/// │  2. Load configuration ───────────────────────────────────────────────► │
/// │     • defaults → TOML → environment → flags, then validate             │
/// │                                                                         │
/// │  3. Connect to Database ──────────────────────────────────────────────► │
/// │     • create the data directory, SQLite with WAL, run migrations       │
/// │                                                                         │
/// │  4. Build the CartStore ──────────────────────────────────────────────► │
/// │     • InventoryApi + ConsoleNotifier + LocalStorageRepository          │
/// │     • reads the saved cart                                             │
/// │                                                                         │
/// │  5. Execute one command, print the cart                                │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("stockcart: failed to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(execute(cli)) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("stockcart: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn execute(cli: Cli) -> AppResult<ExitCode> {
    let config = resolve_config(&cli)?;

    let db_path = config.database_path()?;
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let db = Database::new(DbConfig::new(db_path)).await?;

    let inventory = InventoryApi::new(config.inventory_api())?;
    let notifier = Arc::new(ConsoleNotifier::new());

    let store = CartStore::load_with_key(
        inventory,
        notifier.clone(),
        db.storage(),
        config.storage.key.clone(),
    )
    .await;

    let command = cli.command.unwrap_or(CartCommand::Show);
    let response = commands::execute(&store, &command).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", render_table(&response));
    }

    db.close().await;

    if notifier.fired() > 0 {
        debug!(notices = notifier.fired(), "Command finished with notices");
        return Ok(ExitCode::from(EXIT_NOTICE));
    }
    Ok(ExitCode::SUCCESS)
}

/// Loads the configuration, layers the flags on top and validates.
fn resolve_config(cli: &Cli) -> AppResult<AppConfig> {
    let mut config = AppConfig::load(cli.config.clone())?;
    apply_flags(cli, &mut config);
    config.validate()?;
    Ok(config)
}

/// Command-line flags win over every other source.
fn apply_flags(cli: &Cli, config: &mut AppConfig) {
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(db) = &cli.db {
        config.storage.database_path = Some(db.clone());
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG` wins when set
/// - Otherwise `warn`, raised by `-v` (info) and `-vv` (debug) for the
///   stockcart crates
///
/// Logs go to stderr so `--json` output stays clean.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "warn,stockcart=info",
        _ => "warn,stockcart=debug,sqlx=warn",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
