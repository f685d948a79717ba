//! # Fluir Dashboard Library
//!
//! Application layer of the sales dashboard: state, commands and the
//! console front end that drives them.
//!
//! ## Module Organization
//! ```text
//! fluir_dashboard/
//! ├── lib.rs          ◄─── You are here (startup & input loop)
//! ├── console.rs      ◄─── Line parser and text rendering
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── dashboard.rs◄─── Ledger + goal targets
//! │   ├── advisor.rs  ◄─── Insight service + pending request
//! │   └── config.rs   ◄─── Business and display configuration
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── sale.rs     ◄─── Record / list sales
//! │   ├── metrics.rs  ◄─── Derived KPIs and dashboard view
//! │   ├── goal.rs     ◄─── Goal simulator, targets, reset
//! │   └── advisor.rs  ◄─── Advisor requests
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  init_tracing()                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DashboardConfig::load_or_default ──► default targets, timezone         │
//! │  AdvisorConfig::load_or_default   ──► API key, model, timeout           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DashboardState + AdvisorState ──► Console ──► stdin line loop          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod console;
pub mod error;
pub mod state;

use fluir_advisor::AdvisorConfig;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use console::{Console, ConsoleOutput};
use state::{AdvisorState, DashboardConfig, DashboardState};

/// Loads configuration and runs the console until `quit` or end of input.
pub async fn run() {
    init_tracing();
    info!("Starting Fluir dashboard...");

    let config = DashboardConfig::load_or_default(None);
    let advisor_config = AdvisorConfig::load_or_default(None);

    // load_or_default validated the targets; this only trips on a bad default
    let default_targets = config.default_targets().unwrap_or_else(|e| {
        error!("Invalid default targets: {}. Using built-in targets.", e);
        Default::default()
    });

    let dashboard = DashboardState::new(default_targets);
    let advisor = AdvisorState::from_config(&advisor_config, config.prompt_context());
    info!(
        business = %config.business_name,
        advisor_configured = advisor.service().is_configured(),
        "Dashboard ready"
    );

    let console = Console::new(dashboard, advisor, config);
    if let Err(e) = run_console(&console).await {
        error!("Console I/O failed: {}", e);
    }

    info!("Fluir dashboard stopped");
}

async fn run_console(console: &Console) -> std::io::Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout
        .write_all(b"Fluir dashboard. Type 'help' for commands.\n> ")
        .await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        match console.handle_line(&line).await {
            Some(ConsoleOutput::Quit) => break,
            Some(ConsoleOutput::Text(text)) => {
                stdout.write_all(text.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
            }
            None => {}
        }
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
    }

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so they never interleave with console output.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=fluir=trace` - Show trace for fluir crates only
/// - Default: INFO, DEBUG for fluir crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,fluir=debug"));

    // try_init: a second call (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
