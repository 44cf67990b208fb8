//! Packforge — module pack builder CLI.
//!
//! # Usage
//!
//! ```text
//! packforge <spec.json> <output.zip>
//! ```
//!
//! Renders the pack into `module_pack_<slug>/` next to the output zip,
//! archives it, and prints the zip path. Logs go to stderr; set `RUST_LOG`
//! (e.g. `RUST_LOG=info`) for progress output.

mod commands;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;

use commands::build::BuildArgs;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "packforge",
    version,
    about = "Render a module pack spec into a documentation bundle and zip it",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    build: BuildArgs,
}

fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            // Usage errors exit with 1 rather than clap's default 2.
            let _ = e.print();
            std::process::exit(1);
        }
    };
    init_logging();
    cli.build.run()
}
