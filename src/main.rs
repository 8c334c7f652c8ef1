//! # Competency Lens CLI (`lens`)
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `lens lenses` | List lenses with their hrefs and standard counts |
//! | `lens show` | Render the catalog at a hash once |
//! | `lens browse` | Navigate the catalog interactively on stdin |
//! | `lens slug <text>` | Print the href slug for a lens name |
//!
//! ## Examples
//!
//! ```bash
//! lens lenses --config ./config/lens.toml
//! lens show --hash '#/technical/4/' --config ./config/lens.toml
//! lens show --json --config ./config/lens.toml | jq '.mastery[0] | length'
//! lens browse -v --config ./config/lens.toml
//! ```

use clap::{Parser, Subcommand};
use competency_lens::{browse, config, ingest};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

/// Competency Lens CLI: browse a CSV catalog of competency standards.
///
/// All catalog commands accept a `--config` flag pointing to a TOML
/// configuration file. See `config/lens.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "lens",
    about = "Competency Lens: browse a CSV catalog of competency standards by lens",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/lens.toml")]
    config: PathBuf,

    /// Verbosity level (-v, -vv, -vvv). Logs go to stderr.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List lenses with their hrefs and standard counts.
    Lenses,

    /// Render the catalog at a location hash once.
    Show {
        /// Location hash, e.g. `#/technical/` or `#/technical/4/`.
        /// Empty selects every standard.
        #[arg(long, default_value = "")]
        hash: String,

        /// Emit the render context as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Navigate the catalog interactively.
    ///
    /// Reads commands from stdin: `lens <name>`, `open <id>`, `close`,
    /// `back`, `forward`, `goto <hash>`, `where`, `quit`.
    Browse {
        /// Hash the session starts at.
        #[arg(long, default_value = "")]
        hash: String,

        /// Emit each frame as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Print the href slug for a lens name.
    Slug {
        /// Lens display name.
        text: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    // Commands that don't require config
    if let Commands::Slug { text } = &cli.command {
        println!("{}", competency_lens_core::slug::slugify(text));
        return Ok(());
    }

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Lenses => {
            ingest::run_lenses(&cfg).await?;
        }
        Commands::Show { hash, json } => {
            browse::run_show(&cfg, &hash, json).await?;
        }
        Commands::Browse { hash, json } => {
            browse::run_browse(&cfg, &hash, json).await?;
        }
        Commands::Slug { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
