use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use tracing::info;

use service_utils::config::Config;
use service_utils::{logging, server, unique_of, StringUtils};

#[derive(Parser)]
#[command(name = "service_utils")]
#[command(about = "Web service helpers: default HTTP server and text cleaning")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the default routes (`/` and `/favicon.ico`)
    Serve {
        /// Path to a TOML config file
        #[arg(long)]
        config: Option<String>,
        /// Port to listen on, overrides config and PORT
        #[arg(long)]
        port: Option<u16>,
    },
    /// Strip invisible characters and collapse whitespace on each stdin line
    Clean {
        /// Remove whitespace entirely instead of collapsing it
        #[arg(long)]
        all: bool,
    },
    /// Print stdin lines once each, in first-seen order
    Unique,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, port } => {
            let mut config = match config {
                Some(path) => {
                    Config::load_from(&path).with_context(|| format!("loading config from {}", path))?
                }
                None => Config::load()?,
            };
            if let Some(port) = port {
                config.server.port = port;
            }

            let _guard = logging::init_logging(&config.logging)?;
            info!(port = config.server.port, "starting server");

            server::start_server(&config.server, server::new_router()).await?;
        }
        Commands::Clean { all } => clean_lines(io::stdin().lock(), io::stdout().lock(), all)?,
        Commands::Unique => unique_lines(io::stdin().lock(), io::stdout().lock())?,
    }
    Ok(())
}

/// Clean each input line: collapse whitespace, or drop it entirely with `all`
fn clean_lines(input: impl BufRead, mut output: impl Write, all: bool) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let cleaned = if all {
            StringUtils::remove_all_spaces(&line)
        } else {
            StringUtils::remove_duplicate_spaces(&line)
        };
        writeln!(output, "{}", cleaned)?;
    }
    output.flush()
}

fn unique_lines(input: impl BufRead, mut output: impl Write) -> io::Result<()> {
    let lines = input.lines().collect::<io::Result<Vec<String>>>()?;
    for line in unique_of(&lines) {
        writeln!(output, "{}", line)?;
    }
    output.flush()
}
