use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use lcstats::report::{self, FAILURE_NOTICE};
use lcstats::svg::{self, Theme};
use lcstats::{Config, LeetCodeClient, Username, logger};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Show a LeetCode user's solved problems and global rank.
#[derive(Parser, Debug)]
#[command(name = "lcstats", version)]
struct Cli {
    /// LeetCode username (surrounding whitespace is ignored)
    username: String,

    /// Also print the stats as pretty JSON
    #[arg(long)]
    raw: bool,

    /// Write dark_mode.svg and light_mode.svg stat cards into this directory
    #[arg(long, value_name = "DIR")]
    svg: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// GraphQL endpoint to query instead of leetcode.com
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let Some(username) = Username::parse(&cli.username) else {
        eprintln!("error: username must not be empty");
        return Ok(ExitCode::from(2));
    };

    let mut config = Config::from_env()?;
    if let Some(secs) = cli.timeout {
        config
            .set_timeout_secs(secs)
            .context("Invalid --timeout")?;
    }
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }

    let client = LeetCodeClient::new(config)?;

    info!(%username, "fetching LeetCode stats");
    let Ok(stats) = client.fetch(&username).await else {
        eprintln!("{FAILURE_NOTICE}");
        return Ok(ExitCode::FAILURE);
    };

    print!("{}", report::render(&stats));

    if cli.raw {
        let json = serde_json::to_string_pretty(&stats).context("Failed to serialize stats")?;
        println!();
        println!("{json}");
    }

    if let Some(dir) = cli.svg {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        let today = Utc::now().date_naive();
        for theme in [Theme::Dark, Theme::Light] {
            let path = dir.join(theme.file_name());
            fs::write(&path, svg::generate_svg(&stats, today, theme))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote stat card");
        }
    }

    Ok(ExitCode::SUCCESS)
}
