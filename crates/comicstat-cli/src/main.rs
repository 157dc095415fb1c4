//! comicstat — entry point.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use serde_json::json;

use comicstat::sample::{build_sample, SamplePlan};
use comicstat::stats::compute_stats;
use comicstat_cli::client::CatalogClient;
use comicstat_cli::config::ClientConfig;
use comicstat_cli::render;

#[derive(Parser)]
#[command(
    name = "comicstat",
    about = "Comics-catalog sampling and summary statistics from the command line",
    version
)]
struct Cli {
    /// API access key. Falls back to COMICSTAT_API_KEY.
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Catalog base URL. Falls back to COMICSTAT_BASE_URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Proxy URL prefix, tried after the direct endpoint fails.
    #[arg(long, global = true)]
    proxy: Option<String>,

    /// Per-request timeout in milliseconds.
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a character sample and render its summary statistics.
    Dashboard {
        /// Number of sequential pages to fetch.
        #[arg(long, default_value_t = 3)]
        pages: u32,

        /// Records per page.
        #[arg(long, default_value_t = 20)]
        page_size: u32,

        /// Maximum records kept after deduplication.
        #[arg(long, default_value_t = 15)]
        sample_size: usize,

        /// Emit JSON instead of formatted text.
        #[arg(long)]
        json: bool,
    },

    /// List characters, optionally filtered by name prefix.
    Characters {
        #[arg(long, default_value_t = 20)]
        limit: u32,

        #[arg(long, default_value_t = 0)]
        offset: u32,

        /// Only characters whose name starts with this prefix.
        #[arg(long)]
        name_starts_with: Option<String>,

        /// Emit JSON instead of formatted text.
        #[arg(long)]
        json: bool,
    },

    /// Show one character by id.
    Character {
        id: u64,

        /// Also list comics featuring the character.
        #[arg(long)]
        comics: bool,

        /// Emit JSON instead of formatted text.
        #[arg(long)]
        json: bool,
    },

    /// List comics, optionally filtered by title prefix.
    Comics {
        #[arg(long, default_value_t = 12)]
        limit: u32,

        #[arg(long, default_value_t = 0)]
        offset: u32,

        /// Only comics whose title starts with this prefix.
        #[arg(long)]
        title_starts_with: Option<String>,

        /// Emit JSON instead of formatted text.
        #[arg(long)]
        json: bool,
    },

    /// Test connectivity against every configured endpoint.
    Probe,

    /// Generate shell completion scripts.
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Dashboard {
            pages,
            page_size,
            sample_size,
            json,
        } => {
            let client = build_client(&cli)?;
            let plan = SamplePlan {
                page_count: *pages,
                page_size: *page_size,
                sample_cap: *sample_size,
            };
            let sample = build_sample(&client, &plan).await?;

            match compute_stats(&sample) {
                Some(stats) if *json => {
                    let out = json!({ "sample": sample, "statistics": stats });
                    println!("{}", serde_json::to_string_pretty(&out)?);
                }
                Some(stats) => render::print_dashboard(&sample, &stats),
                None => println!("No records in sample."),
            }
        }

        Commands::Characters {
            limit,
            offset,
            name_starts_with,
            json,
        } => {
            let client = build_client(&cli)?;
            let page = match name_starts_with {
                Some(name) => client.search_characters(name, *limit).await?,
                None => client.get_characters(*limit, *offset).await?,
            };
            if *json {
                println!("{}", serde_json::to_string_pretty(&page.results)?);
            } else {
                println!(
                    "{} of {} characters (offset {})",
                    page.results.len(),
                    page.total,
                    page.offset
                );
                render::print_characters(&page.results);
            }
        }

        Commands::Character { id, comics, json } => {
            let client = build_client(&cli)?;
            let Some(record) = client.get_character(*id).await? else {
                eprintln!("No character with id {id}");
                std::process::exit(1);
            };

            if *json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                render::print_character_detail(&record);
            }

            if *comics {
                let page = client.get_character_comics(*id, 20).await?;
                if *json {
                    println!("{}", serde_json::to_string_pretty(&page.results)?);
                } else {
                    println!();
                    println!("Comics featuring {}:", record.name);
                    render::print_comics(&page.results);
                }
            }
        }

        Commands::Comics {
            limit,
            offset,
            title_starts_with,
            json,
        } => {
            let client = build_client(&cli)?;
            let page = match title_starts_with {
                Some(title) => client.search_comics(title, *limit).await?,
                None => client.get_comics(*limit, *offset).await?,
            };
            if *json {
                println!("{}", serde_json::to_string_pretty(&page.results)?);
            } else {
                println!(
                    "{} of {} comics (offset {})",
                    page.results.len(),
                    page.total,
                    page.offset
                );
                render::print_comics(&page.results);
            }
        }

        Commands::Probe => {
            let client = build_client(&cli)?;
            let attempts = client.probe().await;
            render::print_probe(&attempts);
            if !attempts.iter().any(|a| a.ok) {
                std::process::exit(1);
            }
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "comicstat", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn build_client(cli: &Cli) -> anyhow::Result<CatalogClient> {
    let config = ClientConfig::resolve(
        cli.api_key.as_deref(),
        cli.base_url.as_deref(),
        cli.proxy.as_deref(),
        cli.timeout_ms,
    )?;
    Ok(CatalogClient::new(config)?)
}
