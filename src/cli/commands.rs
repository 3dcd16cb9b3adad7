use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

use crate::domain::{
    AnalysisOutcome, InfluencerRecord, Leaderboard, LeaderboardOutcome, Mode, SearchConfig, Trend,
};
use crate::error::GatewayError;
use crate::infra::{ConfigManager, ServerConfig};
use crate::llm::{InfluencerAnalyst, LLMClient};
use crate::prompts;
use crate::server;

#[derive(Parser)]
#[command(name = "influscope")]
#[command(about = "Search and analyze health influencers with an LLM", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Server configuration file (YAML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// OpenAI API key (defaults to OPENAI_API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default configuration file
    Init {
        /// Where to write it (defaults to the user config directory)
        path: Option<PathBuf>,
    },

    /// Run the HTTP server
    Serve {
        #[arg(short, long)]
        port: Option<u16>,

        #[arg(long)]
        bind: Option<String>,
    },

    /// Resolve an influencer name to its slug
    Find {
        /// Influencer name (ignored with --discover)
        name: Option<String>,

        /// Let the model pick a random health influencer
        #[arg(long)]
        discover: bool,
    },

    /// Analyze an influencer's profile and claims
    Analyze {
        /// Influencer slug, e.g. andrew-huberman
        slug: String,

        /// Search configuration as JSON (same shape as the config cookie)
        #[arg(long)]
        search_config: Option<PathBuf>,
    },

    /// Build the trust leaderboard
    Leaderboard,

    /// Check configuration and API key setup
    Health,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let manager = ConfigManager::load(cli.config.as_deref())?;
    let config = manager.get();

    match cli.command {
        Commands::Init { path } => init_command(path),
        Commands::Serve { port, bind } => serve_command(config, port, bind).await,
        Commands::Find { name, discover } => {
            find_command(&config, cli.api_key, name, discover).await
        }
        Commands::Analyze {
            slug,
            search_config,
        } => analyze_command(&config, cli.api_key, &slug, search_config.as_deref()).await,
        Commands::Leaderboard => leaderboard_command(&config, cli.api_key).await,
        Commands::Health => health_command(&manager, &config, cli.api_key),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "influscope=debug,info" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

fn init_command(path: Option<PathBuf>) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => ConfigManager::user_config_path().context("Could not find config directory")?,
    };

    if ConfigManager::create_default(&path)? {
        println!("{} at {}", prompts::MSG_CONFIG_CREATED.green(), path.display());
    } else {
        println!("{} at {}", prompts::MSG_CONFIG_EXISTS.yellow(), path.display());
    }
    Ok(())
}

async fn serve_command(mut config: ServerConfig, port: Option<u16>, bind: Option<String>) -> Result<()> {
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(bind) = bind {
        config.bind_address = bind;
    }
    server::start_server(config).await
}

async fn find_command(
    config: &ServerConfig,
    api_key: Option<String>,
    name: Option<String>,
    discover: bool,
) -> Result<()> {
    let api_key = require_api_key(api_key)?;
    let mode = if discover { Mode::Discover } else { Mode::Specific };
    let name = name.unwrap_or_default();
    if mode == Mode::Specific && name.trim().is_empty() {
        anyhow::bail!("Provide an influencer name or pass --discover");
    }

    let slug = analyst(config)
        .resolve_slug(&name, mode, &api_key)
        .await?
        .ok_or(GatewayError::NotFound)?;
    println!("{}", slug.bold());
    Ok(())
}

async fn analyze_command(
    config: &ServerConfig,
    api_key: Option<String>,
    slug: &str,
    search_config: Option<&Path>,
) -> Result<()> {
    let api_key = require_api_key(api_key)?;
    let search = load_search_config(search_config)?;
    let name = crate::domain::unslugify(slug);

    println!(
        "Analyzing {} over {} ({} claims max)...",
        name.bold(),
        search.time_range.describe(),
        search.claims_to_analyze
    );

    match analyst(config).analyze_influencer(&name, &search, &api_key).await? {
        AnalysisOutcome::Profile(record) => print_profile(&record),
        AnalysisOutcome::Unavailable { error } => println!("{} {}", "✗".red(), error),
    }
    Ok(())
}

async fn leaderboard_command(config: &ServerConfig, api_key: Option<String>) -> Result<()> {
    let api_key = require_api_key(api_key)?;
    match analyst(config).build_leaderboard(&api_key).await? {
        LeaderboardOutcome::Board(board) => print_leaderboard(&board),
        LeaderboardOutcome::Unavailable { error } => println!("{} {}", "✗".red(), error),
    }
    Ok(())
}

fn health_command(manager: &ConfigManager, config: &ServerConfig, api_key: Option<String>) -> Result<()> {
    println!("{}", "Checking influscope setup...".bold());

    match manager.path() {
        Some(path) if path.exists() => println!("✓ Configuration loaded from {}", path.display()),
        _ => println!("{} No config file, using defaults", "⚠️".yellow()),
    }
    println!("  model: {}", config.model);
    println!("  endpoint: {}", config.api_base_url);
    println!("  listen: {}", config.address());

    match require_api_key(api_key) {
        Ok(_) => println!("✓ API key configured"),
        Err(_) => {
            println!("{} {}", "⚠️".yellow(), prompts::MSG_NO_API_KEY);
            println!("{}", prompts::MSG_API_KEY_INSTRUCTION);
        }
    }
    Ok(())
}

// Helper functions

fn analyst(config: &ServerConfig) -> InfluencerAnalyst {
    InfluencerAnalyst::new(LLMClient::openai(&config.api_base_url, &config.model))
        .with_analysis_max_tokens(config.analysis_max_tokens)
}

fn require_api_key(flag: Option<String>) -> Result<String, GatewayError> {
    flag.or_else(|| std::env::var("OPENAI_API_KEY").ok())
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .ok_or(GatewayError::MissingCredential)
}

fn load_search_config(path: Option<&Path>) -> Result<SearchConfig> {
    let Some(path) = path else {
        return Ok(SearchConfig::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Invalid search config in {}", path.display()))
}

fn print_profile(record: &InfluencerRecord) {
    println!("{}", "─".repeat(60));
    println!("{}", record.name.bold());
    if !record.categories.is_empty() {
        println!("{}", record.categories.join(" · ").cyan());
    }
    println!("{}", record.description);
    println!(
        "Trust: {}  Revenue: {}  Products: {}  Followers: {}",
        record.trust.green(),
        record.revenue,
        record.products,
        record.followers
    );

    println!("\nClaims ({} verified of {}):", record.verified_claims(), record.claims.len());
    for claim in &record.claims {
        let status = match claim.status.to_lowercase().as_str() {
            "verified" => claim.status.green(),
            "debunked" => claim.status.red(),
            _ => claim.status.yellow(),
        };
        println!("{}", "─".repeat(60));
        println!("[{}] {} ({})", status, claim.claim, claim.category);
        println!("  trust: {}", claim.trust);
        if !claim.original_source.link.is_empty() {
            println!("  source: {}", claim.original_source.link);
        }
        for source in &claim.verification_sources {
            println!("  research: {} {}", source.name, source.link);
        }
    }
}

fn print_leaderboard(board: &Leaderboard) {
    println!(
        "Verified claims: {}  Average trust: {}",
        board.total_verified_claims.bold(),
        board.average_trust_score.bold()
    );
    println!("{}", "─".repeat(60));
    for record in &board.leaderboard {
        let trend = match record.trend {
            Trend::Up => "▲".green(),
            Trend::Down => "▼".red(),
            Trend::Flat => "•".normal(),
        };
        println!(
            "{:>3}. {:<28} {:<14} {:>5} {} {:>7} {:>5}",
            record.rank,
            record.name,
            record.category,
            record.trust_score,
            trend,
            record.followers,
            record.verified_claims
        );
    }
}
