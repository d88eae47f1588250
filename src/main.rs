//! # HealthAgent
//!
//! Educational health-guidance demo backend.
//!
//! Usage:
//!   healthagent                               # Serve the API (default port 8000)
//!   healthagent serve --port 9000             # Custom port
//!   healthagent classify "I can't sleep"      # One-off triage answer
//!   healthagent search anxiety breathing -k 5 # Rank the knowledge base
//!   healthagent init                          # Write a default config file

use anyhow::Result;
use clap::{Parser, Subcommand};
use healthagent_core::config::HealthAgentConfig;
use healthagent_knowledge::KnowledgeBase;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "healthagent",
    version,
    about = "🩺 HealthAgent: quiz sessions, triage chat and knowledge search"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (default: ~/.healthagent/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        /// Listen port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Listen address (overrides config)
        #[arg(long)]
        host: Option<String>,
    },

    /// Print the triage answer for a message
    Classify {
        /// Message text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Rank knowledge documents against a query
    Search {
        /// Query text
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Maximum number of results
        #[arg(short, long)]
        k: Option<usize>,
    },

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<HealthAgentConfig> {
    let mut config = match path {
        Some(p) => HealthAgentConfig::load_from(p)?,
        None => HealthAgentConfig::load()?,
    };
    config.apply_env();
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "healthagent=debug,tower_http=debug"
    } else {
        "healthagent=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .init();

    match cli.command.unwrap_or(Commands::Serve { port: None, host: None }) {
        Commands::Serve { port, host } => {
            let mut config = load_config(cli.config.as_ref())?;
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(host) = host {
                config.server.host = host;
            }

            println!("🩺 HealthAgent v{}", env!("CARGO_PKG_VERSION"));
            println!("   🌐 API:       http://{}:{}", config.server.host, config.server.port);
            println!("   🔓 CORS:      {}", config.server.allowed_origin);
            println!("   🗄️  Database:  {}", config.database.resolved_path().display());
            println!();

            healthagent_gateway::start(config).await?;
        }
        Commands::Classify { text } => {
            let result = healthagent_triage::respond(&text.join(" "));
            println!("[{}] {}", result.category.as_str(), result.response);
        }
        Commands::Search { query, k } => {
            let config = load_config(cli.config.as_ref())?;
            let kb = KnowledgeBase::from_config(&config.knowledge)?;
            let k = k.unwrap_or(config.knowledge.default_k);
            let results = kb.top_k(&query.join(" "), k);
            if results.is_empty() {
                println!("No matching documents.");
            }
            for (i, r) in results.iter().enumerate() {
                println!("{}. {} ({:.3})", i + 1, r.document.title, r.score);
                println!("   {}", r.document.summary);
            }
        }
        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(HealthAgentConfig::default_path);
            if path.exists() && !force {
                println!("⚠️  Config already exists: {} (use --force to overwrite)", path.display());
                return Ok(());
            }
            HealthAgentConfig::default().save_to(&path)?;
            println!("✅ Config written: {}", path.display());
        }
    }

    Ok(())
}
