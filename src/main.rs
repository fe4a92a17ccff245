//! Qabot CLI - semantic FAQ answering service

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use qabot::config::{self, QabotConfig, SheetBackend};
use qabot::escalation::{GoogleSheetConnector, SheetConnector, SqliteSheetConnector, UnresolvedLog};
use qabot::query::{EmbeddingEngine, FlatIndex, MatchDecider};
use qabot::ui::{self, Icons};
use qabot::{ChatService, CorpusStore};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "qabot")]
#[command(version)]
#[command(about = "Semantic FAQ answering - matches questions against a Q/A corpus")]
#[command(long_about = r#"
Qabot answers questions by finding the closest known question in a
pre-built corpus. Questions it cannot answer are escalated to a
worksheet that curators review to extend the corpus.

Example usage:
  qabot serve --database qa.db --port 5000
  qabot ask --question "What are your opening hours?"
  qabot backlog --sheet-backend sqlite
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (defaults to ./qabot.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Default)]
struct SheetArgs {
    /// Where escalated questions are written
    #[arg(long, value_enum)]
    sheet_backend: Option<SheetBackend>,

    /// Spreadsheet name (google backend)
    #[arg(long)]
    sheet_name: Option<String>,

    /// Service-account key file (google backend)
    #[arg(long)]
    credentials: Option<PathBuf>,

    /// Worksheet database file (sqlite backend)
    #[arg(long)]
    sheet_db: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP chat service
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to the corpus database
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Maximum distance still counted as a match
        #[arg(short, long)]
        threshold: Option<f32>,

        #[command(flatten)]
        sheet: SheetArgs,
    },

    /// Answer a single question from the command line
    Ask {
        /// The question to answer
        #[arg(short, long)]
        question: String,

        /// Path to the corpus database
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Maximum distance still counted as a match
        #[arg(short, long)]
        threshold: Option<f32>,

        /// Print the reply as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        sheet: SheetArgs,
    },

    /// Show statistics about the corpus database
    Stats {
        /// Path to the corpus database
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// List escalated questions waiting for curation
    Backlog {
        #[command(flatten)]
        sheet: SheetArgs,
    },

    /// Print version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let mut config = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { port, database, threshold, sheet } => {
            apply_overrides(&mut config, database.as_deref(), threshold, &sheet);
            let port = port.unwrap_or_else(|| config.port());

            let service = Arc::new(build_service(&config)?);
            ui::header(&format!("Serving {} answers on port {}", service.corpus().len(), port));

            // Built outside the runtime: the sheet client does blocking I/O.
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(qabot::server::start_server(port, service.clone()))?;
        }

        Commands::Ask { question, database, threshold, json, sheet } => {
            apply_overrides(&mut config, database.as_deref(), threshold, &sheet);
            let service = build_service(&config)?;

            let reply = service.respond(&question)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&reply)?);
                return Ok(());
            }

            ui::reply(&reply);
        }

        Commands::Stats { database } => {
            let path = database.unwrap_or_else(|| config.database_path());
            let store = CorpusStore::open(&path)?;
            ui::section(&format!("{} {}", Icons::STATS, path.display()));
            println!("{}", store.stats()?);
        }

        Commands::Backlog { sheet } => {
            apply_overrides(&mut config, None, None, &sheet);
            let log = UnresolvedLog::connect(sheet_connector(&config));

            let rows = log.pending_rows()?;
            ui::section(&format!("{} {} ({} pending)", Icons::INBOX, log.target(), rows.len()));
            for row in &rows {
                ui::backlog_row(row);
            }
        }

        Commands::Version => {
            ui::info("qabot", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn apply_overrides(config: &mut QabotConfig, database: Option<&Path>, threshold: Option<f32>, sheet: &SheetArgs) {
    if let Some(db) = database {
        config.database = Some(db.display().to_string());
    }
    if threshold.is_some() {
        config.threshold = threshold;
    }
    if sheet.sheet_backend.is_some() {
        config.sheet.backend = sheet.sheet_backend;
    }
    if let Some(name) = &sheet.sheet_name {
        config.sheet.name = Some(name.clone());
    }
    if let Some(credentials) = &sheet.credentials {
        config.sheet.credentials = Some(credentials.display().to_string());
    }
    if let Some(path) = &sheet.sheet_db {
        config.sheet.path = Some(path.display().to_string());
    }
}

fn sheet_connector(config: &QabotConfig) -> Box<dyn SheetConnector> {
    match config.sheet_backend() {
        SheetBackend::Google => Box::new(GoogleSheetConnector::new(config.sheet_name(), config.credentials_path())),
        SheetBackend::Sqlite => Box::new(SqliteSheetConnector::new(config.sheet_db_path())),
    }
}

fn build_service(config: &QabotConfig) -> anyhow::Result<ChatService> {
    let database = config.database_path();
    tracing::info!("Loading corpus from {:?}", database);

    let store = CorpusStore::open(&database)?;
    let corpus = store.load_corpus()?;
    let index = FlatIndex::for_corpus(store.load_embeddings()?, &corpus)?;
    tracing::info!("Loaded {} Q/A entries ({} dimensions)", corpus.len(), index.dimension());

    let embedder = EmbeddingEngine::new()?;
    let log = UnresolvedLog::connect(sheet_connector(config));

    Ok(ChatService::new(Arc::new(embedder), Arc::new(index), Arc::new(corpus), Arc::new(log))
        .with_decider(MatchDecider::new(config.threshold()))
        .with_messages(config.messages()))
}
