use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use config::Config;
use recall_llm::{build_client, Backend};
use recall_search::{ask, AskOptions};
use spinner::Spinner;
use std::path::PathBuf;

mod config;
mod spinner;

#[derive(Parser)]
#[command(name = "recall")]
#[command(about = "Ask questions about your recorded meetings", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a question from meeting summaries and transcripts
    Ask(AskArgs),

    /// Create the config file if needed and print its path
    Config,
}

#[derive(Args)]
struct AskArgs {
    /// The question, in natural language
    question: String,

    /// Only consider meetings on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    since: Option<String>,

    /// Only consider the N most recent meetings
    #[arg(short = 'n', long, value_name = "N")]
    limit: Option<usize>,

    /// Meetings folder (overrides output.dir)
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Chat backend: ollama|openai (overrides llm.backend)
    #[arg(long)]
    backend: Option<String>,

    /// Model name (overrides llm.model)
    #[arg(long)]
    model: Option<String>,

    /// Backend URL (overrides llm.host and OLLAMA_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Context window in tokens (overrides llm.context_size)
    #[arg(long)]
    context_size: Option<usize>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // Keep stdout clean for JSON parsing
    if let Commands::Ask(args) = &cli.command {
        if args.json {
            cli.quiet = true;
        }
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Ask(args) => run_ask(args, cli.quiet).await?,
        Commands::Config => run_config()?,
    }

    Ok(())
}

async fn run_ask(args: AskArgs, quiet: bool) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(backend) = &args.backend {
        config.llm.settings.backend = backend.parse::<Backend>()?;
    }
    if let Some(model) = args.model {
        config.llm.settings.model = model;
    }
    if let Some(host) = args.host {
        config.llm.settings.host = host;
    }
    if let Some(size) = args.context_size {
        config.llm.context_size = size;
    }

    let root = args
        .dir
        .unwrap_or_else(|| config.output.resolved_dir());
    let options = AskOptions {
        since: args.since,
        limit: args.limit,
        context_size: Some(config.llm.context_size).filter(|&size| size > 0),
    };
    log::debug!("Searching meetings under {}", root.display());

    let client = build_client(&config.llm.settings)
        .context("Failed to set up the chat backend")?;

    let spinner = if quiet {
        Spinner::hidden()
    } else {
        Spinner::start("Searching meetings")
    };
    let report = ask(&client, &root, &args.question, &options, &spinner)
        .await
        .with_context(|| {
            format!(
                "Search failed ({} backend at {})",
                config.llm.settings.backend, config.llm.settings.host
            )
        });
    spinner.finish();
    let report = report?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

fn run_config() -> Result<()> {
    let path = config::ensure_config_file()?;
    println!("{}", path.display());
    Ok(())
}
