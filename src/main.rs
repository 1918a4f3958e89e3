use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use snippet_board::{
    ResilientFetcher, Section, SnippetBoard,
    category::MOTIVATION_CATEGORIES,
    clipboard::{ClipboardSink, CommandClipboard, CopyFeedback, NoClipboard},
    config::Config,
    render::TerminalRenderer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snippet-board")]
#[command(about = "Fetch a motivational quote, a dad joke, or fun facts", long_about = None)]
struct Cli {
    /// Print one JSON object per event instead of text
    #[arg(long, global = true)]
    json: bool,
    /// Copy each rendered section to the clipboard (needs SNIPPET_CLIPBOARD_CMD)
    #[arg(long, global = true)]
    copy: bool,
    /// Hide Loading... status lines
    #[arg(long, short, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a motivational quote
    Motivation {
        /// Category key (see `categories`) or a raw category label
        #[arg(long, default_value = "")]
        category: String,
    },
    /// Fetch a dad joke
    Joke,
    /// Fetch a list of fun facts
    Facts {
        #[arg(long)]
        theme: Option<String>,
    },
    /// Fetch all three at once
    All {
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long)]
        theme: Option<String>,
    },
    /// List known motivation categories
    Categories,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.runtime.log_level)
                .unwrap_or_else(|_| EnvFilter::new("snippet_board=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    if matches!(cli.command, Commands::Categories) {
        for (key, label) in MOTIVATION_CATEGORIES {
            println!("{}\t{}", key, label);
        }
        return Ok(());
    }

    let fetcher = ResilientFetcher::from_config(&config.endpoints, &config.http)?;
    let renderer = TerminalRenderer::new(cli.json).quiet_status(cli.quiet);
    let clipboard: Arc<dyn ClipboardSink> = match config.require_clipboard_command() {
        Ok(command) => Arc::new(CommandClipboard::from_command_line(
            command,
            config.runtime.clipboard_timeout_ms,
        )?),
        Err(e) => {
            if cli.copy {
                warn!("--copy requested but {}", e);
            }
            Arc::new(NoClipboard)
        }
    };

    let board = SnippetBoard::new(
        Arc::new(fetcher),
        Arc::new(renderer),
        clipboard,
        config.endpoints.clone(),
    );
    let default_theme = config.runtime.default_theme.clone();

    let (sections, failures) = match cli.command {
        Commands::Motivation { category } => (
            vec![Section::Motivation],
            board.generate_motivation(&category).await.is_err() as usize,
        ),
        Commands::Joke => (
            vec![Section::DadJoke],
            board.generate_dad_joke().await.is_err() as usize,
        ),
        Commands::Facts { theme } => {
            let theme = theme.unwrap_or(default_theme);
            (
                vec![Section::FunFacts],
                board.generate_fun_facts(&theme).await.is_err() as usize,
            )
        }
        Commands::All { category, theme } => {
            let theme = theme.unwrap_or(default_theme);
            // independent requests; each section renders as soon as its own fetch lands
            let (motivation, joke, facts) = tokio::join!(
                board.generate_motivation(&category),
                board.generate_dad_joke(),
                board.generate_fun_facts(&theme),
            );
            let failures = [motivation.is_err(), joke.is_err(), facts.is_err()]
                .into_iter()
                .filter(|failed| *failed)
                .count();
            (
                vec![Section::Motivation, Section::DadJoke, Section::FunFacts],
                failures,
            )
        }
        Commands::Categories => (Vec::new(), 0),
    };

    if cli.copy {
        for section in sections {
            if board.copy(section).await == CopyFeedback::Failed {
                warn!("could not copy {}", section);
            }
        }
    }

    if failures > 0 {
        info!("{} request(s) failed", failures);
        std::process::exit(1);
    }

    Ok(())
}
