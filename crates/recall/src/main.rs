use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use recall::commands;
use recall::config::Config;
use recall::explain::ExplanationClient;

#[derive(Parser)]
#[command(name = "recall")]
#[command(about = "Recall - ask questions, keep the explanations, get quizzed on them later")]
#[command(version)]
struct Cli {
  /// Enable debug logging on stderr
  #[arg(short, long, global = true)]
  debug: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Ask a question and save the explanation
  Ask {
    /// The question or topic to explain
    question: String,
    /// Use this explanation instead of asking the explanation service
    #[arg(short, long)]
    explanation: Option<String>,
  },
  /// List asked questions
  List {
    /// Show explanations and timestamps
    #[arg(short, long)]
    verbose: bool,
  },
  /// Print a quiz generated from asked questions
  Quiz {
    /// Emit the quiz as JSON
    #[arg(long)]
    json: bool,
    /// Mark the correct option for each question
    #[arg(short, long)]
    answers: bool,
  },
  /// Take a quiz interactively
  Play,
  /// Show how many questions have been asked
  Stats,
  /// Check that the explanation service is reachable
  Status,
}

fn init_tracing(debug: bool) {
  let filter = if debug {
    EnvFilter::new("recall=debug,warn")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("recall=warn,warn"))
  };

  tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.debug);

  let config = Config::load()?;

  match cli.command {
    Commands::Ask { question, explanation } => {
      let store = commands::open_store(&config)?;
      let client = match explanation {
        Some(_) => None,
        None => Some(ExplanationClient::new(&config.service)?),
      };
      commands::ask_question(&store, client.as_ref(), &question, explanation.as_deref()).await?;
    }
    Commands::List { verbose } => {
      let store = commands::open_store(&config)?;
      commands::list_questions(&store, verbose)?;
    }
    Commands::Quiz { json, answers } => {
      let store = commands::open_store(&config)?;
      commands::print_quiz(&store, json, answers)?;
    }
    Commands::Play => {
      let store = commands::open_store(&config)?;
      let stdin = io::stdin();
      commands::play_quiz(&store, &mut stdin.lock(), &mut io::stdout())?;
    }
    Commands::Stats => {
      let store = commands::open_store(&config)?;
      commands::show_stats(&store)?;
    }
    Commands::Status => {
      let client = ExplanationClient::new(&config.service)?;
      commands::check_service(&client).await?;
    }
  }

  Ok(())
}
