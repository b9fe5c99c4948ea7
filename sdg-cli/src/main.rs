use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::{CliError, run_action, run_ask, run_invoke, run_manifest, run_tools};

#[derive(Parser, Debug)]
#[command(name = "sdg", version = "0.2.0")]
#[command(about = "SDG Agent CLI - tools, planner manifest and agent requests")]
struct Cli {
    /// TOML settings file; SDG_* environment variables override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the externally invokable tools
    Tools,
    /// Print the planner manifest as JSON
    Manifest,
    /// Invoke a tool with JSON arguments
    Invoke {
        /// Tool name
        #[arg(long)]
        tool: String,
        /// JSON object of arguments
        #[arg(long, default_value = "{}")]
        args: String,
    },
    /// Send a free-text message to the agent
    Ask {
        /// Message to route
        message: String,
    },
    /// Handle a serialized orchestrator action request
    Action {
        /// JSON action request
        #[arg(long)]
        request: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize JSON logging once.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();
    let env_filter = match "info".parse() {
        Ok(directive) => env_filter.add_directive(directive),
        Err(_) => env_filter,
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .json()
        .try_init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let outcome: Result<String, CliError> = match cli.command {
        Commands::Tools => run_tools(),
        Commands::Manifest => run_manifest(config),
        Commands::Invoke { tool, args } => run_invoke(&tool, &args),
        Commands::Ask { message } => run_ask(config, &message).await,
        Commands::Action { request } => run_action(config, &request).await,
    };

    match outcome {
        Ok(output) => println!("{output}"),
        Err(CliError::StepFailed(report)) => {
            println!("{report}");
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
