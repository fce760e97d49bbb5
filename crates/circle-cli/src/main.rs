#![forbid(unsafe_code)]

mod cmd;
mod output;

use circle_core::SocialNetwork;
use circle_core::config::resolve_config;
use clap::{CommandFactory, Parser, Subcommand};
use output::OutputMode;
use std::env;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "circle: an in-memory social network console",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Read settings from this file instead of the per-user config.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Run the interactive console menu",
        long_about = "Run the numbered console menu. This is the default when no subcommand is given.",
        after_help = "EXAMPLES:\n    # Start the menu\n    circle menu\n\n    # Script the menu through stdin\n    printf '1\\nAnna\\n\\n\\n3\\n0\\n' | circle menu --quiet-menu"
    )]
    Menu(cmd::menu::MenuArgs),

    #[command(
        about = "Run the scripted walkthrough",
        long_about = "Create five profiles, link friendships, suggest friends, update and remove a profile, printing the state after each step.",
        after_help = "EXAMPLES:\n    # Narrated walkthrough\n    circle demo\n\n    # Emit machine-readable output\n    circle demo --format json"
    )]
    Demo,

    #[command(
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    circle completions bash\n\n    # Generate zsh completions\n    circle completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("CIRCLE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "circle=debug,info"
        } else {
            "circle=info,warn"
        })
    });

    let format = env::var("CIRCLE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let config = resolve_config(cli.config.as_deref())?;
    let output = output::resolve_output_mode(cli.format, cli.json, config.output.as_deref());
    debug!(?output, ?config, "settings resolved");

    match cli.command.unwrap_or_else(|| Commands::Menu(cmd::menu::MenuArgs::default())) {
        Commands::Menu(args) => {
            cmd::menu::run_menu(&args, SocialNetwork::with_config(config.network), output)
        }
        Commands::Demo => cmd::demo::run_demo(config.network, output),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}
