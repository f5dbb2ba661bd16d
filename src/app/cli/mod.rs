//! Command-line interface.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::adapters::dialoguer_prompter::DialoguerPrompter;
use crate::app::api::{self, InstallOutcome};
use crate::domain::{AppError, INSTALL_CONFIG_PATH};
use crate::ports::Prompter;

#[derive(Parser)]
#[command(name = "lci")]
#[command(version)]
#[command(
    about = "Interactive installer for Laravel applications",
    long_about = None
)]
struct Cli {
    /// Application root (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    path: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish config/install.toml and optionally continue with setup
    #[clap(visible_alias = "i")]
    Install {
        /// Overwrite an existing config/install.toml
        #[arg(short, long)]
        force: bool,
        /// Do not offer to run setup afterwards
        #[arg(long)]
        no_setup: bool,
    },
    /// Check requirements, write .env, generate the app key and create the admin account
    #[clap(visible_alias = "s")]
    Setup,
    /// Run only the system requirement check
    Check,
}

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let root = match cli.path {
        Some(path) => path,
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    };

    let result: Result<(), AppError> = match cli.command {
        Commands::Install { force, no_setup } => run_install(root, force, no_setup),
        Commands::Setup => run_setup(root),
        Commands::Check => api::check_at(root).map(|_| ()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if matches!(e, AppError::StepFailed { .. }) {
            eprintln!("Fix the problem above and run 'lci setup' again.");
        }
        std::process::exit(1);
    }
}

fn run_install(root: PathBuf, force: bool, no_setup: bool) -> Result<(), AppError> {
    println!("🚀 Installing lci...");
    match api::install_at(&root, force)? {
        InstallOutcome::Published(path) => println!("✅ Config file published: {}", path.display()),
        InstallOutcome::Overwritten(path) => println!("✅ Config file overwritten: {}", path.display()),
        InstallOutcome::AlreadyPresent(path) => {
            println!("⚠️  {} already exists; left unchanged (use --force to overwrite).", path.display())
        }
    }

    println!("\n📌 NEXT STEP: Update your installation settings in: {}", INSTALL_CONFIG_PATH);
    println!("➡  After editing the config, run: lci setup");

    if no_setup {
        return Ok(());
    }

    let prompter = DialoguerPrompter::new();
    if prompter.confirm("Have you set up install.toml? Run setup now?", false)? {
        println!("⚙  Running: lci setup");
        run_setup(root)
    } else {
        println!("❗ Okay, setup skipped. Run it later using: lci setup");
        Ok(())
    }
}

fn run_setup(root: PathBuf) -> Result<(), AppError> {
    let outcome = api::setup_at(root)?;
    println!("\n🎉 Setup complete ({} steps).", outcome.completed.len());
    Ok(())
}
