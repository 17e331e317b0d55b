use clap::{Parser, Subcommand};
use std::env;
use vcs_overlay::commands::*;
use vcs_overlay::core::{error::Result, print_error};

#[derive(Parser)]
#[command(name = "vcs-overlay")]
#[command(about = "Version control status overlays for file browsers")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the overlay icons of files as a file browser would draw them
    Render {
        /// Paths to render (defaults to the work tree and every known item)
        paths: Vec<String>,
        /// Lay icons out for grid tiles instead of list rows
        #[arg(long)]
        grid: bool,
    },
    /// Show the lock details of a file
    Locks {
        /// Path of the locked file
        path: String,
    },
    /// Refresh icons and locks
    Refresh,
    /// Show the effective preferences
    Prefs {
        /// Enable the integration
        #[arg(long, conflicts_with = "disable")]
        enable: bool,
        /// Disable the integration
        #[arg(long)]
        disable: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "warn");
    }
    env_logger::init();

    let result = match cli.command {
        Commands::Render { paths, grid } => execute_render(paths, grid),
        Commands::Locks { path } => execute_locks(path),
        Commands::Refresh => execute_refresh(),
        Commands::Prefs { enable, disable } => {
            let toggle = match (enable, disable) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            execute_prefs(toggle)
        }
    };

    if let Err(e) = result {
        // Errors with a dialog were already shown to the user
        if e.dialog_title().is_none() {
            print_error(&e.to_string());
        }
        std::process::exit(1);
    }

    Ok(())
}
