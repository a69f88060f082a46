#![allow(clippy::const_is_empty)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod app;
pub mod config;
pub mod data;
pub mod domain;
pub mod ui;
pub mod utils;

// Re-export commonly used types outside of crate (for main.rs)
pub use app::App;
pub use config::PERSISTENCE;

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Send uploads to this prediction endpoint instead of the built-in one
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Load this CSV file on startup, as if it had been dropped on the window
    #[cfg(not(target_arch = "wasm32"))]
    #[arg(long)]
    pub csv: Option<std::path::PathBuf>,
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(cc: &eframe::CreationContext<'_>, args: Cli) -> App {
    App::new(cc, args)
}
