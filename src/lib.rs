//! Yandex Music to Spotify library importer
//!
//! This library moves a user's music library (liked tracks, playlists, liked
//! albums and followed artists) from Yandex Music into Spotify. Every source
//! item is turned into a search query against the Spotify catalog, resolved to
//! a Spotify id, and written back in batches through the bulk library endpoints.
//! Items that cannot be matched are collected per section and reported at the
//! end of the run.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local OAuth callback server
//! - `catalog` - Capability traits for the source and destination catalogs
//! - `config` - Configuration management, environment variables and run settings
//! - `errors` - Error types shared by the clients and the import pipeline
//! - `importer` - Matching, batching and the per-category import drivers
//! - `management` - Token caching for the Spotify account
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client (destination catalog)
//! - `types` - Wire types for both services and report rows
//! - `utils` - Utility functions and helpers
//! - `yandex` - Yandex Music API client (source catalog)
//!
//! # Example
//!
//! ```
//! use yandex2spotify::{config, importer::Importer};
//!
//! #[tokio::main]
//! async fn main() -> yandex2spotify::Res<()> {
//!     config::load_env().await?;
//!     // Build clients, then run Importer::import_all...
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod importer;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;
pub mod yandex;

/// A convenient Result type alias for binary-level glue code.
///
/// Library operations return the typed errors from [`errors`]; this alias is
/// used where several of them meet, such as configuration loading in `main`.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Importing liked tracks...");
/// info!("Found {} playlists", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Used when a batch was saved or a category finished without fatal errors.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates with exit code 1 right after printing. Only used from `main`
/// for failures the run cannot continue from.
///
/// # Example
///
/// ```
/// error!("Either --token or --json-path must be specified");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues: unmatched items, retried requests and
/// truncated search queries.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
