//! Song Basket
//!
//! A small web application for sorting the music you are listening to: it
//! shows the track currently playing on the linked Spotify account and lets
//! the user add it to (or remove it from) a chosen playlist with one click.
//!
//! # Modules
//!
//! - `api` - HTTP request handlers for the web surface
//! - `config` - Configuration management and environment variables
//! - `error` - Request-level error taxonomy
//! - `management` - Credential, pending-authorization, and playlist state
//! - `server` - Shared application state and the axum server
//! - `spotify` - Spotify Web API collaborators (auth + music service)
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers

pub mod api;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
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
/// # Example
///
/// ```
/// success!("Session established for {}", user_id);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Reserved for unrecoverable startup failures (bad listen address, bind
/// errors); request handling never terminates the process.
///
/// # Example
///
/// ```
/// error!("Failed to bind {}: {}", addr, e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues that should be visible in the server log,
/// e.g. failed credential persistence or duplicate tracks in a playlist.
///
/// # Example
///
/// ```
/// warning!("Failed to persist credential for {}: {}", user_id, e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
