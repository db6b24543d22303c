//! # Hideseek
//!
//! A single-player hide-and-seek text adventure played in a house described
//! as a graph of connected locations.
//!
//! ## Architecture Overview
//!
//! The crate is split along the lifetime of a play session:
//!
//! - **World**: the location graph, directional exits, and the `House` that
//!   owns, validates, and (de)serializes the whole layout
//! - **Game**: opponents, the randomized placement walk, the per-session
//!   `GameController`, and the saved-game snapshot format
//! - **Input**: the text-command surface that routes player input
//! - **Utils**: injected capabilities for file access and randomness, so
//!   sessions are reproducible and testable without touching the real
//!   filesystem
//!
//! House layouts and saved games are plain JSON documents; every document is
//! validated on the way in and errors carry the exact violation so a corrupt
//! file never takes down a session.

pub mod game;
pub mod input;
pub mod utils;
pub mod world;

pub use game::*;
pub use input::*;
pub use utils::*;
pub use world::*;

/// Core error type for the hideseek engine.
#[derive(thiserror::Error, Debug)]
pub enum HideSeekError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON document (no tokens, truncated, wrong type)
    #[error("{0}")]
    Parse(#[from] serde_json::Error),

    /// Empty or whitespace-only name, description, or file name; illegal
    /// characters in a file name
    #[error("{0}")]
    Naming(String),

    /// A location with no exits, a house with no hiding places, an exit
    /// referencing a missing location, or an unrecognized direction token
    #[error("{0}")]
    Structure(String),

    /// A name that does not resolve to an existing (or hiding-capable)
    /// location, or a found opponent missing from the roster
    #[error("{0}")]
    Reference(String),

    /// A numeric field outside its valid range
    #[error("{0}")]
    Range(String),

    /// An existence precondition on a file was not met
    #[error("{0}")]
    NotFound(String),

    /// A lower-layer error wrapped with the context of the document that
    /// carried it
    #[error("{context} - {source}")]
    Corrupt {
        context: String,
        source: Box<HideSeekError>,
    },
}

/// Result type used throughout the hideseek codebase.
pub type HideSeekResult<T> = Result<T, HideSeekError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Extension appended to house layout and saved game file names
    pub const SAVE_FILE_EXTENSION: &str = "json";

    /// File name of the built-in default house layout
    pub const DEFAULT_HOUSE_FILE_NAME: &str = "DefaultHouse";

    /// Opponents hidden in a default game
    pub const DEFAULT_OPPONENT_NAMES: [&str; 5] = ["Joe", "Bob", "Ana", "Owen", "Jimmy"];
}
