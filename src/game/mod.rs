//! # Game Module
//!
//! Per-session gameplay: opponents, their randomized placement, the
//! controller that drives a play session, and the saved-game snapshot.

pub mod placement;
pub mod savegame;
pub mod state;

pub use placement::*;
pub use savegame::*;
pub use state::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opponent hiding somewhere in the house.
///
/// The name is the opponent's identity; it is unique within a session.
///
/// # Examples
///
/// ```
/// use hideseek::Opponent;
///
/// let ana = Opponent::new("Ana");
/// assert_eq!(ana.to_string(), "Ana");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opponent {
    pub name: String,
}

impl Opponent {
    /// Creates an opponent with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Opponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The default opponent roster.
pub fn default_opponents() -> Vec<Opponent> {
    crate::config::DEFAULT_OPPONENT_NAMES
        .iter()
        .map(|name| Opponent::new(*name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_opponents() {
        let opponents = default_opponents();
        assert_eq!(opponents.len(), 5);
        assert_eq!(opponents[2], Opponent::new("Ana"));
    }
}
