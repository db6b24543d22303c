//! # World Module
//!
//! The location graph a game is played in.
//!
//! This module contains the spatial building blocks of hideseek:
//! - Directions and the opposite-direction mapping
//! - Locations with ordered, directional exits and optional hiding places
//! - The `House` that owns the full graph, validates it, and moves it in and
//!   out of JSON layout documents

pub mod house;
pub mod location;

pub use house::*;
pub use location::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Directions a location exit can lead in.
///
/// Eight compass directions plus the vertical and in/out pairs. Every
/// direction has an opposite, which is what makes two-way corridors out of a
/// single `add_exit` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Northeast,
    Southwest,
    Northwest,
    Southeast,
    Up,
    Down,
    In,
    Out,
}

impl Direction {
    /// Returns the opposite direction.
    ///
    /// The mapping is a total involution: `d.opposite().opposite() == d` for
    /// every direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use hideseek::Direction;
    ///
    /// assert_eq!(Direction::North.opposite(), Direction::South);
    /// assert_eq!(Direction::In.opposite(), Direction::Out);
    /// ```
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Northeast => Direction::Southwest,
            Direction::Southwest => Direction::Northeast,
            Direction::Northwest => Direction::Southeast,
            Direction::Southeast => Direction::Northwest,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::In => Direction::Out,
            Direction::Out => Direction::In,
        }
    }

    /// Parses a direction token, case-insensitively.
    ///
    /// Accepts the full direction name or its abbreviation
    /// (n/s/e/w/ne/nw/se/sw/u/d/i/o). Returns `None` for anything else.
    ///
    /// # Examples
    ///
    /// ```
    /// use hideseek::Direction;
    ///
    /// assert_eq!(Direction::from_token("North"), Some(Direction::North));
    /// assert_eq!(Direction::from_token("se"), Some(Direction::Southeast));
    /// assert_eq!(Direction::from_token("sideways"), None);
    /// ```
    pub fn from_token(token: &str) -> Option<Direction> {
        match token.to_lowercase().as_str() {
            "north" | "n" => Some(Direction::North),
            "south" | "s" => Some(Direction::South),
            "east" | "e" => Some(Direction::East),
            "west" | "w" => Some(Direction::West),
            "northeast" | "ne" => Some(Direction::Northeast),
            "southwest" | "sw" => Some(Direction::Southwest),
            "northwest" | "nw" => Some(Direction::Northwest),
            "southeast" | "se" => Some(Direction::Southeast),
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "in" | "i" => Some(Direction::In),
            "out" | "o" => Some(Direction::Out),
            _ => None,
        }
    }

    /// Returns all 12 directions.
    pub fn all() -> Vec<Direction> {
        vec![
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::Northeast,
            Direction::Southwest,
            Direction::Northwest,
            Direction::Southeast,
            Direction::Up,
            Direction::Down,
            Direction::In,
            Direction::Out,
        ]
    }

    /// Whether exit descriptions read "is to the {direction}" rather than
    /// "is {direction}".
    ///
    /// The eight compass directions take the "to the" phrasing; Up, Down, In,
    /// and Out do not ("the Attic is Up").
    pub fn uses_to_the(self) -> bool {
        !matches!(
            self,
            Direction::Up | Direction::Down | Direction::In | Direction::Out
        )
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
            Direction::Northeast => "Northeast",
            Direction::Southwest => "Southwest",
            Direction::Northwest => "Northwest",
            Direction::Southeast => "Southeast",
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::In => "In",
            Direction::Out => "Out",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_involution() {
        for direction in Direction::all() {
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }

    #[test]
    fn test_opposite_pairs() {
        assert_eq!(Direction::North.opposite(), Direction::South);
        assert_eq!(Direction::East.opposite(), Direction::West);
        assert_eq!(Direction::Northeast.opposite(), Direction::Southwest);
        assert_eq!(Direction::Northwest.opposite(), Direction::Southeast);
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::In.opposite(), Direction::Out);
    }

    #[test]
    fn test_from_token_full_names_case_insensitive() {
        assert_eq!(Direction::from_token("NORTH"), Some(Direction::North));
        assert_eq!(Direction::from_token("southeast"), Some(Direction::Southeast));
        assert_eq!(Direction::from_token("Out"), Some(Direction::Out));
    }

    #[test]
    fn test_from_token_abbreviations() {
        assert_eq!(Direction::from_token("n"), Some(Direction::North));
        assert_eq!(Direction::from_token("NE"), Some(Direction::Northeast));
        assert_eq!(Direction::from_token("u"), Some(Direction::Up));
        assert_eq!(Direction::from_token("o"), Some(Direction::Out));
    }

    #[test]
    fn test_from_token_rejects_unknown() {
        assert_eq!(Direction::from_token(""), None);
        assert_eq!(Direction::from_token("sideways"), None);
        assert_eq!(Direction::from_token("nor th"), None);
    }

    #[test]
    fn test_display_matches_document_tokens() {
        for direction in Direction::all() {
            assert_eq!(
                Direction::from_token(&direction.to_string()),
                Some(direction)
            );
        }
    }

    #[test]
    fn test_uses_to_the() {
        assert!(Direction::North.uses_to_the());
        assert!(Direction::Southwest.uses_to_the());
        assert!(!Direction::Up.uses_to_the());
        assert!(!Direction::In.uses_to_the());
        assert!(!Direction::Out.uses_to_the());
    }
}
