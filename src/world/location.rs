//! # Location Module
//!
//! Graph nodes of a house: named rooms with ordered, directional exits and
//! an optional hiding place.

use crate::{Direction, HideSeekError, HideSeekResult};

/// Identifier of a location within the house that owns it.
///
/// Ids index into the owning [`House`](crate::House)'s location arena and
/// are only meaningful for the house that produced them.
pub type LocationId = usize;

/// A room in the house.
///
/// Exits are kept in insertion order, with at most one entry per direction,
/// so exit listings and serialized layouts are stable. A location that can
/// conceal opponents carries a [`HidingPlace`] payload; everything else in
/// the game branches on that payload rather than on a separate type.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// Display name, unique within a house
    pub name: String,
    /// Hiding-place payload, present only for locations that support hiding
    pub hiding_place: Option<HidingPlace>,
    exits: Vec<(Direction, LocationId)>,
}

/// The hiding-capable part of a location.
#[derive(Debug, Clone, PartialEq)]
pub struct HidingPlace {
    /// Descriptive phrase completing "hiding ..." sentences,
    /// e.g. "behind the door"
    pub description: String,
    /// Names of opponents currently hidden here; empty until placement runs
    pub hidden_opponents: Vec<String>,
}

impl Location {
    /// Creates a plain location with no exits and no hiding place.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hiding_place: None,
            exits: Vec::new(),
        }
    }

    /// Creates a location with a hiding place.
    ///
    /// # Examples
    ///
    /// ```
    /// use hideseek::Location;
    ///
    /// let bathroom = Location::with_hiding_place("Bathroom", "behind the door");
    /// assert!(bathroom.is_hiding_spot());
    /// ```
    pub fn with_hiding_place(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hiding_place: Some(HidingPlace {
                description: description.into(),
                hidden_opponents: Vec::new(),
            }),
            exits: Vec::new(),
        }
    }

    /// Whether this location can conceal opponents.
    pub fn is_hiding_spot(&self) -> bool {
        self.hiding_place.is_some()
    }

    /// Returns the exit registered for `direction`, if any.
    pub fn exit(&self, direction: Direction) -> Option<LocationId> {
        self.exits
            .iter()
            .find(|(d, _)| *d == direction)
            .map(|(_, id)| *id)
    }

    /// Records `exits[direction] = target`.
    ///
    /// A new direction is appended, preserving insertion order; an existing
    /// direction is overwritten in place.
    pub fn set_exit(&mut self, direction: Direction, target: LocationId) {
        match self.exits.iter_mut().find(|(d, _)| *d == direction) {
            Some(entry) => entry.1 = target,
            None => self.exits.push((direction, target)),
        }
    }

    /// Exits in insertion order.
    pub fn exits(&self) -> &[(Direction, LocationId)] {
        &self.exits
    }

    /// Number of registered exits.
    pub fn exit_count(&self) -> usize {
        self.exits.len()
    }

    /// Records an opponent as hidden at this location.
    ///
    /// Fails if the location has no hiding place.
    pub fn hide_opponent(&mut self, opponent: impl Into<String>) -> HideSeekResult<()> {
        match &mut self.hiding_place {
            Some(hiding_place) => {
                hiding_place.hidden_opponents.push(opponent.into());
                Ok(())
            }
            None => Err(HideSeekError::Structure(format!(
                "location \"{}\" does not have a hiding place",
                self.name
            ))),
        }
    }

    /// Removes all hidden opponents from this location.
    pub fn clear_hidden_opponents(&mut self) {
        if let Some(hiding_place) = &mut self.hiding_place {
            hiding_place.hidden_opponents.clear();
        }
    }
}
