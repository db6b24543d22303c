//! # Placement Module
//!
//! The randomized walk that decides where each opponent hides.

use crate::utils::RandomSource;
use crate::{HideSeekResult, House, LocationId, Opponent};

/// Where an opponent's walk begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalkStart {
    /// Every walk starts from the house's starting location.
    Entry,
    /// Each walk starts where the previous opponent came to rest; the first
    /// starts from the house's starting location.
    #[default]
    PreviousSpot,
}

/// Picks hiding locations for opponents by walking the house graph.
///
/// A walk repeatedly takes a uniformly random exit, one random draw per
/// step, until the newly reached location has a hiding place. Walks may
/// revisit locations; they terminate because every playable house has at
/// least one hiding spot reachable through its reciprocal exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlacementWalker {
    /// Start-point policy for the 2nd..Nth opponent
    pub start: WalkStart,
}

impl PlacementWalker {
    /// Creates a walker with the given start-point policy.
    pub fn new(start: WalkStart) -> Self {
        Self { start }
    }

    /// Walks from `from` until reaching a hiding spot.
    ///
    /// The walk always takes at least one step, so an opponent standing on
    /// a hiding spot still wanders before settling.
    pub fn walk(
        &self,
        house: &House,
        from: LocationId,
        random: &mut dyn RandomSource,
    ) -> HideSeekResult<LocationId> {
        let mut current = from;
        loop {
            current = house.random_exit(current, random)?;
            if house.location(current).is_hiding_spot() {
                return Ok(current);
            }
        }
    }

    /// Hides every opponent in turn, recording occupancy at each landing
    /// spot, and returns the roster pairing in opponent order.
    pub fn hide_all(
        &self,
        house: &mut House,
        opponents: &[Opponent],
        random: &mut dyn RandomSource,
    ) -> HideSeekResult<Vec<(Opponent, LocationId)>> {
        let mut placements = Vec::with_capacity(opponents.len());
        let mut from = house.starting_location();

        for opponent in opponents {
            let spot = self.walk(house, from, random)?;
            house.location_mut(spot).hide_opponent(opponent.name.clone())?;
            log::debug!("{} hides at the {}", opponent, house.location(spot).name);
            placements.push((opponent.clone(), spot));
            from = match self.start {
                WalkStart::Entry => house.starting_location(),
                WalkStart::PreviousSpot => spot,
            };
        }

        Ok(placements)
    }
}
