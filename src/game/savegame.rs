//! # Savegame Module
//!
//! The serializable snapshot of a play session and its validation layer.
//!
//! A record is produced transiently at save time and consumed transiently
//! at load time; everything it references is by name, and every name is
//! resolved against a freshly loaded house before any session state
//! changes.

use crate::{HideSeekError, HideSeekResult, House, LocationId, Opponent};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Snapshot of a session, as stored in a saved-game document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedGameRecord {
    #[serde(rename = "HouseFileName")]
    pub house_file_name: String,
    #[serde(rename = "PlayerLocation")]
    pub player_location: String,
    #[serde(rename = "MoveNumber")]
    pub move_number: u32,
    /// Opponent name → hiding-location name, in roster order
    #[serde(rename = "OpponentsAndHidingLocations")]
    pub opponents_and_hiding_locations: IndexMap<String, String>,
    /// Found opponent names, in the order they were found
    #[serde(rename = "FoundOpponents")]
    pub found_opponents: Vec<String>,
}

/// A record's names resolved against a house, ready to become live session
/// state.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSession {
    pub current_location: LocationId,
    pub move_number: u32,
    pub roster: Vec<(Opponent, LocationId)>,
    pub found: Vec<Opponent>,
}

impl SavedGameRecord {
    /// Serializes the record to a JSON document.
    pub fn to_json(&self) -> HideSeekResult<String> {
        serde_json::to_string_pretty(self).map_err(HideSeekError::from)
    }

    /// Parses a record from a JSON document.
    pub fn from_json(json: &str) -> HideSeekResult<Self> {
        serde_json::from_str(json).map_err(HideSeekError::from)
    }

    /// Validates the record against `house` and resolves every name.
    ///
    /// Checks run in a fixed order: player location, move number, roster
    /// presence and hiding-location resolution (each must name a location
    /// that exists *and* has a hiding place), then found-opponent
    /// membership. The first violation is returned and nothing is mutated.
    pub fn resolve(&self, house: &House) -> HideSeekResult<ResolvedSession> {
        let current_location = house.find_location(&self.player_location).ok_or_else(|| {
            HideSeekError::Reference(format!(
                "player location \"{}\" does not exist in House",
                self.player_location
            ))
        })?;

        if self.move_number < 1 {
            return Err(HideSeekError::Range(format!(
                "move number {} is invalid (must be positive)",
                self.move_number
            )));
        }

        if self.opponents_and_hiding_locations.is_empty() {
            return Err(HideSeekError::Structure(
                "opponents list is empty".to_string(),
            ));
        }

        let mut roster = Vec::with_capacity(self.opponents_and_hiding_locations.len());
        for (opponent_name, location_name) in &self.opponents_and_hiding_locations {
            let spot = house.find_location(location_name).ok_or_else(|| {
                HideSeekError::Reference(format!(
                    "hiding location \"{}\" for opponent \"{}\" does not exist in House",
                    location_name, opponent_name
                ))
            })?;
            if !house.location(spot).is_hiding_spot() {
                return Err(HideSeekError::Reference(format!(
                    "location \"{}\" for opponent \"{}\" is not a hiding place",
                    location_name, opponent_name
                )));
            }
            roster.push((Opponent::new(opponent_name.clone()), spot));
        }

        let mut found = Vec::with_capacity(self.found_opponents.len());
        for name in &self.found_opponents {
            if !self.opponents_and_hiding_locations.contains_key(name) {
                return Err(HideSeekError::Reference(format!(
                    "found opponent \"{}\" is not an opponent",
                    name
                )));
            }
            found.push(Opponent::new(name.clone()));
        }

        Ok(ResolvedSession {
            current_location,
            move_number: self.move_number,
            roster,
            found,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Direction;

    fn corridor_house() -> House {
        let mut house = House::new("test house", "TestHouse", "Entry");
        let entry = house.starting_location();
        let hallway = house.connect_location(entry, Direction::East, "Hallway");
        house.connect_hiding_spot(hallway, Direction::North, "Bathroom", "behind the door");
        house
    }

    fn valid_record() -> SavedGameRecord {
        SavedGameRecord {
            house_file_name: "TestHouse".to_string(),
            player_location: "Hallway".to_string(),
            move_number: 3,
            opponents_and_hiding_locations: IndexMap::from([
                ("Joe".to_string(), "Bathroom".to_string()),
                ("Ana".to_string(), "Bathroom".to_string()),
            ]),
            found_opponents: vec!["Ana".to_string()],
        }
    }

    #[test]
    fn test_record_round_trips_through_json() {
        let record = valid_record();
        let json = record.to_json().unwrap();
        assert_eq!(SavedGameRecord::from_json(&json).unwrap(), record);
    }

    #[test]
    fn test_record_uses_document_field_names() {
        let json = valid_record().to_json().unwrap();
        for key in [
            "\"HouseFileName\"",
            "\"PlayerLocation\"",
            "\"MoveNumber\"",
            "\"OpponentsAndHidingLocations\"",
            "\"FoundOpponents\"",
        ] {
            assert!(json.contains(key), "missing {} in {}", key, json);
        }
    }

    #[test]
    fn test_resolve_valid_record() {
        let house = corridor_house();
        let session = valid_record().resolve(&house).unwrap();

        assert_eq!(session.current_location, house.find_location("Hallway").unwrap());
        assert_eq!(session.move_number, 3);
        assert_eq!(session.roster.len(), 2);
        assert_eq!(session.roster[0].0, Opponent::new("Joe"));
        assert_eq!(session.found, vec![Opponent::new("Ana")]);
    }

    #[test]
    fn test_resolve_rejects_unknown_player_location() {
        let house = corridor_house();
        let mut record = valid_record();
        record.player_location = "Cellar".to_string();

        let error = record.resolve(&house).unwrap_err();
        assert_eq!(
            error.to_string(),
            "player location \"Cellar\" does not exist in House"
        );
    }

    #[test]
    fn test_resolve_rejects_zero_move_number() {
        let house = corridor_house();
        let mut record = valid_record();
        record.move_number = 0;

        let error = record.resolve(&house).unwrap_err();
        assert_eq!(
            error.to_string(),
            "move number 0 is invalid (must be positive)"
        );
    }

    #[test]
    fn test_resolve_rejects_empty_roster() {
        let house = corridor_house();
        let mut record = valid_record();
        record.opponents_and_hiding_locations.clear();
        record.found_opponents.clear();

        let error = record.resolve(&house).unwrap_err();
        assert_eq!(error.to_string(), "opponents list is empty");
    }

    #[test]
    fn test_resolve_rejects_non_hiding_location() {
        let house = corridor_house();
        let mut record = valid_record();
        record
            .opponents_and_hiding_locations
            .insert("Joe".to_string(), "Hallway".to_string());

        let error = record.resolve(&house).unwrap_err();
        assert_eq!(
            error.to_string(),
            "location \"Hallway\" for opponent \"Joe\" is not a hiding place"
        );
    }

    #[test]
    fn test_resolve_rejects_unknown_hiding_location() {
        let house = corridor_house();
        let mut record = valid_record();
        record
            .opponents_and_hiding_locations
            .insert("Joe".to_string(), "Closet".to_string());

        let error = record.resolve(&house).unwrap_err();
        assert_eq!(
            error.to_string(),
            "hiding location \"Closet\" for opponent \"Joe\" does not exist in House"
        );
    }

    #[test]
    fn test_resolve_rejects_found_opponent_outside_roster() {
        let house = corridor_house();
        let mut record = valid_record();
        record.found_opponents.push("Nadia".to_string());

        let error = record.resolve(&house).unwrap_err();
        assert_eq!(
            error.to_string(),
            "found opponent \"Nadia\" is not an opponent"
        );
    }
}
