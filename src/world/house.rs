//! # House Module
//!
//! The complete validated location graph plus identity and starting point.
//!
//! A `House` owns every [`Location`] in an arena; exits refer to other
//! locations by [`LocationId`]. Construction helpers wire both endpoints of
//! a corridor in one call, and the whole graph moves in and out of a JSON
//! layout document with validation on the way in.

use crate::utils::{is_valid_file_name, with_json_extension, FileAccess, RandomSource};
use crate::{Direction, HideSeekError, HideSeekResult, Location, LocationId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The house a game is played in.
#[derive(Debug, Clone, PartialEq)]
pub struct House {
    /// Display name of the house
    pub name: String,
    /// File name (without extension) the layout is stored under
    pub file_name: String,
    starting_location: LocationId,
    locations: Vec<Location>,
}

/// Serialized form of a house layout.
///
/// Locations are split into two arrays by whether they carry a hiding
/// place; exits are stored as direction-name → location-name maps in exit
/// insertion order, so serialization is idempotent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseDocument {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "HouseFileName")]
    pub house_file_name: String,
    #[serde(rename = "PlayerStartingPoint")]
    pub player_starting_point: String,
    #[serde(rename = "LocationsWithoutHidingPlaces")]
    pub locations_without_hiding_places: Vec<LocationDocument>,
    #[serde(rename = "LocationsWithHidingPlaces")]
    pub locations_with_hiding_places: Vec<LocationDocument>,
}

/// Serialized form of a single location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationDocument {
    #[serde(
        rename = "HidingPlace",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub hiding_place: Option<String>,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "ExitsForSerialization")]
    pub exits: IndexMap<String, String>,
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

impl House {
    /// Creates a house containing only its starting location.
    ///
    /// Further locations are attached with [`connect_location`] and
    /// [`connect_hiding_spot`], which wire exits in both directions.
    ///
    /// [`connect_location`]: House::connect_location
    /// [`connect_hiding_spot`]: House::connect_hiding_spot
    ///
    /// # Examples
    ///
    /// ```
    /// use hideseek::{Direction, House};
    ///
    /// let mut house = House::new("my house", "DefaultHouse", "Entry");
    /// let entry = house.starting_location();
    /// let hallway = house.connect_location(entry, Direction::East, "Hallway");
    /// house.connect_hiding_spot(hallway, Direction::North, "Bathroom", "behind the door");
    ///
    /// assert_eq!(house.location(entry).exit(Direction::East), Some(hallway));
    /// assert_eq!(house.location(hallway).exit(Direction::West), Some(entry));
    /// ```
    pub fn new(
        name: impl Into<String>,
        file_name: impl Into<String>,
        starting_location_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            file_name: file_name.into(),
            starting_location: 0,
            locations: vec![Location::new(starting_location_name)],
        }
    }

    /// Adds a detached location to the house and returns its id.
    pub fn add_location(&mut self, location: Location) -> LocationId {
        self.locations.push(location);
        self.locations.len() - 1
    }

    /// Records an exit from `from` to `to` in `direction`.
    ///
    /// Unless `to` already has an exit in the opposite direction, the
    /// reciprocal exit back to `from` is recorded as well, so a single call
    /// builds a two-way corridor.
    pub fn add_exit(&mut self, from: LocationId, direction: Direction, to: LocationId) {
        self.locations[from].set_exit(direction, to);
        if self.locations[to].exit(direction.opposite()).is_none() {
            self.locations[to].set_exit(direction.opposite(), from);
        }
    }

    /// Creates a new plain location, wires it to `from` in both directions,
    /// and returns its id so construction can chain from it.
    pub fn connect_location(
        &mut self,
        from: LocationId,
        direction: Direction,
        name: impl Into<String>,
    ) -> LocationId {
        let id = self.add_location(Location::new(name));
        self.add_exit(from, direction, id);
        id
    }

    /// Creates a new hiding-capable location, wires it to `from` in both
    /// directions, and returns its id.
    pub fn connect_hiding_spot(
        &mut self,
        from: LocationId,
        direction: Direction,
        name: impl Into<String>,
        hiding_place: impl Into<String>,
    ) -> LocationId {
        let id = self.add_location(Location::with_hiding_place(name, hiding_place));
        self.add_exit(from, direction, id);
        id
    }

    /// The location the player starts in.
    pub fn starting_location(&self) -> LocationId {
        self.starting_location
    }

    /// Borrows a location by id.
    pub fn location(&self, id: LocationId) -> &Location {
        &self.locations[id]
    }

    /// Mutably borrows a location by id.
    pub fn location_mut(&mut self, id: LocationId) -> &mut Location {
        &mut self.locations[id]
    }

    /// All locations in construction order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Looks a location up by exact name.
    pub fn find_location(&self, name: &str) -> Option<LocationId> {
        self.locations.iter().position(|location| location.name == name)
    }

    /// Ids of all hiding-capable locations, in construction order.
    pub fn hiding_spots(&self) -> Vec<LocationId> {
        self.locations
            .iter()
            .enumerate()
            .filter(|(_, location)| location.is_hiding_spot())
            .map(|(id, _)| id)
            .collect()
    }

    /// Returns the location reached by leaving `from` in `direction`.
    ///
    /// Fails when no exit is registered for that direction; the caller is
    /// never silently returned in its place.
    pub fn exit_target(&self, from: LocationId, direction: Direction) -> HideSeekResult<LocationId> {
        let location = &self.locations[from];
        location.exit(direction).ok_or_else(|| {
            HideSeekError::Structure(format!(
                "the {} has no exit going {}",
                location.name, direction
            ))
        })
    }

    /// Picks one exit of `from` uniformly at random.
    pub fn random_exit(
        &self,
        from: LocationId,
        random: &mut dyn RandomSource,
    ) -> HideSeekResult<LocationId> {
        let location = &self.locations[from];
        if location.exit_count() == 0 {
            return Err(HideSeekError::Structure(format!(
                "location \"{}\" must have at least one exit",
                location.name
            )));
        }
        let index = random.next_index(location.exit_count());
        Ok(location.exits()[index].1)
    }

    /// Picks one hiding-capable location uniformly at random.
    pub fn random_hiding_spot(&self, random: &mut dyn RandomSource) -> HideSeekResult<LocationId> {
        let spots = self.hiding_spots();
        if spots.is_empty() {
            return Err(HideSeekError::Structure(
                "locations with hiding places list is empty".to_string(),
            ));
        }
        Ok(spots[random.next_index(spots.len())])
    }

    /// Human-readable exit descriptions for a location, one per exit in
    /// insertion order.
    ///
    /// Compass exits read "the Hallway is to the East"; Up/Down/In/Out exits
    /// read "the Attic is Up".
    pub fn exit_lines(&self, id: LocationId) -> Vec<String> {
        self.locations[id]
            .exits()
            .iter()
            .map(|(direction, target)| {
                let target_name = &self.locations[*target].name;
                if direction.uses_to_the() {
                    format!("the {} is to the {}", target_name, direction)
                } else {
                    format!("the {} is {}", target_name, direction)
                }
            })
            .collect()
    }

    /// Removes all hidden opponents from every hiding place.
    pub fn clear_hidden_opponents(&mut self) {
        for location in &mut self.locations {
            location.clear_hidden_opponents();
        }
    }

    /// Checks the structural invariants every playable house satisfies:
    /// every location has at least one exit and at least one location has a
    /// hiding place.
    pub fn validate(&self) -> HideSeekResult<()> {
        for location in &self.locations {
            if location.exit_count() == 0 {
                return Err(HideSeekError::Structure(format!(
                    "location \"{}\" must have at least one exit",
                    location.name
                )));
            }
        }
        if !self.locations.iter().any(Location::is_hiding_spot) {
            return Err(HideSeekError::Structure(
                "locations with hiding places list is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Serializes the house to a layout document.
    pub fn to_document(&self) -> HouseDocument {
        let serialize = |location: &Location| LocationDocument {
            hiding_place: location
                .hiding_place
                .as_ref()
                .map(|hiding_place| hiding_place.description.clone()),
            name: location.name.clone(),
            exits: location
                .exits()
                .iter()
                .map(|(direction, target)| {
                    (direction.to_string(), self.locations[*target].name.clone())
                })
                .collect(),
        };

        HouseDocument {
            name: self.name.clone(),
            house_file_name: self.file_name.clone(),
            player_starting_point: self.locations[self.starting_location].name.clone(),
            locations_without_hiding_places: self
                .locations
                .iter()
                .filter(|location| !location.is_hiding_spot())
                .map(serialize)
                .collect(),
            locations_with_hiding_places: self
                .locations
                .iter()
                .filter(|location| location.is_hiding_spot())
                .map(serialize)
                .collect(),
        }
    }

    /// Builds and validates a house from a layout document.
    ///
    /// Runs in two passes: first every location shell (name plus raw
    /// exit-name map) is created, then every raw exit name is resolved
    /// against the full location set. All validation failures name the
    /// specific violation.
    pub fn from_document(document: HouseDocument) -> HideSeekResult<Self> {
        if is_blank(&document.name) {
            return Err(HideSeekError::Naming(format!(
                "house name \"{}\" is invalid (is empty or contains only whitespace)",
                document.name
            )));
        }
        if !is_valid_file_name(&document.house_file_name) {
            return Err(HideSeekError::Naming(format!(
                "house file name \"{}\" is invalid (is empty or contains only whitespace or has invalid characters)",
                document.house_file_name
            )));
        }

        // Pass 1: location shells, plain locations first to match document order.
        let mut house = Self {
            name: document.name,
            file_name: document.house_file_name,
            starting_location: 0,
            locations: Vec::new(),
        };
        let mut exit_maps: Vec<IndexMap<String, String>> = Vec::new();

        for shell in &document.locations_without_hiding_places {
            if is_blank(&shell.name) {
                return Err(HideSeekError::Naming(format!(
                    "location name \"{}\" is invalid (is empty or contains only whitespace)",
                    shell.name
                )));
            }
            house.add_location(Location::new(shell.name.clone()));
            exit_maps.push(shell.exits.clone());
        }
        for shell in &document.locations_with_hiding_places {
            if is_blank(&shell.name) {
                return Err(HideSeekError::Naming(format!(
                    "location name \"{}\" is invalid (is empty or contains only whitespace)",
                    shell.name
                )));
            }
            let description = shell.hiding_place.as_deref().unwrap_or("");
            if is_blank(description) {
                return Err(HideSeekError::Naming(format!(
                    "hiding place for location \"{}\" is invalid (is empty or contains only whitespace)",
                    shell.name
                )));
            }
            house.add_location(Location::with_hiding_place(shell.name.clone(), description));
            exit_maps.push(shell.exits.clone());
        }

        // Pass 2: resolve raw exit names into real exits. Both sides of every
        // corridor are listed explicitly, so no reciprocation happens here.
        for (id, exits) in exit_maps.into_iter().enumerate() {
            for (token, target_name) in exits {
                let direction = Direction::from_token(&token).ok_or_else(|| {
                    HideSeekError::Structure(format!(
                        "location \"{}\": \"{}\" is not a valid direction",
                        house.locations[id].name, token
                    ))
                })?;
                if is_blank(&target_name) {
                    return Err(HideSeekError::Naming(format!(
                        "location \"{}\": exit location name for direction \"{}\" is invalid (is empty or contains only whitespace)",
                        house.locations[id].name, direction
                    )));
                }
                let target = house.find_location(&target_name).ok_or_else(|| {
                    HideSeekError::Structure(format!(
                        "location \"{}\": exit location \"{}\" in direction \"{}\" does not exist",
                        house.locations[id].name, target_name, direction
                    ))
                })?;
                house.locations[id].set_exit(direction, target);
            }
        }

        house.starting_location = house
            .find_location(&document.player_starting_point)
            .ok_or_else(|| {
                HideSeekError::Reference(format!(
                    "starting point location \"{}\" does not exist in House",
                    document.player_starting_point
                ))
            })?;

        house.validate()?;
        Ok(house)
    }

    /// Serializes the house to a JSON layout string.
    pub fn to_json(&self) -> HideSeekResult<String> {
        serde_json::to_string_pretty(&self.to_document()).map_err(HideSeekError::from)
    }

    /// Parses and validates a house from a JSON layout string.
    pub fn from_json(json: &str) -> HideSeekResult<Self> {
        let document: HouseDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// Loads a house layout from `{file_name}.json` through the injected
    /// file access.
    ///
    /// Parse and validation failures are wrapped with the layout file's name
    /// so callers see which document was at fault.
    pub fn load(file_name: &str, files: &dyn FileAccess) -> HideSeekResult<Self> {
        if !is_valid_file_name(file_name) {
            return Err(HideSeekError::Naming(format!(
                "house file name \"{}\" is invalid (is empty or contains only whitespace or has invalid characters)",
                file_name
            )));
        }
        let path = with_json_extension(file_name);
        if !files.exists(&path) {
            return Err(HideSeekError::NotFound(format!(
                "house layout file {} does not exist",
                file_name
            )));
        }
        let text = files.read_text(&path)?;
        Self::from_json(&text).map_err(|source| HideSeekError::Corrupt {
            context: format!("data in house layout file {} is invalid", file_name),
            source: Box::new(source),
        })
    }

    /// Writes the house layout to `{file_name}.json` through the injected
    /// file access, overwriting any existing layout.
    pub fn save(&self, files: &mut dyn FileAccess) -> HideSeekResult<()> {
        let path = with_json_extension(&self.file_name);
        files.write_text(&path, &self.to_json()?)?;
        Ok(())
    }

    /// Builds the default house layout shipped with the game.
    ///
    /// Three plain locations (Entry, Hallway, Landing) and eleven hiding
    /// spots spread over two floors and a garage.
    pub fn default_layout() -> Self {
        use crate::config::DEFAULT_HOUSE_FILE_NAME;

        let mut house = House::new("my house", DEFAULT_HOUSE_FILE_NAME, "Entry");
        let entry = house.starting_location();

        house.connect_hiding_spot(entry, Direction::Out, "Garage", "behind the car");
        let hallway = house.connect_location(entry, Direction::East, "Hallway");
        house.connect_hiding_spot(hallway, Direction::Northwest, "Kitchen", "next to the stove");
        house.connect_hiding_spot(hallway, Direction::North, "Bathroom", "behind the door");
        house.connect_hiding_spot(hallway, Direction::South, "Living Room", "behind the sofa");
        let landing = house.connect_location(hallway, Direction::Up, "Landing");
        house.connect_hiding_spot(landing, Direction::Up, "Attic", "in a trunk");
        house.connect_hiding_spot(landing, Direction::Southeast, "Kids Room", "in the closet");
        let master_bedroom =
            house.connect_hiding_spot(landing, Direction::Northwest, "Master Bedroom", "under the bed");
        house.connect_hiding_spot(landing, Direction::Southwest, "Nursery", "behind the changing table");
        house.connect_hiding_spot(landing, Direction::South, "Pantry", "inside a cabinet");
        house.connect_hiding_spot(landing, Direction::North, "Second Bathroom", "in the shower");
        house.connect_hiding_spot(master_bedroom, Direction::East, "Master Bath", "in the tub");

        house
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::SequenceSource;

    fn corridor_house() -> House {
        let mut house = House::new("test house", "TestHouse", "Entry");
        let entry = house.starting_location();
        let hallway = house.connect_location(entry, Direction::East, "Hallway");
        house.connect_hiding_spot(hallway, Direction::North, "Bathroom", "behind the door");
        house
    }

    #[test]
    fn test_add_exit_is_reciprocal() {
        let house = corridor_house();
        let entry = house.find_location("Entry").unwrap();
        let hallway = house.find_location("Hallway").unwrap();
        let bathroom = house.find_location("Bathroom").unwrap();

        assert_eq!(house.location(entry).exit(Direction::East), Some(hallway));
        assert_eq!(house.location(hallway).exit(Direction::West), Some(entry));
        assert_eq!(house.location(hallway).exit(Direction::North), Some(bathroom));
        assert_eq!(house.location(bathroom).exit(Direction::South), Some(hallway));
    }

    #[test]
    fn test_add_exit_does_not_overwrite_populated_reciprocal() {
        let mut house = House::new("test house", "TestHouse", "Entry");
        let entry = house.starting_location();
        let hallway = house.connect_location(entry, Direction::East, "Hallway");
        let closet = house.add_location(Location::with_hiding_place("Closet", "behind the coats"));

        // Hallway already has a West exit back to the Entry; connecting the
        // closet Eastward from it must leave that exit alone.
        house.add_exit(closet, Direction::East, hallway);

        assert_eq!(house.location(closet).exit(Direction::East), Some(hallway));
        assert_eq!(house.location(hallway).exit(Direction::West), Some(entry));
    }

    #[test]
    fn test_exit_target_missing_direction_is_an_error() {
        let house = corridor_house();
        let entry = house.find_location("Entry").unwrap();

        let error = house.exit_target(entry, Direction::Up).unwrap_err();
        assert_eq!(error.to_string(), "the Entry has no exit going Up");
    }

    #[test]
    fn test_exit_lines_phrasing() {
        let mut house = House::new("test house", "TestHouse", "Entry");
        let entry = house.starting_location();
        house.connect_location(entry, Direction::East, "Hallway");
        house.connect_hiding_spot(entry, Direction::Up, "Attic", "in a trunk");
        house.connect_hiding_spot(entry, Direction::Out, "Garage", "behind the car");

        assert_eq!(
            house.exit_lines(entry),
            vec![
                "the Hallway is to the East",
                "the Attic is Up",
                "the Garage is Out",
            ]
        );
    }

    #[test]
    fn test_random_exit_picks_by_index() {
        let mut house = House::new("test house", "TestHouse", "Entry");
        let entry = house.starting_location();
        let hallway = house.connect_location(entry, Direction::East, "Hallway");
        let garage = house.connect_hiding_spot(entry, Direction::Out, "Garage", "behind the car");

        let mut random = SequenceSource::new(vec![1, 0]);
        assert_eq!(house.random_exit(entry, &mut random).unwrap(), garage);
        assert_eq!(house.random_exit(entry, &mut random).unwrap(), hallway);
    }

    #[test]
    fn test_random_hiding_spot() {
        let house = corridor_house();
        let bathroom = house.find_location("Bathroom").unwrap();

        let mut random = SequenceSource::new(vec![0]);
        assert_eq!(house.random_hiding_spot(&mut random).unwrap(), bathroom);
    }

    #[test]
    fn test_validate_rejects_exitless_location() {
        let mut house = corridor_house();
        house.add_location(Location::new("Oubliette"));

        let error = house.validate().unwrap_err();
        assert_eq!(
            error.to_string(),
            "location \"Oubliette\" must have at least one exit"
        );
    }

    #[test]
    fn test_validate_requires_a_hiding_place() {
        let mut house = House::new("test house", "TestHouse", "Entry");
        let entry = house.starting_location();
        house.connect_location(entry, Direction::East, "Hallway");

        let error = house.validate().unwrap_err();
        assert_eq!(error.to_string(), "locations with hiding places list is empty");
    }

    #[test]
    fn test_default_layout_is_valid() {
        let house = House::default_layout();
        house.validate().unwrap();

        assert_eq!(house.name, "my house");
        assert_eq!(house.file_name, "DefaultHouse");
        assert_eq!(house.locations().len(), 14);
        assert_eq!(house.hiding_spots().len(), 11);
        assert_eq!(
            house.starting_location(),
            house.find_location("Entry").unwrap()
        );
    }

    #[test]
    fn test_round_trip_preserves_exit_order() {
        let original = House::default_layout();
        let json = original.to_json().unwrap();
        let reloaded = House::from_json(&json).unwrap();

        let landing = reloaded.find_location("Landing").unwrap();
        let original_landing = original.find_location("Landing").unwrap();
        let reloaded_directions: Vec<Direction> = reloaded
            .location(landing)
            .exits()
            .iter()
            .map(|(direction, _)| *direction)
            .collect();
        let original_directions: Vec<Direction> = original
            .location(original_landing)
            .exits()
            .iter()
            .map(|(direction, _)| *direction)
            .collect();
        assert_eq!(reloaded_directions, original_directions);
    }

    #[test]
    fn test_serialization_is_idempotent() {
        let original = House::default_layout();
        let json = original.to_json().unwrap();
        let reloaded = House::from_json(&json).unwrap();

        assert_eq!(reloaded.to_json().unwrap(), json);
    }

    #[test]
    fn test_from_document_rejects_unknown_exit_target() {
        let mut document = House::default_layout().to_document();
        document.locations_without_hiding_places[0]
            .exits
            .insert("North".to_string(), "Conservatory".to_string());

        let error = House::from_document(document).unwrap_err();
        assert_eq!(
            error.to_string(),
            "location \"Entry\": exit location \"Conservatory\" in direction \"North\" does not exist"
        );
    }

    #[test]
    fn test_from_document_rejects_unknown_direction_token() {
        let mut document = House::default_layout().to_document();
        document.locations_without_hiding_places[0]
            .exits
            .insert("Sideways".to_string(), "Hallway".to_string());

        let error = House::from_document(document).unwrap_err();
        assert_eq!(
            error.to_string(),
            "location \"Entry\": \"Sideways\" is not a valid direction"
        );
    }

    #[test]
    fn test_from_document_rejects_blank_house_name() {
        let mut document = House::default_layout().to_document();
        document.name = "   ".to_string();

        let error = House::from_document(document).unwrap_err();
        assert_eq!(
            error.to_string(),
            "house name \"   \" is invalid (is empty or contains only whitespace)"
        );
    }

    #[test]
    fn test_from_document_rejects_bad_file_name() {
        let mut document = House::default_layout().to_document();
        document.house_file_name = "my house".to_string();

        let error = House::from_document(document).unwrap_err();
        assert_eq!(
            error.to_string(),
            "house file name \"my house\" is invalid (is empty or contains only whitespace or has invalid characters)"
        );
    }

    #[test]
    fn test_from_document_rejects_missing_starting_point() {
        let mut document = House::default_layout().to_document();
        document.player_starting_point = "Vestibule".to_string();

        let error = House::from_document(document).unwrap_err();
        assert_eq!(
            error.to_string(),
            "starting point location \"Vestibule\" does not exist in House"
        );
    }

    #[test]
    fn test_from_document_rejects_blank_hiding_place() {
        let mut document = House::default_layout().to_document();
        document.locations_with_hiding_places[0].hiding_place = Some("  ".to_string());

        let error = House::from_document(document).unwrap_err();
        assert_eq!(
            error.to_string(),
            "hiding place for location \"Garage\" is invalid (is empty or contains only whitespace)"
        );
    }
}
