//! # Game State Module
//!
//! The per-session controller coordinating movement, searching, and
//! persistence.
//!
//! A `GameController` owns one house for the lifetime of a session, tracks
//! where the player is and which opponents have been found, and exposes the
//! whole game as a text-command surface. Every operation either fully
//! commits its effects or leaves the session exactly as it was.

use crate::input::{parse_command, Command};
use crate::utils::{is_valid_file_name, with_json_extension, FileAccess, RandomSource};
use crate::{
    Direction, HideSeekError, HideSeekResult, House, LocationId, Opponent, PlacementWalker,
    ResolvedSession, SavedGameRecord,
};
use std::collections::HashSet;

/// Orchestrates a play session.
pub struct GameController {
    house: House,
    current_location: LocationId,
    move_number: u32,
    opponents_and_hiding_locations: Vec<(Opponent, LocationId)>,
    found_opponents: Vec<Opponent>,
    walker: PlacementWalker,
    files: Box<dyn FileAccess>,
    random: Box<dyn RandomSource>,
}

impl std::fmt::Debug for GameController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameController")
            .field("house", &self.house)
            .field("current_location", &self.current_location)
            .field("move_number", &self.move_number)
            .field(
                "opponents_and_hiding_locations",
                &self.opponents_and_hiding_locations,
            )
            .field("found_opponents", &self.found_opponents)
            .field("walker", &self.walker)
            .finish_non_exhaustive()
    }
}

fn validate_file_name(file_name: &str) -> HideSeekResult<()> {
    if is_valid_file_name(file_name) {
        Ok(())
    } else {
        Err(HideSeekError::Naming(format!(
            "file name \"{}\" is invalid (is empty or contains only whitespace or has invalid characters)",
            file_name
        )))
    }
}

impl GameController {
    /// Starts a session in `house`, hiding every opponent with the default
    /// placement walk.
    ///
    /// The move counter starts at 1 and the player starts at the house's
    /// starting location.
    pub fn new(
        house: House,
        opponents: Vec<Opponent>,
        files: Box<dyn FileAccess>,
        random: Box<dyn RandomSource>,
    ) -> HideSeekResult<Self> {
        Self::with_walker(house, opponents, PlacementWalker::default(), files, random)
    }

    /// Starts a session with an explicit placement-walk policy.
    pub fn with_walker(
        house: House,
        opponents: Vec<Opponent>,
        walker: PlacementWalker,
        files: Box<dyn FileAccess>,
        random: Box<dyn RandomSource>,
    ) -> HideSeekResult<Self> {
        if opponents.is_empty() {
            return Err(HideSeekError::Structure(
                "opponents list is empty".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for opponent in &opponents {
            if !seen.insert(opponent.name.as_str()) {
                return Err(HideSeekError::Structure(format!(
                    "opponent \"{}\" appears more than once",
                    opponent.name
                )));
            }
        }
        house.validate()?;

        let mut controller = Self {
            current_location: house.starting_location(),
            house,
            move_number: 1,
            opponents_and_hiding_locations: Vec::new(),
            found_opponents: Vec::new(),
            walker,
            files,
            random,
        };
        controller.opponents_and_hiding_locations = controller.walker.hide_all(
            &mut controller.house,
            &opponents,
            controller.random.as_mut(),
        )?;
        Ok(controller)
    }

    /// The house this session is played in.
    pub fn house(&self) -> &House {
        &self.house
    }

    /// Id of the player's current location.
    pub fn current_location(&self) -> LocationId {
        self.current_location
    }

    /// Name of the player's current location.
    pub fn current_location_name(&self) -> &str {
        &self.house.location(self.current_location).name
    }

    /// 1-based counter of consumed turns.
    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    /// The session roster in hiding order.
    pub fn opponents(&self) -> Vec<Opponent> {
        self.opponents_and_hiding_locations
            .iter()
            .map(|(opponent, _)| opponent.clone())
            .collect()
    }

    /// Opponents found so far, in the order they were found.
    pub fn found_opponents(&self) -> &[Opponent] {
        &self.found_opponents
    }

    /// Whether every opponent has been found.
    pub fn game_over(&self) -> bool {
        self.found_opponents.len() == self.opponents_and_hiding_locations.len()
    }

    /// Moves the player through the exit in `direction`.
    ///
    /// A successful move consumes a turn; trying a direction with no exit
    /// does not.
    pub fn move_player(&mut self, direction: Direction) -> String {
        match self.house.location(self.current_location).exit(direction) {
            Some(target) => {
                self.current_location = target;
                self.move_number += 1;
                format!("Moving {}", direction)
            }
            None => "There's no exit in that direction".to_string(),
        }
    }

    /// Searches the current location's hiding place.
    ///
    /// Checking consumes a turn whether or not anything (or anywhere) was
    /// found. Newly revealed opponents are appended to the found list in
    /// the order they were hidden here.
    pub fn check(&mut self) -> String {
        self.move_number += 1;
        let location = self.house.location(self.current_location);
        let Some(hiding_place) = &location.hiding_place else {
            return format!("There is no hiding place in the {}", location.name);
        };

        let newly_found: Vec<Opponent> = hiding_place
            .hidden_opponents
            .iter()
            .filter(|name| !self.found_opponents.iter().any(|found| found.name == **name))
            .map(|name| Opponent::new(name.clone()))
            .collect();
        let message = match newly_found.len() {
            0 => format!("Nobody was hiding {}", hiding_place.description),
            1 => format!("You found 1 opponent hiding {}", hiding_place.description),
            count => format!(
                "You found {} opponents hiding {}",
                count, hiding_place.description
            ),
        };
        self.found_opponents.extend(newly_found);
        message
    }

    /// Moves the player to a uniformly random hiding spot. Counts as a move.
    pub fn teleport(&mut self) -> HideSeekResult<String> {
        let spot = self.house.random_hiding_spot(self.random.as_mut())?;
        self.current_location = spot;
        self.move_number += 1;
        Ok(format!(
            "Teleporting to random location with hiding place: {}",
            self.house.location(spot).name
        ))
    }

    /// Describes the current location, its exits, and the player's
    /// progress. Derived; does not consume a turn.
    pub fn status(&self) -> String {
        let location = self.house.location(self.current_location);
        let mut status = format!(
            "You are in the {}. You see the following exits:",
            location.name
        );
        for line in self.house.exit_lines(self.current_location) {
            status.push_str("\n - ");
            status.push_str(&line);
        }
        if let Some(hiding_place) = &location.hiding_place {
            status.push_str(&format!("\nSomeone could hide {}", hiding_place.description));
        }
        if self.found_opponents.is_empty() {
            status.push_str("\nYou have not found any opponents");
        } else {
            let names: Vec<&str> = self
                .found_opponents
                .iter()
                .map(|opponent| opponent.name.as_str())
                .collect();
            status.push_str(&format!(
                "\nYou have found {} of {} opponents: {}",
                self.found_opponents.len(),
                self.opponents_and_hiding_locations.len(),
                names.join(", ")
            ));
        }
        status
    }

    /// The input prompt for the current turn. Derived; does not consume a
    /// turn.
    pub fn prompt(&self) -> String {
        let check_hint = if self.house.location(self.current_location).is_hiding_spot() {
            " (or type 'check')"
        } else {
            ""
        };
        format!(
            "{}: Which direction do you want to go{}: ",
            self.move_number, check_hint
        )
    }

    /// Routes one line of player input to the matching operation and
    /// returns its message. Errors are flattened to their display text;
    /// they never escape this surface.
    pub fn parse_input(&mut self, input: &str) -> String {
        match parse_command(input) {
            Some(Command::Move(direction)) => self.move_player(direction),
            Some(Command::Check) => self.check(),
            Some(Command::Teleport) => self
                .teleport()
                .unwrap_or_else(|error| error.to_string()),
            Some(Command::Save(name)) => self
                .save_game(&name)
                .unwrap_or_else(|error| error.to_string()),
            Some(Command::Load(name)) => self
                .load_game(&name)
                .unwrap_or_else(|error| error.to_string()),
            Some(Command::Delete(name)) => self
                .delete_game(&name)
                .unwrap_or_else(|error| error.to_string()),
            None => "That's not a valid direction".to_string(),
        }
    }

    /// Restarts the session: opponents are re-hidden with fresh walks, the
    /// player returns to the starting location, and the counter resets.
    pub fn restart(&mut self) -> HideSeekResult<()> {
        self.house.clear_hidden_opponents();
        let opponents = self.opponents();
        self.opponents_and_hiding_locations =
            self.walker
                .hide_all(&mut self.house, &opponents, self.random.as_mut())?;
        self.current_location = self.house.starting_location();
        self.move_number = 1;
        self.found_opponents.clear();
        Ok(())
    }

    /// Re-hides every opponent at the named locations, bypassing the random
    /// walk. Names pair with the roster in order; each must resolve to a
    /// hiding spot. Does not consume a turn; the found list is untouched.
    pub fn rehide_all(&mut self, location_names: &[String]) -> HideSeekResult<()> {
        if location_names.len() != self.opponents_and_hiding_locations.len() {
            return Err(HideSeekError::Structure(format!(
                "expected {} hiding locations but got {}",
                self.opponents_and_hiding_locations.len(),
                location_names.len()
            )));
        }

        // Resolve every name before touching any state.
        let mut spots = Vec::with_capacity(location_names.len());
        for ((opponent, _), name) in self.opponents_and_hiding_locations.iter().zip(location_names)
        {
            let spot = self.house.find_location(name).ok_or_else(|| {
                HideSeekError::Reference(format!(
                    "hiding location \"{}\" for opponent \"{}\" does not exist in House",
                    name, opponent.name
                ))
            })?;
            if !self.house.location(spot).is_hiding_spot() {
                return Err(HideSeekError::Reference(format!(
                    "location \"{}\" for opponent \"{}\" is not a hiding place",
                    name, opponent.name
                )));
            }
            spots.push(spot);
        }

        self.house.clear_hidden_opponents();
        for (index, spot) in spots.into_iter().enumerate() {
            let name = self.opponents_and_hiding_locations[index].0.name.clone();
            self.house.location_mut(spot).hide_opponent(name)?;
            self.opponents_and_hiding_locations[index].1 = spot;
        }
        Ok(())
    }

    /// Snapshots the live session as a saved-game record.
    pub fn to_record(&self) -> SavedGameRecord {
        SavedGameRecord {
            house_file_name: self.house.file_name.clone(),
            player_location: self.house.location(self.current_location).name.clone(),
            move_number: self.move_number,
            opponents_and_hiding_locations: self
                .opponents_and_hiding_locations
                .iter()
                .map(|(opponent, spot)| {
                    (
                        opponent.name.clone(),
                        self.house.location(*spot).name.clone(),
                    )
                })
                .collect(),
            found_opponents: self
                .found_opponents
                .iter()
                .map(|opponent| opponent.name.clone())
                .collect(),
        }
    }

    /// Saves the session to `{file_name}.json`. Does not consume a turn.
    ///
    /// The file name is validated before any I/O, and an existing file is
    /// never overwritten.
    pub fn save_game(&mut self, file_name: &str) -> HideSeekResult<String> {
        validate_file_name(file_name)?;
        let path = with_json_extension(file_name);
        if self.files.exists(&path) {
            return Err(HideSeekError::NotFound(format!(
                "Cannot perform action because a file named {} already exists",
                file_name
            )));
        }
        self.files.write_text(&path, &self.to_record().to_json()?)?;
        log::info!("saved game to {}", path);
        Ok(format!("Saved current game to {}", file_name))
    }

    /// Loads a session from `{file_name}.json`, replacing the live state
    /// atomically on success. Does not consume a turn.
    ///
    /// On any validation failure the live session is left completely
    /// unchanged and the error is wrapped as corrupt data.
    pub fn load_game(&mut self, file_name: &str) -> HideSeekResult<String> {
        validate_file_name(file_name)?;
        let path = with_json_extension(file_name);
        if !self.files.exists(&path) {
            return Err(HideSeekError::NotFound(format!(
                "Cannot load game because file {} does not exist",
                file_name
            )));
        }
        let text = self.files.read_text(&path)?;
        let (house, session) =
            self.resolve_saved_game(&text)
                .map_err(|source| HideSeekError::Corrupt {
                    context: "Cannot process because data is corrupt".to_string(),
                    source: Box::new(source),
                })?;

        self.house = house;
        self.current_location = session.current_location;
        self.move_number = session.move_number;
        self.opponents_and_hiding_locations = session.roster;
        self.found_opponents = session.found;
        log::info!("loaded game from {}", path);
        Ok(format!("Loaded game from {}", file_name))
    }

    /// Parses and fully validates a saved-game document, returning the
    /// house and resolved session to commit. The live session is not
    /// touched.
    fn resolve_saved_game(&self, text: &str) -> HideSeekResult<(House, ResolvedSession)> {
        let record = SavedGameRecord::from_json(text)?;
        if !is_valid_file_name(&record.house_file_name) {
            return Err(HideSeekError::Naming(format!(
                "house file name \"{}\" is invalid (is empty or contains only whitespace or has invalid characters)",
                record.house_file_name
            )));
        }

        let mut house = if record.house_file_name == self.house.file_name {
            let mut house = self.house.clone();
            house.clear_hidden_opponents();
            house
        } else {
            House::load(&record.house_file_name, self.files.as_ref())?
        };

        let session = record.resolve(&house)?;
        for (opponent, spot) in &session.roster {
            house.location_mut(*spot).hide_opponent(opponent.name.clone())?;
        }
        Ok((house, session))
    }

    /// Deletes the saved game at `{file_name}.json`. Does not consume a
    /// turn.
    pub fn delete_game(&mut self, file_name: &str) -> HideSeekResult<String> {
        validate_file_name(file_name)?;
        let path = with_json_extension(file_name);
        if !self.files.exists(&path) {
            return Err(HideSeekError::NotFound(format!(
                "Could not delete game because file {} does not exist",
                file_name
            )));
        }
        self.files.delete(&path)?;
        Ok(format!("Successfully deleted game file {}", file_name))
    }
}
