//! The game state snapshot handed to the bot on every call.
//!
//! The game server is trusted to send the right overall shape, but individual entries
//! are read leniently: a ship or ability entry that cannot be understood is skipped
//! rather than failing the whole decision.
use std::io::Read;

use log::warn;
use serde::{de::IgnoredAny, Deserialize};

use crate::{
    ability::{Ability, AbilitySet},
    board::{Coordinate, FleetSetup, Grid, RectDimensions},
    ships::ShipType,
};

/// Which decision the game is waiting for.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    /// Pick two abilities. Signalled by the absence of `player_ships`.
    AbilitySelection,
    /// Place the next ship. Signalled by fewer ships than the fleet holds.
    Placement,
    /// Fire.
    Combat,
}

/// A value that is kept if it has the expected shape and ignored otherwise.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Valid(T),
    Invalid(IgnoredAny),
}

impl<T> Lenient<T> {
    fn valid(&self) -> Option<&T> {
        match self {
            Lenient::Valid(value) => Some(value),
            Lenient::Invalid(_) => None,
        }
    }
}

/// A list whose entries are individually lenient, and which is itself ignored if it is
/// not a list.
type LenientList<T> = Lenient<Vec<Lenient<T>>>;

fn valid_entries<T>(list: &Option<LenientList<T>>) -> impl Iterator<Item = &T> {
    list.iter()
        .filter_map(|list| list.valid())
        .flat_map(|entries| entries.iter())
        .filter_map(|entry| entry.valid())
}

/// One of the player's own ships as reported by the game.
#[derive(Debug, Clone, Deserialize)]
pub struct OwnShip {
    pub name: String,
    #[serde(default)]
    coordinates: Vec<Lenient<Coordinate>>,
    #[serde(default)]
    pub sunk: bool,
}

impl OwnShip {
    /// The ship type, if the name is one of the fleet's.
    pub fn ship_type(&self) -> Option<ShipType> {
        ShipType::from_name(&self.name)
    }

    /// The cells this ship occupies.
    pub fn coordinates(&self) -> impl '_ + Iterator<Item = Coordinate> {
        self.coordinates.iter().filter_map(|c| c.valid()).copied()
    }
}

/// What the game reveals about one of the opponent's ships.
#[derive(Debug, Clone, Deserialize)]
pub struct ShipReport {
    pub name: String,
    #[serde(default)]
    pub sunk: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct AbilityEntry {
    ability: String,
}

/// Snapshot of the game as seen by one player.
#[derive(Debug, Default, Deserialize)]
pub struct GameState {
    #[serde(default)]
    opponent_grid: Option<Lenient<Vec<Vec<String>>>>,
    #[serde(default)]
    player_grid: Option<Lenient<Vec<Vec<String>>>>,
    #[serde(default)]
    player_ships: Option<LenientList<OwnShip>>,
    #[serde(default)]
    opponent_ships: Option<LenientList<ShipReport>>,
    #[serde(default)]
    player_abilities: Option<LenientList<AbilityEntry>>,
    #[serde(default)]
    opponent_abilities: Option<LenientList<AbilityEntry>>,
}

impl GameState {
    /// Parse a snapshot from JSON text.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Parse a snapshot from a JSON stream.
    pub fn from_reader<R: Read>(reader: R) -> serde_json::Result<Self> {
        serde_json::from_reader(reader)
    }

    /// Determine the phase from which fields are present.
    pub fn phase(&self) -> Phase {
        match self.player_ships {
            None => Phase::AbilitySelection,
            Some(_) if self.own_ships().count() < ShipType::ALL.len() => Phase::Placement,
            Some(_) => Phase::Combat,
        }
    }

    /// The grid of shots on the opponent's board. Missing or unreadable grids read as
    /// entirely unknown.
    pub fn opponent_grid(&self, dim: RectDimensions) -> Grid {
        read_grid(&self.opponent_grid, dim, "opponent_grid")
    }

    /// The grid of the opponent's shots on the player's own board.
    pub fn own_grid(&self, dim: RectDimensions) -> Grid {
        read_grid(&self.player_grid, dim, "player_grid")
    }

    /// The player's own ships that could be read.
    pub fn own_ships(&self) -> impl '_ + Iterator<Item = &OwnShip> {
        valid_entries(&self.player_ships)
    }

    /// The player's fleet setup: which ships are placed and which cells they cover.
    pub fn own_fleet(&self, dim: RectDimensions) -> FleetSetup {
        let mut fleet = FleetSetup::new(dim);
        for ship in self.own_ships() {
            fleet.record(ship.ship_type(), ship.coordinates());
        }
        fleet
    }

    /// Opponent ship types that are reported sunk.
    pub fn sunk_opponent_ships(&self) -> impl '_ + Iterator<Item = ShipType> {
        valid_entries(&self.opponent_ships)
            .filter(|report| report.sunk)
            .filter_map(|report| ShipType::from_name(&report.name))
    }

    /// Abilities the player can still use.
    pub fn available_abilities(&self) -> AbilitySet {
        read_abilities(&self.player_abilities)
    }

    /// Abilities the opponent can still use.
    pub fn opponent_abilities(&self) -> AbilitySet {
        read_abilities(&self.opponent_abilities)
    }
}

fn read_grid(
    grid: &Option<Lenient<Vec<Vec<String>>>>,
    dim: RectDimensions,
    field: &str,
) -> Grid {
    match grid {
        Some(Lenient::Valid(rows)) => Grid::from_rows(dim, rows),
        Some(Lenient::Invalid(_)) => {
            warn!("{} is not a grid of symbols, treating it as unknown", field);
            Grid::new(dim)
        }
        None => Grid::new(dim),
    }
}

fn read_abilities(list: &Option<LenientList<AbilityEntry>>) -> AbilitySet {
    let mut set = AbilitySet::empty();
    for entry in valid_entries(list) {
        match Ability::from_code(&entry.ability) {
            Some(ability) => set.insert(ability),
            None => warn!("ignoring unknown ability {:?}", entry.ability),
        }
    }
    set
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::board::CellStatus;

    #[test]
    fn phase_follows_player_ships() {
        let state = GameState::from_json("{}").unwrap();
        assert_eq!(state.phase(), Phase::AbilitySelection);

        let state = GameState::from_json(r#"{"player_ships": []}"#).unwrap();
        assert_eq!(state.phase(), Phase::Placement);

        let state = GameState::from_json(
            r#"{"player_ships": [
                {"name": "ship_1x4", "coordinates": [[6,2],[6,3],[6,4],[6,5]]},
                {"name": "ship_1x3", "coordinates": [[5,0],[6,0],[7,0]]},
                {"name": "ship_2x3", "coordinates": [[3,4],[3,5],[3,6],[4,4],[4,5],[4,6]]},
                {"name": "ship_1x2", "coordinates": [[0,6],[1,6]]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(state.phase(), Phase::Combat);
    }

    #[test]
    fn skips_malformed_entries() {
        let state = GameState::from_json(
            r#"{
                "player_ships": [
                    "junk",
                    {"name": "ship_1x4", "coordinates": [[6,2],[6,3],"x",[6,5]]}
                ],
                "opponent_ships": [{"name": "ship_1x2", "sunk": true}, 7, {"name": "ship_9x9", "sunk": true}],
                "player_abilities": [{"ability": "RF"}, {"ability": "ZZ"}, {"nope": 1}],
                "opponent_abilities": [{"ability": "SD"}, {"ability": "SP"}],
                "opponent_grid": "broken"
            }"#,
        )
        .unwrap();

        let fleet = state.own_fleet(RectDimensions::default());
        assert!(fleet.is_placed(ShipType::Ship1x4));
        assert_eq!(fleet.next_ship(), Some(ShipType::Ship1x3));
        assert_eq!(state.own_ships().next().unwrap().coordinates().count(), 3);

        let sunk: Vec<_> = state.sunk_opponent_ships().collect();
        assert_eq!(sunk, vec![ShipType::Ship1x2]);

        let abilities = state.available_abilities();
        assert!(abilities.contains(Ability::RF));
        assert!(!abilities.contains(Ability::HS));
        assert_eq!(state.opponent_abilities(), Ability::SD | Ability::SP);

        let grid = state.opponent_grid(RectDimensions::default());
        assert_eq!(grid, Grid::new(RectDimensions::default()));
    }

    #[test]
    fn own_ships_clone_with_their_cells() {
        let state = GameState::from_json(
            r#"{"player_ships": [{"name": "ship_1x2", "coordinates": [[0,6],"bad",[1,6]]}]}"#,
        )
        .unwrap();
        let ships: Vec<OwnShip> = state.own_ships().cloned().collect();
        assert_eq!(ships.len(), 1);
        assert_eq!(ships[0].ship_type(), Some(ShipType::Ship1x2));
        assert_eq!(
            ships[0].coordinates().collect::<Vec<_>>(),
            vec![Coordinate::new(0, 6), Coordinate::new(1, 6)]
        );
    }

    #[test]
    fn reads_opponent_grid() {
        let mut rows = vec![vec!["N"; 8]; 8];
        rows[2][3] = "H";
        rows[5][5] = "B";
        let json = serde_json::json!({ "opponent_grid": rows, "player_ships": [] });
        let state: GameState = serde_json::from_value(json).unwrap();
        let grid = state.opponent_grid(RectDimensions::default());
        assert_eq!(grid[Coordinate::new(2, 3)], CellStatus::Hit);
        assert_eq!(grid[Coordinate::new(5, 5)], CellStatus::Blocked);
        assert_eq!(
            state.own_grid(RectDimensions::default()).first_unknown(),
            Some(Coordinate::new(0, 0))
        );
    }
}
