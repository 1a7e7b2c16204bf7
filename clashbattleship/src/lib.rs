//! Decision engine for a fog-of-war variant of Battleship played on an 8x8 board with
//! irregular ship shapes and special abilities.
//!
//! Every call takes a [`GameState`] snapshot and produces exactly one [`Move`]:
//!
//! * an ability selection at the start of the game,
//! * a ship placement while the fleet is being set up,
//! * a combat move once the fleet is placed.
//!
//! [`board`] models the grid the opponent's fleet hides in, [`ships`] the fleet's shapes,
//! and [`bot`] holds the combat engine: cluster analysis of unsunk hits, a placement
//! density map for hunting and the small amount of state carried between turns.

pub mod ability;
pub mod board;
pub mod bot;
pub mod decision;
pub mod ships;
pub mod snapshot;

pub use crate::{
    ability::{Ability, AbilitySet},
    board::{CellStatus, Coordinate, Grid, RectDimensions, BOARD_SIZE},
    bot::{Bot, BotConfig, BotState},
    decision::{AbilityUse, CombatMove, Move, PlacementMove},
    ships::{Orientation, ShipType},
    snapshot::{GameState, Phase},
};
