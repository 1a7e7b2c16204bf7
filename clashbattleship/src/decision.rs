//! Decisions the bot hands back to the game, in their wire format.
use serde::Serialize;

use crate::{
    ability::Ability,
    board::Coordinate,
    ships::{Orientation, ShipType},
};

/// Cell sent alongside abilities whose effect does not depend on the target field.
pub const UNTARGETED_CELL: Coordinate = Coordinate::new(0, 0);

/// Exactly one decision per call.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub enum Move {
    /// The two abilities to take into the game.
    #[serde(rename = "abilitySelect")]
    AbilitySelect(Vec<Ability>),
    /// Where to put the next ship.
    #[serde(rename = "placement")]
    Placement(PlacementMove),
    /// What to fire.
    #[serde(rename = "combat")]
    Combat(CombatMove),
}

/// Placement of a single ship.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct PlacementMove {
    #[serde(rename = "name")]
    pub ship: ShipType,
    #[serde(rename = "cell")]
    pub anchor: Coordinate,
    #[serde(rename = "direction")]
    pub orientation: Orientation,
}

/// A shot, optionally using an ability.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct CombatMove {
    pub cell: Coordinate,
    pub ability: AbilityUse,
}

/// Ability attached to a combat move.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub enum AbilityUse {
    /// A plain shot at `cell`.
    #[serde(rename = "None")]
    Plain {},
    /// Board-wide strike; `cell` is ignored.
    #[serde(rename = "HS")]
    Hailstorm {},
    /// Two shots at the given cells; `cell` is ignored.
    #[serde(rename = "RF")]
    RapidFire([Coordinate; 2]),
}

impl CombatMove {
    /// A plain shot at `cell`.
    pub fn shot(cell: Coordinate) -> Self {
        Self {
            cell,
            ability: AbilityUse::Plain {},
        }
    }

    /// Use the board-wide ability.
    pub fn hailstorm() -> Self {
        Self {
            cell: UNTARGETED_CELL,
            ability: AbilityUse::Hailstorm {},
        }
    }

    /// Fire at two cells at once.
    pub fn rapid_fire(targets: [Coordinate; 2]) -> Self {
        Self {
            cell: UNTARGETED_CELL,
            ability: AbilityUse::RapidFire(targets),
        }
    }

}
