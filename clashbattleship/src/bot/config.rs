//! Tunable settings of the bot.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    ability::Ability,
    board::Coordinate,
    bot::state::RETRY_AFTER_TURNS,
    ships::{Orientation, ShipType},
};

/// Random placements to try before scanning the board for a free spot.
pub const PLACEMENT_ATTEMPTS: usize = 100;

/// Reason a [`BotConfig`] was rejected.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum ConfigError {
    /// Both ability slots hold the same ability.
    #[error("the two selected abilities must differ, got {0} twice")]
    DuplicateAbility(Ability),
    /// Blocked cells would be retried on the turn they are seen.
    #[error("retry_after_turns must be at least 1")]
    ZeroRetryThreshold,
}

/// Preferred position of one ship.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PresetPlacement {
    pub ship: ShipType,
    pub cell: Coordinate,
    pub direction: Orientation,
}

impl PresetPlacement {
    pub const fn new(ship: ShipType, cell: Coordinate, direction: Orientation) -> Self {
        Self {
            ship,
            cell,
            direction,
        }
    }
}

/// Settings of the bot. Every field may be left out of a config file.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// The abilities picked at the start of the game.
    pub abilities: [Ability; 2],

    /// Turns a blocked cell is tracked before it is shot again.
    pub retry_after_turns: u32,

    /// Random placements tried when a preset does not fit.
    pub placement_attempts: usize,

    /// Where each ship goes if it fits. Later entries for the same ship win.
    pub presets: Vec<PresetPlacement>,
}

impl BotConfig {
    /// Check the settings for values the bot cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.abilities[0] == self.abilities[1] {
            return Err(ConfigError::DuplicateAbility(self.abilities[0]));
        }
        if self.retry_after_turns == 0 {
            return Err(ConfigError::ZeroRetryThreshold);
        }
        Ok(())
    }

    /// The preferred position for a ship, if one is configured.
    pub fn preset_for(&self, ship: ShipType) -> Option<&PresetPlacement> {
        self.presets.iter().rev().find(|preset| preset.ship == ship)
    }

    /// Replace the preset for the preset's ship.
    pub fn set_preset(&mut self, preset: PresetPlacement) {
        self.presets.retain(|p| p.ship != preset.ship);
        self.presets.push(preset);
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            abilities: [Ability::HS, Ability::RF],
            retry_after_turns: RETRY_AFTER_TURNS,
            placement_attempts: PLACEMENT_ATTEMPTS,
            presets: vec![
                PresetPlacement::new(
                    ShipType::Ship1x4,
                    Coordinate::new(6, 2),
                    Orientation::Horizontal,
                ),
                PresetPlacement::new(
                    ShipType::Ship1x3,
                    Coordinate::new(5, 0),
                    Orientation::Vertical,
                ),
                PresetPlacement::new(
                    ShipType::Ship2x3,
                    Coordinate::new(3, 4),
                    Orientation::Horizontal,
                ),
                PresetPlacement::new(
                    ShipType::Ship1x2,
                    Coordinate::new(0, 6),
                    Orientation::Vertical,
                ),
            ],
        }
    }
}
