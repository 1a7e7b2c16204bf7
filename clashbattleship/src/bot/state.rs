//! Memory the bot carries from one combat decision to the next.
use std::collections::{btree_map::Entry, BTreeMap};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    board::{CellStatus, Coordinate, Grid},
    ships::ShipType,
};

/// Turns to wait before shooting a blocked cell again. A block lasts two turns, plus
/// one turn of margin.
pub const RETRY_AFTER_TURNS: u32 = 3;

/// Turn counter, opponent ships not yet sunk, and when each blocked cell was first seen.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "PersistedState", into = "PersistedState")]
pub struct BotState {
    /// Number of combat decisions made so far.
    turn: u32,

    /// Opponent ship types not yet reported sunk, in [`ShipType::ALL`] order.
    roster: Vec<ShipType>,

    /// Turn on which each tracked cell was first seen blocked.
    blocked: BTreeMap<Coordinate, u32>,
}

impl BotState {
    /// State at the start of a game: turn 0, the whole enemy fleet afloat.
    pub fn new() -> Self {
        Self {
            turn: 0,
            roster: ShipType::ALL.to_vec(),
            blocked: BTreeMap::new(),
        }
    }

    /// The number of combat decisions made so far.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Enemy ship types still afloat.
    pub fn roster(&self) -> &[ShipType] {
        &self.roster
    }

    /// The turn a cell was first seen blocked, if it is being tracked.
    pub fn blocked_since(&self, coord: Coordinate) -> Option<u32> {
        self.blocked.get(&coord).copied()
    }

    /// Iterate the tracked blocked cells in row-major order.
    pub fn tracked_blocked(&self) -> impl '_ + Iterator<Item = (Coordinate, u32)> {
        self.blocked.iter().map(|(coord, turn)| (*coord, *turn))
    }

    /// Update for a new combat decision: advance the turn, start timers for newly
    /// blocked cells and drop ships the game reports sunk. Runs once per decision.
    pub fn observe<I>(&mut self, grid: &Grid, sunk: I)
    where
        I: IntoIterator<Item = ShipType>,
    {
        self.turn = self.turn.saturating_add(1);
        let turn = self.turn;
        for coord in grid.cells_with(CellStatus::Blocked) {
            if let Entry::Vacant(entry) = self.blocked.entry(coord) {
                debug!("cell {} blocked on turn {}", coord, turn);
                entry.insert(turn);
            }
        }
        for ship in sunk {
            self.record_sunk(ship);
        }
    }

    /// Remove a ship from the roster. Returns false if it was already gone.
    pub fn record_sunk(&mut self, ship: ShipType) -> bool {
        match self.roster.iter().position(|s| *s == ship) {
            Some(idx) => {
                self.roster.remove(idx);
                debug!("{} sunk, {} ships left", ship, self.roster.len());
                true
            }
            None => false,
        }
    }

    /// Returns true if the cell has been tracked for at least `threshold` turns.
    pub fn is_retry_ready(&self, coord: Coordinate, threshold: u32) -> bool {
        self.blocked
            .get(&coord)
            .map_or(false, |since| self.turn.saturating_sub(*since) >= threshold)
    }

    /// Cells tracked for at least `threshold` turns, row-major. Does not remove them.
    pub fn ready_blocked(&self, threshold: u32) -> Vec<Coordinate> {
        self.blocked
            .keys()
            .copied()
            .filter(|coord| self.is_retry_ready(*coord, threshold))
            .collect()
    }

    /// Remove and return every cell tracked for at least `threshold` turns, row-major.
    pub fn take_ready_blocked(&mut self, threshold: u32) -> Vec<Coordinate> {
        let ready = self.ready_blocked(threshold);
        for coord in &ready {
            self.blocked.remove(coord);
        }
        ready
    }

    /// Stop tracking the given cells if they are ready. Returns how many were removed.
    pub fn take_blocked(&mut self, coords: &[Coordinate], threshold: u32) -> usize {
        let ready: Vec<_> = coords
            .iter()
            .copied()
            .filter(|coord| self.is_retry_ready(*coord, threshold))
            .collect();
        for coord in &ready {
            self.blocked.remove(coord);
        }
        ready.len()
    }
}

impl Default for BotState {
    fn default() -> Self {
        Self::new()
    }
}

/// On-disk form of [`BotState`]. JSON maps need string keys, so timers are a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedState {
    turn: u32,
    roster: Vec<ShipType>,
    blocked: Vec<(Coordinate, u32)>,
}

impl From<PersistedState> for BotState {
    /// Restores a saved state. The roster is rebuilt in canonical order without
    /// duplicates, and the first timer for a cell wins.
    fn from(saved: PersistedState) -> Self {
        let roster = ShipType::ALL
            .iter()
            .copied()
            .filter(|ship| saved.roster.contains(ship))
            .collect();
        let mut blocked = BTreeMap::new();
        for (coord, turn) in saved.blocked {
            blocked.entry(coord).or_insert(turn);
        }
        Self {
            turn: saved.turn,
            roster,
            blocked,
        }
    }
}

impl From<BotState> for PersistedState {
    fn from(state: BotState) -> Self {
        Self {
            turn: state.turn,
            roster: state.roster,
            blocked: state.blocked.into_iter().collect(),
        }
    }
}
