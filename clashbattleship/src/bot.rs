//! The decision engine.
//!
//! A [`Bot`] looks at a [`GameState`] snapshot, works out which phase the game is in and
//! answers with a single [`Move`]. Combat decisions run through a fixed order of
//! strategies, and the first one that produces a target wins:
//!
//! 1. Rapid fire at two cells, if the ability is available and two distinct cells are
//!    worth shooting.
//! 2. The board-wide hailstorm, if available.
//! 3. Finishing off the hit cluster closest to sinking.
//! 4. Shooting a blocked cell again once its block has worn off.
//! 5. Hunting the cell most likely to hold a ship.
//! 6. The first unknown cell, or `(0,0)` when the board is exhausted.
use log::debug;

use crate::{
    ability::Ability,
    board::{Coordinate, FleetSetup, Grid, RectDimensions},
    decision::{CombatMove, Move, PlacementMove, UNTARGETED_CELL},
    ships::{Orientation, ShipType},
    snapshot::{GameState, Phase},
};

pub use self::{
    cluster::{
        cluster_targets, estimate_remaining_hits, find_clusters, select_cluster, Cluster,
        ClusterShape,
    },
    config::{BotConfig, ConfigError, PresetPlacement, PLACEMENT_ATTEMPTS},
    probability::ProbabilityMap,
    state::{BotState, RETRY_AFTER_TURNS},
};

pub mod cluster;
mod config;
pub mod probability;
pub mod selector;
mod state;

use self::selector::{
    best_hunt_cell, cluster_target, fallback_target, is_targetable, rank_hunt_cells,
    ranked_cluster_targets,
};

/// Makes one decision per snapshot, carrying [`BotState`] between combat turns.
#[derive(Debug, Clone)]
pub struct Bot {
    config: BotConfig,
    state: BotState,
    dim: RectDimensions,
}

impl Bot {
    /// A bot at the start of a game.
    pub fn new(config: BotConfig) -> Self {
        Self::with_state(config, BotState::new())
    }

    /// A bot resuming from previously saved state.
    pub fn with_state(config: BotConfig, state: BotState) -> Self {
        Self {
            config,
            state,
            dim: RectDimensions::default(),
        }
    }

    /// The settings this bot plays with.
    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// The state carried between combat turns.
    pub fn state(&self) -> &BotState {
        &self.state
    }

    /// Take the carried state, e.g. to save it.
    pub fn into_state(self) -> BotState {
        self.state
    }

    /// Decide the next move for the snapshot.
    ///
    /// Ability selection and placement only happen before combat, so seeing either one
    /// means a new game and the carried state starts over.
    pub fn decide(&mut self, game: &GameState) -> Move {
        match game.phase() {
            Phase::AbilitySelection => {
                self.reset_state();
                Move::AbilitySelect(self.select_abilities())
            }
            Phase::Placement => {
                self.reset_state();
                Move::Placement(self.place_ship(game))
            }
            Phase::Combat => Move::Combat(self.combat(game)),
        }
    }

    fn reset_state(&mut self) {
        if self.state != BotState::new() {
            debug!("new game, dropping state from turn {}", self.state.turn());
            self.state = BotState::new();
        }
    }

    /// The two abilities to take into the game.
    pub fn select_abilities(&self) -> Vec<Ability> {
        debug!(
            "selecting abilities {} and {}",
            self.config.abilities[0], self.config.abilities[1]
        );
        self.config.abilities.to_vec()
    }

    /// Place the first ship of the fleet that is not on the board yet.
    ///
    /// The configured preset is used if it fits. Otherwise a number of random positions
    /// are tried, then the first free position in scan order, and as a last resort the
    /// top left corner.
    pub fn place_ship(&self, game: &GameState) -> PlacementMove {
        let fleet = game.own_fleet(self.dim);
        let ship = fleet.next_ship().unwrap_or(ShipType::ALL[0]);

        if let Some(preset) = self.config.preset_for(ship) {
            match fleet.check_placement(ship, preset.cell, preset.direction) {
                Ok(_) => {
                    debug!("placing {} at preset {}", ship, preset.cell);
                    return PlacementMove {
                        ship,
                        anchor: preset.cell,
                        orientation: preset.direction,
                    };
                }
                Err(err) => {
                    let reason = err.reason();
                    let (_, cell, direction) = err.into_placement();
                    debug!(
                        "preset for {} at {} {:?} rejected: {}",
                        ship, cell, direction, reason
                    );
                }
            }
        }

        let (anchor, orientation) = self
            .random_placement(&fleet, ship)
            .or_else(|| {
                debug!("no random placement found for {}, scanning", ship);
                fleet.first_fit(ship)
            })
            .unwrap_or_else(|| {
                debug!("no room left for {}", ship);
                (UNTARGETED_CELL, Orientation::Horizontal)
            });
        debug!("placing {} at {} {:?}", ship, anchor, orientation);
        PlacementMove {
            ship,
            anchor,
            orientation,
        }
    }

    #[cfg(feature = "rng_gen")]
    fn random_placement(
        &self,
        fleet: &FleetSetup,
        ship: ShipType,
    ) -> Option<(Coordinate, Orientation)> {
        fleet.random_placement(&mut rand::thread_rng(), ship, self.config.placement_attempts)
    }

    #[cfg(not(feature = "rng_gen"))]
    fn random_placement(
        &self,
        _fleet: &FleetSetup,
        _ship: ShipType,
    ) -> Option<(Coordinate, Orientation)> {
        None
    }

    /// Choose a combat move. Updates the carried state exactly once.
    pub fn combat(&mut self, game: &GameState) -> CombatMove {
        let grid = game.opponent_grid(self.dim);
        debug!("opponent grid:\n{}", grid);
        self.state.observe(&grid, game.sunk_opponent_ships());
        let roster = self.state.roster().to_vec();
        let available = game.available_abilities();
        let clusters = find_clusters(&grid);

        if available.contains(Ability::RF) {
            if let Some(pair) = self.rapid_fire_pair(&grid, &clusters, &roster) {
                debug!("rapid fire at {} and {}", pair[0], pair[1]);
                return CombatMove::rapid_fire(pair);
            }
            debug!("rapid fire available but no pair of targets");
        }

        if available.contains(Ability::HS) {
            debug!("using hailstorm");
            return CombatMove::hailstorm();
        }

        if let Some(target) = cluster_target(&clusters, &grid, &roster) {
            debug!("finishing cluster at {}", target);
            return CombatMove::shot(target);
        }

        let retry = self
            .state
            .take_ready_blocked(self.config.retry_after_turns)
            .into_iter()
            .find(|coord| is_targetable(&grid, *coord));
        if let Some(target) = retry {
            debug!("retrying blocked cell {}", target);
            return CombatMove::shot(target);
        }

        let map = ProbabilityMap::compute(&grid, &roster);
        if let Some(target) = best_hunt_cell(&map, &grid, &roster) {
            debug!("hunting at {} (density {:.4})", target, map.get(target));
            return CombatMove::shot(target);
        }

        let target = fallback_target(&grid);
        debug!("nothing to hunt, falling back to {}", target);
        CombatMove::shot(target)
    }

    /// Two distinct cells for rapid fire: cluster targets first, topped up from the hunt
    /// ranking, or a pair of blocked cells due for a retry when no cluster has targets.
    fn rapid_fire_pair(
        &mut self,
        grid: &Grid,
        clusters: &[Cluster],
        roster: &[ShipType],
    ) -> Option<[Coordinate; 2]> {
        let targets = ranked_cluster_targets(clusters, grid, roster);
        match targets[..] {
            [first, second, ..] => Some([first, second]),
            [only] => hunt_ranking(grid, roster)
                .into_iter()
                .find(|coord| *coord != only)
                .map(|other| [only, other]),
            [] => {
                let threshold = self.config.retry_after_turns;
                let retries: Vec<_> = self
                    .state
                    .ready_blocked(threshold)
                    .into_iter()
                    .filter(|coord| is_targetable(grid, *coord))
                    .take(2)
                    .collect();
                if let [first, second] = retries[..] {
                    self.state.take_blocked(&retries, threshold);
                    return Some([first, second]);
                }
                match hunt_ranking(grid, roster)[..] {
                    [first, second, ..] => Some([first, second]),
                    _ => None,
                }
            }
        }
    }
}

impl Default for Bot {
    fn default() -> Self {
        Self::new(BotConfig::default())
    }
}

fn hunt_ranking(grid: &Grid, roster: &[ShipType]) -> Vec<Coordinate> {
    let map = ProbabilityMap::compute(grid, roster);
    rank_hunt_cells(&map, grid, roster)
}
