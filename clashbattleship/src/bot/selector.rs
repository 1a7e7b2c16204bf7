//! Ranking of candidate cells.
use std::cmp::Reverse;

use crate::{
    board::{CellStatus, Coordinate, Grid},
    bot::{
        cluster::{cluster_targets, rank_clusters, select_cluster, Cluster},
        probability::ProbabilityMap,
    },
    decision::UNTARGETED_CELL,
    ships::ShipType,
};

/// Scores are compared at this resolution so that summation order cannot split ties.
const SCORE_QUANTUM: f64 = 1e9;

fn quantize(score: f64) -> i64 {
    (score * SCORE_QUANTUM).round() as i64
}

/// Returns true if every ship still afloat has even size, in which case every ship
/// covers at least one even-parity cell.
pub fn parity_applies(roster: &[ShipType]) -> bool {
    !roster.is_empty() && roster.iter().all(|ship| ship.size() % 2 == 0)
}

/// Unknown cells with positive density, best first.
pub fn rank_hunt_cells(map: &ProbabilityMap, grid: &Grid, roster: &[ShipType]) -> Vec<Coordinate> {
    let parity = parity_applies(roster);
    let center = grid.dimensions().center();
    let mut ranked: Vec<_> = map
        .iter()
        .filter(|(coord, score)| *score > 0.0 && grid.is_unknown(*coord))
        .map(|(coord, score)| {
            let key = (
                Reverse(quantize(score)),
                parity && !coord.even_parity(),
                Reverse(grid.unknown_neighbors(coord)),
                coord.manhattan(&center),
                coord,
            );
            (key, coord)
        })
        .collect();
    ranked.sort_unstable_by_key(|(key, _)| *key);
    ranked.into_iter().map(|(_, coord)| coord).collect()
}

/// The best cell to hunt, if any cell still has positive density.
pub fn best_hunt_cell(map: &ProbabilityMap, grid: &Grid, roster: &[ShipType]) -> Option<Coordinate> {
    rank_hunt_cells(map, grid, roster).into_iter().next()
}

/// First target of the cluster closest to sinking. Does not look at other clusters.
pub fn cluster_target(clusters: &[Cluster], grid: &Grid, roster: &[ShipType]) -> Option<Coordinate> {
    select_cluster(clusters, roster)
        .and_then(|cluster| cluster_targets(cluster, grid).into_iter().next())
}

/// Targets of every cluster, closest to sinking first, without duplicates.
pub fn ranked_cluster_targets(
    clusters: &[Cluster],
    grid: &Grid,
    roster: &[ShipType],
) -> Vec<Coordinate> {
    let mut targets = Vec::new();
    for cluster in rank_clusters(clusters, roster) {
        for target in cluster_targets(cluster, grid) {
            if !targets.contains(&target) {
                targets.push(target);
            }
        }
    }
    targets
}

/// Returns true if a shot at the cell could still reveal something.
pub fn is_targetable(grid: &Grid, coord: Coordinate) -> bool {
    matches!(
        grid.get(coord),
        Some(CellStatus::Unknown) | Some(CellStatus::Blocked)
    )
}

/// Last resort: the first unknown cell, or the corner if nothing is left.
pub fn fallback_target(grid: &Grid) -> Coordinate {
    grid.first_unknown().unwrap_or(UNTARGETED_CELL)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::{board::RectDimensions, bot::cluster::find_clusters};

    fn two_peaks() -> ProbabilityMap {
        ProbabilityMap::from_fn(RectDimensions::default(), |coord| {
            if coord == Coordinate::new(3, 3) || coord == Coordinate::new(3, 4) {
                1.0
            } else {
                0.0
            }
        })
    }

    fn parity_grid() -> Grid {
        let mut grid = Grid::new(RectDimensions::default());
        grid.set(Coordinate::new(4, 4), CellStatus::Miss);
        grid.set(Coordinate::new(2, 3), CellStatus::Miss);
        grid
    }

    #[test]
    fn parity_breaks_ties_only_for_even_rosters() {
        let map = two_peaks();
        let grid = parity_grid();

        let even = [ShipType::Ship1x4, ShipType::Ship1x2];
        assert!(parity_applies(&even));
        assert_eq!(best_hunt_cell(&map, &grid, &even), Some(Coordinate::new(3, 3)));

        let mixed = [ShipType::Ship1x3, ShipType::Ship1x2];
        assert!(!parity_applies(&mixed));
        assert_eq!(best_hunt_cell(&map, &grid, &mixed), Some(Coordinate::new(3, 4)));
    }

    #[test]
    fn empty_roster_has_no_parity() {
        assert!(!parity_applies(&[]));
    }

    #[test]
    fn only_positive_unknown_cells_rank() {
        let map = two_peaks();
        let grid = parity_grid();
        assert_eq!(
            rank_hunt_cells(&map, &grid, ShipType::ALL),
            vec![Coordinate::new(3, 4), Coordinate::new(3, 3)]
        );
        let empty = ProbabilityMap::empty(RectDimensions::default());
        assert_eq!(best_hunt_cell(&empty, &grid, ShipType::ALL), None);
    }

    #[test]
    fn center_distance_breaks_remaining_ties() {
        let map = ProbabilityMap::from_fn(RectDimensions::default(), |_| 1.0);
        let grid = Grid::new(RectDimensions::default());
        // Interior cells all have four unknown neighbors, so distance to (4,4) decides.
        assert_eq!(
            best_hunt_cell(&map, &grid, &[ShipType::Ship1x3]),
            Some(Coordinate::new(4, 4))
        );
    }

    #[test]
    fn cluster_targets_follow_cluster_rank() {
        let mut grid = Grid::new(RectDimensions::default());
        // A lone hit needs two more cells, the pair in row 6 needs one.
        grid.set(Coordinate::new(1, 1), CellStatus::Hit);
        grid.set(Coordinate::new(6, 3), CellStatus::Hit);
        grid.set(Coordinate::new(6, 4), CellStatus::Hit);
        let clusters = find_clusters(&grid);
        let roster = [ShipType::Ship1x3];
        assert_eq!(
            cluster_target(&clusters, &grid, &roster),
            Some(Coordinate::new(6, 2))
        );
        assert_eq!(
            ranked_cluster_targets(&clusters, &grid, &roster),
            vec![
                Coordinate::new(6, 2),
                Coordinate::new(6, 5),
                Coordinate::new(0, 1),
                Coordinate::new(2, 1),
                Coordinate::new(1, 0),
                Coordinate::new(1, 2),
            ]
        );
    }

    #[test]
    fn fallback_prefers_first_unknown() {
        let mut grid = Grid::new(RectDimensions::default());
        grid.set(Coordinate::new(0, 0), CellStatus::Miss);
        assert_eq!(fallback_target(&grid), Coordinate::new(0, 1));

        let full = Grid::from_cells(
            RectDimensions::default(),
            vec![CellStatus::Miss; RectDimensions::default().total_size()],
        )
        .unwrap();
        assert_eq!(fallback_target(&full), Coordinate::new(0, 0));
    }

    #[test]
    fn targetable_cells() {
        let mut grid = Grid::new(RectDimensions::default());
        grid.set(Coordinate::new(1, 1), CellStatus::Blocked);
        grid.set(Coordinate::new(1, 2), CellStatus::Hit);
        assert!(is_targetable(&grid, Coordinate::new(0, 0)));
        assert!(is_targetable(&grid, Coordinate::new(1, 1)));
        assert!(!is_targetable(&grid, Coordinate::new(1, 2)));
        assert!(!is_targetable(&grid, Coordinate::new(8, 0)));
    }

    proptest! {
        #[test]
        fn ranking_is_a_permutation_of_scored_cells(
            scores in prop::collection::vec(0u8..4, 64),
        ) {
            let dim = RectDimensions::default();
            let map = ProbabilityMap::from_fn(dim, |coord| {
                f64::from(scores[dim.try_linearize(&coord).unwrap()]) / 3.0
            });
            let grid = Grid::new(dim);
            let ranked = rank_hunt_cells(&map, &grid, ShipType::ALL);
            let positive = scores.iter().filter(|s| **s > 0).count();
            prop_assert_eq!(ranked.len(), positive);
            for pair in ranked.windows(2) {
                prop_assert!(map.get(pair[0]) >= map.get(pair[1]));
            }
        }
    }
}
