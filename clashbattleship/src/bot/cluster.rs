//! Groups of hits on ships that are not sunk yet, and where to shoot to finish them.
use std::collections::HashSet;

use crate::{
    board::{CellStatus, Coordinate, Grid},
    ships::ShipType,
};

/// Remaining-hit estimate used when no ship in the roster can explain a cluster. The
/// largest ship in the fleet has size 4.
const FALLBACK_SHIP_SIZE: usize = 4;

/// A maximal set of orthogonally connected hit cells.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Cluster {
    /// Cells of the cluster, sorted row-major. Never empty.
    cells: Vec<Coordinate>,
}

/// How the cells of a cluster are laid out.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ClusterShape {
    Single,
    /// Two or more cells in one row.
    Row,
    /// Two or more cells in one column.
    Column,
    /// Anything that is not a straight line.
    Irregular,
}

impl Cluster {
    /// Build a cluster from connected cells.
    fn new(mut cells: Vec<Coordinate>) -> Self {
        cells.sort();
        Self { cells }
    }

    /// The cells of this cluster in row-major order.
    pub fn cells(&self) -> &[Coordinate] {
        &self.cells
    }

    /// Number of hits in the cluster.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// The first cell in row-major order.
    pub fn first(&self) -> Coordinate {
        self.cells[0]
    }

    /// The last cell in row-major order.
    pub fn last(&self) -> Coordinate {
        self.cells[self.cells.len() - 1]
    }

    pub fn contains(&self, coord: &Coordinate) -> bool {
        self.cells.binary_search(coord).is_ok()
    }

    pub fn shape(&self) -> ClusterShape {
        let first = self.first();
        if self.cells.len() == 1 {
            ClusterShape::Single
        } else if self.cells.iter().all(|c| c.row == first.row) {
            ClusterShape::Row
        } else if self.cells.iter().all(|c| c.col == first.col) {
            ClusterShape::Column
        } else {
            ClusterShape::Irregular
        }
    }
}

/// Find every cluster of hits on the grid. Clusters are returned sorted by their first
/// cell, so the result does not depend on the order cells are visited in.
pub fn find_clusters(grid: &Grid) -> Vec<Cluster> {
    let dim = grid.dimensions();
    let mut visited = HashSet::new();
    let mut clusters = Vec::new();

    for start in grid.cells_with(CellStatus::Hit) {
        if !visited.insert(start) {
            continue;
        }
        let mut stack = vec![start];
        let mut cells = Vec::new();
        while let Some(cell) = stack.pop() {
            cells.push(cell);
            for neighbor in dim.neighbors(cell) {
                if grid[neighbor] == CellStatus::Hit && visited.insert(neighbor) {
                    stack.push(neighbor);
                }
            }
        }
        clusters.push(Cluster::new(cells));
    }

    clusters.sort_by_key(|cluster| cluster.first());
    clusters
}

/// Estimate how many more hits the cluster needs before its ship sinks.
///
/// This is an approximation that depends on roster order, not exact inference:
///
/// * A straight cluster at least as long as the smallest ship still afloat could
///   already be a whole ship, so it needs 0.
/// * Otherwise it is assumed to belong to the first ship in the roster that is longer
///   than it. Irregular clusters can only be the thick ship, so they are matched
///   against its cell count instead.
/// * If nothing in the roster fits, assume the largest ship of the fleet.
pub fn estimate_remaining_hits(cluster: &Cluster, roster: &[ShipType]) -> usize {
    let hits = cluster.len();
    let estimate = match cluster.shape() {
        ClusterShape::Irregular => roster
            .iter()
            .filter(|ship| ship.thickness() > 1)
            .map(|ship| ship.cell_count())
            .find(|&cells| cells > hits)
            .map(|cells| cells - hits),
        ClusterShape::Single | ClusterShape::Row | ClusterShape::Column => {
            let smallest = roster.iter().map(|ship| ship.size()).min();
            if smallest.map_or(false, |size| hits >= size) {
                return 0;
            }
            roster
                .iter()
                .map(|ship| ship.size())
                .find(|&size| size > hits)
                .map(|size| size - hits)
        }
    };
    estimate.unwrap_or_else(|| FALLBACK_SHIP_SIZE.saturating_sub(hits))
}

/// Unknown cells worth shooting to extend the cluster.
///
/// A single hit proposes its neighbors up, down, left and right. A line proposes the
/// cell past each end, low end first. An irregular cluster proposes every unknown cell
/// touching it.
pub fn cluster_targets(cluster: &Cluster, grid: &Grid) -> Vec<Coordinate> {
    let dim = grid.dimensions();
    let candidates: Vec<Coordinate> = match cluster.shape() {
        ClusterShape::Single => dim.neighbors(cluster.first()).collect(),
        ClusterShape::Row => vec![
            dim.offset(cluster.first(), 0, -1),
            dim.offset(cluster.last(), 0, 1),
        ]
        .into_iter()
        .flatten()
        .collect(),
        ClusterShape::Column => vec![
            dim.offset(cluster.first(), -1, 0),
            dim.offset(cluster.last(), 1, 0),
        ]
        .into_iter()
        .flatten()
        .collect(),
        ClusterShape::Irregular => {
            let mut seen = HashSet::new();
            cluster
                .cells()
                .iter()
                .flat_map(|cell| dim.neighbors(*cell))
                .filter(|n| !cluster.contains(n) && seen.insert(*n))
                .collect()
        }
    };
    candidates
        .into_iter()
        .filter(|coord| grid.is_unknown(*coord))
        .collect()
}

/// The cluster closest to sinking. Ties go to the cluster whose first cell comes first,
/// so the choice does not depend on the order of `clusters`.
pub fn select_cluster<'a>(clusters: &'a [Cluster], roster: &[ShipType]) -> Option<&'a Cluster> {
    clusters
        .iter()
        .min_by_key(|cluster| (estimate_remaining_hits(cluster, roster), cluster.first()))
}

/// Clusters ordered from closest to sinking to furthest.
pub fn rank_clusters<'a>(clusters: &'a [Cluster], roster: &[ShipType]) -> Vec<&'a Cluster> {
    let mut ranked: Vec<_> = clusters.iter().collect();
    ranked.sort_by_key(|cluster| (estimate_remaining_hits(cluster, roster), cluster.first()));
    ranked
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::board::RectDimensions;

    fn grid_with_hits(hits: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(RectDimensions::default());
        for &hit in hits {
            grid.set(hit.into(), CellStatus::Hit);
        }
        grid
    }

    fn coords(pairs: &[(usize, usize)]) -> Vec<Coordinate> {
        pairs.iter().map(|&p| p.into()).collect()
    }

    #[test]
    fn single_hit_targets_all_neighbors() {
        let grid = grid_with_hits(&[(3, 3)]);
        let clusters = find_clusters(&grid);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].shape(), ClusterShape::Single);
        assert_eq!(
            cluster_targets(&clusters[0], &grid),
            coords(&[(2, 3), (4, 3), (3, 2), (3, 4)])
        );
        assert_eq!(estimate_remaining_hits(&clusters[0], &[ShipType::Ship1x2]), 1);
    }

    #[test]
    fn row_of_three_matches_three_ship() {
        let grid = grid_with_hits(&[(2, 2), (2, 3), (2, 4)]);
        let clusters = find_clusters(&grid);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].shape(), ClusterShape::Row);
        assert_eq!(estimate_remaining_hits(&clusters[0], &[ShipType::Ship1x3]), 0);
        assert_eq!(cluster_targets(&clusters[0], &grid), coords(&[(2, 1), (2, 5)]));
    }

    #[test]
    fn line_targets_skip_resolved_and_edge_cells() {
        let mut grid = grid_with_hits(&[(0, 6), (1, 6)]);
        grid.set(Coordinate::new(2, 6), CellStatus::Miss);
        let clusters = find_clusters(&grid);
        assert_eq!(clusters[0].shape(), ClusterShape::Column);
        assert_eq!(cluster_targets(&clusters[0], &grid), vec![]);
    }

    #[test]
    fn estimates_follow_roster_order() {
        let grid = grid_with_hits(&[(4, 1), (4, 2)]);
        let cluster = &find_clusters(&grid)[0];
        // Smallest afloat is size 2, so the pair could already be a whole ship.
        assert_eq!(estimate_remaining_hits(cluster, ShipType::ALL), 0);
        assert_eq!(
            estimate_remaining_hits(cluster, &[ShipType::Ship1x3, ShipType::Ship1x4]),
            1
        );
        assert_eq!(
            estimate_remaining_hits(cluster, &[ShipType::Ship1x4, ShipType::Ship1x3]),
            2
        );
        // Nothing left to explain it.
        assert_eq!(estimate_remaining_hits(cluster, &[]), 2);

        let single = grid_with_hits(&[(0, 0)]);
        let single = &find_clusters(&single)[0];
        assert_eq!(estimate_remaining_hits(single, ShipType::ALL), 3);
    }

    #[test]
    fn irregular_cluster_matches_thick_ship() {
        let grid = grid_with_hits(&[(3, 3), (3, 4), (4, 3)]);
        let clusters = find_clusters(&grid);
        assert_eq!(clusters.len(), 1);
        let cluster = &clusters[0];
        assert_eq!(cluster.shape(), ClusterShape::Irregular);
        assert_eq!(estimate_remaining_hits(cluster, ShipType::ALL), 3);
        assert_eq!(estimate_remaining_hits(cluster, &[ShipType::Ship1x2]), 1);
        assert_eq!(
            cluster_targets(cluster, &grid),
            coords(&[(2, 3), (3, 2), (2, 4), (4, 4), (3, 5), (5, 3), (4, 2)])
        );
    }

    #[test]
    fn separates_disconnected_hits() {
        let grid = grid_with_hits(&[(0, 0), (1, 1), (6, 6), (6, 7)]);
        let clusters = find_clusters(&grid);
        let cells: Vec<_> = clusters.iter().map(|c| c.cells().to_vec()).collect();
        assert_eq!(
            cells,
            vec![
                coords(&[(0, 0)]),
                coords(&[(1, 1)]),
                coords(&[(6, 6), (6, 7)]),
            ]
        );
    }

    #[test]
    fn selection_ignores_cluster_order() {
        let grid = grid_with_hits(&[(0, 0), (5, 2), (5, 3), (5, 4), (7, 7)]);
        let mut clusters = find_clusters(&grid);
        let roster = [ShipType::Ship1x4, ShipType::Ship1x2];
        let forward = select_cluster(&clusters, &roster).cloned();
        clusters.reverse();
        let backward = select_cluster(&clusters, &roster).cloned();
        assert_eq!(forward, backward);
        assert_eq!(forward.unwrap().first(), Coordinate::new(5, 2));
    }

    fn status() -> impl Strategy<Value = CellStatus> {
        prop_oneof![
            4 => Just(CellStatus::Unknown),
            3 => Just(CellStatus::Hit),
            1 => Just(CellStatus::Miss),
            1 => Just(CellStatus::Sunk),
            1 => Just(CellStatus::Blocked),
        ]
    }

    fn any_grid() -> impl Strategy<Value = Grid> {
        prop::collection::vec(status(), 64)
            .prop_map(|cells| Grid::from_cells(RectDimensions::default(), cells).unwrap())
    }

    fn any_roster() -> impl Strategy<Value = Vec<ShipType>> {
        prop::sample::subsequence(ShipType::ALL.to_vec(), 0..=4)
    }

    proptest! {
        #[test]
        fn targets_are_unknown_and_in_bounds(grid in any_grid()) {
            for cluster in find_clusters(&grid) {
                for target in cluster_targets(&cluster, &grid) {
                    prop_assert_eq!(grid.get(target), Some(CellStatus::Unknown));
                }
            }
        }

        #[test]
        fn clusters_partition_hits(grid in any_grid()) {
            let clusters = find_clusters(&grid);
            let mut covered: Vec<_> = clusters.iter().flat_map(|c| c.cells().to_vec()).collect();
            covered.sort();
            let hits: Vec<_> = grid.cells_with(CellStatus::Hit).collect();
            prop_assert_eq!(covered, hits);
        }

        #[test]
        fn selection_is_order_invariant(grid in any_grid(), roster in any_roster()) {
            let mut clusters = find_clusters(&grid);
            let forward = select_cluster(&clusters, &roster)
                .map(|c| (c.clone(), cluster_targets(c, &grid)));
            clusters.reverse();
            let backward = select_cluster(&clusters, &roster)
                .map(|c| (c.clone(), cluster_targets(c, &grid)));
            prop_assert_eq!(forward, backward);
        }
    }
}
