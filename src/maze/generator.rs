//! Randomized depth-first backtracker
//!
//! Carves a spanning tree over the grid: every cell is visited once, and each
//! visit opens exactly one wall into an unvisited neighbor. The traversal keeps
//! its own stack of frames so deep grids never touch the call-stack limit, and
//! draws randomness in the same order as the recursive formulation.

use rand::Rng;
use rand::seq::SliceRandom;

use super::grid::{Cell, Direction, Grid};
use super::topology::WallTopology;
use crate::error::Result;

/// Neighbor candidates in a uniformly shuffled order (Fisher-Yates)
pub fn shuffled_directions<R: Rng + ?Sized>(rng: &mut R) -> [Direction; 4] {
    let mut dirs = Direction::ALL;
    dirs.shuffle(rng);
    dirs
}

/// One pending `visit(cell)` call
struct Frame {
    cell: Cell,
    candidates: [Direction; 4],
    next: usize,
}

impl Frame {
    fn enter<R: Rng + ?Sized>(cell: Cell, rng: &mut R) -> Self {
        Self {
            cell,
            candidates: shuffled_directions(rng),
            next: 0,
        }
    }
}

/// Generate a perfect maze of `rows x cols` cells
pub fn generate<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Result<WallTopology> {
    let mut topology = WallTopology::closed(rows, cols)?;
    let mut visited = Grid::filled(rows, cols, false);

    let start = Cell::new(rng.random_range(0..rows), rng.random_range(0..cols));
    topology.set_start(start);

    visited[start] = true;
    let mut stack = vec![Frame::enter(start, rng)];

    while let Some(frame) = stack.last_mut() {
        let Some(&dir) = frame.candidates.get(frame.next) else {
            stack.pop();
            continue;
        };
        frame.next += 1;
        let cell = frame.cell;

        let Some(target) = cell.step(dir, rows, cols) else {
            continue;
        };
        if visited[target] {
            continue;
        }

        topology.open(cell, dir);
        visited[target] = true;
        stack.push(Frame::enter(target, rng));
    }

    log::debug!(
        "Carved {}x{} maze from {:?}: {} passages",
        rows,
        cols,
        start,
        topology.open_passages()
    );

    Ok(topology)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MazeError;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashMap;

    /// Union-find over cells: a passage joining two already-connected cells is a cycle
    fn has_cycle(topo: &WallTopology) -> bool {
        fn find(parent: &mut [usize], mut i: usize) -> usize {
            while parent[i] != i {
                parent[i] = parent[parent[i]];
                i = parent[i];
            }
            i
        }

        let cols = topo.cols();
        let mut parent: Vec<usize> = (0..topo.cell_count()).collect();
        let mut edges = Vec::new();
        for (r, c, open) in topo.vertical_walls().iter() {
            if *open {
                edges.push((r * cols + c, r * cols + c + 1));
            }
        }
        for (r, c, open) in topo.horizontal_walls().iter() {
            if *open {
                edges.push((r * cols + c, (r + 1) * cols + c));
            }
        }

        for (a, b) in edges {
            let (ra, rb) = (find(&mut parent, a), find(&mut parent, b));
            if ra == rb {
                return true;
            }
            parent[ra] = rb;
        }
        false
    }

    /// Count simple paths between two cells by exhaustive search
    fn count_paths(topo: &WallTopology, from: Cell, to: Cell) -> usize {
        fn walk(topo: &WallTopology, at: Cell, to: Cell, seen: &mut Grid<bool>) -> usize {
            if at == to {
                return 1;
            }
            seen[at] = true;
            let next: Vec<Cell> = topo.passages_from(at).collect();
            let mut total = 0;
            for n in next {
                if !seen[n] {
                    total += walk(topo, n, to, seen);
                }
            }
            seen[at] = false;
            total
        }

        let mut seen = Grid::filled(topo.rows(), topo.cols(), false);
        walk(topo, from, to, &mut seen)
    }

    #[test]
    fn test_default_grid_has_119_passages() {
        let mut rng = Pcg32::seed_from_u64(12345);
        let topo = generate(10, 12, &mut rng).unwrap();
        assert_eq!(topo.open_passages(), 119);
        assert!(topo.is_perfect());
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(
            generate(0, 12, &mut rng),
            Err(MazeError::InvalidDimensions { rows: 0, cols: 12 })
        );
        assert_eq!(
            generate(10, 0, &mut rng),
            Err(MazeError::InvalidDimensions { rows: 10, cols: 0 })
        );
    }

    #[test]
    fn test_single_cell() {
        let mut rng = Pcg32::seed_from_u64(7);
        let topo = generate(1, 1, &mut rng).unwrap();
        assert_eq!(topo.open_passages(), 0);
        assert_eq!(topo.start(), Cell::new(0, 0));
        assert!(topo.is_perfect());
    }

    #[test]
    fn test_corridor_opens_every_wall() {
        let mut rng = Pcg32::seed_from_u64(7);
        let topo = generate(1, 9, &mut rng).unwrap();
        assert!(topo.vertical_walls().iter().all(|(_, _, open)| *open));
        assert_eq!(topo.horizontal_walls().height(), 0);
    }

    #[test]
    fn test_determinism() {
        let a = generate(10, 12, &mut Pcg32::seed_from_u64(99999)).unwrap();
        let b = generate(10, 12, &mut Pcg32::seed_from_u64(99999)).unwrap();
        assert_eq!(a, b);

        let c = generate(10, 12, &mut Pcg32::seed_from_u64(99998)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_unique_path_between_every_pair() {
        let topo = generate(3, 4, &mut Pcg32::seed_from_u64(42)).unwrap();
        let cells: Vec<Cell> = (0..3)
            .flat_map(|r| (0..4).map(move |c| Cell::new(r, c)))
            .collect();
        for &a in &cells {
            for &b in &cells {
                assert_eq!(count_paths(&topo, a, b), 1, "{a:?} -> {b:?}");
            }
        }
    }

    #[test]
    fn test_large_grid_does_not_overflow() {
        let topo = generate(300, 300, &mut Pcg32::seed_from_u64(3)).unwrap();
        assert_eq!(topo.open_passages(), 300 * 300 - 1);
        assert!(topo.is_perfect());
    }

    #[test]
    fn test_shuffle_fairness() {
        const TRIALS: usize = 24_000;
        let mut rng = Pcg32::seed_from_u64(2024);
        let mut counts: HashMap<[Direction; 4], usize> = HashMap::new();
        for _ in 0..TRIALS {
            *counts.entry(shuffled_directions(&mut rng)).or_default() += 1;
        }

        assert_eq!(counts.len(), 24, "every ordering should appear");
        let expected = TRIALS / 24;
        for (order, count) in counts {
            // ~5 standard deviations around 1000
            assert!(
                count.abs_diff(expected) < 160,
                "{order:?} drawn {count} times, expected ~{expected}"
            );
        }
    }

    proptest! {
        #[test]
        fn prop_spanning_tree(rows in 1usize..24, cols in 1usize..24, seed in any::<u64>()) {
            let topo = generate(rows, cols, &mut Pcg32::seed_from_u64(seed)).unwrap();
            prop_assert_eq!(topo.open_passages(), rows * cols - 1);
            prop_assert_eq!(topo.reachable_cells(), rows * cols);
        }

        #[test]
        fn prop_acyclic(rows in 1usize..24, cols in 1usize..24, seed in any::<u64>()) {
            let topo = generate(rows, cols, &mut Pcg32::seed_from_u64(seed)).unwrap();
            prop_assert!(!has_cycle(&topo));
        }

        #[test]
        fn prop_start_in_bounds(rows in 1usize..50, cols in 1usize..50, seed in any::<u64>()) {
            let topo = generate(rows, cols, &mut Pcg32::seed_from_u64(seed)).unwrap();
            prop_assert!(topo.start().row < rows && topo.start().col < cols);
        }
    }
}
