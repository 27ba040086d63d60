//! Procedural picture generation.
//!
//! A picture is one boolean per cell, packed by [`CubePosition::index`].
//! Every step draws from a single [`Mulberry32`] stream, so a seed and a
//! strategy fully determine the result.

use crate::types::GenerationStrategy;
use cubic_game::Mulberry32;
use cubic_topology::{CubeFace, CubePosition, unique_edges};
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Smoothing passes applied by the noise strategy.
pub const SMOOTHING_PASSES: usize = 2;

/// Lowest share of filled cells over the whole cube.
pub const MIN_TOTAL_FILL: f64 = 0.15;

/// Highest share of filled cells over the whole cube.
pub const MAX_TOTAL_FILL: f64 = 0.70;

/// Lowest share of filled cells on any one face.
pub const MIN_FACE_FILL: f64 = 0.10;

const BASIC_STRATEGIES: [GenerationStrategy; 4] = [
    GenerationStrategy::Noise,
    GenerationStrategy::Symmetric,
    GenerationStrategy::Blob,
    GenerationStrategy::Lines,
];

/// Generates a complete picture for `seed`.
#[instrument]
pub fn generate_solution(grid_size: usize, strategy: GenerationStrategy, seed: u32) -> Vec<bool> {
    let n = grid_size;
    let mut rng = Mulberry32::new(seed);
    let mut solution = vec![false; CubePosition::cell_count(n)];

    for face in CubeFace::ALL {
        let pattern = generate_face(strategy, n, &mut rng);
        let offset = face.index() * n * n;
        solution[offset..offset + n * n].copy_from_slice(&pattern);
    }

    enforce_edge_connections(&mut solution, n);
    ensure_minimum_complexity(&mut solution, n, &mut rng);

    debug!(
        filled = solution.iter().filter(|cell| **cell).count(),
        "Picture generated"
    );
    solution
}

/// One face pattern, indexed `y * n + x`.
pub fn generate_face(strategy: GenerationStrategy, grid_size: usize, rng: &mut Mulberry32) -> Vec<bool> {
    match strategy {
        GenerationStrategy::Noise => noise(grid_size, rng),
        GenerationStrategy::Symmetric => symmetric(grid_size, rng),
        GenerationStrategy::Blob => blob(grid_size, rng),
        GenerationStrategy::Lines => lines(grid_size, rng),
        GenerationStrategy::Mixed => {
            let pick = BASIC_STRATEGIES[rng.below(BASIC_STRATEGIES.len())];
            generate_face(pick, grid_size, rng)
        }
    }
}

fn noise(n: usize, rng: &mut Mulberry32) -> Vec<bool> {
    let mut grid: Vec<bool> = (0..n * n).map(|_| rng.chance(0.5)).collect();
    for _ in 0..SMOOTHING_PASSES {
        grid = smooth(&grid, n);
    }
    grid
}

/// Majority vote over each cell's 3×3 window, clipped to the face; ties keep the cell.
fn smooth(grid: &[bool], n: usize) -> Vec<bool> {
    (0..n * n)
        .map(|index| {
            let (x, y) = (index % n, index / n);
            let mut filled = 0;
            let mut window = 0;
            for wy in y.saturating_sub(1)..=(y + 1).min(n - 1) {
                for wx in x.saturating_sub(1)..=(x + 1).min(n - 1) {
                    window += 1;
                    if grid[wy * n + wx] {
                        filled += 1;
                    }
                }
            }
            match (2 * filled).cmp(&window) {
                std::cmp::Ordering::Greater => true,
                std::cmp::Ordering::Less => false,
                std::cmp::Ordering::Equal => grid[index],
            }
        })
        .collect()
}

fn symmetric(n: usize, rng: &mut Mulberry32) -> Vec<bool> {
    let mut grid = vec![false; n * n];
    let half = n.div_ceil(2);
    for y in 0..half {
        for x in 0..half {
            if rng.chance(0.5) {
                for (mx, my) in [(x, y), (n - 1 - x, y), (x, n - 1 - y), (n - 1 - x, n - 1 - y)] {
                    grid[my * n + mx] = true;
                }
            }
        }
    }
    grid
}

fn blob(n: usize, rng: &mut Mulberry32) -> Vec<bool> {
    let mut grid = vec![false; n * n];
    let target = (n * n * 2 / 5).max(1);
    let mut grown: Vec<usize> = Vec::with_capacity(target);

    for _ in 0..1 + rng.below(3) {
        let index = rng.below(n * n);
        if !grid[index] {
            grid[index] = true;
            grown.push(index);
        }
    }

    let mut attempts = n * n * 20;
    while grown.len() < target && attempts > 0 {
        attempts -= 1;
        let from = grown[rng.below(grown.len())];
        let (x, y) = ((from % n) as i64, (from / n) as i64);
        let (dx, dy) = [(1, 0), (-1, 0), (0, 1), (0, -1)][rng.below(4)];
        let (nx, ny) = (x + dx, y + dy);
        if nx < 0 || ny < 0 || nx >= n as i64 || ny >= n as i64 {
            continue;
        }
        let index = ny as usize * n + nx as usize;
        if !grid[index] {
            grid[index] = true;
            grown.push(index);
        }
    }
    grid
}

fn lines(n: usize, rng: &mut Mulberry32) -> Vec<bool> {
    let phase = rng.below(2);
    let pattern = rng.below(4);
    let mid = n / 2;
    (0..n * n)
        .map(|index| {
            let (x, y) = (index % n, index / n);
            match pattern {
                0 => y % 2 == phase,
                1 => x % 2 == phase,
                2 => x == y || x + y == n - 1,
                _ => x == mid || y == mid,
            }
        })
        .collect()
}

/// Cells that must share a value, as packed indices.
///
/// Built from the shared edge-transition table: a boundary cell is linked
/// to the cell a step across its edge reaches, and groups are the connected
/// sets of those links. Interior cells stand alone, edge cells pair up and
/// corner cells form triples where three faces meet.
pub fn edge_groups(grid_size: usize) -> Vec<Vec<usize>> {
    let n = grid_size;
    let mut partners: Vec<Vec<usize>> = vec![Vec::new(); CubePosition::cell_count(n)];
    for transition in unique_edges() {
        for along in 0..n {
            let a = CubePosition::on_edge(transition.from_face, transition.from_edge, along, n).index(n);
            let b = CubePosition::on_edge(
                transition.to_face,
                transition.to_edge,
                transition.map_parallel(along, n),
                n,
            )
            .index(n);
            partners[a].push(b);
            partners[b].push(a);
        }
    }

    let mut seen = vec![false; partners.len()];
    let mut groups = Vec::new();
    for root in 0..partners.len() {
        if seen[root] {
            continue;
        }
        seen[root] = true;
        let mut group = vec![root];
        let mut stack = vec![root];
        while let Some(index) = stack.pop() {
            for &next in &partners[index] {
                if !seen[next] {
                    seen[next] = true;
                    group.push(next);
                    stack.push(next);
                }
            }
        }
        groups.push(group);
    }
    groups
}

/// Makes cells that touch across a cube edge agree by OR-ing each group.
pub fn enforce_edge_connections(solution: &mut [bool], grid_size: usize) {
    for group in edge_groups(grid_size) {
        if group.iter().any(|index| solution[*index]) {
            for index in group {
                solution[index] = true;
            }
        }
    }
}

fn set_group(solution: &mut [bool], group: &[usize], value: bool) {
    for index in group {
        solution[*index] = value;
    }
}

/// Nudges fill ratios into range by toggling random edge groups.
///
/// Keeps the cube total within [`MIN_TOTAL_FILL`]..=[`MAX_TOTAL_FILL`] and
/// raises faces below [`MIN_FACE_FILL`] while the total allows. Whole
/// [`edge_groups`] toggle together, so cells that agree across an edge keep
/// agreeing. The bounds are best effort only when no group fits, which
/// happens on a one-cell grid where the whole cube is a single group.
pub fn ensure_minimum_complexity(solution: &mut [bool], grid_size: usize, rng: &mut Mulberry32) {
    let n = grid_size;
    let total = solution.len();
    let min_total = (total as f64 * MIN_TOTAL_FILL).ceil() as usize;
    let max_total = (total as f64 * MAX_TOTAL_FILL).floor() as usize;
    let mut groups = edge_groups(n);
    groups.shuffle(rng);
    let mut filled = solution.iter().filter(|cell| **cell).count();

    if filled < min_total {
        for group in &groups {
            if filled >= min_total {
                break;
            }
            if !solution[group[0]] && filled + group.len() <= max_total {
                set_group(solution, group, true);
                filled += group.len();
            }
        }
    } else if filled > max_total {
        for group in &groups {
            if filled <= max_total {
                break;
            }
            if solution[group[0]] && filled - group.len() >= min_total {
                set_group(solution, group, false);
                filled -= group.len();
            }
        }
    }

    let min_face = ((n * n) as f64 * MIN_FACE_FILL).ceil() as usize;
    for face in CubeFace::ALL {
        let offset = face.index() * n * n;
        let on_face = |index: usize| (offset..offset + n * n).contains(&index);
        let mut face_filled = solution[offset..offset + n * n].iter().filter(|cell| **cell).count();
        for group in &groups {
            if face_filled >= min_face {
                break;
            }
            if solution[group[0]] || filled + group.len() > max_total {
                continue;
            }
            let gained = group.iter().filter(|index| on_face(**index)).count();
            if gained > 0 {
                set_group(solution, group, true);
                filled += group.len();
                face_filled += gained;
            }
        }
    }
    debug!(filled, total, "Fill ratio adjusted");
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubic_topology::{Direction, step};
    use proptest::prelude::*;

    fn fill_ratio(cells: &[bool]) -> f64 {
        cells.iter().filter(|cell| **cell).count() as f64 / cells.len() as f64
    }

    #[test]
    fn same_seed_same_picture() {
        for strategy in BASIC_STRATEGIES.into_iter().chain([GenerationStrategy::Mixed]) {
            assert_eq!(
                generate_solution(5, strategy, 99),
                generate_solution(5, strategy, 99),
                "{strategy}"
            );
        }
        assert_ne!(
            generate_solution(6, GenerationStrategy::Noise, 1),
            generate_solution(6, GenerationStrategy::Noise, 2)
        );
    }

    #[test]
    fn symmetric_faces_mirror_both_ways() {
        let mut rng = Mulberry32::new(5);
        let n = 6;
        let face = symmetric(n, &mut rng);
        for y in 0..n {
            for x in 0..n {
                assert_eq!(face[y * n + x], face[y * n + (n - 1 - x)]);
                assert_eq!(face[y * n + x], face[(n - 1 - y) * n + x]);
            }
        }
    }

    #[test]
    fn edge_agreement_is_idempotent() {
        let mut solution = generate_solution(4, GenerationStrategy::Blob, 8);
        let before = solution.clone();
        enforce_edge_connections(&mut solution, 4);
        assert_eq!(solution, before);
    }

    #[test]
    fn complexity_raises_an_empty_cube() {
        let n = 5;
        let mut solution = vec![false; CubePosition::cell_count(n)];
        ensure_minimum_complexity(&mut solution, n, &mut Mulberry32::new(3));
        assert!(fill_ratio(&solution) >= MIN_TOTAL_FILL);
        for face in CubeFace::ALL {
            let offset = face.index() * n * n;
            assert!(fill_ratio(&solution[offset..offset + n * n]) >= MIN_FACE_FILL, "{face}");
        }
    }

    #[test]
    fn complexity_thins_a_full_cube() {
        let n = 6;
        let mut solution = vec![true; CubePosition::cell_count(n)];
        ensure_minimum_complexity(&mut solution, n, &mut Mulberry32::new(3));
        assert!(fill_ratio(&solution) <= MAX_TOTAL_FILL);
    }

    #[test]
    fn edge_groups_partition_the_cube() {
        for n in 2..6 {
            let groups = edge_groups(n);
            let mut covered: Vec<usize> = groups.iter().flatten().copied().collect();
            covered.sort_unstable();
            assert_eq!(covered, (0..CubePosition::cell_count(n)).collect::<Vec<_>>());
            assert!(groups.iter().all(|group| group.len() <= 3), "n = {n}");
            let corners = groups.iter().filter(|group| group.len() == 3).count();
            assert_eq!(corners, 8, "n = {n}");
        }
    }

    #[test]
    fn small_dense_cube_is_thinned_into_range() {
        let n = 3;
        let mut solution = vec![true; CubePosition::cell_count(n)];
        ensure_minimum_complexity(&mut solution, n, &mut Mulberry32::new(9));
        assert!(fill_ratio(&solution) <= MAX_TOTAL_FILL);
        assert!(fill_ratio(&solution) >= MIN_TOTAL_FILL);
        let before = solution.clone();
        enforce_edge_connections(&mut solution, n);
        assert_eq!(solution, before);
    }

    proptest! {
        #[test]
        fn total_fill_stays_in_range(
            seed in any::<u32>(),
            n in 3usize..7,
            strategy in prop::sample::select(BASIC_STRATEGIES.to_vec()),
        ) {
            let ratio = fill_ratio(&generate_solution(n, strategy, seed));
            prop_assert!((MIN_TOTAL_FILL..=MAX_TOTAL_FILL).contains(&ratio), "{} n={} ratio={}", strategy, n, ratio);
        }

        #[test]
        fn cells_across_an_edge_agree(seed in any::<u32>(), n in 3usize..7) {
            let solution = generate_solution(n, GenerationStrategy::Mixed, seed);
            for position in CubePosition::all(n) {
                for direction in Direction::ALL {
                    let next = step(position, direction, n);
                    if next.face != position.face {
                        prop_assert_eq!(solution[position.index(n)], solution[next.index(n)]);
                    }
                }
            }
        }
    }
}
