//! Movement and adjacency across face boundaries.

use crate::face::{Delta, Direction, Edge};
use crate::position::CubePosition;
use crate::transition::edge_transition;
use tracing::instrument;

/// Classifies a cell as lying on one edge of its face.
///
/// Corner cells satisfy two edges; the horizontal edges (`top`/`bottom`) are
/// reported first. Interior cells return `None`. See [`edges_at_position`]
/// for the unambiguous form.
pub fn edge_at_position(position: CubePosition, grid_size: usize) -> Option<Edge> {
    edges_at_position(position, grid_size).into_iter().next()
}

/// Every edge a cell lies on: zero for interior cells, two for corners.
pub fn edges_at_position(position: CubePosition, grid_size: usize) -> Vec<Edge> {
    let last = grid_size - 1;
    let mut edges = Vec::with_capacity(2);
    if position.y == last {
        edges.push(Edge::Top);
    }
    if position.y == 0 {
        edges.push(Edge::Bottom);
    }
    if position.x == 0 {
        edges.push(Edge::Left);
    }
    if position.x == last {
        edges.push(Edge::Right);
    }
    edges
}

/// Moves a cell by `delta`, wrapping onto the adjacent face when it leaves the grid.
///
/// Intended for unit steps. When the destination leaves the face, the cell
/// is placed on the destination face's entry edge and any overshoot beyond
/// one cell is discarded. If both axes leave the grid, the `x` axis decides
/// which edge is crossed; use [`diagonal_neighbor`] for true corner steps.
#[instrument(level = "trace")]
pub fn move_position(position: CubePosition, delta: Delta, grid_size: usize) -> CubePosition {
    let n = grid_size as i64;
    let nx = position.x as i64 + delta.dx as i64;
    let ny = position.y as i64 + delta.dy as i64;

    let exit = if nx < 0 {
        Edge::Left
    } else if nx >= n {
        Edge::Right
    } else if ny < 0 {
        Edge::Bottom
    } else if ny >= n {
        Edge::Top
    } else {
        return CubePosition::new(position.face, nx as usize, ny as usize);
    };

    let transition = edge_transition(position.face, exit);
    let along = if exit.is_horizontal() { position.x } else { position.y };
    CubePosition::on_edge(
        transition.to_face,
        transition.to_edge,
        transition.map_parallel(along, grid_size),
        grid_size,
    )
}

/// Steps in `direction`; shorthand for [`move_position`] with a unit delta.
pub fn step(position: CubePosition, direction: Direction, grid_size: usize) -> CubePosition {
    move_position(position, direction.delta(), grid_size)
}

/// Crosses one edge with the primary component of a diagonal step, then
/// applies the secondary component in the destination face's frame.
///
/// The secondary component ran along the crossed edge on the source face; on
/// the destination it runs along the entry edge, which may be a different
/// axis, and is negated when the transition mirrors that axis.
fn cross_then_slide(
    position: CubePosition,
    primary: Delta,
    secondary: i32,
    grid_size: usize,
) -> CubePosition {
    let exit = if primary.dx < 0 {
        Edge::Left
    } else if primary.dx > 0 {
        Edge::Right
    } else if primary.dy < 0 {
        Edge::Bottom
    } else {
        Edge::Top
    };
    let transition = edge_transition(position.face, exit);
    let landed = move_position(position, primary, grid_size);

    let secondary = if transition.is_flipped() { -secondary } else { secondary };
    let slide = if transition.to_edge.is_horizontal() {
        Delta::new(secondary, 0)
    } else {
        Delta::new(0, secondary)
    };
    move_position(landed, slide, grid_size)
}

/// Both resolution orders for a diagonal step: `(horizontal_first, vertical_first)`.
///
/// For steps that stay on the face or cross a single edge the two agree. At a
/// corner cell, where the step would leave through two edges at once, they
/// land on different faces: three faces meet at the cube vertex and no cell
/// sits diagonally across it.
pub fn diagonal_paths(
    position: CubePosition,
    delta: Delta,
    grid_size: usize,
) -> (CubePosition, CubePosition) {
    let horizontal = Delta::new(delta.dx, 0);
    let vertical = Delta::new(0, delta.dy);
    let n = grid_size as i64;
    let x_out = !(0..n).contains(&(position.x as i64 + delta.dx as i64));
    let y_out = !(0..n).contains(&(position.y as i64 + delta.dy as i64));

    match (x_out, y_out) {
        (false, false) => {
            let same = move_position(position, delta, grid_size);
            (same, same)
        }
        (true, false) => {
            let crossed = cross_then_slide(position, horizontal, delta.dy, grid_size);
            let along_first = move_position(move_position(position, vertical, grid_size), horizontal, grid_size);
            (crossed, along_first)
        }
        (false, true) => {
            let along_first = move_position(move_position(position, horizontal, grid_size), vertical, grid_size);
            let crossed = cross_then_slide(position, vertical, delta.dx, grid_size);
            (along_first, crossed)
        }
        (true, true) => (
            cross_then_slide(position, horizontal, delta.dy, grid_size),
            cross_then_slide(position, vertical, delta.dx, grid_size),
        ),
    }
}

/// Resolves a diagonal step to a single cell.
///
/// A step that crosses one edge crosses it first and then slides along the
/// destination face. At a corner the horizontal-first result is returned.
pub fn diagonal_neighbor(position: CubePosition, delta: Delta, grid_size: usize) -> CubePosition {
    let n = grid_size as i64;
    let x_out = !(0..n).contains(&(position.x as i64 + delta.dx as i64));
    let y_out = !(0..n).contains(&(position.y as i64 + delta.dy as i64));
    match (x_out, y_out) {
        (false, false) => move_position(position, delta, grid_size),
        (true, false) => cross_then_slide(position, Delta::new(delta.dx, 0), delta.dy, grid_size),
        (false, true) => cross_then_slide(position, Delta::new(0, delta.dy), delta.dx, grid_size),
        (true, true) => diagonal_paths(position, delta, grid_size).0,
    }
}

/// The up-to-8 cells touching `position`, orthogonal ones first.
///
/// Duplicates (which arise at corner cells) are removed, so a corner cell
/// yields 7 neighbors and every other cell yields 8.
#[instrument(level = "trace")]
pub fn all_neighbors(position: CubePosition, grid_size: usize) -> Vec<CubePosition> {
    let orthogonal = Direction::ALL
        .into_iter()
        .map(|direction| step(position, direction, grid_size));
    let diagonal = Delta::DIAGONALS
        .into_iter()
        .map(|delta| diagonal_neighbor(position, delta, grid_size));

    let mut neighbors = Vec::with_capacity(8);
    for candidate in orthogonal.chain(diagonal) {
        if candidate != position && !neighbors.contains(&candidate) {
            neighbors.push(candidate);
        }
    }
    neighbors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::CubeFace;
    use proptest::prelude::*;

    const N: usize = 5;

    fn position_strategy() -> impl Strategy<Value = CubePosition> {
        (0..6usize, 0..N, 0..N).prop_map(|(face, x, y)| {
            CubePosition::new(CubeFace::ALL[face], x, y)
        })
    }

    proptest! {
        #[test]
        fn moves_are_total(pos in position_strategy(), dir in 0..4usize) {
            let next = step(pos, Direction::ALL[dir], N);
            prop_assert!(next.is_valid(N));
            prop_assert_ne!(next, pos);
        }

        #[test]
        fn stepping_back_returns_home(pos in position_strategy(), dir in 0..4usize) {
            let direction = Direction::ALL[dir];
            let next = step(pos, direction, N);
            let back = if next.face == pos.face {
                direction.opposite()
            } else {
                let entry = edge_transition(pos.face, direction.edge()).to_edge;
                entry.inward().opposite()
            };
            prop_assert_eq!(step(next, back, N), pos);
        }

        #[test]
        fn neighbors_are_distinct_and_valid(pos in position_strategy()) {
            let neighbors = all_neighbors(pos, N);
            let corner = edges_at_position(pos, N).len() == 2;
            prop_assert_eq!(neighbors.len(), if corner { 7 } else { 8 });
            for neighbor in &neighbors {
                prop_assert!(neighbor.is_valid(N));
                prop_assert!(all_neighbors(*neighbor, N).contains(&pos));
            }
        }

        #[test]
        fn single_edge_diagonals_agree_in_both_orders(pos in position_strategy(), d in 0..4usize) {
            let delta = Delta::DIAGONALS[d];
            let (a, b) = diagonal_paths(pos, delta, N);
            if edges_at_position(pos, N).len() < 2 {
                prop_assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn interior_cell_has_eight_same_face_neighbors() {
        let pos = CubePosition::new(CubeFace::Front, 2, 2);
        let neighbors = all_neighbors(pos, N);
        assert_eq!(neighbors.len(), 8);
        assert!(neighbors.iter().all(|n| n.face == CubeFace::Front));
    }

    #[test]
    fn top_edge_cell_draws_three_neighbors_from_adjacent_face() {
        let pos = CubePosition::new(CubeFace::Front, 2, 4);
        let neighbors = all_neighbors(pos, N);
        assert_eq!(neighbors.len(), 8);
        let across: Vec<_> = neighbors.iter().filter(|n| n.face == CubeFace::Top).collect();
        assert_eq!(across.len(), 3);
        for x in 1..=3 {
            assert!(neighbors.contains(&CubePosition::new(CubeFace::Top, x, 0)));
        }
    }

    #[test]
    fn flipped_edge_diagonals_follow_the_mirror() {
        // TOP's left edge meets LEFT's top edge with the axis reversed.
        let pos = CubePosition::new(CubeFace::Top, 0, 2);
        let neighbors = all_neighbors(pos, N);
        for x in 1..=3 {
            assert!(neighbors.contains(&CubePosition::new(CubeFace::Left, x, 4)));
        }
    }

    #[test]
    fn corner_diagonal_resolves_horizontal_first() {
        let corner = CubePosition::new(CubeFace::Front, 0, 0);
        let (horizontal_first, vertical_first) = diagonal_paths(corner, Delta::new(-1, -1), N);
        assert_eq!(horizontal_first, CubePosition::new(CubeFace::Bottom, 0, 4));
        assert_eq!(vertical_first, CubePosition::new(CubeFace::Left, 4, 0));
        assert_eq!(diagonal_neighbor(corner, Delta::new(-1, -1), N), horizontal_first);

        // Both candidates are already orthogonal neighbors of the corner.
        let neighbors = all_neighbors(corner, N);
        assert_eq!(neighbors.len(), 7);
        assert!(neighbors[..4].contains(&horizontal_first));
        assert!(neighbors[..4].contains(&vertical_first));
    }

    #[test]
    fn crossing_front_right_and_back() {
        let pos = CubePosition::new(CubeFace::Front, 4, 2);
        let across = step(pos, Direction::Right, N);
        assert_eq!(across, CubePosition::new(CubeFace::Right, 0, 2));
        assert_eq!(step(across, Direction::Left, N), pos);

        let up = step(CubePosition::new(CubeFace::Front, 1, 4), Direction::Up, N);
        assert_eq!(up, CubePosition::new(CubeFace::Top, 1, 0));
        assert_eq!(step(up, Direction::Down, N), CubePosition::new(CubeFace::Front, 1, 4));
    }

    #[test]
    fn mirrored_crossings() {
        assert_eq!(
            step(CubePosition::new(CubeFace::Top, 0, 1), Direction::Left, N),
            CubePosition::new(CubeFace::Left, 3, 4)
        );
        assert_eq!(
            step(CubePosition::new(CubeFace::Top, 1, 4), Direction::Up, N),
            CubePosition::new(CubeFace::Back, 3, 4)
        );
    }

    #[test]
    fn edge_classification() {
        assert_eq!(edge_at_position(CubePosition::new(CubeFace::Front, 2, 2), N), None);
        assert_eq!(edge_at_position(CubePosition::new(CubeFace::Front, 2, 4), N), Some(Edge::Top));
        assert_eq!(edge_at_position(CubePosition::new(CubeFace::Front, 0, 2), N), Some(Edge::Left));
        assert_eq!(
            edges_at_position(CubePosition::new(CubeFace::Front, 4, 0), N),
            vec![Edge::Bottom, Edge::Right]
        );
    }
}
