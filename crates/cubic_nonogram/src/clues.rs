//! Run-length clues.

use crate::types::FaceClues;
use cubic_topology::{CubeFace, CubePosition};

/// Sizes of the consecutive filled runs in `line`; `[0]` for an empty line.
pub fn calculate_line_clue(line: &[bool]) -> Vec<usize> {
    let clue: Vec<usize> = line
        .split(|filled| !filled)
        .map(<[bool]>::len)
        .filter(|run| *run > 0)
        .collect();
    if clue.is_empty() { vec![0] } else { clue }
}

/// Row and column clues of one face of a packed solution.
pub fn face_clues(solution: &[bool], face: CubeFace, grid_size: usize) -> FaceClues {
    let at = |x: usize, y: usize| solution[CubePosition::new(face, x, y).index(grid_size)];
    let rows = (0..grid_size)
        .map(|y| {
            let line: Vec<bool> = (0..grid_size).map(|x| at(x, y)).collect();
            calculate_line_clue(&line)
        })
        .collect();
    let columns = (0..grid_size)
        .map(|x| {
            let line: Vec<bool> = (0..grid_size).map(|y| at(x, y)).collect();
            calculate_line_clue(&line)
        })
        .collect();
    FaceClues { rows, columns }
}

/// Clues for all six faces, in [`CubeFace::index`] order.
pub fn cube_clues(solution: &[bool], grid_size: usize) -> Vec<FaceClues> {
    CubeFace::ALL
        .into_iter()
        .map(|face| face_clues(solution, face, grid_size))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_line_is_zero() {
        assert_eq!(calculate_line_clue(&[false, false, false]), vec![0]);
        assert_eq!(calculate_line_clue(&[]), vec![0]);
    }

    #[test]
    fn runs_are_counted_in_order() {
        let line = [true, true, false, true, false, false, true, true, true];
        assert_eq!(calculate_line_clue(&line), vec![2, 1, 3]);
        assert_eq!(calculate_line_clue(&[true; 4]), vec![4]);
    }

    #[test]
    fn rows_follow_y_and_columns_follow_x() {
        let n = 3;
        let mut solution = vec![false; CubePosition::cell_count(n)];
        for x in 0..3 {
            solution[CubePosition::new(CubeFace::Left, x, 0).index(n)] = true;
        }
        let clues = face_clues(&solution, CubeFace::Left, n);
        assert_eq!(clues.rows, vec![vec![3], vec![0], vec![0]]);
        assert_eq!(clues.columns, vec![vec![1], vec![1], vec![1]]);
        assert_eq!(cube_clues(&solution, n)[CubeFace::Left.index()], clues);
    }
}
