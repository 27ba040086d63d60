//! The directed edge-adjacency table of the cube.
//!
//! Each of the 6 faces has 4 edges, giving 24 directed transitions. Every
//! physical cube edge is shared by two faces, so the table holds 12 pairs of
//! mutually inverse entries.

use crate::face::{CubeFace, Edge};
use serde::{Deserialize, Serialize};
use CubeFace::{Back, Bottom, Front, Left, Right as RightFace, Top};

/// How leaving `from_face` through `from_edge` lands on `to_face`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeTransition {
    /// Face being left.
    pub from_face: CubeFace,
    /// Face being entered.
    pub to_face: CubeFace,
    /// Edge crossed on the source face.
    pub from_edge: Edge,
    /// Edge entered on the destination face.
    pub to_edge: Edge,
    /// The coordinate along the edge is mirrored and lands on the destination `x` axis.
    pub flip_x: bool,
    /// The coordinate along the edge is mirrored and lands on the destination `y` axis.
    pub flip_y: bool,
    /// Quarter-turn rotation (degrees, counter-clockwise about the destination
    /// normal) between the carried-over source up vector and the destination's
    /// canonical up vector.
    pub rotation_offset: u16,
}

impl EdgeTransition {
    /// Whether the coordinate running along the edge is mirrored.
    pub fn is_flipped(&self) -> bool {
        self.flip_x || self.flip_y
    }

    /// The transition that walks back across the same physical edge.
    pub fn inverse(&self) -> &'static EdgeTransition {
        edge_transition(self.to_face, self.to_edge)
    }

    /// Maps a coordinate running along `from_edge` to the coordinate running along `to_edge`.
    pub fn map_parallel(&self, along: usize, grid_size: usize) -> usize {
        if self.is_flipped() {
            grid_size - 1 - along
        } else {
            along
        }
    }

    /// Quarter turns corresponding to [`EdgeTransition::rotation_offset`].
    pub fn quarter_turns(&self) -> u8 {
        ((self.rotation_offset / 90) % 4) as u8
    }
}

const fn t(
    from_face: CubeFace,
    from_edge: Edge,
    to_face: CubeFace,
    to_edge: Edge,
    flipped: bool,
    rotation_offset: u16,
) -> EdgeTransition {
    let horizontal_entry = matches!(to_edge, Edge::Top | Edge::Bottom);
    EdgeTransition {
        from_face,
        to_face,
        from_edge,
        to_edge,
        flip_x: flipped && horizontal_entry,
        flip_y: flipped && !horizontal_entry,
        rotation_offset,
    }
}

/// All 24 directed transitions, ordered by `(face.index(), edge.index())`.
pub const EDGE_TRANSITIONS: [EdgeTransition; 24] = [
    t(Top, Edge::Top, Back, Edge::Top, true, 180),
    t(Top, Edge::Bottom, Front, Edge::Top, false, 0),
    t(Top, Edge::Left, Left, Edge::Top, true, 90),
    t(Top, Edge::Right, RightFace, Edge::Top, false, 270),
    t(Bottom, Edge::Top, Front, Edge::Bottom, false, 0),
    t(Bottom, Edge::Bottom, Back, Edge::Bottom, true, 180),
    t(Bottom, Edge::Left, Left, Edge::Bottom, false, 270),
    t(Bottom, Edge::Right, RightFace, Edge::Bottom, true, 90),
    t(Front, Edge::Top, Top, Edge::Bottom, false, 0),
    t(Front, Edge::Bottom, Bottom, Edge::Top, false, 0),
    t(Front, Edge::Left, Left, Edge::Right, false, 0),
    t(Front, Edge::Right, RightFace, Edge::Left, false, 0),
    t(Back, Edge::Top, Top, Edge::Top, true, 180),
    t(Back, Edge::Bottom, Bottom, Edge::Bottom, true, 180),
    t(Back, Edge::Left, RightFace, Edge::Right, false, 0),
    t(Back, Edge::Right, Left, Edge::Left, false, 0),
    t(Left, Edge::Top, Top, Edge::Left, true, 270),
    t(Left, Edge::Bottom, Bottom, Edge::Left, false, 90),
    t(Left, Edge::Left, Back, Edge::Right, false, 0),
    t(Left, Edge::Right, Front, Edge::Left, false, 0),
    t(RightFace, Edge::Top, Top, Edge::Right, false, 90),
    t(RightFace, Edge::Bottom, Bottom, Edge::Right, true, 270),
    t(RightFace, Edge::Left, Front, Edge::Right, false, 0),
    t(RightFace, Edge::Right, Back, Edge::Left, false, 0),
];

/// Looks up the transition for leaving `face` through `edge`.
pub fn edge_transition(face: CubeFace, edge: Edge) -> &'static EdgeTransition {
    &EDGE_TRANSITIONS[face.index() * 4 + edge.index()]
}

/// One transition per physical cube edge (12 total).
pub fn unique_edges() -> impl Iterator<Item = &'static EdgeTransition> {
    EDGE_TRANSITIONS
        .iter()
        .filter(|t| (t.from_face, t.from_edge) < (t.to_face, t.to_edge))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    #[test]
    fn table_is_indexed_by_face_and_edge() {
        for face in CubeFace::ALL {
            for edge in Edge::ALL {
                let transition = edge_transition(face, edge);
                assert_eq!((transition.from_face, transition.from_edge), (face, edge));
            }
        }
    }

    #[test]
    fn every_transition_has_a_matching_inverse() {
        for transition in &EDGE_TRANSITIONS {
            let inverse = transition.inverse();
            assert_eq!(inverse.to_face, transition.from_face);
            assert_eq!(inverse.to_edge, transition.from_edge);
            assert_eq!(inverse.is_flipped(), transition.is_flipped());
            assert_eq!((transition.rotation_offset + inverse.rotation_offset) % 360, 0);
        }
    }

    #[test]
    fn transitions_agree_with_face_geometry() {
        for transition in &EDGE_TRANSITIONS {
            let from = transition.from_face;
            let to = transition.to_face;
            // Crossing an edge lands on the face the edge points to.
            assert_eq!(from.edge_vector(transition.from_edge), to.normal());
            // And enters through the destination edge that points back.
            assert_eq!(to.edge_vector(transition.to_edge), from.normal());

            let along = |face: CubeFace, edge: Edge| {
                if edge.is_horizontal() { face.right() } else { face.up() }
            };
            let alignment = along(from, transition.from_edge).dot(along(to, transition.to_edge));
            assert_eq!(transition.is_flipped(), alignment < 0.0, "{transition:?}");
        }
    }

    #[test]
    fn twelve_physical_edges() {
        assert_eq!(unique_edges().count(), 12);
    }
}
