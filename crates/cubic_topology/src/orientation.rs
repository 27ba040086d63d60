//! Keeping on-screen directions stable while the camera follows an agent
//! from one face to the next.

use crate::face::{CubeFace, Direction, Edge};
use crate::transition::edge_transition;
use cgmath::{InnerSpace, Quaternion, Vector3};
use std::f32::consts::FRAC_PI_2;
use tracing::{instrument, trace};

/// Rotation carrying `from`'s normal onto `to`'s normal.
pub fn face_transition_rotation(from: CubeFace, to: CubeFace) -> Quaternion<f32> {
    Quaternion::from_arc(from.normal(), to.normal(), None)
}

/// Rounds each component to the nearest integer.
///
/// Tracked up vectors are always axis-aligned; this removes the drift that
/// repeated quarter-turn rotations would otherwise accumulate.
fn snap_axis(v: Vector3<f32>) -> Vector3<f32> {
    Vector3::new(v.x.round(), v.y.round(), v.z.round())
}

/// Rotates a tracked camera up vector across the edge of `from`.
pub fn rotate_up_across_edge(from: CubeFace, edge: Edge, up: Vector3<f32>) -> Vector3<f32> {
    let to = edge_transition(from, edge).to_face;
    snap_axis(face_transition_rotation(from, to) * up)
}

/// Counter-clockwise quarter turns (0-3) from `face`'s canonical up to `up`.
///
/// The angle is measured in the face plane: the component of `up` along the
/// canonical up vector against its component along the face's right vector.
pub fn visual_rotation(face: CubeFace, up: Vector3<f32>) -> u8 {
    let along_up = up.dot(face.up());
    let along_right = up.dot(face.right());
    let angle = (-along_right).atan2(along_up);
    ((angle / FRAC_PI_2).round() as i32).rem_euclid(4) as u8
}

/// The result of carrying a direction and camera across an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionTransform {
    /// Face entered.
    pub face: CubeFace,
    /// Movement direction in the entered face's local frame.
    pub direction: Direction,
    /// Camera up vector after the transition.
    pub camera_up: Vector3<f32>,
}

/// Carries a local movement direction across the edge it exits through.
///
/// The camera up vector is rotated by the same quaternion that takes the
/// source face onto the destination face. The direction then turns by the
/// difference in visual rotation between the two face/up pairs, so that the
/// movement keeps pointing the same way on screen.
#[instrument(level = "debug")]
pub fn transform_across_edge(
    from_face: CubeFace,
    direction: Direction,
    camera_up: Vector3<f32>,
) -> DirectionTransform {
    let edge = direction.edge();
    let to_face = edge_transition(from_face, edge).to_face;
    let rotated_up = rotate_up_across_edge(from_face, edge, camera_up);

    let before = visual_rotation(from_face, camera_up);
    let after = visual_rotation(to_face, rotated_up);
    let turns = (after + 4 - before) % 4;
    let new_direction = direction.rotated_ccw(turns);
    trace!(%from_face, %to_face, before, after, %direction, %new_direction, "Direction remapped");

    DirectionTransform {
        face: to_face,
        direction: new_direction,
        camera_up: rotated_up,
    }
}

/// Direction-only form of [`transform_across_edge`].
pub fn transform_direction_across_edge(
    from_face: CubeFace,
    direction: Direction,
    camera_up: Vector3<f32>,
) -> Direction {
    transform_across_edge(from_face, direction, camera_up).direction
}
