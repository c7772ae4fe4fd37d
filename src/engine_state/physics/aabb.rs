//! # AABB Module
//!
//! Axis-aligned bounding boxes with swept, axis-separated collision resolution
//! against static boxes.
//!
//! A resolve cycle looks like this:
//! 1. Any number of `move_by` calls accumulate a pending delta
//! 2. `begin` rewinds the box to its last resolved position
//! 3. `collide(Axis::X)`, `collide(Axis::Y)`, `collide(Axis::Z)` re-apply the
//!    delta one axis at a time, clamping against the static boxes
//! 4. `finish` commits the position and clears the delta
//!
//! Resolving one axis at a time against the swept interval between the last
//! position and the new one keeps fast boxes from tunnelling through thin
//! walls, and lets a box slide along a wall instead of sticking to it.

use cgmath::{Point3, Vector3, Zero};

/// Slack allowed when deciding whether the box started outside an obstacle.
/// A box clamped to `min - size` does not always add back up to `min` exactly.
const FACE_EPSILON: f32 = 1e-4;

/// One of the three world axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    /// The two axes perpendicular to this one.
    fn others(self) -> [usize; 2] {
        match self {
            Axis::X => [1, 2],
            Axis::Y => [0, 2],
            Axis::Z => [0, 1],
        }
    }
}

/// Which axes collided during a resolve cycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AxisCollisions {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl AxisCollisions {
    pub fn any(&self) -> bool {
        self.x || self.y || self.z
    }
}

/// An axis-aligned box, positioned by its minimum corner.
#[derive(Clone, Debug, PartialEq)]
pub struct Aabb {
    pub size: Vector3<f32>,
    position: Point3<f32>,
    last_position: Point3<f32>,
    delta: Vector3<f32>,
}

impl Aabb {
    pub fn new(position: Point3<f32>, size: Vector3<f32>) -> Self {
        Aabb {
            size,
            position,
            last_position: position,
            delta: Vector3::zero(),
        }
    }

    /// The unit box occupying the block cell at `(x, y, z)`.
    pub fn block(x: i32, y: i32, z: i32) -> Self {
        Aabb::new(
            Point3::new(x as f32, y as f32, z as f32),
            Vector3::new(1.0, 1.0, 1.0),
        )
    }

    /// The minimum corner.
    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    /// The maximum corner.
    pub fn max(&self) -> Point3<f32> {
        self.position + self.size
    }

    /// The position committed by the last resolve cycle.
    pub fn last_position(&self) -> Point3<f32> {
        self.last_position
    }

    /// Movement accumulated since the last resolve cycle.
    pub fn delta(&self) -> Vector3<f32> {
        self.delta
    }

    /// Teleports the box, discarding any pending movement.
    pub fn force_move_to(&mut self, position: Point3<f32>) {
        self.position = position;
        self.last_position = position;
        self.delta = Vector3::zero();
    }

    /// Teleports the box by an offset from its current position.
    pub fn force_move(&mut self, d: Vector3<f32>) {
        self.force_move_to(self.position + d);
    }

    /// Moves the box; the movement is checked against obstacles on the next resolve.
    pub fn move_by(&mut self, d: Vector3<f32>) {
        self.position += d;
        self.delta += d;
    }

    /// Rewinds to the last resolved position, ready to re-apply the delta per axis.
    pub fn begin(&mut self) {
        self.position = self.last_position;
    }

    /// Commits the current position and clears the pending delta.
    pub fn finish(&mut self) {
        self.last_position = self.position;
        self.delta = Vector3::zero();
    }

    /// Applies the pending delta along one axis and clamps the box against
    /// every obstacle it would have entered.
    ///
    /// An obstacle is only considered if it overlaps the box on the two other
    /// axes (open intervals, so touching faces do not count) and the box
    /// crossed its near face during this cycle.
    ///
    /// # Returns
    /// Whether the box was clamped.
    pub fn collide(&mut self, axis: Axis, others: &[Aabb]) -> bool {
        let a = axis as usize;
        let d = self.delta[a];
        self.position[a] += d;

        if d == 0.0 {
            return false;
        }

        let mut collided = false;
        for other in others {
            let overlaps = axis.others().iter().all(|&b| {
                other.position[b] - self.size[b] < self.position[b]
                    && self.position[b] < other.position[b] + other.size[b]
            });
            if !overlaps {
                continue;
            }

            let other_min = other.position[a];
            let other_max = other.position[a] + other.size[a];
            if d > 0.0
                && self.last_position[a] + self.size[a] <= other_min + FACE_EPSILON
                && other_min < self.position[a] + self.size[a]
            {
                self.position[a] = other_min - self.size[a];
                collided = true;
            } else if d < 0.0
                && self.position[a] < other_max
                && other_max <= self.last_position[a] + FACE_EPSILON
            {
                self.position[a] = other_max;
                collided = true;
            }
        }

        collided
    }

    /// Runs a full resolve cycle against `others`, X then Y then Z.
    pub fn resolve(&mut self, others: &[Aabb]) -> AxisCollisions {
        self.begin();
        let collisions = AxisCollisions {
            x: self.collide(Axis::X, others),
            y: self.collide(Axis::Y, others),
            z: self.collide(Axis::Z, others),
        };
        self.finish();
        collisions
    }

    /// Whether the interiors of the two boxes overlap.
    pub fn intersects(&self, other: &Aabb) -> bool {
        (0..3).all(|i| {
            other.position[i] - self.size[i] < self.position[i]
                && self.position[i] < other.position[i] + other.size[i]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(x: f32, y: f32, z: f32) -> Aabb {
        Aabb::new(Point3::new(x, y, z), Vector3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn move_accumulates_delta() {
        let mut b = unit(0.0, 0.0, 0.0);
        b.move_by(Vector3::new(1.0, 0.0, 0.0));
        b.move_by(Vector3::new(0.5, 2.0, 0.0));
        assert_eq!(b.position(), Point3::new(1.5, 2.0, 0.0));
        assert_eq!(b.delta(), Vector3::new(1.5, 2.0, 0.0));
        assert_eq!(b.last_position(), Point3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn resolve_without_obstacles_commits_movement() {
        let mut b = unit(0.0, 0.0, 0.0);
        b.move_by(Vector3::new(0.3, -0.2, 0.1));
        let collisions = b.resolve(&[]);
        assert!(!collisions.any());
        assert_eq!(b.position(), Point3::new(0.3, -0.2, 0.1));
        assert_eq!(b.last_position(), b.position());
        assert_eq!(b.delta(), Vector3::zero());
    }

    #[test]
    fn clamps_against_near_face_when_moving_positive() {
        let mut b = unit(0.0, 0.0, 0.0);
        b.move_by(Vector3::new(2.5, 0.0, 0.0));
        let collisions = b.resolve(&[unit(2.0, 0.0, 0.0)]);
        assert!(collisions.x);
        assert_eq!(b.position().x, 1.0);
    }

    #[test]
    fn clamps_against_far_face_when_moving_negative() {
        let mut b = unit(5.0, 3.0, 0.0);
        b.move_by(Vector3::new(0.0, -2.5, 0.0));
        let collisions = b.resolve(&[unit(5.0, 1.0, 0.0)]);
        assert!(collisions.y);
        assert_eq!(b.position().y, 2.0);
    }

    #[test]
    fn touching_faces_do_not_block_sliding() {
        // Resting flush on a floor, moving sideways.
        let mut b = unit(0.0, 1.0, 0.0);
        b.move_by(Vector3::new(0.5, 0.0, 0.0));
        let collisions = b.resolve(&[unit(0.0, 0.0, 0.0), unit(1.0, 0.0, 0.0)]);
        assert!(!collisions.any());
        assert_eq!(b.position().x, 0.5);
    }

    #[test]
    fn force_move_clears_pending_delta() {
        let mut b = unit(0.0, 0.0, 0.0);
        b.move_by(Vector3::new(3.0, 0.0, 0.0));
        b.force_move(Vector3::new(0.0, 10.0, 0.0));
        assert_eq!(b.position(), Point3::new(3.0, 10.0, 0.0));
        assert_eq!(b.last_position(), b.position());
        assert_eq!(b.delta(), Vector3::zero());
    }

    #[test]
    fn intersection_uses_open_intervals() {
        let a = unit(0.0, 0.0, 0.0);
        assert!(a.intersects(&unit(0.5, 0.5, 0.5)));
        assert!(!a.intersects(&unit(1.0, 0.0, 0.0)));
    }
}
