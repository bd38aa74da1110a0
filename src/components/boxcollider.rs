use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Axis-aligned bounding box centred on the entity's [`MapPosition`].
///
/// [`MapPosition`]: crate::components::mapposition::MapPosition
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    /// Full width and height of the box.
    pub size: Vec2,
}

impl BoxCollider {
    /// Create a BoxCollider with given size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }

    pub fn from_size(size: Vec2) -> Self {
        Self { size }
    }

    /// Half of the box extent, always non-negative.
    pub fn half_extents(&self) -> Vec2 {
        self.size.abs() * 0.5
    }

    /// Returns (min, max) of the collider AABB for a given centre position.
    /// Handles negative size by normalizing to proper min/max.
    pub fn aabb(&self, position: Vec2) -> (Vec2, Vec2) {
        let half = self.half_extents();
        (position - half, position + half)
    }

    /// AABB vs AABB overlap test against another BoxCollider at a different entity position.
    /// Touching edges do not count as overlap.
    pub fn overlaps(&self, position: Vec2, other: &Self, other_position: Vec2) -> bool {
        let (min_a, max_a) = self.aabb(position);
        let (min_b, max_b) = other.aabb(other_position);
        min_a.x < max_b.x && max_a.x > min_b.x && min_a.y < max_b.y && max_a.y > min_b.y
    }
}
