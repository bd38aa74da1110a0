//! Arena extent resource.
//!
//! Live entities are expected inside `[0, width] × [0, height]`. The only
//! exception is the tick in which the boundary sweep detects an exit.

use bevy_ecs::prelude::Resource;
use glam::Vec2;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Middle third of the arena along each axis, as (min, max).
    /// Coins appear here so they start away from the edges.
    pub fn spawn_region(&self) -> (Vec2, Vec2) {
        let third = self.extent() / 3.0;
        (third, third * 2.0)
    }

    /// True when a box of `size` centred at `pos` reaches the top or bottom edge.
    pub fn crosses_vertical_edge(&self, pos: Vec2, size: Vec2) -> bool {
        pos.y < size.y || (self.height - pos.y) < size.y
    }

    /// True when a box of `size` centred at `pos` reaches the left or right edge.
    pub fn crosses_horizontal_edge(&self, pos: Vec2, size: Vec2) -> bool {
        pos.x < size.x || (self.width - pos.x) < size.x
    }

    pub fn crosses_edge(&self, pos: Vec2, size: Vec2) -> bool {
        self.crosses_vertical_edge(pos, size) || self.crosses_horizontal_edge(pos, size)
    }
}
