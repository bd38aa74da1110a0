//! Uniform spatial grid over the arena.
//!
//! [`SpatialGrid`] buckets entities into `cells_x × cells_y` cells keyed by
//! `floor(position / cell_size)`. Keys are clamped into the grid, so an
//! entity that has left the arena is still bucketed into the border cell it
//! left through. The boundary sweep relies on this to inspect border cells
//! only.
//!
//! The grid is rebuilt from current positions every tick by
//! [`rebuild_spatial_grid`](crate::systems::spatialgrid::rebuild_spatial_grid)
//! before anything reads it.

use bevy_ecs::prelude::{Entity, Resource};
use glam::Vec2;
use smallvec::SmallVec;

/// Entities bucketed into one cell. Most cells hold only a few entities.
pub type Cell = SmallVec<[Entity; 8]>;

#[derive(Resource, Debug, Clone)]
pub struct SpatialGrid {
    cells_x: usize,
    cells_y: usize,
    cell_size: Vec2,
    /// Row-major: index `y * cells_x + x`.
    cells: Vec<Cell>,
}

impl SpatialGrid {
    /// Build an empty grid of `cells_x × cells_y` cells covering `extent`.
    ///
    /// # Panics
    ///
    /// Panics if either cell count is zero.
    pub fn new(cells_x: usize, cells_y: usize, extent: Vec2) -> Self {
        assert!(
            cells_x > 0 && cells_y > 0,
            "spatial grid needs at least one cell per axis, got {cells_x}x{cells_y}"
        );
        Self {
            cells_x,
            cells_y,
            cell_size: Vec2::new(extent.x / cells_x as f32, extent.y / cells_y as f32),
            cells: vec![Cell::new(); cells_x * cells_y],
        }
    }

    pub fn cells_x(&self) -> usize {
        self.cells_x
    }

    pub fn cells_y(&self) -> usize {
        self.cells_y
    }

    pub fn cell_size(&self) -> Vec2 {
        self.cell_size
    }

    /// Empty every cell, keeping allocated capacity.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    /// Cell coordinates for a world position, clamped into the grid.
    pub fn key(&self, position: Vec2) -> (usize, usize) {
        (
            axis_key(position.x, self.cell_size.x, self.cells_x),
            axis_key(position.y, self.cell_size.y, self.cells_y),
        )
    }

    pub fn insert(&mut self, entity: Entity, position: Vec2) {
        let (x, y) = self.key(position);
        let index = self.index(x, y);
        self.cells[index].push(entity);
    }

    /// Replace the grid contents with the given entity positions.
    pub fn rebuild<I>(&mut self, entities: I)
    where
        I: IntoIterator<Item = (Entity, Vec2)>,
    {
        self.clear();
        for (entity, position) in entities {
            self.insert(entity, position);
        }
    }

    pub fn cell(&self, x: usize, y: usize) -> &[Entity] {
        &self.cells[self.index(x, y)]
    }

    /// Slots available in a cell before it reallocates.
    pub fn cell_capacity(&self, x: usize, y: usize) -> usize {
        self.cells[self.index(x, y)].capacity()
    }

    /// Total number of bucketed entities.
    pub fn len(&self) -> usize {
        self.cells.iter().map(|cell| cell.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }

    /// Coordinates of the outermost cells: full top and bottom rows, then the
    /// left and right columns without their corners. A grid with a single
    /// row or column yields some cells twice.
    pub fn border_cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let (w, h) = (self.cells_x, self.cells_y);
        let rows = (0..w).flat_map(move |x| [(x, 0), (x, h - 1)]);
        let columns = (1..h.saturating_sub(1)).flat_map(move |y| [(0, y), (w - 1, y)]);
        rows.chain(columns)
    }

    /// Coordinates of every cell touched by the rectangle `[min, max]`.
    pub fn cells_overlapping(&self, min: Vec2, max: Vec2) -> impl Iterator<Item = (usize, usize)> {
        let (x0, y0) = self.key(min);
        let (x1, y1) = self.key(max);
        (y0..=y1).flat_map(move |y| (x0..=x1).map(move |x| (x, y)))
    }

    /// Grow every cell's capacity by `n` entities.
    pub fn expand(&mut self, n: usize) {
        for cell in &mut self.cells {
            cell.reserve(n);
        }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.cells_x && y < self.cells_y);
        y * self.cells_x + x
    }
}

fn axis_key(value: f32, cell: f32, count: usize) -> usize {
    let k = (value / cell).floor();
    // NaN and negatives land in the first cell
    if !(k > 0.0) {
        return 0;
    }
    (k as usize).min(count - 1)
}
