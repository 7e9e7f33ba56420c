//! Grid store: tile texture and collision value for every map cell.
//!
//! Storage is a dense row-major array (index = y * width + x) that grows on
//! demand while a map loads. Anything outside the allocated area reads as
//! blocked, so an empty or half-loaded map never lets an entity walk into
//! the void.

use glam::IVec2;

use crate::api::types::TextureHandle;
use crate::assets::manifest::{MapDefinition, ObjectPlacement, MAX_MAP_EXTENT};
use crate::assets::registry::TextureManager;
use crate::components::layer::RenderLayer;
use crate::renderer::instance::DrawItem;
use crate::renderer::traits::Renderer;

/// Collision value of unset and out-of-bounds cells.
/// Any value at or above it blocks movement.
pub const BLOCKED: i32 = 1;

/// One grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub tile: TextureHandle,
    /// Severity; `>= BLOCKED` cannot be entered.
    pub collision: i32,
    /// Map layer the tile was placed on. Stored only; all tiles draw on
    /// the terrain layer.
    pub layer: i32,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            tile: TextureHandle::MISSING,
            collision: BLOCKED,
            layer: 0,
        }
    }
}

/// How `GridStore::resize` treats the requested index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeMode {
    /// Grow each axis independently so the index fits. Never shrinks.
    Grow,
    /// Size becomes exactly index + 1 per axis. `(-1, -1)` empties the store.
    Exact,
}

#[derive(Debug, Clone)]
pub struct GridStore {
    tile_size: i32,
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    spawn: IVec2,
    map_id: Option<u32>,
    objects: Vec<ObjectPlacement>,
}

impl GridStore {
    /// Create an empty, zero-sized store.
    pub fn new(tile_size: i32) -> Self {
        Self {
            tile_size,
            width: 0,
            height: 0,
            cells: Vec::new(),
            spawn: IVec2::ZERO,
            map_id: None,
            objects: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// Default spawn of the loaded map.
    pub fn spawn(&self) -> IVec2 {
        self.spawn
    }

    /// Id of the loaded map, if it came through the manifest.
    pub fn map_id(&self) -> Option<u32> {
        self.map_id
    }

    /// Object placements of the loaded map. Not spawned as entities.
    pub fn objects(&self) -> &[ObjectPlacement] {
        &self.objects
    }

    fn index_of(&self, pos: IVec2) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    pub fn cell(&self, pos: IVec2) -> Option<&Cell> {
        self.index_of(pos).map(|index| &self.cells[index])
    }

    /// Collision value at a cell; `BLOCKED` outside the allocated area.
    pub fn collision(&self, pos: IVec2) -> i32 {
        self.cell(pos).map_or(BLOCKED, |cell| cell.collision)
    }

    /// Highest collision value over a `size` rectangle anchored at `origin`.
    /// An empty rectangle reads as 0.
    pub fn max_collision(&self, origin: IVec2, size: IVec2) -> i32 {
        let mut collision = 0;
        for x in 0..size.x {
            for y in 0..size.y {
                collision = collision.max(self.collision(origin.saturating_add(IVec2::new(x, y))));
            }
        }
        collision
    }

    /// Resize so that `(x, y)` is a valid index (see `ResizeMode`).
    /// Existing cells keep their contents; new cells are `Cell::default()`.
    /// Each axis is capped at `MAX_MAP_EXTENT` cells.
    pub fn resize(&mut self, x: i32, y: i32, mode: ResizeMode) {
        let want = |index: i32| (index.clamp(-1, MAX_MAP_EXTENT - 1) + 1) as usize;
        let (want_w, want_h) = (want(x), want(y));
        let (new_w, new_h) = match mode {
            ResizeMode::Grow => (self.width.max(want_w), self.height.max(want_h)),
            ResizeMode::Exact => (want_w, want_h),
        };
        if new_w == self.width && new_h == self.height {
            return;
        }

        let mut cells = vec![Cell::default(); new_w * new_h];
        for row in 0..self.height.min(new_h) {
            for col in 0..self.width.min(new_w) {
                cells[row * new_w + col] = self.cells[row * self.width + col];
            }
        }
        self.cells = cells;
        self.width = new_w;
        self.height = new_h;
    }

    /// Store a cell, growing the grid to fit. Positions outside
    /// `0..MAX_MAP_EXTENT` are ignored.
    pub fn set_cell(&mut self, pos: IVec2, cell: Cell) {
        if pos.min_element() < 0 || pos.max_element() >= MAX_MAP_EXTENT {
            return;
        }
        self.resize(pos.x, pos.y, ResizeMode::Grow);
        if let Some(index) = self.index_of(pos) {
            self.cells[index] = cell;
        }
    }

    /// Replace all grid content with a parsed map definition.
    pub fn load(
        &mut self,
        map_id: Option<u32>,
        definition: &MapDefinition,
        textures: &mut dyn TextureManager,
    ) {
        self.resize(-1, -1, ResizeMode::Exact);
        self.map_id = map_id;
        self.spawn = definition.spawn;

        for record in &definition.tiles {
            let tile = textures.load_texture(&record.path);
            self.set_cell(
                record.position,
                Cell {
                    tile,
                    collision: record.collision,
                    layer: record.layer,
                },
            );
        }

        self.objects = definition.objects.clone();
        for object in &self.objects {
            log::warn!(
                "object {} at ({}, {}) not spawned",
                object.path,
                object.position.x,
                object.position.y
            );
        }

        log::info!(
            "loaded map {:?}: {}x{} cells, {} tiles, spawn ({}, {})",
            map_id,
            self.width,
            self.height,
            definition.tiles.len(),
            self.spawn.x,
            self.spawn.y
        );
    }

    /// Submit every cell at its pixel position on the terrain layer.
    pub fn render(&self, renderer: &mut dyn Renderer) {
        for x in 0..self.width {
            for y in 0..self.height {
                let cell = &self.cells[y * self.width + x];
                let position = IVec2::new(x as i32, y as i32) * self.tile_size;
                renderer.submit_draw_item(DrawItem::new(cell.tile, position, RenderLayer::Terrain));
            }
        }
    }

    /// Number of allocated cells.
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::registry::TextureRegistry;
    use crate::renderer::instance::DrawBuffer;

    fn open(grid: &mut GridStore, x: i32, y: i32) {
        grid.set_cell(
            IVec2::new(x, y),
            Cell {
                collision: 0,
                ..Cell::default()
            },
        );
    }

    #[test]
    fn empty_grid_is_blocked_everywhere() {
        let grid = GridStore::new(16);
        assert_eq!(grid.capacity(), 0);
        for pos in [IVec2::ZERO, IVec2::new(-1, 0), IVec2::new(3, 9)] {
            assert_eq!(grid.collision(pos), BLOCKED);
        }
    }

    #[test]
    fn out_of_bounds_is_blocked() {
        let mut grid = GridStore::new(16);
        open(&mut grid, 0, 0);
        open(&mut grid, 1, 1);
        assert_eq!(grid.collision(IVec2::new(1, 1)), 0);
        assert_eq!(grid.collision(IVec2::new(2, 0)), BLOCKED);
        assert_eq!(grid.collision(IVec2::new(0, -1)), BLOCKED);
        // Grown but never set.
        assert_eq!(grid.collision(IVec2::new(1, 0)), BLOCKED);
    }

    #[test]
    fn grow_is_per_axis_and_never_shrinks() {
        let mut grid = GridStore::new(16);
        grid.resize(4, 0, ResizeMode::Grow);
        grid.resize(0, 2, ResizeMode::Grow);
        assert_eq!((grid.width(), grid.height()), (5, 3));
        grid.resize(1, 1, ResizeMode::Grow);
        assert_eq!((grid.width(), grid.height()), (5, 3));
    }

    #[test]
    fn grow_keeps_cells() {
        let mut grid = GridStore::new(16);
        open(&mut grid, 1, 1);
        grid.resize(6, 4, ResizeMode::Grow);
        assert_eq!(grid.collision(IVec2::new(1, 1)), 0);
    }

    #[test]
    fn exact_minus_one_empties() {
        let mut grid = GridStore::new(16);
        open(&mut grid, 3, 3);
        grid.resize(-1, -1, ResizeMode::Exact);
        assert_eq!((grid.width(), grid.height()), (0, 0));
        assert_eq!(grid.collision(IVec2::ZERO), BLOCKED);
    }

    #[test]
    fn growth_is_capped_at_map_extent() {
        let mut grid = GridStore::new(16);
        grid.set_cell(IVec2::new(i32::MAX, 0), Cell { collision: 0, ..Cell::default() });
        assert_eq!(grid.capacity(), 0);

        grid.resize(i32::MAX, 2, ResizeMode::Grow);
        assert_eq!(grid.width(), MAX_MAP_EXTENT as usize);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.collision(IVec2::new(MAX_MAP_EXTENT, 0)), BLOCKED);
    }

    #[test]
    fn max_collision_over_footprint() {
        // 3x3 open grid with one blocked cell at (1, 1).
        let mut grid = GridStore::new(16);
        for x in 0..3 {
            for y in 0..3 {
                open(&mut grid, x, y);
            }
        }
        grid.set_cell(IVec2::new(1, 1), Cell { collision: 2, ..Cell::default() });

        assert_eq!(grid.max_collision(IVec2::new(0, 0), IVec2::new(2, 2)), 2);
        assert_eq!(grid.max_collision(IVec2::new(1, 1), IVec2::new(2, 2)), 2);
        assert_eq!(grid.max_collision(IVec2::new(0, 2), IVec2::new(2, 1)), 0);
        // Hanging off the edge reads the fail-closed default.
        assert_eq!(grid.max_collision(IVec2::new(2, 2), IVec2::new(2, 1)), BLOCKED);
    }

    #[test]
    fn load_replaces_previous_map() {
        let mut textures = TextureRegistry::new();
        let mut grid = GridStore::new(16);
        let first = MapDefinition::parse("0 0\n5 5 a.png 0 0").unwrap();
        grid.load(Some(1), &first, &mut textures);
        assert_eq!((grid.width(), grid.height()), (6, 6));

        let second = MapDefinition::parse("1 2\n1 0 b.png 0 3\n0 1 obj.txt").unwrap();
        grid.load(Some(2), &second, &mut textures);
        assert_eq!((grid.width(), grid.height()), (2, 1));
        assert_eq!(grid.spawn(), IVec2::new(1, 2));
        assert_eq!(grid.map_id(), Some(2));
        assert_eq!(grid.collision(IVec2::new(5, 5)), BLOCKED);

        let cell = grid.cell(IVec2::new(1, 0)).unwrap();
        assert_eq!(cell.collision, 0);
        assert_eq!(cell.layer, 3);
        assert_eq!(textures.path(cell.tile), Some("b.png"));
        assert!(grid.cell(IVec2::new(0, 0)).unwrap().tile.is_missing());
        // Object placements do not touch the grid.
        assert_eq!(grid.objects().len(), 1);
        assert_eq!(grid.collision(IVec2::new(0, 1)), BLOCKED);
    }

    #[test]
    fn render_emits_every_cell_on_terrain() {
        let mut textures = TextureRegistry::new();
        let mut grid = GridStore::new(16);
        let map = MapDefinition::parse("0 0\n1 2 grass.png 0 0").unwrap();
        grid.load(None, &map, &mut textures);

        let mut buf = DrawBuffer::new();
        grid.render(&mut buf);
        assert_eq!(buf.len(), 6);
        assert!(buf.items().iter().all(|item| item.layer == RenderLayer::Terrain));

        let grass = textures.get("grass.png").unwrap();
        let drawn = buf.items().iter().find(|item| item.texture == grass).unwrap();
        assert_eq!(drawn.position, IVec2::new(16, 32));
    }
}
