use std::path::Path;
use std::time::Duration;

use glam::IVec2;

use crate::api::config::GameConfig;
use crate::api::types::{EntityId, PlayerSlot};
use crate::assets::manifest::{MapDefinition, MapManifest};
use crate::assets::registry::TextureManager;
use crate::assets::sprites::SpriteSetDef;
use crate::components::animation::FrameSet;
use crate::components::entity::Entity;
use crate::components::grid::GridStore;
use crate::components::player::player_entity;
use crate::error::LoadError;
use crate::input::buttons::InputSource;
use crate::renderer::camera::{CameraFraming, Framing};
use crate::renderer::traits::Renderer;

/// Owns the grid, the entity roster and the camera, and drives the
/// per-tick update order: tiles, then entities, then camera.
///
/// The roster is a flat Vec in spawn order. Entities are never removed,
/// so an entity's id is its index and entity 0 is the primary player.
pub struct Scene {
    config: GameConfig,
    grid: GridStore,
    manifest: MapManifest,
    entities: Vec<Entity>,
    paused: bool,
    framing: Framing,
    playtime: Duration,
}

impl Scene {
    pub fn new(config: GameConfig) -> Self {
        let framing = Framing {
            center: IVec2::ZERO,
            size: config.default_viewport_size(),
            multiplier: config.default_viewport_multiplier,
        };
        Self {
            grid: GridStore::new(config.tile_size),
            manifest: MapManifest::default(),
            entities: Vec::with_capacity(8),
            paused: false,
            framing,
            playtime: Duration::ZERO,
            config,
        }
    }

    pub fn with_manifest(mut self, manifest: MapManifest) -> Self {
        self.manifest = manifest;
        self
    }

    /// Read the map manifest from disk, replacing the current one.
    pub fn load_manifest(&mut self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        self.manifest = MapManifest::load(path)?;
        Ok(())
    }

    /// Load a map by manifest id. Paths are resolved against the
    /// configured data root. On error the current map stays loaded.
    pub fn load_map(&mut self, id: u32, textures: &mut dyn TextureManager) -> Result<(), LoadError> {
        let path = self.config.data_root.join(self.manifest.resolve(id)?);
        let definition = MapDefinition::load(&path)?;
        self.grid.load(Some(id), &definition, textures);
        Ok(())
    }

    /// Load a map from definition text held in memory.
    pub fn load_map_source(
        &mut self,
        text: &str,
        textures: &mut dyn TextureManager,
    ) -> Result<(), LoadError> {
        let definition = MapDefinition::parse(text)?;
        self.grid.load(None, &definition, textures);
        Ok(())
    }

    /// Add an entity to the roster and return its id.
    pub fn spawn(&mut self, mut entity: Entity) -> EntityId {
        let id = EntityId(self.entities.len() as u32);
        entity.id = id;
        log::debug!(
            "spawned entity {} '{}' at grid ({}, {})",
            id.0,
            entity.tag,
            entity.grid_position().x,
            entity.grid_position().y
        );
        self.entities.push(entity);
        id
    }

    /// Spawn a player on the map's spawn cell.
    pub fn spawn_player(
        &mut self,
        slot: PlayerSlot,
        sprites: &SpriteSetDef,
        textures: &mut dyn TextureManager,
    ) -> Result<EntityId, LoadError> {
        let frames = FrameSet::load(sprites, textures)?;
        let entity = player_entity(slot, frames, &self.grid, &self.config);
        Ok(self.spawn(entity))
    }

    /// The primary player, entity 0.
    pub fn player(&self) -> Option<&Entity> {
        self.entities.first()
    }

    pub fn player_mut(&mut self) -> Option<&mut Entity> {
        self.entities.first_mut()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.0 as usize)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id.0 as usize)
    }

    pub fn grid(&self) -> &GridStore {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut GridStore {
        &mut self.grid
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn manifest(&self) -> &MapManifest {
        &self.manifest
    }

    /// Pausing stops entity ticks. Rendering continues.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn camera_center(&self) -> IVec2 {
        self.framing.center
    }

    pub fn viewport_size(&self) -> IVec2 {
        self.framing.size
    }

    /// Camera placement computed by the last tick.
    pub fn framing(&self) -> Framing {
        self.framing
    }

    /// Total unpaused time fed to `run_tick`.
    pub fn playtime(&self) -> Duration {
        self.playtime
    }

    /// Run one tick: submit tiles, tick and submit every entity, then
    /// frame the camera around the tracked entities.
    pub fn run_tick(
        &mut self,
        delta: Duration,
        renderer: &mut dyn Renderer,
        input: &dyn InputSource,
    ) {
        self.grid.render(renderer);

        let mut camera = CameraFraming::new();
        for entity in &mut self.entities {
            if !self.paused {
                entity.run_tick(delta, &self.grid, input);
            }
            entity.render(renderer);
            if entity.camera_tracked {
                camera.track(entity.center());
            }
        }

        let framing = camera.finish(&self.config);
        if framing.multiplier != self.framing.multiplier {
            log::debug!(
                "viewport multiplier {} -> {} (span {}x{})",
                self.framing.multiplier,
                framing.multiplier,
                camera.span().x,
                camera.span().y
            );
        }
        self.framing = framing;

        renderer.set_viewport_center(framing.center);
        renderer.set_viewport_size(framing.size);

        if !self.paused {
            self.playtime += delta;
        }
    }
}
