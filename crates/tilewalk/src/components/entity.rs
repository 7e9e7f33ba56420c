use std::time::Duration;

use glam::IVec2;

use crate::api::config::GameConfig;
use crate::api::types::{Direction, EntityId, TextureHandle};
use crate::components::animation::{AnimationComponent, FrameSet};
use crate::components::grid::GridStore;
use crate::components::layer::RenderLayer;
use crate::components::player::PlayerControl;
use crate::components::walker::{AnimationCue, WalkState, Walker};
use crate::input::buttons::InputSource;
use crate::renderer::instance::DrawItem;
use crate::renderer::traits::Renderer;

/// Fat Entity: grid placement, screen placement and animation, with
/// optional components for smooth walking and player control.
///
/// The grid position is authoritative. The screen position trails it
/// while a walker animates the move; entities without a walker snap.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Roster index, assigned by the scene on spawn.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Tiles occupied, anchored at the grid position.
    pub footprint: IVec2,
    /// Whether the camera keeps this entity in view.
    pub camera_tracked: bool,
    pub animation: AnimationComponent,
    /// Present on entities driven by player input.
    pub player: Option<PlayerControl>,
    walker: Option<Walker>,
    grid_pos: IVec2,
    screen_pos: IVec2,
    tile_size: i32,
}

impl Entity {
    /// A 1x1 entity parked off screen at grid (-1, -1) with placeholder
    /// frames and no walker.
    pub fn new(config: &GameConfig) -> Self {
        let mut entity = Self {
            id: EntityId(0),
            tag: String::new(),
            footprint: IVec2::ONE,
            camera_tracked: false,
            animation: AnimationComponent::new(FrameSet::placeholder(TextureHandle::MISSING)),
            player: None,
            walker: None,
            grid_pos: IVec2::ZERO,
            screen_pos: IVec2::ZERO,
            tile_size: config.tile_size,
        };
        entity.set_grid_position(IVec2::NEG_ONE, false);
        entity
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_footprint(mut self, footprint: IVec2) -> Self {
        self.footprint = footprint;
        self
    }

    pub fn with_frames(mut self, frames: FrameSet) -> Self {
        self.animation = AnimationComponent::new(frames);
        self
    }

    /// Attach a walker, initially at rest on the current screen position.
    pub fn with_walker(mut self, config: &GameConfig) -> Self {
        self.walker = Some(Walker::from_config(self.screen_pos, config));
        self
    }

    pub fn with_player(mut self, control: PlayerControl) -> Self {
        self.player = Some(control);
        self
    }

    pub fn with_camera_tracking(mut self, tracked: bool) -> Self {
        self.camera_tracked = tracked;
        self
    }

    /// Place on a grid cell without animating.
    pub fn at_grid(mut self, position: IVec2) -> Self {
        self.set_grid_position(position, false);
        self
    }

    // -- Placement --

    pub fn grid_position(&self) -> IVec2 {
        self.grid_pos
    }

    pub fn screen_position(&self) -> IVec2 {
        self.screen_pos
    }

    /// Pixel center of the footprint.
    pub fn center(&self) -> IVec2 {
        self.screen_pos.saturating_add(self.footprint * self.tile_size / 2)
    }

    /// Move to a grid cell. With a walker and `animate`, the screen
    /// position walks there; otherwise it snaps.
    pub fn set_grid_position(&mut self, position: IVec2, animate: bool) {
        self.grid_pos = position;
        self.set_screen_position(position.saturating_mul(IVec2::splat(self.tile_size)), animate);
    }

    /// Move the screen position directly. The grid position is untouched.
    pub fn set_screen_position(&mut self, position: IVec2, animate: bool) {
        let animate = match self.walker.as_mut() {
            Some(walker) => {
                walker.set_destination(position);
                animate
            }
            None => false,
        };
        if !animate {
            self.screen_pos = position;
        }
    }

    pub fn walker(&self) -> Option<&Walker> {
        self.walker.as_ref()
    }

    /// `Idle` once the screen position has caught up with its destination.
    /// Entities without a walker are always idle.
    pub fn walk_state(&self) -> WalkState {
        self.walker
            .as_ref()
            .map_or(WalkState::Idle, |walker| walker.state(self.screen_pos))
    }

    /// Highest collision value under the footprint if it were shifted by
    /// `offset` tiles. Does not move the entity.
    pub fn check_collision_at(&self, grid: &GridStore, offset: IVec2) -> i32 {
        grid.max_collision(self.grid_pos.saturating_add(offset), self.footprint)
    }

    // -- Animation, driven by the walker --

    pub fn advance_frame(&mut self, direction: Direction) {
        self.animation.advance(direction);
    }

    pub fn stop_frame(&mut self) {
        self.animation.stop();
    }

    // -- Per tick --

    /// Advance the walker, then let player control issue moves.
    pub fn run_tick(&mut self, delta: Duration, grid: &GridStore, input: &dyn InputSource) {
        let screen_pos = self.screen_pos;
        if let Some(step) = self.walker.as_mut().and_then(|w| w.tick(delta, screen_pos)) {
            self.screen_pos = step.position;
            match step.cue {
                Some(AnimationCue::Advance(direction)) => self.advance_frame(direction),
                Some(AnimationCue::Stop) => self.stop_frame(),
                None => {}
            }
        }

        if let Some(control) = self.player {
            control.apply(self, grid, input);
        }
    }

    /// Submit the current frame for the facing direction.
    pub fn render(&self, renderer: &mut dyn Renderer) {
        let (texture, mirror) = self.animation.texture();
        renderer.submit_draw_item(
            DrawItem::new(texture, self.screen_pos, RenderLayer::Objects).flipped_horizontally(mirror),
        );
    }
}
