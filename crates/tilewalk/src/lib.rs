pub mod api;
pub mod core;
pub mod components;
pub mod renderer;
pub mod input;
pub mod assets;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::config::GameConfig;
pub use api::types::{Direction, EntityId, PlayerSlot, TextureHandle};
pub use components::animation::{AnimationComponent, FrameSet};
pub use components::entity::Entity;
pub use components::grid::{Cell, GridStore, ResizeMode, BLOCKED};
pub use components::layer::RenderLayer;
pub use components::player::{player_entity, PlayerControl};
pub use components::walker::{AnimationCue, WalkState, WalkStep, Walker};
pub use core::scene::Scene;
pub use core::time::{Cadence, TickClock};
pub use renderer::camera::{CameraFraming, Framing};
pub use renderer::instance::{DrawBuffer, DrawItem, PackedDrawItem};
pub use renderer::traits::Renderer;
pub use input::buttons::{ButtonState, InputEvent, InputSource};
pub use assets::manifest::{MapDefinition, MapManifest, ObjectPlacement, TileRecord};
pub use assets::registry::{TextureManager, TextureRegistry};
pub use assets::sprites::{Character, SpriteSetDef};
pub use error::LoadError;
