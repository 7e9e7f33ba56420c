use std::time::Duration;

use tilewalk::{
    ButtonState, Character, Direction, DrawBuffer, GameConfig, InputEvent, LoadError,
    PackedDrawItem, PlayerSlot, Scene, SpriteSetDef, TextureHandle, TextureRegistry,
};

/// Browser key codes the runner understands: arrow keys drive player
/// one, WASD drives player two.
pub fn key_binding(key_code: u32) -> Option<(PlayerSlot, Direction)> {
    let binding = match key_code {
        38 => (PlayerSlot::One, Direction::Up),
        40 => (PlayerSlot::One, Direction::Down),
        37 => (PlayerSlot::One, Direction::Left),
        39 => (PlayerSlot::One, Direction::Right),
        87 => (PlayerSlot::Two, Direction::Up),
        83 => (PlayerSlot::Two, Direction::Down),
        65 => (PlayerSlot::Two, Direction::Left),
        68 => (PlayerSlot::Two, Direction::Right),
        _ => return None,
    };
    Some(binding)
}

/// Wires the scene to a browser host.
///
/// The host forwards key events and frame deltas; after each tick it reads
/// the packed draw list straight out of wasm memory and resolves texture
/// handles to image paths through `texture_path`.
pub struct WebRunner {
    scene: Scene,
    textures: TextureRegistry,
    draw: DrawBuffer,
    buttons: ButtonState,
}

impl WebRunner {
    pub fn new(config: GameConfig) -> Self {
        Self {
            scene: Scene::new(config),
            textures: TextureRegistry::new(),
            draw: DrawBuffer::new(),
            buttons: ButtonState::new(),
        }
    }

    /// Replace the grid with a map definition held in memory.
    pub fn load_map_source(&mut self, text: &str) -> Result<(), LoadError> {
        self.scene.load_map_source(text, &mut self.textures)
    }

    /// Spawn a player using one of the built-in character sprite sets.
    pub fn spawn_player(&mut self, slot: PlayerSlot, character: Character) -> Result<u32, LoadError> {
        self.spawn_player_with(slot, &SpriteSetDef::character(character))
    }

    /// Spawn a player from a sprite set given as JSON.
    pub fn spawn_player_json(&mut self, slot: PlayerSlot, json: &str) -> Result<u32, LoadError> {
        let sprites = SpriteSetDef::from_json(json)?;
        self.spawn_player_with(slot, &sprites)
    }

    fn spawn_player_with(&mut self, slot: PlayerSlot, sprites: &SpriteSetDef) -> Result<u32, LoadError> {
        let id = self.scene.spawn_player(slot, sprites, &mut self.textures)?;
        Ok(id.0)
    }

    /// Returns whether the key is bound.
    pub fn key_down(&mut self, key_code: u32) -> bool {
        match key_binding(key_code) {
            Some((player, direction)) => {
                self.buttons.apply(InputEvent::Pressed { player, direction });
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, key_code: u32) -> bool {
        match key_binding(key_code) {
            Some((player, direction)) => {
                self.buttons.apply(InputEvent::Released { player, direction });
                true
            }
            None => false,
        }
    }

    /// Drop all held keys, e.g. on window blur.
    pub fn release_all(&mut self) {
        self.buttons.clear();
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.scene.set_paused(paused);
    }

    pub fn is_paused(&self) -> bool {
        self.scene.is_paused()
    }

    /// Run one frame. `dt` is in seconds; deltas that are negative, NaN or
    /// too large for a `Duration` count as zero.
    pub fn tick(&mut self, dt: f32) {
        let delta = Duration::try_from_secs_f32(dt.max(0.0)).unwrap_or(Duration::ZERO);
        self.draw.clear();
        self.scene.run_tick(delta, &mut self.draw, &self.buttons);
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    // ---- Pointer accessors for direct memory reads ----

    pub fn draw_items_ptr(&self) -> *const u32 {
        self.draw.packed_ptr()
    }

    pub fn draw_item_count(&self) -> u32 {
        self.draw.packed().len() as u32
    }

    pub fn draw_item_words(&self) -> u32 {
        PackedDrawItem::WORDS as u32
    }

    pub fn draw_items(&self) -> &[PackedDrawItem] {
        self.draw.packed()
    }

    // ---- Camera ----

    pub fn camera_x(&self) -> i32 {
        self.draw.viewport_center().x
    }

    pub fn camera_y(&self) -> i32 {
        self.draw.viewport_center().y
    }

    pub fn viewport_width(&self) -> i32 {
        self.draw.viewport_size().x
    }

    pub fn viewport_height(&self) -> i32 {
        self.draw.viewport_size().y
    }

    // ---- Textures ----

    /// Number of texture handles handed out, the missing texture included.
    pub fn texture_count(&self) -> u32 {
        self.textures.len() as u32
    }

    /// Image path behind a handle. Empty for the missing texture and for
    /// unknown handles.
    pub fn texture_path(&self, handle: u32) -> String {
        self.textures
            .path(TextureHandle(handle))
            .unwrap_or_default()
            .to_string()
    }
}

impl Default for WebRunner {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
