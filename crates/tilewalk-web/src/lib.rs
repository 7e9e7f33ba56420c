pub mod runner;

pub use runner::{key_binding, WebRunner};
pub use tilewalk;

/// Generate the `#[wasm_bindgen]` exports for a tilewalk game.
///
/// Generates:
/// - `thread_local!` storage for the WebRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (init, tick, keys, map/player loading, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// tilewalk_web::export_game!("my-game");
/// ```
///
/// Calls made before `game_init()` are logged; fallible ones return an error.
#[macro_export]
macro_rules! export_game {
    ($game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::WebRunner>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::WebRunner) -> R) -> Option<R> {
            RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
                Some(runner) => Some(f(runner)),
                None => {
                    log::warn!("{}: not initialized, call game_init() first", $game_name);
                    None
                }
            })
        }

        fn not_initialized() -> JsValue {
            JsValue::from_str(concat!($game_name, ": not initialized"))
        }

        fn player_slot(player: u32) -> $crate::tilewalk::PlayerSlot {
            if player == 1 {
                $crate::tilewalk::PlayerSlot::Two
            } else {
                $crate::tilewalk::PlayerSlot::One
            }
        }

        #[wasm_bindgen]
        pub fn game_init(config_json: &str) -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let config = if config_json.trim().is_empty() {
                $crate::tilewalk::GameConfig::default()
            } else {
                $crate::tilewalk::GameConfig::from_json(config_json)
                    .map_err(|e| JsValue::from_str(&e.to_string()))?
            };
            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some($crate::WebRunner::new(config));
            });
            log::info!("{}: initialized", $game_name);
            Ok(())
        }

        #[wasm_bindgen]
        pub fn game_load_map(text: &str) -> Result<(), JsValue> {
            with_runner(|r| r.load_map_source(text))
                .ok_or_else(not_initialized)?
                .map_err(|e| JsValue::from_str(&e.to_string()))
        }

        /// `character`: 0 = male, 1 = female. Returns the entity id.
        #[wasm_bindgen]
        pub fn game_spawn_player(player: u32, character: u32) -> Result<u32, JsValue> {
            let character = if character == 1 {
                $crate::tilewalk::Character::Female
            } else {
                $crate::tilewalk::Character::Male
            };
            with_runner(|r| r.spawn_player(player_slot(player), character))
                .ok_or_else(not_initialized)?
                .map_err(|e| JsValue::from_str(&e.to_string()))
        }

        #[wasm_bindgen]
        pub fn game_spawn_player_json(player: u32, json: &str) -> Result<u32, JsValue> {
            with_runner(|r| r.spawn_player_json(player_slot(player), json))
                .ok_or_else(not_initialized)?
                .map_err(|e| JsValue::from_str(&e.to_string()))
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) -> bool {
            with_runner(|r| r.key_down(key_code)).unwrap_or(false)
        }

        #[wasm_bindgen]
        pub fn game_key_up(key_code: u32) -> bool {
            with_runner(|r| r.key_up(key_code)).unwrap_or(false)
        }

        #[wasm_bindgen]
        pub fn game_blur() {
            with_runner(|r| r.release_all());
        }

        #[wasm_bindgen]
        pub fn game_set_paused(paused: bool) {
            with_runner(|r| r.set_paused(paused));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_draw_items_ptr() -> *const u32 {
            with_runner(|r| r.draw_items_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_draw_item_count() -> u32 {
            with_runner(|r| r.draw_item_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_draw_item_words() -> u32 {
            with_runner(|r| r.draw_item_words()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_camera_x() -> i32 {
            with_runner(|r| r.camera_x()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_camera_y() -> i32 {
            with_runner(|r| r.camera_y()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_viewport_width() -> i32 {
            with_runner(|r| r.viewport_width()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_viewport_height() -> i32 {
            with_runner(|r| r.viewport_height()).unwrap_or(0)
        }

        // ---- Texture accessors ----

        #[wasm_bindgen]
        pub fn get_texture_count() -> u32 {
            with_runner(|r| r.texture_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_texture_path(handle: u32) -> String {
            with_runner(|r| r.texture_path(handle)).unwrap_or_default()
        }
    };
}

#[cfg(target_arch = "wasm32")]
mod exports {
    use wasm_bindgen::prelude::*;

    crate::export_game!("tilewalk");
}
