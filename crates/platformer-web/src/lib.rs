//! Browser exports for the platformer engine.
//!
//! One runner lives in thread-local storage. The host calls `game_init`
//! once, then `game_tick` from `requestAnimationFrame`, forwarding keyboard
//! events as they arrive. Render instances and game events are read straight
//! out of wasm memory through the pointer/length accessors.

pub mod runner;

pub use runner::GameRunner;

use std::cell::RefCell;

use platformer_engine::{GameConfig, InputEvent, LevelDescriptor};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<GameRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the runner. Returns `None`, with a console warning,
/// before `game_init` has succeeded.
fn with_runner<R>(f: impl FnOnce(&mut GameRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                web_sys::console::warn_1(&"game not initialized; call game_init() first".into());
                None
            }
        }
    })
}

fn js_error(context: &str, err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&format!("{}: {}", context, err)).into()
}

/// Build the runner from optional level and config JSON. Missing level JSON
/// loads the built-in demo; missing config uses defaults.
#[wasm_bindgen]
pub fn game_init(level_json: Option<String>, config_json: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = match config_json {
        Some(json) => GameConfig::from_json(&json).map_err(|e| js_error("config", e))?,
        None => GameConfig::default(),
    };
    let level = match level_json {
        Some(json) => LevelDescriptor::from_json(&json).map_err(|e| js_error("level", e))?,
        None => LevelDescriptor::demo(),
    };

    let runner = GameRunner::new(&level, config).map_err(|e| js_error("level", e))?;
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("platformer: initialized level '{}'", level.name);
    Ok(())
}

#[wasm_bindgen]
pub fn game_start() {
    with_runner(|r| r.start());
}

#[wasm_bindgen]
pub fn game_stop() {
    with_runner(|r| r.stop());
}

#[wasm_bindgen]
pub fn game_toggle() -> bool {
    with_runner(|r| r.toggle()).unwrap_or(false)
}

/// `now_ms` is the `requestAnimationFrame` timestamp.
#[wasm_bindgen]
pub fn game_tick(now_ms: f64) -> u32 {
    with_runner(|r| r.tick(now_ms / 1000.0)).unwrap_or(0)
}

#[wasm_bindgen]
pub fn game_key_down(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
}

#[wasm_bindgen]
pub fn game_key_up(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
}

/// Window lost focus: release every held key.
#[wasm_bindgen]
pub fn game_blur() {
    with_runner(|r| r.push_input(InputEvent::Blur));
}

#[wasm_bindgen]
pub fn game_load_sprites(json: &str) -> Result<(), JsValue> {
    match with_runner(|r| r.load_sprites(json)) {
        Some(result) => result.map_err(|e| js_error("sprites", e)),
        None => Ok(()),
    }
}

#[wasm_bindgen]
pub fn game_set_debug(enabled: bool) {
    with_runner(|r| r.set_debug(enabled));
}

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instance_count()).unwrap_or(0)
}

/// Floats per render instance, for stride math on the host side.
#[wasm_bindgen]
pub fn get_instance_floats() -> u32 {
    platformer_engine::RenderInstance::FLOATS as u32
}

#[wasm_bindgen]
pub fn get_game_events_ptr() -> *const f32 {
    with_runner(|r| r.game_events_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_game_events_len() -> u32 {
    with_runner(|r| r.game_events_len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_world_width() -> f32 {
    with_runner(|r| r.world_width()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_world_height() -> f32 {
    with_runner(|r| r.world_height()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_fps() -> f32 {
    with_runner(|r| r.fps()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_stats() -> Result<String, JsValue> {
    match with_runner(|r| r.stats_json()) {
        Some(result) => result.map_err(|e| js_error("stats", e)),
        None => Ok(String::new()),
    }
}

#[wasm_bindgen]
pub fn get_debug_info() -> String {
    with_runner(|r| r.debug_info()).unwrap_or_default()
}
