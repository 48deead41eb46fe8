//! Browser bindings. Thin wrappers over `AppState`; no game rules live here.

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::bone::{ClipTable, FrameSheet, Side};
use crate::config::GameConfig;
use crate::error::BootError;
use crate::round::Round;
use crate::skeleton;
use crate::state::{self, AppState, MemoryScoreboard};
use crate::synth::PoseSynthesizer;

async fn fetch_text(url: &str) -> Result<String, BootError> {
    let window = web_sys::window().ok_or_else(|| BootError::AssetFetch("no window".into()))?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| BootError::AssetFetch(format!("{}: {:?}", url, e)))?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|_| BootError::AssetFetch(format!("{}: not a Response", url)))?;
    if !response.ok() {
        return Err(BootError::AssetFetch(format!(
            "{}: HTTP {}",
            url,
            response.status()
        )));
    }
    let text = response
        .text()
        .map_err(|e| BootError::AssetFetch(format!("{}: {:?}", url, e)))?;
    JsFuture::from(text)
        .await
        .map_err(|e| BootError::AssetFetch(format!("{}: {:?}", url, e)))?
        .as_string()
        .ok_or_else(|| BootError::AssetFetch(format!("{}: body is not text", url)))
}

async fn load(config_json: Option<String>, clip_table_url: Option<String>) -> Result<AppState, BootError> {
    let config = match config_json {
        Some(json) => GameConfig::from_json(&json)?,
        None => GameConfig::default(),
    };

    // Sprite art comes with its own clip table; without one, draw vectors from a baked sheet
    let (clips, sheet) = match clip_table_url {
        Some(url) => (ClipTable::from_json(&fetch_text(&url).await?)?, None),
        None => {
            let clips = ClipTable::procedural(config.frames_per_clip);
            let sheet = FrameSheet::bake(&clips, &PoseSynthesizer::default());
            (clips, Some(sheet))
        }
    };

    let seed = getrandom::u64().map_err(|e| BootError::Entropy(e.to_string()))?;
    let round = Round::new(config, clips, seed);
    Ok(AppState::new(round, Box::new(MemoryScoreboard::default()), sheet))
}

/// Load config and clip table, then install the app state.
///
/// Any failure here is fatal: the returned promise rejects with the message.
#[wasm_bindgen]
pub async fn boot(config_json: Option<String>, clip_table_url: Option<String>) -> Result<(), JsValue> {
    crate::init_logging();

    match load(config_json, clip_table_url).await {
        Ok(app) => {
            state::initialize_app_state(app);
            log::info!("Summit reflex core ready");
            Ok(())
        }
        Err(e) => {
            log::error!("Boot failed: {}", e);
            Err(JsValue::from_str(&e.to_string()))
        }
    }
}

#[wasm_bindgen]
pub fn start_round() {
    state::with_app_state_mut(|app| app.start_round());
}

/// Buffer a side press (0 = left, 1 = right). Unknown codes are dropped.
#[wasm_bindgen]
pub fn queue_side(code: u8) {
    let Some(side) = Side::from_code(code) else {
        log::warn!("Ignoring unknown side code {}", code);
        return;
    };
    state::with_app_state_mut(|app| app.queue_side(side));
}

/// Advance one host frame. `dt_ms` is the raw requestAnimationFrame delta.
#[wasm_bindgen]
pub fn frame(dt_ms: f32) {
    state::with_app_state_mut(|app| {
        app.frame(dt_ms / 1000.0);
    });
}

#[wasm_bindgen]
pub fn render_state() -> JsValue {
    state::with_app_state(|app| serde_wasm_bindgen::to_value(&app.render_state()))
        .and_then(|result| result.ok())
        .unwrap_or(JsValue::NULL)
}

/// Events since the last call, as an array of tagged objects
#[wasm_bindgen]
pub fn drain_events() -> JsValue {
    state::with_app_state_mut(|app| serde_wasm_bindgen::to_value(&app.drain_events()))
        .and_then(|result| result.ok())
        .unwrap_or(JsValue::NULL)
}

/// Current pose as a flat stroke buffer, `STROKE_FLOATS` floats per stroke
#[wasm_bindgen]
pub fn pose_strokes(width: f32, height: f32) -> Vec<f32> {
    state::with_app_state(|app| skeleton::flatten(&app.pose_strokes(width, height)))
        .unwrap_or_default()
}

#[wasm_bindgen]
pub fn stroke_floats() -> usize {
    skeleton::STROKE_FLOATS
}

/// Seed the best score from host storage
#[wasm_bindgen]
pub fn set_best_score(best: u32) {
    state::with_app_state_mut(|app| {
        app.scoreboard = Box::new(MemoryScoreboard::with_best(best));
    });
}

#[wasm_bindgen]
pub fn best_score() -> u32 {
    state::with_app_state(|app| app.scoreboard.best()).unwrap_or(0)
}
