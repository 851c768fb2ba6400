//! WebAssembly bindings for the fiddle widget.
//!
//! A documentation page creates one [`WasmPlayerPool`] and one [`WasmFiddle`]
//! per embedded example. The compile step stays on the JavaScript side: the
//! constructor takes a callback that receives the document text and returns
//! `null`/`undefined` on success or an error message (string or `{message}`
//! object) on failure.

use js_sys::Function;
use wasm_bindgen::prelude::*;

use vizij_fiddle::{
    AspectRatio, DisplayMode, Fiddle, FiddleConfig, PlayerPool, SurfaceId, Transform,
    TransformError, DEFAULT_POOL_CAPACITY,
};

/// Sets up a panic hook to log panic messages to the browser console.
#[wasm_bindgen(start)]
pub fn on_start() {
    console_error_panic_hook::set_once();
}

/// Shared pool of preview players for every fiddle on the page.
#[wasm_bindgen]
pub struct WasmPlayerPool {
    pool: PlayerPool,
}

#[wasm_bindgen]
impl WasmPlayerPool {
    /// Creates a pool. `capacity` defaults to the crate's standard of 3.
    #[wasm_bindgen(constructor)]
    pub fn new(capacity: Option<usize>) -> WasmPlayerPool {
        WasmPlayerPool {
            pool: PlayerPool::new(capacity.unwrap_or(DEFAULT_POOL_CAPACITY)),
        }
    }

    /// Advance every playing player; call once per animation frame.
    #[wasm_bindgen]
    pub fn advance(&mut self, frames: u32) {
        self.pool.advance_all(frames);
    }

    /// Number of players created so far.
    #[wasm_bindgen]
    pub fn player_count(&self) -> usize {
        self.pool.len()
    }
}

/// Adapter turning the page's compile callback into the widget's collaborator.
struct JsTransform {
    callback: Function,
}

impl Transform for JsTransform {
    fn transform(&mut self, source: &str) -> Result<(), TransformError> {
        match self.callback.call1(&JsValue::NULL, &JsValue::from_str(source)) {
            Ok(value) if value.is_null() || value.is_undefined() => Ok(()),
            Ok(value) => Err(TransformError::new(error_message(&value))),
            Err(err) => Err(TransformError::new(error_message(&err))),
        }
    }
}

/// Best-effort extraction of a human-readable message from a JS value.
fn error_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}

/// A WebAssembly-compatible wrapper for one embedded fiddle.
#[wasm_bindgen]
pub struct WasmFiddle {
    widget: Fiddle,
    transform: JsTransform,
}

#[wasm_bindgen]
impl WasmFiddle {
    /// Creates a fiddle from a raw source block.
    ///
    /// `surface` identifies the preview element; `mode` is one of
    /// `"code" | "split" | "preview"` (default split) and `ratio` accepts
    /// `"W/H"` or decimal strings (default 4).
    #[wasm_bindgen(constructor)]
    pub fn new(
        source: &str,
        surface: &str,
        transform: Function,
        mode: Option<String>,
        ratio: Option<String>,
    ) -> WasmFiddle {
        let config = FiddleConfig::new(
            mode.as_deref().map(DisplayMode::from).unwrap_or_default(),
            ratio.as_deref().map(AspectRatio::parse).unwrap_or_default(),
        );
        WasmFiddle {
            widget: Fiddle::new(source, SurfaceId::new(surface), config),
            transform: JsTransform { callback: transform },
        }
    }

    /// Mount the widget: try-borrow a player, compile, autoplay when visible.
    #[wasm_bindgen]
    pub fn mount(&mut self, pool: &mut WasmPlayerPool) {
        self.widget.mount(&mut pool.pool, &mut self.transform);
    }

    /// Unmount the widget, returning its player to the pool.
    #[wasm_bindgen]
    pub fn unmount(&mut self, pool: &mut WasmPlayerPool) {
        self.widget.unmount(&mut pool.pool);
    }

    /// Editor change callback.
    #[wasm_bindgen]
    pub fn on_edit(&mut self, text: &str) {
        self.widget.on_edit(text);
    }

    /// Compile the live document and update the preview (Ctrl-S).
    #[wasm_bindgen]
    pub fn update(&mut self, pool: &mut WasmPlayerPool) {
        self.widget.update(&mut pool.pool, &mut self.transform);
    }

    /// Switch the display mode (`"code" | "split" | "preview"`).
    #[wasm_bindgen]
    pub fn set_mode(&mut self, pool: &mut WasmPlayerPool, mode: &str) {
        self.widget.set_mode(DisplayMode::from(mode), &mut pool.pool);
    }

    /// Select a stored snippet by index.
    #[wasm_bindgen]
    pub fn select_snippet(
        &mut self,
        pool: &mut WasmPlayerPool,
        index: usize,
    ) -> Result<(), JsValue> {
        self.widget
            .select_snippet(index, &mut pool.pool, &mut self.transform)
            .map_err(|e| JsValue::from_str(&format!("Select error: {e}")))
    }

    /// Restore the selected snippet's source and recompile.
    #[wasm_bindgen]
    pub fn reset(&mut self, pool: &mut WasmPlayerPool) {
        self.widget.reset(&mut pool.pool, &mut self.transform);
    }

    /// Play/pause, borrowing and compiling on first play.
    #[wasm_bindgen]
    pub fn toggle_playback(&mut self, pool: &mut WasmPlayerPool) {
        self.widget.toggle_playback(&mut pool.pool, &mut self.transform);
    }

    /// Step one frame back.
    #[wasm_bindgen]
    pub fn previous_frame(&mut self, pool: &mut WasmPlayerPool) {
        self.widget.previous_frame(&mut pool.pool);
    }

    /// Step one frame forward.
    #[wasm_bindgen]
    pub fn next_frame(&mut self, pool: &mut WasmPlayerPool) {
        self.widget.next_frame(&mut pool.pool);
    }

    /// Report the rendered scene's duration in frames.
    #[wasm_bindgen]
    pub fn report_duration(&mut self, pool: &mut WasmPlayerPool, frames: u32) {
        self.widget.report_duration(&mut pool.pool, frames);
    }

    /// Mirror pending player signals into the view state.
    #[wasm_bindgen]
    pub fn pump(&mut self, pool: &mut WasmPlayerPool) {
        self.widget.pump(&mut pool.pool);
    }

    /// Returns the current view state as a JSON object.
    #[wasm_bindgen]
    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.widget.snapshot())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Returns the current view state as a JSON string, for hosts that
    /// prefer text over structured values.
    #[wasm_bindgen]
    pub fn state_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.widget.snapshot())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Names of the stored snippets, in source order.
    #[wasm_bindgen]
    pub fn snippet_names(&self) -> Vec<String> {
        self.widget
            .snippets()
            .iter()
            .map(|s| s.name.clone())
            .collect()
    }

    /// Current editor contents.
    #[wasm_bindgen]
    pub fn doc_text(&self) -> String {
        self.widget.doc().as_str().to_string()
    }

    /// Visible compile error, if any.
    #[wasm_bindgen]
    pub fn error_message(&self) -> Option<String> {
        self.widget.error().map(|e| e.message.clone())
    }

    /// Drain pending one-shot effect names (e.g. `"pulse_preview"`).
    #[wasm_bindgen]
    pub fn take_effects(&mut self) -> Vec<String> {
        self.widget
            .take_effects()
            .into_iter()
            .map(|e| e.name().to_string())
            .collect()
    }

    /// Playhead position as a 0..=1 fraction.
    #[wasm_bindgen]
    pub fn progress(&self) -> f64 {
        self.widget.progress()
    }

    /// Whether the "update preview" affordance should be visible.
    #[wasm_bindgen]
    pub fn needs_update(&self) -> bool {
        self.widget.needs_update()
    }

    /// Whether a player is currently bound to the preview surface.
    #[wasm_bindgen]
    pub fn has_player(&self) -> bool {
        self.widget.has_player()
    }

    /// Current display mode name (`"code" | "split" | "preview"`).
    #[wasm_bindgen]
    pub fn mode(&self) -> String {
        self.widget.mode().name().to_string()
    }

    /// Paused state for the play/pause glyph.
    #[wasm_bindgen]
    pub fn is_paused(&self) -> bool {
        self.widget.is_paused()
    }
}
