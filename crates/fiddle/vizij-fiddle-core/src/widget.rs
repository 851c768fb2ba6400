//! The fiddle widget: editor document, snippet picker, compile wiring and
//! preview transport in one state machine.
//!
//! Hosts render; this type owns every transition. The collaborating
//! [`PlayerPool`] and [`Transform`] are passed into the operations that need
//! them rather than stored on the widget.

use serde::Serialize;

use crate::config::{AspectRatio, DisplayMode, FiddleConfig};
use crate::document::DocText;
use crate::error::FiddleError;
use crate::event::{PlayerEvent, WidgetEffect};
use crate::player::PreviewPlayer;
use crate::pool::{PlayerHandle, PlayerPool, SurfaceId};
use crate::snippet::{parse_snippet_block, Snippet};
use crate::transform::{Transform, TransformError};

/// Which entry the snippet picker highlights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// A stored snippet, by index.
    Snippet(usize),
    /// The live document diverged from every stored snippet.
    Custom,
}

/// One live fiddle instance.
pub struct Fiddle {
    surface: SurfaceId,
    mode: DisplayMode,
    ratio: AspectRatio,
    snippets: Vec<Snippet>,
    selected: usize,
    /// Current editor contents; replaced on every keystroke.
    doc: DocText,
    /// Last document the transform accepted; what the preview is showing.
    last_doc: Option<DocText>,
    error: Option<TransformError>,
    handle: Option<PlayerHandle>,
    // Mirrored player state, fed by `pump`.
    duration: u32,
    frame: u32,
    paused: bool,
    effects: Vec<WidgetEffect>,
}

impl Fiddle {
    /// Create a widget from a raw source block. The first snippet becomes the
    /// live document; no player is borrowed until [`mount`](Self::mount).
    pub fn new(source_block: &str, surface: SurfaceId, config: FiddleConfig) -> Self {
        let snippets = parse_snippet_block(source_block);
        let doc = snippets[0].source.clone();
        Self {
            surface,
            mode: config.mode,
            ratio: config.ratio,
            snippets,
            selected: 0,
            doc,
            last_doc: None,
            error: None,
            handle: None,
            duration: 0,
            frame: 0,
            paused: true,
            effects: Vec::new(),
        }
    }

    // ---------------------------------------------------------------- lifecycle

    /// First mount. Attempts a non-exclusive borrow; when granted, compiles
    /// the initial document (without the pulse) and starts playback unless
    /// the widget opens in source-only mode.
    pub fn mount(&mut self, pool: &mut PlayerPool, transform: &mut dyn Transform) {
        if self.handle.is_some() {
            return;
        }
        let Some(handle) = pool.try_borrow(&self.surface, self.ratio) else {
            log::debug!("fiddle {} mounted without a player", self.surface);
            return;
        };
        self.handle = Some(handle);
        let doc = self.doc.clone();
        self.apply_update(pool, transform, doc, false);
        if self.mode.shows_preview() {
            self.with_player(pool, |p| p.toggle_playback(Some(true)));
        }
        self.pump(pool);
    }

    /// Release the player loan. Only the first call closes it.
    pub fn unmount(&mut self, pool: &mut PlayerPool) {
        if let Some(handle) = self.handle.take() {
            pool.release(handle);
        }
        self.duration = 0;
        self.frame = 0;
        self.paused = true;
    }

    // ---------------------------------------------------------------- editing

    /// Editor callback: a keystroke produced a new document. Clears the
    /// visible compile error until the next attempt.
    pub fn on_edit(&mut self, doc: impl Into<DocText>) {
        self.doc = doc.into();
        self.error = None;
    }

    /// Compile the live document and make it the preview content.
    pub fn update(&mut self, pool: &mut PlayerPool, transform: &mut dyn Transform) {
        let doc = self.doc.clone();
        self.apply_update(pool, transform, doc, true);
    }

    /// Shared compile path. Ensures a player is borrowed for the surface,
    /// runs the transform, and either records the new last-good document
    /// (pulsing the preview when it changed and `animate` is set) or surfaces
    /// the error and leaves the previous render untouched.
    fn apply_update(
        &mut self,
        pool: &mut PlayerPool,
        transform: &mut dyn Transform,
        doc: DocText,
        animate: bool,
    ) {
        self.ensure_player(pool);
        match transform.transform(doc.as_str()) {
            Ok(()) => {
                let changed = self.last_doc.as_ref() != Some(&doc);
                if animate && changed {
                    self.effects.push(WidgetEffect::PulsePreview);
                }
                self.error = None;
                self.last_doc = Some(doc);
                log::debug!("fiddle {} compiled (changed: {})", self.surface, changed);
            }
            Err(err) => {
                log::debug!("fiddle {} compile failed: {}", self.surface, err);
                self.error = Some(err);
            }
        }
    }

    // ---------------------------------------------------------------- snippets

    /// Replace the live document with a stored snippet and compile it.
    pub fn select_snippet(
        &mut self,
        index: usize,
        pool: &mut PlayerPool,
        transform: &mut dyn Transform,
    ) -> Result<(), FiddleError> {
        let count = self.snippets.len();
        let snippet = self
            .snippets
            .get(index)
            .ok_or(FiddleError::SnippetOutOfRange { index, count })?;
        let doc = snippet.source.clone();
        self.selected = index;
        self.doc = doc.clone();
        self.apply_update(pool, transform, doc, true);
        Ok(())
    }

    /// Restore the selected snippet's source and recompile.
    pub fn reset(&mut self, pool: &mut PlayerPool, transform: &mut dyn Transform) {
        let doc = self.snippets[self.selected].source.clone();
        self.doc = doc.clone();
        self.apply_update(pool, transform, doc, true);
    }

    /// Replace the raw source block. Snippets are recomputed and the numeric
    /// selection is kept (clamped into range), even though it may now point
    /// at a different snippet than before.
    pub fn set_source(&mut self, source_block: &str) {
        self.snippets = parse_snippet_block(source_block);
        if self.selected >= self.snippets.len() {
            self.selected = self.snippets.len() - 1;
        }
    }

    /// Picker state: `Custom` whenever the live document has unsaved edits.
    pub fn selection(&self) -> Selection {
        if self.has_changed() {
            Selection::Custom
        } else {
            Selection::Snippet(self.selected)
        }
    }

    /// Whether the live document differs from the last compiled one.
    pub fn has_changed_since_update(&self) -> bool {
        matches!(&self.last_doc, Some(last) if *last != self.doc)
    }

    /// Whether the live document diverged from the selected snippet or from
    /// the last compiled document.
    pub fn has_changed(&self) -> bool {
        self.doc != self.snippets[self.selected].source || self.has_changed_since_update()
    }

    /// Whether the host should offer the "update preview" affordance.
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.has_changed_since_update()
    }

    // ---------------------------------------------------------------- modes

    /// Switch the display mode. Hiding the preview pauses playback; no other
    /// transition has side effects.
    pub fn set_mode(&mut self, mode: DisplayMode, pool: &mut PlayerPool) {
        if mode == DisplayMode::Code {
            self.with_player(pool, |p| p.toggle_playback(Some(false)));
        }
        self.mode = mode;
        self.pump(pool);
    }

    /// Current display mode.
    #[inline]
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    // ---------------------------------------------------------------- transport

    /// Play/pause. With no player yet, performs an exclusive borrow, compiles
    /// the live document and starts playback; otherwise compiles first only
    /// if nothing was ever compiled, then toggles.
    pub fn toggle_playback(&mut self, pool: &mut PlayerPool, transform: &mut dyn Transform) {
        if !self.handle_is_live(pool) {
            self.ensure_player(pool);
            if self.handle.is_none() {
                return;
            }
            let doc = self.doc.clone();
            self.apply_update(pool, transform, doc, true);
            self.with_player(pool, |p| p.toggle_playback(Some(true)));
        } else {
            if self.last_doc.is_none() {
                let doc = self.doc.clone();
                self.apply_update(pool, transform, doc, true);
            }
            self.with_player(pool, |p| p.toggle_playback(None));
        }
        self.pump(pool);
    }

    /// Step one frame back; inert without a player.
    pub fn previous_frame(&mut self, pool: &mut PlayerPool) {
        self.with_player(pool, |p| p.request_previous_frame());
        self.pump(pool);
    }

    /// Step one frame forward; inert without a player.
    pub fn next_frame(&mut self, pool: &mut PlayerPool) {
        self.with_player(pool, |p| p.request_next_frame());
        self.pump(pool);
    }

    /// Host callback: the playback engine finished rendering the compiled
    /// scene and knows its length.
    pub fn report_duration(&mut self, pool: &mut PlayerPool, frames: u32) {
        self.with_player(pool, |p| p.set_duration(frames));
        self.pump(pool);
    }

    // ---------------------------------------------------------------- mirror

    /// Drain pending player signals into the mirrored transport state. Also
    /// notices when the player was reassigned to another widget and falls
    /// back to the playerless state.
    pub fn pump(&mut self, pool: &mut PlayerPool) {
        let Some(handle) = self.handle.as_ref() else {
            return;
        };
        if pool.player(handle).is_none() {
            let stale = self.handle.take().expect("handle checked above");
            pool.release(stale);
            self.duration = 0;
            self.frame = 0;
            self.paused = true;
            log::debug!("fiddle {} lost its player to another widget", self.surface);
            return;
        }
        for event in pool.take_events(handle) {
            match event {
                PlayerEvent::DurationChanged { frames } => self.duration = frames,
                PlayerEvent::FrameChanged { frame } => self.frame = frame,
                PlayerEvent::StateChanged { paused } => self.paused = paused,
            }
        }
    }

    /// Mirrored scene duration in frames.
    #[inline]
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Mirrored playhead position.
    #[inline]
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Paused state for the play/pause glyph; a missing player reads as
    /// paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.handle.is_none() || self.paused
    }

    /// Playhead position as a 0..=1 fraction, for the progress bar.
    pub fn progress(&self) -> f64 {
        if self.duration == 0 {
            0.0
        } else {
            self.frame as f64 / self.duration as f64
        }
    }

    /// Whether a player is currently borrowed. Hosts show the "press play to
    /// preview" placeholder when this is false.
    #[inline]
    pub fn has_player(&self) -> bool {
        self.handle.is_some()
    }

    // ---------------------------------------------------------------- accessors

    /// Visible compile error, if the most recent attempt failed.
    #[inline]
    pub fn error(&self) -> Option<&TransformError> {
        self.error.as_ref()
    }

    /// Current editor contents.
    #[inline]
    pub fn doc(&self) -> &DocText {
        &self.doc
    }

    /// Last document the transform accepted.
    #[inline]
    pub fn last_compiled(&self) -> Option<&DocText> {
        self.last_doc.as_ref()
    }

    /// Stored snippets, in source order.
    #[inline]
    pub fn snippets(&self) -> &[Snippet] {
        &self.snippets
    }

    /// The surface this widget renders into.
    #[inline]
    pub fn surface(&self) -> &SurfaceId {
        &self.surface
    }

    /// Configured preview aspect ratio.
    #[inline]
    pub fn ratio(&self) -> AspectRatio {
        self.ratio
    }

    /// Drain pending one-shot effects for the host to render.
    pub fn take_effects(&mut self) -> Vec<WidgetEffect> {
        std::mem::take(&mut self.effects)
    }

    /// View state as a plain serializable value.
    pub fn snapshot(&self) -> FiddleSnapshot {
        FiddleSnapshot {
            mode: self.mode,
            selected: match self.selection() {
                Selection::Snippet(index) => Some(index),
                Selection::Custom => None,
            },
            snippet_names: self.snippets.iter().map(|s| s.name.clone()).collect(),
            error: self.error.as_ref().map(|e| e.message.clone()),
            has_player: self.has_player(),
            duration: self.duration,
            frame: self.frame,
            paused: self.is_paused(),
            progress: self.progress(),
            needs_update: self.needs_update(),
        }
    }

    // ---------------------------------------------------------------- internal

    /// Make sure a live player is held, performing an exclusive borrow if the
    /// previous one was reassigned or none was ever granted.
    fn ensure_player(&mut self, pool: &mut PlayerPool) {
        if let Some(handle) = &self.handle {
            if pool.player(handle).is_some() {
                return;
            }
            // Stolen meanwhile; close the dead loan and forget its state.
            let stale = self.handle.take().expect("handle checked above");
            pool.release(stale);
            self.duration = 0;
            self.frame = 0;
            self.paused = true;
        }
        self.handle = pool.borrow(&self.surface, self.ratio);
    }

    fn handle_is_live(&self, pool: &PlayerPool) -> bool {
        self.handle
            .as_ref()
            .map_or(false, |h| pool.player(h).is_some())
    }

    fn with_player<R>(
        &self,
        pool: &mut PlayerPool,
        f: impl FnOnce(&mut PreviewPlayer) -> R,
    ) -> Option<R> {
        let handle = self.handle.as_ref()?;
        pool.player_mut(handle).map(f)
    }
}

/// View state of a fiddle, serialized for hosts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FiddleSnapshot {
    pub mode: DisplayMode,
    /// Index of the highlighted snippet; `None` means the `Custom` entry.
    pub selected: Option<usize>,
    pub snippet_names: Vec<String>,
    pub error: Option<String>,
    pub has_player: bool,
    pub duration: u32,
    pub frame: u32,
    pub paused: bool,
    pub progress: f64,
    pub needs_update: bool,
}

impl FiddleSnapshot {
    /// Serialize to JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        serde_json::to_string(self).map_err(Into::into)
    }
}
