//! Minimal preview player: the transport surface of the playback engine,
//! reduced to what a fiddle observes and drives.
//!
//! Rendering and the playback algorithm live in the host engine. This type
//! keeps the playhead, the pause flag and the scene duration, and queues
//! change events for the borrowing widget to mirror. The host reports the
//! compiled scene's duration and drives the playhead once per animation
//! frame via [`advance`](PreviewPlayer::advance).

use serde::Serialize;

use crate::config::AspectRatio;
use crate::event::PlayerEvent;

/// Transport state of one pooled preview player.
///
/// The playhead ranges over `0..duration`; a zero duration means nothing has
/// been rendered yet and every transport action is inert.
#[derive(Debug)]
pub struct PreviewPlayer {
    duration: u32,
    frame: u32,
    paused: bool,
    ratio: AspectRatio,
    events: Vec<PlayerEvent>,
}

impl PreviewPlayer {
    pub(crate) fn new(ratio: AspectRatio) -> Self {
        Self {
            duration: 0,
            frame: 0,
            paused: true,
            ratio,
            events: Vec::new(),
        }
    }

    /// Scene length in frames.
    #[inline]
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Current playhead position.
    #[inline]
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Whether playback is paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Aspect ratio of the bound preview surface.
    #[inline]
    pub fn ratio(&self) -> AspectRatio {
        self.ratio
    }

    pub(crate) fn set_ratio(&mut self, ratio: AspectRatio) {
        self.ratio = ratio;
    }

    /// Report a new scene duration (typically after a compile). Clamps the
    /// playhead into the new range.
    pub fn set_duration(&mut self, frames: u32) {
        if self.duration != frames {
            self.duration = frames;
            self.events.push(PlayerEvent::DurationChanged { frames });
        }
        let max = frames.saturating_sub(1);
        if self.frame > max {
            self.frame = max;
            self.events.push(PlayerEvent::FrameChanged { frame: max });
        }
    }

    /// Pause or resume playback. `Some(true)` forces play, `Some(false)`
    /// forces pause, `None` toggles.
    pub fn toggle_playback(&mut self, play: Option<bool>) {
        let play = play.unwrap_or(self.paused);
        let paused = !play;
        if paused != self.paused {
            self.paused = paused;
            self.events.push(PlayerEvent::StateChanged { paused });
        }
    }

    /// Step the playhead one frame back.
    pub fn request_previous_frame(&mut self) {
        if self.frame > 0 {
            self.frame -= 1;
            self.events.push(PlayerEvent::FrameChanged { frame: self.frame });
        }
    }

    /// Step the playhead one frame forward.
    pub fn request_next_frame(&mut self) {
        if self.frame + 1 < self.duration {
            self.frame += 1;
            self.events.push(PlayerEvent::FrameChanged { frame: self.frame });
        }
    }

    /// Move the playhead to an absolute frame, clamped into range.
    pub fn seek(&mut self, frame: u32) {
        let frame = frame.min(self.duration.saturating_sub(1));
        if frame != self.frame {
            self.frame = frame;
            self.events.push(PlayerEvent::FrameChanged { frame });
        }
    }

    /// Advance the playhead while playing, wrapping at the scene end.
    pub fn advance(&mut self, frames: u32) {
        if self.paused || self.duration == 0 || frames == 0 {
            return;
        }
        self.frame = (self.frame + frames) % self.duration;
        self.events.push(PlayerEvent::FrameChanged { frame: self.frame });
    }

    /// Reassignment reset: pending events belong to the previous borrower and
    /// are discarded; the new borrower syncs from the emitted base state.
    pub(crate) fn reset(&mut self) {
        self.events.clear();
        self.duration = 0;
        self.frame = 0;
        self.paused = true;
        self.events.push(PlayerEvent::DurationChanged { frames: 0 });
        self.events.push(PlayerEvent::FrameChanged { frame: 0 });
        self.events.push(PlayerEvent::StateChanged { paused: true });
    }

    pub(crate) fn take_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Current transport state as a plain value.
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            duration: self.duration,
            frame: self.frame,
            paused: self.paused,
        }
    }
}

/// Snapshot of a player's transport state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayerSnapshot {
    pub duration: u32,
    pub frame: u32,
    pub paused: bool,
}
