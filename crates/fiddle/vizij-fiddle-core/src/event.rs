//! Event types flowing between players, the widget and its host.

use serde::{Deserialize, Serialize};

/// Signals a preview player reports about its own state.
///
/// Events are queued per player and drained by the borrowing widget, which
/// mirrors them into the view state it exposes to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PlayerEvent {
    /// The rendered scene's length changed (e.g. after a compile).
    DurationChanged { frames: u32 },
    /// The playhead moved.
    FrameChanged { frame: u32 },
    /// Playback was paused or resumed.
    StateChanged { paused: bool },
}

impl PlayerEvent {
    /// Get the name of this event
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::DurationChanged { .. } => "duration_changed",
            Self::FrameChanged { .. } => "frame_changed",
            Self::StateChanged { .. } => "state_changed",
        }
    }
}

/// One-shot effects the widget asks its host to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum WidgetEffect {
    /// Flash the preview surface: a changed document compiled cleanly.
    PulsePreview,
}

impl WidgetEffect {
    /// Get the name of this effect
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::PulsePreview => "pulse_preview",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names() {
        assert_eq!(PlayerEvent::DurationChanged { frames: 10 }.name(), "duration_changed");
        assert_eq!(PlayerEvent::FrameChanged { frame: 3 }.name(), "frame_changed");
        assert_eq!(PlayerEvent::StateChanged { paused: true }.name(), "state_changed");
        assert_eq!(WidgetEffect::PulsePreview.name(), "pulse_preview");
    }
}
