//! Fiddle Widget Core
//!
//! An embeddable "fiddle": an in-page code editor paired with a live animation
//! preview, used by documentation sites to let readers edit and run example
//! snippets inline. This crate is host-agnostic: it owns every state
//! transition (snippet selection, compile-on-demand, player borrowing,
//! transport, display modes) and leaves rendering, keyboard wiring and the
//! playback engine itself to the embedding host.

pub mod config;
pub mod document;
pub mod error;
pub mod event;
pub mod player;
pub mod pool;
pub mod snippet;
pub mod transform;
pub mod widget;

// Re-export common types for convenience
pub use config::{AspectRatio, DisplayMode, FiddleConfig};
pub use document::DocText;
pub use error::FiddleError;
pub use event::{PlayerEvent, WidgetEffect};
pub use player::{PlayerSnapshot, PreviewPlayer};
pub use pool::{PlayerHandle, PlayerPool, SurfaceId, DEFAULT_POOL_CAPACITY};
pub use snippet::{parse_snippet_block, Snippet};
pub use transform::{AcceptAll, Transform, TransformError};
pub use widget::{Fiddle, FiddleSnapshot, Selection};

/// Fiddle widget result type
pub type Result<T> = core::result::Result<T, FiddleError>;
