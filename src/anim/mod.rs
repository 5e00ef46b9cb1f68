//! Animation primitives
//!
//! Engine-independent building blocks for the arena choreography:
//! - `tween`: eased numeric interpolation with yoyo
//! - `timeline`: timed cue interpreter
//! - `clips`: per-archetype sprite-sheet catalog and clip playback

pub mod clips;
pub mod timeline;
pub mod tween;

pub use clips::{AnimationSet, Archetype, ClipKind, ClipPlayer, ClipSpec, FRAME_SIZE};
pub use timeline::Timeline;
pub use tween::{Ease, Tween};
