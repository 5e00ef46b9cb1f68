//! Thanos Arena - boss-fight vignette
//!
//! Attackers run at a stationary boss, play their attack clips and trigger hit
//! and death effects while a leaderboard tallies synthetic damage tasks. One
//! parameterized scene covers the Solo, Squad and Wave variants.
//!
//! This library exposes the core game modules for testing and reuse.

pub mod anim;
pub mod arena;
pub mod camera;
pub mod cli;
pub mod combat;
pub mod headless;
pub mod keybindings;
pub mod leaderboard;
pub mod settings;
pub mod ui;

// Re-export commonly used types
pub use arena::{ArenaConfig, ArenaPlugin, ArenaRenderPlugin, ArenaTuning, ArenaVariant, Viewport};
pub use combat::log::{CombatLog, CombatLogEventType};
pub use headless::{HeadlessSceneConfig, SceneResult};
pub use leaderboard::Leaderboard;
