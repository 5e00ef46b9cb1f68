//! Headless mode for scripted runs
//!
//! Plays a scene without any graphical output, feeding timed inputs from a
//! JSON script. Suitable for automated testing and balancing runs.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release -- --headless demos/heavy_finish.json
//! ```
//!
//! ## JSON Configuration
//!
//! ```json
//! {
//!   "variant": "Solo",
//!   "random_seed": 7,
//!   "max_duration_secs": 20,
//!   "script": [
//!     { "at_secs": 0.2, "action": "Light" },
//!     { "at_secs": 2.0, "action": "Heavy" }
//!   ]
//! }
//! ```

pub mod config;
pub mod runner;

pub use config::{HeadlessSceneConfig, ScriptAction, ScriptStep};
pub use runner::{
    build_headless_app, run_headless_scene, simulate_scene, HeadlessSceneState, SceneOutcome,
    SceneResult,
};
