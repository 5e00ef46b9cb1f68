//! Arena scene
//!
//! [`ArenaPlugin`] builds the scene for one [`ArenaVariant`]: it provides the
//! boss, the banner, the tuning table and the RNG, spawns the starting roster
//! and runs the wave timer. It is window-free, so the headless runner and the
//! integration tests use it directly. [`ArenaRenderPlugin`] adds sprites,
//! backgrounds, audio and keyboard input for the graphical build.

use bevy::prelude::*;
use bevy::transform::TransformSystem;

pub mod config;
pub mod input;
pub mod render;
pub mod setup;
pub mod wave;

pub use config::{ArenaConfig, ArenaTuning, ArenaVariant, Viewport};

use crate::combat::boss::{Boss, DefeatBanner};
use crate::combat::components::GameRng;
use crate::combat::{ArenaSet, CombatPlugin};
use crate::leaderboard::LeaderboardPlugin;

pub struct ArenaPlugin {
    pub config: ArenaConfig,
    pub tuning: ArenaTuning,
    pub viewport: Viewport,
}

impl ArenaPlugin {
    /// Scene with the tuning table from disk.
    pub fn new(config: ArenaConfig) -> Self {
        Self {
            config,
            tuning: ArenaTuning::load_or_default(),
            viewport: Viewport::default(),
        }
    }

    pub fn with_tuning(mut self, tuning: ArenaTuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }
}

impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        let rng = match self.config.seed {
            Some(seed) => {
                info!("Using deterministic RNG with seed: {}", seed);
                GameRng::from_seed(seed)
            }
            None => {
                info!("Using non-deterministic RNG (no seed provided)");
                GameRng::from_entropy()
            }
        };

        app.add_plugins((CombatPlugin, LeaderboardPlugin))
            .insert_resource(self.config.clone())
            .insert_resource(self.tuning.clone())
            .insert_resource(self.viewport)
            .insert_resource(rng)
            .insert_resource(Boss::new(self.tuning.boss.clone(), self.viewport.size()))
            .insert_resource(DefeatBanner::new(self.tuning.banner.clone()))
            .add_systems(Startup, setup::spawn_initial_roster)
            .add_systems(
                Update,
                setup::fit_scene_to_viewport.in_set(ArenaSet::Input),
            );

        if self.config.variant.uses_task_timer() {
            app.insert_resource(wave::WaveTimer::new(self.config.task_interval_secs))
                .add_systems(Update, wave::run_wave_timer.in_set(ArenaSet::Input));
        }
    }
}

/// Sprites, backgrounds, audio and keys. Requires `DefaultPlugins`.
pub struct ArenaRenderPlugin;

impl Plugin for ArenaRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<render::ActorSheets>()
            .init_resource::<render::ParallaxScroll>()
            .add_systems(
                Startup,
                (render::load_actor_sheets, render::spawn_backdrop),
            )
            .add_systems(
                Update,
                (render::track_window_size, input::keyboard_actions)
                    .chain()
                    .in_set(ArenaSet::Input)
                    .before(setup::fit_scene_to_viewport),
            )
            .add_systems(Update, render::measure_loaded_sheets.in_set(ArenaSet::Input))
            .add_systems(
                Update,
                (
                    render::attach_actor_sprites,
                    render::play_sound_cues,
                    render::scroll_parallax,
                )
                    .in_set(ArenaSet::Bookkeeping),
            )
            .add_systems(
                PostUpdate,
                (
                    render::sync_actor_sprites,
                    render::sync_boss_sprite,
                    render::sync_platforms,
                )
                    .before(TransformSystem::TransformPropagate),
            );
    }
}
