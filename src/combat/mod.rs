//! Combat system
//!
//! Implements the fight itself:
//! - Attacker state machines (advance, strike, return)
//! - Boss reactions and the death sequence
//! - Hit effects and damage tasks
//! - Combat logging

use bevy::prelude::*;

pub mod attacker;
pub mod boss;
pub mod components;
pub mod events;
pub mod log;
pub mod systems;

use crate::anim::AnimationSet;
use crate::camera::CameraFx;
use components::{AttackTally, SelectedActor};
use events::*;
use systems::*;

/// Ordering of the per-frame scene work.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArenaSet {
    /// Buttons, keys, scripts and timers emit requests
    Input,
    /// State machines step and emit cues
    Sequence,
    /// Cues turn into boss reactions, camera effects and damage tasks
    Effects,
    /// Leaderboard, camera effect timers
    Bookkeeping,
}

/// Configures the ordering between arena system sets.
pub fn configure_arena_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            ArenaSet::Input,
            ArenaSet::Sequence,
            ArenaSet::Effects,
            ArenaSet::Bookkeeping,
        )
            .chain(),
    );
}

/// Plugin for the combat system
///
/// Expects `Boss`, `DefeatBanner`, `ArenaTuning`, `Viewport` and `GameRng`
/// to be provided by the arena.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        configure_arena_sets(app);

        app
            // Combat events
            .add_event::<AttackRequested>()
            .add_event::<CharacterChangeRequested>()
            .add_event::<ImpactEvent>()
            .add_event::<LethalBlowEvent>()
            .add_event::<BossDefeatedEvent>()
            .add_event::<BossRemovedEvent>()
            .add_event::<DamageEvent>()
            .add_event::<SoundCue>()
            // Resources
            .init_resource::<log::CombatLog>()
            .init_resource::<AnimationSet>()
            .init_resource::<CameraFx>()
            .init_resource::<AttackTally>()
            .init_resource::<SelectedActor>()
            // Systems
            .add_systems(Update, track_scene_time.in_set(ArenaSet::Input))
            .add_systems(
                Update,
                (
                    handle_attack_requests,
                    handle_character_changes,
                    advance_attackers,
                    advance_boss,
                    advance_banner,
                )
                    .chain()
                    .in_set(ArenaSet::Sequence),
            )
            .add_systems(
                Update,
                (resolve_impacts, resolve_lethal_blows)
                    .chain()
                    .in_set(ArenaSet::Effects),
            )
            .add_systems(Update, advance_camera_fx.in_set(ArenaSet::Bookkeeping));
    }
}
