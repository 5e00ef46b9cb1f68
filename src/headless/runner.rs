//! Headless scene execution
//!
//! Runs a scripted scene without any graphical output, suitable for automated testing.

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::arena::ArenaPlugin;
use crate::combat::attacker::Attacker;
use crate::combat::boss::{Boss, DefeatBanner};
use crate::combat::components::{AttackTally, GameRng};
use crate::combat::events::{AttackRequested, CharacterChangeRequested};
use crate::combat::log::{CombatLog, CombatLogEventType};
use crate::combat::ArenaSet;
use crate::camera::CameraFx;
use crate::leaderboard::{record_damage_events, Leaderboard, RankedEntry};

use super::config::{HeadlessSceneConfig, ScriptStep};

const FRAME_SECS: f64 = 1.0 / 60.0;

/// How a headless scene ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SceneOutcome {
    /// The boss died and the banner finished fading in
    Defeated,
    /// The script ran out and every actor is back home
    Settled,
    /// `max_duration_secs` elapsed first
    TimedOut,
}

/// Result of a completed headless scene
#[derive(Debug, Clone, Serialize)]
pub struct SceneResult {
    pub outcome: SceneOutcome,
    pub boss_defeated: bool,
    pub banner_visible: bool,
    /// Real seconds since the scene started
    pub elapsed_secs: f32,
    pub leaderboard: Vec<RankedEntry>,
    pub attacks_light: u32,
    pub attacks_heavy: u32,
    pub attacks_rejected: u32,
    pub impacts: u32,
    pub random_seed: Option<u64>,
}

impl fmt::Display for SceneResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Outcome: {:?} after {:.2}s", self.outcome, self.elapsed_secs)?;
        writeln!(
            f,
            "Attacks: {} light, {} heavy, {} dropped, {} impacts",
            self.attacks_light, self.attacks_heavy, self.attacks_rejected, self.impacts
        )?;
        match self.random_seed {
            Some(seed) => writeln!(f, "Seed: {}", seed)?,
            None => writeln!(f, "Seed: none")?,
        }
        write!(f, "Leaderboard:")?;
        for entry in &self.leaderboard {
            write!(f, "\n  {}", entry)?;
        }
        Ok(())
    }
}

/// Resource to track headless scene state
#[derive(Resource)]
pub struct HeadlessSceneState {
    script: Vec<ScriptStep>,
    next_step: usize,
    pub max_duration: f32,
    pub elapsed_time: f32,
    pub output_path: Option<String>,
    /// Input-driven scenes may end once the script is spent
    can_settle: bool,
    /// Save the log and print a summary when the scene ends
    pub report: bool,
    pub scene_complete: bool,
    pub result: Option<SceneResult>,
}

impl HeadlessSceneState {
    pub fn new(config: &HeadlessSceneConfig, report: bool) -> Self {
        Self {
            script: config.sorted_script(),
            next_step: 0,
            max_duration: config.max_duration_secs,
            elapsed_time: 0.0,
            output_path: config.output_path.clone(),
            can_settle: config.variant.accepts_input() && !config.script.is_empty(),
            report,
            scene_complete: false,
            result: None,
        }
    }

    pub fn script_finished(&self) -> bool {
        self.next_step >= self.script.len()
    }

    /// Steps due at the current elapsed time, advancing the cursor past them.
    fn take_due(&mut self) -> &[ScriptStep] {
        let start = self.next_step;
        while self
            .script
            .get(self.next_step)
            .is_some_and(|step| step.at_secs <= self.elapsed_time)
        {
            self.next_step += 1;
        }
        &self.script[start..self.next_step]
    }
}

/// Plugin for headless scene execution
pub struct HeadlessPlugin {
    pub config: HeadlessSceneConfig,
    pub report: bool,
}

impl Plugin for HeadlessPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(ArenaPlugin::new(self.config.to_arena_config()))
            .insert_resource(HeadlessSceneState::new(&self.config, self.report))
            .add_systems(Update, feed_script.in_set(ArenaSet::Input))
            .add_systems(
                Update,
                check_scene_end
                    .in_set(ArenaSet::Bookkeeping)
                    .after(record_damage_events),
            )
            .add_systems(PostUpdate, exit_on_complete);
    }
}

/// Send every script step whose time has come.
fn feed_script(
    time: Res<Time>,
    mut state: ResMut<HeadlessSceneState>,
    mut attacks: EventWriter<AttackRequested>,
    mut changes: EventWriter<CharacterChangeRequested>,
    mut combat_log: ResMut<CombatLog>,
) {
    if state.scene_complete {
        return;
    }
    state.elapsed_time += time.delta_secs();

    for step in state.take_due() {
        let slot = step.actor();
        match step.action.attack_kind() {
            Some(kind) => {
                attacks.send(AttackRequested { slot, kind });
            }
            None => {
                changes.send(CharacterChangeRequested { slot });
            }
        }
        trace!("Script step at {:.2}s: {:?} for {}", step.at_secs, step.action, slot);
        combat_log.log(
            CombatLogEventType::SceneEvent,
            format!("Script: {:?} for {}", step.action, slot),
        );
    }
}

/// Finish on a fully shown banner, a settled scene or the timeout.
#[allow(clippy::too_many_arguments)]
fn check_scene_end(
    mut state: ResMut<HeadlessSceneState>,
    boss: Res<Boss>,
    banner: Res<DefeatBanner>,
    fx: Res<CameraFx>,
    attackers: Query<&Attacker>,
    tally: Res<AttackTally>,
    leaderboard: Res<Leaderboard>,
    rng: Res<GameRng>,
    mut combat_log: ResMut<CombatLog>,
) {
    if state.scene_complete {
        return;
    }

    let outcome = if banner.is_fully_shown() {
        SceneOutcome::Defeated
    } else if state.elapsed_time >= state.max_duration {
        SceneOutcome::TimedOut
    } else if state.can_settle
        && state.script_finished()
        && boss.is_alive()
        && fx.is_idle()
        && attackers.iter().all(|a| !a.is_busy())
    {
        SceneOutcome::Settled
    } else {
        return;
    };

    combat_log.log(
        CombatLogEventType::SceneEvent,
        format!("Scene ended: {:?}", outcome),
    );
    info!("Headless scene ended ({:?}) after {:.2}s", outcome, state.elapsed_time);

    let result = SceneResult {
        outcome,
        boss_defeated: !boss.is_alive(),
        banner_visible: banner.is_visible(),
        elapsed_secs: state.elapsed_time,
        leaderboard: leaderboard.ranking(),
        attacks_light: tally.light,
        attacks_heavy: tally.heavy,
        attacks_rejected: tally.rejected,
        impacts: tally.impacts,
        random_seed: rng.seed,
    };

    if state.report {
        println!("{}", result);
        match combat_log.save_to_file(state.output_path.as_deref()) {
            Ok(filename) => println!("Scene complete. Log saved to: {}", filename),
            Err(e) => eprintln!("Failed to save combat log: {}", e),
        }
    }

    state.result = Some(result);
    state.scene_complete = true;
}

/// Exit the app when the scene is complete
fn exit_on_complete(state: Res<HeadlessSceneState>, mut exit: EventWriter<AppExit>) {
    if state.scene_complete {
        exit.send(AppExit::Success);
    }
}

/// Headless app stepped by hand with a fixed 60 Hz clock.
///
/// Used by [`simulate_scene`] and by tests that need to poke the world
/// between frames.
pub fn build_headless_app(config: HeadlessSceneConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            FRAME_SECS,
        )))
        .add_plugins(HeadlessPlugin {
            config,
            report: false,
        });
    app.finish();
    app.cleanup();
    app
}

/// Run a scene to completion as fast as possible and return its result.
pub fn simulate_scene(config: HeadlessSceneConfig) -> Result<SceneResult, String> {
    config.validate()?;
    // Headroom past the timeout for the first zero-length frame
    let max_frames = (config.max_duration_secs as f64 / FRAME_SECS).ceil() as usize + 10;

    let mut app = build_headless_app(config);
    for _ in 0..max_frames {
        app.update();
        if let Some(result) = app
            .world()
            .get_resource::<HeadlessSceneState>()
            .and_then(|state| state.result.clone())
        {
            return Ok(result);
        }
    }
    Err(format!("Scene did not finish within {} frames", max_frames))
}

/// Run a headless scene with the given configuration
pub fn run_headless_scene(config: HeadlessSceneConfig) -> Result<(), String> {
    config.validate()?;

    println!("Starting headless scene...");
    println!("  Variant: {}", config.variant);
    println!("  Script steps: {}", config.script.len());
    println!("  Max duration: {:.0}s", config.max_duration_secs);

    let exit = App::new()
        // Minimal plugins - no window, no rendering
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                FRAME_SECS,
            ))),
        )
        .add_plugins(HeadlessPlugin {
            config,
            report: true,
        })
        .run();

    match exit {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => Err(format!("Headless scene exited with code {}", code)),
    }
}
