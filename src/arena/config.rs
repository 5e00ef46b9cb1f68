//! Arena configuration
//!
//! One scene serves every variant. [`ArenaConfig`] picks the variant and the
//! seed; [`ArenaTuning`] carries every layout and timing constant and is
//! loaded from `assets/config/tuning.ron`, falling back to the built-in
//! values when the file is missing or invalid.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::anim::Archetype;
use crate::camera::CameraTuning;
use crate::combat::attacker::{ActorSlot, AttackerTuning, Footing, MAX_SLOTS};
use crate::combat::boss::{BannerTuning, BossTuning};
use crate::leaderboard::DamageEventSource;

pub const TUNING_PATH: &str = "assets/config/tuning.ron";

/// Which flavor of the scene to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ArenaVariant {
    /// One actor on the ground, driven by input
    #[default]
    Solo,
    /// Four actors on the ground and on platforms; input drives the selected one
    Squad,
    /// Actors spawn and attack on a timer
    Wave,
}

impl ArenaVariant {
    pub fn all() -> [ArenaVariant; 3] {
        [ArenaVariant::Solo, ArenaVariant::Squad, ArenaVariant::Wave]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ArenaVariant::Solo => "Solo",
            ArenaVariant::Squad => "Squad",
            ArenaVariant::Wave => "Wave",
        }
    }

    /// Actors present when the scene starts.
    pub fn initial_roster(&self) -> usize {
        match self {
            ArenaVariant::Solo => 1,
            ArenaVariant::Squad => MAX_SLOTS,
            ArenaVariant::Wave => 0,
        }
    }

    pub fn max_roster(&self) -> usize {
        match self {
            ArenaVariant::Solo => 1,
            ArenaVariant::Squad | ArenaVariant::Wave => MAX_SLOTS,
        }
    }

    /// Whether buttons and keys trigger attacks.
    pub fn accepts_input(&self) -> bool {
        !matches!(self, ArenaVariant::Wave)
    }

    pub fn uses_task_timer(&self) -> bool {
        matches!(self, ArenaVariant::Wave)
    }
}

impl fmt::Display for ArenaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ArenaVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "solo" => Ok(ArenaVariant::Solo),
            "squad" => Ok(ArenaVariant::Squad),
            "wave" => Ok(ArenaVariant::Wave),
            _ => Err(format!(
                "Unknown variant: '{}'. Valid variants: solo, squad, wave",
                s
            )),
        }
    }
}

/// Scene setup chosen at launch.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    pub variant: ArenaVariant,
    /// Seed for the scene RNG; entropy when absent
    pub seed: Option<u64>,
    /// Wave variant: seconds between automatic attacks
    pub task_interval_secs: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            variant: ArenaVariant::Solo,
            seed: None,
            task_interval_secs: 1.6,
        }
    }
}

impl ArenaConfig {
    pub fn new(variant: ArenaVariant) -> Self {
        Self {
            variant,
            ..default()
        }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.task_interval_secs <= 0.0 {
            return Err("task_interval_secs must be positive".to_string());
        }
        Ok(())
    }
}

/// Squad layout: raised platforms for odd slots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SquadTuning {
    /// Horizontal distance between neighbouring homes
    pub spacing: f32,
    /// Height gained per platform level
    pub platform_step: f32,
    pub platform_width: f32,
    pub platform_thickness: f32,
}

impl Default for SquadTuning {
    fn default() -> Self {
        Self {
            spacing: 90.0,
            platform_step: 140.0,
            platform_width: 180.0,
            platform_thickness: 18.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveTuning {
    pub spacing: f32,
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self { spacing: 70.0 }
    }
}

/// Background scroll speeds in px/s.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxTuning {
    pub far_speed: f32,
    pub near_speed: f32,
    /// Vertical offset of the near layer
    pub near_offset_y: f32,
}

impl Default for ParallaxTuning {
    fn default() -> Self {
        Self {
            far_speed: 6.0,
            near_speed: 18.0,
            near_offset_y: 200.0,
        }
    }
}

/// Every tunable constant of the scene.
#[derive(Resource, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaTuning {
    pub attacker: AttackerTuning,
    pub boss: BossTuning,
    pub banner: BannerTuning,
    pub camera: CameraTuning,
    pub squad: SquadTuning,
    pub wave: WaveTuning,
    pub parallax: ParallaxTuning,
    pub tasks: DamageEventSource,
}

impl ArenaTuning {
    pub fn from_ron(contents: &str) -> Result<Self, String> {
        let tuning: ArenaTuning =
            ron::from_str(contents).map_err(|e| format!("Failed to parse tuning: {}", e))?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_ron(&contents)
    }

    /// Load the tuning table, or the built-in values when it is unusable.
    pub fn load_or_default() -> Self {
        match Self::load_from_file(Path::new(TUNING_PATH)) {
            Ok(tuning) => {
                info!("Loaded arena tuning from {}", TUNING_PATH);
                tuning
            }
            Err(e) => {
                warn!("{}; using built-in tuning", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.tasks.validate()?;
        let durations = [
            ("attacker.light_dash_secs", self.attacker.light_dash_secs),
            ("attacker.return_secs", self.attacker.return_secs),
            ("attacker.heavy.dash_secs", self.attacker.heavy.dash_secs),
            ("boss.death.rise_secs", self.boss.death.rise_secs),
            ("boss.death.fall_secs", self.boss.death.fall_secs),
            ("boss.death.blink_interval_secs", self.boss.death.blink_interval_secs),
        ];
        for (name, value) in durations {
            if value <= 0.0 {
                return Err(format!("{} must be positive", name));
            }
        }
        if self.attacker.scale <= 0.0 || self.boss.scale <= 0.0 {
            return Err("sprite scales must be positive".to_string());
        }
        Ok(())
    }

    /// Home position and footing of `slot` in `variant`.
    pub fn home_for(&self, variant: ArenaVariant, slot: ActorSlot) -> (Vec2, Footing) {
        let base = Vec2::new(self.attacker.spawn_x, self.attacker.ground_y);
        let i = slot.index() as f32;
        match variant {
            ArenaVariant::Solo => (base, Footing::Ground),
            ArenaVariant::Squad => {
                let x = base.x + i * self.squad.spacing;
                if slot.index() % 2 == 0 {
                    (Vec2::new(x, base.y), Footing::Ground)
                } else {
                    let level = (slot.index() as u8 + 1) / 2;
                    let y = base.y - level as f32 * self.squad.platform_step;
                    (Vec2::new(x, y), Footing::Platform(level))
                }
            }
            ArenaVariant::Wave => (Vec2::new(base.x + i * self.wave.spacing, base.y), Footing::Ground),
        }
    }

    /// Starting skin for `slot`; squads mix archetypes.
    pub fn archetype_for(&self, variant: ArenaVariant, slot: ActorSlot) -> Archetype {
        match variant {
            ArenaVariant::Solo => Archetype::Fighter,
            ArenaVariant::Squad | ArenaVariant::Wave => {
                Archetype::all()[slot.index() % Archetype::all().len()]
            }
        }
    }

    /// Screen-space y of a platform's top surface.
    pub fn platform_top(&self, level: u8) -> f32 {
        self.attacker.ground_y - level as f32 * self.squad.platform_step
    }
}

/// Current drawable size in logical pixels.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Convert a screen-space point (origin top-left, +y down) to world space.
    pub fn to_world(&self, screen: Vec2) -> Vec2 {
        Vec2::new(screen.x - self.width / 2.0, self.height / 2.0 - screen.y)
    }
}
