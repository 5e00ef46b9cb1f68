//! Actor animation catalog and clip playback
//!
//! Every archetype ships six sprite sheets (idle, walk, run and three attacks),
//! each a single row of 128×128 frames. [`AnimationSet`] describes those clips;
//! [`ClipPlayer`] plays one of them at a time with pause-at-frame and resume,
//! and reports completion of non-looping clips.

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Side length of one sprite-sheet frame, in pixels.
pub const FRAME_SIZE: u32 = 128;

/// Character skins an attacker can wear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Archetype {
    #[default]
    Fighter,
    Shinobi,
    Samurai,
}

impl Archetype {
    pub fn all() -> [Archetype; 3] {
        [Archetype::Fighter, Archetype::Shinobi, Archetype::Samurai]
    }

    /// The archetype the CHANGE action switches to.
    pub fn next(self) -> Archetype {
        match self {
            Archetype::Fighter => Archetype::Shinobi,
            Archetype::Shinobi => Archetype::Samurai,
            Archetype::Samurai => Archetype::Fighter,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Archetype::Fighter => "fighter",
            Archetype::Shinobi => "shinobi",
            Archetype::Samurai => "samurai",
        }
    }

    /// Directory under `assets/avatars/` holding this archetype's sheets.
    pub fn asset_dir(&self) -> &'static str {
        match self {
            Archetype::Fighter => "Fighter",
            Archetype::Shinobi => "Shinobi",
            Archetype::Samurai => "Samurai",
        }
    }
}

/// Named clips available to every archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClipKind {
    Idle,
    Walk,
    Run,
    Attack1,
    Attack2,
    Attack3,
}

impl ClipKind {
    pub fn all() -> [ClipKind; 6] {
        [
            ClipKind::Idle,
            ClipKind::Walk,
            ClipKind::Run,
            ClipKind::Attack1,
            ClipKind::Attack2,
            ClipKind::Attack3,
        ]
    }

    /// The three light-attack variants.
    pub fn attacks() -> [ClipKind; 3] {
        [ClipKind::Attack1, ClipKind::Attack2, ClipKind::Attack3]
    }

    pub fn is_attack(&self) -> bool {
        matches!(self, ClipKind::Attack1 | ClipKind::Attack2 | ClipKind::Attack3)
    }

    pub fn key(&self) -> &'static str {
        match self {
            ClipKind::Idle => "idle",
            ClipKind::Walk => "walk",
            ClipKind::Run => "run",
            ClipKind::Attack1 => "attack1",
            ClipKind::Attack2 => "attack2",
            ClipKind::Attack3 => "attack3",
        }
    }

    pub fn sheet_file(&self) -> &'static str {
        match self {
            ClipKind::Idle => "Idle.png",
            ClipKind::Walk => "Walk.png",
            ClipKind::Run => "Run.png",
            ClipKind::Attack1 => "Attack_1.png",
            ClipKind::Attack2 => "Attack_2.png",
            ClipKind::Attack3 => "Attack_3.png",
        }
    }

    /// Playback rate; locomotion loops, attacks play once.
    fn default_timing(&self) -> (f32, bool) {
        match self {
            ClipKind::Idle => (8.0, true),
            ClipKind::Walk => (12.0, true),
            ClipKind::Run => (16.0, true),
            ClipKind::Attack1 | ClipKind::Attack2 | ClipKind::Attack3 => (14.0, false),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipSpec {
    pub frames: usize,
    pub fps: f32,
    pub looping: bool,
}

impl ClipSpec {
    pub fn duration(&self) -> f32 {
        self.frames as f32 / self.fps
    }
}

/// Catalog of clips per archetype.
#[derive(Resource, Debug, Clone)]
pub struct AnimationSet {
    clips: HashMap<(Archetype, ClipKind), ClipSpec>,
}

impl Default for AnimationSet {
    fn default() -> Self {
        let mut set = Self::empty();
        for archetype in Archetype::all() {
            for clip in ClipKind::all() {
                set.insert(archetype, clip, Self::sheet_frames(archetype, clip));
            }
        }
        set
    }
}

impl AnimationSet {
    pub fn empty() -> Self {
        Self {
            clips: HashMap::new(),
        }
    }

    /// Frame counts of the shipped sheets, used until the real textures load
    /// and for headless scenes, which never load them.
    fn sheet_frames(archetype: Archetype, clip: ClipKind) -> usize {
        match (archetype, clip) {
            (_, ClipKind::Idle) => 6,
            (Archetype::Samurai, ClipKind::Walk) => 9,
            (_, ClipKind::Walk) => 8,
            (_, ClipKind::Run) => 8,
            (Archetype::Fighter, ClipKind::Attack1) => 4,
            (Archetype::Fighter, ClipKind::Attack2) => 3,
            (Archetype::Fighter, ClipKind::Attack3) => 4,
            (Archetype::Shinobi, ClipKind::Attack1) => 5,
            (Archetype::Shinobi, ClipKind::Attack2) => 3,
            (Archetype::Shinobi, ClipKind::Attack3) => 4,
            (Archetype::Samurai, ClipKind::Attack1) => 6,
            (Archetype::Samurai, ClipKind::Attack2) => 4,
            (Archetype::Samurai, ClipKind::Attack3) => 3,
        }
    }

    /// Register a clip; zero-frame sheets are skipped like a missing texture.
    pub fn insert(&mut self, archetype: Archetype, clip: ClipKind, frames: usize) {
        if frames == 0 {
            return;
        }
        let (fps, looping) = clip.default_timing();
        self.clips.insert(
            (archetype, clip),
            ClipSpec {
                frames,
                fps,
                looping,
            },
        );
    }

    /// Size a clip from its loaded sheet (one row of `FRAME_SIZE` frames).
    ///
    /// Returns true when the frame count changed. Sheets narrower than one
    /// frame leave the catalog untouched.
    pub fn apply_sheet_width(&mut self, archetype: Archetype, clip: ClipKind, width: u32) -> bool {
        let frames = (width / FRAME_SIZE) as usize;
        if frames == 0 {
            return false;
        }
        if self.get(archetype, clip).map(|spec| spec.frames) == Some(frames) {
            return false;
        }
        self.insert(archetype, clip, frames);
        true
    }

    pub fn get(&self, archetype: Archetype, clip: ClipKind) -> Option<&ClipSpec> {
        self.clips.get(&(archetype, clip))
    }

    pub fn contains(&self, archetype: Archetype, clip: ClipKind) -> bool {
        self.clips.contains_key(&(archetype, clip))
    }
}

/// Plays one clip at a time for a single actor.
///
/// Playing a clip that is missing from the set leaves the player finished on
/// frame 0, so callers waiting for completion are never stranded.
#[derive(Debug, Clone)]
pub struct ClipPlayer {
    archetype: Archetype,
    clip: ClipKind,
    spec: Option<ClipSpec>,
    frame: usize,
    frame_timer: f32,
    paused: bool,
    finished: bool,
}

impl ClipPlayer {
    pub fn new(archetype: Archetype, clip: ClipKind, set: &AnimationSet) -> Self {
        let mut player = Self {
            archetype,
            clip,
            spec: None,
            frame: 0,
            frame_timer: 0.0,
            paused: false,
            finished: false,
        };
        player.play(clip, set, false);
        player
    }

    /// Start `clip`. When `restart` is false and the clip is already playing,
    /// playback continues undisturbed.
    pub fn play(&mut self, clip: ClipKind, set: &AnimationSet, restart: bool) {
        if !restart && self.clip == clip && self.spec.is_some() && !self.finished && !self.paused {
            return;
        }

        self.clip = clip;
        self.spec = set.get(self.archetype, clip).copied();
        self.frame = 0;
        self.frame_timer = 0.0;
        self.paused = false;
        self.finished = self.spec.is_none();
    }

    /// Switch skins and restart the current clip from the new archetype's sheet.
    pub fn set_archetype(&mut self, archetype: Archetype, set: &AnimationSet) {
        self.archetype = archetype;
        let clip = self.clip;
        self.play(clip, set, true);
    }

    /// Freeze on `frame`, clamped to the last frame of the clip.
    pub fn pause_at(&mut self, frame: usize) {
        if let Some(spec) = self.spec {
            self.frame = frame.min(spec.frames - 1);
            self.frame_timer = 0.0;
        }
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Pick up a re-measured sheet without restarting playback.
    pub fn refresh(&mut self, set: &AnimationSet) {
        let spec = set.get(self.archetype, self.clip).copied();
        if spec == self.spec {
            return;
        }
        self.spec = spec;
        match spec {
            Some(spec) => self.frame = self.frame.min(spec.frames - 1),
            None => {
                self.frame = 0;
                self.finished = true;
            }
        }
    }

    /// Advance playback; returns true on the tick a one-shot clip completes.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(spec) = self.spec else {
            return false;
        };
        if self.paused || self.finished {
            return false;
        }

        let frame_duration = 1.0 / spec.fps;
        self.frame_timer += dt;

        while self.frame_timer >= frame_duration {
            self.frame_timer -= frame_duration;
            self.frame += 1;

            if self.frame >= spec.frames {
                if spec.looping {
                    self.frame = 0;
                } else {
                    self.frame = spec.frames - 1;
                    self.finished = true;
                    return true;
                }
            }
        }
        false
    }

    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    pub fn clip(&self) -> ClipKind {
        self.clip
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn spec(&self) -> Option<&ClipSpec> {
        self.spec.as_ref()
    }
}
