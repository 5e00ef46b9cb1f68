//! Attacker state machine
//!
//! Each controllable actor cycles through explicit phases:
//!
//! ```text
//! Home ──trigger──▶ Advancing ──arrive──▶ Striking ──clip done──▶ Returning ──arrive──▶ Home
//! ```
//!
//! - **Light** attacks run at the boss and play one of three attack clips.
//! - **Heavy** attacks freeze `attack1` on its hold frame at home, hold, lunge
//!   while frozen, then resume the clip on arrival.
//!
//! A trigger outside `Home` (or against a dead boss) is rejected with an
//! [`AttackRejected`] value and changes nothing. Timed effects during a strike
//! come from a [`Timeline`] of [`StrikeCue`]s; [`Attacker::tick`] reports them
//! as [`AttackerEvent`]s for the combat systems to act on.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::anim::{AnimationSet, Archetype, ClipKind, ClipPlayer, Ease, Timeline, Tween};

use super::events::Sfx;

/// Number of actor slots a scene can hold.
pub const MAX_SLOTS: usize = 4;

/// Clip an actor plays while resting at home.
pub const HOME_STANCE: ClipKind = ClipKind::Walk;

/// Identity of an actor within the scene (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct ActorSlot(pub u8);

impl ActorSlot {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// All slot ids for a roster of `count` actors.
    pub fn roster(count: usize) -> impl Iterator<Item = ActorSlot> {
        (0..count.min(MAX_SLOTS) as u8).map(ActorSlot)
    }

    /// The slot after this one, wrapping within `count`.
    pub fn cycle(self, count: usize) -> ActorSlot {
        if count == 0 {
            return self;
        }
        ActorSlot(((self.index() + 1) % count.min(MAX_SLOTS)) as u8)
    }
}

impl fmt::Display for ActorSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Actor {}", self.0 + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Sheets are drawn facing right.
    pub fn flip_x(self) -> bool {
        self == Facing::Left
    }
}

/// Where an actor stands when at home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Footing {
    #[default]
    Ground,
    /// Raised platform, 1 = lowest
    Platform(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    Light,
    Heavy,
}

impl AttackKind {
    pub fn name(&self) -> &'static str {
        match self {
            AttackKind::Light => "Light",
            AttackKind::Heavy => "Heavy",
        }
    }
}

/// Why a trigger was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackRejected {
    /// The actor is mid-sequence
    Busy,
    /// The boss is already dead
    BossDefeated,
}

impl fmt::Display for AttackRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttackRejected::Busy => write!(f, "actor is busy"),
            AttackRejected::BossDefeated => write!(f, "boss is already defeated"),
        }
    }
}

impl std::error::Error for AttackRejected {}

/// Timing for the heavy attack's telegraph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeavyTuning {
    /// Frame of `attack1` held during the wind-up
    pub hold_frame_index: usize,
    pub hold_secs: f32,
    pub dash_secs: f32,
    /// Delay from impact to the lethal blow
    pub lethal_delay_secs: f32,
}

impl Default for HeavyTuning {
    fn default() -> Self {
        Self {
            hold_frame_index: 2,
            hold_secs: 0.7,
            dash_secs: 0.26,
            lethal_delay_secs: 0.15,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackerTuning {
    /// Sprite scale applied to the 128px frames
    pub scale: f32,
    pub spawn_x: f32,
    pub ground_y: f32,
    /// Horizontal gap kept between the strike position and the boss anchor
    pub attack_offset: f32,
    pub light_dash_secs: f32,
    pub return_secs: f32,
    /// Delay from strike start to the impact cue
    pub impact_delay_secs: f32,
    /// Homes are kept at least this far from the right edge on resize
    pub edge_margin: f32,
    pub heavy: HeavyTuning,
}

impl Default for AttackerTuning {
    fn default() -> Self {
        Self {
            scale: 2.0,
            spawn_x: 150.0,
            ground_y: 570.0,
            attack_offset: 150.0,
            light_dash_secs: 0.5,
            return_secs: 0.9,
            impact_delay_secs: 0.12,
            edge_margin: 20.0,
            heavy: HeavyTuning::default(),
        }
    }
}

/// Scene facts an attack needs at trigger time.
#[derive(Debug, Clone, Copy)]
pub struct AttackContext {
    pub boss_alive: bool,
    /// Strike position on the x axis
    pub target_x: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrikeCue {
    Impact(AttackKind),
    LethalBlow,
}

/// Things that happened during a tick, in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackerEvent {
    Sound(Sfx),
    Arrived,
    Impact(AttackKind),
    LethalBlow,
    StrikeFinished,
    Returned,
}

#[derive(Debug, Clone)]
pub struct Advance {
    kind: AttackKind,
    strike_clip: ClipKind,
    target_x: f32,
    /// Wind-up left before the dash starts
    hold: f32,
    dash: Option<Tween>,
}

#[derive(Debug, Clone)]
pub struct Strike {
    kind: AttackKind,
    clip: ClipKind,
    cues: Timeline<StrikeCue>,
}

#[derive(Debug, Clone)]
pub struct Return {
    x: Tween,
    y: Tween,
}

#[derive(Debug, Clone, Default)]
pub enum AttackerPhase {
    #[default]
    Home,
    Advancing(Advance),
    Striking(Strike),
    Returning(Return),
}

impl AttackerPhase {
    pub fn name(&self) -> &'static str {
        match self {
            AttackerPhase::Home => "Home",
            AttackerPhase::Advancing(_) => "Advancing",
            AttackerPhase::Striking(_) => "Striking",
            AttackerPhase::Returning(_) => "Returning",
        }
    }

    /// Attack in flight, if any.
    pub fn attack_kind(&self) -> Option<AttackKind> {
        match self {
            AttackerPhase::Advancing(advance) => Some(advance.kind),
            AttackerPhase::Striking(strike) => Some(strike.kind),
            _ => None,
        }
    }

    /// Attack clip chosen for the current sequence.
    pub fn strike_clip(&self) -> Option<ClipKind> {
        match self {
            AttackerPhase::Advancing(advance) => Some(advance.strike_clip),
            AttackerPhase::Striking(strike) => Some(strike.clip),
            _ => None,
        }
    }
}

/// A controllable actor.
#[derive(Component, Debug, Clone)]
pub struct Attacker {
    pub slot: ActorSlot,
    /// Screen-space position (origin top-left, +y down)
    pub position: Vec2,
    pub facing: Facing,
    pub home: Vec2,
    pub footing: Footing,
    clip: ClipPlayer,
    phase: AttackerPhase,
}

impl Attacker {
    pub fn new(
        slot: ActorSlot,
        archetype: Archetype,
        home: Vec2,
        footing: Footing,
        set: &AnimationSet,
    ) -> Self {
        Self {
            slot,
            position: home,
            facing: Facing::Right,
            home,
            footing,
            clip: ClipPlayer::new(archetype, HOME_STANCE, set),
            phase: AttackerPhase::Home,
        }
    }

    pub fn archetype(&self) -> Archetype {
        self.clip.archetype()
    }

    pub fn clip(&self) -> &ClipPlayer {
        &self.clip
    }

    pub fn phase(&self) -> &AttackerPhase {
        &self.phase
    }

    pub fn is_busy(&self) -> bool {
        !matches!(self.phase, AttackerPhase::Home)
    }

    /// Start an attack sequence.
    ///
    /// Returns the attack clip the strike will play. Light attacks draw one of
    /// the three variants uniformly; heavy attacks always use `attack1`.
    pub fn trigger<R: Rng + ?Sized>(
        &mut self,
        kind: AttackKind,
        context: &AttackContext,
        tuning: &AttackerTuning,
        set: &AnimationSet,
        rng: &mut R,
    ) -> Result<ClipKind, AttackRejected> {
        if !context.boss_alive {
            return Err(AttackRejected::BossDefeated);
        }
        if self.is_busy() {
            return Err(AttackRejected::Busy);
        }

        let advance = match kind {
            AttackKind::Light => {
                let variants = ClipKind::attacks();
                let strike_clip = variants[rng.gen_range(0..variants.len())];
                self.clip.play(ClipKind::Run, set, false);
                Advance {
                    kind,
                    strike_clip,
                    target_x: context.target_x,
                    hold: 0.0,
                    dash: Some(Tween::new(
                        self.position.x,
                        context.target_x,
                        tuning.light_dash_secs,
                        Ease::QuadOut,
                    )),
                }
            }
            AttackKind::Heavy => {
                self.clip.play(ClipKind::Attack1, set, true);
                self.clip.pause_at(tuning.heavy.hold_frame_index);
                Advance {
                    kind,
                    strike_clip: ClipKind::Attack1,
                    target_x: context.target_x,
                    hold: tuning.heavy.hold_secs,
                    dash: None,
                }
            }
        };

        let strike_clip = advance.strike_clip;
        self.facing = Facing::Right;
        self.phase = AttackerPhase::Advancing(advance);
        Ok(strike_clip)
    }

    /// Advance the sequence by `dt` seconds.
    pub fn tick(
        &mut self,
        dt: f32,
        tuning: &AttackerTuning,
        set: &AnimationSet,
    ) -> SmallVec<[AttackerEvent; 4]> {
        let mut events = SmallVec::new();
        self.clip.tick(dt);

        let phase = std::mem::take(&mut self.phase);
        self.phase = match phase {
            AttackerPhase::Home => AttackerPhase::Home,
            AttackerPhase::Advancing(advance) => {
                self.step_advance(advance, dt, tuning, set, &mut events)
            }
            AttackerPhase::Striking(strike) => {
                self.step_strike(strike, dt, tuning, set, &mut events)
            }
            AttackerPhase::Returning(ret) => self.step_return(ret, dt, set, &mut events),
        };

        events
    }

    /// Switch to the next archetype. Only allowed at home while the boss lives.
    pub fn cycle_archetype(
        &mut self,
        boss_alive: bool,
        set: &AnimationSet,
    ) -> Result<Archetype, AttackRejected> {
        if self.is_busy() {
            return Err(AttackRejected::Busy);
        }
        if !boss_alive {
            return Err(AttackRejected::BossDefeated);
        }

        let next = self.archetype().next();
        self.clip.set_archetype(next, set);
        self.clip.play(HOME_STANCE, set, true);
        Ok(next)
    }

    /// Follow a sheet whose frame count changed after loading.
    pub fn refresh_clip(&mut self, set: &AnimationSet) {
        self.clip.refresh(set);
    }

    /// Move the home position; an actor at rest moves with it.
    pub fn rehome(&mut self, home: Vec2) {
        self.home = home;
        if !self.is_busy() {
            self.position = home;
        }
    }

    fn step_advance(
        &mut self,
        mut advance: Advance,
        dt: f32,
        tuning: &AttackerTuning,
        set: &AnimationSet,
        events: &mut SmallVec<[AttackerEvent; 4]>,
    ) -> AttackerPhase {
        let mut dt = dt;

        if advance.dash.is_none() {
            advance.hold -= dt;
            if advance.hold > 0.0 {
                return AttackerPhase::Advancing(advance);
            }
            // Carry the overshoot into the dash
            dt = -advance.hold;
            advance.hold = 0.0;
            advance.dash = Some(Tween::new(
                self.position.x,
                advance.target_x,
                tuning.heavy.dash_secs,
                Ease::QuadOut,
            ));
            events.push(AttackerEvent::Sound(Sfx::Impact));
            events.push(AttackerEvent::Sound(Sfx::Slash));
        }

        let arrived = match advance.dash.as_mut() {
            Some(dash) => {
                self.position.x = dash.tick(dt);
                dash.is_finished()
            }
            None => false,
        };
        if !arrived {
            return AttackerPhase::Advancing(advance);
        }

        events.push(AttackerEvent::Arrived);
        self.begin_strike(advance.kind, advance.strike_clip, tuning, set, events)
    }

    fn begin_strike(
        &mut self,
        kind: AttackKind,
        clip: ClipKind,
        tuning: &AttackerTuning,
        set: &AnimationSet,
        events: &mut SmallVec<[AttackerEvent; 4]>,
    ) -> AttackerPhase {
        let impact = tuning.impact_delay_secs;
        let cues = match kind {
            AttackKind::Light => {
                self.clip.play(clip, set, true);
                events.push(AttackerEvent::Sound(Sfx::Impact));
                events.push(AttackerEvent::Sound(Sfx::Slash));
                Timeline::new().at(impact, StrikeCue::Impact(kind))
            }
            AttackKind::Heavy => {
                self.clip.resume();
                Timeline::new()
                    .at(impact, StrikeCue::Impact(kind))
                    .at(impact + tuning.heavy.lethal_delay_secs, StrikeCue::LethalBlow)
            }
        };

        AttackerPhase::Striking(Strike { kind, clip, cues })
    }

    fn step_strike(
        &mut self,
        mut strike: Strike,
        dt: f32,
        tuning: &AttackerTuning,
        set: &AnimationSet,
        events: &mut SmallVec<[AttackerEvent; 4]>,
    ) -> AttackerPhase {
        for cue in strike.cues.advance(dt) {
            events.push(match cue {
                StrikeCue::Impact(kind) => AttackerEvent::Impact(kind),
                StrikeCue::LethalBlow => AttackerEvent::LethalBlow,
            });
        }

        if !(self.clip.is_finished() && strike.cues.is_exhausted()) {
            return AttackerPhase::Striking(strike);
        }

        events.push(AttackerEvent::StrikeFinished);
        self.begin_return(tuning, set)
    }

    fn begin_return(&mut self, tuning: &AttackerTuning, set: &AnimationSet) -> AttackerPhase {
        self.facing = Facing::Left;
        self.clip.play(ClipKind::Run, set, false);

        AttackerPhase::Returning(Return {
            x: Tween::new(self.position.x, self.home.x, tuning.return_secs, Ease::QuadOut),
            y: Tween::new(self.position.y, self.home.y, tuning.return_secs, Ease::QuadOut),
        })
    }

    fn step_return(
        &mut self,
        mut ret: Return,
        dt: f32,
        set: &AnimationSet,
        events: &mut SmallVec<[AttackerEvent; 4]>,
    ) -> AttackerPhase {
        self.position = Vec2::new(ret.x.tick(dt), ret.y.tick(dt));
        if !(ret.x.is_finished() && ret.y.is_finished()) {
            return AttackerPhase::Returning(ret);
        }

        // Home may have moved during the run back (resize)
        self.position = self.home;
        self.facing = Facing::Right;
        self.clip.play(HOME_STANCE, set, false);
        events.push(AttackerEvent::Returned);
        AttackerPhase::Home
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const DT: f32 = 1.0 / 60.0;

    fn context() -> AttackContext {
        AttackContext {
            boss_alive: true,
            target_x: 830.0,
        }
    }

    fn fighter(set: &AnimationSet) -> Attacker {
        Attacker::new(
            ActorSlot(0),
            Archetype::Fighter,
            Vec2::new(150.0, 570.0),
            Footing::Ground,
            set,
        )
    }

    /// Tick until the actor is home again, collecting every event.
    fn run_to_home(attacker: &mut Attacker, tuning: &AttackerTuning, set: &AnimationSet) -> Vec<AttackerEvent> {
        let mut events = Vec::new();
        for _ in 0..600 {
            events.extend(attacker.tick(DT, tuning, set));
            if !attacker.is_busy() {
                break;
            }
        }
        events
    }

    #[test]
    fn test_new_actor_rests_at_home() {
        let set = AnimationSet::default();
        let attacker = fighter(&set);
        assert!(!attacker.is_busy());
        assert_eq!(attacker.position, attacker.home);
        assert_eq!(attacker.facing, Facing::Right);
        assert_eq!(attacker.clip().clip(), HOME_STANCE);
    }

    #[test]
    fn test_heavy_hold_clamps_to_short_attack_sheet() {
        let mut set = AnimationSet::default();
        set.insert(Archetype::Fighter, ClipKind::Attack1, 2);
        let tuning = AttackerTuning::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut attacker = fighter(&set);

        let clip = attacker
            .trigger(AttackKind::Heavy, &context(), &tuning, &set, &mut rng)
            .unwrap();
        assert_eq!(clip, ClipKind::Attack1);
        assert_eq!(tuning.heavy.hold_frame_index, 2);
        assert_eq!(attacker.clip().frame(), 1);
        assert!(attacker.clip().is_paused());

        for _ in 0..20 {
            attacker.tick(DT, &tuning, &set);
        }
        assert_eq!(attacker.clip().frame(), 1);
    }

    #[test]
    fn test_light_attack_uses_a_valid_variant() {
        let set = AnimationSet::default();
        let tuning = AttackerTuning::default();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..30 {
            let mut attacker = fighter(&set);
            let clip = attacker
                .trigger(AttackKind::Light, &context(), &tuning, &set, &mut rng)
                .unwrap();
            assert!(ClipKind::attacks().contains(&clip));
        }
    }

    #[test]
    fn test_trigger_while_busy_is_rejected_without_mutation() {
        let set = AnimationSet::default();
        let tuning = AttackerTuning::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut attacker = fighter(&set);

        attacker
            .trigger(AttackKind::Light, &context(), &tuning, &set, &mut rng)
            .unwrap();
        for _ in 0..10 {
            attacker.tick(DT, &tuning, &set);
        }

        let position = attacker.position;
        let clip = attacker.clip().clip();
        let frame = attacker.clip().frame();
        let phase = attacker.phase().name();

        let result = attacker.trigger(AttackKind::Heavy, &context(), &tuning, &set, &mut rng);
        assert_eq!(result, Err(AttackRejected::Busy));
        assert_eq!(attacker.position, position);
        assert_eq!(attacker.clip().clip(), clip);
        assert_eq!(attacker.clip().frame(), frame);
        assert_eq!(attacker.phase().name(), phase);
    }

    #[test]
    fn test_trigger_against_dead_boss_is_rejected() {
        let set = AnimationSet::default();
        let tuning = AttackerTuning::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut attacker = fighter(&set);

        let dead = AttackContext {
            boss_alive: false,
            target_x: 830.0,
        };
        let result = attacker.trigger(AttackKind::Light, &dead, &tuning, &set, &mut rng);
        assert_eq!(result, Err(AttackRejected::BossDefeated));
        assert!(!attacker.is_busy());
        assert_eq!(attacker.clip().clip(), HOME_STANCE);
    }

    #[test]
    fn test_light_attack_full_cycle() {
        let set = AnimationSet::default();
        let tuning = AttackerTuning::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut attacker = fighter(&set);
        let home = attacker.home;

        let clip = attacker
            .trigger(AttackKind::Light, &context(), &tuning, &set, &mut rng)
            .unwrap();
        assert_eq!(attacker.phase().name(), "Advancing");
        assert_eq!(attacker.clip().clip(), ClipKind::Run);

        let mut events = Vec::new();
        let mut reached_target = false;
        for _ in 0..600 {
            events.extend(attacker.tick(DT, &tuning, &set));
            if attacker.phase().name() == "Striking" {
                reached_target = true;
                assert_eq!(attacker.position.x, 830.0);
                assert_eq!(attacker.clip().clip(), clip);
            }
            if !attacker.is_busy() {
                break;
            }
        }

        assert!(reached_target);
        let impacts = events
            .iter()
            .filter(|e| matches!(e, AttackerEvent::Impact(AttackKind::Light)))
            .count();
        assert_eq!(impacts, 1);
        assert!(!events.contains(&AttackerEvent::LethalBlow));
        assert_eq!(events.last(), Some(&AttackerEvent::Returned));
        assert_eq!(attacker.position, home);
        assert_eq!(attacker.facing, Facing::Right);
        assert_eq!(attacker.clip().clip(), HOME_STANCE);
    }

    #[test]
    fn test_return_faces_home_while_running_back() {
        let set = AnimationSet::default();
        let tuning = AttackerTuning::default();
        let mut rng = StdRng::seed_from_u64(5);
        let mut attacker = fighter(&set);

        attacker
            .trigger(AttackKind::Light, &context(), &tuning, &set, &mut rng)
            .unwrap();
        for _ in 0..600 {
            attacker.tick(DT, &tuning, &set);
            if attacker.phase().name() == "Returning" {
                assert_eq!(attacker.facing, Facing::Left);
                assert_eq!(attacker.clip().clip(), ClipKind::Run);
                return;
            }
        }
        panic!("attacker never started returning");
    }

    #[test]
    fn test_heavy_attack_holds_frame_then_lunges() {
        let set = AnimationSet::default();
        let tuning = AttackerTuning::default();
        let mut rng = StdRng::seed_from_u64(9);
        let mut attacker = fighter(&set);

        let clip = attacker
            .trigger(AttackKind::Heavy, &context(), &tuning, &set, &mut rng)
            .unwrap();
        assert_eq!(clip, ClipKind::Attack1);
        assert!(attacker.clip().is_paused());
        assert_eq!(attacker.clip().frame(), 2);

        // Half the hold: still frozen at home
        for _ in 0..21 {
            let events = attacker.tick(DT, &tuning, &set);
            assert!(events.is_empty());
        }
        assert_eq!(attacker.position.x, 150.0);
        assert_eq!(attacker.clip().frame(), 2);

        let events = run_to_home(&mut attacker, &tuning, &set);
        let impact = events
            .iter()
            .position(|e| *e == AttackerEvent::Impact(AttackKind::Heavy))
            .expect("heavy impact");
        let lethal = events
            .iter()
            .position(|e| *e == AttackerEvent::LethalBlow)
            .expect("lethal blow");
        let arrived = events
            .iter()
            .position(|e| *e == AttackerEvent::Arrived)
            .expect("arrival");
        assert!(arrived < impact && impact < lethal);
        assert_eq!(attacker.position, attacker.home);
    }

    #[test]
    fn test_heavy_sounds_play_when_dash_starts() {
        let set = AnimationSet::default();
        let tuning = AttackerTuning::default();
        let mut rng = StdRng::seed_from_u64(2);
        let mut attacker = fighter(&set);

        attacker
            .trigger(AttackKind::Heavy, &context(), &tuning, &set, &mut rng)
            .unwrap();
        let events = run_to_home(&mut attacker, &tuning, &set);
        let first_sound = events
            .iter()
            .position(|e| matches!(e, AttackerEvent::Sound(_)))
            .expect("sound");
        let arrived = events
            .iter()
            .position(|e| *e == AttackerEvent::Arrived)
            .expect("arrival");
        assert!(first_sound < arrived);
    }

    #[test]
    fn test_missing_clips_do_not_stall_sequence() {
        let set = AnimationSet::empty();
        let tuning = AttackerTuning::default();
        let mut rng = StdRng::seed_from_u64(4);
        let mut attacker = fighter(&set);

        attacker
            .trigger(AttackKind::Light, &context(), &tuning, &set, &mut rng)
            .unwrap();
        let events = run_to_home(&mut attacker, &tuning, &set);
        assert!(!attacker.is_busy());
        assert!(events.contains(&AttackerEvent::Impact(AttackKind::Light)));
    }

    #[test]
    fn test_cycle_archetype_rules() {
        let set = AnimationSet::default();
        let tuning = AttackerTuning::default();
        let mut rng = StdRng::seed_from_u64(6);
        let mut attacker = fighter(&set);

        assert_eq!(attacker.cycle_archetype(true, &set), Ok(Archetype::Shinobi));
        assert_eq!(attacker.archetype(), Archetype::Shinobi);
        assert_eq!(
            attacker.cycle_archetype(false, &set),
            Err(AttackRejected::BossDefeated)
        );

        attacker
            .trigger(AttackKind::Light, &context(), &tuning, &set, &mut rng)
            .unwrap();
        assert_eq!(attacker.cycle_archetype(true, &set), Err(AttackRejected::Busy));
        assert_eq!(attacker.archetype(), Archetype::Shinobi);
    }

    #[test]
    fn test_rehome_moves_resting_actor_only() {
        let set = AnimationSet::default();
        let tuning = AttackerTuning::default();
        let mut rng = StdRng::seed_from_u64(8);
        let mut attacker = fighter(&set);

        attacker.rehome(Vec2::new(120.0, 570.0));
        assert_eq!(attacker.position, Vec2::new(120.0, 570.0));

        attacker
            .trigger(AttackKind::Light, &context(), &tuning, &set, &mut rng)
            .unwrap();
        attacker.tick(DT, &tuning, &set);
        let position = attacker.position;
        attacker.rehome(Vec2::new(100.0, 570.0));
        assert_eq!(attacker.position, position);

        run_to_home(&mut attacker, &tuning, &set);
        assert_eq!(attacker.position, Vec2::new(100.0, 570.0));
    }

    #[test]
    fn test_slot_cycle_wraps() {
        assert_eq!(ActorSlot(0).cycle(4), ActorSlot(1));
        assert_eq!(ActorSlot(3).cycle(4), ActorSlot(0));
        assert_eq!(ActorSlot(0).cycle(1), ActorSlot(0));
        assert_eq!(ActorSlot::roster(9).count(), MAX_SLOTS);
    }
}
