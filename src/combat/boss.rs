//! Boss presentation state
//!
//! The boss is a single stationary sprite with three kinds of reaction:
//! - hit pulse: red tint, a quick yoyo scale bump and a small knockback
//! - tint flash: red tint for a fixed time
//! - lethal hit: one-shot death sequence (rise, blink while falling and
//!   fading, removal), after which the defeat banner is revealed
//!
//! Once the boss is dead every other reaction, including repositioning on
//! window resize, is ignored. Nothing here returns an error; ignored calls
//! report `false`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::anim::{Ease, Tween};

/// Death sequence timing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeathTuning {
    pub rise_px: f32,
    pub rise_secs: f32,
    pub blink_interval_secs: f32,
    /// Blinking stops once the toggle count exceeds this
    pub blink_toggles: u32,
    pub fall_secs: f32,
    /// How far below the bottom edge the fall ends
    pub fall_margin: f32,
}

impl Default for DeathTuning {
    fn default() -> Self {
        Self {
            rise_px: 180.0,
            rise_secs: 0.35,
            blink_interval_secs: 0.1,
            blink_toggles: 10,
            fall_secs: 0.9,
            fall_margin: 200.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    pub scale: f32,
    pub y: f32,
    /// Distance of the anchor from the right edge of the viewport
    pub x_offset: f32,
    pub pulse_scale: f32,
    pub pulse_secs: f32,
    pub tint_flash_secs: f32,
    pub knockback_px: f32,
    pub knockback_secs: f32,
    pub death: DeathTuning,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            scale: 1.1,
            y: 450.0,
            x_offset: 300.0,
            pulse_scale: 0.08,
            pulse_secs: 0.049,
            tint_flash_secs: 0.15,
            knockback_px: 24.0,
            knockback_secs: 0.09,
            death: DeathTuning::default(),
        }
    }
}

impl BossTuning {
    /// Rest position for a viewport of the given width.
    pub fn anchor_for(&self, viewport_width: f32) -> Vec2 {
        Vec2::new(viewport_width - self.x_offset, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossEvent {
    /// The death sequence finished; the sprite should be removed
    Removed,
}

#[derive(Debug, Clone)]
struct Blink {
    timer: f32,
    toggles: u32,
    active: bool,
}

#[derive(Debug, Clone)]
enum DeathStage {
    Rising(Tween),
    Falling { y: Tween, alpha: Tween, blink: Blink },
}

#[derive(Resource, Debug, Clone)]
pub struct Boss {
    tuning: BossTuning,
    anchor: Vec2,
    viewport_height: f32,
    position: Vec2,
    scale: f32,
    alpha: f32,
    visible: bool,
    tinted: bool,
    alive: bool,
    removed: bool,
    pulse: Option<Tween>,
    knockback: Option<Tween>,
    tint_timer: Option<f32>,
    death: Option<DeathStage>,
}

impl Boss {
    pub fn new(tuning: BossTuning, viewport: Vec2) -> Self {
        let anchor = tuning.anchor_for(viewport.x);
        Self {
            scale: tuning.scale,
            tuning,
            anchor,
            viewport_height: viewport.y,
            position: anchor,
            alpha: 1.0,
            visible: true,
            tinted: false,
            alive: true,
            removed: false,
            pulse: None,
            knockback: None,
            tint_timer: None,
            death: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// True once the death sequence has finished.
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_tinted(&self) -> bool {
        self.tinted
    }

    pub fn tuning(&self) -> &BossTuning {
        &self.tuning
    }

    /// Tint, scale bump and knockback for a non-lethal hit.
    pub fn apply_hit_pulse(&mut self) -> bool {
        if !self.alive {
            return false;
        }

        let base = self.tuning.scale;
        self.tinted = true;
        self.pulse = Some(
            Tween::new(
                base,
                base + self.tuning.pulse_scale,
                self.tuning.pulse_secs,
                Ease::QuadInOut,
            )
            .yoyo(),
        );
        self.knockback =
            Some(Tween::new(0.0, 1.0, self.tuning.knockback_secs, Ease::QuadOut).yoyo());
        true
    }

    /// Red tint for `secs`, reverting unless the boss dies first.
    pub fn flash_tint(&mut self, secs: f32) -> bool {
        if !self.alive {
            return false;
        }
        self.tinted = true;
        self.tint_timer = Some(secs);
        true
    }

    /// Kill the boss. Only the first call while alive has any effect.
    pub fn apply_lethal_hit(&mut self) -> bool {
        if !self.alive {
            return false;
        }

        self.alive = false;
        self.tinted = false;
        self.pulse = None;
        self.knockback = None;
        self.tint_timer = None;
        self.scale = self.tuning.scale;
        self.position.x = self.anchor.x;

        let death = &self.tuning.death;
        self.death = Some(DeathStage::Rising(Tween::new(
            self.position.y,
            self.position.y - death.rise_px,
            death.rise_secs,
            Ease::QuadOut,
        )));
        true
    }

    /// Move the rest position. Ignored after death.
    pub fn reposition(&mut self, anchor: Vec2) -> bool {
        if !self.alive {
            return false;
        }
        self.anchor = anchor;
        self.position = anchor;
        true
    }

    /// Follow a viewport resize.
    pub fn fit_viewport(&mut self, viewport: Vec2) -> bool {
        if !self.alive {
            return false;
        }
        self.viewport_height = viewport.y;
        let anchor = self.tuning.anchor_for(viewport.x);
        self.reposition(anchor)
    }

    pub fn tick(&mut self, dt: f32) -> SmallVec<[BossEvent; 1]> {
        let mut events = SmallVec::new();
        if self.removed {
            return events;
        }

        if let Some(knockback) = self.knockback.as_mut() {
            let t = knockback.tick(dt);
            self.position.x = self.anchor.x + self.tuning.knockback_px * t;
            if knockback.is_finished() {
                self.knockback = None;
                self.position.x = self.anchor.x;
            }
        }

        if let Some(pulse) = self.pulse.as_mut() {
            self.scale = pulse.tick(dt);
            if pulse.is_finished() {
                self.pulse = None;
                self.scale = self.tuning.scale;
                if self.alive && self.tint_timer.is_none() {
                    self.tinted = false;
                }
            }
        }

        if let Some(remaining) = self.tint_timer.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.tint_timer = None;
                if self.alive && self.pulse.is_none() {
                    self.tinted = false;
                }
            }
        }

        if let Some(stage) = self.death.take() {
            self.death = self.step_death(stage, dt, &mut events);
        }

        events
    }

    fn step_death(
        &mut self,
        stage: DeathStage,
        dt: f32,
        events: &mut SmallVec<[BossEvent; 1]>,
    ) -> Option<DeathStage> {
        let death = self.tuning.death.clone();

        match stage {
            DeathStage::Rising(mut rise) => {
                self.position.y = rise.tick(dt);
                if !rise.is_finished() {
                    return Some(DeathStage::Rising(rise));
                }
                let drop_y = self.viewport_height + death.fall_margin;
                Some(DeathStage::Falling {
                    y: Tween::new(self.position.y, drop_y, death.fall_secs, Ease::QuadIn),
                    alpha: Tween::new(1.0, 0.0, death.fall_secs, Ease::QuadIn),
                    blink: Blink {
                        timer: 0.0,
                        toggles: 0,
                        active: true,
                    },
                })
            }
            DeathStage::Falling {
                mut y,
                mut alpha,
                mut blink,
            } => {
                if blink.active {
                    blink.timer += dt;
                    while blink.timer >= death.blink_interval_secs {
                        blink.timer -= death.blink_interval_secs;
                        self.visible = !self.visible;
                        blink.toggles += 1;
                        if blink.toggles > death.blink_toggles {
                            self.visible = true;
                            blink.active = false;
                            break;
                        }
                    }
                }

                self.position.y = y.tick(dt);
                self.alpha = alpha.tick(dt);
                if !(y.is_finished() && alpha.is_finished()) {
                    return Some(DeathStage::Falling { y, alpha, blink });
                }

                self.removed = true;
                self.visible = false;
                events.push(BossEvent::Removed);
                None
            }
        }
    }

    /// Name of the current death stage, if dying.
    pub fn death_stage(&self) -> Option<&'static str> {
        match self.death {
            Some(DeathStage::Rising(_)) => Some("Rising"),
            Some(DeathStage::Falling { .. }) => Some("Falling"),
            None => None,
        }
    }
}

/// Defeat banner timing and text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerTuning {
    pub text: String,
    pub fade_secs: f32,
    pub font_size: f32,
}

impl Default for BannerTuning {
    fn default() -> Self {
        Self {
            text: "THANOS HAS BEEN DEFEATED".to_string(),
            fade_secs: 0.6,
            font_size: 64.0,
        }
    }
}

/// "Defeated" banner shown once the boss is gone.
#[derive(Resource, Debug, Clone)]
pub struct DefeatBanner {
    tuning: BannerTuning,
    visible: bool,
    alpha: f32,
    fade: Option<Tween>,
}

impl Default for DefeatBanner {
    fn default() -> Self {
        Self::new(BannerTuning::default())
    }
}

impl DefeatBanner {
    pub fn new(tuning: BannerTuning) -> Self {
        Self {
            tuning,
            visible: false,
            alpha: 0.0,
            fade: None,
        }
    }

    /// Start fading in. Later calls are ignored.
    pub fn reveal(&mut self) -> bool {
        if self.visible {
            return false;
        }
        self.visible = true;
        self.alpha = 0.0;
        self.fade = Some(Tween::new(0.0, 1.0, self.tuning.fade_secs, Ease::QuadOut));
        true
    }

    pub fn tick(&mut self, dt: f32) {
        if let Some(fade) = self.fade.as_mut() {
            self.alpha = fade.tick(dt);
            if fade.is_finished() {
                self.fade = None;
            }
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_fully_shown(&self) -> bool {
        self.visible && self.fade.is_none()
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn text(&self) -> &str {
        &self.tuning.text
    }

    pub fn font_size(&self) -> f32 {
        self.tuning.font_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;
    const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

    fn boss() -> Boss {
        Boss::new(BossTuning::default(), VIEWPORT)
    }

    fn run(boss: &mut Boss, ticks: usize) -> Vec<BossEvent> {
        let mut events = Vec::new();
        for _ in 0..ticks {
            events.extend(boss.tick(DT));
        }
        events
    }

    #[test]
    fn test_boss_spawns_at_anchor() {
        let boss = boss();
        assert_eq!(boss.position(), Vec2::new(980.0, 450.0));
        assert!(boss.is_alive());
        assert!(boss.is_visible());
        assert_eq!(boss.scale(), 1.1);
    }

    #[test]
    fn test_hit_pulse_reverts_to_rest() {
        let mut boss = boss();
        assert!(boss.apply_hit_pulse());
        assert!(boss.is_tinted());

        boss.tick(0.03);
        assert!(boss.scale() > 1.1);
        assert!(boss.position().x > 980.0);

        run(&mut boss, 30);
        assert!(!boss.is_tinted());
        assert_eq!(boss.scale(), 1.1);
        assert_eq!(boss.position().x, 980.0);
    }

    #[test]
    fn test_hit_pulse_is_repeatable_while_alive() {
        let mut boss = boss();
        for _ in 0..5 {
            assert!(boss.apply_hit_pulse());
            boss.tick(DT);
        }
        run(&mut boss, 30);
        assert_eq!(boss.scale(), 1.1);
    }

    #[test]
    fn test_lethal_hit_only_once() {
        let mut boss = boss();
        assert!(boss.apply_lethal_hit());
        assert!(!boss.is_alive());
        for _ in 0..3 {
            assert!(!boss.apply_lethal_hit());
        }
        assert_eq!(boss.death_stage(), Some("Rising"));
    }

    #[test]
    fn test_effects_ignored_after_death() {
        let mut boss = boss();
        boss.apply_lethal_hit();

        assert!(!boss.apply_hit_pulse());
        assert!(!boss.flash_tint(0.15));
        assert!(!boss.reposition(Vec2::new(10.0, 10.0)));
        assert!(!boss.fit_viewport(Vec2::new(800.0, 600.0)));
        assert!(!boss.is_tinted());
        assert_eq!(boss.anchor(), Vec2::new(980.0, 450.0));
    }

    #[test]
    fn test_tint_survives_death_clear() {
        let mut boss = boss();
        boss.flash_tint(0.15);
        boss.apply_lethal_hit();
        run(&mut boss, 20);
        assert!(!boss.is_tinted());
    }

    #[test]
    fn test_death_sequence_rises_blinks_and_is_removed() {
        let mut boss = boss();
        boss.apply_lethal_hit();

        // Rise: 0.35s upward
        run(&mut boss, 21);
        assert!(boss.position().y < 450.0);
        assert!((boss.position().y - 270.0).abs() < 1.0);

        let mut saw_hidden = false;
        let mut removed_events = 0;
        for _ in 0..120 {
            for event in boss.tick(DT) {
                if event == BossEvent::Removed {
                    removed_events += 1;
                }
            }
            if !boss.is_visible() && !boss.is_removed() {
                saw_hidden = true;
            }
        }

        assert!(saw_hidden, "boss should blink during the fall");
        assert_eq!(removed_events, 1);
        assert!(boss.is_removed());
        assert!(!boss.is_visible());
        assert_eq!(boss.alpha(), 0.0);
        assert_eq!(boss.position().y, 920.0);
        assert!(boss.tick(DT).is_empty());
    }

    #[test]
    fn test_resize_moves_live_boss() {
        let mut boss = boss();
        assert!(boss.fit_viewport(Vec2::new(1920.0, 1080.0)));
        assert_eq!(boss.position(), Vec2::new(1620.0, 450.0));
    }

    #[test]
    fn test_banner_reveals_once_and_fades_in() {
        let mut banner = DefeatBanner::default();
        assert!(!banner.is_visible());
        assert!(banner.reveal());
        assert!(!banner.reveal());
        assert_eq!(banner.alpha(), 0.0);

        for _ in 0..40 {
            banner.tick(DT);
        }
        assert!(banner.is_fully_shown());
        assert_eq!(banner.alpha(), 1.0);
    }
}
