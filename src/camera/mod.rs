//! Camera effects
//!
//! [`CameraFx`] holds the state of the screen-wide hit effects: shake, zoom
//! punch, white flash and hit stop. It is plain data stepped with the real
//! frame delta, so the headless runner drives it exactly like the window does.
//! [`CameraPlugin`] owns the 2D camera and the flash overlay and applies the
//! current effect values to them every frame.

use bevy::prelude::*;
use bevy::transform::TransformSystem;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::anim::{Ease, Tween};
use crate::arena::config::Viewport;

/// Scene time scale while a hit stop is active.
pub const HIT_STOP_TIME_SCALE: f32 = 0.0001;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    pub shake_secs: f32,
    /// Fraction of the viewport size used as the maximum shake offset
    pub shake_intensity: f32,
    pub zoom_factor: f32,
    pub zoom_in_secs: f32,
    pub zoom_hold_secs: f32,
    pub zoom_out_secs: f32,
    pub flash_secs: f32,
    pub hit_stop_secs: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            shake_secs: 0.22,
            shake_intensity: 0.006,
            zoom_factor: 1.06,
            zoom_in_secs: 0.14,
            zoom_hold_secs: 0.06,
            zoom_out_secs: 0.16,
            flash_secs: 0.06,
            hit_stop_secs: 0.08,
        }
    }
}

#[derive(Debug, Clone)]
struct Shake {
    remaining: f32,
    intensity: f32,
}

#[derive(Debug, Clone)]
enum ZoomPunch {
    In { tween: Tween, hold: f32, out_secs: f32 },
    Hold { remaining: f32, peak: f32, out_secs: f32 },
    Out(Tween),
}

#[derive(Resource, Debug, Clone)]
pub struct CameraFx {
    shake: Option<Shake>,
    zoom_punch: Option<ZoomPunch>,
    flash: Option<Tween>,
    hit_stop: f32,
    offset: Vec2,
    zoom: f32,
    flash_alpha: f32,
}

impl Default for CameraFx {
    fn default() -> Self {
        Self {
            shake: None,
            zoom_punch: None,
            flash: None,
            hit_stop: 0.0,
            offset: Vec2::ZERO,
            zoom: 1.0,
            flash_alpha: 0.0,
        }
    }
}

impl CameraFx {
    /// Start a shake; a stronger or longer shake replaces a weaker one.
    pub fn shake(&mut self, secs: f32, intensity: f32) {
        match self.shake.as_mut() {
            Some(shake) => {
                shake.remaining = shake.remaining.max(secs);
                shake.intensity = shake.intensity.max(intensity);
            }
            None => {
                self.shake = Some(Shake {
                    remaining: secs,
                    intensity,
                })
            }
        }
    }

    /// Zoom in to `tuning.zoom_factor`, hold, then ease back to 1.
    pub fn zoom_punch(&mut self, tuning: &CameraTuning) {
        self.zoom_punch = Some(ZoomPunch::In {
            tween: Tween::new(self.zoom, tuning.zoom_factor, tuning.zoom_in_secs, Ease::QuadOut),
            hold: tuning.zoom_hold_secs,
            out_secs: tuning.zoom_out_secs,
        });
    }

    /// White overlay fading from opaque to clear over `secs`.
    pub fn flash(&mut self, secs: f32) {
        self.flash_alpha = 1.0;
        self.flash = Some(Tween::new(1.0, 0.0, secs, Ease::Linear));
    }

    pub fn hit_stop(&mut self, secs: f32) {
        self.hit_stop = self.hit_stop.max(secs);
    }

    /// Multiplier applied to the scene delta.
    pub fn time_scale(&self) -> f32 {
        if self.hit_stop > 0.0 {
            HIT_STOP_TIME_SCALE
        } else {
            1.0
        }
    }

    pub fn is_hit_stopped(&self) -> bool {
        self.hit_stop > 0.0
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn flash_alpha(&self) -> f32 {
        self.flash_alpha
    }

    pub fn is_idle(&self) -> bool {
        self.shake.is_none()
            && self.zoom_punch.is_none()
            && self.flash.is_none()
            && self.hit_stop <= 0.0
    }

    /// Step every effect by the real (unscaled) delta.
    pub fn tick<R: Rng + ?Sized>(&mut self, dt: f32, viewport: Vec2, rng: &mut R) {
        self.hit_stop = (self.hit_stop - dt).max(0.0);

        self.offset = Vec2::ZERO;
        if let Some(shake) = self.shake.as_mut() {
            shake.remaining -= dt;
            if shake.remaining > 0.0 {
                let max = viewport * shake.intensity;
                self.offset = Vec2::new(
                    rng.gen_range(-1.0..=1.0) * max.x,
                    rng.gen_range(-1.0..=1.0) * max.y,
                );
            } else {
                self.shake = None;
            }
        }

        if let Some(flash) = self.flash.as_mut() {
            self.flash_alpha = flash.tick(dt);
            if flash.is_finished() {
                self.flash = None;
                self.flash_alpha = 0.0;
            }
        }

        self.zoom_punch = match self.zoom_punch.take() {
            None => None,
            Some(ZoomPunch::In {
                mut tween,
                hold,
                out_secs,
            }) => {
                self.zoom = tween.tick(dt);
                if tween.is_finished() {
                    Some(ZoomPunch::Hold {
                        remaining: hold,
                        peak: self.zoom,
                        out_secs,
                    })
                } else {
                    Some(ZoomPunch::In {
                        tween,
                        hold,
                        out_secs,
                    })
                }
            }
            Some(ZoomPunch::Hold {
                remaining,
                peak,
                out_secs,
            }) => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    Some(ZoomPunch::Hold {
                        remaining,
                        peak,
                        out_secs,
                    })
                } else {
                    Some(ZoomPunch::Out(Tween::new(peak, 1.0, out_secs, Ease::QuadIn)))
                }
            }
            Some(ZoomPunch::Out(mut tween)) => {
                self.zoom = tween.tick(dt);
                if tween.is_finished() {
                    self.zoom = 1.0;
                    None
                } else {
                    Some(ZoomPunch::Out(tween))
                }
            }
        };
    }
}

/// Marker component for the main 2D camera
#[derive(Component)]
pub struct MainCamera;

/// Full-screen white sprite used by the flash effect
#[derive(Component)]
pub struct FlashOverlay;

/// Spawns the camera and applies [`CameraFx`] to it. Window builds only.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera)
            .add_systems(
                PostUpdate,
                apply_camera_fx.before(TransformSystem::TransformPropagate),
            );
    }
}

fn setup_camera(mut commands: Commands, viewport: Res<Viewport>) {
    commands.spawn((Camera2d, MainCamera));
    commands.spawn((
        Sprite {
            color: Color::srgba(1.0, 1.0, 1.0, 0.0),
            custom_size: Some(viewport.size() * 2.0),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 900.0),
        FlashOverlay,
    ));
}

fn apply_camera_fx(
    fx: Res<CameraFx>,
    mut cameras: Query<(&mut Transform, &mut OrthographicProjection), With<MainCamera>>,
    mut overlays: Query<(&mut Sprite, &mut Transform), (With<FlashOverlay>, Without<MainCamera>)>,
) {
    let Ok((mut transform, mut projection)) = cameras.get_single_mut() else {
        return;
    };

    // Screen space is +y down
    let offset = Vec2::new(fx.offset().x, -fx.offset().y);
    transform.translation.x = offset.x;
    transform.translation.y = offset.y;
    projection.scale = 1.0 / fx.zoom().max(0.01);

    for (mut sprite, mut overlay_transform) in overlays.iter_mut() {
        sprite.color = Color::srgba(1.0, 1.0, 1.0, fx.flash_alpha());
        overlay_transform.translation.x = offset.x;
        overlay_transform.translation.y = offset.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const DT: f32 = 1.0 / 60.0;
    const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

    fn run(fx: &mut CameraFx, secs: f32, rng: &mut StdRng) {
        let steps = (secs / DT).ceil() as usize;
        for _ in 0..steps {
            fx.tick(DT, VIEWPORT, rng);
        }
    }

    #[test]
    fn test_shake_stays_within_intensity_and_settles() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut fx = CameraFx::default();
        fx.shake(0.22, 0.006);

        for _ in 0..10 {
            fx.tick(DT, VIEWPORT, &mut rng);
            assert!(fx.offset().x.abs() <= 1280.0 * 0.006 + f32::EPSILON);
            assert!(fx.offset().y.abs() <= 720.0 * 0.006 + f32::EPSILON);
        }
        run(&mut fx, 0.3, &mut rng);
        assert_eq!(fx.offset(), Vec2::ZERO);
        assert!(fx.is_idle());
    }

    #[test]
    fn test_zoom_punch_peaks_then_returns() {
        let mut rng = StdRng::seed_from_u64(1);
        let tuning = CameraTuning::default();
        let mut fx = CameraFx::default();
        fx.zoom_punch(&tuning);

        run(&mut fx, 0.15, &mut rng);
        assert!((fx.zoom() - 1.06).abs() < 1e-4);

        run(&mut fx, 0.5, &mut rng);
        assert_eq!(fx.zoom(), 1.0);
        assert!(fx.is_idle());
    }

    #[test]
    fn test_flash_fades_out() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut fx = CameraFx::default();
        fx.flash(0.06);
        assert_eq!(fx.flash_alpha(), 1.0);

        fx.tick(DT, VIEWPORT, &mut rng);
        assert!(fx.flash_alpha() < 1.0);
        run(&mut fx, 0.1, &mut rng);
        assert_eq!(fx.flash_alpha(), 0.0);
    }

    #[test]
    fn test_hit_stop_slows_scene_until_expired() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut fx = CameraFx::default();
        assert_eq!(fx.time_scale(), 1.0);

        fx.hit_stop(0.08);
        assert_eq!(fx.time_scale(), HIT_STOP_TIME_SCALE);
        run(&mut fx, 0.05, &mut rng);
        assert!(fx.is_hit_stopped());
        run(&mut fx, 0.05, &mut rng);
        assert_eq!(fx.time_scale(), 1.0);
    }
}
