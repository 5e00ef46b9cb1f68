//! Combat systems
//!
//! ECS systems that drive the attacker state machines, the boss and the
//! hit effects. Sequence systems step with the scene delta (slowed during a
//! hit stop); camera effects step with the real delta.

use bevy::prelude::*;

use crate::anim::AnimationSet;
use crate::arena::config::{ArenaTuning, Viewport};
use crate::camera::CameraFx;

use super::attacker::{AttackContext, AttackKind, Attacker, AttackerEvent};
use super::boss::{Boss, BossEvent, DefeatBanner};
use super::components::{AttackTally, GameRng};
use super::events::*;
use super::log::{CombatLog, CombatLogEventType};

/// Frame delta as seen by the scene.
fn scene_dt(time: &Time, fx: &CameraFx) -> f32 {
    time.delta_secs() * fx.time_scale()
}

/// Advance the log clock.
pub fn track_scene_time(time: Res<Time>, fx: Res<CameraFx>, mut combat_log: ResMut<CombatLog>) {
    combat_log.scene_time += scene_dt(&time, &fx);
}

/// Start attack sequences. Busy actors and a dead boss drop the request.
pub fn handle_attack_requests(
    mut requests: EventReader<AttackRequested>,
    mut attackers: Query<&mut Attacker>,
    boss: Res<Boss>,
    tuning: Res<ArenaTuning>,
    set: Res<AnimationSet>,
    mut rng: ResMut<GameRng>,
    mut tally: ResMut<AttackTally>,
    mut combat_log: ResMut<CombatLog>,
) {
    let context = AttackContext {
        boss_alive: boss.is_alive(),
        target_x: boss.anchor().x - tuning.attacker.attack_offset,
    };

    for request in requests.read() {
        let Some(mut attacker) = attackers.iter_mut().find(|a| a.slot == request.slot) else {
            debug!("{} requested {} attack but is not spawned", request.slot, request.kind.name());
            continue;
        };

        match attacker.trigger(request.kind, &context, &tuning.attacker, &set, rng.source()) {
            Ok(clip) => {
                tally.record_started(request.kind);
                combat_log.log(
                    CombatLogEventType::Attack,
                    format!(
                        "{} ({}) starts a {} attack [{}]",
                        request.slot,
                        attacker.archetype().key(),
                        request.kind.name(),
                        clip.key()
                    ),
                );
            }
            Err(reason) => {
                tally.rejected += 1;
                debug!("{} {} attack dropped: {}", request.slot, request.kind.name(), reason);
            }
        }
    }
}

/// Swap the skin of the requested actor.
pub fn handle_character_changes(
    mut requests: EventReader<CharacterChangeRequested>,
    mut attackers: Query<&mut Attacker>,
    boss: Res<Boss>,
    set: Res<AnimationSet>,
    mut sounds: EventWriter<SoundCue>,
    mut combat_log: ResMut<CombatLog>,
) {
    for request in requests.read() {
        let Some(mut attacker) = attackers.iter_mut().find(|a| a.slot == request.slot) else {
            continue;
        };

        match attacker.cycle_archetype(boss.is_alive(), &set) {
            Ok(archetype) => {
                sounds.send(SoundCue { sfx: Sfx::Change });
                combat_log.log(
                    CombatLogEventType::SceneEvent,
                    format!("{} changes to {}", request.slot, archetype.key()),
                );
            }
            Err(reason) => debug!("{} change dropped: {}", request.slot, reason),
        }
    }
}

/// Step every actor and forward what happened.
pub fn advance_attackers(
    time: Res<Time>,
    fx: Res<CameraFx>,
    tuning: Res<ArenaTuning>,
    set: Res<AnimationSet>,
    mut attackers: Query<&mut Attacker>,
    mut sounds: EventWriter<SoundCue>,
    mut impacts: EventWriter<ImpactEvent>,
    mut lethal_blows: EventWriter<LethalBlowEvent>,
) {
    let dt = scene_dt(&time, &fx);

    for mut attacker in attackers.iter_mut() {
        let slot = attacker.slot;
        for event in attacker.tick(dt, &tuning.attacker, &set) {
            match event {
                AttackerEvent::Sound(sfx) => {
                    sounds.send(SoundCue { sfx });
                }
                AttackerEvent::Impact(kind) => {
                    impacts.send(ImpactEvent { slot, kind });
                }
                AttackerEvent::LethalBlow => {
                    lethal_blows.send(LethalBlowEvent { slot });
                }
                AttackerEvent::Arrived => trace!("{} reached the boss", slot),
                AttackerEvent::StrikeFinished => trace!("{} heads home", slot),
                AttackerEvent::Returned => trace!("{} is home", slot),
            }
        }
    }
}

/// Step the boss; reveal the banner once the death sequence ends.
pub fn advance_boss(
    time: Res<Time>,
    fx: Res<CameraFx>,
    mut boss: ResMut<Boss>,
    mut banner: ResMut<DefeatBanner>,
    mut removed: EventWriter<BossRemovedEvent>,
    mut combat_log: ResMut<CombatLog>,
) {
    let dt = scene_dt(&time, &fx);
    for event in boss.tick(dt) {
        match event {
            BossEvent::Removed => {
                removed.send(BossRemovedEvent);
                banner.reveal();
                combat_log.log(
                    CombatLogEventType::BossDefeated,
                    "Thanos has been removed from the arena".to_string(),
                );
                info!("Boss removed, showing defeat banner");
            }
        }
    }
}

pub fn advance_banner(time: Res<Time>, fx: Res<CameraFx>, mut banner: ResMut<DefeatBanner>) {
    banner.tick(scene_dt(&time, &fx));
}

/// Apply hit effects and credit a random damage task for each impact.
pub fn resolve_impacts(
    mut impacts: EventReader<ImpactEvent>,
    mut boss: ResMut<Boss>,
    mut fx: ResMut<CameraFx>,
    tuning: Res<ArenaTuning>,
    mut rng: ResMut<GameRng>,
    mut damage_events: EventWriter<DamageEvent>,
    mut tally: ResMut<AttackTally>,
    mut combat_log: ResMut<CombatLog>,
) {
    for impact in impacts.read() {
        if !boss.is_alive() {
            debug!("{} impact after the boss died; ignored", impact.slot);
            continue;
        }

        let camera = &tuning.camera;
        fx.shake(camera.shake_secs, camera.shake_intensity);
        match impact.kind {
            AttackKind::Light => {
                boss.apply_hit_pulse();
            }
            AttackKind::Heavy => {
                fx.flash(camera.flash_secs);
                fx.zoom_punch(camera);
                fx.hit_stop(camera.hit_stop_secs);
                let secs = boss.tuning().tint_flash_secs;
                boss.flash_tint(secs);
            }
        }
        tally.impacts += 1;
        combat_log.log(
            CombatLogEventType::Impact,
            format!("{} lands a {} hit", impact.slot, impact.kind.name()),
        );
        combat_log.log(
            CombatLogEventType::BossHit,
            format!("Thanos reacts to a {} hit", impact.kind.name()),
        );

        damage_events.send(tuning.tasks.next_event(rng.source()));
    }
}

/// Kill the boss on the first finishing blow.
pub fn resolve_lethal_blows(
    mut blows: EventReader<LethalBlowEvent>,
    mut boss: ResMut<Boss>,
    mut defeated: EventWriter<BossDefeatedEvent>,
    mut combat_log: ResMut<CombatLog>,
) {
    for blow in blows.read() {
        if boss.apply_lethal_hit() {
            defeated.send(BossDefeatedEvent { slot: blow.slot });
            combat_log.log(
                CombatLogEventType::BossDefeated,
                format!("{} lands the finishing blow on Thanos", blow.slot),
            );
            info!("Boss defeated by {}", blow.slot);
        } else {
            debug!("{} finishing blow on a dead boss; ignored", blow.slot);
        }
    }
}

pub fn advance_camera_fx(
    time: Res<Time>,
    viewport: Res<Viewport>,
    mut fx: ResMut<CameraFx>,
    mut rng: ResMut<GameRng>,
) {
    fx.tick(time.delta_secs(), viewport.size(), rng.source());
}
