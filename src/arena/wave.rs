//! Wave variant task timer
//!
//! Every interval the timer either brings a new actor into the arena or, once
//! the roster is full, picks the next idle actor; either way that actor is
//! sent a light attack.

use bevy::prelude::*;

use crate::anim::AnimationSet;
use crate::camera::CameraFx;
use crate::combat::attacker::{ActorSlot, AttackKind, Attacker};
use crate::combat::boss::Boss;
use crate::combat::events::AttackRequested;
use crate::combat::log::{CombatLog, CombatLogEventType};

use super::config::{ArenaConfig, ArenaTuning, Viewport};
use super::setup::make_attacker;

#[derive(Resource, Debug)]
pub struct WaveTimer {
    pub timer: Timer,
    /// Slot after the one sent last
    cursor: ActorSlot,
}

impl WaveTimer {
    pub fn new(interval_secs: f32) -> Self {
        Self {
            timer: Timer::from_seconds(interval_secs, TimerMode::Repeating),
            cursor: ActorSlot(0),
        }
    }

    /// First idle slot at or after the cursor, wrapping.
    pub fn next_idle(&mut self, idle: &[ActorSlot], roster: usize) -> Option<ActorSlot> {
        let mut slot = self.cursor;
        for _ in 0..roster {
            if idle.contains(&slot) {
                self.cursor = slot.cycle(roster);
                return Some(slot);
            }
            slot = slot.cycle(roster);
        }
        None
    }
}

pub fn run_wave_timer(
    mut commands: Commands,
    time: Res<Time>,
    fx: Res<CameraFx>,
    mut wave: ResMut<WaveTimer>,
    config: Res<ArenaConfig>,
    tuning: Res<ArenaTuning>,
    viewport: Res<Viewport>,
    set: Res<AnimationSet>,
    boss: Res<Boss>,
    attackers: Query<&Attacker>,
    mut requests: EventWriter<AttackRequested>,
    mut combat_log: ResMut<CombatLog>,
) {
    if !boss.is_alive() {
        return;
    }

    wave.timer.tick(time.delta().mul_f32(fx.time_scale()));
    if !wave.timer.just_finished() {
        return;
    }

    let roster = attackers.iter().count();
    if roster < config.variant.max_roster() {
        let slot = ActorSlot(roster as u8);
        let attacker = make_attacker(&config, &tuning, &viewport, &set, slot);
        combat_log.log(
            CombatLogEventType::SceneEvent,
            format!("{} spawns as {}", slot, attacker.archetype().key()),
        );
        commands.spawn((attacker, Name::new(slot.to_string())));
        requests.send(AttackRequested {
            slot,
            kind: AttackKind::Light,
        });
        return;
    }

    let idle: Vec<ActorSlot> = attackers
        .iter()
        .filter(|a| !a.is_busy())
        .map(|a| a.slot)
        .collect();
    match wave.next_idle(&idle, roster) {
        Some(slot) => {
            requests.send(AttackRequested {
                slot,
                kind: AttackKind::Light,
            });
        }
        None => debug!("Wave tick skipped, every actor is busy"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_idle_round_robin() {
        let mut wave = WaveTimer::new(1.6);
        let all = [ActorSlot(0), ActorSlot(1), ActorSlot(2), ActorSlot(3)];
        assert_eq!(wave.next_idle(&all, 4), Some(ActorSlot(0)));
        assert_eq!(wave.next_idle(&all, 4), Some(ActorSlot(1)));

        // Slot 2 busy: skip to 3, then wrap
        let idle = [ActorSlot(0), ActorSlot(3)];
        assert_eq!(wave.next_idle(&idle, 4), Some(ActorSlot(3)));
        assert_eq!(wave.next_idle(&idle, 4), Some(ActorSlot(0)));
        assert_eq!(wave.next_idle(&[], 4), None);
    }
}
