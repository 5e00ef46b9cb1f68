//! Scene population and layout

use bevy::prelude::*;

use crate::anim::AnimationSet;
use crate::combat::attacker::{ActorSlot, Attacker};
use crate::combat::boss::Boss;
use crate::combat::log::{CombatLog, CombatLogEventType};

use super::config::{ArenaConfig, ArenaTuning, Viewport};

/// Build the actor for `slot` at its layout home.
pub fn make_attacker(
    config: &ArenaConfig,
    tuning: &ArenaTuning,
    viewport: &Viewport,
    set: &AnimationSet,
    slot: ActorSlot,
) -> Attacker {
    let (home, footing) = tuning.home_for(config.variant, slot);
    let home = clamp_home(home, viewport, tuning);
    Attacker::new(
        slot,
        tuning.archetype_for(config.variant, slot),
        home,
        footing,
        set,
    )
}

/// Keep a home inside the right edge of the viewport.
pub fn clamp_home(home: Vec2, viewport: &Viewport, tuning: &ArenaTuning) -> Vec2 {
    Vec2::new(home.x.min(viewport.width - tuning.attacker.edge_margin), home.y)
}

/// Spawn the actors present from the first frame.
pub fn spawn_initial_roster(
    mut commands: Commands,
    config: Res<ArenaConfig>,
    tuning: Res<ArenaTuning>,
    viewport: Res<Viewport>,
    set: Res<AnimationSet>,
    mut combat_log: ResMut<CombatLog>,
) {
    combat_log.clear();
    combat_log.log(
        CombatLogEventType::SceneEvent,
        format!("{} scene started", config.variant),
    );

    for slot in ActorSlot::roster(config.variant.initial_roster()) {
        let attacker = make_attacker(&config, &tuning, &viewport, &set, slot);
        combat_log.log(
            CombatLogEventType::SceneEvent,
            format!("{} joins as {}", slot, attacker.archetype().key()),
        );
        commands.spawn((attacker, Name::new(slot.to_string())));
    }

    info!(
        "{} scene ready with {} actor(s)",
        config.variant,
        config.variant.initial_roster()
    );
}

/// Re-anchor the boss and clamp actor homes after a viewport change.
pub fn fit_scene_to_viewport(
    viewport: Res<Viewport>,
    config: Res<ArenaConfig>,
    tuning: Res<ArenaTuning>,
    mut boss: ResMut<Boss>,
    mut attackers: Query<&mut Attacker>,
) {
    if !viewport.is_changed() || viewport.is_added() {
        return;
    }

    boss.fit_viewport(viewport.size());
    for mut attacker in attackers.iter_mut() {
        let (home, _) = tuning.home_for(config.variant, attacker.slot);
        let home = clamp_home(home, &viewport, &tuning);
        attacker.rehome(home);
    }
    debug!("Scene fitted to {}x{}", viewport.width, viewport.height);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::config::ArenaVariant;

    #[test]
    fn test_home_clamped_to_narrow_viewport() {
        let tuning = ArenaTuning::default();
        let narrow = Viewport::new(300.0, 720.0);
        let home = clamp_home(Vec2::new(420.0, 570.0), &narrow, &tuning);
        assert_eq!(home, Vec2::new(280.0, 570.0));

        let wide = Viewport::default();
        assert_eq!(clamp_home(Vec2::new(420.0, 570.0), &wide, &tuning).x, 420.0);
    }

    #[test]
    fn test_make_attacker_uses_layout() {
        let config = ArenaConfig::new(ArenaVariant::Squad);
        let tuning = ArenaTuning::default();
        let set = AnimationSet::default();
        let attacker = make_attacker(&config, &tuning, &Viewport::default(), &set, ActorSlot(2));
        assert_eq!(attacker.home, Vec2::new(150.0 + 2.0 * 90.0, 570.0));
        assert_eq!(attacker.position, attacker.home);
    }
}
