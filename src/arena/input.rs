//! Player input
//!
//! Keys and HUD buttons both go through [`ActionDispatch`], which turns a
//! [`GameAction`] into requests for the selected actor.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::combat::attacker::{ActorSlot, AttackKind, Attacker};
use crate::combat::components::SelectedActor;
use crate::combat::events::{AttackRequested, CharacterChangeRequested};
use crate::keybindings::{GameAction, Keybindings};

use super::config::ArenaConfig;

#[derive(SystemParam)]
pub struct ActionDispatch<'w, 's> {
    config: Res<'w, ArenaConfig>,
    selected: ResMut<'w, SelectedActor>,
    attackers: Query<'w, 's, &'static Attacker>,
    attacks: EventWriter<'w, AttackRequested>,
    changes: EventWriter<'w, CharacterChangeRequested>,
}

impl ActionDispatch<'_, '_> {
    pub fn selected(&self) -> ActorSlot {
        self.selected.0
    }

    pub fn roster(&self) -> usize {
        self.attackers.iter().count()
    }

    /// Whether the selected actor is mid-sequence.
    pub fn selected_busy(&self) -> bool {
        let slot = self.selected.0;
        self.attackers
            .iter()
            .find(|a| a.slot == slot)
            .is_some_and(|a| a.is_busy())
    }

    pub fn accepts_input(&self) -> bool {
        self.config.variant.accepts_input()
    }

    /// Emit the request for `action`. Returns false when nothing was sent.
    pub fn dispatch(&mut self, action: GameAction) -> bool {
        if !self.accepts_input() {
            return false;
        }

        let slot = self.selected.0;
        match action {
            GameAction::LightAttack | GameAction::HeavyAttack => {
                let kind = if action == GameAction::LightAttack {
                    AttackKind::Light
                } else {
                    AttackKind::Heavy
                };
                self.attacks.send(AttackRequested { slot, kind });
                true
            }
            GameAction::ChangeCharacter => {
                self.changes.send(CharacterChangeRequested { slot });
                true
            }
            GameAction::NextActor => {
                let roster = self.roster();
                if roster < 2 {
                    return false;
                }
                let next = self.selected.cycle(roster);
                debug!("Selected {}", next);
                true
            }
            GameAction::Back => false,
        }
    }
}

/// Map key presses to scene actions; `Back` quits.
pub fn keyboard_actions(
    keyboard: Res<ButtonInput<KeyCode>>,
    keybindings: Res<Keybindings>,
    mut dispatch: ActionDispatch,
    mut exit: EventWriter<AppExit>,
) {
    for action in GameAction::all() {
        if !keybindings.action_just_pressed(action, &keyboard) {
            continue;
        }
        if action == GameAction::Back {
            info!("Back pressed, leaving the arena");
            exit.send(AppExit::Success);
            continue;
        }
        dispatch.dispatch(action);
    }
}
