//! Combat events
//!
//! Defines the events exchanged between input, the attacker state machines,
//! the boss and the presentation layer.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::attacker::{ActorSlot, AttackKind};

/// Request an attack from one actor (button, key, script or wave timer)
#[derive(Event, Debug, Clone, Copy)]
pub struct AttackRequested {
    pub slot: ActorSlot,
    pub kind: AttackKind,
}

/// Request the next character skin for one actor
#[derive(Event, Debug, Clone, Copy)]
pub struct CharacterChangeRequested {
    pub slot: ActorSlot,
}

/// An attack connected with the boss
#[derive(Event, Debug, Clone, Copy)]
pub struct ImpactEvent {
    pub slot: ActorSlot,
    pub kind: AttackKind,
}

/// A heavy attack delivered its finishing blow
#[derive(Event, Debug, Clone, Copy)]
pub struct LethalBlowEvent {
    pub slot: ActorSlot,
}

/// The boss died; fired once, when the death sequence starts
#[derive(Event, Debug, Clone, Copy)]
pub struct BossDefeatedEvent {
    /// Actor that landed the lethal blow
    pub slot: ActorSlot,
}

/// The boss death sequence finished and the sprite is gone
#[derive(Event, Debug, Clone, Copy)]
pub struct BossRemovedEvent;

/// A random task fired: `user` dealt `damage`
#[derive(Event, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageEvent {
    pub user: String,
    pub damage: u32,
}

/// Sound effects the scene can play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sfx {
    Slash,
    Impact,
    Change,
}

impl Sfx {
    pub fn asset_path(&self) -> &'static str {
        match self {
            Sfx::Slash => "Sounds/slash.mp3",
            Sfx::Impact => "Sounds/impact.mp3",
            Sfx::Change => "Sounds/change.mp3",
        }
    }

    pub fn volume(&self) -> f32 {
        match self {
            Sfx::Slash => 0.6,
            Sfx::Impact => 0.7,
            Sfx::Change => 0.5,
        }
    }

    /// Playback speed
    pub fn rate(&self) -> f32 {
        match self {
            Sfx::Slash => 1.05,
            Sfx::Impact | Sfx::Change => 1.0,
        }
    }
}

/// Event fired when a sound effect should play
#[derive(Event, Debug, Clone, Copy)]
pub struct SoundCue {
    pub sfx: Sfx,
}
