//! Keybinding system for remappable controls
//!
//! Bindings live in the settings file and can be edited there.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All possible actions that can be bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    LightAttack,
    HeavyAttack,
    ChangeCharacter,
    /// Select the next actor (Squad)
    NextActor,
    Back,
}

impl GameAction {
    /// Label used on the HUD buttons.
    pub fn button_label(&self) -> &'static str {
        match self {
            GameAction::LightAttack => "LIGHT",
            GameAction::HeavyAttack => "HEAVY",
            GameAction::ChangeCharacter => "CHANGE",
            GameAction::NextActor => "NEXT",
            GameAction::Back => "QUIT",
        }
    }

    pub fn all() -> [GameAction; 5] {
        [
            GameAction::LightAttack,
            GameAction::HeavyAttack,
            GameAction::ChangeCharacter,
            GameAction::NextActor,
            GameAction::Back,
        ]
    }
}

/// Serializable wrapper for KeyCode (stores as string)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct SerializableKeyCode(String);

/// Keys the settings file may name.
const NAMED_KEYS: &[(&str, KeyCode, &str)] = &[
    ("Escape", KeyCode::Escape, "ESC"),
    ("Enter", KeyCode::Enter, "ENTER"),
    ("Space", KeyCode::Space, "SPACE"),
    ("Tab", KeyCode::Tab, "TAB"),
    ("KeyA", KeyCode::KeyA, "A"),
    ("KeyC", KeyCode::KeyC, "C"),
    ("KeyD", KeyCode::KeyD, "D"),
    ("KeyE", KeyCode::KeyE, "E"),
    ("KeyF", KeyCode::KeyF, "F"),
    ("KeyH", KeyCode::KeyH, "H"),
    ("KeyJ", KeyCode::KeyJ, "J"),
    ("KeyK", KeyCode::KeyK, "K"),
    ("KeyL", KeyCode::KeyL, "L"),
    ("KeyN", KeyCode::KeyN, "N"),
    ("KeyQ", KeyCode::KeyQ, "Q"),
    ("KeyS", KeyCode::KeyS, "S"),
    ("KeyW", KeyCode::KeyW, "W"),
    ("KeyX", KeyCode::KeyX, "X"),
    ("KeyZ", KeyCode::KeyZ, "Z"),
    ("Digit1", KeyCode::Digit1, "1"),
    ("Digit2", KeyCode::Digit2, "2"),
    ("Digit3", KeyCode::Digit3, "3"),
    ("Digit4", KeyCode::Digit4, "4"),
    ("ArrowUp", KeyCode::ArrowUp, "↑"),
    ("ArrowDown", KeyCode::ArrowDown, "↓"),
    ("ArrowLeft", KeyCode::ArrowLeft, "←"),
    ("ArrowRight", KeyCode::ArrowRight, "→"),
];

impl From<KeyCode> for SerializableKeyCode {
    fn from(key: KeyCode) -> Self {
        Self(format!("{:?}", key))
    }
}

impl TryFrom<SerializableKeyCode> for KeyCode {
    type Error = String;

    fn try_from(sk: SerializableKeyCode) -> Result<Self, Self::Error> {
        NAMED_KEYS
            .iter()
            .find(|(name, _, _)| *name == sk.0)
            .map(|(_, key, _)| *key)
            .ok_or_else(|| format!("unsupported key '{}'", sk.0))
    }
}

/// Key binding with primary and optional secondary key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyBinding {
    #[serde(with = "keycode_serde")]
    pub primary: KeyCode,
    #[serde(with = "option_keycode_serde", default)]
    pub secondary: Option<KeyCode>,
}

mod keycode_serde {
    use super::*;
    use serde::{de::Error, Deserializer, Serializer};

    pub fn serialize<S>(key: &KeyCode, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let sk: SerializableKeyCode = (*key).into();
        sk.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<KeyCode, D::Error>
    where
        D: Deserializer<'de>,
    {
        let sk = SerializableKeyCode::deserialize(deserializer)?;
        KeyCode::try_from(sk).map_err(D::Error::custom)
    }
}

mod option_keycode_serde {
    use super::*;
    use serde::{de::Error, Deserializer, Serializer};

    pub fn serialize<S>(key: &Option<KeyCode>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match key {
            Some(k) => {
                let sk: SerializableKeyCode = (*k).into();
                serializer.serialize_some(&sk)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<KeyCode>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt_sk: Option<SerializableKeyCode> = Option::deserialize(deserializer)?;
        opt_sk
            .map(|sk| KeyCode::try_from(sk).map_err(D::Error::custom))
            .transpose()
    }
}

impl KeyBinding {
    pub fn new(primary: KeyCode) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }
}

/// Complete keybindings configuration
#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
pub struct Keybindings {
    bindings: HashMap<GameAction, KeyBinding>,
}

impl Default for Keybindings {
    fn default() -> Self {
        Self::create_defaults()
    }
}

impl Keybindings {
    pub fn create_defaults() -> Self {
        let mut bindings = HashMap::new();
        bindings.insert(GameAction::LightAttack, KeyBinding::new(KeyCode::KeyJ));
        bindings.insert(GameAction::HeavyAttack, KeyBinding::new(KeyCode::KeyK));
        bindings.insert(GameAction::ChangeCharacter, KeyBinding::new(KeyCode::KeyC));
        bindings.insert(GameAction::NextActor, KeyBinding::new(KeyCode::Tab));
        bindings.insert(GameAction::Back, KeyBinding::new(KeyCode::Escape));
        Self { bindings }
    }

    pub fn get(&self, action: GameAction) -> Option<&KeyBinding> {
        self.bindings.get(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn action_just_pressed(&self, action: GameAction, keyboard: &ButtonInput<KeyCode>) -> bool {
        self.get(action).is_some_and(|binding| {
            keyboard.just_pressed(binding.primary)
                || binding.secondary.is_some_and(|key| keyboard.just_pressed(key))
        })
    }

    pub fn key_name(key: KeyCode) -> &'static str {
        NAMED_KEYS
            .iter()
            .find(|(_, k, _)| *k == key)
            .map(|(_, _, label)| *label)
            .unwrap_or("???")
    }

    /// Get display string for a binding
    pub fn binding_display(&self, action: GameAction) -> String {
        match self.get(action) {
            Some(binding) => {
                let primary = Self::key_name(binding.primary);
                match binding.secondary {
                    Some(secondary) => format!("{} / {}", primary, Self::key_name(secondary)),
                    None => primary.to_string(),
                }
            }
            None => "Unbound".to_string(),
        }
    }
}
