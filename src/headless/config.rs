//! JSON configuration parsing for headless mode

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::arena::config::{ArenaConfig, ArenaVariant};
use crate::combat::attacker::{ActorSlot, AttackKind};

/// What a script step asks an actor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScriptAction {
    Light,
    Heavy,
    Change,
}

impl ScriptAction {
    pub fn attack_kind(&self) -> Option<AttackKind> {
        match self {
            ScriptAction::Light => Some(AttackKind::Light),
            ScriptAction::Heavy => Some(AttackKind::Heavy),
            ScriptAction::Change => None,
        }
    }
}

/// One scripted input, fed to the scene at `at_secs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub at_secs: f32,
    /// 0-based actor slot
    #[serde(default)]
    pub slot: u8,
    pub action: ScriptAction,
}

impl ScriptStep {
    pub fn actor(&self) -> ActorSlot {
        ActorSlot(self.slot)
    }
}

/// Headless scene configuration loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlessSceneConfig {
    #[serde(default)]
    pub variant: ArenaVariant,
    /// Inputs in any order; they are sorted by time before the run
    #[serde(default)]
    pub script: Vec<ScriptStep>,
    /// Random seed for deterministic scene reproduction
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Scene time after which the run stops (default: 30)
    #[serde(default = "default_max_duration")]
    pub max_duration_secs: f32,
    /// Custom output path for the scene log (optional)
    #[serde(default)]
    pub output_path: Option<String>,
    /// Wave variant task interval (default: 1.6)
    #[serde(default = "default_task_interval")]
    pub task_interval_secs: f32,
}

fn default_max_duration() -> f32 {
    30.0
}

fn default_task_interval() -> f32 {
    1.6
}

impl Default for HeadlessSceneConfig {
    fn default() -> Self {
        Self {
            variant: ArenaVariant::Solo,
            script: Vec::new(),
            random_seed: None,
            max_duration_secs: default_max_duration(),
            output_path: None,
            task_interval_secs: default_task_interval(),
        }
    }
}

impl HeadlessSceneConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, String> {
        let config: HeadlessSceneConfig =
            serde_json::from_str(contents).map_err(|e| format!("Failed to parse JSON: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.max_duration_secs > 0.0) {
            return Err("max_duration_secs must be positive".to_string());
        }
        if !(self.task_interval_secs > 0.0) {
            return Err("task_interval_secs must be positive".to_string());
        }
        if self.script.is_empty() && self.variant.accepts_input() {
            return Err(format!(
                "script must contain at least one step for the {} variant",
                self.variant
            ));
        }

        let roster = self.variant.max_roster();
        for (i, step) in self.script.iter().enumerate() {
            if !step.at_secs.is_finite() || step.at_secs < 0.0 {
                return Err(format!("script[{}].at_secs must be a non-negative number", i));
            }
            if step.at_secs >= self.max_duration_secs {
                return Err(format!(
                    "script[{}].at_secs {} is past max_duration_secs {}",
                    i, step.at_secs, self.max_duration_secs
                ));
            }
            if step.slot as usize >= roster {
                return Err(format!(
                    "script[{}].slot {} is out of range ({} has {} slot(s))",
                    i, step.slot, self.variant, roster
                ));
            }
        }
        Ok(())
    }

    /// Script steps ordered by time; ties keep file order.
    pub fn sorted_script(&self) -> Vec<ScriptStep> {
        let mut script = self.script.clone();
        script.sort_by(|a, b| a.at_secs.total_cmp(&b.at_secs));
        script
    }

    pub fn to_arena_config(&self) -> ArenaConfig {
        ArenaConfig {
            variant: self.variant,
            seed: self.random_seed,
            task_interval_secs: self.task_interval_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = HeadlessSceneConfig::from_json(
            r#"{ "script": [ { "at_secs": 0.5, "action": "Heavy" } ] }"#,
        )
        .unwrap();
        assert_eq!(config.variant, ArenaVariant::Solo);
        assert_eq!(config.max_duration_secs, 30.0);
        assert_eq!(config.script[0].actor(), ActorSlot(0));
        assert_eq!(config.to_arena_config().task_interval_secs, 1.6);
    }

    #[test]
    fn test_slot_must_fit_variant() {
        let json = r#"{ "variant": "Solo", "script": [ { "at_secs": 0.0, "slot": 1, "action": "Light" } ] }"#;
        assert!(HeadlessSceneConfig::from_json(json).is_err());

        let json = r#"{ "variant": "Squad", "script": [ { "at_secs": 0.0, "slot": 3, "action": "Light" } ] }"#;
        assert!(HeadlessSceneConfig::from_json(json).is_ok());
    }

    #[test]
    fn test_empty_script_only_for_wave() {
        assert!(HeadlessSceneConfig::from_json(r#"{ "variant": "Solo" }"#).is_err());
        assert!(HeadlessSceneConfig::from_json(r#"{ "variant": "Wave" }"#).is_ok());
    }

    #[test]
    fn test_bad_times_rejected() {
        let late = r#"{ "max_duration_secs": 2.0, "script": [ { "at_secs": 5.0, "action": "Light" } ] }"#;
        assert!(HeadlessSceneConfig::from_json(late).is_err());

        let negative = r#"{ "script": [ { "at_secs": -1.0, "action": "Light" } ] }"#;
        assert!(HeadlessSceneConfig::from_json(negative).is_err());

        let zero = r#"{ "max_duration_secs": 0.0, "script": [ { "at_secs": 0.0, "action": "Light" } ] }"#;
        assert!(HeadlessSceneConfig::from_json(zero).is_err());
    }

    #[test]
    fn test_unknown_action_rejected() {
        let json = r#"{ "script": [ { "at_secs": 0.0, "action": "Uppercut" } ] }"#;
        assert!(HeadlessSceneConfig::from_json(json).is_err());
    }

    #[test]
    fn test_script_sorted_by_time() {
        let config = HeadlessSceneConfig {
            script: vec![
                ScriptStep { at_secs: 2.0, slot: 0, action: ScriptAction::Heavy },
                ScriptStep { at_secs: 0.5, slot: 0, action: ScriptAction::Light },
                ScriptStep { at_secs: 0.5, slot: 0, action: ScriptAction::Change },
            ],
            ..Default::default()
        };
        let actions: Vec<ScriptAction> = config.sorted_script().iter().map(|s| s.action).collect();
        assert_eq!(
            actions,
            vec![ScriptAction::Light, ScriptAction::Change, ScriptAction::Heavy]
        );
    }
}
