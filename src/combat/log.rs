//! Combat logging
//!
//! Records scene events for display, headless summaries and post-run analysis.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A single entry in the combat log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatLogEntry {
    /// Timestamp in scene time (seconds since the scene started)
    pub timestamp: f32,
    /// The type of event
    pub event_type: CombatLogEventType,
    /// Human-readable description of the event
    pub message: String,
}

/// Types of combat log events for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatLogEventType {
    /// An actor started an attack sequence
    Attack,
    /// An attack connected
    Impact,
    /// The boss reacted to a hit
    BossHit,
    /// The boss was killed or removed
    BossDefeated,
    /// A damage task was credited to a user
    Damage,
    /// Scene event (start, spawn, character change, ...)
    SceneEvent,
}

/// The combat log resource storing all events
#[derive(Resource, Default, Debug, Serialize, Deserialize)]
pub struct CombatLog {
    /// All log entries in chronological order
    pub entries: Vec<CombatLogEntry>,
    /// Current scene time
    pub scene_time: f32,
}

impl CombatLog {
    /// Clear the log for a new scene
    pub fn clear(&mut self) {
        self.entries.clear();
        self.scene_time = 0.0;
    }

    /// Add a new entry to the log
    pub fn log(&mut self, event_type: CombatLogEventType, message: String) {
        self.entries.push(CombatLogEntry {
            timestamp: self.scene_time,
            event_type,
            message,
        });
    }

    /// Get entries filtered by event type
    pub fn filter_by_type(&self, event_type: CombatLogEventType) -> Vec<&CombatLogEntry> {
        self.entries
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    pub fn count(&self, event_type: CombatLogEventType) -> usize {
        self.entries
            .iter()
            .filter(|e| e.event_type == event_type)
            .count()
    }

    /// Get the last N entries
    pub fn recent(&self, count: usize) -> Vec<&CombatLogEntry> {
        self.entries.iter().rev().take(count).rev().collect()
    }

    /// Write the log as pretty JSON, returning the path written.
    pub fn save_to_file(&self, path: Option<&str>) -> Result<String, String> {
        let filename = path
            .map(str::to_string)
            .unwrap_or_else(|| "scene_logs/scene_log.json".to_string());

        if let Some(parent) = Path::new(&filename).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
            }
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize combat log: {}", e))?;
        fs::write(&filename, contents)
            .map_err(|e| format!("Failed to write {}: {}", filename, e))?;

        Ok(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_are_stamped_with_scene_time() {
        let mut log = CombatLog::default();
        log.scene_time = 1.5;
        log.log(CombatLogEventType::Attack, "Actor 1 Light attack".to_string());
        log.scene_time = 2.0;
        log.log(CombatLogEventType::Impact, "Actor 1 Light impact".to_string());

        assert_eq!(log.entries[0].timestamp, 1.5);
        assert_eq!(log.entries[1].timestamp, 2.0);
        assert_eq!(log.count(CombatLogEventType::Impact), 1);
        assert_eq!(log.recent(1)[0].message, "Actor 1 Light impact");
    }

    #[test]
    fn test_clear_resets_time() {
        let mut log = CombatLog::default();
        log.scene_time = 3.0;
        log.log(CombatLogEventType::SceneEvent, "start".to_string());
        log.clear();
        assert!(log.entries.is_empty());
        assert_eq!(log.scene_time, 0.0);
    }
}
