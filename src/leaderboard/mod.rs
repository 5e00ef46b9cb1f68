//! Damage leaderboard
//!
//! Aggregates [`DamageEvent`]s into per-user running totals and ranks them.
//! Totals only ever grow; there is no removal.

use bevy::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

pub mod tasks;

pub use tasks::DamageEventSource;

use crate::combat::events::DamageEvent;
use crate::combat::log::{CombatLog, CombatLogEventType};
use crate::combat::ArenaSet;

/// Number of lines shown in the HUD panel.
pub const DISPLAY_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardError {
    ZeroDamage,
}

impl fmt::Display for LeaderboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaderboardError::ZeroDamage => write!(f, "damage must be positive"),
        }
    }
}

impl std::error::Error for LeaderboardError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub total: u64,
}

/// One line of the ranking, 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub name: String,
    pub total: u64,
}

impl fmt::Display for RankedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {} - {} dmg", self.rank, self.name, self.total)
    }
}

#[derive(Resource, Debug, Default, Clone)]
pub struct Leaderboard {
    /// First-insertion order; ranking ties fall back to it
    entries: Vec<LeaderboardEntry>,
    index: HashMap<String, usize>,
}

impl Leaderboard {
    /// Add `amount` to `user`'s total and return the new total.
    pub fn record_damage(&mut self, user: &str, amount: u64) -> Result<u64, LeaderboardError> {
        if amount == 0 {
            return Err(LeaderboardError::ZeroDamage);
        }

        let slot = match self.index.get(user) {
            Some(&slot) => slot,
            None => {
                self.entries.push(LeaderboardEntry {
                    name: user.to_string(),
                    total: 0,
                });
                let slot = self.entries.len() - 1;
                self.index.insert(user.to_string(), slot);
                slot
            }
        };

        let entry = &mut self.entries[slot];
        entry.total = entry.total.saturating_add(amount);
        Ok(entry.total)
    }

    pub fn total_for(&self, user: &str) -> Option<u64> {
        self.index.get(user).map(|&slot| self.entries[slot].total)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every user, highest total first.
    pub fn ranking(&self) -> Vec<RankedEntry> {
        let mut sorted: Vec<&LeaderboardEntry> = self.entries.iter().collect();
        // Stable sort keeps first-insertion order on ties
        sorted.sort_by(|a, b| b.total.cmp(&a.total));
        sorted
            .into_iter()
            .enumerate()
            .map(|(i, entry)| RankedEntry {
                rank: i + 1,
                name: entry.name.clone(),
                total: entry.total,
            })
            .collect()
    }

    pub fn top(&self, n: usize) -> Vec<RankedEntry> {
        let mut ranking = self.ranking();
        ranking.truncate(n);
        ranking
    }

    /// HUD lines for the top ten.
    pub fn display_lines(&self) -> Vec<String> {
        self.top(DISPLAY_LIMIT)
            .iter()
            .map(RankedEntry::to_string)
            .collect()
    }
}

pub struct LeaderboardPlugin;

impl Plugin for LeaderboardPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Leaderboard>()
            .add_systems(Update, record_damage_events.in_set(ArenaSet::Bookkeeping));
    }
}

/// Credit each damage task to the board.
pub fn record_damage_events(
    mut damage_events: EventReader<DamageEvent>,
    mut leaderboard: ResMut<Leaderboard>,
    mut combat_log: ResMut<CombatLog>,
) {
    for event in damage_events.read() {
        match leaderboard.record_damage(&event.user, event.damage as u64) {
            Ok(total) => {
                combat_log.log(
                    CombatLogEventType::Damage,
                    format!("{} dealt {} damage (total {})", event.user, event.damage, total),
                );
            }
            Err(e) => warn!("Dropped damage task for {}: {}", event.user, e),
        }
    }
}
