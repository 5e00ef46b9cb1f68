//! Random damage tasks
//!
//! Each landed hit is credited to a user drawn from a fixed roster, for a
//! random amount of damage. The source keeps no state between draws.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::combat::events::DamageEvent;

/// Users credited with damage.
pub const DEFAULT_ROSTER: [&str; 10] = [
    "Ravi", "Anya", "John", "Leena", "Kiran", "Maya", "Zed", "Aditi", "Hiro", "Rita",
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageEventSource {
    pub roster: Vec<String>,
    /// Smallest damage roll (inclusive)
    pub min_damage: u32,
    /// Largest damage roll (inclusive)
    pub max_damage: u32,
}

impl Default for DamageEventSource {
    fn default() -> Self {
        Self {
            roster: DEFAULT_ROSTER.iter().map(|name| name.to_string()).collect(),
            min_damage: 50,
            max_damage: 149,
        }
    }
}

impl DamageEventSource {
    pub fn new(roster: Vec<String>, min_damage: u32, max_damage: u32) -> Result<Self, String> {
        let source = Self {
            roster,
            min_damage,
            max_damage,
        };
        source.validate()?;
        Ok(source)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.roster.is_empty() {
            return Err("task roster must name at least one user".to_string());
        }
        if self.roster.iter().any(|name| name.trim().is_empty()) {
            return Err("task roster contains an empty user name".to_string());
        }
        if self.min_damage == 0 {
            return Err("min_damage must be positive".to_string());
        }
        if self.min_damage > self.max_damage {
            return Err(format!(
                "min_damage {} exceeds max_damage {}",
                self.min_damage, self.max_damage
            ));
        }
        Ok(())
    }

    pub fn damage_range(&self) -> RangeInclusive<u32> {
        self.min_damage..=self.max_damage
    }

    /// Draw a user and a damage amount uniformly.
    pub fn next_event<R: Rng + ?Sized>(&self, rng: &mut R) -> DamageEvent {
        let user = self.roster[rng.gen_range(0..self.roster.len())].clone();
        let damage = rng.gen_range(self.damage_range());
        DamageEvent { user, damage }
    }
}
