//
// Copyright 2025-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Per-skill level and experience changes
//!
//! ### **Equations**
//! S = Stats moved, fractional levels
//!
//! Death stat loss:
//! S = max(0, L - T) * (P * 0.01)
//!
//! Vampirism:
//! S = L_victim * (P * 0.01)
//!
//! Both split S the same way:
//! ΔL = trunc(S)
//! ΔX = floor(X * (S - ΔL))
//!
//! Where:
//! - **L** = Current skill level
//! - **X** = Experience accrued toward the next level
//! - **T** = Level threshold below which nothing is taken
//! - **P** = Configured percentage (0-100)
//!
//! The share is always formed as `P * 0.01`. `P / 100` rounds differently in
//! binary floating point (35% of 180 truncates to 62 instead of 63).

use crate::skill::SkillId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Levels and experience moved for a single skill
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillDelta {
    pub levels: i32,
    pub xp: f32,
}

impl SkillDelta {
    pub const ZERO: SkillDelta = SkillDelta {
        levels: 0,
        xp: 0.0,
    };

    pub fn new(levels: i32, xp: f32) -> Self {
        Self { levels, xp }
    }

    pub fn is_zero(&self) -> bool {
        self.levels == 0 && self.xp == 0.0
    }
}

/// Changes for every skill considered by one penalty or transfer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillDeltas(BTreeMap<SkillId, SkillDelta>);

impl SkillDeltas {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, skill: SkillId, delta: SkillDelta) {
        self.0.insert(skill, delta);
    }

    /// Change recorded for a skill, zero when the skill was not considered
    pub fn get(&self, skill: SkillId) -> SkillDelta {
        self.0.get(&skill).copied().unwrap_or_default()
    }

    pub fn get_mut(&mut self, skill: SkillId) -> Option<&mut SkillDelta> {
        self.0.get_mut(&skill)
    }

    pub fn contains(&self, skill: SkillId) -> bool {
        self.0.contains_key(&skill)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SkillId, &SkillDelta)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of whole levels across all skills
    pub fn total_levels(&self) -> i32 {
        self.0.values().map(|delta| delta.levels).sum()
    }
}

impl FromIterator<(SkillId, SkillDelta)> for SkillDeltas {
    fn from_iter<I: IntoIterator<Item = (SkillId, SkillDelta)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Levels and experience lost on death for one skill
///
/// Nothing is lost at or below the threshold, or at level 0.
pub fn stat_loss(level: i32, xp: i32, threshold: i32, percentage: f64) -> SkillDelta {
    if level <= 0 || level <= threshold {
        return SkillDelta::ZERO;
    }
    let stats_lost = f64::from(level.saturating_sub(threshold).max(0)) * share(percentage);
    split(stats_lost, xp)
}

/// Levels and experience a killer leeches from a victim for one skill
///
/// The victim must be above the threshold and at least half the killer's
/// level, using integer division.
pub fn vampirism(
    killer_level: i32,
    victim_level: i32,
    victim_xp: i32,
    threshold: i32,
    percentage: f64,
) -> SkillDelta {
    if victim_level <= 0 || victim_level < killer_level / 2 || victim_level <= threshold {
        return SkillDelta::ZERO;
    }
    let stats_stolen = f64::from(victim_level) * share(percentage);
    split(stats_stolen, victim_xp)
}

fn share(percentage: f64) -> f64 {
    percentage * 0.01
}

/// Whole levels plus the fractional remainder applied to current experience
fn split(stats: f64, xp: i32) -> SkillDelta {
    let levels = stats as i32;
    let xp_moved = (f64::from(xp) * (stats - f64::from(levels))).floor();
    SkillDelta::new(levels, xp_moved as f32)
}
