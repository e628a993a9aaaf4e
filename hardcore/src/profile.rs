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

//! Players, their skill profiles and the store seam

use crate::delta::{SkillDelta, SkillDeltas};
use crate::skill::SkillId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;
use uuid::Uuid;

/// A connected player as seen by the hardcore rules
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
}

impl Player {
    /// Create a player with a fresh id
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
        }
    }

    /// Create a player with a known id
    pub fn with_id(id: Uuid, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

/// Level and experience toward the next level for one skill
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillLevelState {
    pub level: i32,
    #[serde(default)]
    pub xp: i32,
}

impl SkillLevelState {
    pub fn new(level: i32, xp: i32) -> Self {
        Self { level, xp }
    }
}

/// Skill levels of a single player
///
/// Skills without an entry are at level 0 with no experience.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillProfile {
    #[serde(default)]
    pub skills: BTreeMap<SkillId, SkillLevelState>,
}

impl SkillProfile {
    /// Create an empty profile
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder style setter for a single skill
    pub fn with_skill(mut self, skill: SkillId, level: i32, xp: i32) -> Self {
        self.set(skill, SkillLevelState::new(level, xp));
        self
    }

    pub fn get(&self, skill: SkillId) -> SkillLevelState {
        self.skills.get(&skill).copied().unwrap_or_default()
    }

    pub fn set(&mut self, skill: SkillId, state: SkillLevelState) {
        self.skills.insert(skill, state);
    }

    pub fn level(&self, skill: SkillId) -> i32 {
        self.get(skill).level
    }

    pub fn xp(&self, skill: SkillId) -> i32 {
        self.get(skill).xp
    }

    /// Remove levels and experience, never going below zero
    pub fn lose(&mut self, skill: SkillId, delta: SkillDelta) {
        let state = self.get(skill);
        self.set(
            skill,
            SkillLevelState {
                level: (state.level - delta.levels).max(0),
                xp: (state.xp - delta.xp as i32).max(0),
            },
        );
    }

    /// Add levels and experience
    pub fn gain(&mut self, skill: SkillId, delta: SkillDelta) {
        let state = self.get(skill);
        self.set(
            skill,
            SkillLevelState {
                level: state.level.saturating_add(delta.levels),
                xp: state.xp.saturating_add(delta.xp as i32),
            },
        );
    }

    /// Remove every delta in the map
    pub fn lose_all(&mut self, deltas: &SkillDeltas) {
        for (skill, delta) in deltas.iter() {
            self.lose(*skill, *delta);
        }
    }

    /// Add every delta in the map
    pub fn gain_all(&mut self, deltas: &SkillDeltas) {
        for (skill, delta) in deltas.iter() {
            self.gain(*skill, *delta);
        }
    }
}

/// Read access to player skill profiles
#[cfg_attr(test, mockall::automock)]
pub trait PlayerSkillStore: Send + Sync {
    /// Whether a profile is loaded for the player
    fn has_profile(&self, player: &Player) -> bool;

    /// Current level of a skill, 0 when unknown
    fn level(&self, player: &Player, skill: SkillId) -> i32;

    /// Experience accrued toward the next level, 0 when unknown
    fn xp(&self, player: &Player, skill: SkillId) -> i32;
}

/// Thread-safe in-memory profile store keyed by player id
#[derive(Debug, Default)]
pub struct InMemorySkillStore {
    profiles: RwLock<HashMap<Uuid, SkillProfile>>,
}

impl InMemorySkillStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a player's profile
    pub fn insert(&self, player: &Player, profile: SkillProfile) {
        let mut profiles = self.profiles.write().unwrap_or_else(|e| e.into_inner());
        profiles.insert(player.id, profile);
    }

    /// Remove a player's profile, returning it if present
    pub fn remove(&self, player: &Player) -> Option<SkillProfile> {
        let mut profiles = self.profiles.write().unwrap_or_else(|e| e.into_inner());
        profiles.remove(&player.id)
    }

    /// Snapshot of a player's profile
    pub fn profile(&self, player: &Player) -> Option<SkillProfile> {
        let profiles = self.profiles.read().unwrap_or_else(|e| e.into_inner());
        profiles.get(&player.id).cloned()
    }

    /// Mutate a player's profile in place. Returns false when no profile exists.
    pub fn update<F>(&self, player: &Player, f: F) -> bool
    where
        F: FnOnce(&mut SkillProfile),
    {
        let mut profiles = self.profiles.write().unwrap_or_else(|e| e.into_inner());
        match profiles.get_mut(&player.id) {
            Some(profile) => {
                f(profile);
                true
            }
            None => false,
        }
    }

    /// Number of loaded profiles
    pub fn len(&self) -> usize {
        let profiles = self.profiles.read().unwrap_or_else(|e| e.into_inner());
        profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_state(&self, player: &Player, skill: SkillId) -> SkillLevelState {
        let profiles = self.profiles.read().unwrap_or_else(|e| e.into_inner());
        profiles
            .get(&player.id)
            .map(|profile| profile.get(skill))
            .unwrap_or_default()
    }
}

impl PlayerSkillStore for InMemorySkillStore {
    fn has_profile(&self, player: &Player) -> bool {
        let profiles = self.profiles.read().unwrap_or_else(|e| e.into_inner());
        profiles.contains_key(&player.id)
    }

    fn level(&self, player: &Player, skill: SkillId) -> i32 {
        self.read_state(player, skill).level
    }

    fn xp(&self, player: &Player, skill: SkillId) -> i32 {
        self.read_state(player, skill).xp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_defaults_to_zero() {
        let profile = SkillProfile::new().with_skill(SkillId::Mining, 12, 40);
        assert_eq!(profile.level(SkillId::Mining), 12);
        assert_eq!(profile.xp(SkillId::Mining), 40);
        assert_eq!(profile.get(SkillId::Swords), SkillLevelState::default());
    }

    #[test]
    fn test_lose_clamps_at_zero() {
        let mut profile = SkillProfile::new().with_skill(SkillId::Axes, 3, 10);
        profile.lose(SkillId::Axes, SkillDelta::new(5, 25.0));
        assert_eq!(profile.get(SkillId::Axes), SkillLevelState::new(0, 0));
    }

    #[test]
    fn test_gain_adds() {
        let mut profile = SkillProfile::new().with_skill(SkillId::Archery, 7, 3);
        profile.gain(SkillId::Archery, SkillDelta::new(2, 11.0));
        profile.gain(SkillId::Taming, SkillDelta::new(1, 0.0));
        assert_eq!(profile.get(SkillId::Archery), SkillLevelState::new(9, 14));
        assert_eq!(profile.get(SkillId::Taming), SkillLevelState::new(1, 0));
    }

    #[test]
    fn test_gain_saturates() {
        let mut profile = SkillProfile::new().with_skill(SkillId::Swords, i32::MAX - 1, i32::MAX);
        profile.gain(SkillId::Swords, SkillDelta::new(5, 10.0));
        assert_eq!(
            profile.get(SkillId::Swords),
            SkillLevelState::new(i32::MAX, i32::MAX)
        );
    }

    #[test]
    fn test_store_lookup() {
        let store = InMemorySkillStore::new();
        let alice = Player::new("Alice");
        let bob = Player::new("Bob");

        store.insert(&alice, SkillProfile::new().with_skill(SkillId::Swords, 20, 150));

        assert!(store.has_profile(&alice));
        assert!(!store.has_profile(&bob));
        assert_eq!(store.level(&alice, SkillId::Swords), 20);
        assert_eq!(store.xp(&alice, SkillId::Swords), 150);
        assert_eq!(store.level(&alice, SkillId::Mining), 0);
        assert_eq!(store.level(&bob, SkillId::Swords), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_update() {
        let store = InMemorySkillStore::new();
        let alice = Player::new("Alice");
        let bob = Player::new("Bob");
        store.insert(&alice, SkillProfile::new());

        assert!(store.update(&alice, |p| p.set(SkillId::Fishing, SkillLevelState::new(4, 2))));
        assert!(!store.update(&bob, |p| p.set(SkillId::Fishing, SkillLevelState::new(4, 2))));
        assert_eq!(store.level(&alice, SkillId::Fishing), 4);

        assert!(store.remove(&alice).is_some());
        assert!(store.is_empty());
    }

    #[test]
    fn test_profile_yaml() {
        let yaml = "skills:\n  swords:\n    level: 10\n    xp: 100\n  mining:\n    level: 3\n";
        let profile: SkillProfile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(profile.get(SkillId::Swords), SkillLevelState::new(10, 100));
        assert_eq!(profile.get(SkillId::Mining), SkillLevelState::new(3, 0));
    }
}
