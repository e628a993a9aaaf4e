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

//! Skill catalogue and the registry seam used by the hardcore rules
//!
//! Skills are either *primary* or *child*. A child skill has no experience of
//! its own; its level is derived from its parents. Only primary (non-child)
//! skills take part in death stat loss and vampirism.

use crate::config::HardcoreConfig;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Unique skill identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillId {
    Acrobatics,
    Alchemy,
    Archery,
    Axes,
    Excavation,
    Fishing,
    Herbalism,
    Mining,
    Repair,
    Salvage,
    Smelting,
    Swords,
    Taming,
    Unarmed,
    Woodcutting,
}

impl SkillId {
    /// Get the skill's display name
    pub fn name(&self) -> &'static str {
        match self {
            SkillId::Acrobatics => "Acrobatics",
            SkillId::Alchemy => "Alchemy",
            SkillId::Archery => "Archery",
            SkillId::Axes => "Axes",
            SkillId::Excavation => "Excavation",
            SkillId::Fishing => "Fishing",
            SkillId::Herbalism => "Herbalism",
            SkillId::Mining => "Mining",
            SkillId::Repair => "Repair",
            SkillId::Salvage => "Salvage",
            SkillId::Smelting => "Smelting",
            SkillId::Swords => "Swords",
            SkillId::Taming => "Taming",
            SkillId::Unarmed => "Unarmed",
            SkillId::Woodcutting => "Woodcutting",
        }
    }

    /// Get all skills
    pub fn all() -> Vec<SkillId> {
        vec![
            SkillId::Acrobatics,
            SkillId::Alchemy,
            SkillId::Archery,
            SkillId::Axes,
            SkillId::Excavation,
            SkillId::Fishing,
            SkillId::Herbalism,
            SkillId::Mining,
            SkillId::Repair,
            SkillId::Salvage,
            SkillId::Smelting,
            SkillId::Swords,
            SkillId::Taming,
            SkillId::Unarmed,
            SkillId::Woodcutting,
        ]
    }

    /// Get all primary skills, in catalogue order
    pub fn non_child() -> Vec<SkillId> {
        Self::all()
            .into_iter()
            .filter(|id| !id.is_child())
            .collect()
    }

    /// Skills this one is derived from. Empty for primary skills.
    pub fn parents(&self) -> &'static [SkillId] {
        SKILL_DEFINITIONS
            .get(self)
            .map(|def| def.parents)
            .unwrap_or(&[])
    }

    /// One line summary of what the skill covers
    pub fn description(&self) -> &'static str {
        SKILL_DEFINITIONS
            .get(self)
            .map(|def| def.description)
            .unwrap_or("")
    }

    /// Whether this skill is derived from other skills
    pub fn is_child(&self) -> bool {
        !self.parents().is_empty()
    }

    /// Parse a skill from its display name, ignoring case
    pub fn from_name(s: &str) -> Option<SkillId> {
        Self::all()
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SkillId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkillId::from_name(s).ok_or_else(|| format!("Unknown skill: {}", s))
    }
}

/// Static description of a skill
#[derive(Debug, Clone)]
pub struct SkillDefinition {
    pub id: SkillId,
    pub name: &'static str,
    pub description: &'static str,
    pub parents: &'static [SkillId],
}

/// Catalogue of every skill keyed by id
pub static SKILL_DEFINITIONS: Lazy<HashMap<SkillId, SkillDefinition>> = Lazy::new(|| {
    let mut definitions = HashMap::new();
    let mut insert = |id: SkillId, description: &'static str, parents: &'static [SkillId]| {
        definitions.insert(
            id,
            SkillDefinition {
                id,
                name: id.name(),
                description,
                parents,
            },
        );
    };

    insert(SkillId::Acrobatics, "Rolling and dodging to soften falls and blows", &[]);
    insert(SkillId::Alchemy, "Brewing potions with stronger effects", &[]);
    insert(SkillId::Archery, "Precision with bows", &[]);
    insert(SkillId::Axes, "Cleaving foes and armor alike", &[]);
    insert(SkillId::Excavation, "Digging through soft ground for treasure", &[]);
    insert(SkillId::Fishing, "Pulling food and treasure from the water", &[]);
    insert(SkillId::Herbalism, "Harvesting plants and crops", &[]);
    insert(SkillId::Mining, "Breaking stone and extracting ore", &[]);
    insert(SkillId::Repair, "Mending worn tools and armor", &[]);
    insert(SkillId::Salvage, "Breaking items down into materials", &[SkillId::Repair]);
    insert(
        SkillId::Smelting,
        "Refining ore with less fuel",
        &[SkillId::Mining, SkillId::Fishing],
    );
    insert(SkillId::Swords, "Blade work and counter attacks", &[]);
    insert(SkillId::Taming, "Befriending and commanding animals", &[]);
    insert(SkillId::Unarmed, "Fighting with bare fists", &[]);
    insert(SkillId::Woodcutting, "Felling trees efficiently", &[]);

    definitions
});

/// Source of the skills subject to hardcore rules and their per-skill switches
#[cfg_attr(test, mockall::automock)]
pub trait SkillRegistry: Send + Sync {
    /// Primary skills, in a stable order
    fn non_child_skills(&self) -> Vec<SkillId>;

    /// Whether dying costs levels in this skill
    fn stat_loss_enabled(&self, skill: SkillId) -> bool;

    /// Whether a killer can leech levels of this skill from a victim
    fn vampirism_enabled(&self, skill: SkillId) -> bool;
}

/// Skill registry backed by the hardcore configuration's enable tables
///
/// Skills absent from a table are disabled. Child skills are never enabled.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredSkillRegistry {
    stat_loss: HashMap<SkillId, bool>,
    vampirism: HashMap<SkillId, bool>,
}

impl ConfiguredSkillRegistry {
    /// Create a registry from explicit enable tables
    pub fn new(stat_loss: HashMap<SkillId, bool>, vampirism: HashMap<SkillId, bool>) -> Self {
        Self {
            stat_loss,
            vampirism,
        }
    }

    /// Create a registry from loaded configuration
    pub fn from_config(config: &HardcoreConfig) -> Self {
        Self::new(
            config.death_stat_loss.enabled.clone(),
            config.vampirism.enabled.clone(),
        )
    }

    /// Create a registry where every primary skill has both features on
    pub fn all_enabled() -> Self {
        let table: HashMap<SkillId, bool> =
            SkillId::non_child().into_iter().map(|id| (id, true)).collect();
        Self::new(table.clone(), table)
    }

    fn lookup(table: &HashMap<SkillId, bool>, skill: SkillId) -> bool {
        !skill.is_child() && table.get(&skill).copied().unwrap_or(false)
    }
}

impl SkillRegistry for ConfiguredSkillRegistry {
    fn non_child_skills(&self) -> Vec<SkillId> {
        SkillId::non_child()
    }

    fn stat_loss_enabled(&self, skill: SkillId) -> bool {
        Self::lookup(&self.stat_loss, skill)
    }

    fn vampirism_enabled(&self, skill: SkillId) -> bool {
        Self::lookup(&self.vampirism, skill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_complete() {
        assert_eq!(SKILL_DEFINITIONS.len(), SkillId::all().len());
        for id in SkillId::all() {
            let def = SKILL_DEFINITIONS.get(&id).unwrap();
            assert_eq!(def.id, id);
            assert_eq!(def.name, id.name());
        }
    }

    #[test]
    fn test_child_skills() {
        assert!(SkillId::Salvage.is_child());
        assert!(SkillId::Smelting.is_child());
        assert_eq!(SkillId::Smelting.parents(), &[SkillId::Mining, SkillId::Fishing]);
        assert!(!SkillId::Swords.is_child());

        let primary = SkillId::non_child();
        assert_eq!(primary.len(), 13);
        assert!(!primary.contains(&SkillId::Salvage));
        assert!(!primary.contains(&SkillId::Smelting));
    }

    #[test]
    fn test_skill_descriptions() {
        assert_eq!(SkillId::Archery.description(), "Precision with bows");
        assert_eq!(SkillId::Salvage.description(), "Breaking items down into materials");
        assert!(SkillId::all().iter().all(|id| !id.description().is_empty()));
    }

    #[test]
    fn test_parse_skill() {
        assert_eq!("swords".parse::<SkillId>(), Ok(SkillId::Swords));
        assert_eq!(SkillId::from_name(" WOODCUTTING "), Some(SkillId::Woodcutting));
        assert!("Necromancy".parse::<SkillId>().is_err());
        assert_eq!(SkillId::Taming.to_string(), "Taming");
    }

    #[test]
    fn test_configured_registry_defaults_to_disabled() {
        let mut stat_loss = HashMap::new();
        stat_loss.insert(SkillId::Mining, true);
        stat_loss.insert(SkillId::Axes, false);
        let registry = ConfiguredSkillRegistry::new(stat_loss, HashMap::new());

        assert!(registry.stat_loss_enabled(SkillId::Mining));
        assert!(!registry.stat_loss_enabled(SkillId::Axes));
        assert!(!registry.stat_loss_enabled(SkillId::Swords));
        assert!(!registry.vampirism_enabled(SkillId::Mining));
    }

    #[test]
    fn test_configured_registry_ignores_child_skills() {
        let mut table = HashMap::new();
        table.insert(SkillId::Salvage, true);
        let registry = ConfiguredSkillRegistry::new(table.clone(), table);

        assert!(!registry.stat_loss_enabled(SkillId::Salvage));
        assert!(!registry.vampirism_enabled(SkillId::Salvage));
    }

    #[test]
    fn test_all_enabled() {
        let registry = ConfiguredSkillRegistry::all_enabled();
        assert!(
            registry
                .non_child_skills()
                .iter()
                .all(|id| registry.stat_loss_enabled(*id) && registry.vampirism_enabled(*id))
        );
    }
}
