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

//! Hardcore death penalty and vampirism
//!
//! The manager computes deltas and reports them. It never writes to a
//! profile itself: applying the change is the job of the [`EventGate`] once it
//! lets the change proceed.

use crate::config::Thresholds;
use crate::delta::{self, SkillDelta, SkillDeltas};
use crate::events::EventGate;
use crate::notify::{HardcoreMessage, Notifier};
use crate::profile::{Player, PlayerSkillStore};
use crate::region::RegionGate;
use crate::skill::SkillRegistry;
use serde::Serialize;
use std::sync::Arc;

/// What a hardcore operation ended up doing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HardcoreOutcome {
    /// Hardcore rules do not apply where a participant stands
    RegionExempt,
    /// A participant has no loaded skill profile
    NoProfile,
    /// The event gate cancelled the change
    Vetoed,
    /// The change went through and participants were notified
    Applied { deltas: SkillDeltas, total_levels: i32 },
}

impl HardcoreOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, HardcoreOutcome::Applied { .. })
    }

    /// Total levels moved, 0 unless applied
    pub fn total_levels(&self) -> i32 {
        match self {
            HardcoreOutcome::Applied { total_levels, .. } => *total_levels,
            _ => 0,
        }
    }
}

/// Outcomes of resolving a single player death
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeathOutcome {
    pub vampirism: Option<HardcoreOutcome>,
    pub stat_loss: Option<HardcoreOutcome>,
}

/// Computes and reports hardcore penalties
#[derive(Clone)]
pub struct HardcoreManager {
    registry: Arc<dyn SkillRegistry>,
    store: Arc<dyn PlayerSkillStore>,
    region: Option<Arc<dyn RegionGate>>,
    events: Arc<dyn EventGate>,
    notifier: Arc<dyn Notifier>,
    thresholds: Thresholds,
}

impl HardcoreManager {
    /// Create a manager with no region gate, so hardcore applies everywhere
    pub fn new(
        registry: Arc<dyn SkillRegistry>,
        store: Arc<dyn PlayerSkillStore>,
        events: Arc<dyn EventGate>,
        notifier: Arc<dyn Notifier>,
        thresholds: Thresholds,
    ) -> Self {
        Self {
            registry,
            store,
            region: None,
            events,
            notifier,
            thresholds,
        }
    }

    /// Restrict hardcore rules to players the gate accepts
    pub fn with_region_gate(mut self, region: Arc<dyn RegionGate>) -> Self {
        self.region = Some(region);
        self
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Check if death stat loss is enabled for one or more skills
    pub fn is_stat_loss_enabled(&self) -> bool {
        self.registry
            .non_child_skills()
            .into_iter()
            .any(|skill| self.registry.stat_loss_enabled(skill))
    }

    /// Check if vampirism is enabled for one or more skills
    pub fn is_vampirism_enabled(&self) -> bool {
        self.registry
            .non_child_skills()
            .into_iter()
            .any(|skill| self.registry.vampirism_enabled(skill))
    }

    fn hardcore_applies(&self, player: &Player) -> bool {
        self.region
            .as_ref()
            .map(|region| region.hardcore_applies(player))
            .unwrap_or(true)
    }

    /// Take a share of the player's skill levels after they die
    #[tracing::instrument(skip_all, fields(player = %player.name))]
    pub fn apply_death_penalty(&self, player: &Player) -> HardcoreOutcome {
        if !self.hardcore_applies(player) {
            tracing::debug!("Hardcore does not apply here");
            return HardcoreOutcome::RegionExempt;
        }
        if !self.store.has_profile(player) {
            tracing::debug!("No skill profile loaded");
            return HardcoreOutcome::NoProfile;
        }

        let percentage = self.thresholds.stat_loss_percentage;
        let threshold = self.thresholds.stat_loss_level_threshold;
        let mut deltas = SkillDeltas::new();

        for skill in self.registry.non_child_skills() {
            if !self.registry.stat_loss_enabled(skill) {
                deltas.insert(skill, SkillDelta::ZERO);
                continue;
            }

            let level = self.store.level(player, skill);
            let xp = self.store.xp(player, skill);
            let lost = delta::stat_loss(level, xp, threshold, percentage);
            tracing::debug!(%skill, level, xp, levels = lost.levels, xp_lost = lost.xp, "Stat loss");
            deltas.insert(skill, lost);
        }

        if !self.events.stat_loss(player, &deltas) {
            tracing::debug!("Stat loss vetoed");
            return HardcoreOutcome::Vetoed;
        }

        let total_levels = deltas.total_levels();
        tracing::info!(total_levels, "Death stat loss applied");
        self.notifier.inform(
            player,
            &HardcoreMessage::DeathStatLoss {
                levels_lost: total_levels,
            },
        );

        HardcoreOutcome::Applied {
            deltas,
            total_levels,
        }
    }

    /// Move a share of the victim's skill levels to the killer
    #[tracing::instrument(skip_all, fields(killer = %killer.name, victim = %victim.name))]
    pub fn apply_vampirism(&self, killer: &Player, victim: &Player) -> HardcoreOutcome {
        if !self.hardcore_applies(killer) || !self.hardcore_applies(victim) {
            tracing::debug!("Hardcore does not apply here");
            return HardcoreOutcome::RegionExempt;
        }
        if !self.store.has_profile(killer) || !self.store.has_profile(victim) {
            tracing::debug!("No skill profile loaded");
            return HardcoreOutcome::NoProfile;
        }

        let percentage = self.thresholds.vampirism_leech_percentage;
        let threshold = self.thresholds.vampirism_level_threshold;
        let mut deltas = SkillDeltas::new();

        for skill in self.registry.non_child_skills() {
            if !self.registry.vampirism_enabled(skill) {
                deltas.insert(skill, SkillDelta::ZERO);
                continue;
            }

            let killer_level = self.store.level(killer, skill);
            let victim_level = self.store.level(victim, skill);
            let victim_xp = self.store.xp(victim, skill);
            let stolen =
                delta::vampirism(killer_level, victim_level, victim_xp, threshold, percentage);
            tracing::debug!(
                %skill,
                killer_level,
                victim_level,
                levels = stolen.levels,
                xp = stolen.xp,
                "Vampirism"
            );
            deltas.insert(skill, stolen);
        }

        if !self.events.vampirism(killer, victim, &deltas) {
            tracing::debug!("Vampirism vetoed");
            return HardcoreOutcome::Vetoed;
        }

        let total_levels = deltas.total_levels();
        if total_levels > 0 {
            tracing::info!(total_levels, "Vampirism applied");
            self.notifier.inform(
                killer,
                &HardcoreMessage::KillerSuccess {
                    levels_stolen: total_levels,
                    victim: victim.name.clone(),
                },
            );
            self.notifier.inform(
                victim,
                &HardcoreMessage::VictimSuccess {
                    killer: killer.name.clone(),
                    levels_stolen: total_levels,
                },
            );
        } else {
            tracing::debug!("Nothing to leech");
            self.notifier.inform(
                killer,
                &HardcoreMessage::KillerFailure {
                    victim: victim.name.clone(),
                },
            );
            self.notifier.inform(
                victim,
                &HardcoreMessage::VictimFailure {
                    killer: killer.name.clone(),
                },
            );
        }

        HardcoreOutcome::Applied {
            deltas,
            total_levels,
        }
    }

    /// Resolve every hardcore rule for a player death
    ///
    /// Vampirism runs before the victim's own stat loss.
    #[tracing::instrument(skip_all, fields(victim = %victim.name))]
    pub fn handle_death(&self, victim: &Player, killer: Option<&Player>) -> DeathOutcome {
        let stat_loss_enabled = self.is_stat_loss_enabled();
        let vampirism_enabled = self.is_vampirism_enabled();
        let mut outcome = DeathOutcome::default();

        if let Some(killer) = killer.filter(|_| vampirism_enabled) {
            outcome.vampirism = Some(self.apply_vampirism(killer, victim));
        }
        if stat_loss_enabled {
            outcome.stat_loss = Some(self.apply_death_penalty(victim));
        }

        outcome
    }
}
