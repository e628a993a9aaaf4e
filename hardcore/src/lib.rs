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

//! Wyldlands Hardcore Mode
//!
//! Skill penalties for hardcore worlds:
//! - Death stat loss: a dying player loses a share of each enabled skill
//! - Vampirism: a killer leeches a share of the victim's enabled skills
//!
//! [`HardcoreManager`] computes the per-skill changes and reports them. Skill
//! storage, region flags, event vetoes and message delivery are supplied by
//! the host through the traits re-exported below.

pub mod config;
pub mod delta;
pub mod events;
pub mod manager;
pub mod notify;
pub mod profile;
pub mod region;
pub mod skill;

pub use config::{ConfigError, HardcoreConfig, Thresholds};
pub use delta::{SkillDelta, SkillDeltas};
pub use events::{EventGate, HardcoreEvent, HardcoreEventBus};
pub use manager::{DeathOutcome, HardcoreManager, HardcoreOutcome};
pub use notify::{HardcoreMessage, NotificationQueue, Notifier, TracingNotifier};
pub use profile::{InMemorySkillStore, Player, PlayerSkillStore, SkillLevelState, SkillProfile};
pub use region::{FlaggedPlayers, RegionGate};
pub use skill::{ConfiguredSkillRegistry, SkillId, SkillRegistry};
