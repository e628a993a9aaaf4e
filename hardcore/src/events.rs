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

//! Hardcore events and the veto seam
//!
//! The [`EventGate`] is consulted after deltas are computed and before
//! anything is applied or announced. [`HardcoreEventBus`] is the bundled gate:
//! it lets listeners edit or cancel the change, then applies the surviving
//! deltas to an [`InMemorySkillStore`].

use crate::delta::SkillDeltas;
use crate::profile::{InMemorySkillStore, Player};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

/// Lets the host veto a computed penalty
///
/// Both methods return `true` when the change should proceed.
#[cfg_attr(test, mockall::automock)]
pub trait EventGate: Send + Sync {
    fn stat_loss(&self, player: &Player, deltas: &SkillDeltas) -> bool;

    fn vampirism(&self, killer: &Player, victim: &Player, deltas: &SkillDeltas) -> bool;
}

/// Hardcore events offered to listeners before deltas are applied
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum HardcoreEvent {
    StatLoss {
        player: Player,
        deltas: SkillDeltas,
        cancelled: bool,
    },
    Vampirism {
        killer: Player,
        victim: Player,
        killer_deltas: SkillDeltas,
        victim_deltas: SkillDeltas,
        cancelled: bool,
    },
}

impl HardcoreEvent {
    /// Stop the change from being applied
    pub fn cancel(&mut self) {
        match self {
            HardcoreEvent::StatLoss { cancelled, .. } => *cancelled = true,
            HardcoreEvent::Vampirism { cancelled, .. } => *cancelled = true,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        match self {
            HardcoreEvent::StatLoss { cancelled, .. } => *cancelled,
            HardcoreEvent::Vampirism { cancelled, .. } => *cancelled,
        }
    }
}

pub type EventHandler = Box<dyn Fn(&mut HardcoreEvent) + Send + Sync>;

/// Event gate that dispatches to listeners and applies the outcome
pub struct HardcoreEventBus {
    handlers: Arc<RwLock<Vec<EventHandler>>>,
    store: Arc<InMemorySkillStore>,
}

impl HardcoreEventBus {
    /// Create a bus applying changes to the given store
    pub fn new(store: Arc<InMemorySkillStore>) -> Self {
        Self {
            handlers: Arc::new(RwLock::new(Vec::new())),
            store,
        }
    }

    /// Subscribe a listener. Listeners run in subscription order.
    pub fn subscribe<F>(&self, handler: F)
    where
        F: Fn(&mut HardcoreEvent) + Send + Sync + 'static,
    {
        let mut handlers = self.handlers.write().unwrap_or_else(|e| e.into_inner());
        handlers.push(Box::new(handler));
    }

    /// Get the number of listeners
    pub fn handler_count(&self) -> usize {
        let handlers = self.handlers.read().unwrap_or_else(|e| e.into_inner());
        handlers.len()
    }

    fn dispatch(&self, event: &mut HardcoreEvent) {
        let handlers = self.handlers.read().unwrap_or_else(|e| e.into_inner());
        for handler in handlers.iter() {
            handler(event);
        }
    }
}

impl Clone for HardcoreEventBus {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
            store: Arc::clone(&self.store),
        }
    }
}

impl EventGate for HardcoreEventBus {
    fn stat_loss(&self, player: &Player, deltas: &SkillDeltas) -> bool {
        let mut event = HardcoreEvent::StatLoss {
            player: player.clone(),
            deltas: deltas.clone(),
            cancelled: false,
        };
        self.dispatch(&mut event);

        match event {
            HardcoreEvent::StatLoss {
                cancelled: true, ..
            } => {
                tracing::debug!(player = %player.name, "Stat loss cancelled by listener");
                false
            }
            HardcoreEvent::StatLoss { deltas, .. } => {
                self.store.update(player, |profile| profile.lose_all(&deltas));
                true
            }
            HardcoreEvent::Vampirism { .. } => false,
        }
    }

    fn vampirism(&self, killer: &Player, victim: &Player, deltas: &SkillDeltas) -> bool {
        let mut event = HardcoreEvent::Vampirism {
            killer: killer.clone(),
            victim: victim.clone(),
            killer_deltas: deltas.clone(),
            victim_deltas: deltas.clone(),
            cancelled: false,
        };
        self.dispatch(&mut event);

        match event {
            HardcoreEvent::Vampirism {
                cancelled: true, ..
            } => {
                tracing::debug!(
                    killer = %killer.name,
                    victim = %victim.name,
                    "Vampirism cancelled by listener"
                );
                false
            }
            HardcoreEvent::Vampirism {
                killer_deltas,
                victim_deltas,
                ..
            } => {
                self.store
                    .update(killer, |profile| profile.gain_all(&killer_deltas));
                self.store
                    .update(victim, |profile| profile.lose_all(&victim_deltas));
                true
            }
            HardcoreEvent::StatLoss { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delta::SkillDelta;
    use crate::profile::{PlayerSkillStore, SkillProfile};
    use crate::skill::SkillId;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn deltas(pairs: &[(SkillId, i32, f32)]) -> SkillDeltas {
        pairs
            .iter()
            .map(|(id, levels, xp)| (*id, SkillDelta::new(*levels, *xp)))
            .collect()
    }

    #[test]
    fn test_stat_loss_applies_and_clamps() {
        let store = Arc::new(InMemorySkillStore::new());
        let alice = Player::new("Alice");
        store.insert(
            &alice,
            SkillProfile::new()
                .with_skill(SkillId::Mining, 10, 5)
                .with_skill(SkillId::Swords, 2, 0),
        );
        let bus = HardcoreEventBus::new(store.clone());

        let proceed = bus.stat_loss(
            &alice,
            &deltas(&[(SkillId::Mining, 3, 8.0), (SkillId::Swords, 1, 0.0)]),
        );

        assert!(proceed);
        assert_eq!(store.level(&alice, SkillId::Mining), 7);
        assert_eq!(store.xp(&alice, SkillId::Mining), 0);
        assert_eq!(store.level(&alice, SkillId::Swords), 1);
    }

    #[test]
    fn test_cancelled_stat_loss_leaves_profile() {
        let store = Arc::new(InMemorySkillStore::new());
        let alice = Player::new("Alice");
        store.insert(&alice, SkillProfile::new().with_skill(SkillId::Mining, 10, 5));
        let bus = HardcoreEventBus::new(store.clone());
        bus.subscribe(|event| event.cancel());

        assert!(!bus.stat_loss(&alice, &deltas(&[(SkillId::Mining, 3, 0.0)])));
        assert_eq!(store.level(&alice, SkillId::Mining), 10);
    }

    #[test]
    fn test_listener_can_edit_deltas() {
        let store = Arc::new(InMemorySkillStore::new());
        let alice = Player::new("Alice");
        store.insert(&alice, SkillProfile::new().with_skill(SkillId::Axes, 10, 0));
        let bus = HardcoreEventBus::new(store.clone());
        bus.subscribe(|event| {
            if let HardcoreEvent::StatLoss { deltas, .. } = event {
                if let Some(delta) = deltas.get_mut(SkillId::Axes) {
                    delta.levels = 1;
                }
            }
        });

        assert!(bus.stat_loss(&alice, &deltas(&[(SkillId::Axes, 5, 0.0)])));
        assert_eq!(store.level(&alice, SkillId::Axes), 9);
    }

    #[test]
    fn test_vampirism_transfers() {
        let store = Arc::new(InMemorySkillStore::new());
        let alice = Player::new("Alice");
        let bob = Player::new("Bob");
        store.insert(&alice, SkillProfile::new().with_skill(SkillId::Swords, 20, 0));
        store.insert(&bob, SkillProfile::new().with_skill(SkillId::Swords, 15, 99));
        let bus = HardcoreEventBus::new(store.clone());

        assert!(bus.vampirism(&alice, &bob, &deltas(&[(SkillId::Swords, 4, 49.0)])));

        assert_eq!(store.level(&alice, SkillId::Swords), 24);
        assert_eq!(store.xp(&alice, SkillId::Swords), 49);
        assert_eq!(store.level(&bob, SkillId::Swords), 11);
        assert_eq!(store.xp(&bob, SkillId::Swords), 50);
    }

    #[test]
    fn test_every_listener_runs() {
        let store = Arc::new(InMemorySkillStore::new());
        let alice = Player::new("Alice");
        let bob = Player::new("Bob");
        let bus = HardcoreEventBus::new(store);
        let counter = Arc::new(AtomicUsize::new(0));

        let c1 = Arc::clone(&counter);
        bus.subscribe(move |_| {
            c1.fetch_add(1, Ordering::SeqCst);
        });
        let c2 = Arc::clone(&counter);
        bus.clone().subscribe(move |_| {
            c2.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(bus.handler_count(), 2);
        bus.vampirism(&alice, &bob, &SkillDeltas::new());
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_event_serialization() {
        let event = HardcoreEvent::StatLoss {
            player: Player::new("Alice"),
            deltas: deltas(&[(SkillId::Taming, 2, 3.0)]),
            cancelled: false,
        };

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: HardcoreEvent = serde_json::from_str(&json).unwrap();

        match deserialized {
            HardcoreEvent::StatLoss { player, deltas, .. } => {
                assert_eq!(player.name, "Alice");
                assert_eq!(deltas.get(SkillId::Taming), SkillDelta::new(2, 3.0));
            }
            _ => panic!("Wrong event type"),
        }
    }
}
