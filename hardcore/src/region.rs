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

//! Region flag seam

use crate::profile::Player;
use std::collections::HashSet;
use std::sync::RwLock;
use uuid::Uuid;

/// Answers whether hardcore rules apply to a player where they stand
#[cfg_attr(test, mockall::automock)]
pub trait RegionGate: Send + Sync {
    fn hardcore_applies(&self, player: &Player) -> bool;
}

impl<F> RegionGate for F
where
    F: Fn(&Player) -> bool + Send + Sync,
{
    fn hardcore_applies(&self, player: &Player) -> bool {
        self(player)
    }
}

/// Region gate fed by the host as players cross flagged area boundaries
#[derive(Debug, Default)]
pub struct FlaggedPlayers {
    inside: RwLock<HashSet<Uuid>>,
}

impl FlaggedPlayers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the player entered an area with the hardcore flag
    pub fn enter(&self, player: &Player) {
        let mut inside = self.inside.write().unwrap_or_else(|e| e.into_inner());
        inside.insert(player.id);
    }

    /// Record that the player left every hardcore flagged area
    pub fn leave(&self, player: &Player) {
        let mut inside = self.inside.write().unwrap_or_else(|e| e.into_inner());
        inside.remove(&player.id);
    }
}

impl RegionGate for FlaggedPlayers {
    fn hardcore_applies(&self, player: &Player) -> bool {
        let inside = self.inside.read().unwrap_or_else(|e| e.into_inner());
        inside.contains(&player.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_gate() {
        let alice = Player::new("Alice");
        let bob = Player::new("Bob");
        let alice_id = alice.id;
        let gate = move |p: &Player| p.id == alice_id;

        assert!(gate.hardcore_applies(&alice));
        assert!(!gate.hardcore_applies(&bob));
    }

    #[test]
    fn test_flagged_players() {
        let gate = FlaggedPlayers::new();
        let alice = Player::new("Alice");

        assert!(!gate.hardcore_applies(&alice));
        gate.enter(&alice);
        assert!(gate.hardcore_applies(&alice));
        gate.leave(&alice);
        assert!(!gate.hardcore_applies(&alice));
    }
}
