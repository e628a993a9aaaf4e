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

//! Player facing results of hardcore penalties
//!
//! Messages carry a localization key and positional arguments. Rendering the
//! text is left to whoever implements [`Notifier`].

use crate::profile::Player;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Result message sent to a player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HardcoreMessage {
    /// Sent to a player who lost levels on death
    DeathStatLoss { levels_lost: i32 },
    /// Sent to a killer who leeched levels
    KillerSuccess { levels_stolen: i32, victim: String },
    /// Sent to a victim who had levels leeched
    VictimSuccess { killer: String, levels_stolen: i32 },
    /// Sent to a killer when nothing could be leeched
    KillerFailure { victim: String },
    /// Sent to a victim when nothing was leeched
    VictimFailure { killer: String },
}

impl HardcoreMessage {
    /// Localization key
    pub fn key(&self) -> &'static str {
        match self {
            HardcoreMessage::DeathStatLoss { .. } => "Hardcore.DeathStatLoss.PlayerDeath",
            HardcoreMessage::KillerSuccess { .. } => "Hardcore.Vampirism.Killer.Success",
            HardcoreMessage::VictimSuccess { .. } => "Hardcore.Vampirism.Victim.Success",
            HardcoreMessage::KillerFailure { .. } => "Hardcore.Vampirism.Killer.Failure",
            HardcoreMessage::VictimFailure { .. } => "Hardcore.Vampirism.Victim.Failure",
        }
    }

    /// Positional arguments for the localized template
    pub fn args(&self) -> Vec<String> {
        match self {
            HardcoreMessage::DeathStatLoss { levels_lost } => vec![levels_lost.to_string()],
            HardcoreMessage::KillerSuccess {
                levels_stolen,
                victim,
            } => vec![levels_stolen.to_string(), victim.clone()],
            HardcoreMessage::VictimSuccess {
                killer,
                levels_stolen,
            } => vec![killer.clone(), levels_stolen.to_string()],
            HardcoreMessage::KillerFailure { victim } => vec![victim.clone()],
            HardcoreMessage::VictimFailure { killer } => vec![killer.clone()],
        }
    }
}

/// Delivers hardcore messages to players
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn inform(&self, player: &Player, message: &HardcoreMessage);
}

/// Notifier that only writes messages to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn inform(&self, player: &Player, message: &HardcoreMessage) {
        tracing::info!(
            player = %player.name,
            key = message.key(),
            args = ?message.args(),
            "Hardcore notification"
        );
    }
}

/// Notifier that queues messages for delivery on the next server tick
#[derive(Debug, Default)]
pub struct NotificationQueue {
    queue: Mutex<Vec<(Player, HardcoreMessage)>>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every queued message in the order it was sent
    pub fn drain(&self) -> Vec<(Player, HardcoreMessage)> {
        let mut queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
        queue.drain(..).collect()
    }

    /// Get the number of queued messages
    pub fn len(&self) -> usize {
        let queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
        queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for NotificationQueue {
    fn inform(&self, player: &Player, message: &HardcoreMessage) {
        let mut queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
        queue.push((player.clone(), message.clone()));
    }
}
