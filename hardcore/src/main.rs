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

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;
use wyldlands_hardcore::config::{Arguments, HardcoreConfig, PreviewCommand};
use wyldlands_hardcore::{
    ConfiguredSkillRegistry, DeathOutcome, HardcoreEventBus, HardcoreManager, InMemorySkillStore,
    Player, SkillProfile, SkillRegistry, TracingNotifier,
};

/// Player profile file as read from disk
#[derive(Debug, Serialize, Deserialize)]
struct PlayerFile {
    #[serde(default = "Uuid::new_v4")]
    id: Uuid,
    name: String,
    #[serde(flatten)]
    profile: SkillProfile,
}

#[derive(Debug, Serialize)]
struct PreviewReport {
    outcome: DeathOutcome,
    players: Vec<PlayerFile>,
}

fn load_player(
    store: &InMemorySkillStore,
    path: &str,
) -> Result<Player, Box<dyn std::error::Error>> {
    let file: PlayerFile = serde_yaml::from_reader(
        std::fs::File::open(path).map_err(|e| format!("Failed to open {}: {}", path, e))?,
    )
    .map_err(|e| format!("Failed to parse {}: {}", path, e))?;

    let player = Player::with_id(file.id, &file.name);
    tracing::debug!("Loaded profile for {} from {}", player.name, path);
    store.insert(&player, file.profile);
    Ok(player)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load arguments from the command line
    let arguments: Arguments = Parser::parse();

    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_level(true)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables from .env file if specified
    if let Some(ref env_file) = arguments.env_file {
        if std::path::Path::new(env_file).exists() {
            tracing::debug!("Loading environment variables from file: {}", env_file);
            dotenv::from_filename(env_file).ok();
        }
    } else {
        tracing::debug!("Loading environment variables from default file");
        dotenv::dotenv().ok();
    }

    let config = HardcoreConfig::load(&arguments.config_file)?;
    tracing::debug!("Configuration loaded: {:?}", config);

    let registry = ConfiguredSkillRegistry::from_config(&config);
    for skill in registry.non_child_skills() {
        tracing::debug!(
            %skill,
            description = skill.description(),
            stat_loss = registry.stat_loss_enabled(skill),
            vampirism = registry.vampirism_enabled(skill),
            "Skill rules"
        );
    }

    let store = Arc::new(InMemorySkillStore::new());
    let events = Arc::new(HardcoreEventBus::new(store.clone()));
    let manager = HardcoreManager::new(
        Arc::new(registry),
        store.clone(),
        events,
        Arc::new(TracingNotifier),
        config.thresholds(),
    );

    let (outcome, participants) = match &arguments.command {
        PreviewCommand::Death { player } => {
            let player = load_player(&store, player)?;
            (manager.handle_death(&player, None), vec![player])
        }
        PreviewCommand::Kill { killer, victim } => {
            let killer = load_player(&store, killer)?;
            let victim = load_player(&store, victim)?;
            (
                manager.handle_death(&victim, Some(&killer)),
                vec![killer, victim],
            )
        }
    };

    let players = participants
        .into_iter()
        .filter_map(|player| {
            store.profile(&player).map(|profile| PlayerFile {
                id: player.id,
                name: player.name,
                profile,
            })
        })
        .collect();
    let report = PreviewReport { outcome, players };

    if arguments.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", serde_yaml::to_string(&report)?);
    }

    Ok(())
}
