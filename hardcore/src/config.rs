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

use crate::skill::SkillId;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use serde_env_field::EnvField;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Arguments {
    #[arg(
        short = 'c',
        long = "config",
        help = "Path to configuration file",
        default_value = "hardcore/config.yaml"
    )]
    pub config_file: String,

    #[arg(
        short = 'e',
        long = "env",
        help = "Path to environment file, defaults to .env in the working directory"
    )]
    pub env_file: Option<String>,

    #[arg(long = "json", help = "Print resulting profiles as JSON instead of YAML")]
    pub json: bool,

    #[command(subcommand)]
    pub command: PreviewCommand,
}

#[derive(Debug, Subcommand)]
pub enum PreviewCommand {
    /// Apply the death stat penalty to one player
    Death {
        #[arg(short = 'p', long = "player", help = "Player profile file")]
        player: String,
    },
    /// Resolve a player-vs-player kill
    Kill {
        #[arg(short = 'k', long = "killer", help = "Killer profile file")]
        killer: String,
        #[arg(short = 'v', long = "victim", help = "Victim profile file")]
        victim: String,
    },
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to open config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid hardcore configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HardcoreConfig {
    pub death_stat_loss: StatLossConfig,
    pub vampirism: VampirismConfig,
}

impl HardcoreConfig {
    /// Read, parse and validate a configuration file
    pub fn load(path: &str) -> Result<HardcoreConfig, ConfigError> {
        let conf: HardcoreConfig = serde_yaml::from_reader(std::fs::File::open(path)?)?;
        conf.validate()?;
        Ok(conf)
    }

    /// Check ranges, collecting every problem
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut reasons = Vec::new();

        let penalty = self.death_stat_loss.penalty_percentage();
        if !(0.0..=100.0).contains(&penalty) {
            reasons.push(format!(
                "death_stat_loss.penalty_percentage must be between 0 and 100, got {}",
                penalty
            ));
        }
        if self.death_stat_loss.level_threshold() < 0 {
            reasons.push(format!(
                "death_stat_loss.level_threshold must be at least 0, got {}",
                self.death_stat_loss.level_threshold()
            ));
        }

        let leech = self.vampirism.leech_percentage();
        if !(0.0..=100.0).contains(&leech) {
            reasons.push(format!(
                "vampirism.leech_percentage must be between 0 and 100, got {}",
                leech
            ));
        }
        if self.vampirism.level_threshold() < 0 {
            reasons.push(format!(
                "vampirism.level_threshold must be at least 0, got {}",
                self.vampirism.level_threshold()
            ));
        }

        for skill in self
            .death_stat_loss
            .enabled
            .keys()
            .chain(self.vampirism.enabled.keys())
        {
            if skill.is_child() {
                tracing::warn!("Hardcore switch for child skill {} is ignored", skill);
            }
        }

        if reasons.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(reasons))
        }
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            stat_loss_percentage: self.death_stat_loss.penalty_percentage(),
            stat_loss_level_threshold: self.death_stat_loss.level_threshold(),
            vampirism_leech_percentage: self.vampirism.leech_percentage(),
            vampirism_level_threshold: self.vampirism.level_threshold(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct StatLossConfig {
    /// Percentage of levels above the threshold lost on death
    pub penalty_percentage: EnvField<f64>,
    /// Levels at or below this are never lost
    pub level_threshold: EnvField<i32>,
    pub enabled: HashMap<SkillId, bool>,
}

impl StatLossConfig {
    pub fn penalty_percentage(&self) -> f64 {
        *self.penalty_percentage
    }

    pub fn level_threshold(&self) -> i32 {
        *self.level_threshold
    }
}

impl Default for StatLossConfig {
    fn default() -> Self {
        Self {
            penalty_percentage: EnvField::from(75.0),
            level_threshold: EnvField::from(0),
            enabled: HashMap::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct VampirismConfig {
    /// Percentage of the victim's level leeched by the killer
    pub leech_percentage: EnvField<f64>,
    /// Victims at or below this level cannot be leeched
    pub level_threshold: EnvField<i32>,
    pub enabled: HashMap<SkillId, bool>,
}

impl VampirismConfig {
    pub fn leech_percentage(&self) -> f64 {
        *self.leech_percentage
    }

    pub fn level_threshold(&self) -> i32 {
        *self.level_threshold
    }
}

impl Default for VampirismConfig {
    fn default() -> Self {
        Self {
            leech_percentage: EnvField::from(5.0),
            level_threshold: EnvField::from(0),
            enabled: HashMap::new(),
        }
    }
}

/// Numeric inputs of the penalty formulas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub stat_loss_percentage: f64,
    pub stat_loss_level_threshold: i32,
    pub vampirism_leech_percentage: f64,
    pub vampirism_level_threshold: i32,
}

impl Default for Thresholds {
    fn default() -> Self {
        HardcoreConfig::default().thresholds()
    }
}
