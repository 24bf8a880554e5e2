//! Game and AI configuration

use crate::board::STANDARD_RADIUS;
use crate::pieces::Color;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// AI configuration for computer seats
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Score a greedy move must beat (None = `(radius - 1)^4`)
    pub improvement_threshold: Option<f64>,
    /// Seed for random seats (None = 42)
    pub seed: Option<u64>,
}

impl AiConfig {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.improvement_threshold = Some(threshold);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Game setup
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board radius (center hexagon side + 1)
    pub radius: i32,
    /// Seat colors; the length is the player count (2, 4 or 6)
    pub players: Vec<Color>,
    /// Seats `0..human_players` are human, the rest are computers
    pub human_players: usize,
    /// Turn cap for computer-only runs
    pub max_turns: u32,
    pub ai: AiConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            radius: STANDARD_RADIUS,
            players: Color::ALL.to_vec(),
            human_players: 1,
            max_turns: 1000,
            ai: AiConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn with_radius(mut self, radius: i32) -> Self {
        self.radius = radius;
        self
    }

    /// Seat the first `count` colors of the palette
    pub fn with_player_count(mut self, count: usize) -> Self {
        self.players = Color::palette(count);
        self
    }

    pub fn with_human_players(mut self, human_players: usize) -> Self {
        self.human_players = human_players;
        self
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// No human seats
    pub fn all_computers(self) -> Self {
        self.with_human_players(0)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.radius, 5);
        assert_eq!(config.player_count(), 6);
        assert_eq!(config.human_players, 1);
        assert_eq!(config.ai, AiConfig::default());
    }

    #[test]
    fn test_builders() {
        let config = GameConfig::default()
            .with_radius(4)
            .with_player_count(2)
            .all_computers()
            .with_max_turns(10);
        assert_eq!(config.radius, 4);
        assert_eq!(config.players, vec![Color::Red, Color::Blue]);
        assert_eq!(config.human_players, 0);
        assert_eq!(config.max_turns, 10);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{"radius": 3, "players": ["Green", "Pink"]}"#).unwrap();
        assert_eq!(config.radius, 3);
        assert_eq!(config.players, vec![Color::Green, Color::Pink]);
        assert_eq!(config.max_turns, 1000);
        assert_eq!(config.ai.seed, None);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!(
            "sternhalma-config-{}.json",
            std::process::id()
        ));
        let config = GameConfig::default()
            .with_player_count(4)
            .with_human_players(0);
        let config = GameConfig {
            ai: AiConfig::default().with_seed(9).with_threshold(12.5),
            ..config
        };

        config.save(&path).unwrap();
        let loaded = GameConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = GameConfig::load(Path::new("/nonexistent/sternhalma.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
