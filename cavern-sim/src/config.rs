//! Simulation configuration, optionally loaded from a JSON file.

use std::path::Path;

use cavern_agent::{ExploreConfig, FleeConfig};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Everything a run needs: cave shape, gold, budget and agent settings.
///
/// Missing JSON fields fall back to [`SimConfig::default`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Grid width in cells.
    pub width: i32,
    /// Grid height in cells.
    pub height: i32,
    /// Fraction of the grid to carve out in (0, 1].
    pub fill: f64,
    /// Number of random walks from the centre.
    pub walks: usize,
    /// RNG seed; a random one is drawn (and logged) when absent.
    pub seed: Option<u64>,
    /// Edge lengths are drawn from `1..=max_edge_length`.
    pub max_edge_length: u32,
    /// Probability that a tile carries gold.
    pub gold_chance: f64,
    /// Gold piles are drawn from `1..=max_gold`.
    pub max_gold: u32,
    /// Flee budget as a multiple of the shortest way out.
    pub budget_factor: f64,
    pub explore: ExploreConfig,
    pub flee: FleeConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 20,
            fill: 0.45,
            walks: 8,
            seed: None,
            max_edge_length: 5,
            gold_chance: 0.15,
            max_gold: 100,
            budget_factor: 2.0,
            explore: ExploreConfig::default(),
            flee: FleeConfig::default(),
        }
    }
}

impl SimConfig {
    /// Load and validate a config from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the generator cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.width < 2 || self.height < 2 {
            return Err(SimError::Config(format!(
                "grid must be at least 2x2, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.fill > 0.0 && self.fill <= 1.0) {
            return Err(SimError::Config(format!("fill {} not in (0, 1]", self.fill)));
        }
        if !(0.0..=1.0).contains(&self.gold_chance) {
            return Err(SimError::Config(format!(
                "gold_chance {} not in [0, 1]",
                self.gold_chance
            )));
        }
        if self.max_edge_length == 0 || self.max_gold == 0 {
            return Err(SimError::Config(
                "max_edge_length and max_gold must be positive".into(),
            ));
        }
        if !(self.budget_factor >= 1.0) {
            return Err(SimError::Config(format!(
                "budget_factor {} is below 1",
                self.budget_factor
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cavern_agent::{FleePlan, SearchOrder};
    use std::io::Write;

    #[test]
    fn default_is_valid() {
        SimConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: SimConfig =
            serde_json::from_str(r#"{"seed": 7, "flee": {"plan": "direct"}}"#).unwrap();
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.flee.plan, FleePlan::Direct);
        assert_eq!(cfg.explore.order, SearchOrder::Heuristic);
        assert_eq!(cfg.width, SimConfig::default().width);
    }

    #[test]
    fn rejects_bad_values() {
        let bad = [
            SimConfig {
                width: 1,
                ..SimConfig::default()
            },
            SimConfig {
                fill: 0.0,
                ..SimConfig::default()
            },
            SimConfig {
                gold_chance: 1.5,
                ..SimConfig::default()
            },
            SimConfig {
                max_edge_length: 0,
                ..SimConfig::default()
            },
            SimConfig {
                budget_factor: 0.5,
                ..SimConfig::default()
            },
        ];
        for cfg in bad {
            assert!(matches!(cfg.validate(), Err(SimError::Config(_))), "{cfg:?}");
        }
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"width": 12, "height": 9, "seed": 3}}"#).unwrap();
        let cfg = SimConfig::load(file.path()).unwrap();
        assert_eq!((cfg.width, cfg.height, cfg.seed), (12, 9, Some(3)));
    }

    #[test]
    fn load_rejects_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            SimConfig::load(file.path()),
            Err(SimError::Json(_))
        ));
        assert!(matches!(
            SimConfig::load(Path::new("/nonexistent/cavern.json")),
            Err(SimError::Io(_))
        ));
    }
}
