//! Configuration structures for loading encounter/analysis files

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// The reward unlocked when a part is destroyed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardKind {
    Dmg,
    CritDmg,
    CritRate,
}

impl Serialize for RewardKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

// Custom deserializer for case-insensitive matching
impl<'de> Deserialize<'de> for RewardKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.to_uppercase().as_str() {
            "DMG" => Ok(RewardKind::Dmg),
            "CRIT_DMG" => Ok(RewardKind::CritDmg),
            "CRIT_RATE" => Ok(RewardKind::CritRate),
            _ => Err(serde::de::Error::unknown_variant(
                &s,
                &["DMG", "CRIT_DMG", "CRIT_RATE"],
            )),
        }
    }
}

impl RewardKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RewardKind::Dmg => "DMG",
            RewardKind::CritDmg => "CRIT_DMG",
            RewardKind::CritRate => "CRIT_RATE",
        }
    }
}

/// One destructible enemy part: name is its identity for the whole analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartSpec {
    pub name: String,
    pub hp: f64,
    pub reward: RewardKind,
}

impl PartSpec {
    pub fn new(name: &str, hp: f64, reward: RewardKind) -> Self {
        Self {
            name: name.to_string(),
            hp,
            reward,
        }
    }
}

/// Full analysis configuration loaded from YAML/JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub base_damage: f64,
    #[serde(default)]
    pub base_crit_rate_percent: f64,
    pub ammo_budget: u32,
    pub parts: Vec<PartSpec>,
    #[serde(default = "default_run_count")]
    pub run_count: usize,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_run_count() -> usize {
    1000
}

fn default_top_n() -> usize {
    15
}

impl AnalysisConfig {
    /// The stock Mechanical Kraken encounter with typical player stats
    pub fn default_kraken() -> Self {
        Self {
            base_damage: 2600.0,
            base_crit_rate_percent: 20.0,
            ammo_budget: 60,
            parts: vec![
                PartSpec::new("Head", 60000.0, RewardKind::CritDmg),
                PartSpec::new("Shoulder 1", 30000.0, RewardKind::Dmg),
                PartSpec::new("Shoulder 2", 30000.0, RewardKind::CritRate),
                PartSpec::new("Leg 1", 40000.0, RewardKind::Dmg),
                PartSpec::new("Leg 2", 40000.0, RewardKind::CritDmg),
            ],
            run_count: default_run_count(),
            top_n: default_top_n(),
        }
    }

    /// Load an analysis configuration from a YAML or JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(&path)?;
        let path_str = path.as_ref().to_string_lossy().to_lowercase();

        if path_str.ends_with(".json") {
            let config: AnalysisConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            let config: AnalysisConfig = serde_yaml::from_str(&content)?;
            Ok(config)
        }
    }

    /// Load from JSON string (for Python interop)
    pub fn from_json(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: AnalysisConfig = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Check the configuration before any simulation runs.
    ///
    /// Simulation assumes positive damage and HP (the hit loop would never
    /// terminate otherwise) and a sample size of at least 2 (sample standard
    /// deviation divides by n - 1).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_damage <= 0.0 {
            return Err(ConfigError::NonPositiveDamage(self.base_damage));
        }
        if self.parts.is_empty() {
            return Err(ConfigError::NoParts);
        }
        for (i, part) in self.parts.iter().enumerate() {
            if part.hp <= 0.0 {
                return Err(ConfigError::NonPositiveHp(part.name.clone()));
            }
            if self.parts[..i].iter().any(|p| p.name == part.name) {
                return Err(ConfigError::DuplicatePart(part.name.clone()));
            }
        }
        if self.run_count < 2 {
            return Err(ConfigError::RunCountTooSmall(self.run_count));
        }
        if self.top_n == 0 {
            return Err(ConfigError::ZeroTopN);
        }
        if self.ammo_budget == 0 {
            return Err(ConfigError::ZeroAmmoBudget);
        }
        Ok(())
    }

    pub fn part_names(&self) -> Vec<String> {
        self.parts.iter().map(|p| p.name.clone()).collect()
    }
}

/// Validation failures caught before simulation starts
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonPositiveDamage(f64),
    NoParts,
    DuplicatePart(String),
    NonPositiveHp(String),
    RunCountTooSmall(usize),
    ZeroTopN,
    ZeroAmmoBudget,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveDamage(d) => {
                write!(f, "base_damage must be positive, got {}", d)
            }
            ConfigError::NoParts => write!(f, "at least one part is required"),
            ConfigError::DuplicatePart(name) => write!(f, "duplicate part name: {}", name),
            ConfigError::NonPositiveHp(name) => {
                write!(f, "part '{}' must have positive hp", name)
            }
            ConfigError::RunCountTooSmall(n) => {
                write!(f, "run_count must be at least 2 for sample stdev, got {}", n)
            }
            ConfigError::ZeroTopN => write!(f, "top_n must be positive"),
            ConfigError::ZeroAmmoBudget => write!(f, "ammo_budget must be positive"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_kraken_is_valid() {
        let config = AnalysisConfig::default_kraken();
        assert!(config.validate().is_ok());
        assert_eq!(config.parts.len(), 5);
    }

    #[test]
    fn reward_kind_roundtrip_and_case_insensitive() {
        let kind: RewardKind = serde_json::from_str("\"crit_dmg\"").unwrap();
        assert_eq!(kind, RewardKind::CritDmg);
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"CRIT_DMG\"");

        let bad: Result<RewardKind, _> = serde_json::from_str("\"LIFESTEAL\"");
        assert!(bad.is_err());
    }

    #[test]
    fn parses_json_config() {
        let json = r#"{
            "base_damage": 100.0,
            "base_crit_rate_percent": 10.0,
            "ammo_budget": 30,
            "parts": [
                {"name": "Head", "hp": 500.0, "reward": "DMG"},
                {"name": "Tail", "hp": 300.0, "reward": "CRIT_RATE"}
            ]
        }"#;
        let config = AnalysisConfig::from_json(json).unwrap();
        assert_eq!(config.run_count, 1000);
        assert_eq!(config.top_n, 15);
        assert_eq!(config.parts[1].reward, RewardKind::CritRate);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_small_run_count() {
        let mut config = AnalysisConfig::default_kraken();
        config.run_count = 1;
        assert_eq!(config.validate(), Err(ConfigError::RunCountTooSmall(1)));
    }

    #[test]
    fn rejects_duplicate_part_names() {
        let mut config = AnalysisConfig::default_kraken();
        config.parts.push(PartSpec::new("Head", 1000.0, RewardKind::Dmg));
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicatePart("Head".to_string()))
        );
    }

    #[test]
    fn rejects_bad_numbers() {
        let mut config = AnalysisConfig::default_kraken();
        config.base_damage = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveDamage(_))
        ));

        let mut config = AnalysisConfig::default_kraken();
        config.parts[2].hp = -5.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveHp("Shoulder 2".to_string()))
        );
    }
}
