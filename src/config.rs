use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Names of the heuristic weights, in the order they are documented.
pub const WEIGHT_KEYS: [&str; 8] = [
    "immediate_win",
    "block_opponent_win",
    "avoid_giving_win",
    "ai_alignment_score",
    "player_alignment_score",
    "central_column_preference",
    "historical_win_score",
    "historical_loss_score",
];

/// Heuristic weights used by the evaluator. Every weight is required.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointsConfig {
    pub immediate_win: f64,
    pub block_opponent_win: f64,
    pub avoid_giving_win: f64,
    pub ai_alignment_score: f64,
    pub player_alignment_score: f64,
    pub central_column_preference: f64,
    pub historical_win_score: f64,
    pub historical_loss_score: f64,
}

impl Default for PointsConfig {
    fn default() -> Self {
        PointsConfig {
            immediate_win: 1000.0,
            block_opponent_win: 500.0,
            avoid_giving_win: 300.0,
            ai_alignment_score: 10.0,
            player_alignment_score: 8.0,
            central_column_preference: 4.0,
            historical_win_score: 5.0,
            historical_loss_score: 5.0,
        }
    }
}

impl PointsConfig {
    /// Build from a TOML table such as the `[points]` section.
    pub fn from_toml(table: &toml::Table) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| {
            table.get(key).map(|value| match value {
                toml::Value::Integer(i) => Ok(*i as f64),
                toml::Value::Float(f) => Ok(*f),
                other => Err(other.to_string()),
            })
        })
    }

    /// Build from a JSON object, the format of `points_config.json`.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        Self::from_lookup(|key| {
            map.get(key)
                .map(|value| value.as_f64().ok_or_else(|| value.to_string()))
        })
    }

    /// Load a standalone `points_config.json` file.
    pub fn load_json(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&content)
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<Result<f64, String>>,
    {
        let weight = |key: &'static str| match lookup(key) {
            None => Err(ConfigError::MissingWeight { key }),
            Some(Err(value)) => Err(ConfigError::InvalidWeight { key, value }),
            Some(Ok(v)) if !v.is_finite() => Err(ConfigError::InvalidWeight {
                key,
                value: v.to_string(),
            }),
            Some(Ok(v)) => Ok(v),
        };

        Ok(PointsConfig {
            immediate_win: weight("immediate_win")?,
            block_opponent_win: weight("block_opponent_win")?,
            avoid_giving_win: weight("avoid_giving_win")?,
            ai_alignment_score: weight("ai_alignment_score")?,
            player_alignment_score: weight("player_alignment_score")?,
            central_column_preference: weight("central_column_preference")?,
            historical_win_score: weight("historical_win_score")?,
            historical_loss_score: weight("historical_loss_score")?,
        })
    }

    /// Weights as a TOML table keyed by [`WEIGHT_KEYS`].
    pub fn to_toml(&self) -> toml::Table {
        let values = [
            self.immediate_win,
            self.block_opponent_win,
            self.avoid_giving_win,
            self.ai_alignment_score,
            self.player_alignment_score,
            self.central_column_preference,
            self.historical_win_score,
            self.historical_loss_score,
        ];
        WEIGHT_KEYS
            .iter()
            .zip(values)
            .map(|(key, value)| (key.to_string(), toml::Value::Float(value)))
            .collect()
    }
}

/// Who moves first in a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StarterChoice {
    Human,
    Ai,
    Random,
}

/// Which computer opponent to play against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OpponentKind {
    Heuristic,
    Random,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cosmetic pause before the computer moves; 0 disables it.
    pub think_delay_ms: u64,
    pub starter: StarterChoice,
    pub opponent: OpponentKind,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            think_delay_ms: 800,
            starter: StarterChoice::Human,
            opponent: OpponentKind::Heuristic,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub log_path: PathBuf,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        HistoryConfig {
            log_path: PathBuf::from("data/game_data.csv"),
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub history: HistoryConfig,
    /// Raw weight table; see [`AppConfig::points_config`]. A config file
    /// without a `[points]` section has no weights at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<toml::Table>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            game: GameConfig::default(),
            history: HistoryConfig::default(),
            points: Some(PointsConfig::default().to_toml()),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Typed heuristic weights from the `[points]` table.
    pub fn points_config(&self) -> Result<PointsConfig, ConfigError> {
        match &self.points {
            Some(table) => PointsConfig::from_toml(table),
            None => Err(ConfigError::MissingWeight {
                key: WEIGHT_KEYS[0],
            }),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.points_config()?;

        if self.history.log_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "history.log_path must not be empty".into(),
            ));
        }
        if self.game.think_delay_ms > 10_000 {
            return Err(ConfigError::Validation(
                "game.think_delay_ms must be <= 10000".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.points_config().unwrap(), PointsConfig::default());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[game]
think_delay_ms = 0
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.game.think_delay_ms, 0);
        assert_eq!(config.game.starter, StarterChoice::Human);
        assert_eq!(config.history.log_path, PathBuf::from("data/game_data.csv"));
    }

    #[test]
    fn test_missing_points_section_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[game]\nthink_delay_ms = 0\n").unwrap();

        let config: AppConfig = toml::from_str("[game]\nthink_delay_ms = 0\n").unwrap();
        assert!(matches!(
            config.points_config(),
            Err(ConfigError::MissingWeight {
                key: "immediate_win"
            })
        ));
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::MissingWeight {
                key: "immediate_win"
            })
        ));
        assert!(matches!(
            AppConfig::load_or_default(&path),
            Err(ConfigError::MissingWeight { .. })
        ));
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        let default = AppConfig::default();
        assert_eq!(config.game.think_delay_ms, default.game.think_delay_ms);
        assert_eq!(config.game.opponent, OpponentKind::Heuristic);
    }

    #[test]
    fn test_integer_weights_accepted() {
        let toml_str = r#"
[points]
immediate_win = 100
block_opponent_win = 50
avoid_giving_win = 30
ai_alignment_score = 2
player_alignment_score = 1.5
central_column_preference = 3
historical_win_score = 1
historical_loss_score = 1
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        let points = config.points_config().unwrap();
        assert_eq!(points.immediate_win, 100.0);
        assert_eq!(points.player_alignment_score, 1.5);
    }

    #[test]
    fn test_missing_weight_names_key() {
        let mut table = PointsConfig::default().to_toml();
        table.remove("avoid_giving_win");
        match PointsConfig::from_toml(&table) {
            Err(ConfigError::MissingWeight { key }) => assert_eq!(key, "avoid_giving_win"),
            other => panic!("expected MissingWeight, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_weight_rejected() {
        let mut table = PointsConfig::default().to_toml();
        table.insert(
            "immediate_win".to_string(),
            toml::Value::String("lots".to_string()),
        );
        assert!(matches!(
            PointsConfig::from_toml(&table),
            Err(ConfigError::InvalidWeight {
                key: "immediate_win",
                ..
            })
        ));

        let mut table = PointsConfig::default().to_toml();
        table.insert("historical_win_score".to_string(), toml::Value::Float(f64::NAN));
        assert!(matches!(
            PointsConfig::from_toml(&table),
            Err(ConfigError::InvalidWeight {
                key: "historical_win_score",
                ..
            })
        ));
    }

    #[test]
    fn test_validation_rejects_incomplete_points_table() {
        let toml_str = r#"
[points]
immediate_win = 100
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingWeight {
                key: "block_opponent_win"
            })
        ));
    }

    #[test]
    fn test_validation_rejects_empty_log_path() {
        let mut config = AppConfig::default();
        config.history.log_path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_long_delay() {
        let mut config = AppConfig::default();
        config.game.think_delay_ms = 60_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_points_from_json() {
        let json = r#"{
            "immediate_win": 1000,
            "block_opponent_win": 500,
            "avoid_giving_win": 300,
            "ai_alignment_score": 10,
            "player_alignment_score": 8,
            "central_column_preference": 4,
            "historical_win_score": 5,
            "historical_loss_score": 5
        }"#;
        assert_eq!(
            PointsConfig::from_json_str(json).unwrap(),
            PointsConfig::default()
        );

        let missing = r#"{ "immediate_win": 1000 }"#;
        assert!(matches!(
            PointsConfig::from_json_str(missing),
            Err(ConfigError::MissingWeight {
                key: "block_opponent_win"
            })
        ));

        let wrong_type = json.replace("\"avoid_giving_win\": 300", "\"avoid_giving_win\": \"300\"");
        assert!(matches!(
            PointsConfig::from_json_str(&wrong_type),
            Err(ConfigError::InvalidWeight {
                key: "avoid_giving_win",
                ..
            })
        ));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.game.think_delay_ms, 800);
        assert_eq!(config.points_config().unwrap(), PointsConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[game]
starter = "random"
opponent = "random"

[history]
log_path = "games.csv"

[points]
immediate_win = 900
block_opponent_win = 500
avoid_giving_win = 300
ai_alignment_score = 10
player_alignment_score = 8
central_column_preference = 4
historical_win_score = 5
historical_loss_score = 5
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.game.starter, StarterChoice::Random);
        assert_eq!(config.game.opponent, OpponentKind::Random);
        assert_eq!(config.history.log_path, PathBuf::from("games.csv"));
        // Others are defaults
        assert_eq!(config.game.think_delay_ms, 800);
        assert_eq!(config.points_config().unwrap().immediate_win, 900.0);
    }

    #[test]
    fn test_load_json_points_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points_config.json");
        std::fs::write(&path, "{}").unwrap();
        assert!(matches!(
            PointsConfig::load_json(&path),
            Err(ConfigError::MissingWeight {
                key: "immediate_win"
            })
        ));
        assert!(matches!(
            PointsConfig::load_json(&dir.path().join("absent.json")),
            Err(ConfigError::FileRead { .. })
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml().unwrap();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
        assert_eq!(config.points_config().unwrap(), PointsConfig::default());
    }
}
