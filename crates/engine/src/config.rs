use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use types::board::{Position, Vulnerability};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid table config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("first_board must be at least 1")]
    InvalidFirstBoard,
}

/// How each board's vulnerability is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VulnerabilityMode {
    Fixed(Vulnerability),
    /// Standard 16-board duplicate cycle.
    ByBoard,
}

impl Default for VulnerabilityMode {
    fn default() -> Self {
        VulnerabilityMode::Fixed(Vulnerability::None)
    }
}

impl VulnerabilityMode {
    pub fn for_board(self, board_number: u32) -> Vulnerability {
        match self {
            VulnerabilityMode::Fixed(vulnerability) => vulnerability,
            VulnerabilityMode::ByBoard => Vulnerability::from_board_number(board_number),
        }
    }
}

/// Settings for a [`Table`](crate::table::Table) session.
///
/// ```yaml
/// seed: 42
/// dealer: South
/// vulnerability:
///   fixed: Both
/// first_board: 1
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    /// Shuffle seed; fresh entropy when absent.
    pub seed: Option<u64>,
    pub dealer: Position,
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub vulnerability: VulnerabilityMode,
    pub first_board: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            seed: None,
            dealer: Position::South,
            vulnerability: VulnerabilityMode::default(),
            first_board: 1,
        }
    }
}

impl TableConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: TableConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.first_board == 0 {
            return Err(ConfigError::InvalidFirstBoard);
        }
        Ok(())
    }
}
