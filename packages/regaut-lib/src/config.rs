use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{automaton::determinize::DeterminizeOptions, logger::LogLevel};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub enabled: bool,
    pub log_level: LogLevel,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            enabled: false,
            log_level: LogLevel::Warn,
        }
    }
}

impl LoggerConfig {
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeterminizeConfig {
    /// Keep the empty subset as an explicit sink state, completing the DFA.
    pub explicit_sink: bool,
}

impl DeterminizeConfig {
    pub fn with_explicit_sink(mut self, explicit_sink: bool) -> Self {
        self.explicit_sink = explicit_sink;
        self
    }

    pub fn options(&self) -> DeterminizeOptions {
        DeterminizeOptions {
            explicit_sink: self.explicit_sink,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankDir {
    LR,
    RL,
    TB,
    BT,
}

impl RankDir {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankDir::LR => "LR",
            RankDir::RL => "RL",
            RankDir::TB => "TB",
            RankDir::BT => "BT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotConfig {
    pub rankdir: RankDir,
    /// Print state labels inside the nodes instead of state indices.
    pub show_state_labels: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        DotConfig {
            rankdir: RankDir::LR,
            show_state_labels: true,
        }
    }
}

impl DotConfig {
    pub fn with_rankdir(mut self, rankdir: RankDir) -> Self {
        self.rankdir = rankdir;
        self
    }

    pub fn with_show_state_labels(mut self, show_state_labels: bool) -> Self {
        self.show_state_labels = show_state_labels;
        self
    }
}

/// Settings of the `regaut` tool, read from a TOML file. Every field has a
/// default, so a file only needs to contain the values it changes.
///
/// ```toml
/// [logger]
/// enabled = true
/// log_level = "debug"
///
/// [determinize]
/// explicit_sink = true
///
/// [dot]
/// rankdir = "TB"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegautConfig {
    pub logger: LoggerConfig,
    pub determinize: DeterminizeConfig,
    pub dot: DotConfig,
}

impl RegautConfig {
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file<P: AsRef<Path>>(file_path: P) -> anyhow::Result<Self> {
        let canonic_path = std::fs::canonicalize(file_path)?;
        let content = std::fs::read_to_string(canonic_path)?;
        Self::from_toml(&content)
    }

    pub fn from_optional_file<P: AsRef<Path>>(file_path: Option<P>) -> anyhow::Result<Self> {
        match file_path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn with_logger(mut self, logger: LoggerConfig) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_determinize(mut self, determinize: DeterminizeConfig) -> Self {
        self.determinize = determinize;
        self
    }

    pub fn with_dot(mut self, dot: DotConfig) -> Self {
        self.dot = dot;
        self
    }
}
