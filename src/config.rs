use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::catalog::JsonCatalog;
use crate::core::template::TemplateOptions;
use crate::core::writer::{ScriptWriter, DEFAULT_FILE_NAME, DEFAULT_OUTPUT_DIR};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tui: TuiConfig,
    pub data: DataConfig,
    pub output: OutputConfig,
    pub template: TemplateConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
}

/// Where the lookup data sets live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub data_dir: PathBuf,
    pub entities_file: String,
    pub actions_file: String,
}

/// Where generated scripts are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    /// Fixed file name used for every generation.
    pub file_name: String,
    /// Write `<ClassName>.cpp` instead of `file_name`.
    pub name_by_entity: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Timeline ticks between consecutive gambits.
    pub timeline_step: u32,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 50 }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            entities_file: "bnpcNameIds.json".to_string(),
            actions_file: "actions.json".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            file_name: DEFAULT_FILE_NAME.to_string(),
            name_by_entity: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/gambit-editor/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, with the same fallback.
    pub fn load_from(config_path: &Path) -> Self {
        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e}, using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {}, using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    pub fn catalog(&self) -> JsonCatalog {
        JsonCatalog::new(
            &self.data.data_dir,
            &self.data.entities_file,
            &self.data.actions_file,
        )
    }

    pub fn writer(&self) -> ScriptWriter {
        ScriptWriter::new(&self.output.dir, &self.output.file_name)
    }

    pub fn template_options(&self) -> TemplateOptions {
        TemplateOptions {
            timeline_step: self.template.timeline_step,
        }
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("gambit-editor").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
