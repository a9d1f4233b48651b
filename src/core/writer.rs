//! Persists generated scripts to the output directory.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::{EditorError, Result};

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "output";
/// Default script file name. Every generation overwrites it.
pub const DEFAULT_FILE_NAME: &str = "BnpcSecondHoplomachus.cpp";

#[derive(Debug, Clone)]
pub struct ScriptWriter {
    output_dir: PathBuf,
    file_name: String,
}

impl Default for ScriptWriter {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR, DEFAULT_FILE_NAME)
    }
}

impl ScriptWriter {
    pub fn new(output_dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_name: file_name.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path the fixed-name `save` writes to.
    pub fn target_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }

    /// Path `save_named` writes to for a script class.
    pub fn named_path(&self, class_name: &str) -> PathBuf {
        self.output_dir.join(format!("{class_name}.cpp"))
    }

    /// Write `text` to the fixed target, creating the directory if needed.
    pub fn try_save(&self, text: &str) -> Result<PathBuf> {
        self.write_to(self.target_path(), text)
    }

    /// Write `text` to the fixed target. Failures are logged, not returned.
    pub fn save(&self, text: &str) -> bool {
        report(self.try_save(text))
    }

    /// Write `text` to `<class_name>.cpp` in the output directory.
    pub fn save_named(&self, class_name: &str, text: &str) -> bool {
        report(self.write_to(self.named_path(class_name), text))
    }

    #[tracing::instrument(level = "debug", skip(self, text), fields(bytes = text.len()))]
    fn write_to(&self, path: PathBuf, text: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).map_err(|source| EditorError::OutputDir {
            path: self.output_dir.clone(),
            source,
        })?;
        fs::write(&path, text).map_err(|source| EditorError::OutputWrite {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

fn report(result: Result<PathBuf>) -> bool {
    match result {
        Ok(path) => {
            log::info!("Script written to {}", path.display());
            true
        }
        Err(e) => {
            log::error!("Error saving script: {e}");
            false
        }
    }
}
