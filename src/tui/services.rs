use crate::config::AppConfig;
use crate::core::catalog::{Choice, EntityRecord, JsonCatalog};
use crate::core::template::{self, TemplateOptions};
use crate::core::writer::ScriptWriter;

/// Handle to the backend the editor view calls into.
///
/// Mirrors the two calls the form needs: reading a data set and writing the
/// generated artifact. Created once at startup from config.
pub struct Services {
    pub catalog: JsonCatalog,
    pub writer: ScriptWriter,
    pub template: TemplateOptions,
    /// Write `<ClassName>.cpp` instead of the fixed file name.
    pub name_by_entity: bool,
}

impl Services {
    pub fn from_config(config: &AppConfig) -> Self {
        let services = Self {
            catalog: config.catalog(),
            writer: config.writer(),
            template: config.template_options(),
            name_by_entity: config.output.name_by_entity,
        };
        log::info!(
            "Services ready: data dir {}, output dir {}",
            services.catalog.data_dir().display(),
            services.writer.output_dir().display()
        );
        services
    }

    pub fn entity_choices(&self) -> Vec<Choice> {
        self.catalog.entity_choices()
    }

    pub fn action_choices(&self) -> Vec<Choice> {
        self.catalog.action_choices()
    }

    pub fn resolve_entity(&self, nameid: u32) -> EntityRecord {
        self.catalog.resolve_entity(nameid)
    }

    /// Persist a rendered script for `entity`. Returns the pass/fail flag only.
    pub fn write_artifact(&self, entity: &EntityRecord, text: &str) -> bool {
        if self.name_by_entity {
            self.writer.save_named(&template::class_name(entity), text)
        } else {
            self.writer.save(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_artifact_honours_name_by_entity() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.output.dir = dir.path().to_path_buf();
        config.output.name_by_entity = true;

        let services = Services::from_config(&config);
        let goblin = EntityRecord::new(1001, "Goblin", 42);
        assert!(services.write_artifact(&goblin, "x"));
        assert!(dir.path().join("BnpcGoblin.cpp").exists());
        assert!(!dir.path().join("BnpcSecondHoplomachus.cpp").exists());
    }

    #[test]
    fn test_write_artifact_fixed_name_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.output.dir = dir.path().to_path_buf();

        let services = Services::from_config(&config);
        assert!(services.write_artifact(&EntityRecord::new(1, "Imp", 2), "y"));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("BnpcSecondHoplomachus.cpp")).unwrap(),
            "y"
        );
    }
}
