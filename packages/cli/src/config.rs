use markpad_editor::EditorOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "markpad.config.json";

/// Markpad configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding the persisted storage slots
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// Editor session options
    #[serde(default)]
    pub editor: EditorOptions,
}

fn default_store_dir() -> String {
    ".markpad".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to the store directory
    pub fn get_store_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.store_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            editor: EditorOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "storeDir": "state",
            "editor": { "storageSlot": "notes", "maxListDepth": 2 }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.store_dir, "state");
        assert_eq!(config.editor.storage_slot, "notes");
        assert_eq!(config.editor.max_list_depth, 2);
        assert_eq!(config.editor.undo_levels, 100);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.store_dir, ".markpad");
        assert_eq!(config.editor.storage_slot, "editorContent");
        assert_eq!(config.editor.max_list_depth, 4);
    }

    #[test]
    fn test_load_missing_and_present() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();

        let config = Config::load(&cwd).unwrap();
        assert_eq!(config.store_dir, ".markpad");

        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), r#"{"storeDir": "db"}"#).unwrap();
        let config = Config::load(&cwd).unwrap();
        assert_eq!(config.get_store_dir(&cwd), dir.path().join("db"));
        assert_eq!(config.editor, EditorOptions::default());
    }
}
