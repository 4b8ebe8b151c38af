use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::Result;
use crate::tracker::{PageState, WizardTracker};

const SYSTEM_CONFIG_PATH: &str = "/etc/deck-wizard/wizard.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    pub general: GeneralConfig,
    /// Pages in flow order
    pub pages: Vec<PageConfig>,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            pages: vec![
                PageConfig::required("location", "Location"),
                PageConfig::required("load-balancers", "Load Balancers"),
                PageConfig::required("security-groups", "Firewalls"),
                PageConfig::required("instance-type", "Instance Type"),
                PageConfig::required("capacity", "Capacity"),
                PageConfig {
                    mark_complete_on_view: true,
                    ..PageConfig::new("advanced", "Advanced Settings")
                },
            ],
        }
    }
}

impl WizardConfig {
    /// Load from the user config dir, then the system path, else defaults
    pub fn load() -> Result<Self> {
        match Self::default_paths().into_iter().find(|p| p.exists()) {
            Some(path) => Self::load_from(path),
            None => {
                info!("No wizard config found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: WizardConfig = toml::from_str(&content)?;
        info!("Loaded config from {:?} ({} pages)", path, config.pages.len());
        Ok(config)
    }

    fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("deck-wizard").join("wizard.toml"));
        }
        paths.push(PathBuf::from(SYSTEM_CONFIG_PATH));
        paths
    }

    /// Register every configured page, in file order
    pub fn build_tracker(&self) -> WizardTracker {
        let mut tracker = WizardTracker::new();
        for page in &self.pages {
            tracker.register_page(&page.key, page.display_label(), page.state());
        }
        tracker
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub title: String,
    pub subtitle: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            title: "Clone Server Group".to_string(),
            subtitle: "Configure the new server group".to_string(),
        }
    }
}

/// A wizard page as described in the config file
#[derive(Debug, Clone, Deserialize)]
pub struct PageConfig {
    pub key: String,
    /// Defaults to the key when empty
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default = "default_true")]
    pub rendered: bool,
    #[serde(default = "default_true")]
    pub mark_clean_on_view: bool,
    #[serde(default)]
    pub mark_complete_on_view: bool,
}

fn default_true() -> bool {
    true
}

impl PageConfig {
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            required: false,
            rendered: true,
            mark_clean_on_view: true,
            mark_complete_on_view: false,
        }
    }

    pub fn required(key: &str, label: &str) -> Self {
        Self {
            required: true,
            ..Self::new(key, label)
        }
    }

    pub fn display_label(&self) -> &str {
        if self.label.is_empty() { &self.key } else { &self.label }
    }

    pub fn state(&self) -> PageState {
        PageState::new()
            .required(self.required)
            .rendered(self.rendered)
            .mark_clean_on_view(self.mark_clean_on_view)
            .mark_complete_on_view(self.mark_complete_on_view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_builds_server_group_wizard() {
        let tracker = WizardConfig::default().build_tracker();

        assert_eq!(tracker.len(), 6);
        assert_eq!(tracker.incomplete_pages().len(), 5);
        assert!(!tracker.get_page("advanced").unwrap().required);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[general]
title = "Create Load Balancer"

[[pages]]
key = "location"
label = "Location"
required = true

[[pages]]
key = "security-groups"
rendered = false
mark_complete_on_view = true
"#
        )
        .unwrap();

        let config = WizardConfig::load_from(file.path()).unwrap();
        assert_eq!(config.general.title, "Create Load Balancer");
        assert_eq!(config.general.subtitle, GeneralConfig::default().subtitle);
        assert_eq!(config.pages.len(), 2);
        assert_eq!(config.pages[1].display_label(), "security-groups");

        let tracker = config.build_tracker();
        let page = tracker.get_page("security-groups").unwrap();
        assert!(!page.rendered);
        assert!(page.mark_complete_on_view);
        assert!(page.mark_clean_on_view);
        assert!(tracker.get_page("location").unwrap().required);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = WizardConfig::load_from(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.pages.len(), WizardConfig::default().pages.len());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[[pages]]\nlabel = \"no key\"\n").unwrap();

        assert!(WizardConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn test_duplicate_keys_merge() {
        let config = WizardConfig {
            general: GeneralConfig::default(),
            pages: vec![
                PageConfig::required("a", "A"),
                PageConfig::new("b", "B"),
                PageConfig::new("a", "A again"),
            ],
        };

        let tracker = config.build_tracker();
        let keys: Vec<_> = tracker.pages().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(tracker.get_page("a").unwrap().label, "A again");
    }
}
