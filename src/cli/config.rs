// ABOUTME: Configuration management for the pageframe application
// ABOUTME: Handles loading configuration from YAML files and environment variables and deriving framework paths

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::page::FrameworkPaths;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_project_root")]
    pub project_root: PathBuf,

    /// Relative paths are resolved against `project_root`
    #[serde(default = "default_pages_root")]
    pub pages_root: PathBuf,

    /// Directory holding the default document templates, relative to `project_root`
    #[serde(default = "default_views_dir", alias = "framework_views_dir")]
    pub views_dir: PathBuf,

    /// Variables available to every rendered view
    #[serde(default)]
    pub template_vars: HashMap<String, String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

fn default_project_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_pages_root() -> PathBuf {
    PathBuf::from("pages")
}

fn default_views_dir() -> PathBuf {
    PathBuf::from("views")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_root: default_project_root(),
            pages_root: default_pages_root(),
            views_dir: default_views_dir(),
            template_vars: HashMap::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::find_config_file(),
        };

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            serde_yaml::from_str(&contents)?
        } else {
            Config::default()
        };

        config.merge_env_from(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> PathBuf {
        let possible_paths = [
            "pageframe.yaml",
            "pageframe.yml",
            ".pageframe.yaml",
            ".pageframe.yml",
        ];

        for path in possible_paths {
            let path = PathBuf::from(path);
            if path.exists() {
                return path;
            }
        }

        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".pageframe").join("config.yaml");
            if home_config.exists() {
                return home_config;
            }
        }

        // Default path (may not exist)
        PathBuf::from("pageframe.yaml")
    }

    /// Merge environment overrides, read through `lookup`
    pub fn merge_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(root) = lookup("PAGEFRAME_PROJECT_ROOT") {
            self.project_root = PathBuf::from(root);
        }
        if let Some(pages) = lookup("PAGEFRAME_PAGES_ROOT") {
            self.pages_root = PathBuf::from(pages);
        }
        if let Some(views) = lookup("PAGEFRAME_VIEWS_DIR") {
            self.views_dir = PathBuf::from(views);
        }

        if let Some(level) = lookup("PAGEFRAME_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("PAGEFRAME_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Absolute directory layout for the renderer
    pub fn framework_paths(&self) -> Result<FrameworkPaths> {
        let project_root = if self.project_root.is_absolute() {
            self.project_root.clone()
        } else {
            std::env::current_dir()?.join(&self.project_root)
        };

        Ok(FrameworkPaths::new(&project_root)
            .with_pages_root(under(&project_root, &self.pages_root))
            .with_views_dir(under(&project_root, &self.views_dir)))
    }
}

fn under(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
