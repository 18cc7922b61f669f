use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Optional settings file. Every key has a CLI counterpart that wins.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) categories: Option<PathBuf>,
    #[serde(default)]
    pub(crate) timew: Option<String>,
    #[serde(default)]
    pub(crate) timezone: Option<String>,
    #[serde(default)]
    pub(crate) report_range: Option<String>,
    #[serde(default)]
    pub(crate) debug: bool,
    /// File this config was read from
    #[serde(skip)]
    pub(crate) source: Option<PathBuf>,
}

impl Config {
    /// First parseable file wins. Runs before logging is set up, so parse
    /// failures go straight to stderr.
    pub(crate) fn load() -> Self {
        for path in Self::get_config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match Self::parse(&content) {
                    Ok(mut config) => {
                        config.source = Some(path);
                        return config;
                    }
                    Err(e) => {
                        eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                    }
                }
            }
        }

        Self::default()
    }

    pub(crate) fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/timewarden/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("timewarden").join("config.toml"));
        }

        // 2. Platform config dir (macOS Application Support)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("timewarden").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.timewarden.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".timewarden.toml"));
        }

        paths
    }
}
