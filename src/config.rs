use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigSortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    /// Sheet export URL used when neither `--url` nor `--file` is given
    #[serde(default)]
    pub(crate) url: Option<String>,
    #[serde(default)]
    pub(crate) locale: Option<String>,
    #[serde(default)]
    pub(crate) order: Option<ConfigSortOrder>,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) debug: bool,
}

/// Outcome of the config search
///
/// Logging is not installed yet while this runs, so what happened is kept
/// here and reported by the caller afterwards.
#[derive(Debug, Default)]
pub(crate) struct ConfigLoad {
    pub(crate) config: Config,
    pub(crate) path: Option<PathBuf>,
    pub(crate) rejected: Vec<(PathBuf, String)>,
}

impl Config {
    pub(crate) fn load() -> ConfigLoad {
        Self::load_from(&Self::get_config_paths())
    }

    fn load_from(paths: &[PathBuf]) -> ConfigLoad {
        let mut load = ConfigLoad::default();

        for path in paths {
            if path.exists()
                && let Ok(content) = fs::read_to_string(path)
            {
                match toml::from_str::<Config>(&content) {
                    Ok(config) => {
                        load.config = config;
                        load.path = Some(path.clone());
                        return load;
                    }
                    Err(e) => load.rejected.push((path.clone(), e.to_string())),
                }
            }
        }

        load
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/adstats/config.toml (Linux/cross-platform)
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("adstats").join("config.toml"));
        }

        // 2. Platform config dir (macOS: ~/Library/Application Support)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("adstats").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.adstats.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".adstats.toml"));
        }

        paths
    }
}
