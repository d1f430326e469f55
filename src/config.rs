use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub regions: RegionConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    #[serde(default)]
    pub records_path: String,
    #[serde(default)]
    pub schemes_path: String,
    #[serde(default)]
    pub interventions_path: String,
    #[serde(default = "default_true")]
    pub builtin_schemes: bool,
    #[serde(default = "default_true")]
    pub builtin_interventions: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionConfig {
    #[serde(default = "default_water_scarce_villages")]
    pub water_scarce_villages: Vec<String>,
    #[serde(default = "default_groundwater_trigger_villages")]
    pub groundwater_trigger_villages: Vec<String>,
    #[serde(default = "default_water_stressed_states")]
    pub water_stressed_states: Vec<String>,
    #[serde(default = "default_drought_priority_states")]
    pub drought_priority_states: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub records_path: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config/fra-dss/config.toml")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        let parsed: Self = toml::from_str(&data)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))?;
        Ok(parsed)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(records_path) = overrides.records_path {
            self.catalog.records_path = records_path;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating config directory: {}", parent.display())
            })?;
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn default_template() -> String {
        let template = r#"[catalog]
# JSON array of claim records. Leave empty to use the bundled demo records.
records_path = ""
# JSON arrays of scheme definitions / intervention templates.
# Leave empty to use the built-in tables (when the builtin flags are true).
schemes_path = ""
interventions_path = ""
builtin_schemes = true
builtin_interventions = true

[regions]
# Villages scored as water-scarce by the water access scheme.
water_scarce_villages = ["Malkangiri", "Koraput"]
# Villages that trigger groundwater recharging outside water-stressed states.
groundwater_trigger_villages = ["Malkangiri"]
water_stressed_states = ["Odisha"]
drought_priority_states = ["Maharashtra"]

[server]
host = "127.0.0.1"
port = 3001

[logging]
level = "info"
"#;
        template.to_string()
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            records_path: String::new(),
            schemes_path: String::new(),
            interventions_path: String::new(),
            builtin_schemes: true,
            builtin_interventions: true,
        }
    }
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            water_scarce_villages: default_water_scarce_villages(),
            groundwater_trigger_villages: default_groundwater_trigger_villages(),
            water_stressed_states: default_water_stressed_states(),
            drought_priority_states: default_drought_priority_states(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_water_scarce_villages() -> Vec<String> {
    vec!["Malkangiri".to_string(), "Koraput".to_string()]
}

fn default_groundwater_trigger_villages() -> Vec<String> {
    vec!["Malkangiri".to_string()]
}

fn default_water_stressed_states() -> Vec<String> {
    vec!["Odisha".to_string()]
}

fn default_drought_priority_states() -> Vec<String> {
    vec!["Maharashtra".to_string()]
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_to_defaults() {
        let parsed: Config = toml::from_str(&Config::default_template()).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn partial_file_keeps_section_defaults() {
        let parsed: Config = toml::from_str(
            r#"
[regions]
water_scarce_villages = ["Dantewada"]

[server]
port = 8080
"#,
        )
        .unwrap();
        assert_eq!(parsed.regions.water_scarce_villages, vec!["Dantewada"]);
        assert_eq!(parsed.regions.water_stressed_states, vec!["Odisha"]);
        assert_eq!(parsed.server.port, 8080);
        assert_eq!(parsed.server.host, "127.0.0.1");
        assert!(parsed.catalog.builtin_schemes);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load(Some(Path::new("/nonexistent/fra-dss/config.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn overrides_replace_selected_fields() {
        let mut config = Config::default();
        config.apply_overrides(ConfigOverrides {
            records_path: Some("/tmp/records.json".to_string()),
            log_level: None,
        });
        assert_eq!(config.catalog.records_path, "/tmp/records.json");
        assert_eq!(config.logging.level, "info");
    }
}
