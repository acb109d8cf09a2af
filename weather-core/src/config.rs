use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Endpoint used when the config does not override it.
pub const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org/data/2.5/weather";

/// Name of the per-directory secrets file checked before the platform config.
pub const LOCAL_SECRETS_FILE: &str = "secrets.toml";

/// Credentials for OpenWeather.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OpenWeatherConfig {
    #[serde(default)]
    pub api_key: String,

    /// Alternate endpoint, e.g. a caching proxy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// [OpenWeather]
/// api_key = "..."
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(rename = "OpenWeather", default, skip_serializing_if = "Option::is_none")]
    pub open_weather: Option<OpenWeatherConfig>,
}

impl Config {
    /// Pick the config file: an explicit path wins, then `./secrets.toml`,
    /// then the platform config directory.
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        Self::resolve_path_in(Path::new("."), explicit)
    }

    /// Same as `resolve_path`, with `dir` standing in for the working directory.
    pub fn resolve_path_in(dir: &Path, explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        let local = dir.join(LOCAL_SECRETS_FILE);
        if local.is_file() {
            return Ok(local);
        }

        Self::config_file_path()
    }

    /// Path to the config file in the platform config directory.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load config from `path`. A missing file is an error: there is no key to fall back on.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(anyhow!(
                "Config file not found: {}\n\
                 Hint: run `weather --configure` and enter your OpenWeather API key.",
                path.display()
            ));
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// The OpenWeather API key, or an error explaining what is missing.
    pub fn api_key(&self) -> Result<&str> {
        let section = self
            .open_weather
            .as_ref()
            .ok_or_else(|| anyhow!("Config has no [OpenWeather] section."))?;

        let key = section.api_key.trim();
        if key.is_empty() {
            return Err(anyhow!(
                "No api_key configured in the [OpenWeather] section.\n\
                 Hint: run `weather --configure` and enter your API key."
            ));
        }

        Ok(key)
    }

    pub fn base_url(&self) -> &str {
        self.open_weather
            .as_ref()
            .and_then(|section| section.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL)
    }

    /// Set/replace the API key, keeping any configured base URL.
    pub fn set_api_key(&mut self, api_key: String) {
        self.open_weather.get_or_insert_with(Default::default).api_key = api_key;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("weather-core-config-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn reads_key_from_open_weather_section() {
        let cfg = Config::parse("[OpenWeather]\napi_key = \"abc123\"\n").unwrap();

        assert_eq!(cfg.api_key().unwrap(), "abc123");
        assert_eq!(cfg.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn base_url_can_be_overridden() {
        let cfg = Config::parse(
            "[OpenWeather]\napi_key = \"k\"\nbase_url = \"http://127.0.0.1:9/weather\"\n",
        )
        .unwrap();

        assert_eq!(cfg.base_url(), "http://127.0.0.1:9/weather");
    }

    #[test]
    fn missing_section_is_an_error() {
        let cfg = Config::parse("[Other]\napi_key = \"abc\"\n").unwrap();
        let err = cfg.api_key().unwrap_err();

        assert!(err.to_string().contains("[OpenWeather]"));
    }

    #[test]
    fn missing_or_blank_key_is_an_error() {
        let cfg = Config::parse("[OpenWeather]\n").unwrap();
        assert!(cfg.api_key().unwrap_err().to_string().contains("No api_key"));

        let cfg = Config::parse("[OpenWeather]\napi_key = \"   \"\n").unwrap();
        assert!(cfg.api_key().is_err());
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(Config::parse("[OpenWeather\napi_key = ").is_err());
    }

    #[test]
    fn load_from_missing_file_mentions_path_and_hint() {
        let path = scratch_path("does-not-exist.toml");
        let err = Config::load_from(&path).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("Config file not found"));
        assert!(msg.contains("weather --configure"));
    }

    #[test]
    fn save_then_load_keeps_key() {
        let path = scratch_path("saved/config.toml");

        let mut cfg = Config::default();
        cfg.set_api_key("SAVED_KEY".to_string());
        cfg.save_to(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("[OpenWeather]"));

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_key().unwrap(), "SAVED_KEY");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn set_api_key_keeps_base_url() {
        let mut cfg = Config::parse(
            "[OpenWeather]\napi_key = \"old\"\nbase_url = \"http://localhost/w\"\n",
        )
        .unwrap();

        cfg.set_api_key("new".to_string());

        assert_eq!(cfg.api_key().unwrap(), "new");
        assert_eq!(cfg.base_url(), "http://localhost/w");
    }

    #[test]
    fn local_secrets_file_beats_platform_dir() {
        let dir = scratch_path("with-secrets");
        fs::create_dir_all(&dir).unwrap();
        let secrets = dir.join(LOCAL_SECRETS_FILE);
        fs::write(&secrets, "[OpenWeather]\napi_key = \"local\"\n").unwrap();

        let resolved = Config::resolve_path_in(&dir, None).unwrap();
        assert_eq!(resolved, secrets);

        let explicit = dir.join("other.toml");
        let resolved = Config::resolve_path_in(&dir, Some(&explicit)).unwrap();
        assert_eq!(resolved, explicit);

        let _ = fs::remove_file(&secrets);
    }

    #[test]
    fn falls_back_to_platform_dir_without_local_secrets() {
        let dir = scratch_path("without-secrets");
        fs::create_dir_all(&dir).unwrap();

        let resolved = Config::resolve_path_in(&dir, None).unwrap();

        assert_eq!(resolved, Config::config_file_path().unwrap());
        assert!(resolved.ends_with("config.toml"));
    }

    #[test]
    fn explicit_path_wins() {
        let explicit = Path::new("/tmp/somewhere/weather.toml");
        let resolved = Config::resolve_path(Some(explicit)).unwrap();

        assert_eq!(resolved, explicit);
    }
}
