//! Layered configuration for the command line tool
//!
//! Values come from built-in defaults, then the TOML file, then
//! `GITFRESH_*` environment variables (`GITFRESH_FRESHDESK__API_KEY` sets
//! `freshdesk.api_key`).

use anyhow::{Context, Result, anyhow, bail};
use colored::Colorize;
use dialoguer::{Confirm, Input, Password};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use gitfresh_core::directory::freshdesk::validate_subdomain;
use gitfresh_core::http::validate_api_url;
use gitfresh_core::{FreshdeskConfig, GitHubConfig, SyncOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "GITFRESH_";

const OUTPUT_FORMATS: &[&str] = &["human", "json", "minimal"];

/// Everything the CLI reads from configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub freshdesk: FreshdeskConfig,
    #[serde(default)]
    pub sync: SyncSettings,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncSettings {
    /// Serialize company and contact creation within one process
    pub serialize_creations: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Format used on an interactive terminal when `--format` is not given
    pub default_format: String,
    pub color_enabled: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: OUTPUT_FORMATS[0].to_string(),
            color_enabled: true,
        }
    }
}

impl From<&SyncSettings> for SyncOptions {
    fn from(settings: &SyncSettings) -> Self {
        SyncOptions {
            serialize_creations: settings.serialize_creations,
        }
    }
}

/// How a settable key is validated, stored and displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyKind {
    ApiUrl,
    Secret,
    Subdomain,
    Timeout,
    Flag,
    Format,
}

fn key_kind(key: &str) -> Option<KeyKind> {
    let kind = match key {
        "github.api_url" | "freshdesk.api_url" => KeyKind::ApiUrl,
        "github.token" | "freshdesk.api_key" => KeyKind::Secret,
        "freshdesk.default_subdomain" => KeyKind::Subdomain,
        "github.timeout_seconds" | "freshdesk.timeout_seconds" => KeyKind::Timeout,
        "sync.serialize_creations" | "output.color_enabled" => KeyKind::Flag,
        "output.default_format" => KeyKind::Format,
        _ => return None,
    };
    Some(kind)
}

/// Check `raw` for `key` and convert it to the value written to the file
fn parse_value(key: &str, raw: &str) -> Result<toml::Value> {
    let kind = key_kind(key).ok_or_else(|| anyhow!("Unknown configuration key '{key}'"))?;

    let value = match kind {
        KeyKind::ApiUrl => {
            validate_api_url(key, raw)?;
            toml::Value::String(raw.to_string())
        }
        KeyKind::Secret => {
            if raw.trim().is_empty() {
                bail!("{key} must not be empty");
            }
            toml::Value::String(raw.to_string())
        }
        KeyKind::Subdomain => {
            validate_subdomain(raw)?;
            toml::Value::String(raw.to_string())
        }
        KeyKind::Timeout => {
            let seconds: u32 = raw
                .parse()
                .with_context(|| format!("{key} must be a whole number of seconds"))?;
            if seconds == 0 {
                bail!("{key} must be greater than 0");
            }
            toml::Value::Integer(i64::from(seconds))
        }
        KeyKind::Flag => {
            let flag: bool = raw
                .parse()
                .with_context(|| format!("{key} must be 'true' or 'false'"))?;
            toml::Value::Boolean(flag)
        }
        KeyKind::Format => {
            if !OUTPUT_FORMATS.contains(&raw) {
                bail!("{key} must be one of: {}", OUTPUT_FORMATS.join(", "));
            }
            toml::Value::String(raw.to_string())
        }
    };
    Ok(value)
}

/// Render a value for display, hiding secrets
pub fn display_value(key: &str, value: String) -> String {
    if key_kind(key) == Some(KeyKind::Secret) && !value.is_empty() {
        "*".repeat(value.chars().count().min(8))
    } else {
        value
    }
}

fn scalar_to_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}

fn flatten(prefix: &str, value: &toml::Value, out: &mut Vec<(String, String)>) {
    if let toml::Value::Table(table) = value {
        for (name, child) in table {
            let key = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}.{name}")
            };
            flatten(&key, child, out);
        }
    } else if let Some(rendered) = scalar_to_string(value) {
        out.push((prefix.to_string(), rendered));
    }
}

/// Reads and writes the TOML configuration file
pub struct ConfigManager {
    config_path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Use the platform configuration directory
    pub fn new() -> Self {
        Self::with_path(default_config_path())
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    pub fn get_config_path(&self) -> PathBuf {
        self.config_path.clone()
    }

    /// Merge defaults, the config file and the environment
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));
        if self.config_path.exists() {
            figment = figment.merge(Toml::file(&self.config_path));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| {
                format!(
                    "Failed to load configuration from {}",
                    self.config_path.display()
                )
            })
    }

    /// Effective value of `key`, secrets masked
    pub fn get(&self, key: &str) -> Result<String> {
        let effective = self.effective_values()?;
        let found = key
            .split('.')
            .try_fold(&effective, |node, part| node.get(part))
            .ok_or_else(|| anyhow!("Key '{key}' not found"))?;

        let rendered =
            scalar_to_string(found).ok_or_else(|| anyhow!("'{key}' is a section, not a value"))?;
        Ok(display_value(key, rendered))
    }

    /// Validate `raw` and write it to the config file
    pub fn set(&mut self, key: &str, raw: &str) -> Result<()> {
        let value = parse_value(key, raw)?;

        let mut document: toml::Table = match fs::read_to_string(&self.config_path) {
            Ok(content) => toml::from_str(&content)
                .with_context(|| format!("{} is not valid TOML", self.config_path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => toml::Table::new(),
            Err(e) => return Err(e.into()),
        };

        let (section, name) = key
            .split_once('.')
            .ok_or_else(|| anyhow!("Key '{key}' must have the form section.name"))?;
        let section = document
            .entry(section)
            .or_insert_with(|| toml::Value::Table(toml::Table::new()));
        let toml::Value::Table(section) = section else {
            bail!("'{key}' conflicts with a non-table value in the config file");
        };
        section.insert(name.to_string(), value);

        write_file(&self.config_path, &toml::to_string_pretty(&document)?)
    }

    /// Every effective value sorted by key, secrets masked
    pub fn list(&self) -> Result<Vec<(String, String)>> {
        let mut items = Vec::new();
        flatten("", &self.effective_values()?, &mut items);
        items.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(items
            .into_iter()
            .map(|(key, value)| {
                let shown = display_value(&key, value);
                (key, shown)
            })
            .collect())
    }

    fn effective_values(&self) -> Result<toml::Value> {
        let rendered = toml::to_string(&self.load()?)?;
        let table: toml::Table = toml::from_str(&rendered)?;
        Ok(toml::Value::Table(table))
    }
}

fn default_config_path() -> PathBuf {
    #[cfg(not(target_os = "windows"))]
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg).join("gitfresh").join("config.toml");
    }

    #[cfg(target_os = "linux")]
    let base = dirs::home_dir().map(|home| home.join(".config"));
    #[cfg(not(target_os = "linux"))]
    let base = dirs::config_dir();

    base.unwrap_or_else(|| PathBuf::from("."))
        .join("gitfresh")
        .join("config.toml")
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Load the configuration from the default location
pub fn get_config() -> Result<AppConfig> {
    ConfigManager::new().load()
}

/// Prompt for the Freshdesk credentials and default subdomain
pub async fn interactive_init(force: bool) -> Result<()> {
    let mut manager = ConfigManager::new();
    let current = manager.load().ok();

    println!("{}", "gitfresh setup".bold());
    println!();

    if !force && is_configured(current.as_ref()) {
        let again = Confirm::new()
            .with_prompt("A Freshdesk API key is already stored. Replace the configuration?")
            .default(false)
            .interact()
            .context("Failed to read answer")?;
        if !again {
            println!("Nothing changed.");
            return Ok(());
        }
    }

    println!("You will need:");
    println!("  • your Freshdesk API key (Profile settings > View API key)");
    println!("  • optionally a GitHub token, which raises the API rate limit");
    println!();

    let token = Password::new()
        .with_prompt("GitHub token (empty for anonymous requests)")
        .allow_empty_password(true)
        .interact()
        .context("Failed to read GitHub token")?;
    if !token.is_empty() {
        manager.set("github.token", &token)?;
    }

    let api_key = Password::new()
        .with_prompt("Freshdesk API key")
        .interact()
        .context("Failed to read Freshdesk API key")?;
    manager.set("freshdesk.api_key", &api_key)?;

    let mut prompt = Input::<String>::new()
        .with_prompt("Default Freshdesk subdomain (<subdomain>.freshdesk.com)")
        .validate_with(|input: &String| validate_subdomain(input).map_err(|e| e.to_string()));
    if let Some(existing) = current.and_then(|c| c.freshdesk.default_subdomain) {
        prompt = prompt.default(existing);
    }
    let subdomain = prompt.interact_text().context("Failed to read subdomain")?;
    manager.set("freshdesk.default_subdomain", &subdomain)?;

    println!();
    println!("{} {}", "Saved".green(), manager.get_config_path().display());
    println!("Try: gitfresh sync <github-username>");

    Ok(())
}

fn is_configured(config: Option<&AppConfig>) -> bool {
    config.is_some_and(|c| !c.freshdesk.api_key.is_blank())
}
