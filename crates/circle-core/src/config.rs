use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// Settings consumed by [`SocialNetwork`](crate::network::SocialNetwork).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default)]
    pub suggestions: SuggestConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestConfig {
    /// How candidates with equal mutual-friend counts are ordered by name.
    #[serde(default)]
    pub name_order: NameOrder,
    /// Keep at most this many suggestions.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Name comparison used as the first suggestion tiebreak.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameOrder {
    #[default]
    CaseInsensitive,
    CaseSensitive,
}

impl NameOrder {
    /// Compare two display names.
    ///
    /// Case-insensitive comparison falls back to the exact names when the
    /// folded forms are equal, so the result is a total order.
    #[must_use]
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            Self::CaseSensitive => a.cmp(b),
            Self::CaseInsensitive => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
        }
    }
}

/// Everything a user config file may set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    /// Preferred output mode for the console (`pretty`, `text`, `json`).
    #[serde(default)]
    pub output: Option<String>,
    #[serde(flatten)]
    pub network: NetworkConfig,
}

/// Path of the per-user config file, if the platform has a config dir.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("circle/config.toml"))
}

/// Load and parse an explicit config file.
///
/// # Errors
///
/// Fails if the file cannot be read or is not valid TOML for [`UserConfig`].
pub fn load_config(path: &Path) -> Result<UserConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load the per-user config, falling back to defaults when none exists.
///
/// # Errors
///
/// Fails only if a config file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(path) = user_config_path() else {
        return Ok(UserConfig::default());
    };
    if !path.exists() {
        return Ok(UserConfig::default());
    }
    load_config(&path)
}

/// Resolve the effective config: an explicit path wins over the user file.
///
/// # Errors
///
/// Propagates read and parse failures from [`load_config`].
pub fn resolve_config(explicit: Option<&Path>) -> Result<UserConfig> {
    match explicit {
        Some(path) => load_config(path),
        None => load_user_config(),
    }
}
