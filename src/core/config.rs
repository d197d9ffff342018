use crate::core::error::{ConfigError, DeckError, DeckResult, ResultExt};
use crate::release::model::Store;
use crate::stores::{apple, google};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = "shipdeck.toml";

const MAX_TIMEOUT_SECS: u64 = 60;

/// Configuration for shipdeck
/// Searched in order: shipdeck.toml, .shipdeck.toml, .config/shipdeck.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeckConfig {
  #[serde(default)]
  pub stores: StoresConfig,
  #[serde(default)]
  pub groups: Vec<AppGroup>,
  /// File this config was loaded from
  #[serde(skip)]
  source: Option<PathBuf>,
}

/// Store connection settings shared by every group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoresConfig {
  /// Per-request timeout in seconds (1-60)
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,

  /// Environment variable holding the Google Play access token
  #[serde(default = "default_google_token_env")]
  pub google_token_env: String,

  /// Environment variable holding the App Store Connect JWT
  #[serde(default = "default_apple_token_env")]
  pub apple_token_env: String,

  #[serde(default = "default_google_base_url")]
  pub google_base_url: String,

  #[serde(default = "default_apple_base_url")]
  pub apple_base_url: String,

  /// Offline fixture directory; replaces both live stores when set
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub fixtures: Option<PathBuf>,
}

fn default_timeout_secs() -> u64 {
  15
}

fn default_google_token_env() -> String {
  "SHIPDECK_GOOGLE_TOKEN".to_string()
}

fn default_apple_token_env() -> String {
  "SHIPDECK_APPLE_TOKEN".to_string()
}

fn default_google_base_url() -> String {
  google::DEFAULT_BASE_URL.to_string()
}

fn default_apple_base_url() -> String {
  apple::DEFAULT_BASE_URL.to_string()
}

impl Default for StoresConfig {
  fn default() -> Self {
    Self {
      timeout_secs: default_timeout_secs(),
      google_token_env: default_google_token_env(),
      apple_token_env: default_apple_token_env(),
      google_base_url: default_google_base_url(),
      apple_base_url: default_apple_base_url(),
      fixtures: None,
    }
  }
}

impl StoresConfig {
  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_secs)
  }

  /// Environment variable consulted for a store's token
  pub fn token_env(&self, store: Store) -> &str {
    match store {
      Store::Google => &self.google_token_env,
      Store::Apple => &self.apple_token_env,
    }
  }
}

/// A Google Play app and an Apple app shown as one product
///
/// # Example
///
/// ```toml
/// [[groups]]
/// id = "acme"
/// name = "Acme"
/// google = { package_name = "com.acme.app", name = "Acme" }
/// apple = { app_id = "1234567890", name = "Acme", bundle_id = "com.acme.app", platforms = ["IOS"] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppGroup {
  pub id: String,
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub google: Option<GoogleApp>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub apple: Option<AppleApp>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoogleApp {
  pub package_name: String,
  #[serde(default)]
  pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppleApp {
  pub app_id: String,
  #[serde(default)]
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub bundle_id: Option<String>,
  /// Platform codes (IOS, MAC_OS, TV_OS, VISION_OS); empty means all
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub platforms: Vec<String>,
}

impl AppGroup {
  pub fn google_app(&self) -> DeckResult<&GoogleApp> {
    self.google.as_ref().ok_or_else(|| self.not_linked(Store::Google))
  }

  pub fn apple_app(&self) -> DeckResult<&AppleApp> {
    self.apple.as_ref().ok_or_else(|| self.not_linked(Store::Apple))
  }

  pub fn links(&self, store: Store) -> bool {
    match store {
      Store::Google => self.google.is_some(),
      Store::Apple => self.apple.is_some(),
    }
  }

  fn not_linked(&self, store: Store) -> DeckError {
    DeckError::Config(ConfigError::StoreNotLinked {
      group: self.id.clone(),
      store,
    })
  }

  fn validate(&self) -> DeckResult<()> {
    let invalid = |field: &str, reason: &str| {
      DeckError::Config(ConfigError::Invalid {
        field: format!("groups.{}.{}", self.id, field),
        reason: reason.to_string(),
      })
    };

    if self.google.is_none() && self.apple.is_none() {
      return Err(invalid("google", "a group must link at least one store"));
    }
    if let Some(google) = &self.google
      && google.package_name.trim().is_empty()
    {
      return Err(invalid("google.package_name", "must not be empty"));
    }
    if let Some(apple) = &self.apple {
      if apple.app_id.trim().is_empty() {
        return Err(invalid("apple.app_id", "must not be empty"));
      }
      if apple.platforms.iter().any(|p| p.trim().is_empty()) {
        return Err(invalid("apple.platforms", "platform codes must not be empty"));
      }
    }
    Ok(())
  }
}

impl DeckConfig {
  /// Find config file in search order: shipdeck.toml, .shipdeck.toml, .config/shipdeck.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = [
      path.join(CONFIG_FILE),
      path.join(".shipdeck.toml"),
      path.join(".config").join(CONFIG_FILE),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from the working directory (searches multiple locations)
  pub fn load(path: &Path) -> DeckResult<Self> {
    let config_path = Self::find_config_path(path).ok_or_else(|| {
      DeckError::Config(ConfigError::NotFound {
        root: path.to_path_buf(),
      })
    })?;
    Self::load_from(&config_path)
  }

  /// Load and validate a specific config file
  pub fn load_from(config_path: &Path) -> DeckResult<Self> {
    if !config_path.exists() {
      return Err(DeckError::Config(ConfigError::NotFound {
        root: config_path.parent().unwrap_or(config_path).to_path_buf(),
      }));
    }

    let content = fs::read_to_string(config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let mut config: DeckConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;
    config.source = Some(config_path.to_path_buf());

    config.validate()?;
    tracing::debug!(path = %config_path.display(), groups = config.groups.len(), "loaded config");
    Ok(config)
  }

  pub fn validate(&self) -> DeckResult<()> {
    if !(1..=MAX_TIMEOUT_SECS).contains(&self.stores.timeout_secs) {
      return Err(DeckError::Config(ConfigError::Invalid {
        field: "stores.timeout_secs".to_string(),
        reason: format!("must be between 1 and {} (got {})", MAX_TIMEOUT_SECS, self.stores.timeout_secs),
      }));
    }

    for (i, group) in self.groups.iter().enumerate() {
      if group.id.trim().is_empty() {
        return Err(DeckError::Config(ConfigError::Invalid {
          field: format!("groups[{}].id", i),
          reason: "must not be empty".to_string(),
        }));
      }
      if self.groups[..i].iter().any(|g| g.id == group.id) {
        return Err(DeckError::Config(ConfigError::Invalid {
          field: format!("groups.{}", group.id),
          reason: "duplicate group id".to_string(),
        }));
      }
      group.validate()?;
    }
    Ok(())
  }

  /// Look up a group by id
  pub fn group(&self, id: &str) -> DeckResult<&AppGroup> {
    self
      .groups
      .iter()
      .find(|g| g.id == id)
      .ok_or_else(|| DeckError::Config(ConfigError::GroupNotFound { id: id.to_string() }))
  }

  /// Fixture directory, resolved against the config file's directory
  pub fn fixtures_dir(&self) -> Option<PathBuf> {
    let fixtures = self.stores.fixtures.as_ref()?;
    if fixtures.is_absolute() {
      return Some(fixtures.clone());
    }
    let base = self.source.as_deref().and_then(Path::parent).unwrap_or(Path::new("."));
    Some(base.join(fixtures))
  }
}
