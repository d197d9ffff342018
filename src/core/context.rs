//! Command context - build once, pass everywhere
//!
//! ```text
//! main.rs:
//!   DeckContext::build() -> &DeckContext
//!   |
//!   v
//! commands/releases.rs, promote.rs, etc:
//!   fn run_*(ctx: &DeckContext, ...)
//! ```
//!
//! Store clients are constructed here, once. With a fixture directory (from
//! `--fixtures` or `stores.fixtures`) both stores are served from disk;
//! otherwise each live client needs its token variable, and a missing token
//! only fails the commands that touch that store.

use crate::core::config::DeckConfig;
use crate::core::error::{ConfigError, DeckError, DeckResult};
use crate::release::model::Store;
use crate::stores::{AppStoreConnectApi, AppStoreConnectClient, FixtureStore, GooglePlayApi, GooglePlayClient};
use std::path::Path;
use std::sync::Arc;

/// Where store data comes from
enum Backend {
  Fixtures(FixtureStore),
  Live {
    google: Option<GooglePlayClient>,
    apple: Option<AppStoreConnectClient>,
  },
}

pub struct DeckContext {
  pub config: Arc<DeckConfig>,

  backend: Backend,
}

impl DeckContext {
  /// Load configuration and construct store clients
  ///
  /// `config_path` overrides the config search; `fixtures` overrides any
  /// configured fixture directory.
  pub fn build(root: &Path, config_path: Option<&Path>, fixtures: Option<&Path>) -> DeckResult<Self> {
    let config = match config_path {
      Some(path) => DeckConfig::load_from(path)?,
      None => DeckConfig::load(root)?,
    };
    Ok(Self::from_config(config, fixtures))
  }

  pub fn from_config(config: DeckConfig, fixtures: Option<&Path>) -> Self {
    let fixtures_dir = fixtures.map(Path::to_path_buf).or_else(|| config.fixtures_dir());

    let backend = match fixtures_dir {
      Some(dir) => {
        tracing::debug!(dir = %dir.display(), "using fixture store");
        Backend::Fixtures(FixtureStore::new(dir))
      }
      None => {
        let stores = &config.stores;
        let google = read_token(stores.token_env(Store::Google))
          .map(|token| GooglePlayClient::new(&stores.google_base_url, token, stores.timeout()));
        let apple = read_token(stores.token_env(Store::Apple))
          .map(|token| AppStoreConnectClient::new(&stores.apple_base_url, token, stores.timeout()));
        Backend::Live { google, apple }
      }
    };

    Self {
      config: Arc::new(config),
      backend,
    }
  }

  /// Google Play client, or a config error naming the missing token
  pub fn google(&self) -> DeckResult<&dyn GooglePlayApi> {
    match &self.backend {
      Backend::Fixtures(store) => Ok(store),
      Backend::Live { google: Some(client), .. } => Ok(client),
      Backend::Live { google: None, .. } => Err(self.missing_credential(Store::Google)),
    }
  }

  /// App Store Connect client, or a config error naming the missing token
  pub fn apple(&self) -> DeckResult<&dyn AppStoreConnectApi> {
    match &self.backend {
      Backend::Fixtures(store) => Ok(store),
      Backend::Live { apple: Some(client), .. } => Ok(client),
      Backend::Live { apple: None, .. } => Err(self.missing_credential(Store::Apple)),
    }
  }

  pub fn uses_fixtures(&self) -> bool {
    matches!(self.backend, Backend::Fixtures(_))
  }

  fn missing_credential(&self, store: Store) -> DeckError {
    DeckError::Config(ConfigError::MissingCredential {
      store,
      env_var: self.config.stores.token_env(store).to_string(),
    })
  }
}

fn read_token(var: &str) -> Option<String> {
  std::env::var(var).ok().filter(|t| !t.trim().is_empty())
}
