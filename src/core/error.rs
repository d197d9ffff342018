//! Error types for shipdeck with contextual messages and exit codes
//!
//! One error type covers every failure a normalization, promotion or command
//! can produce. Each variant knows its exit code, a stable `kind` string for
//! JSON output, and (where useful) a help hint for the user.

use crate::release::model::Store;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for shipdeck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, missing files)
  User = 1,
  /// System error (store API, network, I/O, remote state)
  System = 2,
  /// Validation failure (bad promotion request)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for shipdeck
#[derive(Debug)]
pub enum DeckError {
  /// Configuration errors
  Config(ConfigError),

  /// Request validation errors, raised before any remote call
  Validation(ValidationError),

  /// Store API errors (non-2xx, malformed JSON, transport, timeout)
  Upstream(UpstreamError),

  /// Remote state errors raised inside an open edit transaction
  State(StateError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl DeckError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    DeckError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    DeckError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Shorthand for an upstream error carrying an HTTP status
  pub fn upstream(store: Store, status: Option<u16>, message: impl Into<String>) -> Self {
    DeckError::Upstream(UpstreamError {
      store,
      status,
      message: message.into(),
    })
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      DeckError::Message { message, context, help } => DeckError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      DeckError::Upstream(UpstreamError { store, status, message }) => DeckError::Upstream(UpstreamError {
        store,
        status,
        message: format!("{}: {}", ctx_str, message),
      }),
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      DeckError::Config(_) => ExitCode::User,
      DeckError::Validation(_) => ExitCode::Validation,
      DeckError::Upstream(_) => ExitCode::System,
      DeckError::State(_) => ExitCode::System,
      DeckError::Io(_) => ExitCode::System,
      DeckError::Message { .. } => ExitCode::User,
    }
  }

  /// Stable machine-readable category used in `--json` failures
  pub fn kind(&self) -> &'static str {
    match self {
      DeckError::Config(_) => "config",
      DeckError::Validation(_) => "validation",
      DeckError::Upstream(_) => "upstream",
      DeckError::State(_) => "state",
      DeckError::Io(_) => "io",
      DeckError::Message { .. } => "message",
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      DeckError::Config(e) => e.help_message(),
      DeckError::Upstream(e) => e.help_message(),
      DeckError::State(e) => e.help_message(),
      DeckError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for DeckError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DeckError::Config(e) => write!(f, "{}", e),
      DeckError::Validation(e) => write!(f, "{}", e),
      DeckError::Upstream(e) => write!(f, "{}", e),
      DeckError::State(e) => write!(f, "{}", e),
      DeckError::Io(e) => write!(f, "I/O error: {}", e),
      DeckError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for DeckError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      DeckError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for DeckError {
  fn from(err: io::Error) -> Self {
    DeckError::Io(err)
  }
}

impl From<String> for DeckError {
  fn from(msg: String) -> Self {
    DeckError::message(msg)
  }
}

impl From<&str> for DeckError {
  fn from(msg: &str) -> Self {
    DeckError::message(msg)
  }
}

impl From<ValidationError> for DeckError {
  fn from(err: ValidationError) -> Self {
    DeckError::Validation(err)
  }
}

impl From<ConfigError> for DeckError {
  fn from(err: ConfigError) -> Self {
    DeckError::Config(err)
  }
}

impl From<StateError> for DeckError {
  fn from(err: StateError) -> Self {
    DeckError::State(err)
  }
}

impl From<toml_edit::de::Error> for DeckError {
  fn from(err: toml_edit::de::Error) -> Self {
    DeckError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for DeckError {
  fn from(err: serde_json::Error) -> Self {
    DeckError::message(format!("JSON error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// shipdeck.toml not found
  NotFound { root: PathBuf },

  /// A field failed validation
  Invalid { field: String, reason: String },

  /// Group not present in configuration
  GroupNotFound { id: String },

  /// Group exists but has no link to the requested store
  StoreNotLinked { group: String, store: Store },

  /// Credential environment variable unset or empty
  MissingCredential { store: Store, env_var: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => Some("Run `shipdeck init` to create a configuration file.".to_string()),
      ConfigError::GroupNotFound { .. } => Some("Configured groups can be listed with `shipdeck groups`.".to_string()),
      ConfigError::StoreNotLinked { store, .. } => Some(format!(
        "Add a `{}` table to the group in shipdeck.toml to link it.",
        store
      )),
      ConfigError::MissingCredential { env_var, .. } => Some(format!(
        "export {}=<access token>, or point `stores.fixtures` at an offline fixture directory.",
        env_var
      )),
      ConfigError::Invalid { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { root } => {
        write!(
          f,
          "No shipdeck configuration found.\nExpected file: {}/shipdeck.toml",
          root.display()
        )
      }
      ConfigError::Invalid { field, reason } => write!(f, "Invalid config field '{}': {}", field, reason),
      ConfigError::GroupNotFound { id } => write!(f, "App group '{}' not found in configuration", id),
      ConfigError::StoreNotLinked { group, store } => {
        write!(f, "App group '{}' has no {} app linked", group, store)
      }
      ConfigError::MissingCredential { store, env_var } => {
        write!(f, "No {} access token: environment variable {} is not set", store, env_var)
      }
    }
  }
}

/// Promotion request validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
  /// A required identifier was empty
  MissingField { field: &'static str },

  /// Track name is not one of internal/alpha/beta/production
  InvalidTrack { name: String },

  /// Destination does not rank above source
  NotAnUpgrade { source: String, dest: String },

  /// Rollout percentage outside 1..=100
  RolloutOutOfRange { rollout: u32 },

  /// Promotion would replace a destination release with an equal or newer one
  WouldDowngrade {
    version: String,
    dest: String,
    dest_version: String,
  },
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ValidationError::MissingField { field } => write!(f, "{} is required", field),
      ValidationError::InvalidTrack { name } => write!(f, "Invalid track name '{}'", name),
      ValidationError::NotAnUpgrade { source, dest } => write!(
        f,
        "Destination track must be higher than source track ({} -> {})",
        source, dest
      ),
      ValidationError::RolloutOutOfRange { rollout } => write!(f, "Rollout must be 1-100 (got {})", rollout),
      ValidationError::WouldDowngrade {
        version,
        dest,
        dest_version,
      } => write!(
        f,
        "Release {} is not newer than {} already on {}",
        version, dest_version, dest
      ),
    }
  }
}

/// Uniform store API failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamError {
  pub store: Store,
  /// HTTP status, absent for transport/timeout/decoding failures
  pub status: Option<u16>,
  pub message: String,
}

impl UpstreamError {
  fn help_message(&self) -> Option<String> {
    match self.status {
      Some(401) | Some(403) => Some(format!(
        "Check that the {} access token is valid and has release-management access.",
        self.store
      )),
      Some(404) => Some("Check the package name / app id configured for this group.".to_string()),
      _ => None,
    }
  }
}

impl fmt::Display for UpstreamError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let api = match self.store {
      Store::Google => "Google Play API",
      Store::Apple => "App Store Connect API",
    };
    match self.status {
      Some(status) => write!(f, "{} error: {} - {}", api, status, self.message),
      None => write!(f, "{} error: {}", api, self.message),
    }
  }
}

/// Errors about remote state discovered mid-transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
  /// Source track has no release or no version codes
  NoSourceRelease { track: String },
}

impl StateError {
  fn help_message(&self) -> Option<String> {
    match self {
      StateError::NoSourceRelease { track } => Some(format!(
        "Upload a build to the {} track before promoting it.",
        track
      )),
    }
  }
}

impl fmt::Display for StateError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StateError::NoSourceRelease { track } => write!(f, "No release found on source track '{}'", track),
    }
  }
}

/// Result type alias for shipdeck
pub type DeckResult<T> = Result<T, DeckError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> DeckResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> DeckResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<DeckError>,
{
  fn context(self, ctx: impl Into<String>) -> DeckResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> DeckResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &DeckError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}

/// Structured failure body for `--json` mode
pub fn error_json(error: &DeckError) -> serde_json::Value {
  serde_json::json!({
    "ok": false,
    "error": {
      "kind": error.kind(),
      "message": error.to_string(),
    }
  })
}
