//! Blocking JSON transport shared by both store clients
//!
//! Every request carries a bearer token and a bounded timeout. Non-2xx
//! responses, transport failures and undecodable bodies all come back as
//! `DeckError::Upstream` so callers see one error shape per store.

use crate::core::error::{DeckError, DeckResult};
use crate::release::model::Store;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Authenticated HTTP client bound to one store API
pub struct HttpClient {
  agent: ureq::Agent,
  store: Store,
  base_url: String,
  token: String,
}

impl HttpClient {
  pub fn new(store: Store, base_url: &str, token: String, timeout: Duration) -> Self {
    let agent = ureq::AgentBuilder::new()
      .timeout(timeout)
      .user_agent(USER_AGENT)
      .build();

    Self {
      agent,
      store,
      base_url: base_url.trim_end_matches('/').to_string(),
      token,
    }
  }

  fn request(&self, method: &str, path: &str, query: &[(&str, String)]) -> ureq::Request {
    let url = format!("{}{}", self.base_url, path);
    let mut request = self
      .agent
      .request(method, &url)
      .set("Authorization", &format!("Bearer {}", self.token))
      .set("Accept", "application/json");
    for (key, value) in query {
      request = request.query(key, value);
    }
    request
  }

  /// GET a JSON document
  pub fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> DeckResult<T> {
    tracing::debug!(store = %self.store, path, "GET");
    let response = self.request("GET", path, query).call();
    self.decode(path, response)
  }

  /// Send a JSON body (or none) with the given method and decode the reply
  pub fn send_json<B: Serialize, T: DeserializeOwned>(&self, method: &str, path: &str, body: Option<&B>) -> DeckResult<T> {
    tracing::debug!(store = %self.store, method, path, "request");
    let request = self.request(method, path, &[]);
    let response = match body {
      Some(body) => {
        let payload = serde_json::to_string(body)?;
        request.set("Content-Type", "application/json").send_string(&payload)
      }
      // Google rejects a bodiless POST without Content-Length (411)
      None => request.send_bytes(&[]),
    };
    self.decode(path, response)
  }

  /// DELETE a resource, ignoring any response body
  pub fn delete(&self, path: &str) -> DeckResult<()> {
    tracing::debug!(store = %self.store, path, "DELETE");
    self.request("DELETE", path, &[]).call().map_err(|e| self.map_error(path, e))?;
    Ok(())
  }

  fn decode<T: DeserializeOwned>(&self, path: &str, response: Result<ureq::Response, ureq::Error>) -> DeckResult<T> {
    let response = response.map_err(|e| self.map_error(path, e))?;
    let body = response
      .into_string()
      .map_err(|e| DeckError::upstream(self.store, None, format!("failed to read response from {}: {}", path, e)))?;

    serde_json::from_str(&body)
      .map_err(|e| DeckError::upstream(self.store, None, format!("malformed JSON from {}: {}", path, e)))
  }

  fn map_error(&self, path: &str, err: ureq::Error) -> DeckError {
    match err {
      ureq::Error::Status(code, resp) => {
        let status_text = resp.status_text().to_string();
        let body = resp.into_string().unwrap_or_default();
        DeckError::upstream(self.store, Some(code), format!("{} - {}", status_text, body.trim()))
      }
      ureq::Error::Transport(transport) => {
        DeckError::upstream(self.store, None, format!("request to {} failed: {}", path, transport))
      }
    }
  }
}
