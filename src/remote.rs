//! Event data fetched from a remote API, with a local cache fallback.
//!
//! The transport is abstracted behind [`EventSource`] so callers can plug in
//! any HTTP client; this module owns the caching rules and the payload
//! helpers. A failed lookup is usually signalled by the API inside the
//! payload (an `Error` member), not by the transport.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Default base URL of the event API.
pub const DEFAULT_BASE_URL: &str = "https://www.thebluealliance.com/api/v3";

/// Request header carrying the API key.
pub const AUTH_HEADER: &str = "X-TBA-Auth-Key";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "TBA_API_KEY";

/// Fallback returned by [`team_name`] when a team is not listed.
pub const NO_TEAM_NAME: &str = "No name available";

/// A transport-level fetch failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Fetch failed ({resource}): HTTP {status} ({status_text})")]
pub struct FetchError {
    pub resource: String,
    pub status: u16,
    pub status_text: String,
}

impl FetchError {
    pub fn new(resource: impl Into<String>, status: u16, status_text: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            status,
            status_text: status_text.into(),
        }
    }
}

/// Connection settings for the event API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl EventApiConfig {
    /// Reads the API key from the environment and uses the default base URL.
    pub fn from_env() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: std::env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty()),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Builds the request URL for `resource` of event `code`.
    ///
    /// ```rust
    /// use formcheck::EventApiConfig;
    ///
    /// let config = EventApiConfig::default();
    /// assert_eq!(
    ///     config.request_url("2024casj", "teams"),
    ///     "https://www.thebluealliance.com/api/v3/event/2024casj/teams/simple"
    /// );
    /// ```
    pub fn request_url(&self, code: &str, resource: &str) -> String {
        format!(
            "{}/event/{}/{}/simple",
            self.base_url.trim_end_matches('/'),
            code,
            resource
        )
    }

    /// Returns the auth header pair to send, if a key is configured.
    pub fn auth_header(&self) -> Option<(&'static str, &str)> {
        self.api_key.as_deref().map(|key| (AUTH_HEADER, key))
    }
}

impl Default for EventApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
        }
    }
}

/// Fetches one resource (`teams`, `matches`, ...) of an event.
pub trait EventSource: Send + Sync {
    fn fetch(&self, code: &str, resource: &str) -> Result<Value, FetchError>;
}

/// A loaded payload together with the event code it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventData {
    pub code: String,
    pub data: Value,
}

#[derive(Debug, Default)]
struct CacheState {
    event_code: String,
    payloads: HashMap<String, Value>,
}

/// Loads event data, caching every successful payload per resource.
pub struct EventDataStore<S> {
    source: S,
    state: RwLock<CacheState>,
}

impl<S: EventSource> EventDataStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: RwLock::new(CacheState::default()),
        }
    }

    /// Loads `resource` for event `code`.
    ///
    /// An empty `code` serves the cached payload (or `{}`) along with the
    /// code of the last successful fetch. Otherwise the source is queried;
    /// payloads that do not signal failure replace the cache entry and
    /// become the current event.
    ///
    /// # Errors
    ///
    /// Returns the source's `FetchError` unchanged.
    pub fn load(&self, code: &str, resource: &str) -> Result<EventData, FetchError> {
        if code.is_empty() {
            let state = self.state.read();
            return Ok(EventData {
                code: state.event_code.clone(),
                data: state
                    .payloads
                    .get(resource)
                    .cloned()
                    .unwrap_or_else(|| json!({})),
            });
        }

        let data = self.source.fetch(code, resource).map_err(|err| {
            tracing::warn!(error = %err, code, resource, "event data fetch failed");
            err
        })?;

        if is_failed(&data) {
            tracing::warn!(
                code,
                resource,
                api_error = failure_message(&data).unwrap_or_default(),
                "event API reported an error"
            );
        } else {
            let mut state = self.state.write();
            state.payloads.insert(resource.to_string(), data.clone());
            state.event_code = code.to_string();
        }

        Ok(EventData {
            code: code.to_string(),
            data,
        })
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the code of the last successfully loaded event.
    pub fn event_code(&self) -> String {
        self.state.read().event_code.clone()
    }

    /// Returns the cached payload for `resource`, if any.
    pub fn cached(&self, resource: &str) -> Option<Value> {
        self.state.read().payloads.get(resource).cloned()
    }
}

/// Returns true if the payload carries an `Error` member.
pub fn is_failed(payload: &Value) -> bool {
    payload.get("Error").is_some()
}

/// Returns the payload's error message, if any.
pub fn failure_message(payload: &Value) -> Option<&str> {
    payload.get("Error")?.as_str()
}

/// Looks up a team's nickname by number in a team list.
///
/// ```rust
/// use formcheck::team_name;
/// use serde_json::json;
///
/// let teams = vec![json!({"key": "frc254", "nickname": "The Cheesy Poofs"})];
/// assert_eq!(team_name(254, Some(teams.as_slice())), "The Cheesy Poofs");
/// assert_eq!(team_name(1, Some(teams.as_slice())), "No name available");
/// assert_eq!(team_name(254, None), "No name available");
/// ```
pub fn team_name(number: u32, teams: Option<&[Value]>) -> String {
    let key = format!("frc{}", number);
    teams
        .and_then(|teams| {
            teams
                .iter()
                .find(|team| team.get("key").and_then(Value::as_str) == Some(key.as_str()))
        })
        .and_then(|team| team.get("nickname"))
        .and_then(Value::as_str)
        .unwrap_or(NO_TEAM_NAME)
        .to_string()
}
