//! Tests for the cached event data store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use formcheck::{
    failure_message, is_failed, team_name, EventApiConfig, EventDataStore, EventSource, FetchError,
};
use serde_json::{json, Value};

/// Serves canned payloads keyed by `"<code>/<resource>"`.
struct CannedSource {
    payloads: HashMap<String, Value>,
    fetches: AtomicUsize,
}

impl CannedSource {
    fn new(payloads: impl IntoIterator<Item = (&'static str, Value)>) -> Self {
        Self {
            payloads: payloads
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
            fetches: AtomicUsize::new(0),
        }
    }
}

impl EventSource for CannedSource {
    fn fetch(&self, code: &str, resource: &str) -> Result<Value, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.payloads
            .get(&format!("{code}/{resource}"))
            .cloned()
            .ok_or_else(|| FetchError::new(resource, 404, "Not Found"))
    }
}

fn teams() -> Value {
    json!([
        {"key": "frc254", "team_number": 254, "nickname": "The Cheesy Poofs"},
        {"key": "frc1678", "team_number": 1678, "nickname": "Citrus Circuits"}
    ])
}

#[test]
fn test_team_lookup_from_loaded_event() {
    let store = EventDataStore::new(CannedSource::new([("2024cur/teams", teams())]));

    let loaded = store.load("2024cur", "teams").unwrap();
    let list = loaded.data.as_array().map(Vec::as_slice);

    assert_eq!(team_name(1678, list), "Citrus Circuits");
    assert_eq!(team_name(9999, list), "No name available");
}

#[test]
fn test_offline_load_uses_cache_per_resource() {
    let store = EventDataStore::new(CannedSource::new([
        ("2024cur/teams", teams()),
        ("2024cur/matches", json!([{"key": "2024cur_qm1"}])),
    ]));

    store.load("2024cur", "teams").unwrap();

    let offline_teams = store.load("", "teams").unwrap();
    assert_eq!(offline_teams.code, "2024cur");
    assert_eq!(offline_teams.data, teams());

    let offline_matches = store.load("", "matches").unwrap();
    assert_eq!(offline_matches.data, json!({}));
    assert_eq!(store.source().fetches.load(Ordering::SeqCst), 1);
}

#[test]
fn test_api_error_payload_keeps_previous_event() {
    let store = EventDataStore::new(CannedSource::new([
        ("2024cur/teams", teams()),
        ("1999xx/teams", json!({"Error": "Invalid event key"})),
    ]));

    store.load("2024cur", "teams").unwrap();
    let failed = store.load("1999xx", "teams").unwrap();

    assert_eq!(failed.code, "1999xx");
    assert!(is_failed(&failed.data));
    assert_eq!(failure_message(&failed.data), Some("Invalid event key"));

    let offline = store.load("", "teams").unwrap();
    assert_eq!(offline.code, "2024cur");
    assert!(!is_failed(&offline.data));
}

#[test]
fn test_transport_failure_is_returned() {
    let store = EventDataStore::new(CannedSource::new([]));
    let err = store.load("2024cur", "rankings").unwrap_err();
    assert_eq!(
        err,
        FetchError {
            resource: "rankings".to_string(),
            status: 404,
            status_text: "Not Found".to_string(),
        }
    );
    assert_eq!(err.to_string(), "Fetch failed (rankings): HTTP 404 (Not Found)");
}

#[test]
fn test_concurrent_loads() {
    let store = Arc::new(EventDataStore::new(CannedSource::new([("2024cur/teams", teams())])));

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let code = if i % 2 == 0 { "2024cur" } else { "" };
                store.load(code, "teams").unwrap()
            })
        })
        .collect();

    for handle in handles {
        let loaded = handle.join().unwrap();
        assert!(loaded.data == teams() || loaded.data == json!({}));
    }
    assert_eq!(store.event_code(), "2024cur");
}

#[test]
fn test_api_config_urls() {
    let config = EventApiConfig::default().with_api_key("key");
    assert_eq!(
        config.request_url("2024cur", "matches"),
        "https://www.thebluealliance.com/api/v3/event/2024cur/matches/simple"
    );
    assert_eq!(config.auth_header(), Some(("X-TBA-Auth-Key", "key")));
}
