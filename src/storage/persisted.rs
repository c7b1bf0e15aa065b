//! Versioned envelope for persisted state
//!
//! Every persisted value is stored as:
//!
//! ```json
//! { "version": 1, "saved_at": "2026-10-19T08:00:00Z", "state": { ... } }
//! ```
//!
//! On load, an envelope whose `version` differs from the caller's, or whose
//! `state` no longer decodes into the caller's type, is removed and treated as
//! absent so the caller falls back to its defaults.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::{KeyValueStore, StorageError};

/// On-disk wrapper around a persisted value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub state: T,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: Option<u32>,
}

/// Write `state` under `key` wrapped in a versioned envelope
pub fn save<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    version: u32,
    state: &T,
) -> Result<(), StorageError> {
    let envelope = Envelope {
        version,
        saved_at: Utc::now(),
        state,
    };
    let json = serde_json::to_string(&envelope)?;
    store.set(key, &json)
}

/// Read the state under `key` if it was written with `version`
///
/// Read failures, foreign versions and undecodable payloads all yield `None`;
/// the last two also remove the stale entry.
pub fn load<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str, version: u32) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Failed to read persisted state");
            return None;
        }
    };

    let found = serde_json::from_str::<VersionProbe>(&raw)
        .ok()
        .and_then(|probe| probe.version);

    if found != Some(version) {
        tracing::warn!(
            key = %key,
            expected = version,
            found = ?found,
            "Discarding persisted state with mismatched version"
        );
        discard(store, key);
        return None;
    }

    match serde_json::from_str::<Envelope<T>>(&raw) {
        Ok(envelope) => Some(envelope.state),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Discarding undecodable persisted state");
            discard(store, key);
            None
        }
    }
}

fn discard(store: &dyn KeyValueStore, key: &str) {
    if let Err(e) = store.remove(key) {
        tracing::warn!(key = %key, error = %e, "Failed to remove stale persisted state");
    }
}
