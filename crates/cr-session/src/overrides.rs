//! Per-session model overrides.
//!
//! The router writes the model it chose against the caller's session id so
//! that a host can pin follow-up turns to it.

use crate::error::{Result, SessionError};
use chrono::{DateTime, Utc};
use cr_router::Tier;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOverride {
    pub model: String,
    pub tier: Tier,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct SessionOverrideStore {
    entries: Mutex<HashMap<String, SessionOverride>>,
}

impl SessionOverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `model` for a session, replacing any previous entry.
    pub fn set(&self, session_id: &str, model: &str, tier: Tier) -> Result<SessionOverride> {
        let session_id = validate(session_id)?;
        let entry = SessionOverride {
            model: model.to_string(),
            tier,
            updated_at: Utc::now(),
        };
        tracing::debug!(session_id, model, %tier, "session model override set");
        self.entries.lock().unwrap().insert(session_id.to_string(), entry.clone());
        Ok(entry)
    }

    pub fn get(&self, session_id: &str) -> Option<SessionOverride> {
        self.entries.lock().unwrap().get(session_id).cloned()
    }

    /// Remove a session's override, returning it if one existed.
    pub fn clear(&self, session_id: &str) -> Option<SessionOverride> {
        self.entries.lock().unwrap().remove(session_id)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write all overrides to `path` as a JSON object keyed by session id.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let sorted: BTreeMap<String, SessionOverride> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let json = serde_json::to_string_pretty(&sorted)?;
        std::fs::write(path.as_ref(), json)?;
        tracing::info!(path = %path.as_ref().display(), count = sorted.len(), "session overrides saved");
        Ok(())
    }

    /// Load a store previously written by [`save_to`](Self::save_to).
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let entries: HashMap<String, SessionOverride> = serde_json::from_str(&content)?;
        if let Some(bad) = entries.keys().find(|k| k.trim().is_empty()) {
            return Err(SessionError::InvalidSessionId(bad.clone()));
        }
        tracing::info!(path = %path.as_ref().display(), count = entries.len(), "session overrides loaded");
        Ok(Self { entries: Mutex::new(entries) })
    }
}

fn validate(session_id: &str) -> Result<&str> {
    if session_id.trim().is_empty() {
        return Err(SessionError::InvalidSessionId(session_id.to_string()));
    }
    Ok(session_id)
}
