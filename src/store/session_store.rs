// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-OverseerrMcp-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of overseerr-mcp and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;
use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;

use crate::model::{ResultSnapshot, SessionId};

pub const DEFAULT_MAX_SESSIONS: usize = 1024;

/// Well-known keys a session can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    LastSearchResults,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionValue {
    SearchResults(ResultSnapshot),
}

impl SessionValue {
    pub fn as_search_results(&self) -> Option<&ResultSnapshot> {
        match self {
            Self::SearchResults(snapshot) => Some(snapshot),
        }
    }
}

type SessionEntries = HashMap<SessionKey, SessionValue>;

/// Process-wide, in-memory session data.
///
/// Sessions appear on first write and are bounded by an LRU over session ids: once
/// `capacity` sessions exist, creating another one evicts the least recently touched
/// session with all of its keys. The lock is only held for the map operation itself.
#[derive(Debug)]
pub struct SessionStore {
    sessions: Mutex<LruCache<SessionId, SessionEntries>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(NonZeroUsize::new(DEFAULT_MAX_SESSIONS).unwrap_or(NonZeroUsize::MIN))
    }
}

impl SessionStore {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self { sessions: Mutex::new(LruCache::new(capacity)) }
    }

    pub fn capacity(&self) -> usize {
        self.sessions.lock().cap().get()
    }

    /// Number of sessions currently holding data.
    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains_session(&self, session_id: &SessionId) -> bool {
        self.sessions.lock().contains(session_id)
    }

    /// Store `value` under `key`, replacing whatever was there.
    pub fn set(&self, session_id: &SessionId, key: SessionKey, value: SessionValue) {
        let mut sessions = self.sessions.lock();
        if let Some(entries) = sessions.get_mut(session_id) {
            entries.insert(key, value);
            return;
        }

        let mut entries = SessionEntries::new();
        entries.insert(key, value);
        if let Some((evicted, _)) = sessions.push(session_id.clone(), entries) {
            log::warn!("session store full; evicted least recently used session {evicted}");
        }
    }

    pub fn get(&self, session_id: &SessionId, key: SessionKey) -> Option<SessionValue> {
        self.sessions.lock().get(session_id).and_then(|entries| entries.get(&key).cloned())
    }

    /// Drop every key of the session. Returns whether the session held anything.
    pub fn clear_session(&self, session_id: &SessionId) -> bool {
        self.sessions.lock().pop(session_id).is_some()
    }

    /// Drop a single key, leaving the session's other keys alone. Returns whether the key
    /// was present.
    pub fn clear_key(&self, session_id: &SessionId, key: SessionKey) -> bool {
        let mut sessions = self.sessions.lock();
        let Some(entries) = sessions.peek_mut(session_id) else {
            return false;
        };
        let removed = entries.remove(&key).is_some();
        if entries.is_empty() {
            sessions.pop(session_id);
        }
        removed
    }

    pub fn last_search(&self, session_id: &SessionId) -> Option<ResultSnapshot> {
        self.get(session_id, SessionKey::LastSearchResults)
            .and_then(|value| value.as_search_results().cloned())
    }

    /// Replace the session's search snapshot wholesale (also when `snapshot` is empty).
    pub fn store_search(&self, session_id: &SessionId, snapshot: ResultSnapshot) {
        self.set(session_id, SessionKey::LastSearchResults, SessionValue::SearchResults(snapshot));
    }
}
