use super::Session;
use crate::{
    Error, Result,
    prediction::{PredictionForm, PredictionOutcome},
};
use chrono::{DateTime, Duration, Utc};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};
use tracing::debug;
use uuid::Uuid;

/// Bounds on how long and how many sessions are kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionLimits {
    pub idle_timeout: Duration,
    pub max_sessions: usize,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::hours(1),
            max_sessions: 10_000,
        }
    }
}

/// In-memory session slots. A session is only stored once it has submitted a
/// prediction, and is dropped after `idle_timeout` without requests or when the
/// store is full and it is the least recently seen.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, Session>>>,
    limits: SessionLimits,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: SessionLimits) -> Self {
        Self {
            sessions: Arc::default(),
            limits,
        }
    }

    pub fn limits(&self) -> SessionLimits {
        self.limits
    }

    /// Returns the live session named `id`, or a fresh unsaved one.
    ///
    /// Nothing is inserted here, so page views alone never grow the store.
    pub fn load(&self, id: Option<&str>) -> Result<Session> {
        let id = id.map(str::trim).filter(|s| !s.is_empty());

        if let Some(id) = id {
            if let Some(session) = self.get(id)? {
                return Ok(session);
            }
        }

        let id = id.map(str::to_string).unwrap_or_else(|| Uuid::new_v4().to_string());
        debug!("Starting new session: {}", id);
        Ok(Session::new(id))
    }

    /// Looks up a stored session, refreshing its last access. Idle sessions are dropped.
    pub fn get(&self, id: &str) -> Result<Option<Session>> {
        let now = Utc::now();
        let mut sessions = self.lock()?;

        let idle = match sessions.get(id) {
            None => return Ok(None),
            Some(session) => session.is_idle(now, self.limits.idle_timeout),
        };

        if idle {
            debug!("Session expired: {}", id);
            sessions.remove(id);
            return Ok(None);
        }

        Ok(sessions.get_mut(id).map(|session| {
            session.last_seen = now;
            session.clone()
        }))
    }

    /// Overwrites the session's current result and form values, storing it if new.
    pub fn record(
        &self,
        id: &str,
        form: PredictionForm,
        outcome: PredictionOutcome,
    ) -> Result<Session> {
        let mut sessions = self.lock()?;
        Self::remove_idle(&mut sessions, Utc::now(), self.limits.idle_timeout);

        let session = sessions
            .entry(id.to_string())
            .or_insert_with(|| Session::new(id.to_string()));
        session.record(form, outcome);
        let session = session.clone();

        while sessions.len() > self.limits.max_sessions {
            let oldest = sessions
                .values()
                .filter(|s| s.id != id)
                .min_by_key(|s| s.last_seen)
                .map(|s| s.id.clone());

            match oldest {
                Some(oldest) => {
                    debug!("Session store full, evicting: {}", oldest);
                    sessions.remove(&oldest);
                }
                None => break,
            }
        }

        debug!(
            "Recorded {} prediction for session: {}",
            session
                .current
                .as_ref()
                .map(|c| c.outcome.source())
                .unwrap_or("no"),
            id
        );

        Ok(session)
    }

    /// Drops every session idle at `now`. Returns how many were removed.
    pub fn evict_idle(&self, now: DateTime<Utc>) -> Result<usize> {
        let mut sessions = self.lock()?;
        Ok(Self::remove_idle(&mut sessions, now, self.limits.idle_timeout))
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn remove_idle(
        sessions: &mut HashMap<String, Session>,
        now: DateTime<Utc>,
        idle_timeout: Duration,
    ) -> usize {
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_idle(now, idle_timeout));
        before - sessions.len()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Session>>> {
        self.sessions
            .lock()
            .map_err(|e| Error::internal(format!("Failed to lock session store: {}", e)))
    }
}
