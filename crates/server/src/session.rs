//! Per-browser form state.
//!
//! Each browser gets its own [`CustomerRecord`], identified by a UUID stored
//! in the [`SESSION_COOKIE`] cookie. Requests of one session are serialized
//! through the store's lock; sessions never see each other's values.

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, TimeDelta, Utc};
use engine::CustomerRecord;
use tokio::{sync::Mutex, task::JoinHandle, time::MissedTickBehavior};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "invoice_session";

#[derive(Debug)]
struct Session {
    form: CustomerRecord,
    touched_at: DateTime<Utc>,
}

/// Sessions kept when no cap is configured.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

#[derive(Clone, Debug)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
    idle_timeout: TimeDelta,
    max_sessions: usize,
}

impl SessionStore {
    /// Sessions untouched for longer than `idle_timeout` are dropped by
    /// [`SessionStore::evict_idle`]. At most `max_sessions` are kept; a new
    /// session beyond that replaces the least recently touched one.
    pub fn new(idle_timeout: TimeDelta, max_sessions: usize) -> Self {
        Self {
            sessions: Arc::default(),
            idle_timeout,
            max_sessions: max_sessions.max(1),
        }
    }

    /// Same as [`SessionStore::new`], with the timeout in minutes.
    pub fn with_idle_minutes(minutes: u32, max_sessions: usize) -> Self {
        Self::new(TimeDelta::minutes(i64::from(minutes)), max_sessions)
    }

    /// Run `f` on the form of session `id`, creating the session if it is
    /// unknown or `id` is `None`.
    ///
    /// Returns the session id actually used together with `f`'s result.
    pub async fn with_form<F, R>(&self, id: Option<Uuid>, f: F) -> (Uuid, R)
    where
        F: FnOnce(&mut CustomerRecord) -> R,
    {
        let now = Utc::now();
        let mut sessions = self.sessions.lock().await;

        let id = id.unwrap_or_else(Uuid::new_v4);
        if !sessions.contains_key(&id) && sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, session)| session.touched_at)
                .map(|(id, _)| *id);
            if let Some(oldest) = oldest {
                sessions.remove(&oldest);
                tracing::warn!(
                    "session limit of {} reached, dropped session {oldest}",
                    self.max_sessions
                );
            }
        }

        let session = sessions.entry(id).or_insert_with(|| {
            tracing::debug!("new form session {id}");
            Session {
                form: CustomerRecord::default(),
                touched_at: now,
            }
        });
        session.touched_at = now;

        (id, f(&mut session.form))
    }

    /// Drop every session idle for longer than the timeout. Returns how many
    /// were dropped.
    pub async fn evict_idle(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.lock().await;

        let before = sessions.len();
        sessions.retain(|_, session| now - session.touched_at <= self.idle_timeout);
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!("evicted {evicted} idle sessions");
        }
        evicted
    }

    /// Run [`SessionStore::evict_idle`] every `period` on a background task.
    pub fn spawn_eviction(&self, period: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                store.evict_idle().await;
            }
        })
    }

    /// Copy of the form currently stored for `id`.
    pub async fn snapshot(&self, id: Uuid) -> Option<CustomerRecord> {
        let sessions = self.sessions.lock().await;
        sessions.get(&id).map(|session| session.form.clone())
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_idle_minutes(60, DEFAULT_MAX_SESSIONS)
    }
}

pub(crate) fn session_id(jar: &CookieJar) -> Option<Uuid> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

pub(crate) fn remember(jar: CookieJar, id: Uuid) -> CookieJar {
    jar.add(
        Cookie::build((SESSION_COOKIE, id.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict),
    )
}
