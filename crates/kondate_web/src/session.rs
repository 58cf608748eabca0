//! Per-browser session registry.
//!
//! # Responsibility
//! - Own one `SessionState` per browser session, keyed by a cookie id.
//! - Create sessions on first use; drop them on explicit end or when idle.
//!
//! # Invariants
//! - Sessions never share state.
//! - The registry lock is held only for one synchronous planner step.
//! - A session untouched for `idle_timeout` is gone before the next access
//!   runs, so the map is bounded by the sessions active within that window.

use kondate_core::{CalendarDate, SessionState};
use log::info;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "kondate_session";
/// Idle time after which a session is dropped.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(12 * 60 * 60);

/// Supplies "today" for new sessions.
pub type Clock = Arc<dyn Fn() -> CalendarDate + Send + Sync>;

/// Clock backed by the local system date.
pub fn system_clock() -> Clock {
    Arc::new(|| CalendarDate::new(chrono::Local::now().date_naive()).unwrap_or_default())
}

/// Result of running one closure against a session.
#[derive(Debug)]
pub struct SessionAccess<T> {
    pub id: Uuid,
    /// `true` when the session did not exist before this access.
    pub created: bool,
    pub value: T,
}

struct SessionEntry {
    state: SessionState,
    last_seen: Instant,
}

/// Shared map of live sessions.
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<Mutex<HashMap<Uuid, SessionEntry>>>,
    clock: Clock,
    idle_timeout: Duration,
}

impl SessionRegistry {
    pub fn new(clock: Clock) -> Self {
        Self::with_idle_timeout(clock, DEFAULT_IDLE_TIMEOUT)
    }

    pub fn with_idle_timeout(clock: Clock, idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            clock,
            idle_timeout,
        }
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Runs `f` on the session `id`, creating a fresh session when the id is
    /// missing, unknown or expired.
    pub fn with_session<T>(
        &self,
        id: Option<Uuid>,
        f: impl FnOnce(&mut SessionState) -> T,
    ) -> SessionAccess<T> {
        self.with_session_at(Instant::now(), id, f)
    }

    /// Same as `with_session`, with `now` as the access time.
    ///
    /// Idle sessions are evicted before `id` is looked up.
    pub fn with_session_at<T>(
        &self,
        now: Instant,
        id: Option<Uuid>,
        f: impl FnOnce(&mut SessionState) -> T,
    ) -> SessionAccess<T> {
        let mut sessions = self.lock();
        self.evict_idle(&mut sessions, now);

        let (id, created) = match id {
            Some(id) if sessions.contains_key(&id) => (id, false),
            _ => (Uuid::new_v4(), true),
        };
        let entry = sessions.entry(id).or_insert_with(|| SessionEntry {
            state: SessionState::new((self.clock)()),
            last_seen: now,
        });
        entry.last_seen = entry.last_seen.max(now);
        let value = f(&mut entry.state);
        if created {
            info!(
                "event=session_start module=web status=ok live_sessions={}",
                sessions.len()
            );
        }
        SessionAccess { id, created, value }
    }

    /// Drops the session `id`. Returns whether it existed.
    pub fn end(&self, id: Uuid) -> bool {
        let mut sessions = self.lock();
        let existed = sessions.remove(&id).is_some();
        info!(
            "event=session_end module=web status=ok existed={} live_sessions={}",
            existed,
            sessions.len()
        );
        existed
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn evict_idle(&self, sessions: &mut HashMap<Uuid, SessionEntry>, now: Instant) {
        let before = sessions.len();
        sessions.retain(|_, entry| {
            now.saturating_duration_since(entry.last_seen) < self.idle_timeout
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(
                "event=session_evict module=web status=ok evicted={} live_sessions={}",
                evicted,
                sessions.len()
            );
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, SessionEntry>> {
        // A panicking step leaves plain data behind; keep serving.
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Extracts the session id from a `Cookie` header value.
pub fn session_id_from_cookie(header: &str) -> Option<Uuid> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

/// `Set-Cookie` value binding the browser to session `id`.
pub fn session_cookie(id: Uuid) -> String {
    format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax")
}

/// `Set-Cookie` value clearing the session cookie.
pub fn expired_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
