//! Test utilities for the backend crate.
//!
//! Shared by unit tests and the integration suites under `tests/`, which
//! enable the `test-support` feature.

use std::sync::{Arc, Mutex, PoisonError};

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use argon2::Params;
use chrono::{DateTime, Duration, Local, Utc};
use mockable::{Clock, DefaultClock};

use crate::inbound::http::SESSION_COOKIE;
use crate::inbound::http::state::{HttpState, ServiceDeps};
use crate::outbound::credentials::{Argon2PasswordHasher, RandomSessionTokens};
use crate::outbound::memory::InMemoryStore;

/// Clock that only moves when told to.
///
/// # Examples
/// ```
/// use backend::test_support::ManualClock;
/// use chrono::Duration;
/// use mockable::Clock;
///
/// let clock = ManualClock::default();
/// let before = clock.utc();
/// clock.advance(Duration::seconds(1));
/// assert_eq!(clock.utc() - before, Duration::seconds(1));
/// ```
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::starting_at(DefaultClock.utc())
    }
}

impl ManualClock {
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// argon2id with the cheapest accepted parameters.
pub fn fast_hasher() -> Argon2PasswordHasher {
    Argon2PasswordHasher::with_params(Params::new(8, 1, 1, None).unwrap_or_default())
}

/// HTTP state over a fresh in-memory store, returned alongside it.
pub fn in_memory_state(clock: Arc<dyn Clock>) -> (Arc<InMemoryStore>, HttpState) {
    let store = Arc::new(InMemoryStore::new());
    let state = HttpState::from_deps(ServiceDeps {
        users: store.clone(),
        follows: store.clone(),
        tweets: store.clone(),
        hasher: Arc::new(fast_hasher()),
        tokens: Arc::new(RandomSessionTokens),
        clock,
    });
    (store, state)
}

/// Cookie session middleware with a throwaway key and `Secure` disabled.
pub fn session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}
