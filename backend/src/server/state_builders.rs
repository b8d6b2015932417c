//! Builds the HTTP state from Diesel repositories or the in-memory store.

use std::sync::Arc;

use backend::inbound::http::state::{HttpState, ServiceDeps};
use backend::outbound::credentials::{Argon2PasswordHasher, RandomSessionTokens};
use backend::outbound::memory::InMemoryStore;
use backend::outbound::persistence::{
    DieselFollowRepository, DieselTweetRepository, DieselUserRepository,
};
use mockable::DefaultClock;
use tracing::warn;

use super::ServerConfig;

pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    let hasher = Arc::new(Argon2PasswordHasher::default());
    let tokens = Arc::new(RandomSessionTokens);
    let clock = Arc::new(DefaultClock);
    match &config.db_pool {
        Some(pool) => HttpState::from_deps(ServiceDeps {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            follows: Arc::new(DieselFollowRepository::new(pool.clone())),
            tweets: Arc::new(DieselTweetRepository::new(pool.clone())),
            hasher,
            tokens,
            clock,
        }),
        None => {
            warn!("no database configured; data lives in memory and is lost on exit");
            let store = Arc::new(InMemoryStore::new());
            HttpState::from_deps(ServiceDeps {
                users: store.clone(),
                follows: store.clone(),
                tweets: store,
                hasher,
                tokens,
                clock,
            })
        }
    }
}
