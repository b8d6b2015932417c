//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only ever see driving
//! ports, so they can be exercised with mocks and no I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    FeedQuery, FollowCommand, FollowQuery, FollowRepository, LoginService, PasswordHasher,
    SessionTokenSource, SignupService, TweetCommand, TweetRepository, UserRepository, UsersQuery,
};
use crate::domain::{AccountService, DirectoryService, SocialGraphService, TweetService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub signup: Arc<dyn SignupService>,
    pub users: Arc<dyn UsersQuery>,
    pub follows: Arc<dyn FollowCommand>,
    pub follow_query: Arc<dyn FollowQuery>,
    pub tweets: Arc<dyn TweetCommand>,
    pub feed: Arc<dyn FeedQuery>,
}

/// Repositories and collaborators the domain services are built from.
pub struct ServiceDeps<U, F, T, H, S> {
    pub users: Arc<U>,
    pub follows: Arc<F>,
    pub tweets: Arc<T>,
    pub hasher: Arc<H>,
    pub tokens: Arc<S>,
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    /// Build every domain service over the given adapters.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::inbound::http::state::{HttpState, ServiceDeps};
    /// use backend::outbound::credentials::{Argon2PasswordHasher, RandomSessionTokens};
    /// use backend::outbound::memory::InMemoryStore;
    /// use mockable::DefaultClock;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let _state = HttpState::from_deps(ServiceDeps {
    ///     users: store.clone(),
    ///     follows: store.clone(),
    ///     tweets: store,
    ///     hasher: Arc::new(Argon2PasswordHasher::default()),
    ///     tokens: Arc::new(RandomSessionTokens),
    ///     clock: Arc::new(DefaultClock),
    /// });
    /// ```
    pub fn from_deps<U, F, T, H, S>(deps: ServiceDeps<U, F, T, H, S>) -> Self
    where
        U: UserRepository + 'static,
        F: FollowRepository + 'static,
        T: TweetRepository + 'static,
        H: PasswordHasher + 'static,
        S: SessionTokenSource + 'static,
    {
        let ServiceDeps {
            users,
            follows,
            tweets,
            hasher,
            tokens,
            clock,
        } = deps;
        let accounts = Arc::new(AccountService::new(
            users.clone(),
            hasher,
            tokens,
            clock.clone(),
        ));
        let graph = Arc::new(SocialGraphService::new(users.clone(), follows.clone()));
        let tweet_service = Arc::new(TweetService::new(users.clone(), tweets.clone(), clock));
        let directory = Arc::new(DirectoryService::new(users, follows, tweets));
        Self {
            login: accounts.clone(),
            signup: accounts,
            users: directory,
            follows: graph.clone(),
            follow_query: graph,
            tweets: tweet_service.clone(),
            feed: tweet_service,
        }
    }
}
