//! UI-state controllers for Chirp clients.
//!
//! Each controller is a plain state machine. Host events (clicks, scrolls,
//! keystrokes, responses) go in through methods; requests to perform come
//! out as [`api::ApiRequest`] values; `render` returns what to draw. None
//! of them perform I/O or read the clock themselves.
//!
//! ```
//! use client_state::{FollowToggle, TweetCompose};
//! use uuid::Uuid;
//!
//! let mut toggle = FollowToggle::new(Uuid::nil(), false);
//! assert_eq!(toggle.render().label, "Follow!");
//! let request = toggle.click().expect("follow request");
//! assert_eq!(request.method().to_string(), "POST");
//!
//! let mut form = TweetCompose::new();
//! form.set_body("first!");
//! assert_eq!(form.render().chars_remaining, 274);
//! ```

pub mod api;
pub mod follow_toggle;
pub mod infinite_tweets;
pub mod tweet_compose;
pub mod users_search;

pub use follow_toggle::{FollowButton, FollowState, FollowToggle};
pub use infinite_tweets::{InfiniteTweets, TweetListView};
pub use tweet_compose::{ComposeView, TweetCompose};
pub use users_search::{IssuedQuery, QueryTicket, SearchRow, SearchView, UsersSearch};
