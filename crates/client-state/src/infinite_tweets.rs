//! Infinite-scroll tweet list.
//!
//! The host reports how far the viewport is from the end of the list; once
//! that distance falls within the threshold the list asks for the next page.
//! At most one page request is outstanding, pages are appended in arrival
//! order, and fetching stops after the first short page.

use pagination::DEFAULT_LIMIT;

use crate::api::{ApiRequest, TweetDto, TweetPage, TweetSource};

/// Distance in pixels from the list end that triggers a fetch.
pub const DEFAULT_SCROLL_THRESHOLD: u32 = 50;

/// What the list should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TweetListView<'a> {
    /// Tweets, newest first.
    pub tweets: &'a [TweetDto],
    /// Whether a page request is outstanding.
    pub loading: bool,
    /// Whether the end of the collection was reached.
    pub exhausted: bool,
}

/// Paginated tweet list for a feed or profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfiniteTweets {
    source: TweetSource,
    limit: u32,
    threshold: u32,
    offset: u32,
    tweets: Vec<TweetDto>,
    in_flight: bool,
    exhausted: bool,
}

impl InfiniteTweets {
    /// Empty list drawing from `source` in pages of the server default size.
    #[must_use]
    pub const fn new(source: TweetSource) -> Self {
        Self {
            source,
            limit: DEFAULT_LIMIT,
            threshold: DEFAULT_SCROLL_THRESHOLD,
            offset: 0,
            tweets: Vec::new(),
            in_flight: false,
            exhausted: false,
        }
    }

    /// Use pages of `limit` tweets.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Fetch when within `threshold` pixels of the end.
    #[must_use]
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Offset the next page starts at.
    #[must_use]
    pub const fn offset(&self) -> u32 {
        self.offset
    }

    /// Whether a page request is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Scroll event with the remaining distance to the list end.
    pub fn on_scroll(&mut self, distance_to_end: u32) -> Option<ApiRequest> {
        if distance_to_end <= self.threshold {
            self.fetch_more()
        } else {
            None
        }
    }

    /// Ask for the next page unless one is in flight or the list is done.
    ///
    /// # Examples
    /// ```
    /// use client_state::InfiniteTweets;
    /// use client_state::api::TweetSource;
    ///
    /// let mut list = InfiniteTweets::new(TweetSource::Feed);
    /// assert!(list.fetch_more().is_some());
    /// assert!(list.fetch_more().is_none());
    /// ```
    pub fn fetch_more(&mut self) -> Option<ApiRequest> {
        if self.in_flight || self.exhausted {
            return None;
        }
        self.in_flight = true;
        Some(ApiRequest::FetchTweets {
            source: self.source,
            offset: self.offset,
            limit: self.limit,
        })
    }

    /// A page arrived. Responses with no request outstanding are dropped;
    /// returns whether the page was applied.
    pub fn received(&mut self, page: TweetPage) -> bool {
        if !self.in_flight {
            return false;
        }
        self.in_flight = false;
        let count = u32::try_from(page.data.len()).unwrap_or(u32::MAX);
        if count < self.limit {
            self.exhausted = true;
        }
        self.offset = self.offset.saturating_add(count);
        self.tweets.extend(page.data);
        true
    }

    /// The page request failed; scrolling may retry.
    pub fn failed(&mut self) {
        self.in_flight = false;
    }

    /// A tweet composed locally goes first.
    ///
    /// Later pages only shift when the server lists the tweet in this
    /// collection, i.e. on its author's profile. A feed never contains the
    /// viewer's own tweets.
    pub fn prepend(&mut self, tweet: TweetDto) {
        if self.source == TweetSource::Profile(tweet.author.id) {
            self.offset = self.offset.saturating_add(1);
        }
        self.tweets.insert(0, tweet);
    }

    /// Current list contents and flags.
    #[must_use]
    pub fn render(&self) -> TweetListView<'_> {
        TweetListView {
            tweets: &self.tweets,
            loading: self.in_flight,
            exhausted: self.exhausted,
        }
    }
}
