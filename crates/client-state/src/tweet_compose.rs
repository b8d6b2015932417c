//! Tweet composition form.

use uuid::Uuid;

use crate::api::{ApiErrorDto, ApiRequest, NewTweet, TweetDto};

/// Longest accepted body, in characters.
pub const MAX_TWEET_CHARS: usize = 280;

const TOO_LONG: &str = "Tweet cannot be more than 280 characters.";

/// What the form should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeView {
    /// Characters left before the limit; negative once exceeded.
    pub chars_remaining: i64,
    /// Submit button text.
    pub submit_label: &'static str,
    /// Whether submitting is currently refused.
    pub submit_disabled: bool,
    /// Validation or server messages.
    pub errors: Vec<String>,
    /// Selected mention, when any.
    pub mentioned_user_id: Option<Uuid>,
}

/// Compose box state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TweetCompose {
    body: String,
    mention: Option<Uuid>,
    in_flight: bool,
    errors: Vec<String>,
}

impl TweetCompose {
    /// Blank form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn char_count(&self) -> usize {
        self.body.chars().count()
    }

    fn too_long(&self) -> bool {
        self.char_count() > MAX_TWEET_CHARS
    }

    /// The body text changed.
    pub fn set_body(&mut self, body: &str) {
        body.clone_into(&mut self.body);
        self.errors.clear();
        if self.too_long() {
            self.errors.push(TOO_LONG.to_owned());
        }
    }

    /// Pick or clear the mentioned user.
    pub fn select_mention(&mut self, user_id: Option<Uuid>) {
        self.mention = user_id;
    }

    fn can_submit(&self) -> bool {
        !self.in_flight && !self.body.trim().is_empty() && !self.too_long()
    }

    /// Submit the form, returning the request to send.
    ///
    /// # Examples
    /// ```
    /// use client_state::TweetCompose;
    ///
    /// let mut form = TweetCompose::new();
    /// assert!(form.submit().is_none());
    /// form.set_body("hello");
    /// assert!(form.submit().is_some());
    /// assert_eq!(form.render().submit_label, "Posting...");
    /// ```
    pub fn submit(&mut self) -> Option<ApiRequest> {
        if !self.can_submit() {
            return None;
        }
        self.in_flight = true;
        self.errors.clear();
        Some(ApiRequest::PostTweet(NewTweet {
            body: self.body.clone(),
            mentioned_user_id: self.mention,
        }))
    }

    /// The tweet was created. Clears the form and hands the tweet on for
    /// prepending to the visible list.
    pub fn succeeded(&mut self, tweet: TweetDto) -> TweetDto {
        *self = Self::default();
        tweet
    }

    /// Creation failed; keep the draft and show the server's messages.
    pub fn failed(&mut self, error: &ApiErrorDto) {
        self.in_flight = false;
        self.errors = error.messages();
    }

    /// Counter, button and messages for the current state.
    #[must_use]
    pub fn render(&self) -> ComposeView {
        let used = i64::try_from(self.char_count()).unwrap_or(i64::MAX);
        let limit = i64::try_from(MAX_TWEET_CHARS).unwrap_or(i64::MAX);
        ComposeView {
            chars_remaining: limit.saturating_sub(used),
            submit_label: if self.in_flight { "Posting..." } else { "Post Tweet!" },
            submit_disabled: !self.can_submit(),
            errors: self.errors.clone(),
            mentioned_user_id: self.mention,
        }
    }
}
