//! Follow button state machine.
//!
//! ```text
//! Unfollowed --click--> Following   --ok--> Followed
//!                                   --err-> Unfollowed
//! Followed   --click--> Unfollowing --ok--> Unfollowed
//!                                   --err-> Followed
//! ```

use uuid::Uuid;

use crate::api::{ApiRequest, FollowStatusDto};

/// Where a follow button stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowState {
    /// The viewer follows the user.
    Followed,
    /// The viewer does not follow the user.
    Unfollowed,
    /// A follow request is in flight.
    Following,
    /// An unfollow request is in flight.
    Unfollowing,
}

impl FollowState {
    /// Settled state for a known follow flag.
    #[must_use]
    pub const fn settled(following: bool) -> Self {
        if following {
            Self::Followed
        } else {
            Self::Unfollowed
        }
    }

    /// Whether a request is outstanding.
    #[must_use]
    pub const fn is_in_flight(self) -> bool {
        matches!(self, Self::Following | Self::Unfollowing)
    }
}

/// What the button should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowButton {
    /// Button text.
    pub label: &'static str,
    /// Whether clicks are accepted.
    pub disabled: bool,
}

/// Follow/unfollow toggle for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowToggle {
    user_id: Uuid,
    state: FollowState,
}

impl FollowToggle {
    /// Toggle for `user_id`, settled according to `following`.
    #[must_use]
    pub const fn new(user_id: Uuid, following: bool) -> Self {
        Self {
            user_id,
            state: FollowState::settled(following),
        }
    }

    /// User this toggle follows or unfollows.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> FollowState {
        self.state
    }

    /// Handle a click: start the opposite action.
    ///
    /// Returns `None` while a request is already in flight.
    ///
    /// # Examples
    /// ```
    /// use client_state::{FollowState, FollowToggle};
    /// use uuid::Uuid;
    ///
    /// let mut toggle = FollowToggle::new(Uuid::nil(), false);
    /// assert!(toggle.click().is_some());
    /// assert_eq!(toggle.state(), FollowState::Following);
    /// assert!(toggle.click().is_none());
    /// ```
    pub fn click(&mut self) -> Option<ApiRequest> {
        let user_id = self.user_id;
        let (next, request) = match self.state {
            FollowState::Unfollowed => (FollowState::Following, ApiRequest::Follow { user_id }),
            FollowState::Followed => (FollowState::Unfollowing, ApiRequest::Unfollow { user_id }),
            FollowState::Following | FollowState::Unfollowing => return None,
        };
        self.state = next;
        Some(request)
    }

    /// The in-flight request succeeded with the server's view of the edge.
    pub fn succeeded(&mut self, status: FollowStatusDto) {
        if self.state.is_in_flight() {
            self.state = FollowState::settled(status.following);
        }
    }

    /// The in-flight request failed; return to the state before the click.
    pub fn failed(&mut self) {
        self.state = match self.state {
            FollowState::Following => FollowState::Unfollowed,
            FollowState::Unfollowing => FollowState::Followed,
            settled => settled,
        };
    }

    /// Button text and enabled flag for the current state.
    #[must_use]
    pub const fn render(&self) -> FollowButton {
        let label = match self.state {
            FollowState::Followed => "Unfollow!",
            FollowState::Unfollowed => "Follow!",
            FollowState::Following => "Following...",
            FollowState::Unfollowing => "Unfollowing...",
        };
        FollowButton {
            label,
            disabled: self.state.is_in_flight(),
        }
    }
}
