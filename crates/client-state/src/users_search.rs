//! Debounced live username search.
//!
//! Input is held until [`DEBOUNCE`] passes without further typing. Each
//! issued query is numbered and only the response to the most recently
//! issued one is applied, so slow responses to stale queries never
//! overwrite newer results.

use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::api::{ApiRequest, UserSummaryDto};
use crate::follow_toggle::{FollowButton, FollowToggle};

/// Quiet period before a typed query is sent.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Sequence number identifying an issued query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct QueryTicket(u64);

/// A query the host should send, tagged with its ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedQuery {
    /// Hand this back with the response.
    pub ticket: QueryTicket,
    /// Request to perform.
    pub request: ApiRequest,
}

/// One result row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRow {
    /// Listed user.
    pub user_id: Uuid,
    /// `@username`.
    pub handle: String,
    /// Link to the profile.
    pub href: String,
    /// Follow button for this user.
    pub follow: FollowButton,
}

/// What the search box should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchView {
    /// Whether a response is awaited.
    pub loading: bool,
    /// Result rows in server order.
    pub rows: Vec<SearchRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending {
    query: String,
    due: Instant,
}

/// Live search controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsersSearch {
    pending: Option<Pending>,
    issued: u64,
    awaiting: Option<QueryTicket>,
    results: Vec<FollowToggleRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FollowToggleRow {
    summary: UserSummaryDto,
    toggle: FollowToggle,
}

impl UsersSearch {
    /// Empty search.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The query text changed at `now`.
    ///
    /// A blank query clears results at once and discards any in-flight
    /// response; anything else is scheduled after [`DEBOUNCE`].
    pub fn input(&mut self, query: &str, now: Instant) {
        let query = query.trim();
        if query.is_empty() {
            self.pending = None;
            self.awaiting = None;
            self.issued += 1;
            self.results.clear();
            return;
        }
        self.pending = Some(Pending {
            query: query.to_owned(),
            due: now + DEBOUNCE,
        });
    }

    /// Timer tick: issue the pending query once its quiet period has passed.
    ///
    /// # Examples
    /// ```
    /// use std::time::{Duration, Instant};
    ///
    /// use client_state::UsersSearch;
    ///
    /// let start = Instant::now();
    /// let mut search = UsersSearch::new();
    /// search.input("ad", start);
    /// assert!(search.poll(start + Duration::from_millis(299)).is_none());
    /// assert!(search.poll(start + Duration::from_millis(300)).is_some());
    /// ```
    pub fn poll(&mut self, now: Instant) -> Option<IssuedQuery> {
        let due = self.pending.as_ref()?.due;
        if now < due {
            return None;
        }
        let Pending { query, .. } = self.pending.take()?;
        self.issued += 1;
        let ticket = QueryTicket(self.issued);
        self.awaiting = Some(ticket);
        Some(IssuedQuery {
            ticket,
            request: ApiRequest::SearchUsers { query },
        })
    }

    /// Response for `ticket`. Returns whether it was applied.
    pub fn received(&mut self, ticket: QueryTicket, users: Vec<UserSummaryDto>) -> bool {
        if self.awaiting != Some(ticket) {
            return false;
        }
        self.awaiting = None;
        self.results = users
            .into_iter()
            .map(|summary| FollowToggleRow {
                toggle: FollowToggle::new(summary.user.id, summary.following),
                summary,
            })
            .collect();
        true
    }

    /// Request for `ticket` failed; results stay as they were.
    pub fn failed(&mut self, ticket: QueryTicket) {
        if self.awaiting == Some(ticket) {
            self.awaiting = None;
        }
    }

    /// Follow toggle of the listed user `user_id`, for click handling.
    pub fn toggle_mut(&mut self, user_id: Uuid) -> Option<&mut FollowToggle> {
        self.results
            .iter_mut()
            .find(|row| row.summary.user.id == user_id)
            .map(|row| &mut row.toggle)
    }

    /// Loading flag and result rows.
    #[must_use]
    pub fn render(&self) -> SearchView {
        SearchView {
            loading: self.awaiting.is_some(),
            rows: self
                .results
                .iter()
                .map(|row| SearchRow {
                    user_id: row.summary.user.id,
                    handle: row.summary.user.handle(),
                    href: row.summary.user.profile_path(),
                    follow: row.toggle.render(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::api::{FollowStatusDto, UserDto};
    use crate::follow_toggle::FollowState;

    fn summary(username: &str, following: bool) -> UserSummaryDto {
        UserSummaryDto {
            user: UserDto {
                id: Uuid::new_v4(),
                username: username.to_owned(),
                created_at: Utc.timestamp_opt(0, 0).single().expect("epoch"),
            },
            following,
        }
    }

    #[fixture]
    fn start() -> Instant {
        Instant::now()
    }

    fn issue(search: &mut UsersSearch, query: &str, at: Instant) -> IssuedQuery {
        search.input(query, at);
        search.poll(at + DEBOUNCE).expect("query issued")
    }

    #[rstest]
    fn typing_restarts_the_debounce(start: Instant) {
        let mut search = UsersSearch::new();
        search.input("a", start);
        search.input("ad", start + Duration::from_millis(200));
        assert!(search.poll(start + Duration::from_millis(300)).is_none());

        let issued = search
            .poll(start + Duration::from_millis(500))
            .expect("query issued");
        assert_eq!(
            issued.request,
            ApiRequest::SearchUsers {
                query: "ad".to_owned()
            }
        );
        assert!(search.render().loading);
    }

    #[rstest]
    fn only_last_issued_query_is_applied(start: Instant) {
        let mut search = UsersSearch::new();
        let first = issue(&mut search, "a", start);
        let second = issue(&mut search, "ad", start + Duration::from_secs(1));

        assert!(search.received(second.ticket, vec![summary("ada", false)]));
        assert!(!search.received(first.ticket, vec![summary("al", false)]));

        let view = search.render();
        assert!(!view.loading);
        let handles: Vec<&str> = view.rows.iter().map(|row| row.handle.as_str()).collect();
        assert_eq!(handles, ["@ada"]);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_query_clears_and_discards_in_flight(start: Instant, #[case] blank: &str) {
        let mut search = UsersSearch::new();
        let done = issue(&mut search, "a", start);
        search.received(done.ticket, vec![summary("ada", true)]);
        let in_flight = issue(&mut search, "ad", start + Duration::from_secs(1));

        search.input(blank, start + Duration::from_secs(2));

        assert_eq!(search.render(), SearchView {
            loading: false,
            rows: Vec::new()
        });
        assert!(!search.received(in_flight.ticket, vec![summary("ada", true)]));
        assert!(search.poll(start + Duration::from_secs(10)).is_none());
    }

    #[rstest]
    fn rows_carry_follow_state(start: Instant) {
        let mut search = UsersSearch::new();
        let issued = issue(&mut search, "a", start);
        let ada = summary("ada", true);
        let ada_id = ada.user.id;
        search.received(issued.ticket, vec![ada, summary("al", false)]);

        let view = search.render();
        let labels: Vec<&str> = view.rows.iter().map(|row| row.follow.label).collect();
        assert_eq!(labels, ["Unfollow!", "Follow!"]);
        assert_eq!(view.rows.first().map(|row| row.href.clone()), Some(format!("/users/{ada_id}")));

        let toggle = search.toggle_mut(ada_id).expect("row toggle");
        toggle.click();
        toggle.succeeded(FollowStatusDto { following: false });
        assert_eq!(toggle.state(), FollowState::Unfollowed);
    }

    #[rstest]
    fn failure_keeps_previous_results(start: Instant) {
        let mut search = UsersSearch::new();
        let first = issue(&mut search, "a", start);
        search.received(first.ticket, vec![summary("ada", false)]);
        let second = issue(&mut search, "ad", start + Duration::from_secs(1));

        search.failed(second.ticket);

        let view = search.render();
        assert!(!view.loading);
        assert_eq!(view.rows.len(), 1);
    }
}
