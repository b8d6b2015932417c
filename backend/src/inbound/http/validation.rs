//! Request parsing helpers shared by HTTP handlers.
//!
//! Every failure becomes an `invalid_request` error whose details name the
//! offending field, a stable code and the list of human-readable messages.

use pagination::{PageParams, PageRequest, PageRequestError};
use serde_json::json;

use crate::domain::{CredentialsValidationError, Error, FeedKind, UnknownFeedKind, UserId};

fn field_error(field: &str, code: &str, message: String) -> Error {
    Error::invalid_request(message.clone()).with_details(json!({
        "field": field,
        "code": code,
        "messages": [message],
    }))
}

/// Parse a user id taken from the path or query string.
pub(crate) fn parse_user_id(field: &str, raw: &str) -> Result<UserId, Error> {
    UserId::new(raw)
        .map_err(|_| field_error(field, "invalid_uuid", format!("{field} must be a valid UUID")))
}

/// Validate an offset/limit window.
pub(crate) fn page_request(params: PageParams) -> Result<PageRequest, Error> {
    PageRequest::try_from(params).map_err(|err: PageRequestError| {
        field_error(err.field(), "out_of_range", err.to_string())
    })
}

/// Parse the `type` query parameter of the tweet listing.
pub(crate) fn feed_kind(raw: Option<&str>) -> Result<FeedKind, Error> {
    raw.unwrap_or("feed")
        .parse()
        .map_err(|err: UnknownFeedKind| field_error("type", "unknown_type", err.to_string()))
}

/// Map credential validation failures onto the request fields.
pub(crate) fn credentials_error(err: CredentialsValidationError) -> Error {
    field_error(err.field(), err.code(), err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn malformed_user_id_names_the_field() {
        let err = parse_user_id("userId", "nope").expect_err("not a uuid");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().expect("details");
        assert_eq!(details["field"], "userId");
        assert_eq!(details["code"], "invalid_uuid");
    }

    #[rstest]
    #[case(Some(-1), None, "offset")]
    #[case(None, Some(0), "limit")]
    #[case(None, Some(101), "limit")]
    fn out_of_range_windows_are_rejected(
        #[case] offset: Option<i64>,
        #[case] limit: Option<i64>,
        #[case] field: &str,
    ) {
        let err = page_request(PageParams { offset, limit }).expect_err("invalid window");
        assert_eq!(err.details().expect("details")["field"], field);
    }

    #[rstest]
    fn missing_window_uses_defaults() {
        let request = page_request(PageParams::default()).expect("defaults");
        assert_eq!(request, PageRequest::default());
    }

    #[rstest]
    #[case(None, FeedKind::Feed)]
    #[case(Some("profile"), FeedKind::Profile)]
    fn feed_kind_defaults_to_feed(#[case] raw: Option<&str>, #[case] expected: FeedKind) {
        assert_eq!(feed_kind(raw).expect("known kind"), expected);
    }

    #[rstest]
    fn unknown_feed_kind_is_rejected() {
        let err = feed_kind(Some("timeline")).expect_err("unknown kind");
        assert_eq!(err.details().expect("details")["code"], "unknown_type");
    }

    #[rstest]
    fn credential_errors_carry_messages() {
        let err = credentials_error(CredentialsValidationError::PasswordTooShort { min: 6 });
        let details = err.details().expect("details");
        assert_eq!(details["field"], "password");
        assert_eq!(details["code"], "password_too_short");
        assert_eq!(details["messages"][0], err.message());
    }
}
