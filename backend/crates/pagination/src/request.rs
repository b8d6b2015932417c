//! Validated offset/limit windows.

use serde::{Deserialize, Serialize};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_LIMIT: u32 = 10;
/// Largest page size a caller may request.
pub const MAX_LIMIT: u32 = 100;

/// Validation failures for page windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// The offset was negative or does not fit the supported range.
    #[error("offset must be between 0 and {max}, got {value}")]
    OffsetOutOfRange {
        /// Offset supplied by the caller.
        value: i64,
        /// Largest accepted offset.
        max: u32,
    },
    /// The limit was zero, negative, or larger than [`MAX_LIMIT`].
    #[error("limit must be between 1 and {max}, got {value}")]
    LimitOutOfRange {
        /// Limit supplied by the caller.
        value: i64,
        /// Largest accepted limit.
        max: u32,
    },
}

impl PageRequestError {
    /// Name of the query parameter that failed validation.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::OffsetOutOfRange { .. } => "offset",
            Self::LimitOutOfRange { .. } => "limit",
        }
    }
}

/// Raw pagination parameters as they arrive on the query string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    /// Number of items to skip.
    pub offset: Option<i64>,
    /// Maximum number of items to return.
    pub limit: Option<i64>,
}

/// A validated window over an ordered collection.
///
/// ## Invariants
/// - `limit` is within `1..=MAX_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PageParams", into = "PageParams")]
pub struct PageRequest {
    offset: u32,
    limit: u32,
}

impl PageRequest {
    /// Build a window, validating the limit.
    ///
    /// # Errors
    /// Returns [`PageRequestError::LimitOutOfRange`] when `limit` is zero or
    /// exceeds [`MAX_LIMIT`].
    pub const fn new(offset: u32, limit: u32) -> Result<Self, PageRequestError> {
        if limit == 0 || limit > MAX_LIMIT {
            return Err(PageRequestError::LimitOutOfRange {
                value: limit as i64,
                max: MAX_LIMIT,
            });
        }
        Ok(Self { offset, limit })
    }

    /// First page with the given limit, clamped into the accepted range.
    #[must_use]
    pub const fn first(limit: u32) -> Self {
        let clamped = if limit == 0 {
            1
        } else if limit > MAX_LIMIT {
            MAX_LIMIT
        } else {
            limit
        };
        Self {
            offset: 0,
            limit: clamped,
        }
    }

    /// Number of items to skip.
    #[must_use]
    pub const fn offset(self) -> u32 {
        self.offset
    }

    /// Maximum number of items in the page.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }

    /// The window immediately after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self {
            offset: self.offset.saturating_add(self.limit),
            limit: self.limit,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl TryFrom<PageParams> for PageRequest {
    type Error = PageRequestError;

    fn try_from(params: PageParams) -> Result<Self, Self::Error> {
        let raw_offset = params.offset.unwrap_or(0);
        let offset = u32::try_from(raw_offset).map_err(|_| PageRequestError::OffsetOutOfRange {
            value: raw_offset,
            max: u32::MAX,
        })?;

        let raw_limit = params.limit.unwrap_or(i64::from(DEFAULT_LIMIT));
        let limit = u32::try_from(raw_limit)
            .ok()
            .filter(|value| (1..=MAX_LIMIT).contains(value))
            .ok_or(PageRequestError::LimitOutOfRange {
                value: raw_limit,
                max: MAX_LIMIT,
            })?;

        Ok(Self { offset, limit })
    }
}

impl From<PageRequest> for PageParams {
    fn from(request: PageRequest) -> Self {
        Self {
            offset: Some(i64::from(request.offset)),
            limit: Some(i64::from(request.limit)),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Validation coverage for page windows.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn missing_params_use_defaults() {
        let request = PageRequest::try_from(PageParams::default()).expect("defaults are valid");
        assert_eq!(request, PageRequest::default());
        assert_eq!(request.limit(), DEFAULT_LIMIT);
        assert_eq!(request.offset(), 0);
    }

    #[rstest]
    #[case(Some(-1), None, "offset")]
    #[case(None, Some(0), "limit")]
    #[case(None, Some(-5), "limit")]
    #[case(None, Some(101), "limit")]
    fn out_of_range_params_are_rejected(
        #[case] offset: Option<i64>,
        #[case] limit: Option<i64>,
        #[case] field: &str,
    ) {
        let err = PageRequest::try_from(PageParams { offset, limit })
            .expect_err("window must be rejected");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    #[case(1)]
    #[case(100)]
    fn boundary_limits_are_accepted(#[case] limit: i64) {
        let request = PageRequest::try_from(PageParams {
            offset: Some(5),
            limit: Some(limit),
        })
        .expect("boundary limit is valid");
        assert_eq!(i64::from(request.limit()), limit);
    }

    #[rstest]
    fn next_advances_by_limit() {
        let request = PageRequest::new(20, 10).expect("valid window");
        assert_eq!(request.next(), PageRequest::new(30, 10).expect("valid window"));
    }

    #[rstest]
    #[case(0, 1)]
    #[case(500, MAX_LIMIT)]
    fn first_clamps_limit(#[case] requested: u32, #[case] expected: u32) {
        assert_eq!(PageRequest::first(requested).limit(), expected);
    }

    #[rstest]
    fn deserialises_from_query_shaped_json() {
        let request: PageRequest =
            serde_json::from_str(r#"{"offset":3,"limit":7}"#).expect("valid json");
        assert_eq!(request.offset(), 3);
        assert_eq!(request.limit(), 7);
    }
}
