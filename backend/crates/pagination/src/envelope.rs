//! Page envelopes returned by list endpoints.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::PageRequest;

const OFFSET_PARAM: &str = "offset";
const LIMIT_PARAM: &str = "limit";

/// Navigation links for a page, rendered as absolute URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    /// URL of the page itself.
    #[serde(rename = "self")]
    pub current: String,
    /// URL of the following page, absent on the last page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// A page of items plus the window that produced it.
///
/// A page is considered the last one when it holds fewer items than the
/// requested limit; `next_offset` is omitted in that case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items in collection order.
    pub data: Vec<T>,
    /// Offset of the first item.
    pub offset: u32,
    /// Requested page size.
    pub limit: u32,
    /// Offset of the following page, when one may exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_offset: Option<u32>,
    /// Absolute navigation links, when the caller supplied a base URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<PageLinks>,
}

impl<T> Page<T> {
    /// Wrap `data` fetched with `request`.
    #[must_use]
    pub fn new(data: Vec<T>, request: PageRequest) -> Self {
        let count = u32::try_from(data.len()).unwrap_or(u32::MAX);
        let next_offset = (count >= request.limit()).then(|| request.next().offset());
        Self {
            data,
            offset: request.offset(),
            limit: request.limit(),
            next_offset,
            links: None,
        }
    }

    /// Attach `self`/`next` links derived from `base`.
    ///
    /// Existing `offset` and `limit` query parameters on `base` are replaced;
    /// every other parameter is preserved.
    #[must_use]
    pub fn with_links(mut self, base: &Url) -> Self {
        let current = PageRequest::new(self.offset, self.limit)
            .map(|request| with_window(base, request).to_string())
            .unwrap_or_else(|_| base.to_string());
        let next = self.next_offset.and_then(|offset| {
            PageRequest::new(offset, self.limit)
                .ok()
                .map(|request| with_window(base, request).to_string())
        });
        self.links = Some(PageLinks { current, next });
        self
    }

    /// Whether no further page is expected.
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.next_offset.is_none()
    }

    /// Transform every item while keeping the window.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            data: self.data.into_iter().map(f).collect(),
            offset: self.offset,
            limit: self.limit,
            next_offset: self.next_offset,
            links: self.links,
        }
    }
}

fn with_window(base: &Url, request: PageRequest) -> Url {
    let retained: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| key != OFFSET_PARAM && key != LIMIT_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut url = base.clone();
    url.set_query(None);
    url.query_pairs_mut()
        .extend_pairs(retained)
        .append_pair(OFFSET_PARAM, &request.offset().to_string())
        .append_pair(LIMIT_PARAM, &request.limit().to_string());
    url
}
