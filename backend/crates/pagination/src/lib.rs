//! Offset-based pagination primitives shared by Chirp endpoints.
//!
//! Handlers accept raw [`PageParams`] from the query string, validate them
//! into a [`PageRequest`], and wrap the resulting items in a [`Page`]
//! envelope. The envelope reports the offset to request next so clients can
//! drive infinite scrolling without recomputing offsets themselves.
//!
//! ```
//! use pagination::{Page, PageParams, PageRequest};
//!
//! let request = PageRequest::try_from(PageParams {
//!     offset: Some(10),
//!     limit: Some(2),
//! })
//! .expect("valid window");
//! let page = Page::new(vec!["a", "b"], request);
//! assert_eq!(page.next_offset, Some(12));
//! ```

mod envelope;
mod request;

pub use envelope::{Page, PageLinks};
pub use request::{DEFAULT_LIMIT, MAX_LIMIT, PageParams, PageRequest, PageRequestError};
