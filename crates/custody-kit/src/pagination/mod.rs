//! Hyperlink-driven pagination.
//!
//! List endpoints answer with one page of entries plus `next`/`previous`
//! links. A [`Search`] describes the query; consuming it yields either an
//! [`ItemIterator`] (flat, lazily fetched items) or a [`PageIterator`]
//! (whole pages, both directions). Both sit on a [`PageCursor`], which owns
//! the link state of one traversal.

mod cursor;
mod items;
mod page;
mod pages;
mod search;

pub use cursor::PageCursor;
pub use items::ItemIterator;
pub use page::{Hits, Hyperlink, Page, PageLinks, RawItem, SearchPage, SearchRequest};
pub use pages::{EachItem, PageConverter, PageIterator};
pub use search::Search;
