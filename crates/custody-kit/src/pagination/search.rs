//! Search builder: the entry point of every list endpoint.

use crate::client::{ApiClient, QueryParams};
use crate::convert::ItemConverter;

use super::cursor::PageCursor;
use super::items::ItemIterator;
use super::page::SearchRequest;
use super::pages::{EachItem, PageConverter, PageIterator};

/// A list query that has not been sent yet.
///
/// Add filters with [`param`](Self::param) and friends, then pick how to
/// consume the results: [`items`](Self::items) for a flat sequence,
/// [`pages`](Self::pages) for page-at-a-time navigation, or
/// [`cursor`](Self::cursor) for the raw link-following cursor.
#[derive(Clone, Debug)]
pub struct Search<C> {
    api: ApiClient,
    request: SearchRequest,
    converter: C,
}

impl<C: ItemConverter> Search<C> {
    pub fn new(api: ApiClient, url: impl Into<String>, converter: C) -> Self {
        Self {
            api,
            request: SearchRequest::new(url),
            converter,
        }
    }

    /// Add a scalar filter.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params().insert(key, value);
        self
    }

    /// Add a list filter, sent as repeated keys.
    pub fn param_list<I, V>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        self.params().insert_all(key, values);
        self
    }

    /// Page size.
    pub fn limit(self, limit: u32) -> Self {
        self.param("limit", limit)
    }

    pub fn request(&self) -> &SearchRequest {
        &self.request
    }

    pub fn items(self) -> ItemIterator<C> {
        ItemIterator::new(PageCursor::new(self.api, self.request), self.converter)
    }

    pub fn pages(self) -> PageIterator<EachItem<C>> {
        PageIterator::new(
            PageCursor::new(self.api, self.request),
            EachItem(self.converter),
        )
    }

    /// Page iteration with a custom page converter; the item converter is dropped.
    pub fn pages_with<F: PageConverter>(self, converter: F) -> PageIterator<F> {
        PageIterator::new(PageCursor::new(self.api, self.request), converter)
    }

    pub fn cursor(self) -> PageCursor {
        PageCursor::new(self.api, self.request)
    }

    fn params(&mut self) -> &mut QueryParams {
        self.request.params.get_or_insert_with(QueryParams::new)
    }
}
