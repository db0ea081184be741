//! Bidirectional page-at-a-time iteration.

use crate::convert::ItemConverter;
use crate::error::Error;

use super::cursor::PageCursor;
use super::page::{Page, SearchPage};

/// Turns a whole [`SearchPage`] into the value yielded by a [`PageIterator`].
///
/// Any `FnMut(SearchPage) -> Result<P, Error>` closure is a page converter.
pub trait PageConverter {
    type Output;

    fn convert_page(&mut self, page: SearchPage) -> Result<Self::Output, Error>;
}

impl<F, P> PageConverter for F
where
    F: FnMut(SearchPage) -> Result<P, Error>,
{
    type Output = P;

    fn convert_page(&mut self, page: SearchPage) -> Result<P, Error> {
        self(page)
    }
}

/// Page converter applying an [`ItemConverter`] to every entry.
///
/// One malformed entry fails the whole page.
#[derive(Clone, Debug)]
pub struct EachItem<C>(pub C);

impl<C: ItemConverter> PageConverter for EachItem<C> {
    type Output = Page<C::Output>;

    fn convert_page(&mut self, page: SearchPage) -> Result<Self::Output, Error> {
        let list = page
            .list
            .iter()
            .map(|item| self.0.convert(item))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page {
            hits: page.hits,
            list,
        })
    }
}

/// Walks a search one page at a time, in either direction.
///
/// `Ok(None)` means there is no page in the requested direction right now.
/// It is not a terminal state: after `next` runs out, `previous` still
/// follows the last page's `previous` link.
///
/// ```rust,no_run
/// # use custody_kit::*;
/// # async fn example(custody: Custody) -> Result<(), Error> {
/// let mut pages = custody.eth().wallets().limit(20).pages();
/// while let Some(page) = pages.next().await? {
///     for wallet in page {
///         println!("{}", wallet.name());
///     }
/// }
/// let last_but_one = pages.previous().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PageIterator<F> {
    cursor: PageCursor,
    converter: F,
}

impl<F: PageConverter> PageIterator<F> {
    pub fn new(cursor: PageCursor, converter: F) -> Self {
        Self { cursor, converter }
    }

    /// Fetch and convert the page behind the `next` link.
    pub async fn next(&mut self) -> Result<Option<F::Output>, Error> {
        match self.cursor.fetch_next().await? {
            Some(page) => Ok(Some(self.converter.convert_page(page)?)),
            None => Ok(None),
        }
    }

    /// Fetch and convert the page behind the `previous` link.
    pub async fn previous(&mut self) -> Result<Option<F::Output>, Error> {
        match self.cursor.fetch_previous().await? {
            Some(page) => Ok(Some(self.converter.convert_page(page)?)),
            None => Ok(None),
        }
    }

    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::client::ApiClient;
    use crate::client::mock::MockTransport;
    use crate::error::ConvertError;
    use crate::pagination::{RawItem, SearchRequest};

    fn page(names: &[&str], next: Option<&str>, previous: Option<&str>) -> serde_json::Value {
        serde_json::json!({
            "hits": { "total": 4 },
            "list": names
                .iter()
                .map(|n| serde_json::json!({ "name": n, "links": [] }))
                .collect::<Vec<_>>(),
            "links": { "next": next, "previous": previous },
        })
    }

    fn names(
        mock: &Arc<MockTransport>,
    ) -> PageIterator<EachItem<fn(&RawItem) -> Result<String, ConvertError>>> {
        fn name_of(item: &RawItem) -> Result<String, ConvertError> {
            item.field_str("name").ok_or(ConvertError::MissingField("name"))
        }
        let cursor = PageCursor::new(
            ApiClient::new(mock.clone()),
            SearchRequest::new("eth/wallets"),
        );
        let converter: fn(&RawItem) -> Result<String, ConvertError> = name_of;
        PageIterator::new(cursor, EachItem(converter))
    }

    fn two_pages(mock: &MockTransport) {
        mock.respond("eth/wallets", page(&["a", "b"], Some("eth/wallets?page=2"), None));
        mock.respond(
            "eth/wallets?page=2",
            page(&["c", "d"], None, Some("eth/wallets?page=1")),
        );
        mock.respond(
            "eth/wallets?page=1",
            page(&["a", "b"], Some("eth/wallets?page=2"), None),
        );
    }

    #[tokio::test]
    async fn test_forward_pages() {
        let mock = Arc::new(MockTransport::new());
        two_pages(&mock);
        let mut pages = names(&mock);

        let first = pages.next().await.unwrap().unwrap();
        assert_eq!(first.hits.total, 4);
        assert_eq!(first.list, vec!["a", "b"]);
        let second = pages.next().await.unwrap().unwrap();
        assert_eq!(second.list, vec!["c", "d"]);
        assert!(pages.next().await.unwrap().is_none());
        assert!(pages.next().await.unwrap().is_none());

        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_previous_after_next_is_done() {
        let mock = Arc::new(MockTransport::new());
        two_pages(&mock);
        let mut pages = names(&mock);

        pages.next().await.unwrap();
        pages.next().await.unwrap();
        assert!(pages.next().await.unwrap().is_none());

        let back = pages.previous().await.unwrap().unwrap();
        assert_eq!(back.list, vec!["a", "b"]);
        assert_eq!(mock.calls()[2].path, "eth/wallets?page=1");

        // Moving back restored a next link.
        assert!(pages.next().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_previous_before_any_fetch_is_none() {
        let mock = Arc::new(MockTransport::new());
        let mut pages = names(&mock);

        assert!(pages.previous().await.unwrap().is_none());
        assert_eq!(mock.call_count(), 0);
        assert_eq!(pages.cursor().next_url(), Some("eth/wallets"));
    }

    #[tokio::test]
    async fn test_closure_page_converter() {
        let mock = Arc::new(MockTransport::new());
        two_pages(&mock);
        let cursor = PageCursor::new(
            ApiClient::new(mock.clone()),
            SearchRequest::new("eth/wallets"),
        );
        let mut sizes =
            PageIterator::new(cursor, |page: SearchPage| Ok::<_, Error>(page.list.len()));

        assert_eq!(sizes.next().await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn test_bad_item_fails_page() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            "eth/wallets",
            serde_json::json!({
                "hits": { "total": 2 },
                "list": [{ "name": "a", "links": [] }, { "links": [] }],
                "links": { "next": null, "previous": null },
            }),
        );
        let mut pages = names(&mock);

        let err = pages.next().await.unwrap_err();
        assert!(matches!(err, Error::Convert(ConvertError::MissingField("name"))));
    }
}
