//! Flat, lazily-fetched item sequence over a paged list.

use std::collections::VecDeque;

use futures::Stream;

use crate::convert::ItemConverter;
use crate::error::Error;

use super::cursor::PageCursor;
use super::page::{Hits, RawItem};

/// Yields every converted item of a search, page after page.
///
/// Nothing is fetched until the first call to [`next`](Self::next) or
/// [`hits`](Self::hits); whichever comes first performs the only request for
/// page one. A new page is fetched only once the current one is drained.
/// After an error the iterator is finished and returns `None`.
///
/// # Example
///
/// ```rust,no_run
/// # use custody_kit::*;
/// # async fn example(custody: Custody) -> Result<(), Error> {
/// let mut txs = custody.eth().transactions().limit(50).items();
/// println!("{} transactions", txs.hits().await?.total);
///
/// while let Some(tx) = txs.next().await {
///     println!("{}", tx?.hash());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ItemIterator<C> {
    cursor: PageCursor,
    converter: C,
    hits: Option<Hits>,
    buffer: VecDeque<RawItem>,
    finished: bool,
}

impl<C: ItemConverter> ItemIterator<C> {
    pub fn new(cursor: PageCursor, converter: C) -> Self {
        Self {
            cursor,
            converter,
            hits: None,
            buffer: VecDeque::new(),
            finished: false,
        }
    }

    /// Hit counter of the first page.
    pub async fn hits(&mut self) -> Result<Hits, Error> {
        self.first_page().await
    }

    /// The next item, `None` once every page is drained.
    pub async fn next(&mut self) -> Option<Result<C::Output, Error>> {
        if self.finished {
            return None;
        }
        match self.advance().await {
            Ok(Some(item)) => Some(Ok(item)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }

    /// Drain the sequence, stopping at the first error.
    pub async fn try_collect_all(mut self) -> Result<Vec<C::Output>, Error> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await {
            items.push(item?);
        }
        Ok(items)
    }

    /// Adapt into a [`Stream`] for use with `futures` combinators.
    pub fn into_stream(self) -> impl Stream<Item = Result<C::Output, Error>> {
        futures::stream::unfold(self, |mut iter| async move {
            let item = iter.next().await?;
            Some((item, iter))
        })
    }

    async fn first_page(&mut self) -> Result<Hits, Error> {
        if let Some(hits) = self.hits {
            return Ok(hits);
        }
        let page = self.cursor.fetch_next().await?.unwrap_or_default();
        self.buffer = page.list.into();
        self.hits = Some(page.hits);
        Ok(page.hits)
    }

    async fn advance(&mut self) -> Result<Option<C::Output>, Error> {
        self.first_page().await?;
        loop {
            if let Some(raw) = self.buffer.pop_front() {
                return Ok(Some(self.converter.convert(&raw)?));
            }
            match self.cursor.fetch_next().await? {
                Some(page) => self.buffer = page.list.into(),
                None => return Ok(None),
            }
        }
    }
}
