//! Link-following cursor over a paged list endpoint.

use tracing::{debug, trace};

use crate::client::{ApiClient, QueryParams};
use crate::error::Error;

use super::page::{SearchPage, SearchRequest};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Next,
    Previous,
}

impl Direction {
    fn as_str(self) -> &'static str {
        match self {
            Direction::Next => "next",
            Direction::Previous => "previous",
        }
    }
}

/// Tracks the `next`/`previous` links of the most recently fetched page.
///
/// The first successful fetch sends the search parameters; every later fetch
/// follows a server-supplied link as-is. A direction whose link is `None`
/// answers `Ok(None)` without touching the network, as often as it is asked.
///
/// Errors propagate unchanged and leave the cursor state untouched, so a
/// failed step may be retried by calling the same method again.
#[derive(Debug)]
pub struct PageCursor {
    api: ApiClient,
    params: Option<QueryParams>,
    next_url: Option<String>,
    previous_url: Option<String>,
    initial_request_consumed: bool,
}

impl PageCursor {
    pub fn new(api: ApiClient, request: SearchRequest) -> Self {
        Self {
            api,
            params: request.params,
            next_url: Some(request.url),
            previous_url: None,
            initial_request_consumed: false,
        }
    }

    /// Fetch the page behind the `next` link.
    pub async fn fetch_next(&mut self) -> Result<Option<SearchPage>, Error> {
        self.fetch(Direction::Next).await
    }

    /// Fetch the page behind the `previous` link.
    pub async fn fetch_previous(&mut self) -> Result<Option<SearchPage>, Error> {
        self.fetch(Direction::Previous).await
    }

    pub fn next_url(&self) -> Option<&str> {
        self.next_url.as_deref()
    }

    pub fn previous_url(&self) -> Option<&str> {
        self.previous_url.as_deref()
    }

    /// Whether the search parameters have already been sent.
    pub fn initial_request_consumed(&self) -> bool {
        self.initial_request_consumed
    }

    async fn fetch(&mut self, direction: Direction) -> Result<Option<SearchPage>, Error> {
        let url = match direction {
            Direction::Next => self.next_url.as_deref(),
            Direction::Previous => self.previous_url.as_deref(),
        };
        let Some(url) = url else {
            trace!(direction = direction.as_str(), "no more pages");
            return Ok(None);
        };

        let params = if self.initial_request_consumed {
            None
        } else {
            self.params.as_ref()
        };
        debug!(
            direction = direction.as_str(),
            url,
            initial = !self.initial_request_consumed,
            "fetching page"
        );

        let page: SearchPage = self.api.get(url, params).await?;

        self.initial_request_consumed = true;
        self.next_url = page.links.next.clone();
        self.previous_url = page.links.previous.clone();
        Ok(Some(page))
    }
}
