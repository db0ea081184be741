//! Wire types of paged list endpoints.

use serde::{Deserialize, Serialize};

use crate::client::{HttpMethod, QueryParams};

/// The request that starts a pagination sequence.
///
/// `params` are sent on the first call only; every later page is fetched
/// through the server-supplied link, which already embeds the filters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRequest {
    pub url: String,
    pub params: Option<QueryParams>,
}

impl SearchRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: None,
        }
    }

    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.params = Some(params);
        self
    }
}

/// Hit counter of a list response.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Hits {
    pub total: u64,
}

/// Neighbor page links. `None` means there is no page in that direction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageLinks {
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
}

/// Hyperlink attached to a list entry.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Hyperlink {
    pub href: String,
    #[serde(rename = "type")]
    pub method: HttpMethod,
    pub rel: String,
}

/// One undecoded list entry: its links plus opaque scalar fields.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct RawItem {
    #[serde(default)]
    pub links: Vec<Hyperlink>,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl RawItem {
    /// A scalar field rendered as a string (strings verbatim, numbers formatted).
    pub fn field_str(&self, name: &str) -> Option<String> {
        match self.fields.get(name)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// One page of a list endpoint, as returned by the server.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SearchPage<T = RawItem> {
    #[serde(default)]
    pub hits: Hits,
    #[serde(default = "Vec::new")]
    pub list: Vec<T>,
    #[serde(default)]
    pub links: PageLinks,
}

/// A page whose entries have been converted.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub hits: Hits,
    pub list: Vec<T>,
}

impl<T> Page<T> {
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}
