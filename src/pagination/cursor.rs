//! Next-URL cursor over Baserow row listings
//!
//! The first request is built locally from the rows endpoint and the caller's
//! filters. Every later request uses the server's `next` URL verbatim, since
//! it already carries the filters.

use super::types::{NextPage, Page, PaginationState};
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::types::{JsonValue, Row};
use futures::stream::{self, BoxStream, StreamExt};
use std::collections::VecDeque;
use tracing::debug;

/// Lazy stream of rows, one page request at a time
pub type RowStream<'a> = BoxStream<'a, Result<Row>>;

/// Cursor state: the next URL to fetch, if any
#[derive(Debug, Clone)]
pub struct RowCursor {
    next: Option<String>,
    state: PaginationState,
}

impl RowCursor {
    /// Start at `endpoint?user_field_names=true&key=value...`
    ///
    /// Filter keys and values are appended as given, without escaping.
    pub fn new<I, K, V>(endpoint: &str, filters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self {
            next: Some(first_page_url(endpoint, filters)),
            state: PaginationState::new(),
        }
    }

    /// URL of the next request, `None` once exhausted
    pub fn next_url(&self) -> Option<&str> {
        self.next.as_deref()
    }

    /// Progress so far
    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    /// Consume a page's `next` link
    pub fn advance(&mut self, page: &Page) -> NextPage {
        self.state.add_page(page.results.len());

        match page.next.as_deref() {
            Some(next) if !next.is_empty() => {
                self.next = Some(next.to_string());
                NextPage::Url(next.to_string())
            }
            _ => {
                self.next = None;
                self.state.mark_done();
                NextPage::Done
            }
        }
    }
}

/// Build the first page URL for a rows endpoint
pub fn first_page_url<I, K, V>(endpoint: &str, filters: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut url = format!("{endpoint}?user_field_names=true");
    for (key, value) in filters {
        url.push('&');
        url.push_str(key.as_ref());
        url.push('=');
        url.push_str(value.as_ref());
    }
    url
}

/// Drive a cursor as a stream
///
/// No request is made until the first row is polled, and page N+1 is only
/// requested once every row of page N has been yielded. `request` carries the
/// authorization header and is reused for every page. The stream ends after
/// the first error.
pub fn row_stream<'a>(http: &'a HttpClient, request: RequestConfig, cursor: RowCursor) -> RowStream<'a> {
    stream::try_unfold(
        (cursor, VecDeque::<Row>::new()),
        move |(mut cursor, mut buffer)| {
            let request = request.clone();
            async move {
                loop {
                    if let Some(row) = buffer.pop_front() {
                        return Ok(Some((row, (cursor, buffer))));
                    }

                    let Some(url) = cursor.next_url().map(str::to_string) else {
                        return Ok(None);
                    };

                    debug!("Fetching page {}: {}", cursor.state().pages_fetched + 1, url);
                    let body: JsonValue = http.get_json_with_config(&url, request.clone()).await?;
                    let page = Page::from_value(body)?;
                    cursor.advance(&page);
                    buffer.extend(page.results);
                }
            }
        },
    )
    .boxed()
}
