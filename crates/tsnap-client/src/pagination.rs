//! Page-number pagination over `{results, next}` envelopes.

use async_trait::async_trait;
use tracing::{debug, error, warn};

use crate::error::ClientResult;
use crate::payload::Page;

/// Loads one page of a paginated endpoint by page number.
#[async_trait]
pub trait PageLoader: Send + Sync {
    type Item: Send;

    async fn load_page(&self, page: u32) -> ClientResult<Page<Self::Item>>;
}

/// Walks a paginated endpoint once, from a starting page to the last page.
///
/// The `next` link of each page is reduced to its `page` query parameter and
/// requested through the same loader, so the host in the link is never
/// followed.
pub struct PaginatedFetcher<L> {
    loader: L,
    start_page: u32,
}

impl<L: PageLoader> PaginatedFetcher<L> {
    /// Fetcher starting at page 1.
    pub fn new(loader: L) -> Self {
        Self::starting_at(loader, 1)
    }

    pub fn starting_at(loader: L, start_page: u32) -> Self {
        Self { loader, start_page }
    }

    /// Concatenate every page's items in page order.
    ///
    /// A malformed or non-advancing next link ends the walk with the items
    /// collected so far. A failed page load discards everything and returns
    /// an empty list.
    pub async fn fetch_all(self) -> Vec<L::Item> {
        let start_page = self.start_page;
        match self.try_fetch_all().await {
            Ok(items) => items,
            Err(e) => {
                error!(start_page, error = %e, "Page fetch failed, discarding accumulated items");
                Vec::new()
            }
        }
    }

    async fn try_fetch_all(self) -> ClientResult<Vec<L::Item>> {
        let mut items = Vec::new();
        let mut page = self.start_page;

        loop {
            let batch = self.loader.load_page(page).await?;
            debug!(page, count = batch.results.len(), "Fetched page");
            items.extend(batch.results);

            let Some(link) = batch.next.filter(|link| !link.is_empty()) else {
                break;
            };

            match next_page(&link) {
                Some(next) if next > page => page = next,
                Some(next) => {
                    warn!(page, next, "Next link does not advance, stopping pagination");
                    break;
                }
                None => {
                    warn!(link = %link, "Malformed next link, stopping pagination");
                    break;
                }
            }
        }

        Ok(items)
    }
}

/// Page number carried in the `page` query parameter of a next link.
///
/// Returns `None` when the link has no query component or the parameter is
/// missing or not a number.
#[must_use]
pub fn next_page(link: &str) -> Option<u32> {
    let (_, query) = link.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use std::collections::HashMap;

    #[test]
    fn test_next_page_from_absolute_link() {
        assert_eq!(
            next_page("https://api.example.com/v1/static_reports/entries/5?page=3"),
            Some(3)
        );
        assert_eq!(next_page("entries/5?format=json&page=12"), Some(12));
        assert_eq!(next_page("entries/5?page=2#top"), Some(2));
    }

    #[test]
    fn test_next_page_malformed() {
        assert_eq!(next_page("https://api.example.com/entries/5"), None);
        assert_eq!(next_page("entries/5?format=json"), None);
        assert_eq!(next_page("entries/5?page=last"), None);
    }

    /// Serves fixed pages keyed by page number.
    struct FixedPages(HashMap<u32, Page<u32>>);

    #[async_trait]
    impl PageLoader for FixedPages {
        type Item = u32;

        async fn load_page(&self, page: u32) -> ClientResult<Page<u32>> {
            self.0.get(&page).cloned().ok_or(ClientError::Status {
                status: 404,
                body: format!("no page {page}"),
            })
        }
    }

    fn page(results: Vec<u32>, next: Option<&str>) -> Page<u32> {
        Page {
            results,
            next: next.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_fetch_all_concatenates_in_order() {
        let pages = FixedPages(HashMap::from([
            (1, page(vec![1, 2], Some("http://x/entries/1?page=2"))),
            (2, page(vec![3], Some("http://x/entries/1?page=3"))),
            (3, page(vec![4, 5], None)),
        ]));

        let items = PaginatedFetcher::new(pages).fetch_all().await;
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_fetch_all_stops_on_malformed_link() {
        let pages = FixedPages(HashMap::from([
            (1, page(vec![1], Some("http://x/entries/1?page=2"))),
            (2, page(vec![2], Some("http://x/entries/1"))),
            (3, page(vec![3], None)),
        ]));

        let items = PaginatedFetcher::new(pages).fetch_all().await;
        assert_eq!(items, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_fetch_all_stops_on_repeated_page() {
        let pages = FixedPages(HashMap::from([(
            1,
            page(vec![7], Some("http://x/entries/1?page=1")),
        )]));

        let items = PaginatedFetcher::new(pages).fetch_all().await;
        assert_eq!(items, vec![7]);
    }

    #[tokio::test]
    async fn test_fetch_all_discards_items_on_failure() {
        let pages = FixedPages(HashMap::from([(
            1,
            page(vec![1, 2], Some("http://x/entries/1?page=2")),
        )]));

        let items = PaginatedFetcher::new(pages).fetch_all().await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_empty_first_page() {
        let pages = FixedPages(HashMap::from([(1, page(vec![], None))]));
        assert!(PaginatedFetcher::new(pages).fetch_all().await.is_empty());
    }
}
