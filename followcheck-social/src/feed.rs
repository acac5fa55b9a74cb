//! Paginated feed capability and the drainer that exhausts it.

use anyhow::Result;
use async_trait::async_trait;

/// A paginated producer of items.
///
/// Anything that can fetch "the next page" and report whether more pages
/// remain can be drained by [`drain`]. The trait replaces duck-typed feed
/// objects with an explicit capability, so tests can hand the drainer a mock
/// and the orchestrator never sees pagination cursors.
#[async_trait]
pub trait PageFeed {
    type Item: Send;

    /// Fetch the next page of items, advancing the feed's cursor.
    async fn items(&mut self) -> Result<Vec<Self::Item>>;

    /// Whether the producer reported more pages after the last fetch.
    fn is_more_available(&self) -> bool;
}

/// Exhaust a feed into a single list, in first-fetched order.
///
/// Always fetches at least one page, then continues while the producer
/// reports more. Termination is the producer's responsibility: a feed that
/// never reports exhaustion keeps the drain running. An error from `items()`
/// propagates to the caller immediately, discarding pages fetched so far.
pub async fn drain<F>(feed: &mut F) -> Result<Vec<F::Item>>
where
    F: PageFeed + Send,
{
    let mut all = Vec::new();
    loop {
        let mut page = feed.items().await?;
        tracing::debug!(page_len = page.len(), total = all.len() + page.len(), "feed.page");
        all.append(&mut page);
        if !feed.is_more_available() {
            break;
        }
    }
    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::collections::VecDeque;

    struct MockFeed {
        pages: VecDeque<Result<Vec<&'static str>>>,
        calls: usize,
    }

    impl MockFeed {
        fn new(pages: Vec<Result<Vec<&'static str>>>) -> Self {
            Self {
                pages: pages.into(),
                calls: 0,
            }
        }
    }

    #[async_trait]
    impl PageFeed for MockFeed {
        type Item = &'static str;

        async fn items(&mut self) -> Result<Vec<&'static str>> {
            self.calls += 1;
            self.pages.pop_front().unwrap_or_else(|| Ok(Vec::new()))
        }

        fn is_more_available(&self) -> bool {
            !self.pages.is_empty()
        }
    }

    #[tokio::test]
    async fn drains_pages_in_first_fetched_order() {
        let mut feed = MockFeed::new(vec![Ok(vec!["a", "b"]), Ok(vec!["c"])]);
        let items = drain(&mut feed).await.unwrap();
        assert_eq!(items, vec!["a", "b", "c"]);
        assert_eq!(feed.calls, 2);
    }

    #[tokio::test]
    async fn single_empty_page_yields_empty_list() {
        let mut feed = MockFeed::new(vec![Ok(Vec::new())]);
        let items = drain(&mut feed).await.unwrap();
        assert!(items.is_empty());
        assert_eq!(feed.calls, 1);
    }

    #[tokio::test]
    async fn page_error_propagates_and_stops_the_drain() {
        let mut feed = MockFeed::new(vec![
            Ok(vec!["a"]),
            Err(anyhow!("connection reset")),
            Ok(vec!["never fetched"]),
        ]);
        let err = drain(&mut feed).await.unwrap_err();
        assert!(err.to_string().contains("connection reset"));
        assert_eq!(feed.calls, 2);
    }
}
