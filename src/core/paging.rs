use crate::domain::model::Page;
use crate::domain::ports::SourceAdapter;
use crate::utils::error::{Result, SalaryError};
use futures::stream::{self, Stream, TryStreamExt};

/// Lazily walks the pages of `category`, starting at page 0.
///
/// A page is requested only when the previous one has been consumed. The
/// stream ends after the page the adapter flags as last, or after an empty
/// page. The first error is yielded and ends the stream.
pub fn fetch_pages<'a, A>(
    adapter: &'a A,
    category: &'a str,
) -> impl Stream<Item = Result<Page<A::Posting>>> + Send + 'a
where
    A: SourceAdapter + ?Sized,
{
    stream::try_unfold(Some(0u32), move |next| async move {
        let Some(page_index) = next else {
            return Ok(None);
        };

        let page = adapter.fetch_page(category, page_index).await?;
        tracing::debug!(
            source = adapter.name(),
            category,
            page = page_index,
            items = page.items.len(),
            last = page.is_last,
            "fetched page"
        );

        let next = if page.is_last || page.items.is_empty() {
            None
        } else {
            Some(page_index + 1)
        };
        Ok::<_, SalaryError>(Some((page, next)))
    })
}

/// Postings of every page of `category`, one page fetched at a time.
///
/// An empty page ends the traversal early, so fewer postings than the
/// source's `found` may be yielded.
pub fn fetch_all<'a, A>(
    adapter: &'a A,
    category: &'a str,
) -> impl Stream<Item = Result<A::Posting>> + Send + 'a
where
    A: SourceAdapter + ?Sized,
{
    fetch_pages(adapter, category)
        .map_ok(|page| stream::iter(page.items.into_iter().map(Ok)))
        .try_flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SalaryBound;
    use async_trait::async_trait;
    use futures::StreamExt;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Serves `pages` from memory and fails with a 500 on `fail_on`.
    struct FakeSource {
        pages: Vec<Vec<u32>>,
        fail_on: Option<u32>,
        ignore_last_flag: bool,
        requests: AtomicU32,
    }

    impl FakeSource {
        fn new(pages: Vec<Vec<u32>>) -> Self {
            Self {
                pages,
                fail_on: None,
                ignore_last_flag: false,
                requests: AtomicU32::new(0),
            }
        }

        fn failing_on(mut self, page: u32) -> Self {
            self.fail_on = Some(page);
            self
        }

        fn never_last(mut self) -> Self {
            self.ignore_last_flag = true;
            self
        }

        fn requests(&self) -> u32 {
            self.requests.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SourceAdapter for FakeSource {
        type Posting = u32;

        fn name(&self) -> &str {
            "fake"
        }

        fn bounds_of(&self, posting: &u32) -> SalaryBound {
            SalaryBound::new(Some(*posting as f64), None)
        }

        async fn fetch_page(&self, _category: &str, page: u32) -> Result<Page<u32>> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            if self.fail_on == Some(page) {
                return Err(SalaryError::HttpStatus {
                    status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                    url: format!("memory://fake?page={}", page),
                });
            }
            let items = self.pages.get(page as usize).cloned().unwrap_or_default();
            let is_last = !self.ignore_last_flag && page as usize + 1 >= self.pages.len();
            Ok(Page {
                items,
                is_last,
                total_found: 1_000,
            })
        }

        async fn count_matching(&self, _category: &str) -> Result<u64> {
            Ok(1_000)
        }
    }

    #[tokio::test]
    async fn test_fetch_all_concatenates_pages() {
        let source = FakeSource::new(vec![vec![1, 2], vec![3, 4], vec![5]]);
        let postings: Vec<u32> = fetch_all(&source, "Rust").try_collect().await.unwrap();

        assert_eq!(postings, vec![1, 2, 3, 4, 5]);
        assert_eq!(source.requests(), 3);
    }

    #[tokio::test]
    async fn test_single_last_page() {
        let source = FakeSource::new(vec![vec![7, 8, 9]]);
        let postings: Vec<u32> = fetch_all(&source, "Rust").try_collect().await.unwrap();

        assert_eq!(postings, vec![7, 8, 9]);
        assert_eq!(source.requests(), 1);
    }

    #[tokio::test]
    async fn test_consumer_stopping_early_fetches_one_page() {
        let source = FakeSource::new(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]);
        let first_two: Vec<Result<u32>> = fetch_all(&source, "Rust").take(2).collect().await;

        assert_eq!(first_two.len(), 2);
        assert_eq!(source.requests(), 1);
    }

    #[tokio::test]
    async fn test_error_after_yielded_items() {
        let source = FakeSource::new(vec![vec![1, 2], vec![3]]).failing_on(1);
        let results: Vec<Result<u32>> = fetch_all(&source, "Rust").collect().await;

        assert_eq!(results.len(), 3);
        assert_eq!(*results[0].as_ref().unwrap(), 1);
        assert_eq!(*results[1].as_ref().unwrap(), 2);
        assert!(results[2].as_ref().unwrap_err().is_source_failure());
        assert_eq!(source.requests(), 2);
    }

    #[tokio::test]
    async fn test_error_on_first_page() {
        let source = FakeSource::new(vec![vec![1]]).failing_on(0);
        let result: Result<Vec<u32>> = fetch_all(&source, "Rust").try_collect().await;

        assert!(result.is_err());
        assert_eq!(source.requests(), 1);
    }

    #[tokio::test]
    async fn test_empty_page_ends_traversal() {
        let source = FakeSource::new(vec![vec![1], vec![]]).never_last();
        let postings: Vec<u32> = fetch_all(&source, "Rust").try_collect().await.unwrap();

        assert_eq!(postings, vec![1]);
        assert_eq!(source.requests(), 2);
    }

    #[tokio::test]
    async fn test_fetch_pages_reports_total() {
        let source = FakeSource::new(vec![vec![1], vec![2]]);
        let pages: Vec<Page<u32>> = fetch_pages(&source, "Rust").try_collect().await.unwrap();

        assert_eq!(pages.len(), 2);
        assert!(pages.iter().all(|p| p.total_found == 1_000));
        assert!(pages[1].is_last);
    }
}
