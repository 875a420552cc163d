use crate::domain::model::{Page, SalaryBound};
use crate::utils::error::Result;
use async_trait::async_trait;

/// A paged job-search API.
///
/// Implementations know the remote field names, the currency gate and the
/// last-page signal of their source; paging itself lives in
/// [`crate::core::paging`].
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    type Posting: Send + 'static;

    /// Display name used as the report title.
    fn name(&self) -> &str;

    fn bounds_of(&self, posting: &Self::Posting) -> SalaryBound;

    /// Fetches the zero-based `page` of postings matching `category`.
    async fn fetch_page(&self, category: &str, page: u32) -> Result<Page<Self::Posting>>;

    /// Total number of matches reported by the source, without paging.
    async fn count_matching(&self, category: &str) -> Result<u64>;
}

/// Destination for exported reports.
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
