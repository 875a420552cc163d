use crate::core::aggregator::summarize;
use crate::core::estimator::estimate_bound;
use crate::core::paging::{fetch_all, fetch_pages};
use crate::domain::model::{Category, CategorySummary, EstimatedSalary, FoundFrom, Report};
use crate::domain::ports::SourceAdapter;
use crate::utils::error::Result;
use async_trait::async_trait;
use futures::TryStreamExt;

/// Object-safe view of a [`SourceAdapter`], so sources with different
/// posting types can share one pipeline.
#[async_trait]
pub trait SalarySource: Send + Sync {
    fn source_name(&self) -> &str;

    async fn summarize_category(
        &self,
        category: &str,
        found_from: FoundFrom,
    ) -> Result<CategorySummary>;
}

#[async_trait]
impl<A: SourceAdapter> SalarySource for A {
    fn source_name(&self) -> &str {
        self.name()
    }

    async fn summarize_category(
        &self,
        category: &str,
        found_from: FoundFrom,
    ) -> Result<CategorySummary> {
        let (salaries, found) = match found_from {
            FoundFrom::Count => {
                let salaries: Vec<EstimatedSalary> = fetch_all(self, category)
                    .map_ok(|posting| estimate_bound(self.bounds_of(&posting)))
                    .try_collect()
                    .await?;
                let found = self.count_matching(category).await?;
                (salaries, found)
            }
            FoundFrom::Paging => {
                let mut pages = std::pin::pin!(fetch_pages(self, category));
                let mut salaries = Vec::new();
                let mut reported = None;
                while let Some(page) = pages.try_next().await? {
                    reported.get_or_insert(page.total_found);
                    salaries.extend(page.items.iter().map(|p| estimate_bound(self.bounds_of(p))));
                }
                (salaries, reported.unwrap_or(0))
            }
        };

        let summary = summarize(salaries, found);
        tracing::debug!(
            source = self.name(),
            category,
            found = summary.found,
            processed = summary.processed,
            "summarized category"
        );
        Ok(summary)
    }
}

/// Runs every category through every source, one request at a time.
pub struct SalaryPipeline {
    sources: Vec<Box<dyn SalarySource>>,
    found_from: FoundFrom,
}

impl SalaryPipeline {
    pub fn new(found_from: FoundFrom) -> Self {
        Self {
            sources: Vec::new(),
            found_from,
        }
    }

    pub fn with_source<S: SalarySource + 'static>(mut self, source: S) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn add_source(&mut self, source: Box<dyn SalarySource>) {
        self.sources.push(source);
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Builds one report per source, in the order sources were added.
    ///
    /// Transport and HTTP status failures drop the category from that
    /// source's report only. Any other error aborts the run.
    pub async fn run(&self, categories: &[Category]) -> Result<Vec<Report>> {
        let mut reports: Vec<Report> = self
            .sources
            .iter()
            .map(|source| Report::new(source.source_name()))
            .collect();

        for category in categories {
            tracing::info!("📡 Collecting vacancies for {}", category);

            for (source, report) in self.sources.iter().zip(reports.iter_mut()) {
                match source.summarize_category(category, self.found_from).await {
                    Ok(summary) => report.insert(category.clone(), summary),
                    Err(e) if e.is_source_failure() => {
                        tracing::error!(
                            source = source.source_name(),
                            category = %category,
                            "❌ Skipping category: {}",
                            e
                        );
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        for report in &reports {
            tracing::info!(
                "✅ {}: {}/{} categories summarized",
                report.source,
                report.len(),
                categories.len()
            );
        }

        Ok(reports)
    }
}
