use crate::adapters::http::build_client;
use crate::adapters::{HeadHunterAdapter, SuperJobAdapter};
use crate::config::{Settings, SourceKind};
use crate::core::pipeline::SalaryPipeline;
use crate::domain::model::{Category, Report};
use crate::utils::error::Result;
use std::time::Instant;

/// Collects the reports for a fixed list of languages.
pub struct StatsEngine {
    pipeline: SalaryPipeline,
    categories: Vec<Category>,
}

impl StatsEngine {
    pub fn new(pipeline: SalaryPipeline, categories: Vec<Category>) -> Self {
        Self {
            pipeline,
            categories,
        }
    }

    /// Wires one adapter per selected source, sharing a single HTTP client.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let client = build_client(settings.request_timeout())?;
        let mut pipeline = SalaryPipeline::new(settings.found_from);

        for kind in &settings.sources {
            match kind {
                SourceKind::Hh => pipeline.add_source(Box::new(HeadHunterAdapter::new(
                    settings.headhunter.clone(),
                    client.clone(),
                ))),
                SourceKind::Sj => pipeline.add_source(Box::new(SuperJobAdapter::new(
                    settings.superjob.clone(),
                    client.clone(),
                ))),
            }
        }

        Ok(Self::new(pipeline, settings.languages.clone()))
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub async fn run(&self) -> Result<Vec<Report>> {
        let started = Instant::now();
        tracing::info!(
            "Starting salary collection: {} languages across {} sources",
            self.categories.len(),
            self.pipeline.source_count()
        );

        let reports = self.pipeline.run(&self.categories).await?;

        tracing::info!("Salary collection finished in {:?}", started.elapsed());
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings_builds_selected_sources() {
        let settings = Settings {
            sources: vec![SourceKind::Sj],
            languages: vec!["Rust".to_string()],
            ..Settings::default()
        };
        let engine = StatsEngine::from_settings(&settings).unwrap();

        assert_eq!(engine.pipeline.source_count(), 1);
        assert_eq!(engine.categories().to_vec(), vec!["Rust".to_string()]);
    }

    #[tokio::test]
    async fn test_run_without_sources_or_languages() {
        let engine = StatsEngine::new(SalaryPipeline::new(Default::default()), Vec::new());
        let reports = engine.run().await.unwrap();
        assert!(reports.is_empty());
    }
}
