use crate::config::toml_config::{Settings, SourceKind};
use crate::core::report::ExportFormat;
use crate::domain::model::FoundFrom;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "salary-stats")]
#[command(about = "Average programmer salaries per language from HeadHunter and SuperJob")]
pub struct CliConfig {
    #[arg(long, help = "TOML settings file")]
    pub config: Option<PathBuf>,

    #[arg(long, value_delimiter = ',', help = "Languages to summarize, in table order")]
    pub languages: Vec<String>,

    #[arg(long, value_delimiter = ',', value_enum)]
    pub sources: Vec<SourceKind>,

    #[arg(long, value_enum, help = "Where the 'found' column comes from")]
    pub found_from: Option<FoundFrom>,

    #[arg(long)]
    pub hh_endpoint: Option<String>,

    #[arg(long)]
    pub sj_endpoint: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Directory to export the reports to")]
    pub output_path: Option<PathBuf>,

    #[arg(long, value_delimiter = ',', value_enum, default_value = "csv")]
    pub formats: Vec<ExportFormat>,

    #[arg(long, help = "Write diagnostics to this file instead of stderr")]
    pub log_file: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Defaults, then the `--config` file, then command-line overrides.
    pub fn load_settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };
        self.apply(&mut settings);
        settings.fill_token_from_env();
        Ok(settings)
    }

    pub fn apply(&self, settings: &mut Settings) {
        if !self.languages.is_empty() {
            settings.languages = self.languages.clone();
        }
        if !self.sources.is_empty() {
            settings.sources = self.sources.clone();
        }
        if let Some(found_from) = self.found_from {
            settings.found_from = found_from;
        }
        if let Some(endpoint) = &self.hh_endpoint {
            settings.headhunter.endpoint = endpoint.clone();
        }
        if let Some(endpoint) = &self.sj_endpoint {
            settings.superjob.endpoint = endpoint.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            settings.request_timeout_seconds = Some(timeout);
        }
    }
}
