use crate::domain::model::{CategorySummary, Report};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, SalaryError};
use chrono::{DateTime, Utc};
use comfy_table::{presets::ASCII_FULL, Cell, CellAlignment, Table};
use serde::{Deserialize, Serialize};

pub const HEADER: [&str; 4] = [
    "Language",
    "Vacancies found",
    "Vacancies processed",
    "Average salary",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

fn average_cell(summary: &CategorySummary) -> String {
    summary
        .average_salary
        .map(|avg| avg.to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Renders `report` as an ASCII table titled with the source name.
pub fn render_table(report: &Report) -> String {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(HEADER.to_vec());

    for (category, summary) in &report.entries {
        table.add_row(vec![
            Cell::new(category).set_alignment(CellAlignment::Left),
            Cell::new(summary.found).set_alignment(CellAlignment::Right),
            Cell::new(summary.processed).set_alignment(CellAlignment::Right),
            Cell::new(average_cell(summary)).set_alignment(CellAlignment::Right),
        ]);
    }

    format!("{}\n{}", report.source, table)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportDocument {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub entries: Vec<ReportRow>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportRow {
    pub language: String,
    pub vacancies_found: u64,
    pub vacancies_processed: u64,
    pub average_salary: Option<i64>,
}

impl ReportDocument {
    pub fn from_report(report: &Report, generated_at: DateTime<Utc>) -> Self {
        Self {
            source: report.source.clone(),
            generated_at,
            entries: report
                .entries
                .iter()
                .map(|(category, summary)| ReportRow {
                    language: category.clone(),
                    vacancies_found: summary.found,
                    vacancies_processed: summary.processed,
                    average_salary: summary.average_salary,
                })
                .collect(),
        }
    }
}

pub fn to_csv(report: &Report) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for (category, summary) in &report.entries {
        writer.write_record([
            category.clone(),
            summary.found.to_string(),
            summary.processed.to_string(),
            summary.average_salary.map(|a| a.to_string()).unwrap_or_default(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| SalaryError::Io(e.into_error()))
}

pub fn to_json(report: &Report, generated_at: DateTime<Utc>) -> Result<Vec<u8>> {
    let document = ReportDocument::from_report(report, generated_at);
    Ok(serde_json::to_vec_pretty(&document)?)
}

/// `HeadHunter` -> `headhunter_report.csv`
pub fn file_name(report: &Report, format: ExportFormat) -> String {
    let slug: String = report
        .source
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    format!("{}_report.{}", slug, format.extension())
}

/// Writes every report in every format, returning the written file names.
pub async fn export_reports<S: Storage>(
    storage: &S,
    reports: &[Report],
    formats: &[ExportFormat],
) -> Result<Vec<String>> {
    let generated_at = Utc::now();
    let mut written = Vec::new();

    for report in reports {
        for format in formats {
            let data = match format {
                ExportFormat::Csv => to_csv(report)?,
                ExportFormat::Json => to_json(report, generated_at)?,
            };
            let name = file_name(report, *format);
            storage.write_file(&name, &data).await?;
            tracing::info!("📁 Exported {} report to {}", report.source, name);
            written.push(name);
        }
    }

    Ok(written)
}
