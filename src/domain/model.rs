use serde::{Deserialize, Serialize};

/// Grouping key shared by every source, e.g. a programming-language name.
pub type Category = String;

/// Scalar salary estimate; `None` when a posting states no usable figure.
pub type EstimatedSalary = Option<f64>;

/// Stated salary range of a posting, already gated to the accepted currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SalaryBound {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl SalaryBound {
    pub fn new(lower: Option<f64>, upper: Option<f64>) -> Self {
        Self { lower, upper }
    }

    pub fn absent() -> Self {
        Self::default()
    }
}

/// Where a summary's `found` figure comes from. Both are totals reported by
/// the source, never a count of fetched postings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum FoundFrom {
    /// A separate unpaged count request.
    #[default]
    Count,
    /// The total reported alongside the first page.
    Paging,
}

/// One page of a remote collection.
#[derive(Debug, Clone)]
pub struct Page<P> {
    pub items: Vec<P>,
    pub is_last: bool,
    pub total_found: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub found: u64,
    pub processed: u64,
    pub average_salary: Option<i64>,
}

/// Category summaries of one source, kept in the order categories were added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub source: String,
    pub entries: Vec<(Category, CategorySummary)>,
}

impl Report {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            entries: Vec::new(),
        }
    }

    /// Replaces the summary of an existing category in place, otherwise appends.
    pub fn insert(&mut self, category: impl Into<Category>, summary: CategorySummary) {
        let category = category.into();
        match self.entries.iter_mut().find(|(c, _)| *c == category) {
            Some((_, existing)) => *existing = summary,
            None => self.entries.push((category, summary)),
        }
    }

    pub fn get(&self, category: &str) -> Option<&CategorySummary> {
        self.entries
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, summary)| summary)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
