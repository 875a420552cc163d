pub mod aggregator;
pub mod engine;
pub mod estimator;
pub mod paging;
pub mod pipeline;
pub mod report;

pub use crate::domain::model::{Category, CategorySummary, FoundFrom, Page, Report, SalaryBound};
pub use crate::domain::ports::{SourceAdapter, Storage};
pub use crate::utils::error::Result;
