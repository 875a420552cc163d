use crate::domain::model::{CategorySummary, EstimatedSalary};

/// Folds the estimates of one category into a summary.
///
/// `found` is taken as reported by the source and is not checked against the
/// number of estimates: paging may stop before every match has been fetched.
pub fn summarize<I>(salaries: I, found: u64) -> CategorySummary
where
    I: IntoIterator<Item = EstimatedSalary>,
{
    let (processed, total) = salaries
        .into_iter()
        .flatten()
        .fold((0u64, 0f64), |(count, sum), salary| (count + 1, sum + salary));

    let average_salary = if processed > 0 {
        Some((total / processed as f64).trunc() as i64)
    } else {
        None
    };

    CategorySummary {
        found,
        processed,
        average_salary,
    }
}
