use super::model::SalaryDataset;

// ---------------------------------------------------------------------------
// Column statistics for the overview panel
// ---------------------------------------------------------------------------

/// Descriptive statistics for one numeric column, pandas `describe()` style.
/// Fields are `None` when the column has too few values to define them.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Summaries for every numeric column, in source column order.
pub fn describe(dataset: &SalaryDataset) -> Vec<ColumnSummary> {
    dataset
        .numeric_column_names()
        .into_iter()
        .map(|name| {
            let mut values = dataset.numeric_column(&name);
            values.sort_by(f64::total_cmp);
            ColumnSummary {
                count: values.len(),
                mean: mean(&values),
                std: sample_std(&values),
                min: values.first().copied(),
                q25: percentile(&values, 0.25),
                median: percentile(&values, 0.50),
                q75: percentile(&values, 0.75),
                max: values.last().copied(),
                name,
            }
        })
        .collect()
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// Sample standard deviation (ddof = 1). Undefined below two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Linearly interpolated percentile over an ascending-sorted slice,
/// `q` in `[0, 1]`.
pub fn percentile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let rank = q * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let lo_val = sorted[lo];
    let hi_val = sorted[hi.min(sorted.len() - 1)];
    Some(lo_val + (hi_val - lo_val) * (rank - lo as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{
        AGE_COLUMN, CellValue, EXPERIENCE_COLUMN, REQUIRED_COLUMNS, SALARY_COLUMN, SalaryRecord,
    };
    use std::collections::BTreeMap;

    fn dataset(rows: &[(i64, f64, f64)]) -> SalaryDataset {
        let records = rows
            .iter()
            .map(|&(age, exp, salary)| {
                let mut values = BTreeMap::new();
                values.insert(AGE_COLUMN.to_string(), CellValue::Integer(age));
                values.insert(EXPERIENCE_COLUMN.to_string(), CellValue::Float(exp));
                values.insert(SALARY_COLUMN.to_string(), CellValue::Float(salary));
                SalaryRecord { values }
            })
            .collect();
        SalaryDataset::from_records(
            REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            records,
        )
    }

    #[test]
    fn mean_and_std_of_two_row_dataset() {
        let ds = dataset(&[(25, 2.0, 40000.0), (40, 15.0, 90000.0)]);
        let summaries = describe(&ds);
        let salary = summaries
            .iter()
            .find(|s| s.name == SALARY_COLUMN)
            .expect("salary column summarized");

        assert_eq!(salary.count, 2);
        assert_eq!(salary.mean, Some(65000.0));
        assert_eq!(salary.min, Some(40000.0));
        assert_eq!(salary.max, Some(90000.0));
        // ddof=1: sqrt(2 * 25000^2 / 1)
        let std = salary.std.expect("std defined for two values");
        assert!((std - 35355.339059327378).abs() < 1e-6);
    }

    #[test]
    fn percentiles_interpolate_linearly() {
        let sorted = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(percentile(&sorted, 0.0), Some(10.0));
        assert_eq!(percentile(&sorted, 0.5), Some(25.0));
        assert_eq!(percentile(&sorted, 0.25), Some(17.5));
        assert_eq!(percentile(&sorted, 1.0), Some(40.0));
    }

    #[test]
    fn empty_and_single_value_edge_cases() {
        assert_eq!(mean(&[]), None);
        assert_eq!(max(&[]), None);
        assert_eq!(sample_std(&[42.0]), None);
        assert_eq!(percentile(&[], 0.5), None);
        assert_eq!(percentile(&[7.0], 0.5), Some(7.0));
    }

    #[test]
    fn describe_covers_all_numeric_columns_in_order() {
        let ds = dataset(&[(25, 2.0, 40000.0), (40, 15.0, 90000.0)]);
        let summaries = describe(&ds);
        let names: Vec<&str> = summaries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec![AGE_COLUMN, EXPERIENCE_COLUMN, SALARY_COLUMN]);
    }
}
