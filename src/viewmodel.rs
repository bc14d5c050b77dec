use std::ops::RangeInclusive;

use crate::data::model::{AGE_COLUMN, EXPERIENCE_COLUMN, SALARY_COLUMN, SalaryDataset};
use crate::data::stats::{self, ColumnSummary};
use crate::gbm::{PredictError, SalaryModel};

// ---------------------------------------------------------------------------
// EmployeeInput – the slider values submitted for prediction
// ---------------------------------------------------------------------------

/// The two employee features collected from the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmployeeInput {
    pub age: u32,
    pub experience: u32,
}

impl EmployeeInput {
    pub const AGE_RANGE: RangeInclusive<u32> = 18..=65;
    pub const EXPERIENCE_RANGE: RangeInclusive<u32> = 0..=50;

    /// Feature vector in model column order: `[Age, Year of Experience]`.
    pub fn features(&self) -> [f64; 2] {
        [self.age as f64, self.experience as f64]
    }
}

impl Default for EmployeeInput {
    fn default() -> Self {
        EmployeeInput {
            age: 30,
            experience: 5,
        }
    }
}

// ---------------------------------------------------------------------------
// ViewModel – everything one render cycle displays
// ---------------------------------------------------------------------------

/// Presentation-agnostic output of one render cycle. The prediction section
/// is absent until the user triggers it; the overview is always populated.
#[derive(Debug, Clone)]
pub struct ViewModel {
    pub prediction: Option<PredictionView>,
    pub overview: OverviewView,
}

#[derive(Debug, Clone)]
pub struct PredictionView {
    pub salary: f64,
    pub input: EmployeeInput,
    pub experience_chart: ScatterView,
    pub age_chart: ScatterView,
    pub metrics: MetricsView,
}

/// One scatter chart: the dataset as the base series plus the freshly
/// predicted employee as a highlight marker.
#[derive(Debug, Clone)]
pub struct ScatterView {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub base: Vec<[f64; 2]>,
    pub highlight: [f64; 2],
}

/// The four quick-statistics figures. Mean and max are `None` on an empty
/// salary column; the deviation is `None` whenever the mean is absent or
/// zero (undefined, rendered as "n/a").
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsView {
    pub mean_salary: Option<f64>,
    pub max_salary: Option<f64>,
    pub predicted: f64,
    pub vs_mean_pct: Option<f64>,
}

/// Static dataset overview: preview rows, describe() summaries, schema info.
#[derive(Debug, Clone)]
pub struct OverviewView {
    pub column_names: Vec<String>,
    /// First 10 records as display strings, one inner vec per record.
    pub head: Vec<Vec<String>>,
    pub summaries: Vec<ColumnSummary>,
    pub row_count: usize,
    pub column_count: usize,
    /// column name → dtype label, in source order.
    pub dtypes: Vec<(String, String)>,
    pub missing_values: usize,
}

// ---------------------------------------------------------------------------
// Building the view model
// ---------------------------------------------------------------------------

pub const PREVIEW_ROWS: usize = 10;

/// Compute everything one render cycle displays. Pure with respect to its
/// inputs; recomputed in full on every cycle, nothing cached.
pub fn build(
    model: &dyn SalaryModel,
    dataset: &SalaryDataset,
    input: EmployeeInput,
    triggered: bool,
) -> Result<ViewModel, PredictError> {
    let overview = overview(dataset);

    if !triggered {
        return Ok(ViewModel {
            prediction: None,
            overview,
        });
    }

    let salary = model.predict(&input.features())?;

    let salaries = dataset.numeric_column(SALARY_COLUMN);
    let mean_salary = stats::mean(&salaries);
    let metrics = MetricsView {
        mean_salary,
        max_salary: stats::max(&salaries),
        predicted: salary,
        vs_mean_pct: vs_mean_percent(salary, mean_salary),
    };

    let experience_chart = ScatterView {
        title: "Salary vs Experience".to_string(),
        x_label: "Years of Experience".to_string(),
        y_label: "Salary ($)".to_string(),
        base: dataset.paired_column_points(EXPERIENCE_COLUMN, SALARY_COLUMN),
        highlight: [input.experience as f64, salary],
    };
    let age_chart = ScatterView {
        title: "Salary vs Age".to_string(),
        x_label: "Age".to_string(),
        y_label: "Salary ($)".to_string(),
        base: dataset.paired_column_points(AGE_COLUMN, SALARY_COLUMN),
        highlight: [input.age as f64, salary],
    };

    Ok(ViewModel {
        prediction: Some(PredictionView {
            salary,
            input,
            experience_chart,
            age_chart,
            metrics,
        }),
        overview,
    })
}

/// Signed percent deviation of the prediction from the dataset mean.
/// Undefined for an absent or zero mean.
fn vs_mean_percent(prediction: f64, mean: Option<f64>) -> Option<f64> {
    let mean = mean.filter(|m| *m != 0.0)?;
    Some((prediction - mean) / mean * 100.0)
}

fn overview(dataset: &SalaryDataset) -> OverviewView {
    let head = dataset
        .head(PREVIEW_ROWS)
        .iter()
        .map(|rec| {
            dataset
                .column_names
                .iter()
                .map(|col| {
                    let cell = rec.get(col);
                    if cell.is_null() {
                        String::new()
                    } else {
                        cell.to_string()
                    }
                })
                .collect()
        })
        .collect();

    let dtypes = dataset
        .column_names
        .iter()
        .map(|col| (col.clone(), dataset.column_dtype(col).to_string()))
        .collect();

    OverviewView {
        column_names: dataset.column_names.clone(),
        head,
        summaries: stats::describe(dataset),
        row_count: dataset.len(),
        column_count: dataset.column_names.len(),
        dtypes,
        missing_values: dataset.null_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, REQUIRED_COLUMNS, SalaryRecord};
    use crate::format::{format_currency, format_percent};
    use std::collections::BTreeMap;

    /// Deterministic linear model used to pin down end-to-end numbers.
    struct StubModel;

    impl SalaryModel for StubModel {
        fn predict(&self, features: &[f64]) -> Result<f64, PredictError> {
            if features.len() != 2 {
                return Err(PredictError::FeatureMismatch {
                    expected: 2,
                    got: features.len(),
                });
            }
            Ok(10000.0 + 500.0 * features[0] + 2000.0 * features[1])
        }
    }

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
    fn untriggered_cycle_shows_only_the_overview() {
        let ds = dataset(&[(25, 2.0, 40000.0), (40, 15.0, 90000.0)]);
        let vm = build(&StubModel, &ds, EmployeeInput::default(), false).unwrap();
        assert!(vm.prediction.is_none());
        assert_eq!(vm.overview.row_count, 2);
        assert_eq!(vm.overview.head.len(), 2);
    }

    #[test]
    fn end_to_end_two_row_scenario() {
        let ds = dataset(&[(25, 2.0, 40000.0), (40, 15.0, 90000.0)]);
        let input = EmployeeInput {
            age: 30,
            experience: 5,
        };
        let vm = build(&StubModel, &ds, input, true).unwrap();
        let pred = vm.prediction.expect("triggered cycle predicts");

        assert_eq!(pred.salary, 35000.0);
        assert_eq!(format_currency(pred.salary), "$35,000.00");

        assert_eq!(pred.metrics.mean_salary, Some(65000.0));
        assert_eq!(pred.metrics.max_salary, Some(90000.0));
        assert_eq!(format_percent(pred.metrics.vs_mean_pct), "-46.2%");

        assert_eq!(pred.experience_chart.base.len(), 2);
        assert_eq!(pred.experience_chart.highlight, [5.0, 35000.0]);
        assert_eq!(pred.age_chart.highlight, [30.0, 35000.0]);
    }

    #[test]
    fn positive_deviation_formats_with_plus_sign() {
        assert_eq!(
            format_percent(vs_mean_percent(60000.0, Some(50000.0))),
            "+20.0%"
        );
    }

    #[test]
    fn zero_mean_deviation_is_not_applicable() {
        let ds = dataset(&[(25, 2.0, 0.0), (40, 15.0, 0.0)]);
        let vm = build(&StubModel, &ds, EmployeeInput::default(), true).unwrap();
        let metrics = vm.prediction.unwrap().metrics;
        assert_eq!(metrics.mean_salary, Some(0.0));
        assert_eq!(metrics.vs_mean_pct, None);
        assert_eq!(format_percent(metrics.vs_mean_pct), "n/a");
    }

    #[test]
    fn empty_dataset_still_builds_a_view_model() {
        let ds = dataset(&[]);
        let vm = build(&StubModel, &ds, EmployeeInput::default(), true).unwrap();
        let pred = vm.prediction.unwrap();
        assert_eq!(pred.metrics.mean_salary, None);
        assert_eq!(pred.metrics.max_salary, None);
        assert_eq!(pred.metrics.vs_mean_pct, None);
        assert!(pred.experience_chart.base.is_empty());
        assert_eq!(vm.overview.head.len(), 0);
    }

    #[test]
    fn bounded_inputs_always_predict_finite_values() {
        let ds = dataset(&[(25, 2.0, 40000.0)]);
        for age in EmployeeInput::AGE_RANGE.step_by(10) {
            for experience in EmployeeInput::EXPERIENCE_RANGE.step_by(10) {
                let input = EmployeeInput { age, experience };
                let vm = build(&StubModel, &ds, input, true).unwrap();
                assert!(vm.prediction.unwrap().salary.is_finite());
            }
        }
    }

    #[test]
    fn overview_reports_schema_and_missing_values() {
        let mut ds = dataset(&[(25, 2.0, 40000.0), (40, 15.0, 90000.0)]);
        ds.records[0]
            .values
            .insert(SALARY_COLUMN.to_string(), CellValue::Null);

        let vm = build(&StubModel, &ds, EmployeeInput::default(), false).unwrap();
        assert_eq!(vm.overview.column_count, 3);
        assert_eq!(vm.overview.missing_values, 1);
        assert!(
            vm.overview
                .dtypes
                .iter()
                .any(|(name, dtype)| name == AGE_COLUMN && dtype == "int64")
        );
        // Null cells render as empty strings in the preview.
        let salary_idx = vm
            .overview
            .column_names
            .iter()
            .position(|c| c == SALARY_COLUMN)
            .unwrap();
        assert_eq!(vm.overview.head[0][salary_idx], "");
    }
}
