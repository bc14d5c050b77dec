use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Column names the dashboard depends on
// ---------------------------------------------------------------------------

pub const AGE_COLUMN: &str = "Age";
pub const EXPERIENCE_COLUMN: &str = "Year of Experience";
pub const SALARY_COLUMN: &str = "Current Salary";

/// Columns every dataset must carry, in model feature order first.
pub const REQUIRED_COLUMNS: [&str; 3] = [AGE_COLUMN, EXPERIENCE_COLUMN, SALARY_COLUMN];

// ---------------------------------------------------------------------------
// CellValue – a single cell of the source table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the dtypes found in spreadsheet exports.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Null,
}

impl CellValue {
    /// Numeric view of the cell, used for statistics and chart series.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.2}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

// ---------------------------------------------------------------------------
// SalaryRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single employee record (one row of the source table).
#[derive(Debug, Clone)]
pub struct SalaryRecord {
    /// column name → cell value; every loaded column is present, possibly Null.
    pub values: BTreeMap<String, CellValue>,
}

static NULL_CELL: CellValue = CellValue::Null;

impl SalaryRecord {
    pub fn get(&self, column: &str) -> &CellValue {
        self.values.get(column).unwrap_or(&NULL_CELL)
    }
}

// ---------------------------------------------------------------------------
// Column dtype, reported in the Data Info panel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnDtype {
    Int64,
    Float64,
    Object,
}

impl ColumnDtype {
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnDtype::Int64 | ColumnDtype::Float64)
    }
}

impl fmt::Display for ColumnDtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnDtype::Int64 => write!(f, "int64"),
            ColumnDtype::Float64 => write!(f, "float64"),
            ColumnDtype::Object => write!(f, "object"),
        }
    }
}

// ---------------------------------------------------------------------------
// SalaryDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset. Immutable after load; read-only backdrop for
/// charts and the overview panels.
#[derive(Debug, Clone)]
pub struct SalaryDataset {
    /// All records (rows).
    pub records: Vec<SalaryRecord>,
    /// Column names in source order.
    pub column_names: Vec<String>,
}

impl SalaryDataset {
    pub fn from_records(column_names: Vec<String>, records: Vec<SalaryRecord>) -> Self {
        SalaryDataset {
            records,
            column_names,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First `n` records (or all of them when the table is shorter).
    pub fn head(&self, n: usize) -> &[SalaryRecord] {
        &self.records[..self.records.len().min(n)]
    }

    /// Non-null numeric cells of one column, in row order.
    pub fn numeric_column(&self, column: &str) -> Vec<f64> {
        self.records
            .iter()
            .filter_map(|rec| rec.get(column).as_f64())
            .collect()
    }

    /// Per-row `[x, y]` chart points; rows missing either value are skipped.
    pub fn paired_column_points(&self, x_column: &str, y_column: &str) -> Vec<[f64; 2]> {
        self.records
            .iter()
            .filter_map(|rec| {
                let x = rec.get(x_column).as_f64()?;
                let y = rec.get(y_column).as_f64()?;
                Some([x, y])
            })
            .collect()
    }

    /// Dtype of a column, derived from its non-null cells. A mix of integer
    /// and float cells widens to float64; anything else is object.
    pub fn column_dtype(&self, column: &str) -> ColumnDtype {
        let mut saw_int = false;
        let mut saw_float = false;
        for rec in &self.records {
            match rec.get(column) {
                CellValue::Integer(_) => saw_int = true,
                CellValue::Float(_) => saw_float = true,
                CellValue::Null => {}
                CellValue::Text(_) => return ColumnDtype::Object,
            }
        }
        match (saw_int, saw_float) {
            (true, false) => ColumnDtype::Int64,
            (_, true) => ColumnDtype::Float64,
            (false, false) => ColumnDtype::Object,
        }
    }

    /// Columns whose dtype is numeric, in source order.
    pub fn numeric_column_names(&self) -> Vec<String> {
        self.column_names
            .iter()
            .filter(|c| self.column_dtype(c).is_numeric())
            .cloned()
            .collect()
    }

    /// Total count of null cells across the whole table.
    pub fn null_count(&self) -> usize {
        self.records
            .iter()
            .flat_map(|rec| rec.values.values())
            .filter(|c| c.is_null())
            .count()
    }
}
