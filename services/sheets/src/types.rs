use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How input data is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueInputOption {
    /// Values are stored as-is.
    Raw,
    /// Values are parsed as if typed into the UI: numbers, dates and formulas are recognized.
    UserEntered,
}

impl ValueInputOption {
    /// Wire name of the option.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueInputOption::Raw => "RAW",
            ValueInputOption::UserEntered => "USER_ENTERED",
        }
    }
}

/// Whether the outer array of `values` holds rows or columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Dimension {
    /// Outer array elements are rows.
    Rows,
    /// Outer array elements are columns.
    Columns,
}

/// ValueRange is a range of cells with their values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    /// A1 notation of the range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    /// Orientation of `values`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<Dimension>,
    /// Cell values, outer array per `major_dimension`.
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

/// Result of `spreadsheets.values.append`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendValuesResponse {
    /// The spreadsheet the updates were applied to.
    #[serde(default)]
    pub spreadsheet_id: Option<String>,
    /// The range, in A1 notation, of the table values were appended to.
    #[serde(default)]
    pub table_range: Option<String>,
    /// Information about the updates that were applied.
    #[serde(default)]
    pub updates: Option<UpdateValuesResponse>,
}

/// Summary of updated cells.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateValuesResponse {
    /// The spreadsheet the updates were applied to.
    #[serde(default)]
    pub spreadsheet_id: Option<String>,
    /// The range, in A1 notation, that updates were applied to.
    #[serde(default)]
    pub updated_range: Option<String>,
    /// The number of rows where at least one cell was updated.
    #[serde(default)]
    pub updated_rows: Option<u32>,
    /// The number of columns where at least one cell was updated.
    #[serde(default)]
    pub updated_columns: Option<u32>,
    /// The number of cells updated.
    #[serde(default)]
    pub updated_cells: Option<u32>,
}
