//! Sheet handle: cell, row, column and range access.
//!
//! Rows and columns are 1-indexed, as in the Sheets UI. Indices are passed to
//! the script unchecked; out-of-range positions come back as script errors.

use sheetbridge_protocol::{ScriptService, Value};

use crate::catalog;
use crate::error::{Error, Result};
use crate::invoker::{RemoteInvoker, RemoteOutcome};
use crate::spreadsheet::{unexpected, Spreadsheet};

/// Cell limit of a single spreadsheet. `get_range` will not pad a reply out
/// to a block larger than this.
pub const MAX_RANGE_CELLS: u64 = 10_000_000;

/// A named sheet inside a spreadsheet, known to exist when the handle was made.
pub struct Sheet<'a, S> {
    spreadsheet: &'a Spreadsheet<'a, S>,
    invoker: RemoteInvoker<'a, S>,
    name: String,
}

impl<'a, S: ScriptService> Sheet<'a, S> {
    pub(crate) fn open(
        spreadsheet: &'a Spreadsheet<'a, S>,
        invoker: RemoteInvoker<'a, S>,
        name: String,
    ) -> Result<Self> {
        check_exists(&invoker, spreadsheet.url(), &name)?;
        tracing::info!("Opened sheet '{}' in {}", name, spreadsheet.url());
        Ok(Self {
            spreadsheet,
            invoker,
            name,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        self.spreadsheet.url()
    }

    pub fn spreadsheet(&self) -> &'a Spreadsheet<'a, S> {
        self.spreadsheet
    }

    /// Retarget this handle at another sheet of the same spreadsheet.
    ///
    /// The name is checked first; on failure the handle keeps its name.
    pub fn set_name(&mut self, name: &str) -> Result<()> {
        check_exists(&self.invoker, self.url(), name)?;
        self.name = name.to_string();
        Ok(())
    }

    /// Value of one cell. Empty cells read as `""`.
    pub fn get_cell_value(&self, row: u32, col: u32) -> Result<Value> {
        let value = self.invoke(catalog::GET_CELL_VALUE, [row.into(), col.into()])?;
        Ok(value.unwrap_or_else(Value::empty))
    }

    /// Values of one row, up to its last non-empty cell. Empty cells read as `""`.
    pub fn get_row(&self, row: u32) -> Result<Vec<Value>> {
        let values = self.invoke_list(catalog::GET_ROW, [row.into()])?;
        Ok(trim_trailing_empty(values).into_iter().map(fill_empty).collect())
    }

    /// Values of one column, up to its last non-empty cell.
    ///
    /// The script reports each cell as a `[value, index]` pair; only the
    /// values are kept.
    pub fn get_column(&self, col: u32) -> Result<Vec<Value>> {
        let cells = self.invoke_list(catalog::GET_COLUMN, [col.into()])?;
        let values = cells
            .into_iter()
            .map(|cell| match cell {
                Value::Array(pair) => pair.into_iter().next().unwrap_or_else(Value::empty),
                scalar => scalar,
            })
            .collect();
        Ok(trim_trailing_empty(values).into_iter().map(fill_empty).collect())
    }

    /// A `num_rows` x `num_cols` block starting at (`start_row`, `start_col`).
    ///
    /// Always returns exactly `num_rows` rows of `num_cols` values; cells the
    /// script leaves out or reports as `null` read as `""`.
    ///
    /// A reply that would need padding out to more than [`MAX_RANGE_CELLS`]
    /// cells is rejected as [`Error::UnexpectedResult`].
    pub fn get_range(
        &self,
        start_row: u32,
        start_col: u32,
        num_rows: u32,
        num_cols: u32,
    ) -> Result<Vec<Vec<Value>>> {
        let function = catalog::GET_MATRIX;
        let rows = self.invoke_list(
            function,
            [start_row.into(), start_col.into(), num_rows.into(), num_cols.into()],
        )?;

        let mut matrix = rows
            .into_iter()
            .take(num_rows as usize)
            .map(|row| {
                row.into_array()
                    .map(|cells| cells.into_iter().take(num_cols as usize).map(fill_empty).collect::<Vec<_>>())
                    .map_err(|other| unexpected(function, "2D list", &other))
            })
            .collect::<Result<Vec<_>>>()?;

        let short = matrix.len() < num_rows as usize || matrix.iter().any(|row| row.len() < num_cols as usize);
        if short && u64::from(num_rows) * u64::from(num_cols) > MAX_RANGE_CELLS {
            return Err(Error::UnexpectedResult {
                function: function.to_string(),
                expected: "2D list",
                actual: "incomplete matrix for an oversized range",
            });
        }

        matrix.resize_with(num_rows as usize, Vec::new);
        for row in &mut matrix {
            row.resize_with(num_cols as usize, Value::empty);
        }
        Ok(matrix)
    }

    /// Write one cell.
    pub fn set_cell_value(&self, row: u32, col: u32, value: impl Into<Value>) -> Result<()> {
        self.invoke(catalog::SET_CELL_VALUE, [row.into(), col.into(), value.into()])?;
        Ok(())
    }

    /// Write a `num_rows` x `num_cols` block starting at (`start_row`, `start_col`).
    ///
    /// `values` must have exactly `num_rows` rows of `num_cols` values each;
    /// otherwise [`Error::Shape`] is returned and nothing is sent. If the
    /// script fails part way through, some cells may already be written.
    pub fn set_range(
        &self,
        start_row: u32,
        start_col: u32,
        num_rows: u32,
        num_cols: u32,
        values: &[Vec<Value>],
    ) -> Result<()> {
        check_shape(values, num_rows as usize, num_cols as usize)?;

        let matrix = Value::Array(values.iter().map(|row| Value::Array(row.clone())).collect());
        self.invoke(
            catalog::SET_RANGE,
            [
                start_row.into(),
                start_col.into(),
                num_rows.into(),
                num_cols.into(),
                matrix,
            ],
        )?;
        Ok(())
    }

    /// Index of the last row containing data (0 for an empty sheet).
    pub fn get_max_row(&self) -> Result<u32> {
        self.invoke_index(catalog::GET_MAX_ROW)
    }

    /// Index of the last column containing data (0 for an empty sheet).
    pub fn get_max_col(&self) -> Result<u32> {
        self.invoke_index(catalog::GET_MAX_COL)
    }

    /// Append `n` empty rows after the last row of the sheet.
    pub fn insert_rows_at_end(&self, n: u32) -> Result<()> {
        self.invoke(catalog::INSERT_ROW_AT_END, [n.into()])?;
        Ok(())
    }

    /// Append `n` empty columns after the last column of the sheet.
    pub fn insert_cols_at_end(&self, n: u32) -> Result<()> {
        self.invoke(catalog::INSERT_COL_AT_END, [n.into()])?;
        Ok(())
    }

    // -- Internal helpers --

    fn invoke<const N: usize>(&self, function: &str, args: [Value; N]) -> Result<Option<Value>> {
        let mut params = Vec::with_capacity(N + 2);
        params.push(Value::from(self.url()));
        params.push(Value::from(&self.name));
        params.extend(args);
        self.invoker.invoke(function, params)
    }

    fn invoke_list<const N: usize>(&self, function: &str, args: [Value; N]) -> Result<Vec<Value>> {
        match self.invoke(function, args)? {
            None => Ok(Vec::new()),
            Some(value) => value
                .into_array()
                .map_err(|other| unexpected(function, "list", &other)),
        }
    }

    fn invoke_index(&self, function: &str) -> Result<u32> {
        match self.invoke(function, [])? {
            Some(Value::Number(n)) if n >= 0.0 && n.fract() == 0.0 && n <= u32::MAX as f64 => Ok(n as u32),
            Some(other) => Err(unexpected(function, "non-negative integer", &other)),
            None => Err(Error::UnexpectedResult {
                function: function.to_string(),
                expected: "non-negative integer",
                actual: "nothing",
            }),
        }
    }
}

fn check_exists<S: ScriptService>(invoker: &RemoteInvoker<'_, S>, url: &str, name: &str) -> Result<()> {
    let function = catalog::CHECK_SHEET_EXISTS;
    let parameters = vec![Value::from(url), Value::from(name)];
    match invoker.call(function, parameters.clone()) {
        RemoteOutcome::Success(_) => Ok(()),
        RemoteOutcome::ScriptFailure(e) => {
            tracing::warn!("Sheet '{}' not found in {}: {}", name, url, e.message);
            Err(Error::SheetNotFound {
                sheet: name.to_string(),
                url: url.to_string(),
            })
        }
        RemoteOutcome::TransportFailure(e) => Err(Error::transport(function, &parameters, e)),
    }
}

fn check_shape(values: &[Vec<Value>], num_rows: usize, num_cols: usize) -> Result<()> {
    if values.len() != num_rows {
        return Err(Error::Shape {
            expected_rows: num_rows,
            expected_cols: num_cols,
            row: None,
            actual: values.len(),
        });
    }
    if let Some((row, values)) = values.iter().enumerate().find(|(_, row)| row.len() != num_cols) {
        return Err(Error::Shape {
            expected_rows: num_rows,
            expected_cols: num_cols,
            row: Some(row),
            actual: values.len(),
        });
    }
    Ok(())
}

fn fill_empty(value: Value) -> Value {
    match value {
        Value::Null => Value::empty(),
        other => other,
    }
}

/// Drop empty cells after the last non-empty one.
fn trim_trailing_empty(mut values: Vec<Value>) -> Vec<Value> {
    let len = values.iter().rposition(|v| !v.is_empty()).map_or(0, |i| i + 1);
    values.truncate(len);
    values
}
