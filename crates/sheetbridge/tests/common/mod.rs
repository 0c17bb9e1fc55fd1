//! In-memory stand-in for the backing script.
//!
//! Implements the remote operation catalog over a map of spreadsheets, records
//! every request it receives, and can be told to fail at the transport level
//! or to return a canned reply for a given function.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};

use sheetbridge::{ExecutionRequest, Operation, ScriptConfig, ScriptService, StackFrame, TransportError, UserSession, Value};

pub const SCRIPT_ID: &str = "test-script";
pub const KEY: &str = "test-key";
pub const URL: &str = "https://docs.google.com/spreadsheets/d/test-key/edit";
pub const OTHER_URL: &str = "https://docs.google.com/spreadsheets/d/other-key/edit";

/// One sheet: sparse cells plus the grid size reported by the Sheets UI.
pub struct FakeSheet {
    cells: BTreeMap<(u32, u32), Value>,
    pub rows: u32,
    pub cols: u32,
}

impl Default for FakeSheet {
    fn default() -> Self {
        Self {
            cells: BTreeMap::new(),
            rows: 1000,
            cols: 26,
        }
    }
}

impl FakeSheet {
    fn get(&self, row: u32, col: u32) -> Value {
        self.cells.get(&(row, col)).cloned().unwrap_or_else(Value::empty)
    }

    fn set(&mut self, row: u32, col: u32, value: Value) {
        self.rows = self.rows.max(row);
        self.cols = self.cols.max(col);
        if value.is_empty() {
            self.cells.remove(&(row, col));
        } else {
            self.cells.insert((row, col), value);
        }
    }

    fn last_row(&self) -> u32 {
        self.cells.keys().map(|(row, _)| *row).max().unwrap_or(0)
    }

    fn last_col(&self) -> u32 {
        self.cells.keys().map(|(_, col)| *col).max().unwrap_or(0)
    }
}

#[derive(Default)]
pub struct FakeScriptService {
    books: RefCell<BTreeMap<String, Vec<(String, FakeSheet)>>>,
    calls: RefCell<Vec<ExecutionRequest>>,
    transport_down: Cell<bool>,
    canned: RefCell<HashMap<String, Operation>>,
}

impl FakeScriptService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spreadsheet(self, url: &str, sheets: &[&str]) -> Self {
        let sheets = sheets
            .iter()
            .map(|name| (name.to_string(), FakeSheet::default()))
            .collect();
        self.books.borrow_mut().insert(url.to_string(), sheets);
        self
    }

    /// Make every following call fail before reaching the script.
    pub fn set_transport_down(&self, down: bool) {
        self.transport_down.set(down);
    }

    /// Reply to `function` with `operation` instead of running it.
    pub fn respond_with(&self, function: &str, operation: Operation) {
        self.canned.borrow_mut().insert(function.to_string(), operation);
    }

    pub fn calls(&self) -> Vec<ExecutionRequest> {
        self.calls.borrow().clone()
    }

    pub fn calls_to(&self, function: &str) -> Vec<ExecutionRequest> {
        self.calls
            .borrow()
            .iter()
            .filter(|request| request.function == function)
            .cloned()
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn dimensions(&self, url: &str, sheet: &str) -> (u32, u32) {
        let books = self.books.borrow();
        let (_, sheet) = books[url].iter().find(|(name, _)| name == sheet).unwrap();
        (sheet.rows, sheet.cols)
    }

    pub fn cell(&self, url: &str, sheet: &str, row: u32, col: u32) -> Value {
        let books = self.books.borrow();
        let (_, sheet) = books[url].iter().find(|(name, _)| name == sheet).unwrap();
        sheet.get(row, col)
    }

    fn run(&self, function: &str, params: &[Value]) -> Result<Option<Value>, String> {
        let mut books = self.books.borrow_mut();
        let url = str_arg(params, 0)?;
        let book = books
            .get_mut(url)
            .ok_or_else(|| format!("Exception: No item with the given ID could be found: {url}"))?;

        match function {
            "checkSSExists" => return Ok(None),
            "getSheetNames" => {
                let names: Vec<Value> = book.iter().map(|(name, _)| Value::from(name)).collect();
                return Ok(Some(Value::Array(names)));
            }
            _ => {}
        }

        let name = str_arg(params, 1)?;
        let (_, sheet) = book
            .iter_mut()
            .find(|(sheet_name, _)| sheet_name == name)
            .ok_or_else(|| format!("Exception: Sheet {name} does not exist"))?;

        match function {
            "checkSheetExists" => Ok(None),
            "getCellValue" => {
                let (row, col) = (index_arg(params, 2)?, index_arg(params, 3)?);
                Ok(Some(sheet.get(row, col)))
            }
            "setCellValue" => {
                let (row, col) = (index_arg(params, 2)?, index_arg(params, 3)?);
                let value = params.get(4).cloned().ok_or("Exception: missing value")?;
                sheet.set(row, col, value);
                Ok(None)
            }
            "getRow" => {
                let row = index_arg(params, 2)?;
                let values = (1..=sheet.last_col()).map(|col| sheet.get(row, col)).collect();
                Ok(Some(Value::Array(values)))
            }
            "getColumn" => {
                let col = index_arg(params, 2)?;
                let pairs = (1..=sheet.last_row())
                    .enumerate()
                    .map(|(i, row)| Value::Array(vec![sheet.get(row, col), Value::from(i as u32)]))
                    .collect();
                Ok(Some(Value::Array(pairs)))
            }
            "getMatrix" => {
                let (start_row, start_col) = (index_arg(params, 2)?, index_arg(params, 3)?);
                let (num_rows, num_cols) = (count_arg(params, 4)?, count_arg(params, 5)?);
                let matrix = (start_row..start_row + num_rows)
                    .map(|row| {
                        Value::Array(
                            (start_col..start_col + num_cols)
                                .map(|col| sheet.get(row, col))
                                .collect(),
                        )
                    })
                    .collect();
                Ok(Some(Value::Array(matrix)))
            }
            "setRange" => {
                let (start_row, start_col) = (index_arg(params, 2)?, index_arg(params, 3)?);
                let (num_rows, num_cols) = (count_arg(params, 4)?, count_arg(params, 5)?);
                let rows = params
                    .get(6)
                    .and_then(Value::as_array)
                    .ok_or("Exception: values must be a 2D array")?;
                if rows.len() != num_rows as usize {
                    return Err("Exception: The number of rows in the data does not match the number of rows in the range.".into());
                }
                for (r, row) in rows.iter().enumerate() {
                    let row = row.as_array().ok_or("Exception: values must be a 2D array")?;
                    if row.len() != num_cols as usize {
                        return Err("Exception: The number of columns in the data does not match the number of columns in the range.".into());
                    }
                    for (c, value) in row.iter().enumerate() {
                        sheet.set(start_row + r as u32, start_col + c as u32, value.clone());
                    }
                }
                Ok(None)
            }
            "getMaxRow" => Ok(Some(Value::from(sheet.last_row()))),
            "getMaxCol" => Ok(Some(Value::from(sheet.last_col()))),
            "insertRowAtEnd" => {
                sheet.rows += count_arg(params, 2)?;
                Ok(None)
            }
            "insertColAtEnd" => {
                sheet.cols += count_arg(params, 2)?;
                Ok(None)
            }
            other => Err(format!("Script function not found: {other}")),
        }
    }
}

impl ScriptService for FakeScriptService {
    fn execute(&self, script_id: &str, request: &ExecutionRequest) -> Result<Operation, TransportError> {
        self.calls.borrow_mut().push(request.clone());

        if self.transport_down.get() {
            return Err(TransportError::Network("connection refused".into()));
        }
        if script_id != SCRIPT_ID {
            return Err(TransportError::Http {
                status: 404,
                body: "Requested entity was not found.".into(),
            });
        }
        if let Some(operation) = self.canned.borrow().get(&request.function) {
            return Ok(operation.clone());
        }

        Ok(match self.run(&request.function, &request.parameters) {
            Ok(Some(value)) => Operation::result(value),
            Ok(None) => Operation::empty(),
            Err(message) => Operation::script_error(message, vec![StackFrame::new(request.function.clone(), 1)]),
        })
    }
}

fn str_arg(params: &[Value], i: usize) -> Result<&str, String> {
    params
        .get(i)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("Exception: parameter {i} must be a string"))
}

fn count_arg(params: &[Value], i: usize) -> Result<u32, String> {
    match params.get(i).and_then(Value::as_f64) {
        Some(n) if n >= 0.0 && n.fract() == 0.0 => Ok(n as u32),
        _ => Err(format!("Exception: parameter {i} must be a non-negative integer")),
    }
}

fn index_arg(params: &[Value], i: usize) -> Result<u32, String> {
    match count_arg(params, i)? {
        0 => Err("Exception: The coordinates of the range are outside the dimensions of the sheet.".into()),
        n => Ok(n),
    }
}

/// A session over a fake holding one spreadsheet at [`URL`] with two sheets.
pub fn session() -> UserSession<FakeScriptService> {
    session_with(FakeScriptService::new().with_spreadsheet(URL, &["Sheet1", "Sheet2"]))
}

pub fn session_with(service: FakeScriptService) -> UserSession<FakeScriptService> {
    UserSession::new(service, ScriptConfig::new(SCRIPT_ID)).unwrap()
}
