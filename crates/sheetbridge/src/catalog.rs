//! Names of the functions the backing script exposes.
//!
//! Sheet-scoped functions take `[url, sheetName, ...]`; spreadsheet-scoped
//! ones take `[url]`. All positions are 1-indexed.

pub const CHECK_SS_EXISTS: &str = "checkSSExists";
pub const CHECK_SHEET_EXISTS: &str = "checkSheetExists";
pub const GET_SHEET_NAMES: &str = "getSheetNames";

pub const GET_MATRIX: &str = "getMatrix";
pub const GET_COLUMN: &str = "getColumn";
pub const GET_ROW: &str = "getRow";
pub const GET_CELL_VALUE: &str = "getCellValue";
pub const SET_CELL_VALUE: &str = "setCellValue";
pub const SET_RANGE: &str = "setRange";
pub const GET_MAX_ROW: &str = "getMaxRow";
pub const GET_MAX_COL: &str = "getMaxCol";
pub const INSERT_ROW_AT_END: &str = "insertRowAtEnd";
pub const INSERT_COL_AT_END: &str = "insertColAtEnd";
