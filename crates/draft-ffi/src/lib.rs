//! C FFI bindings for draft-core
//!
//! Embedding applications hand over a sheet as a JSON values array (rows of
//! `string | number | null`) and get the parse back either as one JSON
//! document or through an opaque report handle.

use draft_core::{parse_board, parse_json_grid_str, ParseConfig, ParseReport};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

/// Opaque handle to a parse report
pub struct FfiParseReport {
    inner: ParseReport,
}

/// Read an optional C string; null means absent
unsafe fn opt_str<'a>(s: *const c_char) -> Result<Option<&'a str>, ()> {
    if s.is_null() {
        return Ok(None);
    }
    CStr::from_ptr(s).to_str().map(Some).map_err(|_| ())
}

unsafe fn run_parse(grid_json: *const c_char, config_json: *const c_char) -> Option<ParseReport> {
    let grid_json = opt_str(grid_json).ok()??;
    let config = match opt_str(config_json).ok()? {
        Some(json) => {
            let config: ParseConfig = serde_json::from_str(json).ok()?;
            config.validate().ok()?;
            config
        }
        None => ParseConfig::default(),
    };

    let grid = parse_json_grid_str(grid_json, "sheet").ok()?;
    parse_board(&grid, &config).ok()
}

fn into_c_string(s: impl Into<Vec<u8>>) -> *mut c_char {
    CString::new(s)
        .map(|s| s.into_raw())
        .unwrap_or(ptr::null_mut())
}

/// Parse a sheet and return the full report as JSON
///
/// # Safety
/// - `grid_json` must be a valid C string holding a JSON array of rows
/// - `config_json` must be a valid C string holding a parse config, or null for defaults
/// - Returns null on error
/// - Caller must free the returned string with `draft_free_string`
#[no_mangle]
pub unsafe extern "C" fn draft_parse_json(
    grid_json: *const c_char,
    config_json: *const c_char,
) -> *mut c_char {
    match run_parse(grid_json, config_json) {
        Some(report) => match serde_json::to_string(&report) {
            Ok(json) => into_c_string(json),
            Err(_) => ptr::null_mut(),
        },
        None => ptr::null_mut(),
    }
}

/// Parse a sheet into a report handle
///
/// # Safety
/// - Same contract as `draft_parse_json`
/// - Caller must free the handle with `draft_free_report`
#[no_mangle]
pub unsafe extern "C" fn draft_parse_report(
    grid_json: *const c_char,
    config_json: *const c_char,
) -> *mut FfiParseReport {
    match run_parse(grid_json, config_json) {
        Some(inner) => Box::into_raw(Box::new(FfiParseReport { inner })),
        None => ptr::null_mut(),
    }
}

/// Free a report handle
///
/// # Safety
/// - `report` must be a valid pointer returned by `draft_parse_report` or null
#[no_mangle]
pub unsafe extern "C" fn draft_free_report(report: *mut FfiParseReport) {
    if !report.is_null() {
        drop(Box::from_raw(report));
    }
}

/// Number of sequenced picks in a report
///
/// # Safety
/// - `report` must be a valid pointer returned by `draft_parse_report`
#[no_mangle]
pub unsafe extern "C" fn draft_report_pick_count(report: *const FfiParseReport) -> usize {
    if report.is_null() {
        return 0;
    }
    (*report).inner.picks.len()
}

/// Number of team columns in a report
///
/// # Safety
/// - `report` must be a valid pointer returned by `draft_parse_report`
#[no_mangle]
pub unsafe extern "C" fn draft_report_team_count(report: *const FfiParseReport) -> usize {
    if report.is_null() {
        return 0;
    }
    (*report).inner.teams.len()
}

/// Whether the layout was only guessed
///
/// # Safety
/// - `report` must be a valid pointer returned by `draft_parse_report`
#[no_mangle]
pub unsafe extern "C" fn draft_report_low_confidence(report: *const FfiParseReport) -> bool {
    if report.is_null() {
        return true;
    }
    (*report).inner.is_low_confidence()
}

/// One pick flattened to a JSON record, in overall order
///
/// # Safety
/// - `report` must be a valid pointer returned by `draft_parse_report`
/// - Returns null if index is out of bounds
/// - Caller must free the returned string with `draft_free_string`
#[no_mangle]
pub unsafe extern "C" fn draft_report_pick(
    report: *const FfiParseReport,
    index: usize,
) -> *mut c_char {
    if report.is_null() {
        return ptr::null_mut();
    }

    (*report)
        .inner
        .records()
        .get(index)
        .and_then(|r| serde_json::to_string(r).ok())
        .map(into_c_string)
        .unwrap_or(ptr::null_mut())
}

/// The report's one-line summary
///
/// # Safety
/// - `report` must be a valid pointer returned by `draft_parse_report`
/// - Caller must free the returned string with `draft_free_string`
#[no_mangle]
pub unsafe extern "C" fn draft_report_summary(report: *const FfiParseReport) -> *mut c_char {
    if report.is_null() {
        return ptr::null_mut();
    }
    into_c_string((*report).inner.summary())
}

/// Free a string returned by other FFI functions
///
/// # Safety
/// - `s` must be a valid pointer returned by a draft_* function or null
#[no_mangle]
pub unsafe extern "C" fn draft_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
