//! FFI bindings for Stride Flux
//!
//! This module provides C-compatible functions for calling Stride from other languages.
//! All functions use C strings (null-terminated) and return allocated memory that
//! must be freed by the caller using `stride_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::error::ComputeError;
use crate::package::{PackageParser, SensorPackage};
use crate::pipeline::{process_packages, workout_summary, WorkoutProcessor};
use crate::types::WorkoutResult;

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Set the last error message
fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Clear the last error message
fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Unwrap a pipeline result into an owned C string, recording any error
fn finish(result: Result<String, ComputeError>) -> *mut c_char {
    match result {
        Ok(s) => string_to_cstr(&s),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Parse the `data` argument: a JSON array of numbers
fn parse_data(json: &str) -> Result<Vec<f64>, ComputeError> {
    let data: Vec<f64> = serde_json::from_str(json)?;
    Ok(data)
}

// ============================================================================
// Single workout
// ============================================================================

/// Compute one workout and return its summary line.
///
/// # Safety
/// - `workout_type` and `data_json` must be valid null-terminated C strings.
/// - `data_json` is a JSON array of numbers, e.g. `[15000, 1, 75]`.
/// - Returns a newly allocated string that must be freed with `stride_free_string`.
/// - Returns NULL on error; call `stride_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn stride_workout_summary(
    workout_type: *const c_char,
    data_json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let (code, data) = match read_arguments(workout_type, data_json) {
        Some(args) => args,
        None => return ptr::null_mut(),
    };

    finish(parse_data(&data).and_then(|values| workout_summary(&code, &values)))
}

/// Compute one workout and return a JSON summary payload.
///
/// # Safety
/// - `workout_type` and `data_json` must be valid null-terminated C strings.
/// - Returns a newly allocated string that must be freed with `stride_free_string`.
/// - Returns NULL on error; call `stride_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn stride_workout_json(
    workout_type: *const c_char,
    data_json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let (code, data) = match read_arguments(workout_type, data_json) {
        Some(args) => args,
        None => return ptr::null_mut(),
    };

    finish(parse_data(&data).and_then(|values| {
        let package = SensorPackage::new(code, values);
        WorkoutProcessor::new().process_to_json(&package)
    }))
}

unsafe fn read_arguments(
    workout_type: *const c_char,
    data_json: *const c_char,
) -> Option<(String, String)> {
    let code = match cstr_to_string(workout_type) {
        Some(s) => s,
        None => {
            set_last_error("Invalid workout type string pointer");
            return None;
        }
    };

    let data = match cstr_to_string(data_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid data JSON string pointer");
            return None;
        }
    };

    Some((code, data))
}

// ============================================================================
// Batch API
// ============================================================================

/// Compute a JSON array of sensor packages and return a JSON array of results.
///
/// Processing stops at the first invalid package.
///
/// # Safety
/// - `packages_json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `stride_free_string`.
/// - Returns NULL on error; call `stride_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn stride_process_packages(packages_json: *const c_char) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(packages_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    finish(
        PackageParser::parse_array(&json_str)
            .and_then(|packages| process_packages(&packages))
            .and_then(|results: Vec<WorkoutResult>| {
                serde_json::to_string(&results).map_err(ComputeError::JsonError)
            }),
    )
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by Stride functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a Stride function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn stride_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next Stride function call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn stride_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

// ============================================================================
// Version Information
// ============================================================================

/// Get the Stride library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn stride_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    #[test]
    fn test_ffi_workout_summary() {
        let code = CString::new("RUN").unwrap();
        let data = CString::new("[15000, 1, 75]").unwrap();

        unsafe {
            let result = stride_workout_summary(code.as_ptr(), data.as_ptr());
            assert!(!result.is_null());

            let line = CStr::from_ptr(result).to_str().unwrap();
            assert!(line.starts_with("Training type: Running;"));
            assert!(line.contains("Calories burned: 699.750."));

            stride_free_string(result);
        }
    }

    #[test]
    fn test_ffi_workout_json() {
        let code = CString::new("SWM").unwrap();
        let data = CString::new("[720, 1, 80, 25, 40]").unwrap();

        unsafe {
            let result = stride_workout_json(code.as_ptr(), data.as_ptr());
            assert!(!result.is_null());

            let json = CStr::from_ptr(result).to_str().unwrap();
            let value: serde_json::Value = serde_json::from_str(json).unwrap();
            assert_eq!(value["metrics"]["calories_kcal"], 336.0);

            stride_free_string(result);
        }
    }

    #[test]
    fn test_ffi_process_packages() {
        let packages = CString::new(r#"[["RUN", [15000, 1, 75]], ["WLK", [9000, 1, 75, 180]]]"#)
            .unwrap();

        unsafe {
            let result = stride_process_packages(packages.as_ptr());
            assert!(!result.is_null());

            let json = CStr::from_ptr(result).to_str().unwrap();
            let results: Vec<WorkoutResult> = serde_json::from_str(json).unwrap();
            assert_eq!(results.len(), 2);
            assert_eq!(results[1].type_name, "SportsWalking");

            stride_free_string(result);
        }
    }

    #[test]
    fn test_ffi_error_handling() {
        let code = CString::new("XYZ").unwrap();
        let data = CString::new("[1, 1, 1]").unwrap();

        unsafe {
            let result = stride_workout_summary(code.as_ptr(), data.as_ptr());
            assert!(result.is_null());

            let error = stride_last_error();
            assert!(!error.is_null());
            let message = CStr::from_ptr(error).to_str().unwrap();
            assert!(message.contains("Invalid workout type"));
        }
    }

    #[test]
    fn test_ffi_null_pointer() {
        let data = CString::new("[1, 1, 1]").unwrap();

        unsafe {
            let result = stride_workout_summary(ptr::null(), data.as_ptr());
            assert!(result.is_null());
            assert!(!stride_last_error().is_null());
        }
    }

    #[test]
    fn test_ffi_version() {
        unsafe {
            let version = stride_version();
            assert!(!version.is_null());

            let version_str = CStr::from_ptr(version).to_str().unwrap();
            assert!(!version_str.is_empty());
        }
    }
}
