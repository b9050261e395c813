//! FFI bindings for the weekday heatmap
//!
//! This module provides C-compatible functions for producing chart payloads
//! from other languages. All functions use C strings (null-terminated) and
//! return allocated memory that must be freed by the caller using
//! `heatmap_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::config::ChartConfig;
use crate::pipeline::{records_to_chart_json, seed_chart_json, HeatmapProcessor};

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

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

// ============================================================================
// Stateless API
// ============================================================================

/// Chart payload JSON for the compiled-in seed data.
///
/// # Safety
/// - Returns a newly allocated string that must be freed with `heatmap_free_string`.
/// - Returns NULL on error; call `heatmap_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn heatmap_seed_chart_json() -> *mut c_char {
    clear_last_error();

    match seed_chart_json() {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Convert a JSON array of records to chart payload JSON.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `heatmap_free_string`.
/// - Returns NULL on error; call `heatmap_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn heatmap_records_to_chart_json(json: *const c_char) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    match records_to_chart_json(json_str) {
        Ok(payload) => string_to_cstr(&payload),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Processor API
// ============================================================================

/// Opaque handle to a HeatmapProcessor
pub struct HeatmapProcessorHandle {
    processor: HeatmapProcessor,
}

/// Create a processor with default chart settings.
///
/// # Safety
/// - Returns a pointer to a newly allocated processor.
/// - Must be freed with `heatmap_processor_free`.
#[no_mangle]
pub unsafe extern "C" fn heatmap_processor_new() -> *mut HeatmapProcessorHandle {
    clear_last_error();

    let handle = Box::new(HeatmapProcessorHandle {
        processor: HeatmapProcessor::new(),
    });
    Box::into_raw(handle)
}

/// Create a processor from a TOML chart configuration.
///
/// # Safety
/// - `config_toml` must be a valid null-terminated C string.
/// - Must be freed with `heatmap_processor_free`.
/// - Returns NULL on error; call `heatmap_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn heatmap_processor_new_with_config(
    config_toml: *const c_char,
) -> *mut HeatmapProcessorHandle {
    clear_last_error();

    let toml_str = match cstr_to_string(config_toml) {
        Some(s) => s,
        None => {
            set_last_error("Invalid config string pointer");
            return ptr::null_mut();
        }
    };

    let processor = ChartConfig::from_toml_str(&toml_str).and_then(HeatmapProcessor::with_config);

    match processor {
        Ok(processor) => Box::into_raw(Box::new(HeatmapProcessorHandle { processor })),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Free a processor.
///
/// # Safety
/// - `processor` must be a valid pointer returned by `heatmap_processor_new*`, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn heatmap_processor_free(processor: *mut HeatmapProcessorHandle) {
    if !processor.is_null() {
        drop(Box::from_raw(processor));
    }
}

/// Process a JSON array of records with a processor's chart settings.
///
/// # Safety
/// - `processor` must be a valid pointer returned by `heatmap_processor_new*`.
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `heatmap_free_string`.
/// - Returns NULL on error; call `heatmap_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn heatmap_processor_process(
    processor: *mut HeatmapProcessorHandle,
    json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    if processor.is_null() {
        set_last_error("Invalid processor pointer");
        return ptr::null_mut();
    }

    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    let handle = &*processor;
    match handle.processor.process_json(&json_str) {
        Ok(payload) => string_to_cstr(&payload),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Free a string returned by heatmap functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a heatmap function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn heatmap_free_string(ptr: *mut c_char) {
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
/// - The returned pointer is valid until the next heatmap function call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn heatmap_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

/// Get the library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn heatmap_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    fn sample_records_json() -> CString {
        CString::new(
            r#"[
                {"name": "Sophia", "values": {"monday": 72, "tuesday": 132, "wednesday": 114, "thursday": 19, "friday": 16}},
                {"name": "Lukas", "values": {"monday": 38, "tuesday": 5, "wednesday": 8, "thursday": 117, "friday": 115}}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_ffi_seed_chart_json() {
        unsafe {
            let result = heatmap_seed_chart_json();
            assert!(!result.is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            assert!(result_str.contains("chart_version"));
            assert!(result_str.contains("Alexander"));

            heatmap_free_string(result);
        }
    }

    #[test]
    fn test_ffi_records_to_chart_json() {
        let json = sample_records_json();

        unsafe {
            let result = heatmap_records_to_chart_json(json.as_ptr());
            assert!(!result.is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            let payload: serde_json::Value = serde_json::from_str(result_str).unwrap();
            assert_eq!(payload["summary"]["sums"]["monday"], 110);

            heatmap_free_string(result);
        }
    }

    #[test]
    fn test_ffi_processor_lifecycle() {
        let config = CString::new("title = \"Team sales\"\nshow_aggregates = false").unwrap();
        let json = sample_records_json();

        unsafe {
            let processor = heatmap_processor_new_with_config(config.as_ptr());
            assert!(!processor.is_null());

            let result = heatmap_processor_process(processor, json.as_ptr());
            assert!(!result.is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            let payload: serde_json::Value = serde_json::from_str(result_str).unwrap();
            assert_eq!(payload["title"], "Team sales");
            assert_eq!(payload["series"].as_array().unwrap().len(), 1);

            heatmap_free_string(result);
            heatmap_processor_free(processor);

            let default_processor = heatmap_processor_new();
            assert!(!default_processor.is_null());
            heatmap_processor_free(default_processor);
        }
    }

    #[test]
    fn test_ffi_error_handling() {
        unsafe {
            let empty = CString::new("[]").unwrap();
            let result = heatmap_records_to_chart_json(empty.as_ptr());
            assert!(result.is_null());

            let error = heatmap_last_error();
            assert!(!error.is_null());

            let error_str = CStr::from_ptr(error).to_str().unwrap();
            assert!(error_str.contains("empty"));
        }
    }

    #[test]
    fn test_ffi_invalid_config() {
        let config = CString::new("[color_axis]\nmin_color = \"white\"").unwrap();

        unsafe {
            let processor = heatmap_processor_new_with_config(config.as_ptr());
            assert!(processor.is_null());
            assert!(!heatmap_last_error().is_null());
        }
    }

    #[test]
    fn test_ffi_version() {
        unsafe {
            let version = heatmap_version();
            assert!(!version.is_null());

            let version_str = CStr::from_ptr(version).to_str().unwrap();
            assert!(!version_str.is_empty());
        }
    }
}
